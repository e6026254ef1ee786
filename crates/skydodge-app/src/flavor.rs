//! Mission text: briefing before deploy, debrief after the outcome.
//!
//! A [`FlavorText`] source may fail in any way it likes; [`FlavorService`]
//! turns every failure into fixed fallback text so a session never waits on
//! or breaks because of it.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::FlavorConfig;

/// Secondary variable consulted when the configured one is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

const BRIEFING_PROMPT: &str = "Generate a futuristic flight trial mission name, a cool pilot \
callsign, and a short one-sentence objective about hunting down and neutralizing a single \
elite enemy pilot in a dense asteroid field.";

const TAUNT_SCORE_THRESHOLD: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionBriefing {
    pub name: String,
    pub objective: String,
    pub pilot_callsign: String,
}

impl MissionBriefing {
    pub fn fallback() -> Self {
        Self {
            name: "Operation Viper Hunt".into(),
            objective: "An elite enemy pilot has been detected. Hunt them down and neutralize \
                        the threat."
                .into(),
            pilot_callsign: "Hunter-1".into(),
        }
    }
}

pub fn fallback_taunt(score: u32) -> String {
    if score > TAUNT_SCORE_THRESHOLD {
        "Exceptional flying, pilot. The swarm is thinning.".into()
    } else {
        "Simulation terminated. Check your vectors and try again.".into()
    }
}

pub fn fallback_win_message() -> String {
    "Target neutralized. Excellent work, pilot. Return to base.".into()
}

#[derive(Debug, Error)]
pub enum FlavorError {
    #[error("no API key in ${0} or $GEMINI_API_KEY")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned no text")]
    EmptyResponse,
    #[error("could not parse service reply: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A source of mission text.
pub trait FlavorText: Send + Sync {
    fn mission_briefing(&self) -> Result<MissionBriefing, FlavorError>;
    fn game_over_taunt(&self, score: u32) -> Result<String, FlavorError>;
    fn win_message(&self, score: u32) -> Result<String, FlavorError>;
}

/// Client for a `generateContent` style text-generation endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from settings, reading the key from the environment.
    pub fn from_config(config: &FlavorConfig) -> Result<Self, FlavorError> {
        let api_key = read_api_key(&config.api_key_env)
            .ok_or_else(|| FlavorError::MissingApiKey(config.api_key_env.clone()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("skydodge/0.1")
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn generate(&self, body: serde_json::Value) -> Result<String, FlavorError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let reply: GenerateReply = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        reply.text()
    }
}

impl FlavorText for GeminiClient {
    fn mission_briefing(&self) -> Result<MissionBriefing, FlavorError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": BRIEFING_PROMPT }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "objective": { "type": "STRING" },
                        "pilotCallsign": { "type": "STRING" }
                    },
                    "required": ["name", "objective", "pilotCallsign"]
                }
            }
        });
        let text = self.generate(body)?;
        Ok(serde_json::from_str(text.trim())?)
    }

    fn game_over_taunt(&self, score: u32) -> Result<String, FlavorError> {
        let prompt = format!(
            "Generate a short pilot debriefing comment for a pilot who scored {score} points \
             before crashing. Make it professional yet slightly critical if the score is low. \
             Keep it under 15 words."
        );
        self.generate(text_request(&prompt))
    }

    fn win_message(&self, score: u32) -> Result<String, FlavorError> {
        let prompt = format!(
            "Generate a short, celebratory pilot debriefing comment for a pilot who \
             successfully eliminated the primary target and scored {score} points. Keep it \
             under 15 words."
        );
        self.generate(text_request(&prompt))
    }
}

fn text_request(prompt: &str) -> serde_json::Value {
    json!({ "contents": [{ "parts": [{ "text": prompt }] }] })
}

/// First usable key among `primary` and [`FALLBACK_API_KEY_ENV`].
fn read_api_key(primary: &str) -> Option<String> {
    [primary, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|key| usable_key(key))
}

fn usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != "undefined" && key != "null"
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateReply {
    fn text(self) -> Result<String, FlavorError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(FlavorError::EmptyResponse)
    }
}

/// Mission text that always resolves.
pub struct FlavorService {
    source: Option<Box<dyn FlavorText>>,
}

impl FlavorService {
    pub fn new(source: Box<dyn FlavorText>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A service that only ever answers with fallback text.
    pub fn offline() -> Self {
        Self { source: None }
    }

    /// Use the HTTP client if it can be built, otherwise go offline.
    pub fn from_config(config: &FlavorConfig) -> Self {
        match GeminiClient::from_config(config) {
            Ok(client) => Self::new(Box::new(client)),
            Err(e) => {
                log::warn!("Mission text service unavailable: {}", e);
                Self::offline()
            }
        }
    }

    pub fn mission_briefing(&self) -> MissionBriefing {
        self.resolve("briefing", |s| s.mission_briefing(), MissionBriefing::fallback)
    }

    pub fn game_over_taunt(&self, score: u32) -> String {
        self.resolve("taunt", |s| s.game_over_taunt(score), || fallback_taunt(score))
    }

    pub fn win_message(&self, score: u32) -> String {
        self.resolve("win message", |s| s.win_message(score), fallback_win_message)
    }

    fn resolve<T>(
        &self,
        what: &str,
        ask: impl FnOnce(&dyn FlavorText) -> Result<T, FlavorError>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        let Some(source) = self.source.as_deref() else {
            return fallback();
        };
        ask(source).unwrap_or_else(|e| {
            log::warn!("Using fallback {}: {}", what, e);
            fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        briefing: Option<MissionBriefing>,
        line: Option<String>,
    }

    impl FlavorText for Scripted {
        fn mission_briefing(&self) -> Result<MissionBriefing, FlavorError> {
            self.briefing.clone().ok_or(FlavorError::EmptyResponse)
        }
        fn game_over_taunt(&self, _score: u32) -> Result<String, FlavorError> {
            self.line.clone().ok_or(FlavorError::EmptyResponse)
        }
        fn win_message(&self, score: u32) -> Result<String, FlavorError> {
            self.line
                .clone()
                .map(|l| format!("{l} {score}"))
                .ok_or(FlavorError::EmptyResponse)
        }
    }

    fn failing() -> FlavorService {
        FlavorService::new(Box::new(Scripted {
            briefing: None,
            line: None,
        }))
    }

    #[test]
    fn test_failing_source_falls_back() {
        let service = failing();
        assert_eq!(service.mission_briefing(), MissionBriefing::fallback());
        assert_eq!(service.mission_briefing().pilot_callsign, "Hunter-1");
        assert_eq!(
            service.win_message(7500),
            "Target neutralized. Excellent work, pilot. Return to base."
        );
    }

    #[test]
    fn test_taunt_fallback_depends_on_score() {
        let service = FlavorService::offline();
        assert_eq!(
            service.game_over_taunt(51),
            "Exceptional flying, pilot. The swarm is thinning."
        );
        assert_eq!(
            service.game_over_taunt(50),
            "Simulation terminated. Check your vectors and try again."
        );
        assert_eq!(
            service.game_over_taunt(0),
            "Simulation terminated. Check your vectors and try again."
        );
    }

    #[test]
    fn test_working_source_is_passed_through() {
        let briefing = MissionBriefing {
            name: "Operation Glass Comet".into(),
            objective: "Find the ace.".into(),
            pilot_callsign: "Wren".into(),
        };
        let service = FlavorService::new(Box::new(Scripted {
            briefing: Some(briefing.clone()),
            line: Some("Nice".into()),
        }));
        assert_eq!(service.mission_briefing(), briefing);
        assert_eq!(service.game_over_taunt(3), "Nice");
        assert_eq!(service.win_message(9), "Nice 9");
    }

    #[test]
    fn test_briefing_uses_camel_case_callsign() {
        let parsed: MissionBriefing = serde_json::from_str(
            r#"{"name":"Op","objective":"Hunt","pilotCallsign":"Ace-7"}"#,
        )
        .unwrap();
        assert_eq!(parsed.pilot_callsign, "Ace-7");
    }

    #[test]
    fn test_reply_text_is_first_part() {
        let reply: GenerateReply = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"  Good hunting.\n"},{"text":"x"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply.text().unwrap(), "Good hunting.");
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let reply: GenerateReply = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(reply.text(), Err(FlavorError::EmptyResponse)));

        let reply: GenerateReply =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert!(matches!(reply.text(), Err(FlavorError::EmptyResponse)));
    }

    #[test]
    fn test_placeholder_keys_are_rejected() {
        assert!(!usable_key(""));
        assert!(!usable_key("undefined"));
        assert!(!usable_key("null"));
        assert!(usable_key("abc123"));
    }

    #[test]
    fn test_missing_key_goes_offline() {
        if std::env::var(FALLBACK_API_KEY_ENV).is_ok() {
            return;
        }
        let config = FlavorConfig {
            api_key_env: "SKYDODGE_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..FlavorConfig::default()
        };
        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(FlavorError::MissingApiKey(_))
        ));
        let service = FlavorService::from_config(&config);
        assert_eq!(service.mission_briefing(), MissionBriefing::fallback());
    }
}
