//! Input events forwarded from the presentation layer to the simulation.
//!
//! Events are queued and folded into `InputState` at the next frame boundary.

use serde::{Deserialize, Serialize};

/// Flight and weapon controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    Boost,
    Fire,
}

impl Control {
    /// Default keyboard binding. Key names follow DOM `KeyboardEvent.key`,
    /// matched case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "a" | "arrowleft" => Some(Control::YawLeft),
            "d" | "arrowright" => Some(Control::YawRight),
            "w" | "arrowup" => Some(Control::PitchUp),
            "s" | "arrowdown" => Some(Control::PitchDown),
            "q" => Some(Control::RollLeft),
            "e" => Some(Control::RollRight),
            " " | "space" => Some(Control::Boost),
            "f" => Some(Control::Fire),
            _ => None,
        }
    }
}

/// All input the simulation consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    KeyDown { control: Control },
    KeyUp { control: Control },
    /// Cursor position in normalized device coordinates (-1..1, +y up).
    PointerMove { x: f64, y: f64 },
    PointerDown,
    PointerUp,
    /// Viewport size in pixels.
    Resize { width: u32, height: u32 },
}

/// Current control state, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub boost: bool,
    pub fire_key: bool,
    pub pointer_down: bool,
    /// Cursor in normalized device coordinates.
    pub aim: [f64; 2],
}

impl InputState {
    /// Fold one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { control } => self.set(control, true),
            InputEvent::KeyUp { control } => self.set(control, false),
            InputEvent::PointerMove { x, y } => {
                self.aim = [x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)];
            }
            InputEvent::PointerDown => self.pointer_down = true,
            InputEvent::PointerUp => self.pointer_down = false,
            InputEvent::Resize { .. } => {}
        }
    }

    /// Whether the trigger is held by either the pointer or the fire key.
    pub fn firing(&self) -> bool {
        self.pointer_down || self.fire_key
    }

    fn set(&mut self, control: Control, down: bool) {
        let slot = match control {
            Control::YawLeft => &mut self.yaw_left,
            Control::YawRight => &mut self.yaw_right,
            Control::PitchUp => &mut self.pitch_up,
            Control::PitchDown => &mut self.pitch_down,
            Control::RollLeft => &mut self.roll_left,
            Control::RollRight => &mut self.roll_right,
            Control::Boost => &mut self.boost,
            Control::Fire => &mut self.fire_key,
        };
        *slot = down;
    }
}
