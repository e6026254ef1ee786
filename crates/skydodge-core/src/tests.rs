#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::{Control, InputEvent, InputState};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::geometry;
    use crate::planes;
    use crate::state::FrameSnapshot;
    use crate::types::{SimTime, Transform};

    const EPS: f64 = 1e-9;

    // ---- Geometry ----

    /// Squared-distance and plain-distance formulations must agree.
    #[test]
    fn test_within_matches_plain_distance() {
        let samples = [
            (DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0), 5.0),
            (DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0), 5.0001),
            (DVec3::new(1.0, 1.0, 1.0), DVec3::new(-2.0, 5.0, 9.0), 9.5),
            (DVec3::new(10.0, 0.0, 0.0), DVec3::new(10.0, 0.0, 0.0), 0.5),
            (DVec3::new(-100.0, 20.0, 7.0), DVec3::new(40.0, -3.0, 2.0), 142.0),
        ];
        for (a, b, r) in samples {
            assert_eq!(
                geometry::within(a, b, r),
                a.distance(b) < r,
                "within() disagreed for {a:?} {b:?} r={r}"
            );
        }
        assert!(geometry::spheres_overlap(DVec3::ZERO, 2.0, DVec3::new(4.9, 0.0, 0.0), 3.0));
        assert!(!geometry::spheres_overlap(DVec3::ZERO, 2.0, DVec3::new(5.0, 0.0, 0.0), 3.0));
    }

    #[test]
    fn test_direction_guards_zero_length() {
        let p = DVec3::new(5.0, 5.0, 5.0);
        assert!(geometry::direction(p, p).is_none());
        let dir = geometry::direction(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!((dir - DVec3::Z).length() < EPS);
        assert!(geometry::look_rotation(DVec3::ZERO).is_none());
    }

    #[test]
    fn test_from_spherical() {
        let north = geometry::from_spherical(10.0, 0.0, 1.3);
        assert!((north - DVec3::new(0.0, 10.0, 0.0)).length() < EPS);

        let forward = geometry::from_spherical(10.0, std::f64::consts::FRAC_PI_2, 0.0);
        assert!((forward - DVec3::new(0.0, 0.0, 10.0)).length() < EPS);

        let p = geometry::from_spherical(250.0, 0.7, 2.1);
        assert!((p.length() - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_whole_meters_floors_and_clamps() {
        assert_eq!(geometry::whole_meters(1499.99), 1499);
        assert_eq!(geometry::whole_meters(0.0), 0);
        assert_eq!(geometry::whole_meters(-3.0), 0);
        assert_eq!(geometry::whole_meters(f64::NAN), 0);
    }

    #[test]
    fn test_transform_yaw_turns_forward() {
        let mut t = Transform::default();
        assert!((t.forward() - DVec3::Z).length() < EPS);

        t.rotate_local(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        assert!((t.forward() - DVec3::X).length() < 1e-9);

        t.translate_forward(3.0);
        assert!((t.position - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_transform_pitch_after_roll_is_local() {
        // Roll 90° then pitch: the nose should swing sideways, not up.
        let mut t = Transform::default();
        t.rotate_local(0.0, 0.0, std::f64::consts::FRAC_PI_2);
        t.rotate_local(0.0, -0.3, 0.0);
        let fwd = t.forward();
        assert!(fwd.y.abs() < 1e-9, "pitch should act in the rolled frame: {fwd:?}");
        assert!(fwd.x.abs() > 0.1);
    }

    #[test]
    fn test_transform_face() {
        let mut t = Transform::default();
        t.face(DVec3::new(0.0, 0.0, -4.0));
        assert!((t.forward() - DVec3::NEG_Z).length() < 1e-9);

        let before = t.orientation;
        t.face(DVec3::ZERO);
        assert_eq!(t.orientation, before);
    }

    // ---- Phase ordering ----

    #[test]
    fn test_phase_progression_is_forward_only() {
        let mut phase = EncounterPhase::Rival;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            assert!(next > phase);
            phase = next;
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![EncounterPhase::Rival, EncounterPhase::DeathStar, EncounterPhase::Planet]
        );
        assert_eq!(EncounterPhase::Rival.boss_kind(), None);
        assert_eq!(BossKind::Planet.phase().boss_kind(), Some(BossKind::Planet));
    }

    #[test]
    fn test_outcome_final_score() {
        assert_eq!(SessionOutcome::InProgress.final_score(), None);
        assert!(!SessionOutcome::InProgress.is_terminal());
        let over = SessionOutcome::GameOver { final_score: 30 };
        assert!(over.is_terminal());
        assert_eq!(over.final_score(), Some(30));
        assert_eq!(SessionOutcome::Win { final_score: 7500 }.final_score(), Some(7500));
    }

    // ---- Input ----

    #[test]
    fn test_key_bindings() {
        assert_eq!(Control::from_key("A"), Some(Control::YawLeft));
        assert_eq!(Control::from_key("ArrowRight"), Some(Control::YawRight));
        assert_eq!(Control::from_key("w"), Some(Control::PitchUp));
        assert_eq!(Control::from_key("s"), Some(Control::PitchDown));
        assert_eq!(Control::from_key("q"), Some(Control::RollLeft));
        assert_eq!(Control::from_key("e"), Some(Control::RollRight));
        assert_eq!(Control::from_key(" "), Some(Control::Boost));
        assert_eq!(Control::from_key("x"), None);
    }

    #[test]
    fn test_input_state_folds_events() {
        let mut input = InputState::default();
        input.apply(&InputEvent::KeyDown { control: Control::Boost });
        input.apply(&InputEvent::KeyDown { control: Control::YawLeft });
        input.apply(&InputEvent::KeyUp { control: Control::YawLeft });
        input.apply(&InputEvent::PointerMove { x: 0.5, y: -2.0 });
        input.apply(&InputEvent::PointerDown);

        assert!(input.boost);
        assert!(!input.yaw_left);
        assert_eq!(input.aim, [0.5, -1.0]);
        assert!(input.firing());

        input.apply(&InputEvent::PointerUp);
        assert!(!input.firing());
        input.apply(&InputEvent::KeyDown { control: Control::Fire });
        assert!(input.firing());
    }

    #[test]
    fn test_input_event_serde_tagged() {
        let events = vec![
            InputEvent::KeyDown { control: Control::RollRight },
            InputEvent::PointerMove { x: 0.25, y: 0.75 },
            InputEvent::PointerDown,
            InputEvent::Resize { width: 1920, height: 1080 },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            assert!(json.contains("\"type\""), "expected tagged form: {json}");
            let back: InputEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
        let parsed: InputEvent =
            serde_json::from_str(r#"{"type":"KeyUp","control":"Boost"}"#).unwrap();
        assert_eq!(parsed, InputEvent::KeyUp { control: Control::Boost });
    }

    // ---- Catalog ----

    #[test]
    fn test_plane_catalog() {
        assert_eq!(planes::default_plane().id, "intercept");
        let viper = planes::find("viper").unwrap();
        assert_eq!(viper.display_name, "V-22 VIPER");
        assert!(viper.boost_speed > viper.cruise_speed);
        assert!(planes::find("stealth").is_none());
        for plane in &planes::CATALOG {
            assert!(plane.collision_radius > 0.0);
            assert!(plane.turn_rate > 0.0 && plane.roll_rate > 0.0);
        }
    }

    // ---- Snapshot ----

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = FrameSnapshot {
            time: SimTime { frame: 12 },
            score: 525,
            outcome: SessionOutcome::GameOver { final_score: 525 },
            events: vec![SimEvent::ScoreChanged { score: 525 }],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
