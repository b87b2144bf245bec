use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use resort_map::map::{
    generate, scene_rotation, BillboardProjector, CameraState, Emphasis, EmphasisProfile,
    EmphasisSettings, InputEvent, MapConfig, PlacementConfig, PlanePosition, PointerPos,
    ResortMap, Zone, ZONE_EPSILON,
};

#[derive(Debug, Clone)]
enum Action {
    Down(f32, f32),
    Move(f32, f32),
    Up,
    Wheel(f32),
    Leave,
    MalformedMove,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-2000.0f32..2000.0, -2000.0f32..2000.0).prop_map(|(x, y)| Action::Down(x, y)),
        (-5000.0f32..5000.0, -5000.0f32..5000.0).prop_map(|(x, y)| Action::Move(x, y)),
        (prop::num::f32::NORMAL, prop::num::f32::NORMAL).prop_map(|(x, y)| Action::Down(x, y)),
        (prop::num::f32::NORMAL, prop::num::f32::NORMAL).prop_map(|(x, y)| Action::Move(x, y)),
        prop::num::f32::NORMAL.prop_map(Action::Wheel),
        Just(Action::Up),
        (-10_000.0f32..10_000.0).prop_map(Action::Wheel),
        Just(Action::Leave),
        Just(Action::MalformedMove),
    ]
}

proptest! {
    /// Property: pitch, zoom and yaw stay in range across any event sequence
    #[test]
    fn camera_stays_clamped(actions in prop::collection::vec(action(), 1..60)) {
        let mut map = ResortMap::with_seed(MapConfig::default(), 1).unwrap();
        for action in actions {
            let event = match action {
                Action::Down(x, y) => InputEvent::PointerDown(Some(PointerPos::new(x, y))),
                Action::Move(x, y) => InputEvent::PointerMove(Some(PointerPos::new(x, y))),
                Action::Up => InputEvent::PointerUp,
                Action::Wheel(delta_y) => InputEvent::Wheel { delta_y },
                Action::Leave => InputEvent::MouseLeave,
                Action::MalformedMove => InputEvent::TouchMove(None),
            };
            map.handle_input(event);
            map.tick();
            let camera = map.camera_state();
            prop_assert!((10.0..=80.0).contains(&camera.pitch_deg), "pitch {}", camera.pitch_deg);
            prop_assert!((0.5..=2.5).contains(&camera.zoom), "zoom {}", camera.zoom);
            prop_assert!((0.0..360.0).contains(&camera.yaw_deg), "yaw {}", camera.yaw_deg);
        }
    }

    /// Property: every generated unit lies in its wedge and radius band
    #[test]
    fn placement_respects_wedges(seed in any::<u64>(), min in 5.0f32..30.0, span in 1.0f32..20.0) {
        let config = PlacementConfig { per_zone: 10, min_radius: min, max_radius: min + span };
        let units = generate(&Zone::ALL, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(units.len(), 40);
        for unit in &units {
            let distance = unit.position.distance_from_center();
            prop_assert!(distance >= config.min_radius - ZONE_EPSILON);
            prop_assert!(distance <= config.max_radius + ZONE_EPSILON);
            prop_assert!(unit.zone.wedge_contains(unit.position.angle_from_center_deg()));
        }
    }

    /// Property: scene rotation composed with the billboard is the identity
    #[test]
    fn billboard_cancels_any_camera(
        pitch in 10.0f32..=80.0,
        yaw in 0.0f32..360.0,
        zoom in 0.5f32..=2.5,
        x in 0.0f32..=100.0,
        y in 0.0f32..=100.0,
        hovered in any::<bool>(),
    ) {
        let camera = CameraState { pitch_deg: pitch, yaw_deg: yaw, zoom };
        let projector = BillboardProjector::new(EmphasisProfile::units(&EmphasisSettings::default()));
        let emphasis = if hovered { Emphasis::Hover } else { Emphasis::None };
        let overlay = projector.project(PlanePosition::new(x, y), &camera, emphasis);
        let composed = scene_rotation(&camera).mul(&overlay.rotation());
        prop_assert!(composed.is_identity(1e-5), "error {}", composed.identity_error());
    }
}
