//! Behaviour of the resort map through its public API

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use resort_map::map::{
    draw_status, generate, BookingOutcome, CameraMode, EntityRef, InputEvent, LandmarkId,
    MapConfig, MapError, PlacementConfig, PointerPos, RecordingSurface, ResortMap, UnitId,
    UnitStatus, Zone, ZONE_EPSILON,
};

fn seeded_map(seed: u64) -> ResortMap {
    ResortMap::with_seed(MapConfig::default(), seed).unwrap()
}

fn first_unit_with(map: &ResortMap, status: UnitStatus) -> Option<UnitId> {
    map.units().iter().find(|u| u.status == status).map(|u| u.id)
}

/// Find a seed whose layout contains a unit with every status
fn map_with_all_statuses() -> ResortMap {
    (0..200)
        .map(seeded_map)
        .find(|map| {
            let counts = map.status_counts();
            counts.available > 0 && counts.occupied > 0 && counts.maintenance > 0
        })
        .expect("some seed yields every status")
}

#[test]
fn test_hundred_units_with_sequential_ids() {
    let map = seeded_map(1);
    assert_eq!(map.units().len(), 100);
    let ids: Vec<u32> = map.units().iter().map(|u| u.id.0).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<_>>());
    for zone in Zone::ALL {
        assert_eq!(map.units().iter().filter(|u| u.zone == zone).count(), 25);
    }
}

#[test]
fn test_scenario_a_wheel_zoom() {
    let mut map = seeded_map(2);
    map.handle_input(InputEvent::Wheel { delta_y: -100.0 });
    assert!((map.camera_state().zoom - 1.1).abs() < 1e-6);
}

#[test]
fn test_scenario_b_drag_yaw() {
    let mut map = seeded_map(3);
    map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(100.0, 100.0))));
    map.handle_input(InputEvent::PointerMove(Some(PointerPos::new(200.0, 100.0))));
    assert_eq!(map.camera_state().yaw_deg, 50.0);
    assert_eq!(map.camera_state().pitch_deg, 60.0);
}

#[test]
fn test_scenario_c_reset_after_interaction() {
    let mut map = seeded_map(4);
    map.handle_input(InputEvent::TouchStart(Some(PointerPos::new(10.0, 10.0))));
    map.handle_input(InputEvent::TouchMove(Some(PointerPos::new(90.0, 60.0))));
    map.handle_input(InputEvent::Wheel { delta_y: 300.0 });
    map.select_unit(UnitId(17));
    map.advance(Duration::from_secs(2));

    map.reset();

    let camera = map.camera_state();
    assert_eq!(camera.pitch_deg, 60.0);
    assert_eq!(camera.yaw_deg, 0.0);
    assert_eq!(camera.zoom, 1.0);
    assert_eq!(map.interaction().selected_unit(), None);
    assert!(map.interaction().auto_rotate());
    assert!(!map.interaction().is_dragging());
}

#[test]
fn test_scenario_d_forest_only_generation() {
    let config = PlacementConfig {
        per_zone: 25,
        min_radius: 22.0,
        max_radius: 48.0,
    };
    let units = generate(&Zone::ALL, &config, &mut StdRng::seed_from_u64(5)).unwrap();
    let forest: Vec<_> = units.iter().filter(|u| u.zone == Zone::Forest).collect();
    assert_eq!(forest.len(), 25);
    for unit in forest {
        let angle = unit.position.angle_from_center_deg();
        assert!(
            (180.0 - ZONE_EPSILON..=270.0 + ZONE_EPSILON).contains(&angle),
            "angle {} outside forest wedge",
            angle
        );
        let distance = unit.position.distance_from_center();
        assert!((22.0 - ZONE_EPSILON..=48.0 + ZONE_EPSILON).contains(&distance));
    }
}

#[test]
fn test_configuration_errors_are_fatal() {
    let config = PlacementConfig {
        per_zone: 25,
        min_radius: 40.0,
        max_radius: 30.0,
    };
    let err = generate(&Zone::ALL, &config, &mut StdRng::seed_from_u64(0)).unwrap_err();
    assert_eq!(
        err,
        MapError::RadiusRange {
            min: 40.0,
            max: 30.0
        }
    );

    let err = generate(&[Zone::Forest; 5], &PlacementConfig::default(), &mut StdRng::seed_from_u64(0))
        .unwrap_err();
    assert_eq!(
        err,
        MapError::ZoneCount {
            expected: 4,
            found: 5
        }
    );
}

#[test]
fn test_status_distribution_converges() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let draws = 100_000;
    let (mut occupied, mut maintenance, mut available) = (0usize, 0usize, 0usize);
    for _ in 0..draws {
        match draw_status(&mut rng) {
            UnitStatus::Occupied => occupied += 1,
            UnitStatus::Maintenance => maintenance += 1,
            UnitStatus::Available => available += 1,
        }
    }
    let share = |count: usize| count as f64 / draws as f64;
    assert!((share(occupied) - 0.15).abs() < 0.01, "occupied {}", share(occupied));
    assert!((share(maintenance) - 0.0425).abs() < 0.005, "maintenance {}", share(maintenance));
    assert!((share(available) - 0.8075).abs() < 0.01, "available {}", share(available));
}

#[test]
fn test_select_suspends_and_close_resumes() {
    let mut map = seeded_map(6);
    map.select_unit(UnitId(30));
    assert!(!map.interaction().auto_rotate());
    assert_eq!(map.camera_mode(), CameraMode::Suspended);
    let yaw = map.camera_state().yaw_deg;
    assert_eq!(map.advance(Duration::from_secs(1)), 0);
    assert_eq!(map.camera_state().yaw_deg, yaw);

    map.close_panel();
    assert!(map.interaction().auto_rotate());
    assert_eq!(map.camera_mode(), CameraMode::Idle);
}

#[test]
fn test_close_panel_while_landmark_hovered_stays_suspended() {
    let mut map = seeded_map(7);
    map.select_unit(UnitId(2));
    map.hover_enter(EntityRef::Landmark(LandmarkId(3)));
    map.close_panel();
    assert!(!map.interaction().auto_rotate());
    map.hover_leave(EntityRef::Landmark(LandmarkId(3)));
    assert!(map.interaction().auto_rotate());
}

#[test]
fn test_booking_only_reaches_sink_for_available_units() {
    let mut map = map_with_all_statuses();
    let mut booked: Vec<String> = Vec::new();

    for status in [UnitStatus::Occupied, UnitStatus::Maintenance] {
        let id = first_unit_with(&map, status).unwrap();
        map.select_unit(id);
        let outcome = map.request_book(&mut |label: &str| booked.push(label.to_string()));
        assert_eq!(outcome, BookingOutcome::Unavailable { unit: id, status });
    }
    assert!(booked.is_empty());

    let id = first_unit_with(&map, UnitStatus::Available).unwrap();
    map.select_unit(id);
    let zone = map.unit(id).unwrap().zone;
    let outcome = map.request_book(&mut |label: &str| booked.push(label.to_string()));
    let expected = format!("Unit {} - {}", id.0, zone.label());
    assert_eq!(outcome, BookingOutcome::Booked(expected.clone()));
    assert_eq!(booked, vec![expected]);
}

#[test]
fn test_mouse_leave_ends_drag() {
    let mut map = seeded_map(8);
    map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(0.0, 0.0))));
    map.handle_input(InputEvent::MouseLeave);
    assert!(!map.interaction().is_dragging());
    map.handle_input(InputEvent::PointerMove(Some(PointerPos::new(100.0, 0.0))));
    assert_eq!(map.camera_state().yaw_deg, 0.0);
}

#[test]
fn test_auto_rotate_advances_yaw_per_tick() {
    let mut map = seeded_map(9);
    for _ in 0..20 {
        assert!(map.tick());
    }
    assert!((map.camera_state().yaw_deg - 1.0).abs() < 1e-4);
    map.hover_enter(EntityRef::Unit(UnitId(1)));
    assert!(!map.tick());
}

#[test]
fn test_apply_overlays_counter_rotates_every_entity() {
    let mut map = seeded_map(10);
    map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(0.0, 0.0))));
    map.handle_input(InputEvent::PointerMove(Some(PointerPos::new(73.0, -21.0))));
    let camera = *map.camera_state();

    let mut surface = RecordingSurface::default();
    map.apply_overlays(&mut surface);
    assert_eq!(surface.applied.len(), 105);
    for (_, transform) in &surface.applied {
        assert_eq!(transform.rotate_z_deg, -camera.yaw_deg);
        assert_eq!(transform.rotate_x_deg, -camera.pitch_deg);
    }
}
