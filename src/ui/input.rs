//! Input handling systems: pointer, touch, wheel, hover picking and keys

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::CursorLeft;

use super::components::{
    Billboard, BookingLog, LandmarkLink, MainCamera, PointerTracker, ResortMapResource, UnitLink,
};
use crate::map::{BookingOutcome, EntityRef, InputEvent, PointerPos};

/// Pointer travel below which a press/release counts as a click
const CLICK_SLOP_PX: f32 = 4.0;
/// Screen distance within which a unit marker counts as hovered
const UNIT_PICK_RADIUS_PX: f32 = 14.0;
const LANDMARK_PICK_RADIUS_PX: f32 = 36.0;
/// Wheel lines are converted to the pixel deltas the map expects
const PIXELS_PER_LINE: f32 = 100.0;

fn to_pointer(position: Option<Vec2>) -> Option<PointerPos> {
    position.map(|p| PointerPos::new(p.x, p.y))
}

/// Forward mouse buttons and movement as pointer events; release without
/// travel over a unit selects it
pub fn handle_pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut cursor_left: MessageReader<CursorLeft>,
    mut tracker: ResMut<PointerTracker>,
    mut map: ResMut<ResortMapResource>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    if buttons.just_pressed(MouseButton::Left) {
        tracker.press_origin = cursor;
        map.0.handle_input(InputEvent::PointerDown(to_pointer(cursor)));
    } else if buttons.pressed(MouseButton::Left) {
        map.0.handle_input(InputEvent::PointerMove(to_pointer(cursor)));
    }

    if buttons.just_released(MouseButton::Left) {
        map.0.handle_input(InputEvent::PointerUp);
        let origin = tracker.press_origin.take();
        let is_click = matches!(
            (origin, cursor),
            (Some(start), Some(end)) if start.distance(end) <= CLICK_SLOP_PX
        );
        if is_click {
            if let Some(id) = map.0.interaction().hovered_unit() {
                map.0.select_unit(id);
            }
        }
    }

    if cursor_left.read().count() > 0 {
        tracker.press_origin = None;
        map.0.handle_input(InputEvent::MouseLeave);
    }
}

/// Right-button drag turns the info panel preview while a unit is selected
pub fn handle_preview_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut map: ResMut<ResortMapResource>,
) {
    let Some(preview) = map.0.preview_mut() else {
        return;
    };
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    if let Some(pos) = cursor {
        if buttons.just_pressed(MouseButton::Right) {
            preview.begin_drag(pos.x, pos.y);
        } else if buttons.pressed(MouseButton::Right) {
            preview.drag_to(pos.x, pos.y);
        }
    }
    if buttons.just_released(MouseButton::Right) {
        preview.end_drag();
    }
}

pub fn handle_touch_input(touches: Res<Touches>, mut map: ResMut<ResortMapResource>) {
    if touches.any_just_pressed() {
        map.0
            .handle_input(InputEvent::TouchStart(to_pointer(touches.first_pressed_position())));
    } else if touches.iter().next().is_some() {
        map.0
            .handle_input(InputEvent::TouchMove(to_pointer(touches.first_pressed_position())));
    }
    if touches.any_just_released() || touches.any_just_canceled() {
        map.0.handle_input(InputEvent::TouchEnd);
    }
}

pub fn handle_wheel(mut wheel: MessageReader<MouseWheel>, mut map: ResMut<ResortMapResource>) {
    for event in wheel.read() {
        let pixels = match event.unit {
            MouseScrollUnit::Line => event.y * PIXELS_PER_LINE,
            MouseScrollUnit::Pixel => event.y,
        };
        // Bevy reports scroll-up as positive; the map expects DOM-style deltas
        map.0.handle_input(InputEvent::Wheel { delta_y: -pixels });
    }
}

/// Pick the marker nearest the cursor in screen space and update hover state
pub fn update_hover(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    units: Query<(&UnitLink, &GlobalTransform), With<Billboard>>,
    landmarks: Query<(&LandmarkLink, &GlobalTransform), With<Billboard>>,
    mut map: ResMut<ResortMapResource>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    let nearest = |target: Vec3| -> Option<f32> {
        let cursor = cursor?;
        camera
            .world_to_viewport(camera_transform, target)
            .ok()
            .map(|screen| screen.distance(cursor))
    };

    let hovered_unit = units
        .iter()
        .filter_map(|(link, transform)| nearest(transform.translation()).map(|d| (link.0, d)))
        .filter(|(_, d)| *d <= UNIT_PICK_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);

    let hovered_landmark = landmarks
        .iter()
        .filter_map(|(link, transform)| nearest(transform.translation()).map(|d| (link.0, d)))
        .filter(|(_, d)| *d <= LANDMARK_PICK_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id);

    let state = map.0.interaction().clone();
    if state.hovered_unit() != hovered_unit {
        if let Some(previous) = state.hovered_unit() {
            map.0.hover_leave(EntityRef::Unit(previous));
        }
        if let Some(current) = hovered_unit {
            map.0.hover_enter(EntityRef::Unit(current));
        }
    }
    if state.hovered_landmark() != hovered_landmark {
        if let Some(previous) = state.hovered_landmark() {
            map.0.hover_leave(EntityRef::Landmark(previous));
        }
        if let Some(current) = hovered_landmark {
            map.0.hover_enter(EntityRef::Landmark(current));
        }
    }
}

/// R resets the view, B books the selected unit, Escape closes the panel or exits
pub fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut map: ResMut<ResortMapResource>,
    mut bookings: ResMut<BookingLog>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        map.0.reset();
    }

    if keyboard.just_pressed(KeyCode::KeyB) {
        let mut sink = |label: &str| bookings.0.push(label.to_string());
        match map.0.request_book(&mut sink) {
            BookingOutcome::Booked(label) => info!("Booking requested for {}", label),
            BookingOutcome::Unavailable { unit, status } => {
                info!("Unit {} is {}; booking disabled", unit, status)
            }
            BookingOutcome::NoSelection => {}
        }
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        if map.0.selected_unit().is_some() {
            map.0.close_panel();
        } else {
            exit.write(AppExit::Success);
        }
    }
}
