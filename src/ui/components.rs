//! UI components and resources for linking Bevy entities to map state

use bevy::prelude::*;

use crate::map::{LandmarkId, OverlayKey, PlanePosition, ResortMap, Rotation3, UnitId};

/// World units per plane unit; the 100x100 plane spans 80 world units
pub const WORLD_PER_PLANE_UNIT: f32 = 0.8;

/// World units per overlay pixel (the plane is 800 px across)
pub const WORLD_PER_PIXEL: f32 = 0.1;

/// Resource wrapper for the resort map
#[derive(Resource)]
pub struct ResortMapResource(pub ResortMap);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// The rotated, zoomed parent of every map entity
#[derive(Component)]
pub struct MapRoot;

/// An overlay that is counter-rotated to face the camera
#[derive(Component)]
pub struct Billboard {
    pub key: OverlayKey,
    /// Position in map-root space
    pub anchor: Vec3,
}

/// Links a Bevy entity to a module unit
#[derive(Component)]
pub struct UnitLink(pub UnitId);

/// Links a Bevy entity to a landmark
#[derive(Component)]
pub struct LandmarkLink(pub LandmarkId);

/// Material a marker shows when it is not selected
#[derive(Component)]
pub struct BaseMaterial(pub Handle<StandardMaterial>);

/// Shared highlight for the selected unit
#[derive(Resource)]
pub struct SelectionMaterial(pub Handle<StandardMaterial>);

#[derive(Component)]
pub struct InfoPanelText;

#[derive(Component)]
pub struct TooltipText;

#[derive(Component)]
pub struct StatusBarText;

/// Labels booked through the booking button, newest last
#[derive(Resource, Default)]
pub struct BookingLog(pub Vec<String>);

/// Press position used to tell clicks from drags
#[derive(Resource, Default)]
pub struct PointerTracker {
    pub press_origin: Option<Vec2>,
}

/// Position of a plane point in map-root space (plane lies in XY, +Y up)
pub fn plane_to_root(position: PlanePosition) -> Vec3 {
    let (x, y) = position.centered();
    Vec3::new(x * WORLD_PER_PLANE_UNIT, -y * WORLD_PER_PLANE_UNIT, 0.0)
}

/// Convert a y-down rotation into Bevy's y-up frame
pub fn rotation_to_quat(rotation: &Rotation3) -> Quat {
    let m = rotation.0;
    let flipped = |row: usize, col: usize| {
        if (row == 1) != (col == 1) {
            -m[row][col]
        } else {
            m[row][col]
        }
    };
    let columns = Mat3::from_cols(
        Vec3::new(flipped(0, 0), flipped(1, 0), flipped(2, 0)),
        Vec3::new(flipped(0, 1), flipped(1, 1), flipped(2, 1)),
        Vec3::new(flipped(0, 2), flipped(1, 2), flipped(2, 2)),
    );
    Quat::from_mat3(&columns)
}

pub fn zone_color(rgb: [f32; 3]) -> Color {
    Color::srgb(rgb[0], rgb[1], rgb[2])
}
