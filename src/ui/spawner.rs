//! Spawning of marker visuals from map state

use bevy::prelude::*;

use super::components::{
    plane_to_root, zone_color, BaseMaterial, Billboard, LandmarkLink, MapRoot, ResortMapResource,
    SelectionMaterial, UnitLink, WORLD_PER_PIXEL,
};
use crate::map::{OverlayKey, UnitStatus};

/// Marker body height in overlay pixels
const UNIT_MARKER_HEIGHT: f32 = 32.0;
const UNIT_MARKER_WIDTH: f32 = 12.0;
const LANDMARK_SIZE: f32 = 80.0;
const HUB_LABEL_WIDTH: f32 = 200.0;
const HUB_LABEL_HEIGHT: f32 = 40.0;
/// The hub label floats this far above the plaza
const HUB_LABEL_RISE: f32 = 140.0;

/// System to create marker entities for every unit, landmark and the hub
pub fn spawn_initial_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    map: Res<ResortMapResource>,
    root_query: Query<Entity, With<MapRoot>>,
) {
    let Ok(root) = root_query.single() else {
        warn!("Map root missing, no markers spawned");
        return;
    };
    let map = &map.0;

    let radius = UNIT_MARKER_WIDTH * WORLD_PER_PIXEL / 2.0;
    let body = UNIT_MARKER_HEIGHT * WORLD_PER_PIXEL - 2.0 * radius;
    let unit_mesh = meshes.add(
        Mesh::from(Capsule3d::new(radius, body))
            .translated_by(Vec3::Y * UNIT_MARKER_HEIGHT * WORLD_PER_PIXEL / 2.0),
    );

    commands.insert_resource(SelectionMaterial(materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.84, 0.0),
        emissive: LinearRgba::rgb(1.0, 0.84, 0.0),
        ..default()
    })));

    for unit in map.units() {
        let mut color = zone_color(unit.zone.rgb());
        if unit.status == UnitStatus::Occupied {
            color = Color::srgba(0.4, 0.4, 0.4, 0.5);
        }
        let material = materials.add(StandardMaterial {
            base_color: color,
            alpha_mode: AlphaMode::Blend,
            ..default()
        });
        let anchor = plane_to_root(unit.position);
        commands.spawn((
            ChildOf(root),
            UnitLink(unit.id),
            Billboard {
                key: OverlayKey::Unit(unit.id),
                anchor,
            },
            Mesh3d(unit_mesh.clone()),
            MeshMaterial3d(material.clone()),
            BaseMaterial(material),
            Transform::from_translation(anchor),
        ));
    }

    let landmark_size = LANDMARK_SIZE * WORLD_PER_PIXEL;
    let landmark_mesh = meshes.add(
        Mesh::from(Cuboid::new(landmark_size, landmark_size, landmark_size / 4.0))
            .translated_by(Vec3::Y * landmark_size / 2.0),
    );
    for landmark in map.landmarks() {
        let anchor = plane_to_root(landmark.position);
        commands.spawn((
            ChildOf(root),
            LandmarkLink(landmark.id),
            Billboard {
                key: OverlayKey::Landmark(landmark.id),
                anchor,
            },
            Mesh3d(landmark_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: zone_color(landmark.zone.rgb()),
                ..default()
            })),
            Transform::from_translation(anchor),
        ));
    }

    let hub_anchor = plane_to_root(map.hub().position);
    commands.spawn((
        ChildOf(root),
        Billboard {
            key: OverlayKey::Hub,
            anchor: hub_anchor,
        },
        Mesh3d(meshes.add(
            Mesh::from(Rectangle::new(
                HUB_LABEL_WIDTH * WORLD_PER_PIXEL,
                HUB_LABEL_HEIGHT * WORLD_PER_PIXEL,
            ))
            .translated_by(Vec3::Y * HUB_LABEL_RISE * WORLD_PER_PIXEL),
        )),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.84, 0.0),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(hub_anchor),
    ));

    info!(
        "Spawned {} unit markers and {} landmarks",
        map.units().len(),
        map.landmarks().len()
    );
}
