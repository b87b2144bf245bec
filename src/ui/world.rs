//! World setup systems for camera, lighting, base plate and panels

use bevy::prelude::*;

use super::components::{
    InfoPanelText, MainCamera, MapRoot, StatusBarText, TooltipText, WORLD_PER_PLANE_UNIT,
};
use crate::map::PLANE_CENTER;

/// System to setup the world environment (camera, light, rotating root)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // The camera stays put; the map root rotates under it
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 120.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(20.0, 40.0, 80.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let root = commands
        .spawn((MapRoot, Transform::default(), Visibility::default()))
        .id();

    let plate_radius = PLANE_CENTER * WORLD_PER_PLANE_UNIT;
    commands.spawn((
        ChildOf(root),
        Mesh3d(meshes.add(Circle::new(plate_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.05, 0.05, 0.08, 0.85),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -0.05),
    ));

    // Gold rim and hub disc
    commands.spawn((
        ChildOf(root),
        Mesh3d(meshes.add(Annulus::new(plate_radius - 0.4, plate_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.84, 0.0),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -0.04),
    ));
    commands.spawn((
        ChildOf(root),
        Mesh3d(meshes.add(Circle::new(7.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.02, 0.02, 0.02),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -0.03),
    ));
}

/// System to setup the info panel, tooltip and status text
pub fn setup_panels(mut commands: Commands) {
    commands.spawn((
        InfoPanelText,
        Text::new(""),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.95)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            right: Val::Px(20.0),
            width: Val::Px(300.0),
            padding: UiRect::all(Val::Px(14.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.04, 0.06, 0.1, 0.95)),
        Visibility::Hidden,
    ));

    commands.spawn((
        TooltipText,
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            left: Val::Px(20.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        Visibility::Hidden,
    ));

    commands.spawn((
        StatusBarText,
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.84, 0.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}
