//! Systems for syncing Bevy entities with map state

use std::collections::HashMap;

use bevy::prelude::*;

use super::components::{
    rotation_to_quat, BaseMaterial, Billboard, InfoPanelText, MapRoot, ResortMapResource,
    SelectionMaterial, StatusBarText, TooltipText, UnitLink, WORLD_PER_PIXEL,
};
use crate::map::{scene_rotation, BillboardTransform, OverlayKey, OverlaySurface};

/// Separation between consecutive overlays in draw order, along the view axis
const RENDER_ORDER_BIAS: f32 = 0.002;

/// System to feed frame time to the idle ticker and the panel preview
pub fn tick_map(time: Res<Time>, mut map: ResMut<ResortMapResource>) {
    map.0.advance(time.delta());
    map.0.advance_preview_frame();
}

/// System to rotate and zoom the map root from camera state
pub fn sync_scene_root(
    map: Res<ResortMapResource>,
    mut root_query: Query<&mut Transform, With<MapRoot>>,
) {
    let Ok(mut transform) = root_query.single_mut() else {
        return;
    };
    let camera = map.0.camera_state();
    transform.rotation = rotation_to_quat(&scene_rotation(camera));
    transform.scale = Vec3::splat(camera.zoom);
}

/// Overlay transforms collected in draw order
#[derive(Default)]
struct FrameOverlays {
    entries: HashMap<OverlayKey, (usize, BillboardTransform)>,
}

impl OverlaySurface for FrameOverlays {
    fn apply(&mut self, overlay: OverlayKey, transform: &BillboardTransform) {
        let rank = self.entries.len();
        self.entries.insert(overlay, (rank, *transform));
    }
}

/// System to counter-rotate, scale and lift every billboard
pub fn sync_billboards(
    map: Res<ResortMapResource>,
    mut billboards: Query<(&Billboard, &mut Transform), Without<MapRoot>>,
) {
    let mut frame = FrameOverlays::default();
    map.0.apply_overlays(&mut frame);

    for (billboard, mut transform) in billboards.iter_mut() {
        let Some((rank, overlay)) = frame.entries.get(&billboard.key) else {
            continue;
        };
        let rotation = rotation_to_quat(&overlay.rotation());
        let lift = overlay.depth_offset * WORLD_PER_PIXEL * overlay.scale
            + *rank as f32 * RENDER_ORDER_BIAS;
        transform.rotation = rotation;
        transform.scale = Vec3::splat(overlay.scale);
        transform.translation = billboard.anchor + rotation * Vec3::Z * lift;
    }
}

/// System to swap the selected unit's material for the highlight
pub fn sync_selection_highlight(
    map: Res<ResortMapResource>,
    highlight: Option<Res<SelectionMaterial>>,
    mut markers: Query<(&UnitLink, &BaseMaterial, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let Some(highlight) = highlight else {
        return;
    };
    let selected = map.0.interaction().selected_unit();
    for (link, base, mut material) in markers.iter_mut() {
        let wanted = if selected == Some(link.0) {
            &highlight.0
        } else {
            &base.0
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// System to refresh the info panel, tooltip and status bar text
pub fn update_panel_text(
    map: Res<ResortMapResource>,
    mut panel: Query<(&mut Text, &mut Visibility), With<InfoPanelText>>,
    mut tooltip: Query<
        (&mut Text, &mut Visibility),
        (With<TooltipText>, Without<InfoPanelText>),
    >,
    mut status: Query<&mut Text, (With<StatusBarText>, Without<InfoPanelText>, Without<TooltipText>)>,
) {
    let map = &map.0;

    if let Ok((mut text, mut visibility)) = panel.single_mut() {
        match map.selected_details() {
            Some(details) => {
                let mut lines = vec![
                    details.title.clone(),
                    details.zone.display_name().to_string(),
                    format!("Status: {}", details.status),
                    format!("Grid: {}", details.grid),
                    String::new(),
                ];
                lines.extend(
                    details
                        .telemetry
                        .iter()
                        .map(|reading| format!("{}: {}", reading.label, reading.value)),
                );
                lines.push(String::new());
                let button = if details.book_button.enabled {
                    format!("[B] {}", details.book_button.label)
                } else {
                    details.book_button.label.to_string()
                };
                lines.push(button);
                if let Some(preview) = map.preview() {
                    lines.push(format!(
                        "Preview: tilt {:.0} spin {:.0} (right-drag to turn)",
                        preview.tilt_deg, preview.spin_deg
                    ));
                }
                text.0 = lines.join("\n");
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok((mut text, mut visibility)) = tooltip.single_mut() {
        match map.tooltip() {
            Some(tip) => {
                text.0 = tip.lines().join("\n");
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok(mut text) = status.single_mut() {
        let camera = map.camera_state();
        text.0 = format!(
            "Pitch {:.0}  Yaw {:.0}  Zoom {:.0}%  {:?}",
            camera.pitch_deg,
            camera.yaw_deg,
            camera.zoom * 100.0,
            map.camera_mode()
        );
    }
}

/// Release the idle ticker when the app is shutting down
pub fn teardown_on_exit(mut exits: MessageReader<AppExit>, mut map: ResMut<ResortMapResource>) {
    if exits.read().next().is_some() {
        map.0.deactivate();
    }
}
