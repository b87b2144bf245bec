//! Billboard projection: overlay transforms that cancel the scene rotation
//!
//! The scene is rotated by `Rx(pitch) * Rz(yaw)` (x right, y down, z toward
//! the viewer). A billboard applies `Rz(-yaw) * Rx(-pitch)` locally, so the
//! composed rotation is the identity and overlays always face the viewer.

use std::fmt;

use ordered_float::OrderedFloat;

use super::camera::CameraState;
use super::config::EmphasisSettings;
use super::interaction::Emphasis;
use super::types::{LandmarkId, PlanePosition, UnitId};

/// Row-major 3x3 rotation matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation3(pub [[f32; 3]; 3]);

impl Rotation3 {
    pub const IDENTITY: Rotation3 = Rotation3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    pub fn about_x_deg(angle: f32) -> Self {
        let (s, c) = angle.to_radians().sin_cos();
        Rotation3([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    pub fn about_z_deg(angle: f32) -> Self {
        let (s, c) = angle.to_radians().sin_cos();
        Rotation3([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn mul(&self, other: &Rotation3) -> Rotation3 {
        let mut out = [[0.0; 3]; 3];
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[row][k] * other.0[k][col]).sum();
            }
        }
        Rotation3(out)
    }

    pub fn apply(&self, v: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    /// Largest element-wise difference from the identity
    pub fn identity_error(&self) -> f32 {
        let mut worst: f32 = 0.0;
        for (row, cells) in self.0.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let expected = if row == col { 1.0 } else { 0.0 };
                worst = worst.max((cell - expected).abs());
            }
        }
        worst
    }

    pub fn is_identity(&self, tolerance: f32) -> bool {
        self.identity_error() <= tolerance
    }
}

/// Rotation the camera applies to the whole scene
pub fn scene_rotation(camera: &CameraState) -> Rotation3 {
    Rotation3::about_x_deg(camera.pitch_deg).mul(&Rotation3::about_z_deg(camera.yaw_deg))
}

/// Local transform for one overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardTransform {
    /// Applied first when reading the transform left to right
    pub rotate_z_deg: f32,
    pub rotate_x_deg: f32,
    pub scale: f32,
    /// Lift toward the viewer, in overlay units, applied after the rotation
    pub depth_offset: f32,
    /// Camera-relative depth of the anchor; larger is closer to the viewer
    pub view_depth: f32,
}

impl BillboardTransform {
    pub fn rotation(&self) -> Rotation3 {
        Rotation3::about_z_deg(self.rotate_z_deg).mul(&Rotation3::about_x_deg(self.rotate_x_deg))
    }

    /// The same transform as a CSS `transform` value
    pub fn css(&self) -> CssTransform<'_> {
        CssTransform(self)
    }
}

/// Display adapter producing a CSS transform string
pub struct CssTransform<'a>(&'a BillboardTransform);

impl fmt::Display for CssTransform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let t = self.0;
        write!(
            f,
            "rotateZ({}deg) rotateX({}deg) scale({}) translateZ({}px)",
            t.rotate_z_deg, t.rotate_x_deg, t.scale, t.depth_offset
        )
    }
}

/// Scale and lift for each emphasis level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmphasisProfile {
    pub hover_scale: f32,
    pub hover_lift: f32,
    pub select_scale: f32,
    pub select_lift: f32,
}

impl EmphasisProfile {
    pub const FLAT: EmphasisProfile = EmphasisProfile {
        hover_scale: 1.0,
        hover_lift: 0.0,
        select_scale: 1.0,
        select_lift: 0.0,
    };

    pub fn units(settings: &EmphasisSettings) -> Self {
        Self {
            hover_scale: settings.unit_scale,
            hover_lift: settings.unit_lift,
            select_scale: settings.unit_scale,
            select_lift: settings.unit_lift,
        }
    }

    /// Landmarks can only be hovered; selection falls back to the hover boost
    pub fn landmarks(settings: &EmphasisSettings) -> Self {
        Self {
            hover_scale: settings.landmark_scale,
            hover_lift: settings.landmark_lift,
            select_scale: settings.landmark_scale,
            select_lift: settings.landmark_lift,
        }
    }

    fn boost(&self, emphasis: Emphasis) -> (f32, f32) {
        match emphasis {
            Emphasis::None => (1.0, 0.0),
            Emphasis::Hover => (self.hover_scale, self.hover_lift),
            Emphasis::Select => (self.select_scale, self.select_lift),
        }
    }
}

/// Computes billboard transforms for one class of overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardProjector {
    profile: EmphasisProfile,
}

impl BillboardProjector {
    pub fn new(profile: EmphasisProfile) -> Self {
        Self { profile }
    }

    pub fn project(
        &self,
        position: PlanePosition,
        camera: &CameraState,
        emphasis: Emphasis,
    ) -> BillboardTransform {
        let (scale, depth_offset) = self.profile.boost(emphasis);
        BillboardTransform {
            rotate_z_deg: -camera.yaw_deg,
            rotate_x_deg: -camera.pitch_deg,
            scale,
            depth_offset,
            view_depth: view_depth(position, camera),
        }
    }
}

/// Depth of a plane point toward the viewer after the scene rotation and zoom
pub fn view_depth(position: PlanePosition, camera: &CameraState) -> f32 {
    let (x, y) = position.centered();
    scene_rotation(camera).apply([x, y, 0.0])[2] * camera.zoom
}

/// Identity of an overlay drawn on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    Unit(UnitId),
    Landmark(LandmarkId),
    Hub,
}

/// Anything that can position overlays: a 3D engine, a canvas, a DOM layer
pub trait OverlaySurface {
    fn apply(&mut self, overlay: OverlayKey, transform: &BillboardTransform);
}

/// Surface that keeps every applied transform, in application order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub applied: Vec<(OverlayKey, BillboardTransform)>,
}

impl OverlaySurface for RecordingSurface {
    fn apply(&mut self, overlay: OverlayKey, transform: &BillboardTransform) {
        self.applied.push((overlay, *transform));
    }
}

/// Back-to-front draw order: plain overlays by depth, then emphasized ones
/// by emphasis level and depth. Ties keep their input order.
pub fn render_order<K: Copy>(overlays: &[(K, BillboardTransform, Emphasis)]) -> Vec<K> {
    render_indices(overlays)
        .into_iter()
        .map(|i| overlays[i].0)
        .collect()
}

/// Positions into `overlays` in draw order
pub fn render_indices<K>(overlays: &[(K, BillboardTransform, Emphasis)]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..overlays.len()).collect();
    indices.sort_by_key(|&i| {
        let (_, transform, emphasis) = &overlays[i];
        (*emphasis, OrderedFloat(transform.view_depth))
    });
    indices
}
