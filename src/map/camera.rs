//! Orbital camera state and the pointer/touch/wheel handling that drives it

use log::debug;

use super::config::CameraSettings;
use super::types::normalize_degrees;

/// Orientation and zoom of the orbital camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Tilt of the scene away from the viewer, in degrees
    pub pitch_deg: f32,
    /// Rotation around the scene centre, in degrees `[0, 360)`
    pub yaw_deg: f32,
    pub zoom: f32,
}

impl CameraState {
    pub fn initial(settings: &CameraSettings) -> Self {
        Self {
            pitch_deg: settings.pitch_range.clamp(settings.initial_pitch),
            yaw_deg: normalize_degrees(settings.initial_yaw),
            zoom: settings.zoom_range.clamp(settings.initial_zoom),
        }
    }
}

/// Coarse camera behaviour derived from drag and interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Auto-rotating
    Idle,
    Dragging,
    /// A hover or selection is holding the camera still
    Suspended,
}

/// Screen-space pointer coordinates as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Owns the camera state; every write goes through a clamp
#[derive(Debug, Clone)]
pub struct CameraController {
    state: CameraState,
    settings: CameraSettings,
    /// Last pointer position while a drag is in progress
    drag_anchor: Option<PointerPos>,
}

impl CameraController {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            state: CameraState::initial(&settings),
            settings,
            drag_anchor: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Start a drag at `pos`. Returns false (and changes nothing) for malformed input.
    pub fn begin_drag(&mut self, pos: Option<PointerPos>) -> bool {
        match pos.filter(PointerPos::is_finite) {
            Some(pos) => {
                self.drag_anchor = Some(pos);
                true
            }
            None => {
                debug!("Ignoring drag start without coordinates");
                false
            }
        }
    }

    /// Rotate by the pointer delta since the last recorded position.
    /// Returns true if the camera moved.
    pub fn drag_to(&mut self, pos: Option<PointerPos>) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        let Some(pos) = pos.filter(PointerPos::is_finite) else {
            debug!("Ignoring drag move without coordinates");
            return false;
        };

        self.drag_anchor = Some(pos);
        let yaw_step = (pos.x - anchor.x) * self.settings.drag_sensitivity;
        let pitch_step = (pos.y - anchor.y) * self.settings.drag_sensitivity;
        // Far-apart finite coordinates can still overflow the delta
        if !yaw_step.is_finite() || !pitch_step.is_finite() {
            debug!("Ignoring drag move with overflowing delta");
            return false;
        }
        self.set_yaw(self.state.yaw_deg + yaw_step);
        self.set_pitch(self.state.pitch_deg - pitch_step);
        true
    }

    /// Finish the current drag. Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        self.drag_anchor.take().is_some()
    }

    /// Zoom in for negative deltas, out for positive ones
    pub fn wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            debug!("Ignoring non-finite wheel delta");
            return;
        }
        self.set_zoom(self.state.zoom - delta_y * self.settings.wheel_sensitivity);
    }

    /// Advance the idle rotation by `ticks` steps
    pub fn auto_rotate(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        self.set_yaw(self.state.yaw_deg + self.settings.auto_rotate_step * ticks as f32);
    }

    /// Restore the initial orientation and abandon any drag
    pub fn reset(&mut self) {
        self.state = CameraState::initial(&self.settings);
        self.drag_anchor = None;
    }

    /// Mode given whether auto-rotation is currently allowed
    pub fn mode(&self, auto_rotate: bool) -> CameraMode {
        if self.is_dragging() {
            CameraMode::Dragging
        } else if auto_rotate {
            CameraMode::Idle
        } else {
            CameraMode::Suspended
        }
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.state.pitch_deg = self.settings.pitch_range.clamp(pitch);
    }

    fn set_yaw(&mut self, yaw: f32) {
        if yaw.is_finite() {
            self.state.yaw_deg = normalize_degrees(yaw);
        }
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.state.zoom = self.settings.zoom_range.clamp(zoom);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}
