//! Tunable parameters for placement, camera and overlay emphasis
//!
//! Every constant the map relies on lives here so hosts can adjust them
//! without touching the controllers.

use std::time::Duration;

use super::error::{MapError, MapResult};
use super::types::PLANE_CENTER;

/// Units generated per zone
pub const DEFAULT_PER_ZONE: u32 = 25;
pub const DEFAULT_MIN_RADIUS: f32 = 22.0;
pub const DEFAULT_MAX_RADIUS: f32 = 48.0;

pub const DEFAULT_PITCH_DEG: f32 = 60.0;
pub const DEFAULT_YAW_DEG: f32 = 0.0;
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Degrees of rotation per pixel of pointer travel
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Zoom change per unit of wheel delta
pub const WHEEL_SENSITIVITY: f32 = 0.001;
/// Yaw advance per idle tick, in degrees
pub const AUTO_ROTATE_STEP_DEG: f32 = 0.05;
/// Reference cadence of the idle ticker
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Inclusive range used for clamping camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    pub min: f32,
    pub max: f32,
}

impl ClampRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> MapResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(MapError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Parameters of the procedural unit placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    pub per_zone: u32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            per_zone: DEFAULT_PER_ZONE,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> MapResult<()> {
        if !self.min_radius.is_finite()
            || !self.max_radius.is_finite()
            || self.min_radius < 0.0
            || self.min_radius >= self.max_radius
        {
            return Err(MapError::RadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if self.max_radius > PLANE_CENTER {
            return Err(MapError::InvalidParameter {
                name: "max_radius",
                value: f64::from(self.max_radius),
            });
        }
        if self.per_zone == 0 {
            return Err(MapError::InvalidParameter {
                name: "per_zone",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Orbital camera limits and input sensitivities
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub pitch_range: ClampRange,
    pub zoom_range: ClampRange,
    pub drag_sensitivity: f32,
    pub wheel_sensitivity: f32,
    pub auto_rotate_step: f32,
    pub tick_interval: Duration,
    pub initial_pitch: f32,
    pub initial_yaw: f32,
    pub initial_zoom: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pitch_range: ClampRange::new(10.0, 80.0),
            zoom_range: ClampRange::new(0.5, 2.5),
            drag_sensitivity: DRAG_SENSITIVITY,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            auto_rotate_step: AUTO_ROTATE_STEP_DEG,
            tick_interval: TICK_INTERVAL,
            initial_pitch: DEFAULT_PITCH_DEG,
            initial_yaw: DEFAULT_YAW_DEG,
            initial_zoom: DEFAULT_ZOOM,
        }
    }
}

impl CameraSettings {
    pub fn validate(&self) -> MapResult<()> {
        self.pitch_range.validate("pitch")?;
        self.zoom_range.validate("zoom")?;
        if self.zoom_range.min <= 0.0 {
            return Err(MapError::InvalidRange {
                name: "zoom",
                min: self.zoom_range.min,
                max: self.zoom_range.max,
            });
        }
        for (name, value) in [
            ("drag_sensitivity", self.drag_sensitivity),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("auto_rotate_step", self.auto_rotate_step),
            ("initial_pitch", self.initial_pitch),
            ("initial_yaw", self.initial_yaw),
            ("initial_zoom", self.initial_zoom),
        ] {
            if !value.is_finite() {
                return Err(MapError::InvalidParameter {
                    name,
                    value: f64::from(value),
                });
            }
        }
        if self.tick_interval.is_zero() {
            return Err(MapError::InvalidParameter {
                name: "tick_interval",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Scale boost and depth lift applied to emphasized overlays
#[derive(Debug, Clone, PartialEq)]
pub struct EmphasisSettings {
    pub unit_scale: f32,
    pub unit_lift: f32,
    pub landmark_scale: f32,
    pub landmark_lift: f32,
}

impl Default for EmphasisSettings {
    fn default() -> Self {
        Self {
            unit_scale: 1.5,
            unit_lift: 50.0,
            landmark_scale: 1.2,
            landmark_lift: 30.0,
        }
    }
}

impl EmphasisSettings {
    pub fn validate(&self) -> MapResult<()> {
        for (name, value) in [
            ("unit_scale", self.unit_scale),
            ("landmark_scale", self.landmark_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MapError::InvalidParameter {
                    name,
                    value: f64::from(value),
                });
            }
        }
        for (name, value) in [
            ("unit_lift", self.unit_lift),
            ("landmark_lift", self.landmark_lift),
        ] {
            if !value.is_finite() {
                return Err(MapError::InvalidParameter {
                    name,
                    value: f64::from(value),
                });
            }
        }
        Ok(())
    }
}

/// Complete map configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapConfig {
    pub placement: PlacementConfig,
    pub camera: CameraSettings,
    pub emphasis: EmphasisSettings,
}

impl MapConfig {
    pub fn validate(&self) -> MapResult<()> {
        self.placement.validate()?;
        self.camera.validate()?;
        self.emphasis.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(MapConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_radius_band_rejected() {
        let placement = PlacementConfig {
            min_radius: 30.0,
            max_radius: 30.0,
            ..PlacementConfig::default()
        };
        assert_eq!(
            placement.validate(),
            Err(MapError::RadiusRange {
                min: 30.0,
                max: 30.0
            })
        );
    }

    #[test]
    fn test_inverted_pitch_range_rejected() {
        let camera = CameraSettings {
            pitch_range: ClampRange::new(80.0, 10.0),
            ..CameraSettings::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(MapError::InvalidRange { name: "pitch", .. })
        ));
    }

    #[test]
    fn test_clamp_range() {
        let range = ClampRange::new(0.5, 2.5);
        assert_eq!(range.clamp(3.0), 2.5);
        assert_eq!(range.clamp(0.1), 0.5);
        assert_eq!(range.clamp(1.2), 1.2);
    }
}
