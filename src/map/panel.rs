//! Read models for the tooltip, the info panel and its unit preview

use super::entities::Landmark;
use super::types::{normalize_degrees, ModuleUnit, UnitId, UnitStatus, Zone};

/// Floating text shown next to a hovered overlay
#[derive(Debug, Clone, PartialEq)]
pub enum Tooltip {
    Unit {
        id: UnitId,
        zone: Zone,
        title: String,
        status: UnitStatus,
    },
    Landmark {
        name: &'static str,
        description: &'static str,
        sub_description: &'static str,
    },
}

impl Tooltip {
    pub fn for_unit(unit: &ModuleUnit) -> Self {
        Tooltip::Unit {
            id: unit.id,
            zone: unit.zone,
            title: format!("Unit {}", unit.id),
            status: unit.status,
        }
    }

    pub fn for_landmark(landmark: &Landmark) -> Self {
        Tooltip::Landmark {
            name: landmark.name,
            description: landmark.description,
            sub_description: landmark.sub_description,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Tooltip::Unit {
                zone,
                title,
                status,
                ..
            } => vec![zone.to_string(), title.clone(), status.to_string()],
            Tooltip::Landmark {
                name,
                description,
                sub_description,
            } => vec![
                "Landmark".to_string(),
                name.to_string(),
                description.to_string(),
                sub_description.to_string(),
            ],
        }
    }
}

/// One row of the synthetic telemetry block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryReading {
    pub label: &'static str,
    pub value: &'static str,
}

/// Readings shown for every unit; they are presentation only
pub const TELEMETRY: [TelemetryReading; 5] = [
    TelemetryReading {
        label: "Internal Temp",
        value: "22°C",
    },
    TelemetryReading {
        label: "Humidity",
        value: "45%",
    },
    TelemetryReading {
        label: "Air Quality",
        value: "Good (AQI 15)",
    },
    TelemetryReading {
        label: "Power Load",
        value: "0.8 kW",
    },
    TelemetryReading {
        label: "Network",
        value: "5G Connected",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookButton {
    pub label: &'static str,
    pub enabled: bool,
}

impl BookButton {
    pub fn for_status(status: UnitStatus) -> Self {
        if status.is_bookable() {
            Self {
                label: "Book Unit",
                enabled: true,
            }
        } else {
            Self {
                label: "Unit Unavailable",
                enabled: false,
            }
        }
    }
}

/// Everything the info panel shows for the selected unit
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDetails {
    pub id: UnitId,
    pub title: String,
    pub zone: Zone,
    pub status: UnitStatus,
    /// Rounded plane coordinates, `x:y`
    pub grid: String,
    pub telemetry: &'static [TelemetryReading],
    pub book_button: BookButton,
}

impl UnitDetails {
    pub fn for_unit(unit: &ModuleUnit) -> Self {
        Self {
            id: unit.id,
            title: unit.panel_title(),
            zone: unit.zone,
            status: unit.status,
            grid: format!(
                "{}:{}",
                unit.position.x.round() as i32,
                unit.position.y.round() as i32
            ),
            telemetry: &TELEMETRY,
            book_button: BookButton::for_status(unit.status),
        }
    }
}

const PREVIEW_INITIAL_TILT: f32 = -15.0;
const PREVIEW_INITIAL_SPIN: f32 = 45.0;
const PREVIEW_TILT_LIMIT: f32 = 60.0;
const PREVIEW_SPIN_PER_FRAME: f32 = 0.5;

/// Small spinning model shown inside the info panel
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRotator {
    pub tilt_deg: f32,
    pub spin_deg: f32,
    last_pointer: Option<(f32, f32)>,
}

impl Default for PreviewRotator {
    fn default() -> Self {
        Self {
            tilt_deg: PREVIEW_INITIAL_TILT,
            spin_deg: PREVIEW_INITIAL_SPIN,
            last_pointer: None,
        }
    }
}

impl PreviewRotator {
    pub fn is_dragging(&self) -> bool {
        self.last_pointer.is_some()
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.last_pointer = Some((x, y));
        }
    }

    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_pointer else {
            return;
        };
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.last_pointer = Some((x, y));
        let (spin_step, tilt_step) = (x - last_x, y - last_y);
        if !spin_step.is_finite() || !tilt_step.is_finite() {
            return;
        }
        self.tilt_deg = (self.tilt_deg - tilt_step).clamp(-PREVIEW_TILT_LIMIT, PREVIEW_TILT_LIMIT);
        self.spin_deg = normalize_degrees(self.spin_deg + spin_step);
    }

    pub fn end_drag(&mut self) {
        self.last_pointer = None;
    }

    /// One animation frame of idle spin
    pub fn advance_frame(&mut self) {
        if !self.is_dragging() {
            self.spin_deg = (self.spin_deg + PREVIEW_SPIN_PER_FRAME).rem_euclid(360.0);
        }
    }
}
