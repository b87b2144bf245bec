//! Core types for the resort map
//!
//! These are standalone types that don't depend on Bevy.

use std::fmt;

/// Side length of the virtual percentage plane
pub const PLANE_EXTENT: f32 = 100.0;

/// Centre of the virtual plane, shared by both axes
pub const PLANE_CENTER: f32 = PLANE_EXTENT / 2.0;

/// Angular width of every zone wedge in degrees
pub const WEDGE_SPAN_DEG: f32 = 90.0;

/// Slack allowed when checking wedge and radius membership of stored coordinates
pub const ZONE_EPSILON: f32 = 1e-3;

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Identifier of an allocatable module unit (1-based, sequential)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a fixed landmark (rendered as `L1`..`L4`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LandmarkId(pub u8);

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// One of the four themed quadrants of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Forest,
    Mountain,
    Lake,
    Desert,
}

impl Zone {
    /// Generation order used for sequential unit ids
    pub const ALL: [Zone; 4] = [Zone::Forest, Zone::Mountain, Zone::Lake, Zone::Desert];

    /// Angle in degrees where this zone's wedge begins, measured from the plane centre
    pub fn start_angle_deg(self) -> f32 {
        match self {
            Zone::Forest => 180.0,
            Zone::Mountain => 270.0,
            Zone::Lake => 90.0,
            Zone::Desert => 0.0,
        }
    }

    /// Whether a normalized angle in `[0, 360)` falls inside this zone's wedge
    pub fn wedge_contains(self, angle_deg: f32) -> bool {
        let start = self.start_angle_deg();
        let offset = (angle_deg - start).rem_euclid(360.0);
        // The wedge end wraps for Mountain (270..360), so also accept tiny negative offsets
        offset <= WEDGE_SPAN_DEG + ZONE_EPSILON || offset >= 360.0 - ZONE_EPSILON
    }

    /// Full zone label, including the localized subtitle
    pub fn label(self) -> &'static str {
        match self {
            Zone::Forest => "Forest Realm (森林秘境)",
            Zone::Mountain => "Mountain Peak (高山之巅)",
            Zone::Lake => "Lakeside Haven (湖畔浅滩)",
            Zone::Desert => "Dune Oasis (沙丘绿洲)",
        }
    }

    /// Latin-only name for renderers without CJK glyphs
    pub fn display_name(self) -> &'static str {
        match self {
            Zone::Forest => "Forest Realm",
            Zone::Mountain => "Mountain Peak",
            Zone::Lake => "Lakeside Haven",
            Zone::Desert => "Dune Oasis",
        }
    }

    /// Colour identity token; opaque to the core, consumed by renderers
    pub fn theme_token(self) -> &'static str {
        match self {
            Zone::Forest => "emerald",
            Zone::Mountain => "indigo",
            Zone::Lake => "cyan",
            Zone::Desert => "amber",
        }
    }

    pub fn icon_token(self) -> &'static str {
        match self {
            Zone::Forest => "tree-deciduous",
            Zone::Mountain => "mountain",
            Zone::Lake => "waves",
            Zone::Desert => "sun",
        }
    }

    /// Linear RGB approximation of the theme colour
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Zone::Forest => [0.06, 0.73, 0.51],
            Zone::Mountain => [0.39, 0.40, 0.95],
            Zone::Lake => [0.02, 0.71, 0.83],
            Zone::Desert => [0.96, 0.62, 0.04],
        }
    }

    /// Single character used by the terminal map
    pub fn glyph(self) -> char {
        match self {
            Zone::Forest => 'F',
            Zone::Mountain => 'M',
            Zone::Lake => 'L',
            Zone::Desert => 'D',
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Booking status of a module unit; decorative within the map core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitStatus {
    Available,
    Occupied,
    Maintenance,
}

impl UnitStatus {
    pub fn is_bookable(self) -> bool {
        self == UnitStatus::Available
    }

    pub fn label(self) -> &'static str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Occupied => "occupied",
            UnitStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A point on the 100x100 percentage plane, centred at (50, 50)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePosition {
    pub x: f32,
    pub y: f32,
}

impl PlanePosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn center() -> Self {
        Self::new(PLANE_CENTER, PLANE_CENTER)
    }

    /// Build a position from polar coordinates around the plane centre
    pub fn from_polar(angle_deg: f32, distance: f32) -> Self {
        let radians = f64::from(angle_deg).to_radians();
        let distance = f64::from(distance);
        let center = f64::from(PLANE_CENTER);
        Self {
            x: (center + distance * radians.cos()) as f32,
            y: (center + distance * radians.sin()) as f32,
        }
    }

    pub fn distance(&self, other: &PlanePosition) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn distance_from_center(&self) -> f32 {
        self.distance(&Self::center())
    }

    /// Angle from the plane centre, normalized to `[0, 360)`
    pub fn angle_from_center_deg(&self) -> f32 {
        let dy = f64::from(self.y - PLANE_CENTER);
        let dx = f64::from(self.x - PLANE_CENTER);
        normalize_degrees(dy.atan2(dx).to_degrees() as f32)
    }

    /// Offset from the plane centre in plane units (x right, y down)
    pub fn centered(&self) -> (f32, f32) {
        (self.x - PLANE_CENTER, self.y - PLANE_CENTER)
    }
}

impl Default for PlanePosition {
    fn default() -> Self {
        Self::center()
    }
}

/// An individually bookable unit placed inside a zone
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleUnit {
    pub id: UnitId,
    pub zone: Zone,
    pub status: UnitStatus,
    pub position: PlanePosition,
}

impl ModuleUnit {
    /// Identifier handed to the booking collaborator
    pub fn booking_label(&self) -> String {
        format!("Unit {} - {}", self.id, self.zone.label())
    }

    /// Zero-padded panel title, e.g. `Unit 007`
    pub fn panel_title(&self) -> String {
        format!("Unit {:03}", self.id.0)
    }
}
