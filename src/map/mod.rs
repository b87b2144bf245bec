//! Standalone resort map core
//!
//! Everything needed to place, orbit, billboard and select map entities,
//! independent of any rendering framework. Hosts forward input into
//! [`ResortMap`] and read camera state and overlay transforms back out.

mod billboard;
mod camera;
mod config;
mod entities;
mod error;
mod interaction;
mod panel;
mod placement;
mod resort;
mod scheduler;
mod types;

pub use billboard::{
    render_indices, render_order, scene_rotation, view_depth, BillboardProjector, BillboardTransform,
    CssTransform, EmphasisProfile, OverlayKey, OverlaySurface, RecordingSurface, Rotation3,
};
pub use camera::{CameraController, CameraMode, CameraState, PointerPos};
pub use config::{
    CameraSettings, ClampRange, EmphasisSettings, MapConfig, PlacementConfig,
    AUTO_ROTATE_STEP_DEG, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS, DEFAULT_PER_ZONE,
    DEFAULT_PITCH_DEG, DEFAULT_YAW_DEG, DEFAULT_ZOOM, DRAG_SENSITIVITY, TICK_INTERVAL,
    WHEEL_SENSITIVITY,
};
pub use entities::{landmarks, Hub, Landmark};
pub use error::{MapError, MapResult};
pub use interaction::{
    BookingOutcome, BookingSink, Emphasis, EntityRef, InteractionState, SelectionController,
};
pub use panel::{BookButton, PreviewRotator, TelemetryReading, Tooltip, UnitDetails, TELEMETRY};
pub use placement::{
    draw_status, generate, random_in_wedge, MAINTENANCE_THRESHOLD, OCCUPIED_THRESHOLD, ZONE_COUNT,
};
pub use resort::{InputEvent, ResortMap, StatusCounts};
pub use scheduler::{TickScheduler, MAX_CATCH_UP_TICKS};
pub use types::{
    normalize_degrees, LandmarkId, ModuleUnit, PlanePosition, UnitId, UnitStatus, Zone,
    PLANE_CENTER, PLANE_EXTENT, WEDGE_SPAN_DEG, ZONE_EPSILON,
};
