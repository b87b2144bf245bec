//! The resort map: entities, camera and interaction tied together
//!
//! This is the entry point hosts drive. Input events, hover/select callbacks
//! and elapsed time go in; camera state, overlay transforms and panel read
//! models come out. It has no Bevy dependencies.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::billboard::{
    render_indices, BillboardProjector, BillboardTransform, EmphasisProfile, OverlayKey,
    OverlaySurface,
};
use super::camera::{CameraController, CameraMode, CameraState, PointerPos};
use super::config::MapConfig;
use super::entities::{landmarks, Hub, Landmark};
use super::interaction::{
    BookingOutcome, BookingSink, Emphasis, EntityRef, InteractionState, SelectionController,
};
use super::panel::{PreviewRotator, Tooltip, UnitDetails};
use super::placement;
use super::scheduler::TickScheduler;
use super::types::{LandmarkId, ModuleUnit, UnitId, UnitStatus, Zone, PLANE_EXTENT};

/// Pointer, touch and wheel input from the host surface.
///
/// Coordinates are optional: hosts forward events as-is and partial ones are
/// dropped here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Option<PointerPos>),
    PointerMove(Option<PointerPos>),
    PointerUp,
    /// Position of the first touch point
    TouchStart(Option<PointerPos>),
    TouchMove(Option<PointerPos>),
    TouchEnd,
    MouseLeave,
    Wheel { delta_y: f32 },
}

/// Counts by status, for summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
}

/// The interactive resort map
#[derive(Debug, Clone)]
pub struct ResortMap {
    config: MapConfig,
    units: Vec<ModuleUnit>,
    landmarks: Vec<Landmark>,
    hub: Hub,
    camera: CameraController,
    selection: SelectionController,
    scheduler: TickScheduler,
    preview: Option<PreviewRotator>,
    unit_projector: BillboardProjector,
    landmark_projector: BillboardProjector,
    hub_projector: BillboardProjector,
    active: bool,
}

impl ResortMap {
    /// Build a map, placing units with the given random source. The map
    /// starts active with auto-rotation running.
    pub fn new<R: Rng + ?Sized>(config: MapConfig, rng: &mut R) -> Result<Self> {
        config.validate().context("Invalid map configuration")?;
        let units = placement::generate(&Zone::ALL, &config.placement, rng)
            .context("Failed to place module units")?;

        let mut map = Self {
            camera: CameraController::new(config.camera.clone()),
            scheduler: TickScheduler::new(config.camera.tick_interval),
            unit_projector: BillboardProjector::new(EmphasisProfile::units(&config.emphasis)),
            landmark_projector: BillboardProjector::new(EmphasisProfile::landmarks(
                &config.emphasis,
            )),
            hub_projector: BillboardProjector::new(EmphasisProfile::FLAT),
            config,
            units,
            landmarks: landmarks(),
            hub: Hub::default(),
            selection: SelectionController::new(),
            preview: None,
            active: false,
        };
        map.activate();
        info!(
            "Resort map ready: {} units, {} landmarks",
            map.units.len(),
            map.landmarks.len()
        );
        Ok(map)
    }

    /// Build a map with a seeded RNG for reproducible layouts
    pub fn with_seed(config: MapConfig, seed: u64) -> Result<Self> {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn units(&self) -> &[ModuleUnit] {
        &self.units
    }

    /// Ids are sequential from 1, so lookup is an index
    pub fn unit(&self, id: UnitId) -> Option<&ModuleUnit> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.units.get(index).filter(|unit| unit.id == id)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmark(&self, id: LandmarkId) -> Option<&Landmark> {
        self.landmarks.iter().find(|landmark| landmark.id == id)
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn camera_state(&self) -> &CameraState {
        self.camera.state()
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode(self.selection.state().auto_rotate())
    }

    pub fn interaction(&self) -> &InteractionState {
        self.selection.state()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for unit in &self.units {
            match unit.status {
                UnitStatus::Available => counts.available += 1,
                UnitStatus::Occupied => counts.occupied += 1,
                UnitStatus::Maintenance => counts.maintenance += 1,
            }
        }
        counts
    }

    /// Start the idle ticker; called on construction and when a host
    /// re-attaches the map
    pub fn activate(&mut self) {
        self.active = true;
        self.sync_scheduler();
        debug!("Resort map activated");
    }

    /// Release the ticker and any drag in progress
    pub fn deactivate(&mut self) {
        self.active = false;
        self.scheduler.cancel();
        if self.camera.end_drag() {
            self.selection.set_dragging(false);
        }
        if let Some(preview) = &mut self.preview {
            preview.end_drag();
        }
        debug!("Resort map deactivated");
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown(pos) | InputEvent::TouchStart(pos) => {
                if self.camera.begin_drag(pos) {
                    self.selection.set_dragging(true);
                }
            }
            InputEvent::PointerMove(pos) | InputEvent::TouchMove(pos) => {
                self.camera.drag_to(pos);
            }
            InputEvent::PointerUp | InputEvent::TouchEnd | InputEvent::MouseLeave => {
                if self.camera.end_drag() {
                    self.selection.set_dragging(false);
                }
            }
            InputEvent::Wheel { delta_y } => self.camera.wheel(delta_y),
        }
        self.sync_scheduler();
    }

    pub fn hover_enter(&mut self, entity: EntityRef) {
        if !self.entity_exists(entity) {
            debug!("Ignoring hover on unknown {:?}", entity);
            return;
        }
        self.selection.hover_enter(entity);
        self.sync_scheduler();
    }

    pub fn hover_leave(&mut self, entity: EntityRef) {
        self.selection.hover_leave(entity);
        self.sync_scheduler();
    }

    /// Select a unit and open its info panel. Returns false for unknown ids.
    pub fn select_unit(&mut self, id: UnitId) -> bool {
        let Some(unit) = self.unit(id) else {
            debug!("Ignoring selection of unknown unit {}", id);
            return false;
        };
        let unit = unit.clone();
        if self.selection.state().selected_unit() != Some(id) {
            self.preview = Some(PreviewRotator::default());
        }
        self.selection.select(&unit);
        self.sync_scheduler();
        true
    }

    pub fn close_panel(&mut self) {
        self.selection.deselect();
        self.preview = None;
        self.sync_scheduler();
    }

    /// Book the selected unit through `sink` if it is available
    pub fn request_book(&self, sink: &mut dyn BookingSink) -> BookingOutcome {
        match self.selected_unit() {
            Some(unit) => self.selection.request_book(unit, sink),
            None => BookingOutcome::NoSelection,
        }
    }

    /// Book a specific unit through `sink` if it is available
    pub fn request_book_unit(&self, id: UnitId, sink: &mut dyn BookingSink) -> BookingOutcome {
        match self.unit(id) {
            Some(unit) => self.selection.request_book(unit, sink),
            None => BookingOutcome::NoSelection,
        }
    }

    /// Restore the initial camera, close the panel and resume auto-rotation
    pub fn reset(&mut self) {
        self.camera.reset();
        self.selection.reset();
        self.preview = None;
        self.sync_scheduler();
        info!("View reset");
    }

    /// Feed elapsed time to the idle ticker. Returns the ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let ticks = self.scheduler.advance(elapsed);
        self.camera.auto_rotate(ticks);
        ticks
    }

    /// Apply a single idle tick if auto-rotation is running
    pub fn tick(&mut self) -> bool {
        if self.scheduler.is_active() {
            self.camera.auto_rotate(1);
            true
        } else {
            false
        }
    }

    /// One animation frame of the info panel preview
    pub fn advance_preview_frame(&mut self) {
        if let Some(preview) = &mut self.preview {
            preview.advance_frame();
        }
    }

    pub fn preview(&self) -> Option<&PreviewRotator> {
        self.preview.as_ref()
    }

    pub fn preview_mut(&mut self) -> Option<&mut PreviewRotator> {
        self.preview.as_mut()
    }

    pub fn selected_unit(&self) -> Option<&ModuleUnit> {
        self.selection
            .state()
            .selected_unit()
            .and_then(|id| self.unit(id))
    }

    pub fn selected_details(&self) -> Option<UnitDetails> {
        self.selected_unit().map(UnitDetails::for_unit)
    }

    /// Tooltip for whatever is hovered; a unit tooltip is hidden while that
    /// unit's panel is open
    pub fn tooltip(&self) -> Option<Tooltip> {
        let state = self.selection.state();
        if let Some(id) = state.hovered_unit() {
            if self.selection.tooltip_visible(id) {
                return self.unit(id).map(Tooltip::for_unit);
            }
        }
        state
            .hovered_landmark()
            .and_then(|id| self.landmark(id))
            .map(Tooltip::for_landmark)
    }

    pub fn emphasis(&self, overlay: OverlayKey) -> Emphasis {
        match overlay {
            OverlayKey::Unit(id) => self.selection.unit_emphasis(id),
            OverlayKey::Landmark(id) => self.selection.landmark_emphasis(id),
            OverlayKey::Hub => Emphasis::None,
        }
    }

    /// Billboard transform for one overlay under the current camera
    pub fn overlay_transform(&self, overlay: OverlayKey) -> Option<BillboardTransform> {
        let camera = self.camera.state();
        let emphasis = self.emphasis(overlay);
        match overlay {
            OverlayKey::Unit(id) => self
                .unit(id)
                .map(|unit| self.unit_projector.project(unit.position, camera, emphasis)),
            OverlayKey::Landmark(id) => self.landmark(id).map(|landmark| {
                self.landmark_projector
                    .project(landmark.position, camera, emphasis)
            }),
            OverlayKey::Hub => Some(
                self.hub_projector
                    .project(self.hub.position, camera, emphasis),
            ),
        }
    }

    /// All overlay transforms, in back-to-front draw order
    pub fn overlay_transforms(&self) -> Vec<(OverlayKey, BillboardTransform)> {
        let keys = self
            .units
            .iter()
            .map(|unit| OverlayKey::Unit(unit.id))
            .chain(self.landmarks.iter().map(|l| OverlayKey::Landmark(l.id)))
            .chain(std::iter::once(OverlayKey::Hub));

        let overlays: Vec<_> = keys
            .filter_map(|key| {
                self.overlay_transform(key)
                    .map(|transform| (key, transform, self.emphasis(key)))
            })
            .collect();

        render_indices(&overlays)
            .into_iter()
            .map(|i| (overlays[i].0, overlays[i].1))
            .collect()
    }

    /// Push every overlay transform to `surface` in draw order
    pub fn apply_overlays(&self, surface: &mut dyn OverlaySurface) {
        for (key, transform) in self.overlay_transforms() {
            surface.apply(key, &transform);
        }
    }

    fn entity_exists(&self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::Unit(id) => self.unit(id).is_some(),
            EntityRef::Landmark(id) => self.landmark(id).is_some(),
        }
    }

    /// Keep the ticker running exactly while auto-rotation is allowed
    fn sync_scheduler(&mut self) {
        let should_run = self.active && self.selection.state().auto_rotate();
        match (should_run, self.scheduler.is_active()) {
            (true, false) => {
                self.scheduler.start();
                debug!("Auto-rotate resumed");
            }
            (false, true) => {
                self.scheduler.cancel();
                debug!("Auto-rotate suspended");
            }
            _ => {}
        }
    }

    /// Print a summary of the map state
    pub fn print_summary(&self) {
        let camera = self.camera.state();
        let counts = self.status_counts();
        println!("=== Resort Map Summary ===");
        println!(
            "Camera: pitch={:.1} yaw={:.2} zoom={:.2} ({:?})",
            camera.pitch_deg,
            camera.yaw_deg,
            camera.zoom,
            self.camera_mode()
        );
        println!(
            "Units: {} (available={}, occupied={}, maintenance={})",
            self.units.len(),
            counts.available,
            counts.occupied,
            counts.maintenance
        );
        println!();

        println!("--- Zones ---");
        for zone in Zone::ALL {
            let in_zone = self.units.iter().filter(|u| u.zone == zone);
            let (total, open) = in_zone.fold((0, 0), |(total, open), unit| {
                (total + 1, open + usize::from(unit.status.is_bookable()))
            });
            println!(
                "  {} [{}]: {} units, {} available",
                zone,
                zone.theme_token(),
                total,
                open
            );
        }

        println!("--- Landmarks ---");
        for landmark in &self.landmarks {
            println!(
                "  {} {} ({}) at ({:.0}, {:.0})",
                landmark.id,
                landmark.name,
                landmark.description,
                landmark.position.x,
                landmark.position.y
            );
        }

        if let Some(details) = self.selected_details() {
            println!("--- Selected ---");
            println!(
                "  {} | {} | {} | grid {} | {}",
                details.title,
                details.zone,
                details.status,
                details.grid,
                details.book_button.label
            );
            for reading in details.telemetry {
                println!("    {}: {}", reading.label, reading.value);
            }
        }
    }

    /// Draw a visual map of the plane in the terminal
    pub fn draw_map(&self) {
        const COLUMNS: usize = 60;
        const ROWS: usize = 30;

        let mut grid = vec![vec![' '; COLUMNS]; ROWS];
        let to_grid = |x: f32, y: f32| -> (usize, usize) {
            let col = (x / PLANE_EXTENT * COLUMNS as f32) as usize;
            let row = (y / PLANE_EXTENT * ROWS as f32) as usize;
            (row.min(ROWS - 1), col.min(COLUMNS - 1))
        };

        for unit in &self.units {
            let (row, col) = to_grid(unit.position.x, unit.position.y);
            grid[row][col] = match unit.status {
                UnitStatus::Available => unit.zone.glyph(),
                UnitStatus::Occupied => 'x',
                UnitStatus::Maintenance => '!',
            };
        }

        for landmark in &self.landmarks {
            let (row, col) = to_grid(landmark.position.x, landmark.position.y);
            grid[row][col] = '*';
        }

        let (row, col) = to_grid(self.hub.position.x, self.hub.position.y);
        grid[row][col] = '#';

        if let Some(unit) = self.selected_unit() {
            let (row, col) = to_grid(unit.position.x, unit.position.y);
            grid[row][col] = '@';
        }

        println!("\n=== Resort Map ===");
        println!("Legend: F/M/L/D=Available unit by zone, x=Occupied, !=Maintenance, *=Landmark, #=Hub, @=Selected");
        println!();
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> ResortMap {
        ResortMap::with_seed(MapConfig::default(), 11).unwrap()
    }

    #[test]
    fn test_new_map_is_idle_and_ticking() {
        let mut map = map();
        assert_eq!(map.camera_mode(), CameraMode::Idle);
        assert_eq!(map.advance(Duration::from_millis(32)), 2);
        assert!((map.camera_state().yaw_deg - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_unit_lookup_by_id() {
        let map = map();
        assert_eq!(map.unit(UnitId(1)).map(|u| u.id), Some(UnitId(1)));
        assert_eq!(map.unit(UnitId(100)).map(|u| u.id), Some(UnitId(100)));
        assert!(map.unit(UnitId(0)).is_none());
        assert!(map.unit(UnitId(101)).is_none());
    }

    #[test]
    fn test_drag_suspends_ticks_until_release() {
        let mut map = map();
        map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(0.0, 0.0))));
        assert_eq!(map.camera_mode(), CameraMode::Dragging);
        assert_eq!(map.advance(Duration::from_secs(1)), 0);
        map.handle_input(InputEvent::PointerUp);
        assert_eq!(map.camera_mode(), CameraMode::Idle);
        assert!(map.advance(Duration::from_millis(16)) > 0);
    }

    #[test]
    fn test_release_with_selection_stays_suspended() {
        let mut map = map();
        map.select_unit(UnitId(3));
        map.handle_input(InputEvent::TouchStart(Some(PointerPos::new(5.0, 5.0))));
        map.handle_input(InputEvent::TouchEnd);
        assert_eq!(map.camera_mode(), CameraMode::Suspended);
    }

    #[test]
    fn test_malformed_touch_does_not_start_drag() {
        let mut map = map();
        map.handle_input(InputEvent::TouchStart(None));
        assert!(!map.interaction().is_dragging());
        assert!(map.interaction().auto_rotate());
    }

    #[test]
    fn test_select_unknown_unit_is_rejected() {
        let mut map = map();
        assert!(!map.select_unit(UnitId(500)));
        assert!(map.interaction().auto_rotate());
    }

    #[test]
    fn test_request_book_without_selection() {
        let map = map();
        let mut sink = |_: &str| panic!("must not book");
        assert_eq!(map.request_book(&mut sink), BookingOutcome::NoSelection);
    }

    #[test]
    fn test_request_book_unit_by_id() {
        let map = map();
        let mut booked = Vec::new();
        let outcome = map.request_book_unit(UnitId(500), &mut |label: &str| {
            booked.push(label.to_string())
        });
        assert_eq!(outcome, BookingOutcome::NoSelection);

        let unit = map.units()[0].clone();
        let outcome = map.request_book_unit(unit.id, &mut |label: &str| {
            booked.push(label.to_string())
        });
        if unit.status.is_bookable() {
            assert_eq!(outcome, BookingOutcome::Booked(unit.booking_label()));
            assert_eq!(booked, vec![unit.booking_label()]);
        } else {
            assert_eq!(
                outcome,
                BookingOutcome::Unavailable {
                    unit: unit.id,
                    status: unit.status
                }
            );
            assert!(booked.is_empty());
        }
        assert_eq!(map.interaction().selected_unit(), None);
    }

    #[test]
    fn test_preview_drag_pauses_spin() {
        let mut map = map();
        assert!(map.preview_mut().is_none());
        map.select_unit(UnitId(3));
        if let Some(preview) = map.preview_mut() {
            preview.begin_drag(0.0, 0.0);
            preview.drag_to(20.0, 10.0);
        }
        map.advance_preview_frame();
        assert_eq!(map.preview().map(|p| (p.tilt_deg, p.spin_deg)), Some((-25.0, 65.0)));
        if let Some(preview) = map.preview_mut() {
            preview.end_drag();
        }
        map.advance_preview_frame();
        assert_eq!(map.preview().map(|p| p.spin_deg), Some(65.5));
    }

    #[test]
    fn test_tooltip_prefers_unit_and_hides_when_selected() {
        let mut map = map();
        map.hover_enter(EntityRef::Unit(UnitId(8)));
        assert!(matches!(map.tooltip(), Some(Tooltip::Unit { id, .. }) if id == UnitId(8)));
        map.select_unit(UnitId(8));
        assert_eq!(map.tooltip(), None);
        map.hover_enter(EntityRef::Landmark(LandmarkId(1)));
        assert!(matches!(map.tooltip(), Some(Tooltip::Landmark { .. })));
    }

    #[test]
    fn test_overlays_cover_every_entity_with_emphasis_last() {
        let mut map = map();
        map.select_unit(UnitId(20));
        let overlays = map.overlay_transforms();
        assert_eq!(overlays.len(), 100 + 4 + 1);
        assert_eq!(overlays.last().map(|(k, _)| *k), Some(OverlayKey::Unit(UnitId(20))));
    }

    #[test]
    fn test_deactivate_stops_ticks_and_drag() {
        let mut map = map();
        map.handle_input(InputEvent::PointerDown(Some(PointerPos::new(1.0, 1.0))));
        map.deactivate();
        assert!(!map.interaction().is_dragging());
        assert_eq!(map.advance(Duration::from_secs(1)), 0);
        map.activate();
        assert!(map.advance(Duration::from_millis(16)) > 0);
    }

    #[test]
    fn test_preview_reset_on_new_selection() {
        let mut map = map();
        map.select_unit(UnitId(1));
        map.advance_preview_frame();
        assert_eq!(map.preview().map(|p| p.spin_deg), Some(45.5));
        map.select_unit(UnitId(2));
        assert_eq!(map.preview().map(|p| p.spin_deg), Some(45.0));
        map.close_panel();
        assert!(map.preview().is_none());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = MapConfig::default();
        config.placement.min_radius = 48.0;
        config.placement.max_radius = 22.0;
        assert!(ResortMap::with_seed(config, 1).is_err());
    }
}
