//! Hover/select state machine and the booking gate
//!
//! The controller is the only writer of [`InteractionState`]. After every
//! mutation the auto-rotate flag is recomputed, so it is true exactly when
//! nothing is hovered, selected or being dragged.

use log::{debug, info, warn};

use super::types::{LandmarkId, ModuleUnit, UnitId, UnitStatus};

/// Something on the map the pointer can rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Unit(UnitId),
    Landmark(LandmarkId),
}

/// Visual emphasis of an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Emphasis {
    #[default]
    None,
    Hover,
    Select,
}

/// Snapshot of hover, selection and drag state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    hovered_unit: Option<UnitId>,
    selected_unit: Option<UnitId>,
    hovered_landmark: Option<LandmarkId>,
    auto_rotate: bool,
    is_dragging: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered_unit: None,
            selected_unit: None,
            hovered_landmark: None,
            auto_rotate: true,
            is_dragging: false,
        }
    }
}

impl InteractionState {
    pub fn hovered_unit(&self) -> Option<UnitId> {
        self.hovered_unit
    }

    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected_unit
    }

    pub fn hovered_landmark(&self) -> Option<LandmarkId> {
        self.hovered_landmark
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    fn refresh_auto_rotate(&mut self) {
        self.auto_rotate = !self.is_dragging
            && self.hovered_unit.is_none()
            && self.selected_unit.is_none()
            && self.hovered_landmark.is_none();
    }
}

/// Result of asking to book a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The booking collaborator was called with this label
    Booked(String),
    /// The unit cannot be booked in its current status; nothing was sent
    Unavailable { unit: UnitId, status: UnitStatus },
    /// No unit is selected
    NoSelection,
}

/// Receives booking requests for available units
pub trait BookingSink {
    fn book(&mut self, unit_label: &str);
}

impl<F: FnMut(&str)> BookingSink for F {
    fn book(&mut self, unit_label: &str) {
        self(unit_label)
    }
}

/// Owns [`InteractionState`] and applies hover/select transitions to it
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: InteractionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hover_enter(&mut self, entity: EntityRef) {
        match entity {
            EntityRef::Unit(id) => self.state.hovered_unit = Some(id),
            EntityRef::Landmark(id) => self.state.hovered_landmark = Some(id),
        }
        debug!("Hover enter {:?}", entity);
        self.state.refresh_auto_rotate();
    }

    /// Clear the hover for `entity`; a stale leave for an entity that is no
    /// longer hovered is ignored
    pub fn hover_leave(&mut self, entity: EntityRef) {
        match entity {
            EntityRef::Unit(id) if self.state.hovered_unit == Some(id) => {
                self.state.hovered_unit = None
            }
            EntityRef::Landmark(id) if self.state.hovered_landmark == Some(id) => {
                self.state.hovered_landmark = None
            }
            _ => return,
        }
        debug!("Hover leave {:?}", entity);
        self.state.refresh_auto_rotate();
    }

    pub fn select(&mut self, unit: &ModuleUnit) {
        self.state.selected_unit = Some(unit.id);
        debug!("Selected unit {}", unit.id);
        self.state.refresh_auto_rotate();
    }

    /// Close the info panel
    pub fn deselect(&mut self) {
        if self.state.selected_unit.take().is_some() {
            debug!("Selection cleared");
        }
        self.state.refresh_auto_rotate();
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.state.is_dragging = dragging;
        self.state.refresh_auto_rotate();
    }

    /// Drop the selection and drag flag; hover follows the pointer and is kept
    pub fn reset(&mut self) {
        self.state.selected_unit = None;
        self.state.is_dragging = false;
        self.state.refresh_auto_rotate();
    }

    /// Send `unit` to the booking sink if it is available
    pub fn request_book(&self, unit: &ModuleUnit, sink: &mut dyn BookingSink) -> BookingOutcome {
        if !unit.status.is_bookable() {
            warn!("Booking rejected for unit {}: {}", unit.id, unit.status);
            return BookingOutcome::Unavailable {
                unit: unit.id,
                status: unit.status,
            };
        }
        let label = unit.booking_label();
        info!("Booking {}", label);
        sink.book(&label);
        BookingOutcome::Booked(label)
    }

    /// A hovered unit's tooltip gives way to the selection panel
    pub fn tooltip_visible(&self, unit: UnitId) -> bool {
        self.state.hovered_unit == Some(unit) && self.state.selected_unit != Some(unit)
    }

    pub fn unit_emphasis(&self, unit: UnitId) -> Emphasis {
        if self.state.selected_unit == Some(unit) {
            Emphasis::Select
        } else if self.state.hovered_unit == Some(unit) {
            Emphasis::Hover
        } else {
            Emphasis::None
        }
    }

    pub fn landmark_emphasis(&self, landmark: LandmarkId) -> Emphasis {
        if self.state.hovered_landmark == Some(landmark) {
            Emphasis::Hover
        } else {
            Emphasis::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::types::{PlanePosition, Zone};

    fn unit(id: u32, status: UnitStatus) -> ModuleUnit {
        ModuleUnit {
            id: UnitId(id),
            zone: Zone::Forest,
            status,
            position: PlanePosition::new(30.0, 30.0),
        }
    }

    #[test]
    fn test_starts_auto_rotating() {
        let controller = SelectionController::new();
        assert!(controller.state().auto_rotate());
    }

    #[test]
    fn test_hover_suspends_and_leave_resumes() {
        let mut controller = SelectionController::new();
        controller.hover_enter(EntityRef::Unit(UnitId(3)));
        assert!(!controller.state().auto_rotate());
        controller.hover_leave(EntityRef::Unit(UnitId(3)));
        assert!(controller.state().auto_rotate());
    }

    #[test]
    fn test_stale_leave_keeps_current_hover() {
        let mut controller = SelectionController::new();
        controller.hover_enter(EntityRef::Unit(UnitId(1)));
        controller.hover_enter(EntityRef::Unit(UnitId(2)));
        controller.hover_leave(EntityRef::Unit(UnitId(1)));
        assert_eq!(controller.state().hovered_unit(), Some(UnitId(2)));
        assert!(!controller.state().auto_rotate());
    }

    #[test]
    fn test_landmark_hover_suspends() {
        let mut controller = SelectionController::new();
        controller.hover_enter(EntityRef::Landmark(LandmarkId(2)));
        assert!(!controller.state().auto_rotate());
        assert_eq!(controller.landmark_emphasis(LandmarkId(2)), Emphasis::Hover);
        controller.hover_leave(EntityRef::Landmark(LandmarkId(2)));
        assert!(controller.state().auto_rotate());
    }

    #[test]
    fn test_select_then_close() {
        let mut controller = SelectionController::new();
        controller.select(&unit(5, UnitStatus::Available));
        assert!(!controller.state().auto_rotate());
        controller.deselect();
        assert!(controller.state().auto_rotate());
        assert_eq!(controller.state().selected_unit(), None);
    }

    #[test]
    fn test_close_while_hovering_stays_suspended() {
        let mut controller = SelectionController::new();
        controller.select(&unit(5, UnitStatus::Available));
        controller.hover_enter(EntityRef::Unit(UnitId(6)));
        controller.deselect();
        assert!(!controller.state().auto_rotate());
    }

    #[test]
    fn test_drag_suspends() {
        let mut controller = SelectionController::new();
        controller.set_dragging(true);
        assert!(!controller.state().auto_rotate());
        controller.set_dragging(false);
        assert!(controller.state().auto_rotate());
    }

    #[test]
    fn test_tooltip_hidden_for_selected_unit() {
        let mut controller = SelectionController::new();
        let u = unit(9, UnitStatus::Available);
        controller.hover_enter(EntityRef::Unit(u.id));
        assert!(controller.tooltip_visible(u.id));
        controller.select(&u);
        assert!(!controller.tooltip_visible(u.id));
        assert_eq!(controller.unit_emphasis(u.id), Emphasis::Select);
    }

    #[test]
    fn test_booking_available_unit_calls_sink_once() {
        let controller = SelectionController::new();
        let mut calls = Vec::new();
        let mut sink = |label: &str| calls.push(label.to_string());
        let outcome = controller.request_book(&unit(12, UnitStatus::Available), &mut sink);
        assert_eq!(outcome, BookingOutcome::Booked("Unit 12 - Forest Realm (森林秘境)".into()));
        assert_eq!(calls, vec!["Unit 12 - Forest Realm (森林秘境)".to_string()]);
    }

    #[test]
    fn test_booking_unavailable_units_is_noop() {
        let controller = SelectionController::new();
        let mut calls = 0;
        let mut sink = |_: &str| calls += 1;
        for status in [UnitStatus::Occupied, UnitStatus::Maintenance] {
            let outcome = controller.request_book(&unit(4, status), &mut sink);
            assert_eq!(
                outcome,
                BookingOutcome::Unavailable {
                    unit: UnitId(4),
                    status
                }
            );
        }
        assert_eq!(calls, 0);
    }
}
