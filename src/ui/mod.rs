//! UI module that visualizes the resort map using Bevy
//!
//! This module is purely for visualization - camera, placement and
//! interaction logic is in the `map` module. The UI forwards input into
//! `ResortMap` and renders its state with Bevy's 3D graphics.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{BookingLog, ResortMapResource};

use crate::map::ResortMap;
use components::*;
use input::{
    handle_keyboard, handle_pointer_input, handle_preview_drag, handle_touch_input, handle_wheel,
    update_hover,
};
use spawner::spawn_initial_visuals;
use sync::{
    sync_billboards, sync_scene_root, sync_selection_highlight, teardown_on_exit, tick_map,
    update_panel_text,
};
use world::{setup_panels, setup_world};

/// Plugin to register all UI systems around an already-built map
pub struct ResortMapUIPlugin {
    pub map: ResortMap,
}

impl Plugin for ResortMapUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ResortMapResource(self.map.clone()))
            .init_resource::<BookingLog>()
            .init_resource::<PointerTracker>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_initial_visuals.after(setup_world),
                    setup_panels,
                ),
            )
            .add_systems(
                Update,
                (
                    (
                        handle_pointer_input,
                        handle_preview_drag,
                        handle_touch_input,
                        handle_wheel,
                        update_hover,
                        handle_keyboard,
                    )
                        .chain(),
                    tick_map,
                    (sync_scene_root, sync_billboards, sync_selection_highlight).chain(),
                    update_panel_text,
                )
                    .chain(),
            )
            .add_systems(Last, teardown_on_exit);
    }
}
