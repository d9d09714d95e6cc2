//! Dev domain: sandbox scene, hotkeys and probe visualization.
//!
//! Hotkeys:
//! - F1: toggle probe gizmos
//! - F2: toggle the state overlay
//! - F3: switch the jump timer cadence
//! - Ctrl+L: toggle the input lock
//! - B: knock the player back

mod gizmos;
mod sandbox;

pub use sandbox::{GameLayer, SandboxPlayer};

use bevy::prelude::*;

use crate::dev::gizmos::draw_probe_gizmos;
use crate::dev::sandbox::{
    handle_dev_hotkeys, spawn_camera, spawn_overlay, spawn_player, spawn_test_room,
    update_state_overlay,
};

#[derive(Resource, Debug)]
pub struct DevState {
    pub show_probes: bool,
    pub show_info: bool,
}

impl Default for DevState {
    fn default() -> Self {
        Self {
            show_probes: true,
            show_info: true,
        }
    }
}

pub struct SandboxPlugin;

impl Plugin for SandboxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DevState>()
            .add_systems(
                Startup,
                (spawn_camera, spawn_test_room, spawn_player, spawn_overlay),
            )
            .add_systems(Update, handle_dev_hotkeys)
            .add_systems(
                Update,
                draw_probe_gizmos.run_if(|state: Res<DevState>| state.show_probes),
            )
            .add_systems(Update, update_state_overlay);
    }
}
