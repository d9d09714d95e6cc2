//! Movement domain: locomotion plugin wiring and public exports.

mod components;
mod events;
mod external;
mod jump;
mod locomotion;
mod probe;
mod resources;
mod systems;
mod vertical;


pub use components::{
    BodyExtents, Character2d, ContactState, Facing, JumpEdge, JumpEdges, MoveState,
    MovementIntent, PlayerControlled, SideContacts, WallContacts,
};
pub use events::{JumpedEvent, LandedEvent};
pub use external::ExternalVelocity;
pub use jump::{JumpContacts, JumpKind, JumpPhase, JumpState, JumpStateMachine, JumpStep};
pub use locomotion::{
    HorizontalStep, camera_relative_move, dampen_on_jump, integrate_horizontal,
};
pub use probe::{BoxProbe, ContactCaster, PROBE_SKIN, ProbeLayout, RayProbe, SideRays, probe};
pub use resources::{
    InputLock, LocomotionSettings, TimerCadence, timers_on_fixed_step, timers_on_frame,
};
pub use systems::SpatialCaster;

pub(crate) use systems::{JumpInputs, advance_jump};

use bevy::prelude::*;

use crate::movement::systems::{
    apply_horizontal_2d, apply_jump_2d, probe_contacts_2d, read_player_input, tick_jump_timers,
};

/// Fixed-step phases of one locomotion step, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Ground/head/wall contacts (2D) or ride-height casts (3D).
    Probe,
    /// Jump buffer and coyote countdown under [`TimerCadence::FixedStep`].
    Timers,
    /// Jump transitions and vertical integration.
    Jump,
    /// Horizontal blend, wall stop and ledge assist.
    Horizontal,
    /// Spring, upright torque and ground reactions (3D).
    Forces,
}

/// Input, timers, messages and system ordering shared by both controllers.
///
/// Added automatically by [`Locomotion2dPlugin`] and
/// [`Locomotion3dPlugin`](crate::balance::Locomotion3dPlugin).
pub struct LocomotionCorePlugin;

impl Plugin for LocomotionCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionSettings>()
            .init_resource::<InputLock>()
            .register_type::<LocomotionSettings>()
            .register_type::<MovementIntent>()
            .register_type::<MoveState>()
            .register_type::<ContactState>()
            .register_type::<ExternalVelocity>()
            .add_message::<JumpedEvent>()
            .add_message::<LandedEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    LocomotionSet::Probe,
                    LocomotionSet::Timers,
                    LocomotionSet::Jump,
                    LocomotionSet::Horizontal,
                    LocomotionSet::Forces,
                )
                    .chain(),
            )
            .add_systems(Update, read_player_input)
            .add_systems(
                Update,
                tick_jump_timers
                    .after(read_player_input)
                    .run_if(timers_on_frame),
            )
            .add_systems(
                FixedUpdate,
                tick_jump_timers
                    .in_set(LocomotionSet::Timers)
                    .run_if(timers_on_fixed_step),
            );
    }
}

/// 2D platformer controller on top of `avian2d`.
#[derive(Default)]
pub struct Locomotion2dPlugin;

impl Plugin for Locomotion2dPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<LocomotionCorePlugin>() {
            app.add_plugins(LocomotionCorePlugin);
        }

        app.add_systems(
            FixedUpdate,
            (
                probe_contacts_2d.in_set(LocomotionSet::Probe),
                apply_jump_2d.in_set(LocomotionSet::Jump),
                apply_horizontal_2d.in_set(LocomotionSet::Horizontal),
            ),
        );
    }
}
