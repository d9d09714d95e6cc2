//! Balance domain: floating 3D characters on top of `avian3d`.

mod balancer;
mod components;
mod systems;


pub use balancer::{
    HIT_CAPACITY, HitBuffer, RideHit, RideInput, RideSpring, face_direction, ride_spring,
    shortest_rotation, upright_torque,
};
pub use components::{BalanceOutput, Balancer, Character3d, GroundReaction, MovementCamera};

use bevy::prelude::*;

use crate::balance::systems::{
    apply_balance_forces, apply_ground_reactions, apply_horizontal_3d, apply_jump_3d,
    probe_ride_height, seed_balancer_targets, update_upright_torque,
};
use crate::movement::{LocomotionCorePlugin, LocomotionSet};

/// 3D controller: ride-height spring, upright torque and camera-relative
/// locomotion.
#[derive(Default)]
pub struct Locomotion3dPlugin;

impl Plugin for Locomotion3dPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<LocomotionCorePlugin>() {
            app.add_plugins(LocomotionCorePlugin);
        }

        app.register_type::<Balancer>()
            .add_message::<GroundReaction>()
            .add_systems(
                FixedUpdate,
                (
                    (seed_balancer_targets, probe_ride_height)
                        .chain()
                        .in_set(LocomotionSet::Probe),
                    apply_jump_3d.in_set(LocomotionSet::Jump),
                    apply_horizontal_3d.in_set(LocomotionSet::Horizontal),
                    (
                        update_upright_torque,
                        apply_balance_forces,
                        apply_ground_reactions,
                    )
                        .chain()
                        .in_set(LocomotionSet::Forces),
                ),
            );
    }
}
