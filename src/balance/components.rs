//! Balance domain: 3D character components and messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::balance::HitBuffer;
use crate::movement::{ContactState, ExternalVelocity, JumpStateMachine, MoveState, MovementIntent};

/// A floating 3D character: a dynamic body held at ride height by a spring
/// and kept upright by a torque.
///
/// Also needs a [`MovementConfig`](crate::config::MovementConfig) and an
/// Avian dynamic body with `GravityScale(0.0)`.
#[derive(Component, Debug, Default)]
#[require(
    MovementIntent,
    MoveState,
    ContactState,
    JumpStateMachine,
    ExternalVelocity,
    Balancer
)]
pub struct Character3d;

/// Camera whose yaw orients 3D movement input. The first one found is used.
#[derive(Component, Debug, Default)]
pub struct MovementCamera;

/// Forces computed for this step, applied by the force systems.
#[derive(Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct BalanceOutput {
    pub grounded: bool,
    pub force: Vec3,
    pub torque: Vec3,
    /// Equal-and-opposite spring force for a dynamic ground body.
    pub reaction: Option<GroundReaction>,
}

/// Ride-height and upright state of a 3D character.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
pub struct Balancer {
    /// Orientation the upright torque steers toward. Seeded from the body's
    /// rotation on spawn, then follows the movement direction.
    pub target_rotation: Option<Quat>,
    pub hits: HitBuffer,
    pub output: BalanceOutput,
}

impl Default for Balancer {
    fn default() -> Self {
        Self {
            target_rotation: None,
            hits: HitBuffer::new(),
            output: BalanceOutput::default(),
        }
    }
}

impl Balancer {
    /// Steer toward `direction` on the ground plane; ignored without a
    /// horizontal component.
    pub fn face_direction(&mut self, direction: Vec3) {
        if let Some(rotation) = crate::balance::face_direction(direction) {
            self.target_rotation = Some(rotation);
        }
    }
}

/// Spring force pushed back into a dynamic body the character stands on.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GroundReaction {
    pub body: Entity,
    pub force: Vec3,
    pub point: Vec3,
}

impl Message for GroundReaction {}
