//! Movement domain: horizontal velocity blending, wall stop and ledge assist.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::movement::{ContactState, MoveState};

/// Horizontal result of one physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalStep {
    /// Planar velocity to write to the body: `(x, 0)` in 2D, `(x, z)` in 3D.
    pub velocity: Vec2,
    /// Upward position nudge for mounting a ledge, zero when not shimmying.
    pub ledge_nudge: f32,
}

/// Blend the planar velocity toward `direction * max speed`.
///
/// `direction` is the planar input (`(x, 0)` in 2D, camera-relative `(x, z)`
/// in 3D). Acceleration and deceleration rates switch between ground and air
/// on `contacts.grounded`. Wall stop is applied after the blend and after any
/// external override, so a wall always wins on the step it is detected.
pub fn integrate_horizontal(
    state: &mut MoveState,
    contacts: &ContactState,
    direction: Vec2,
    running: bool,
    external: Option<Vec2>,
    config: &MovementConfig,
    dt: f32,
) -> HorizontalStep {
    let (acceleration, deceleration) = if contacts.grounded {
        (config.ground_acceleration, config.ground_deceleration)
    } else {
        (config.air_acceleration, config.air_deceleration)
    };

    if direction != Vec2::ZERO {
        state.turn_check(direction.x);
        let max_speed = if running {
            config.max_run_speed
        } else {
            config.max_walk_speed
        };
        let target = direction * max_speed;
        state.velocity = state
            .velocity
            .lerp(target, (acceleration * dt).clamp(0.0, 1.0));
    } else {
        state.velocity = state
            .velocity
            .lerp(Vec2::ZERO, (deceleration * dt).clamp(0.0, 1.0));
    }

    if let Some(external) = external {
        state.velocity = external;
    }

    let walls = contacts.walls;
    if (walls.right.any() && state.velocity.x > 0.0) || (walls.left.any() && state.velocity.x < 0.0)
    {
        state.velocity.x = 0.0;
    }

    let mounting_ledge = (direction.x < 0.0 && walls.left.is_ledge())
        || (direction.x > 0.0 && walls.right.is_ledge());
    let ledge_nudge = if mounting_ledge {
        config.ledge_shimmy_step
    } else {
        0.0
    };

    state.last_input = direction;

    HorizontalStep {
        velocity: state.velocity,
        ledge_nudge,
    }
}

/// Scale the horizontal velocity on take-off.
pub fn dampen_on_jump(state: &mut MoveState, config: &MovementConfig) {
    state.velocity *= config.jump_horizontal_dampening;
}

/// Map a 2D stick/keyboard input onto the ground plane relative to a camera.
///
/// `camera_forward` is flattened onto the XZ plane; the result is normalized
/// (or zero when there is no input).
pub fn camera_relative_move(input: Vec2, camera_forward: Vec3, camera_right: Vec3) -> Vec3 {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    let right = Vec3::new(camera_right.x, 0.0, camera_right.z).normalize_or_zero();
    (forward * input.y + right * input.x).normalize_or_zero()
}
