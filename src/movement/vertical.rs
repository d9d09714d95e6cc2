//! Movement domain: gravity shaping and vertical speed clamping.

use crate::config::MovementConfig;
use crate::movement::{JumpContacts, JumpState};

/// Inverse lerp, clamped to `[0, 1]`.
pub(crate) fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Apply one step of gravity to `state`, shaped by the current jump phase.
pub(crate) fn integrate(
    state: &mut JumpState,
    contacts: JumpContacts,
    config: &MovementConfig,
    dt: f32,
) {
    let gravity = config.gravity();

    if state.is_jumping {
        if contacts.bumped_head && state.vertical_velocity > 0.0 {
            state.cut_to_fall(config);
        }

        if state.is_fast_falling {
            fast_fall(state, config, dt);
        } else if state.vertical_velocity >= 0.0 {
            ascend(state, config, dt);
        } else {
            state.vertical_velocity += gravity * config.gravity_on_release_multiplier * dt;
        }

        if state.vertical_velocity < 0.0 {
            state.is_falling = true;
        }
    } else if !contacts.grounded {
        // Walked off a ledge.
        state.is_falling = true;
        state.vertical_velocity += gravity * dt;
    }
}

fn ascend(state: &mut JumpState, config: &MovementConfig, dt: f32) {
    let apex_point = inverse_lerp(
        config.initial_jump_velocity(),
        0.0,
        state.vertical_velocity,
    );

    if apex_point > config.apex_threshold {
        if !state.is_past_apex_threshold {
            state.is_past_apex_threshold = true;
            state.time_past_apex_threshold = 0.0;
        }

        state.time_past_apex_threshold += dt;
        state.vertical_velocity = if state.time_past_apex_threshold < config.apex_hang_time {
            0.0
        } else {
            config.apex_exit_velocity
        };
    } else {
        state.vertical_velocity += config.gravity() * dt;
        state.is_past_apex_threshold = false;
    }
}

fn fast_fall(state: &mut JumpState, config: &MovementConfig, dt: f32) {
    let cancel_time = config.time_for_upwards_cancel;

    if state.fast_fall_time >= cancel_time {
        state.vertical_velocity += config.gravity() * config.gravity_on_release_multiplier * dt;
    } else {
        let t = state.fast_fall_time / cancel_time;
        state.vertical_velocity = state.fast_fall_release_speed * (1.0 - t);
    }

    state.fast_fall_time += dt;
}

/// Clamp vertical speed into `[-max_fall_speed, max_vertical_velocity]`.
pub(crate) fn clamp(state: &mut JumpState, config: &MovementConfig) {
    state.vertical_velocity = state
        .vertical_velocity
        .clamp(-config.max_fall_speed, config.max_vertical_velocity);
}
