//! Movement config domain: raw tunables as they appear in RON data files.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Wrapper for RON files containing a list of items.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub items: Vec<T>,
}

/// One named movement archetype (e.g. "platformer_2d", "floating_3d").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchetypeDef {
    pub id: String,
    #[serde(default)]
    pub tuning: MovementTuning,
}

/// Raw movement tunables for one character archetype.
///
/// Gravity and initial jump velocity are intentionally absent: they are
/// derived from `jump_height`, `time_till_jump_apex` and
/// `jump_height_compensation_factor` when a [`MovementConfig`] is built.
///
/// [`MovementConfig`]: super::MovementConfig
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct MovementTuning {
    // Walk
    pub max_walk_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_acceleration: f32,
    pub air_deceleration: f32,

    // Run
    pub max_run_speed: f32,

    // Grounded / collision checks
    /// Physics layer index (0..=31) that every probe casts against.
    pub ground_layer: u32,
    pub ground_detection_ray_length: f32,
    pub head_detection_ray_length: f32,
    /// Width of the head cast as a fraction of the body width.
    pub head_width: f32,
    pub wall_detection_ray_length: f32,

    // Jump
    pub jump_height_compensation_factor: f32,
    pub max_vertical_velocity: f32,
    pub jump_height: f32,
    pub time_till_jump_apex: f32,
    pub gravity_on_release_multiplier: f32,
    pub max_fall_speed: f32,
    pub number_of_jumps_allowed: u8,
    /// Vertical velocity written on landing so probes stay engaged next step.
    pub resting_vertical_velocity: f32,
    /// Horizontal velocity multiplier applied on every jump (1.0 = untouched).
    pub jump_horizontal_dampening: f32,

    // Jump cut
    pub time_for_upwards_cancel: f32,

    // Jump apex
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
    /// Small negative speed that ends the apex hang.
    pub apex_exit_velocity: f32,

    // Jump buffer / coyote time
    pub jump_buffer_time: f32,
    pub jump_coyote_time: f32,

    // Ledge assist
    pub ledge_shimmy_step: f32,

    // Character balancing (3D)
    pub ride_height: f32,
    pub spring_strength: f32,
    pub spring_damper: f32,
    pub upright_strength: f32,
    pub upright_damper: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_walk_speed: 12.5,
            ground_acceleration: 5.0,
            ground_deceleration: 20.0,
            air_acceleration: 5.0,
            air_deceleration: 5.0,
            max_run_speed: 20.0,
            ground_layer: 1,
            ground_detection_ray_length: 0.02,
            head_detection_ray_length: 0.02,
            head_width: 0.75,
            wall_detection_ray_length: 0.02,
            jump_height_compensation_factor: 1.054,
            max_vertical_velocity: 50.0,
            jump_height: 6.5,
            time_till_jump_apex: 0.35,
            gravity_on_release_multiplier: 2.0,
            max_fall_speed: 26.0,
            number_of_jumps_allowed: 2,
            resting_vertical_velocity: -9.81,
            jump_horizontal_dampening: 1.0,
            time_for_upwards_cancel: 0.027,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            apex_exit_velocity: -0.01,
            jump_buffer_time: 0.125,
            jump_coyote_time: 0.1,
            ledge_shimmy_step: 0.1,
            ride_height: 1.0,
            spring_strength: 400.0,
            spring_damper: 30.0,
            upright_strength: 200.0,
            upright_damper: 20.0,
        }
    }
}
