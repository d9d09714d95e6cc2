//! Validated, immutable movement config with derived jump physics.

use std::ops::Deref;

use bevy::prelude::*;

use super::data::MovementTuning;
use super::validation::{ConfigError, validate_tuning};

/// Gravity and initial jump velocity for a jump of `jump_height` that peaks
/// after `time_to_apex` seconds.
///
/// Returns `(gravity, initial_jump_velocity)`; gravity is negative.
pub fn jump_physics(jump_height: f32, time_to_apex: f32, compensation_factor: f32) -> (f32, f32) {
    let adjusted_jump_height = jump_height * compensation_factor;
    let gravity = -(2.0 * adjusted_jump_height) / time_to_apex.powi(2);
    let initial_jump_velocity = gravity.abs() * time_to_apex;
    (gravity, initial_jump_velocity)
}

/// Movement config for one character archetype.
///
/// Only constructible through [`MovementConfig::new`] (or `Default`), so the
/// derived `gravity` / `initial_jump_velocity` can never go stale. Tunables
/// are readable through `Deref`; edits go through [`MovementConfig::with_tuning`].
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
pub struct MovementConfig {
    tuning: MovementTuning,
    gravity: f32,
    initial_jump_velocity: f32,
}

impl MovementConfig {
    pub fn new(tuning: MovementTuning) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_tuning(&tuning);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self::derive(tuning))
    }

    /// Build a new config from an edited copy of this one's tuning.
    pub fn with_tuning(
        &self,
        edit: impl FnOnce(&mut MovementTuning),
    ) -> Result<Self, Vec<ConfigError>> {
        let mut tuning = self.tuning.clone();
        edit(&mut tuning);
        Self::new(tuning)
    }

    fn derive(tuning: MovementTuning) -> Self {
        let (gravity, initial_jump_velocity) = jump_physics(
            tuning.jump_height,
            tuning.time_till_jump_apex,
            tuning.jump_height_compensation_factor,
        );
        Self {
            tuning,
            gravity,
            initial_jump_velocity,
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn initial_jump_velocity(&self) -> f32 {
        self.initial_jump_velocity
    }

    /// Collision layer bitmask for the configured ground layer index.
    pub fn ground_layer_mask(&self) -> u32 {
        1 << self.tuning.ground_layer
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self::derive(MovementTuning::default())
    }
}

impl Deref for MovementConfig {
    type Target = MovementTuning;

    fn deref(&self) -> &Self::Target {
        &self.tuning
    }
}
