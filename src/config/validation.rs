//! Validation of movement tunables before any derived value is computed.

use super::data::MovementTuning;

/// Highest physics layer index a probe may target.
pub const MAX_LAYER_INDEX: u32 = 31;

/// A single rejected tunable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite {
        field: &'static str,
    },
    NotPositive {
        field: &'static str,
        value: f32,
    },
    NotNegative {
        field: &'static str,
        value: f32,
    },
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    LayerOutOfRange {
        index: u32,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "'{}' must be a finite number", field),
            Self::NotPositive { field, value } => {
                write!(f, "'{}' must be greater than zero (got {})", field, value)
            }
            Self::NotNegative { field, value } => {
                write!(f, "'{}' must be less than zero (got {})", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "'{}' = {} is outside the allowed range [{}, {}]",
                field, value, min, max
            ),
            Self::LayerOutOfRange { index } => write!(
                f,
                "'ground_layer' = {} is outside the allowed range [0, {}]",
                index, MAX_LAYER_INDEX
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

struct Checker {
    errors: Vec<ConfigError>,
}

impl Checker {
    fn finite(&mut self, field: &'static str, value: f32) -> bool {
        if value.is_finite() {
            true
        } else {
            self.errors.push(ConfigError::NonFinite { field });
            false
        }
    }

    fn positive(&mut self, field: &'static str, value: f32) {
        if self.finite(field, value) && value <= 0.0 {
            self.errors.push(ConfigError::NotPositive { field, value });
        }
    }

    fn negative(&mut self, field: &'static str, value: f32) {
        if self.finite(field, value) && value >= 0.0 {
            self.errors.push(ConfigError::NotNegative { field, value });
        }
    }

    fn range(&mut self, field: &'static str, value: f32, min: f32, max: f32) {
        if self.finite(field, value) && !(min..=max).contains(&value) {
            self.errors.push(ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    fn at_least(&mut self, field: &'static str, value: f32, min: f32) {
        self.range(field, value, min, f32::MAX);
    }

    fn at_most(&mut self, field: &'static str, value: f32, max: f32) {
        self.range(field, value, f32::MIN, max);
    }
}

/// Check every tunable against its allowed band.
/// Returns a list of errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ConfigError> {
    let mut check = Checker { errors: Vec::new() };

    // Walk / run
    check.range("max_walk_speed", tuning.max_walk_speed, 1.0, 100.0);
    check.range("ground_acceleration", tuning.ground_acceleration, 0.25, 50.0);
    check.range("ground_deceleration", tuning.ground_deceleration, 0.25, 50.0);
    check.range("air_acceleration", tuning.air_acceleration, 0.0, 50.0);
    check.range("air_deceleration", tuning.air_deceleration, 0.25, 50.0);
    check.range("max_run_speed", tuning.max_run_speed, 1.0, 100.0);

    // Probes
    if tuning.ground_layer > MAX_LAYER_INDEX {
        check.errors.push(ConfigError::LayerOutOfRange {
            index: tuning.ground_layer,
        });
    }
    check.at_least(
        "ground_detection_ray_length",
        tuning.ground_detection_ray_length,
        0.0,
    );
    check.at_least(
        "head_detection_ray_length",
        tuning.head_detection_ray_length,
        0.0,
    );
    check.range("head_width", tuning.head_width, 0.0, 1.0);
    check.range(
        "wall_detection_ray_length",
        tuning.wall_detection_ray_length,
        0.0,
        1.0,
    );

    // Jump
    check.range(
        "jump_height_compensation_factor",
        tuning.jump_height_compensation_factor,
        1.0,
        1.1,
    );
    check.positive("max_vertical_velocity", tuning.max_vertical_velocity);
    check.positive("jump_height", tuning.jump_height);
    check.positive("time_till_jump_apex", tuning.time_till_jump_apex);
    check.range(
        "gravity_on_release_multiplier",
        tuning.gravity_on_release_multiplier,
        0.1,
        5.0,
    );
    check.positive("max_fall_speed", tuning.max_fall_speed);
    check.range(
        "number_of_jumps_allowed",
        tuning.number_of_jumps_allowed as f32,
        0.0,
        10.0,
    );
    check.at_most(
        "resting_vertical_velocity",
        tuning.resting_vertical_velocity,
        0.0,
    );
    check.range(
        "jump_horizontal_dampening",
        tuning.jump_horizontal_dampening,
        0.0,
        1.0,
    );
    check.range(
        "time_for_upwards_cancel",
        tuning.time_for_upwards_cancel,
        0.0,
        1.0,
    );
    check.range("apex_threshold", tuning.apex_threshold, 0.0, 1.0);
    check.at_least("apex_hang_time", tuning.apex_hang_time, 0.0);
    check.negative("apex_exit_velocity", tuning.apex_exit_velocity);
    check.range("jump_buffer_time", tuning.jump_buffer_time, 0.0, 1.0);
    check.range("jump_coyote_time", tuning.jump_coyote_time, 0.0, 1.0);
    check.at_least("ledge_shimmy_step", tuning.ledge_shimmy_step, 0.0);

    // Balancing
    check.at_least("ride_height", tuning.ride_height, 0.0);
    check.at_least("spring_strength", tuning.spring_strength, 0.0);
    check.at_least("spring_damper", tuning.spring_damper, 0.0);
    check.at_least("upright_strength", tuning.upright_strength, 0.0);
    check.at_least("upright_damper", tuning.upright_damper, 0.0);

    check.errors
}
