//! Movement config domain: tests for derived physics, validation and loading.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use super::{
    CharacterArchetype, ConfigError, MovementConfig, MovementConfigPlugin, MovementTuning,
    jump_physics, parse_archetypes, validate_tuning,
};

const ARCHETYPES_RON: &str = include_str!("../../assets/movement/archetypes.ron");

fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

// -----------------------------------------------------------------------------
// Derived jump physics
// -----------------------------------------------------------------------------

#[test]
fn test_default_jump_physics() {
    let (gravity, initial_jump_velocity) = jump_physics(6.5, 0.35, 1.054);

    assert_close(gravity, -111.853, 0.01);
    assert_close(initial_jump_velocity, 39.1486, 0.01);
    assert_close(initial_jump_velocity, gravity.abs() * 0.35, 1e-4);
}

#[test]
fn test_jump_physics_signs_hold_for_random_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..500 {
        let height = rng.random_range(0.01..50.0);
        let time = rng.random_range(0.01..3.0);
        let compensation = rng.random_range(1.0..1.1);

        let (gravity, velocity) = jump_physics(height, time, compensation);
        assert!(gravity < 0.0, "gravity {} for h={} t={}", gravity, height, time);
        assert!(velocity > 0.0, "velocity {} for h={} t={}", velocity, height, time);
    }
}

#[test]
fn test_jump_physics_peak_height_matches_adjusted_height() {
    // v0² / 2|g| is the apex of a ballistic jump.
    let (gravity, velocity) = jump_physics(4.0, 0.5, 1.05);
    let apex = velocity * velocity / (2.0 * gravity.abs());
    assert_close(apex, 4.0 * 1.05, 1e-3);
}

#[test]
fn test_config_derives_values_from_tuning() {
    let config = MovementConfig::new(MovementTuning::default()).unwrap();
    let (gravity, velocity) = jump_physics(6.5, 0.35, 1.054);

    assert_eq!(config.gravity(), gravity);
    assert_eq!(config.initial_jump_velocity(), velocity);
    assert_eq!(config, MovementConfig::default());
}

#[test]
fn test_with_tuning_recomputes_derived_values() {
    let config = MovementConfig::default();
    let higher = config.with_tuning(|t| t.jump_height = 10.0).unwrap();

    assert!(higher.initial_jump_velocity() > config.initial_jump_velocity());
    assert!(higher.gravity() < config.gravity());
    assert_eq!(higher.jump_height, 10.0);
    // The receiver is untouched
    assert_eq!(config.jump_height, 6.5);
}

#[test]
fn test_with_tuning_rejects_invalid_edit() {
    let config = MovementConfig::default();
    let errors = config
        .with_tuning(|t| t.time_till_jump_apex = 0.0)
        .unwrap_err();

    assert_eq!(
        errors,
        vec![ConfigError::NotPositive {
            field: "time_till_jump_apex",
            value: 0.0,
        }]
    );
}

#[test]
fn test_ground_layer_mask() {
    let config = MovementConfig::default();
    assert_eq!(config.ground_layer_mask(), 0b10);

    let top = config.with_tuning(|t| t.ground_layer = 31).unwrap();
    assert_eq!(top.ground_layer_mask(), 1 << 31);
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_validation_reports_every_problem() {
    let tuning = MovementTuning {
        max_walk_speed: 0.5,
        jump_height: -1.0,
        ground_layer: 32,
        apex_threshold: f32::NAN,
        ..default()
    };

    let errors = validate_tuning(&tuning);

    assert_eq!(errors.len(), 4);
    assert!(errors.contains(&ConfigError::OutOfRange {
        field: "max_walk_speed",
        value: 0.5,
        min: 1.0,
        max: 100.0,
    }));
    assert!(errors.contains(&ConfigError::NotPositive {
        field: "jump_height",
        value: -1.0,
    }));
    assert!(errors.contains(&ConfigError::LayerOutOfRange { index: 32 }));
    assert!(errors.contains(&ConfigError::NonFinite {
        field: "apex_threshold"
    }));
}

#[test]
fn test_validation_rejects_non_negative_apex_exit() {
    let tuning = MovementTuning {
        apex_exit_velocity: 0.0,
        ..default()
    };

    assert_eq!(
        validate_tuning(&tuning),
        vec![ConfigError::NotNegative {
            field: "apex_exit_velocity",
            value: 0.0,
        }]
    );
}

#[test]
fn test_validation_allows_zero_jumps_and_zero_probes() {
    let tuning = MovementTuning {
        number_of_jumps_allowed: 0,
        ground_detection_ray_length: 0.0,
        head_detection_ray_length: 0.0,
        wall_detection_ray_length: 0.0,
        ..default()
    };

    assert!(validate_tuning(&tuning).is_empty());
}

#[test]
fn test_validation_rejects_too_many_jumps() {
    let tuning = MovementTuning {
        number_of_jumps_allowed: 11,
        ..default()
    };

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ConfigError::OutOfRange {
            field: "number_of_jumps_allowed",
            ..
        }
    ));
}

#[test]
fn test_validation_rejects_positive_resting_velocity() {
    let tuning = MovementTuning {
        resting_vertical_velocity: 1.0,
        ..default()
    };

    assert_eq!(validate_tuning(&tuning).len(), 1);
}

#[test]
fn test_config_error_messages_name_the_field() {
    let error = ConfigError::OutOfRange {
        field: "head_width",
        value: 2.0,
        min: 0.0,
        max: 1.0,
    };
    assert_eq!(
        error.to_string(),
        "'head_width' = 2 is outside the allowed range [0, 1]"
    );

    let error = ConfigError::LayerOutOfRange { index: 40 };
    assert!(error.to_string().contains("ground_layer"));
}

// -----------------------------------------------------------------------------
// RON loading
// -----------------------------------------------------------------------------

#[test]
fn test_bundled_archetypes_parse() {
    let archetypes = parse_archetypes(ARCHETYPES_RON, "archetypes.ron").unwrap();

    assert_eq!(archetypes.len(), 3);

    let platformer = archetypes.get("platformer_2d").unwrap();
    assert_eq!(platformer, &MovementConfig::default());

    let single = archetypes.get("platformer_2d_single_jump").unwrap();
    assert_eq!(single.number_of_jumps_allowed, 1);
    // Unlisted tunables fall back to defaults
    assert_eq!(single.max_walk_speed, 12.5);

    let floating = archetypes.get("floating_3d").unwrap();
    assert_eq!(floating.resting_vertical_velocity, 0.0);
    assert_eq!(floating.ride_height, 1.2);
}

#[test]
fn test_missing_tuning_uses_defaults() {
    let archetypes = parse_archetypes(r#"(items: [(id: "plain")])"#, "inline.ron").unwrap();
    assert_eq!(archetypes.get("plain"), Some(&MovementConfig::default()));
}

#[test]
fn test_parse_error_reports_file() {
    let errors = parse_archetypes("(items: [", "broken.ron").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file, "broken.ron");
    assert!(errors[0].message.starts_with("Parse error"));
}

#[test]
fn test_invalid_archetype_reports_id_and_field() {
    let source = r#"(
        items: [
            (id: "ok"),
            (id: "floaty", tuning: (jump_height: 0.0, head_width: 3.0)),
        ],
    )"#;

    let errors = parse_archetypes(source, "bad.ron").unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| e.message.starts_with("archetype 'floaty'"))
    );
    assert!(errors.iter().any(|e| e.message.contains("jump_height")));
    assert!(errors.iter().any(|e| e.message.contains("head_width")));
}

#[test]
fn test_duplicate_archetype_id_rejected() {
    let source = r#"(items: [(id: "twin"), (id: "twin")])"#;

    let errors = parse_archetypes(source, "dup.ron").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("duplicate archetype id 'twin'"));
}

#[test]
fn test_load_error_display() {
    let errors = super::load_archetypes(&PathBuf::from("does/not/exist.ron")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]
            .to_string()
            .starts_with("Failed to load does/not/exist.ron: IO error")
    );
}

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

#[test]
fn test_plugin_attaches_configs_by_archetype() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(MovementConfigPlugin {
            path: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/movement/archetypes.ron"
            )),
        });

    let known = app
        .world_mut()
        .spawn(CharacterArchetype("platformer_2d_single_jump".to_string()))
        .id();
    let unknown = app
        .world_mut()
        .spawn(CharacterArchetype("nope".to_string()))
        .id();

    app.update();

    let world = app.world();
    let config = world.get::<MovementConfig>(known).unwrap();
    assert_eq!(config.number_of_jumps_allowed, 1);

    assert!(world.get::<MovementConfig>(unknown).is_none());
    assert!(world.get::<CharacterArchetype>(unknown).is_none());
}
