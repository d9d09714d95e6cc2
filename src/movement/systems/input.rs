//! Movement domain: keyboard sampling into per-character intents.

use bevy::prelude::*;

use crate::movement::{InputLock, MovementIntent, PlayerControlled};

/// Snapshot of the keys for one frame.
struct KeyboardSample {
    move_axis: Vec2,
    jump_held: bool,
    run_held: bool,
}

impl KeyboardSample {
    const NEUTRAL: Self = Self {
        move_axis: Vec2::ZERO,
        jump_held: false,
        run_held: false,
    };
}

pub(crate) fn read_player_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    lock: Res<InputLock>,
    mut query: Query<&mut MovementIntent, With<PlayerControlled>>,
) {
    let sample = match keyboard {
        Some(keyboard) if !lock.is_locked() => sample_keyboard(&keyboard),
        _ => KeyboardSample::NEUTRAL,
    };

    for mut intent in &mut query {
        intent.move_axis = sample.move_axis;
        intent.run_held = sample.run_held;
        intent.set_jump_held(sample.jump_held);
    }
}

fn sample_keyboard(keyboard: &ButtonInput<KeyCode>) -> KeyboardSample {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Forward axis (3D only)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    KeyboardSample {
        move_axis: Vec2::new(x, y),
        jump_held: keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK),
        run_held: keyboard.pressed(KeyCode::ShiftLeft),
    }
}
