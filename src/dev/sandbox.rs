//! Dev domain: test room, keyboard-driven player and state overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::config::CharacterArchetype;
use crate::dev::DevState;
use crate::movement::{
    BodyExtents, Character2d, ContactState, ExternalVelocity, InputLock, JumpStateMachine,
    LocomotionSettings, MoveState, PlayerControlled, TimerCadence,
};

/// Physics layers of the sandbox. `Ground` must match the archetype's
/// `ground_layer` index.
#[derive(PhysicsLayer, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors, platforms and walls
    Ground,
    Player,
}

#[derive(Component, Debug)]
pub struct SandboxPlayer;

#[derive(Component, Debug)]
pub(crate) struct StateOverlay;

const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, -4.0, 0.0);
const KNOCKBACK: Vec2 = Vec2::new(-18.0, 12.0);
const INPUT_LOCK_SOURCE: &str = "sandbox";

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / 28.0,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    let mut solid = |size: Vec2, position: Vec2, color: Color| {
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    };

    // Floor and outer walls
    solid(Vec2::new(40.0, 1.0), Vec2::new(0.0, -10.0), ground_color);
    solid(Vec2::new(1.0, 24.0), Vec2::new(-20.5, 2.0), wall_color);
    solid(Vec2::new(1.0, 24.0), Vec2::new(20.5, 2.0), wall_color);
    // Ceiling, low enough to bump a double jump
    solid(Vec2::new(40.0, 1.0), Vec2::new(0.0, 14.5), wall_color);

    // Platforms
    solid(Vec2::new(6.0, 0.5), Vec2::new(-12.0, -4.0), platform_color);
    solid(Vec2::new(6.0, 0.5), Vec2::new(11.0, -1.0), platform_color);
    solid(Vec2::new(5.0, 0.5), Vec2::new(0.0, 4.0), platform_color);

    // Knee-high step for ledge assist
    solid(Vec2::new(3.0, 0.3), Vec2::new(5.0, -9.35), platform_color);

    // Pillar
    solid(Vec2::new(1.0, 5.0), Vec2::new(-5.0, -7.0), wall_color);
}

pub(crate) fn spawn_player(mut commands: Commands) {
    commands.spawn((
        // Identity & movement
        (
            SandboxPlayer,
            Character2d,
            PlayerControlled,
            CharacterArchetype("platformer_2d".to_string()),
            BodyExtents::new(PLAYER_SIZE.x, PLAYER_SIZE.y),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));
}

pub(crate) fn spawn_overlay(mut commands: Commands) {
    commands.spawn((
        StateOverlay,
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

pub(crate) fn handle_dev_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut dev_state: ResMut<DevState>,
    mut settings: ResMut<LocomotionSettings>,
    mut lock: ResMut<InputLock>,
    mut players: Query<&mut ExternalVelocity, With<SandboxPlayer>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if keyboard.just_pressed(KeyCode::F1) {
        dev_state.show_probes = !dev_state.show_probes;
    }

    if keyboard.just_pressed(KeyCode::F2) {
        dev_state.show_info = !dev_state.show_info;
    }

    if keyboard.just_pressed(KeyCode::F3) {
        settings.timer_cadence = match settings.timer_cadence {
            TimerCadence::FixedStep => TimerCadence::Frame,
            TimerCadence::Frame => TimerCadence::FixedStep,
        };
        info!("[DEV] Jump timer cadence: {:?}", settings.timer_cadence);
    }

    if ctrl && keyboard.just_pressed(KeyCode::KeyL) {
        if lock.is_locked() {
            lock.unlock(INPUT_LOCK_SOURCE);
        } else {
            lock.lock(INPUT_LOCK_SOURCE);
        }
        info!("[DEV] Input lock: {}", lock.is_locked());
    }

    if !ctrl && keyboard.just_pressed(KeyCode::KeyB) {
        for mut external in &mut players {
            external.add_2d(KNOCKBACK);
        }
        debug!("[DEV] Knockback {:?}", KNOCKBACK);
    }
}

pub(crate) fn update_state_overlay(
    dev_state: Res<DevState>,
    settings: Res<LocomotionSettings>,
    players: Query<
        (&ContactState, &JumpStateMachine, &MoveState, &LinearVelocity),
        With<SandboxPlayer>,
    >,
    mut overlay: Query<(&mut Text, &mut Visibility), With<StateOverlay>>,
) {
    let Ok((mut text, mut visibility)) = overlay.single_mut() else {
        return;
    };

    if !dev_state.show_info {
        *visibility = Visibility::Hidden;
        return;
    }
    *visibility = Visibility::Inherited;

    let Ok((contacts, jump, move_state, velocity)) = players.single() else {
        text.0 = "no player".to_string();
        return;
    };

    let state = jump.state();
    text.0 = format!(
        "phase: {:?}\ngrounded: {}  head: {}\nwalls: L{} R{}\nvelocity: ({:.2}, {:.2})\nfacing: {:?}\njumps used: {}\nbuffer: {:.3}  coyote: {:.3}\ncadence: {:?}",
        jump.phase(),
        contacts.grounded,
        contacts.bumped_head,
        contacts.walls.left.any(),
        contacts.walls.right.any(),
        velocity.x,
        velocity.y,
        move_state.facing,
        state.jumps_used,
        state.jump_buffer_timer,
        state.coyote_timer,
        settings.timer_cadence,
    );
}
