//! Movement domain: per-character components shared by the 2D and 3D controllers.

use bevy::prelude::*;

use crate::movement::{ExternalVelocity, JumpStateMachine};

/// A 2D platformer character driven by the locomotion systems.
///
/// Also needs a [`MovementConfig`](crate::config::MovementConfig) (directly or
/// through a [`CharacterArchetype`](crate::config::CharacterArchetype)) and an
/// Avian dynamic body with `GravityScale(0.0)`; gravity comes from the jump
/// machine.
#[derive(Component, Debug, Default)]
#[require(
    MovementIntent,
    MoveState,
    ContactState,
    JumpStateMachine,
    ExternalVelocity
)]
pub struct Character2d;

/// Marks a character whose [`MovementIntent`] is filled from the keyboard.
#[derive(Component, Debug, Default)]
pub struct PlayerControlled;

/// Per-character input snapshot for the current step.
///
/// Filled by the host (AI, network, replay) or by the bundled keyboard reader
/// for [`PlayerControlled`] characters. The jump button goes through
/// [`set_jump_held`](Self::set_jump_held), which latches press and release
/// edges until the next physics step takes them, so a tap shorter than one
/// physics step still jumps.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct MovementIntent {
    pub move_axis: Vec2,
    pub run_held: bool,
    pub(crate) jump_held: bool,
    pub(crate) jump_pressed: bool,
    pub(crate) jump_released: bool,
}

impl MovementIntent {
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Record the jump button state for this frame.
    pub fn set_jump_held(&mut self, held: bool) {
        match (self.jump_held, held) {
            (false, true) => self.jump_pressed = true,
            (true, false) => self.jump_released = true,
            _ => {}
        }
        self.jump_held = held;
    }

    /// Edges latched since the previous call, oldest first.
    pub fn take_jump_edges(&mut self) -> JumpEdges {
        let edges = match (self.jump_pressed, self.jump_released) {
            // Both edges in one step: the current state tells which came last.
            (true, true) if self.jump_held => JumpEdges {
                first: JumpEdge::Released,
                second: JumpEdge::Pressed,
            },
            (true, true) => JumpEdges {
                first: JumpEdge::Pressed,
                second: JumpEdge::Released,
            },
            (true, false) => JumpEdges {
                first: JumpEdge::None,
                second: JumpEdge::Pressed,
            },
            (false, true) => JumpEdges {
                first: JumpEdge::None,
                second: JumpEdge::Released,
            },
            (false, false) => JumpEdges::default(),
        };
        self.jump_pressed = false;
        self.jump_released = false;
        edges
    }
}

/// Half-size of a 2D character's collider, used to place the contact probes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BodyExtents {
    pub half_size: Vec2,
}

impl BodyExtents {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_size: Vec2::new(width * 0.5, height * 0.5),
        }
    }
}

/// Head/body/feet wall hits on one side of the character.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct SideContacts {
    pub head: bool,
    pub body: bool,
    pub feet: bool,
}

impl SideContacts {
    pub fn any(&self) -> bool {
        self.head || self.body || self.feet
    }

    /// Feet touch something the body clears: a step the character can mount.
    pub fn is_ledge(&self) -> bool {
        self.feet && !self.body
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct WallContacts {
    pub left: SideContacts,
    pub right: SideContacts,
}

/// Environment contacts, recomputed every physics step.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct ContactState {
    pub grounded: bool,
    pub bumped_head: bool,
    pub walls: WallContacts,
    /// Distance to the nearest ground hit, if any cast reached ground.
    pub ground_distance: Option<f32>,
    /// Velocity of the body under the character (3D ride height only).
    pub ground_velocity: Option<Vec3>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Edge of the jump button since the previous physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpEdge {
    #[default]
    None,
    Pressed,
    Released,
}

/// Up to two jump edges seen within one physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JumpEdges {
    pub first: JumpEdge,
    pub second: JumpEdge,
}

/// Horizontal movement state, owned by the locomotion integrator.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Reflect)]
pub struct MoveState {
    /// Planar velocity: `(x, 0)` in 2D, `(x, z)` in 3D.
    pub velocity: Vec2,
    pub last_input: Vec2,
    pub facing: Facing,
}

impl MoveState {
    pub(crate) fn turn_check(&mut self, input_x: f32) {
        if input_x > 0.0 {
            self.facing = Facing::Right;
        } else if input_x < 0.0 {
            self.facing = Facing::Left;
        }
    }
}
