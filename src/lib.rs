//! Platformer locomotion for Bevy: contact probing, horizontal blending, a
//! buffered multi-jump state machine with apex hang and jump cut, and a
//! floating ride-height balancer for 3D characters.

pub mod balance;
pub mod config;
#[cfg(feature = "dev-tools")]
pub mod dev;
pub mod movement;

pub mod prelude {
    pub use crate::balance::{Balancer, Character3d, Locomotion3dPlugin, MovementCamera};
    pub use crate::config::{
        CharacterArchetype, MovementArchetypes, MovementConfig, MovementConfigPlugin,
        MovementTuning,
    };
    pub use crate::movement::{
        BodyExtents, Character2d, ContactState, ExternalVelocity, InputLock, JumpPhase,
        JumpStateMachine, JumpedEvent, LandedEvent, Locomotion2dPlugin, LocomotionSet,
        LocomotionSettings, MoveState, MovementIntent, PlayerControlled, TimerCadence,
    };
}
