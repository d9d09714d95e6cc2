//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub use collisions::SpatialCaster;
pub(crate) use collisions::probe_contacts_2d;
pub(crate) use input::read_player_input;
pub(crate) use movement::{
    JumpInputs, advance_jump, apply_horizontal_2d, apply_jump_2d, tick_jump_timers,
};
