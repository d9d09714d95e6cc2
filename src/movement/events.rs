//! Movement domain: messages for jump and landing transitions.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::JumpKind;

/// A character left the ground (or jumped again in the air).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpedEvent {
    pub entity: Entity,
    pub kind: JumpKind,
}

impl Message for JumpedEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}
