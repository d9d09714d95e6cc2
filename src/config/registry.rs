//! Registry of validated movement archetypes, keyed by id.

use bevy::prelude::*;
use std::collections::HashMap;

use super::movement::MovementConfig;

/// All movement archetypes loaded at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementArchetypes {
    pub configs: HashMap<String, MovementConfig>,
}

impl MovementArchetypes {
    pub fn get(&self, id: &str) -> Option<&MovementConfig> {
        self.configs.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, config: MovementConfig) {
        self.configs.insert(id.into(), config);
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

/// Names the archetype a character spawns with. Resolved into a
/// [`MovementConfig`] component once the registry is available.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
pub struct CharacterArchetype(pub String);
