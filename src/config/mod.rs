//! Movement config domain: tunables, validation, derived jump physics and the
//! RON-backed archetype registry.

mod data;
mod loader;
mod movement;
mod registry;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{ArchetypeDef, DataFile, MovementTuning};
pub use loader::{ConfigLoadError, load_archetypes, parse_archetypes};
pub use movement::{MovementConfig, jump_physics};
pub use registry::{CharacterArchetype, MovementArchetypes};
pub use validation::{ConfigError, MAX_LAYER_INDEX, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

/// Loads movement archetypes at startup and resolves [`CharacterArchetype`]
/// names into [`MovementConfig`] components.
pub struct MovementConfigPlugin {
    pub path: PathBuf,
}

impl Default for MovementConfigPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/movement/archetypes.ron"),
        }
    }
}

/// Where the archetype file lives; read by the startup loader.
#[derive(Resource, Debug, Clone)]
struct ArchetypeSource(PathBuf);

impl Plugin for MovementConfigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MovementTuning>()
            .register_type::<MovementConfig>()
            .register_type::<CharacterArchetype>()
            .insert_resource(ArchetypeSource(self.path.clone()))
            .add_systems(Startup, load_archetype_file)
            .add_systems(PreUpdate, attach_archetype_configs);
    }
}

fn load_archetype_file(
    mut commands: Commands,
    source: Res<ArchetypeSource>,
    mut exit: MessageWriter<AppExit>,
) {
    match load_archetypes(&source.0) {
        Ok(archetypes) => {
            info!(
                "Loaded {} movement archetype(s) from {}",
                archetypes.len(),
                source.0.display()
            );
            commands.insert_resource(archetypes);
        }
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            // Broken tuning must never reach the simulation.
            exit.write(AppExit::error());
        }
    }
}

fn attach_archetype_configs(
    mut commands: Commands,
    archetypes: Option<Res<MovementArchetypes>>,
    pending: Query<(Entity, &CharacterArchetype), Without<MovementConfig>>,
) {
    let Some(archetypes) = archetypes else {
        return;
    };

    for (entity, archetype) in &pending {
        match archetypes.get(&archetype.0) {
            Some(config) => {
                debug!("Attached movement archetype '{}' to {}", archetype.0, entity);
                commands.entity(entity).insert(config.clone());
            }
            None => {
                warn!(
                    "Movement archetype '{}' not found; {} will not move",
                    archetype.0, entity
                );
                commands.entity(entity).remove::<CharacterArchetype>();
            }
        }
    }
}
