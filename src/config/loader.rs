//! Loader for movement archetype RON files.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{ArchetypeDef, DataFile};
use super::movement::MovementConfig;
use super::registry::MovementArchetypes;

/// Error type for archetype loading failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load and validate every archetype in `path`.
pub fn load_archetypes(path: &Path) -> Result<MovementArchetypes, Vec<ConfigLoadError>> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| {
        vec![ConfigLoadError {
            file: file_name.clone(),
            message: format!("IO error: {}", e),
        }]
    })?;

    parse_archetypes(&contents, &file_name)
}

/// Parse and validate archetypes from RON source text.
/// `file_name` is only used for error reporting.
pub fn parse_archetypes(
    contents: &str,
    file_name: &str,
) -> Result<MovementArchetypes, Vec<ConfigLoadError>> {
    let data: DataFile<ArchetypeDef> = ron_options().from_str(contents).map_err(|e| {
        vec![ConfigLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        }]
    })?;

    let mut archetypes = MovementArchetypes::default();
    let mut errors = Vec::new();

    for def in data.items {
        if archetypes.get(&def.id).is_some() {
            errors.push(ConfigLoadError {
                file: file_name.to_string(),
                message: format!("duplicate archetype id '{}'", def.id),
            });
            continue;
        }

        match MovementConfig::new(def.tuning) {
            Ok(config) => archetypes.insert(def.id, config),
            Err(config_errors) => {
                errors.extend(config_errors.into_iter().map(|e| ConfigLoadError {
                    file: file_name.to_string(),
                    message: format!("archetype '{}': {}", def.id, e),
                }));
            }
        }
    }

    if errors.is_empty() {
        Ok(archetypes)
    } else {
        Err(errors)
    }
}
