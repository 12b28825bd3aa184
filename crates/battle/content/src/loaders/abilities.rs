//! Ability catalog loader.

use std::path::Path;

use battle_core::AbilityDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDefinition>,
}

/// Loader for the ability catalog from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<AbilityDefinition>> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Parse an ability catalog from RON text.
    pub fn load_str(content: &str) -> LoadResult<Vec<AbilityDefinition>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;
        Ok(catalog.abilities)
    }
}
