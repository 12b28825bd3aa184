//! Unit catalog loader (party members and enemies share one schema).

use std::path::Path;

use battle_core::UnitDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub units: Vec<UnitDefinition>,
}

/// Loader for the unit catalog from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load the unit catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<UnitDefinition>> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Parse a unit catalog from RON text.
    pub fn load_str(content: &str) -> LoadResult<Vec<UnitDefinition>> {
        let catalog: UnitCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;
        Ok(catalog.units)
    }
}
