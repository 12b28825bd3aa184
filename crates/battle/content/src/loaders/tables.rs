//! Balance tables loader (TOML).

use std::path::Path;

use battle_core::{CombatTables, DjinnTables, StatusTables};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// All balance tables in one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceTables {
    #[serde(default)]
    pub combat: CombatTables,
    #[serde(default)]
    pub status: StatusTables,
    #[serde(default)]
    pub djinn: DjinnTables,
}

/// Loader for balance tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load balance tables from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Parse balance tables from TOML text.
    pub fn load_str(content: &str) -> LoadResult<BalanceTables> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance tables TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tables_and_defaults_missing_sections() {
        let tables = TablesLoader::load_str(
            r#"
            [combat]
            phys_def_factor = 0.5
            psy_def_factor = 0.3
            minimum_damage = 1
            advantage_multiplier = 1.5
            disadvantage_multiplier = 0.67
            "#,
        )
        .unwrap();

        assert_eq!(tables.combat.minimum_damage, 1);
        // Missing sections fall back to defaults
        assert_eq!(tables.status.poison_fraction, 0.08);
        assert_eq!(tables.djinn.recovery_turns, 2);
    }
}
