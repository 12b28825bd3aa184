//! Djinn catalog loader.

use std::path::Path;

use battle_core::DjinnDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Djinn catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DjinnCatalog {
    pub djinn: Vec<DjinnDefinition>,
}

/// Loader for the Djinn catalog from RON files.
pub struct DjinnLoader;

impl DjinnLoader {
    /// Load the Djinn catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<DjinnDefinition>> {
        let content = read_file(path)?;
        Self::load_str(&content)
    }

    /// Parse a Djinn catalog from RON text.
    pub fn load_str(content: &str) -> LoadResult<Vec<DjinnDefinition>> {
        let catalog: DjinnCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse djinn catalog RON: {}", e))?;
        Ok(catalog.djinn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Element, UnleashKind};

    #[test]
    fn parses_a_minimal_catalog() {
        let djinn = DjinnLoader::load_str(
            r#"(
                djinn: [
                    (
                        id: "flint",
                        name: "Flint",
                        element: Venus,
                        tier: 1,
                        unleash: (
                            kind: Damage,
                            base_power: 15,
                            targeting: AllEnemies,
                        ),
                        granted_abilities: {
                            "isaac": (same: ["ragnarok"]),
                        },
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(djinn.len(), 1);
        assert_eq!(djinn[0].element, Element::Venus);
        assert_eq!(djinn[0].unleash.kind, UnleashKind::Damage);
        assert_eq!(
            djinn[0].granted_abilities["isaac"].same,
            vec!["ragnarok".to_string()]
        );
    }
}
