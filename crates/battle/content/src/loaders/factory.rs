//! Content factory: loads every catalog from a data directory and assembles
//! a validated [`ContentBundle`].

use std::path::Path;

use crate::catalog::ContentBundle;
use crate::loaders::{
    AbilityLoader, DjinnLoader, EquipmentLoader, LoadResult, TablesLoader, UnitLoader,
};

/// File names expected inside a content data directory.
const ABILITIES_FILE: &str = "abilities.ron";
const UNITS_FILE: &str = "units.ron";
const DJINN_FILE: &str = "djinn.ron";
const EQUIPMENT_FILE: &str = "equipment.ron";
const TABLES_FILE: &str = "tables.toml";

/// Loads content catalogs from data files into an oracle bundle.
pub struct ContentFactory;

impl ContentFactory {
    /// Loads all catalogs from `dir` and cross-validates references.
    pub fn load_dir(dir: &Path) -> LoadResult<ContentBundle> {
        let abilities = AbilityLoader::load(&dir.join(ABILITIES_FILE))?;
        let units = UnitLoader::load(&dir.join(UNITS_FILE))?;
        let djinn = DjinnLoader::load(&dir.join(DJINN_FILE))?;
        let equipment = EquipmentLoader::load(&dir.join(EQUIPMENT_FILE))?;
        let tables = TablesLoader::load(&dir.join(TABLES_FILE))?;

        let bundle = ContentBundle::new(abilities, units, djinn, equipment, tables);
        bundle.validate()?;
        Ok(bundle)
    }
}
