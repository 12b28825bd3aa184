//! Data-file loaders for the content tables.
//!
//! Catalogs live in RON (entity definitions) and TOML (balance tables). All
//! loaders deserialize straight into `battle-core` types and report failures
//! with file context attached.

mod abilities;
mod djinn;
mod equipment;
mod factory;
mod tables;
mod units;

pub use abilities::AbilityLoader;
pub use djinn::DjinnLoader;
pub use equipment::EquipmentLoader;
pub use factory::ContentFactory;
pub use tables::{BalanceTables, TablesLoader};
pub use units::UnitLoader;

use std::path::Path;

/// Result alias for loader operations.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a content file to a string with path context on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
