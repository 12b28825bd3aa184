//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content tables and provides loaders for
//! RON/TOML data files:
//! - Ability catalog (RON)
//! - Unit catalog: party members and enemies (RON)
//! - Djinn catalog with per-unit grant tables (RON)
//! - Equipment catalog (RON)
//! - Balance tables (TOML)
//!
//! Content is consumed by the engine through `battle-core` oracle traits and
//! never appears in battle state. All loaders deserialize `battle-core`
//! types directly via serde.

pub mod catalog;
pub mod loaders;

pub use catalog::ContentBundle;
pub use loaders::{
    AbilityLoader, BalanceTables, ContentFactory, DjinnLoader, EquipmentLoader, TablesLoader,
    UnitLoader,
};

use std::path::PathBuf;

/// Path of the content data directory shipped with this crate.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Loads the content tables shipped with this crate.
pub fn load_default() -> anyhow::Result<ContentBundle> {
    ContentFactory::load_dir(&default_data_dir())
}
