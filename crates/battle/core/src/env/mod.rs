//! Traits describing read-only content and balance data.
//!
//! Oracles expose the static ability/unit/djinn/equipment tables, the
//! balance tables, and the deterministic RNG. The [`Env`] aggregate bundles
//! them so the engine can access everything it needs without hard coupling
//! to concrete implementations.

mod abilities;
mod djinn;
mod equipment;
mod error;
mod rng;
mod tables;
mod units;

pub use abilities::{
    AbilityDefinition, AbilityKind, AbilityOracle, AbilitySource, Targeting,
};
pub use djinn::{DjinnDefinition, DjinnOracle, GrantTiers, UnleashEffect, UnleashKind};
pub use equipment::{EquipmentDefinition, EquipmentOracle};
pub use error::OracleError;
pub use rng::{
    CTX_ENEMY_TARGET, CTX_STATUS_TICK, CTX_TURN_ORDER, PcgRng, RngOracle, compute_seed, unit_key,
};
pub use tables::{CombatTables, DjinnTables, StatusTables, SynergyBonus, TablesOracle};
pub use units::{UnitDefinition, UnitOracle};

/// Aggregates read-only oracles required by the battle pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, A, U, D, Q, T, R>
where
    A: AbilityOracle + ?Sized,
    U: UnitOracle + ?Sized,
    D: DjinnOracle + ?Sized,
    Q: EquipmentOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    abilities: Option<&'a A>,
    units: Option<&'a U>,
    djinn: Option<&'a D>,
    equipment: Option<&'a Q>,
    tables: Option<&'a T>,
    rng: Option<&'a R>,
}

/// Trait-object form used across the engine.
pub type BattleEnv<'a> = Env<
    'a,
    dyn AbilityOracle + 'a,
    dyn UnitOracle + 'a,
    dyn DjinnOracle + 'a,
    dyn EquipmentOracle + 'a,
    dyn TablesOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, A, U, D, Q, T, R> Env<'a, A, U, D, Q, T, R>
where
    A: AbilityOracle + ?Sized,
    U: UnitOracle + ?Sized,
    D: DjinnOracle + ?Sized,
    Q: EquipmentOracle + ?Sized,
    T: TablesOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        abilities: Option<&'a A>,
        units: Option<&'a U>,
        djinn: Option<&'a D>,
        equipment: Option<&'a Q>,
        tables: Option<&'a T>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            abilities,
            units,
            djinn,
            equipment,
            tables,
            rng,
        }
    }

    pub fn with_all(
        abilities: &'a A,
        units: &'a U,
        djinn: &'a D,
        equipment: &'a Q,
        tables: &'a T,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(abilities),
            Some(units),
            Some(djinn),
            Some(equipment),
            Some(tables),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            abilities: None,
            units: None,
            djinn: None,
            equipment: None,
            tables: None,
            rng: None,
        }
    }

    /// Returns the AbilityOracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the UnitOracle, or an error if not available.
    pub fn units(&self) -> Result<&'a U, OracleError> {
        self.units.ok_or(OracleError::UnitsNotAvailable)
    }

    /// Returns the DjinnOracle, or an error if not available.
    pub fn djinn(&self) -> Result<&'a D, OracleError> {
        self.djinn.ok_or(OracleError::DjinnNotAvailable)
    }

    /// Returns the EquipmentOracle, or an error if not available.
    pub fn equipment(&self) -> Result<&'a Q, OracleError> {
        self.equipment.ok_or(OracleError::EquipmentNotAvailable)
    }

    /// Returns the TablesOracle, or an error if not available.
    pub fn tables(&self) -> Result<&'a T, OracleError> {
        self.tables.ok_or(OracleError::TablesNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, A, U, D, Q, T, R> Env<'a, A, U, D, Q, T, R>
where
    A: AbilityOracle + 'a,
    U: UnitOracle + 'a,
    D: DjinnOracle + 'a,
    Q: EquipmentOracle + 'a,
    T: TablesOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `BattleEnv`
    /// (borrows self).
    pub fn as_battle_env(&self) -> BattleEnv<'a> {
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|a| a as _);
        let units: Option<&'a dyn UnitOracle> = self.units.map(|u| u as _);
        let djinn: Option<&'a dyn DjinnOracle> = self.djinn.map(|d| d as _);
        let equipment: Option<&'a dyn EquipmentOracle> = self.equipment.map(|q| q as _);
        let tables: Option<&'a dyn TablesOracle> = self.tables.map(|t| t as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(abilities, units, djinn, equipment, tables, rng)
    }
}
