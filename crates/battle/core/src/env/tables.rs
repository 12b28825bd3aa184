//! Oracle providing balance tables.
//!
//! These parameters define formula shapes and tuning numbers, not entity
//! data (use the ability/unit/djinn/equipment oracles for that).

/// Oracle providing game rules and balance tables.
pub trait TablesOracle: Send + Sync {
    fn combat(&self) -> CombatTables;
    fn status(&self) -> StatusTables;
    fn djinn(&self) -> DjinnTables;
}

/// Damage formula parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    /// Fraction of defender DEF subtracted in the physical formula.
    pub phys_def_factor: f64,
    /// Fraction of defender DEF subtracted in the psynergy formula.
    pub psy_def_factor: f64,
    /// Floor applied after each damage formula.
    pub minimum_damage: i32,
    /// Psynergy multiplier when the ability element has the advantage.
    pub advantage_multiplier: f64,
    /// Psynergy multiplier when the defender element has the advantage.
    pub disadvantage_multiplier: f64,
}

impl CombatTables {
    pub const fn new(
        phys_def_factor: f64,
        psy_def_factor: f64,
        minimum_damage: i32,
        advantage_multiplier: f64,
        disadvantage_multiplier: f64,
    ) -> Self {
        Self {
            phys_def_factor,
            psy_def_factor,
            minimum_damage,
            advantage_multiplier,
            disadvantage_multiplier,
        }
    }
}

impl Default for CombatTables {
    fn default() -> Self {
        Self::new(0.5, 0.3, 1, 1.5, 0.67)
    }
}

/// Status-tick parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTables {
    /// Poison tick damage as a fraction of max HP.
    pub poison_fraction: f64,
    /// Burn tick damage as a fraction of max HP.
    pub burn_fraction: f64,
}

impl StatusTables {
    pub const fn new(poison_fraction: f64, burn_fraction: f64) -> Self {
        Self {
            poison_fraction,
            burn_fraction,
        }
    }
}

impl Default for StatusTables {
    fn default() -> Self {
        Self::new(0.08, 0.10)
    }
}

/// Stat bonus contributed by one Set Djinn at one compatibility tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SynergyBonus {
    pub atk: i32,
    pub def: i32,
}

impl SynergyBonus {
    pub const fn new(atk: i32, def: i32) -> Self {
        Self { atk, def }
    }

    pub fn plus(&self, other: SynergyBonus) -> SynergyBonus {
        SynergyBonus {
            atk: self.atk + other.atk,
            def: self.def + other.def,
        }
    }
}

/// Djinn system parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnTables {
    pub same_bonus: SynergyBonus,
    pub counter_bonus: SynergyBonus,
    pub neutral_bonus: SynergyBonus,
    /// Rounds a Djinn spends in Recovery before returning to Set.
    pub recovery_turns: u32,
    /// Ability grants honored per compatibility tier per Djinn.
    pub grants_per_tier: usize,
}

impl DjinnTables {
    pub const fn new(
        same_bonus: SynergyBonus,
        counter_bonus: SynergyBonus,
        neutral_bonus: SynergyBonus,
        recovery_turns: u32,
        grants_per_tier: usize,
    ) -> Self {
        Self {
            same_bonus,
            counter_bonus,
            neutral_bonus,
            recovery_turns,
            grants_per_tier,
        }
    }
}

impl Default for DjinnTables {
    fn default() -> Self {
        Self::new(
            SynergyBonus::new(4, 3),
            SynergyBonus::new(-3, -2),
            SynergyBonus::new(2, 2),
            2,
            2,
        )
    }
}
