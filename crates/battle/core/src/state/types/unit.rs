//! Unit state: a single combatant instantiated from a content definition.
//!
//! # Design Principles
//!
//! 1. Stored fields are the single source of truth; everything else
//!    (max HP, effective stats) is derived on demand.
//! 2. Mutators are pure: they take `&self` and return a new `Unit`. Service
//!    code mutates a private clone and publishes it wholesale, which is what
//!    makes transactional rollback trivial.
//!
//! # Invariants
//!
//! - `0 <= current_hp <= max_hp()`
//! - `level` lies in `[BattleConfig::MIN_LEVEL, BattleConfig::MAX_LEVEL]`

use super::common::{AbilityId, UnitId};
use super::element::Element;
use super::equipment::EquipmentLoadout;
use super::stats::{GrowthRates, Stats};
use super::status::StatusEffects;

/// Combat role, used by content and AI hints; carries no mechanical weight
/// inside the core formulas.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Warrior,
    Mage,
    Healer,
    Rogue,
    Support,
    Tank,
    Scholar,
}

/// Per-battle accounting, reset when a battle starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleCounters {
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub actions_taken: u32,
}

/// A combatant: party member or enemy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub element: Element,
    pub role: Role,

    pub base_stats: Stats,
    pub growth_rates: GrowthRates,
    pub level: u32,
    pub xp: u32,

    pub current_hp: i32,

    pub equipment: EquipmentLoadout,

    /// Ability ids owned by this unit (innate + equipment + Djinn grants).
    pub abilities: Vec<AbilityId>,
    /// Subset of `abilities` usable at the current level.
    pub unlocked_ability_ids: Vec<AbilityId>,

    pub status_effects: StatusEffects,

    /// Fixed contribution to the team mana pool; not stat-derived.
    pub mana_contribution: u32,

    pub counters: BattleCounters,
}

impl Unit {
    /// Max HP for the current level: `base.hp + (level − 1) × growth.hp`.
    ///
    /// Equipment and statuses never change max HP.
    pub fn max_hp(&self) -> i32 {
        self.base_stats.hp + self.growth_rates.hp * (self.level.saturating_sub(1) as i32)
    }

    /// A unit at 0 HP is knocked out and excluded from turn order.
    pub fn is_ko(&self) -> bool {
        self.current_hp <= 0
    }

    pub fn has_unlocked(&self, ability_id: &str) -> bool {
        self.unlocked_ability_ids.iter().any(|id| id == ability_id)
    }

    /// Returns a copy with `current_hp` set (clamped into `[0, max_hp]`).
    pub fn with_current_hp(&self, hp: i32) -> Unit {
        let mut unit = self.clone();
        unit.current_hp = hp.clamp(0, self.max_hp());
        unit
    }

    /// Returns a copy with an additional status effect appended. Immunity
    /// checks belong to [`crate::status::apply_status`]; this is the raw
    /// append.
    pub fn with_status(&self, effect: super::status::StatusEffect) -> Unit {
        let mut unit = self.clone();
        unit.status_effects.push(effect);
        unit
    }

    /// Returns a copy with battle counters zeroed.
    pub fn with_reset_counters(&self) -> Unit {
        let mut unit = self.clone();
        unit.counters = BattleCounters::default();
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::test_unit;

    #[test]
    fn max_hp_follows_growth_formula() {
        let mut unit = test_unit("isaac", Element::Venus);
        assert_eq!(unit.max_hp(), 50);
        unit.level = 4;
        assert_eq!(unit.max_hp(), 65);
    }

    #[test]
    fn with_current_hp_clamps_to_bounds() {
        let unit = test_unit("isaac", Element::Venus);
        assert_eq!(unit.with_current_hp(999).current_hp, 50);
        assert_eq!(unit.with_current_hp(-5).current_hp, 0);
    }

    #[test]
    fn ko_at_zero_hp() {
        let unit = test_unit("isaac", Element::Venus);
        assert!(!unit.is_ko());
        assert!(unit.with_current_hp(0).is_ko());
    }
}
