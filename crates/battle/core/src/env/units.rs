//! Unit definitions (party members and enemies) and the oracle serving them.

use crate::config::BattleConfig;
use crate::state::types::common::{AbilityId, UnitId};
use crate::state::types::element::Element;
use crate::state::types::equipment::EquipmentLoadout;
use crate::state::types::stats::{GrowthRates, Stats};
use crate::state::types::status::StatusEffects;
use crate::state::types::unit::{BattleCounters, Role, Unit};

use super::abilities::AbilityOracle;

/// Static definition of one unit, id-keyed in the content tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDefinition {
    pub id: UnitId,
    pub name: String,
    pub element: Element,
    pub role: Role,
    pub base_stats: Stats,
    pub growth_rates: GrowthRates,
    /// Ability ids owned from the start (unlock levels live on the ability).
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
    /// Fixed contribution to the team mana pool.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_contribution: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl UnitDefinition {
    /// Instantiates a battle-ready unit at `level`.
    ///
    /// The level clamps into the canonical `[1, MAX_LEVEL]` range; abilities
    /// with `unlock_level <= level` are unlocked; HP starts full.
    pub fn to_unit(
        &self,
        level: u32,
        xp: u32,
        abilities: &(impl AbilityOracle + ?Sized),
    ) -> Unit {
        let level = BattleConfig::clamp_level(level);

        let unlocked: Vec<AbilityId> = self
            .abilities
            .iter()
            .filter(|id| {
                abilities
                    .ability(id)
                    .is_some_and(|def| def.unlock_level <= level)
            })
            .cloned()
            .collect();

        let mut unit = Unit {
            id: self.id.clone(),
            name: self.name.clone(),
            element: self.element,
            role: self.role,
            base_stats: self.base_stats,
            growth_rates: self.growth_rates,
            level,
            xp,
            current_hp: 0,
            equipment: EquipmentLoadout::empty(),
            abilities: self.abilities.clone(),
            unlocked_ability_ids: unlocked,
            status_effects: StatusEffects::new(),
            mana_contribution: self.mana_contribution,
            counters: BattleCounters::default(),
        };
        unit.current_hp = unit.max_hp();
        unit
    }
}

/// Oracle serving unit definitions by id.
pub trait UnitOracle: Send + Sync {
    fn unit(&self, id: &str) -> Option<&UnitDefinition>;
}
