//! Equipment definitions and the oracle serving them.

use crate::state::types::common::{AbilityId, EquipmentId};
use crate::state::types::equipment::EquipmentSlot;
use crate::state::types::stats::Stats;

/// Static definition of one piece of equipment, id-keyed in the content
/// tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub id: EquipmentId,
    pub name: String,
    pub slot: EquipmentSlot,
    /// Additive stat bonus while equipped.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_bonus: Stats,
    /// Hermes-Sandals priority: the wearer acts before all non-priority
    /// combatants regardless of SPD.
    #[cfg_attr(feature = "serde", serde(default))]
    pub always_first_turn: bool,
    /// Legendary gear can unlock an extra ability while worn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocks_ability: Option<AbilityId>,
}

/// Oracle serving equipment definitions by id.
pub trait EquipmentOracle: Send + Sync {
    fn equipment(&self, id: &str) -> Option<&EquipmentDefinition>;
}
