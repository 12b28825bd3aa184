//! Ability definitions and the oracle that serves them.

use crate::state::types::common::AbilityId;
use crate::state::types::element::Element;
use crate::state::types::status::{CleanseScope, StatusEffect};

/// How an ability resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AbilityKind {
    /// ATK-scaled strike.
    Physical,
    /// MAG-scaled, optionally element-tagged.
    Psynergy,
    /// Restores HP (or revives when `revives_fallen`).
    Healing,
    /// Applies its status list to allies.
    Buff,
    /// Applies its status list to enemies.
    Debuff,
    /// Strips statuses per `cleanse` scope.
    Cleanse,
}

/// Who an ability can hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Targeting {
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
}

/// Where a unit's ability came from. Djinn-sourced entries are recomputed on
/// every equip change; the others are permanent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AbilitySource {
    #[default]
    Innate,
    Equipment,
    Djinn,
}

/// Static definition of one ability, id-keyed in the content tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
    pub targeting: Targeting,

    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Option<Element>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: AbilitySource,

    /// Secondary-target damage fraction for multi-target strikes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub splash_factor: Option<f64>,

    /// Statuses applied to each target on resolution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Vec<StatusEffect>,

    /// Cleanse scope, read when `kind == Cleanse`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cleanse: Option<CleanseScope>,

    /// Healing abilities with this flag restore KO'd targets instead of
    /// healing the living.
    #[cfg_attr(feature = "serde", serde(default))]
    pub revives_fallen: bool,
}

impl AbilityDefinition {
    /// True when the targeting hits the caster's own side.
    pub fn targets_allies(&self) -> bool {
        matches!(self.targeting, Targeting::SingleAlly | Targeting::AllAllies)
    }

    /// True when the targeting hits everyone on the chosen side.
    pub fn is_multi_target(&self) -> bool {
        matches!(self.targeting, Targeting::AllEnemies | Targeting::AllAllies)
    }
}

/// Oracle serving ability definitions by id.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &str) -> Option<&AbilityDefinition>;
}
