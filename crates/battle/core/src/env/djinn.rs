//! Djinn definitions: unleash effects and per-unit ability grant tables.

use std::collections::BTreeMap;

use crate::state::types::common::{AbilityId, DjinnId, UnitId};
use crate::state::types::element::Element;
use crate::state::types::status::StatusEffect;

use super::abilities::Targeting;

/// Battlefield effect of unleashing a Djinn from the Set state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnleashEffect {
    pub kind: UnleashKind,
    pub base_power: i32,
    pub targeting: Targeting,
    /// Statuses applied to each target of the unleash.
    #[cfg_attr(feature = "serde", serde(default))]
    pub applies: Vec<StatusEffect>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum UnleashKind {
    Damage,
    Heal,
}

/// Ability ids granted to one unit, keyed by compatibility tier. Only the
/// first `grants_per_tier` entries of the relevant tier are honored.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantTiers {
    #[cfg_attr(feature = "serde", serde(default))]
    pub same: Vec<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter: Vec<AbilityId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub neutral: Vec<AbilityId>,
}

/// Static definition of one Djinn, id-keyed in the content tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnDefinition {
    pub id: DjinnId,
    pub name: String,
    pub element: Element,
    pub tier: u8,
    pub unleash: UnleashEffect,
    /// Per-unit grant tables. Units absent from the map receive nothing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub granted_abilities: BTreeMap<UnitId, GrantTiers>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lore: String,
}

/// Oracle serving Djinn definitions by id.
pub trait DjinnOracle: Send + Sync {
    fn djinn(&self, id: &str) -> Option<&DjinnDefinition>;
}
