//! Status effect storage.
//!
//! Each variant carries its own stacking rule, implemented exhaustively in
//! the [`crate::status`] engine:
//!
//! - damage/heal over time and crowd control: independent instances coexist
//! - buff/debuff and elemental resistance: summed additively when read
//! - shields: each instance tracks its own charges
//! - damage reduction: percents summed, clamped to [0, 1] when read
//! - immunity: blocks new statuses of matching kinds
//! - auto-revive: no duration, expires by use count
//!
//! The list deliberately allows duplicate kinds, so it is backed by a `Vec`
//! rather than a capped array: dropping an instance silently would change
//! stacking arithmetic.

use super::element::Element;
use super::stats::StatKind;

/// A single active status effect instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffect {
    Poison {
        duration: u32,
    },
    Burn {
        duration: u32,
    },
    Freeze {
        duration: u32,
    },
    Paralyze {
        duration: u32,
    },
    Stun {
        duration: u32,
    },
    Buff {
        stat: StatKind,
        modifier: i32,
        duration: u32,
    },
    Debuff {
        stat: StatKind,
        modifier: i32,
        duration: u32,
    },
    HealOverTime {
        heal_per_turn: i32,
        duration: u32,
    },
    Shield {
        remaining_charges: u32,
        duration: u32,
    },
    Invulnerable {
        duration: u32,
    },
    ElementalResistance {
        element: Element,
        modifier: f64,
        duration: u32,
    },
    DamageReduction {
        percent: f64,
        duration: u32,
    },
    Immunity {
        scope: ImmunityScope,
        duration: u32,
    },
    /// Expires by use count, not by duration.
    AutoRevive {
        hp_percent: f64,
        uses_remaining: u32,
    },
}

/// What an immunity blocks: everything (including other immunities), or an
/// explicit set of status kinds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImmunityScope {
    All,
    Kinds(Vec<StatusKind>),
}

/// What a cleanse removes: every negative status, or an explicit kind set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CleanseScope {
    Negative,
    Kinds(Vec<StatusKind>),
}

/// Discriminant-only mirror of [`StatusEffect`], used for immunity matching,
/// cleanse scopes, and event payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusKind {
    Poison,
    Burn,
    Freeze,
    Paralyze,
    Stun,
    Buff,
    Debuff,
    HealOverTime,
    Shield,
    Invulnerable,
    ElementalResistance,
    DamageReduction,
    Immunity,
    AutoRevive,
}

impl StatusEffect {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusEffect::Poison { .. } => StatusKind::Poison,
            StatusEffect::Burn { .. } => StatusKind::Burn,
            StatusEffect::Freeze { .. } => StatusKind::Freeze,
            StatusEffect::Paralyze { .. } => StatusKind::Paralyze,
            StatusEffect::Stun { .. } => StatusKind::Stun,
            StatusEffect::Buff { .. } => StatusKind::Buff,
            StatusEffect::Debuff { .. } => StatusKind::Debuff,
            StatusEffect::HealOverTime { .. } => StatusKind::HealOverTime,
            StatusEffect::Shield { .. } => StatusKind::Shield,
            StatusEffect::Invulnerable { .. } => StatusKind::Invulnerable,
            StatusEffect::ElementalResistance { .. } => StatusKind::ElementalResistance,
            StatusEffect::DamageReduction { .. } => StatusKind::DamageReduction,
            StatusEffect::Immunity { .. } => StatusKind::Immunity,
            StatusEffect::AutoRevive { .. } => StatusKind::AutoRevive,
        }
    }

    /// Remaining duration in turns. `None` for auto-revive, which expires by
    /// use count.
    pub fn duration(&self) -> Option<u32> {
        match self {
            StatusEffect::Poison { duration }
            | StatusEffect::Burn { duration }
            | StatusEffect::Freeze { duration }
            | StatusEffect::Paralyze { duration }
            | StatusEffect::Stun { duration }
            | StatusEffect::Buff { duration, .. }
            | StatusEffect::Debuff { duration, .. }
            | StatusEffect::HealOverTime { duration, .. }
            | StatusEffect::Shield { duration, .. }
            | StatusEffect::Invulnerable { duration }
            | StatusEffect::ElementalResistance { duration, .. }
            | StatusEffect::DamageReduction { duration, .. }
            | StatusEffect::Immunity { duration, .. } => Some(*duration),
            StatusEffect::AutoRevive { .. } => None,
        }
    }

    pub(crate) fn duration_mut(&mut self) -> Option<&mut u32> {
        match self {
            StatusEffect::Poison { duration }
            | StatusEffect::Burn { duration }
            | StatusEffect::Freeze { duration }
            | StatusEffect::Paralyze { duration }
            | StatusEffect::Stun { duration }
            | StatusEffect::Buff { duration, .. }
            | StatusEffect::Debuff { duration, .. }
            | StatusEffect::HealOverTime { duration, .. }
            | StatusEffect::Shield { duration, .. }
            | StatusEffect::Invulnerable { duration }
            | StatusEffect::ElementalResistance { duration, .. }
            | StatusEffect::DamageReduction { duration, .. }
            | StatusEffect::Immunity { duration, .. } => Some(duration),
            StatusEffect::AutoRevive { .. } => None,
        }
    }

    /// True for crowd control that prevents the unit from acting.
    pub fn blocks_acting(&self) -> bool {
        matches!(
            self,
            StatusEffect::Freeze { .. } | StatusEffect::Paralyze { .. } | StatusEffect::Stun { .. }
        )
    }
}

/// Ordered list of active status effects on a unit. Duplicate kinds are
/// allowed; ordering is application order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    pub fn retain(&mut self, f: impl FnMut(&StatusEffect) -> bool) {
        self.effects.retain(f);
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl FromIterator<StatusEffect> for StatusEffects {
    fn from_iter<I: IntoIterator<Item = StatusEffect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}
