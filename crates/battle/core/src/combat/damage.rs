//! Damage formulas and the defender-side modifier pipeline.
//!
//! Both formulas are pure and draw no randomness: identical inputs yield
//! bit-identical outputs on every call. Randomness in battle lives entirely
//! in turn-order tiebreaks and enemy target picks.

use crate::env::{BattleEnv, OracleError};
use crate::env::AbilityDefinition;
use crate::state::types::element::Element;
use crate::state::types::status::StatusEffect;
use crate::state::types::team::Team;
use crate::state::types::unit::Unit;
use crate::stats::effective_stats;

/// ATK-scaled strike: `base_power + ATK − DEF × phys_def_factor`, floored at
/// the table minimum.
pub fn calculate_physical_damage(
    attacker: &Unit,
    defender: &Unit,
    team: &Team,
    ability: &AbilityDefinition,
    env: &BattleEnv<'_>,
) -> Result<i32, OracleError> {
    let tables = env.tables()?.combat();
    let atk = effective_stats(attacker, Some(team), env)?.atk;
    let def = effective_stats(defender, Some(team), env)?.def;

    let raw = ability.base_power as f64 + atk as f64 - def as f64 * tables.phys_def_factor;
    Ok((raw.floor() as i32).max(tables.minimum_damage))
}

/// MAG-scaled strike: `(base_power + MAG − DEF × psy_def_factor) ×
/// element_multiplier`, floored at the table minimum.
pub fn calculate_psynergy_damage(
    attacker: &Unit,
    defender: &Unit,
    team: &Team,
    ability: &AbilityDefinition,
    env: &BattleEnv<'_>,
) -> Result<i32, OracleError> {
    let tables = env.tables()?.combat();
    let mag = effective_stats(attacker, Some(team), env)?.mag;
    let def = effective_stats(defender, Some(team), env)?.def;

    let multiplier = match ability.element {
        Some(element) => element_multiplier(element, defender.element, env)?,
        None => 1.0,
    };

    let raw =
        (ability.base_power as f64 + mag as f64 - def as f64 * tables.psy_def_factor) * multiplier;
    Ok((raw.floor() as i32).max(tables.minimum_damage))
}

/// Advantage-triangle multiplier for an element-tagged ability.
pub fn element_multiplier(
    attack: Element,
    defense: Element,
    env: &BattleEnv<'_>,
) -> Result<f64, OracleError> {
    let tables = env.tables()?.combat();
    if attack.has_advantage_over(defense) {
        return Ok(tables.advantage_multiplier);
    }
    if defense.has_advantage_over(attack) {
        return Ok(tables.disadvantage_multiplier);
    }
    Ok(1.0)
}

/// Defender-side modifier pipeline, applied in this exact order:
///
/// 1. Elemental resistance: sum of matching-element `modifier`s; the factor
///    `1 − Σ` floors at 0, so stacked resistance can null damage but never
///    invert it. A `Neutral` or untagged hit skips this step entirely.
/// 2. Damage reduction: sum of `percent`s clamped to [0, 1].
///
/// The result may be fractional; callers round before applying it to HP.
pub fn apply_damage_modifiers(base_damage: f64, element: Option<Element>, defender: &Unit) -> f64 {
    let mut damage = base_damage;

    if let Some(element) = element {
        if element != Element::Neutral {
            let resistance: f64 = defender
                .status_effects
                .iter()
                .filter_map(|effect| match effect {
                    StatusEffect::ElementalResistance {
                        element: resisted,
                        modifier,
                        ..
                    } if *resisted == element => Some(*modifier),
                    _ => None,
                })
                .sum();
            if resistance != 0.0 {
                damage *= (1.0 - resistance).max(0.0);
            }
        }
    }

    let reduction: f64 = defender
        .status_effects
        .iter()
        .filter_map(|effect| match effect {
            StatusEffect::DamageReduction { percent, .. } => Some(*percent),
            _ => None,
        })
        .sum();
    if reduction != 0.0 {
        damage *= 1.0 - reduction.clamp(0.0, 1.0);
    }

    damage
}
