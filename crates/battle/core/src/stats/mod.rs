//! Effective-stat computation.
//!
//! Stored unit fields are the single source of truth; the battle formulas
//! read a computed view layered as:
//!
//! `base + growth×(level−1) + equipment + Set-Djinn synergy + status modifiers`
//!
//! Buff modifiers add, debuff modifiers subtract (content stores positive
//! magnitudes); multiple instances on the same stat sum. Final atk/def/mag/
//! spd floor at 0. Max HP deliberately ignores equipment and statuses:
//! `base.hp + growth.hp × (level − 1)` is the whole formula.

use crate::env::{BattleEnv, OracleError};
use crate::state::types::status::StatusEffect;
use crate::state::types::stats::Stats;
use crate::state::types::team::Team;
use crate::state::types::unit::Unit;

/// Computes the unit's effective stats.
///
/// `team` is the player team; units not on it (enemies) simply receive no
/// Djinn synergy.
pub fn effective_stats(
    unit: &Unit,
    team: Option<&Team>,
    env: &BattleEnv<'_>,
) -> Result<Stats, OracleError> {
    let mut stats = unit.base_stats.plus(&unit.growth_rates.at_level(unit.level));

    let equipment = env.equipment()?;
    for (_slot, id) in unit.equipment.equipped() {
        if let Some(def) = equipment.equipment(id) {
            stats = stats.plus(&def.stat_bonus);
        }
    }

    if let Some(team) = team {
        if team.contains(&unit.id) {
            let bonus = crate::djinn::synergy_bonus_for_unit(unit, team, env)?;
            stats.atk += bonus.atk;
            stats.def += bonus.def;
        }
    }

    for effect in unit.status_effects.iter() {
        match effect {
            StatusEffect::Buff { stat, modifier, .. } => stats.add(*stat, *modifier),
            StatusEffect::Debuff { stat, modifier, .. } => stats.add(*stat, -*modifier),
            _ => {}
        }
    }

    stats.atk = stats.atk.max(0);
    stats.def = stats.def.max(0);
    stats.mag = stats.mag.max(0);
    stats.spd = stats.spd.max(0);
    // Max HP is growth-only; equipment hp bonuses are not part of the model.
    stats.hp = unit.max_hp();

    Ok(stats)
}

/// Effective SPD, the turn-order key.
pub fn effective_spd(
    unit: &Unit,
    team: Option<&Team>,
    env: &BattleEnv<'_>,
) -> Result<i32, OracleError> {
    Ok(effective_stats(unit, team, env)?.spd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EquipmentDefinition;
    use crate::state::types::element::Element;
    use crate::state::types::equipment::EquipmentSlot;
    use crate::state::types::stats::StatKind;
    use crate::testutil::{TestContent, test_unit};

    #[test]
    fn growth_and_equipment_stack() {
        let content = TestContent::new().with_equipment(EquipmentDefinition {
            id: "iron-band".into(),
            name: "Iron Band".into(),
            slot: EquipmentSlot::Accessory,
            stat_bonus: Stats::new(0, 0, 3, 1, 0, 2),
            always_first_turn: false,
            unlocks_ability: None,
        });

        let mut unit = test_unit("isaac", Element::Venus);
        unit.level = 3;
        unit.equipment.set(EquipmentSlot::Accessory, Some("iron-band".into()));

        let stats = effective_stats(&unit, None, &content.env()).unwrap();
        // atk: 10 base + 2×2 growth + 3 equipment
        assert_eq!(stats.atk, 17);
        // spd: 9 base + 2 growth + 2 equipment
        assert_eq!(stats.spd, 13);
        // hp stays growth-only
        assert_eq!(stats.hp, 60);
    }

    #[test]
    fn buffs_sum_additively_and_debuffs_subtract() {
        let content = TestContent::new();
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Buff {
                stat: StatKind::Atk,
                modifier: 3,
                duration: 2,
            })
            .with_status(StatusEffect::Buff {
                stat: StatKind::Atk,
                modifier: 2,
                duration: 2,
            })
            .with_status(StatusEffect::Debuff {
                stat: StatKind::Spd,
                modifier: 4,
                duration: 2,
            });

        let stats = effective_stats(&unit, None, &content.env()).unwrap();
        assert_eq!(stats.atk, 15);
        assert_eq!(stats.spd, 5);
    }

    #[test]
    fn stats_floor_at_zero() {
        let content = TestContent::new();
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::Debuff {
            stat: StatKind::Atk,
            modifier: 99,
            duration: 1,
        });

        let stats = effective_stats(&unit, None, &content.env()).unwrap();
        assert_eq!(stats.atk, 0);
    }
}
