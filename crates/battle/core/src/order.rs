//! Turn-order calculation.
//!
//! Priority-boot wearers act first (among themselves by effective SPD),
//! everyone else follows by effective SPD descending. Ties break through a
//! per-unit roll keyed on `(seed, turn_number)`: repeated calls with the
//! same inputs produce the same order, while different turns may reorder
//! ties — no permanent bias, never a violation of the priority/speed
//! ranking.

use crate::env::{BattleEnv, CTX_TURN_ORDER, OracleError, compute_seed, unit_key};
use crate::state::types::common::UnitId;
use crate::state::types::team::Team;
use crate::state::types::unit::Unit;
use crate::stats::effective_spd;

/// Computes the action order for one round over all living combatants.
pub fn calculate_turn_order(
    units: &[&Unit],
    team: &Team,
    env: &BattleEnv<'_>,
    seed: u64,
    turn_number: u32,
) -> Result<Vec<UnitId>, OracleError> {
    let equipment = env.equipment()?;
    let rng = env.rng()?;

    struct Entry {
        id: UnitId,
        priority: bool,
        spd: i32,
        tiebreak: u32,
    }

    let mut entries = Vec::with_capacity(units.len());
    for unit in units.iter().filter(|u| !u.is_ko()) {
        let priority = unit
            .equipment
            .boots
            .as_deref()
            .and_then(|id| equipment.equipment(id))
            .is_some_and(|def| def.always_first_turn);
        let spd = effective_spd(unit, Some(team), env)?;
        let tiebreak = rng.next_u32(compute_seed(
            seed,
            turn_number as u64,
            unit_key(&unit.id),
            CTX_TURN_ORDER,
        ));
        entries.push(Entry {
            id: unit.id.clone(),
            priority,
            spd,
            tiebreak,
        });
    }

    entries.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(b.spd.cmp(&a.spd))
            .then(a.tiebreak.cmp(&b.tiebreak))
            .then(a.id.cmp(&b.id))
    });

    Ok(entries.into_iter().map(|e| e.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EquipmentDefinition;
    use crate::state::types::element::Element;
    use crate::state::types::equipment::EquipmentSlot;
    use crate::state::types::stats::Stats;
    use crate::testutil::{TestContent, test_unit};

    fn hermes_sandals() -> EquipmentDefinition {
        EquipmentDefinition {
            id: "hermes-sandals".into(),
            name: "Hermes' Sandals".into(),
            slot: EquipmentSlot::Boots,
            stat_bonus: Stats::ZERO,
            always_first_turn: true,
            unlocks_ability: None,
        }
    }

    #[test]
    fn sorts_by_effective_spd_descending() {
        let content = TestContent::new();
        let mut fast = test_unit("fast", Element::Venus);
        fast.base_stats.spd = 20;
        let mut slow = test_unit("slow", Element::Mars);
        slow.base_stats.spd = 5;
        let team = Team::new(vec![fast.clone(), slow.clone()]).unwrap();

        let order =
            calculate_turn_order(&[&slow, &fast], &team, &content.env(), 42, 1).unwrap();
        assert_eq!(order, vec!["fast".to_string(), "slow".to_string()]);
    }

    #[test]
    fn priority_boots_precede_everyone() {
        let content = TestContent::new().with_equipment(hermes_sandals());

        let mut slow_priority = test_unit("courier", Element::Venus);
        slow_priority.base_stats.spd = 1;
        slow_priority
            .equipment
            .set(EquipmentSlot::Boots, Some("hermes-sandals".into()));
        let mut fast = test_unit("fast", Element::Mars);
        fast.base_stats.spd = 99;
        let team = Team::new(vec![slow_priority.clone(), fast.clone()]).unwrap();

        for turn in 0..8 {
            let order = calculate_turn_order(
                &[&fast, &slow_priority],
                &team,
                &content.env(),
                7,
                turn,
            )
            .unwrap();
            assert_eq!(order[0], "courier");
        }
    }

    #[test]
    fn ko_units_are_excluded() {
        let content = TestContent::new();
        let alive = test_unit("alive", Element::Venus);
        let dead = test_unit("dead", Element::Mars).with_current_hp(0);
        let team = Team::new(vec![alive.clone(), dead.clone()]).unwrap();

        let order = calculate_turn_order(&[&alive, &dead], &team, &content.env(), 1, 1).unwrap();
        assert_eq!(order, vec!["alive".to_string()]);
    }

    #[test]
    fn identical_inputs_give_identical_order() {
        let content = TestContent::new();
        // Four units with equal SPD: pure tiebreak territory
        let units: Vec<Unit> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| test_unit(id, Element::Venus))
            .collect();
        let team = Team::new(units.clone()).unwrap();
        let refs: Vec<&Unit> = units.iter().collect();

        let first = calculate_turn_order(&refs, &team, &content.env(), 99, 3).unwrap();
        let second = calculate_turn_order(&refs, &team, &content.env(), 99, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_turns_can_reorder_ties() {
        let content = TestContent::new();
        let units: Vec<Unit> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|id| test_unit(id, Element::Venus))
            .collect();
        let team = Team::new(vec![units[0].clone()]).unwrap();
        let refs: Vec<&Unit> = units.iter().collect();

        let orders: Vec<_> = (0..16)
            .map(|turn| calculate_turn_order(&refs, &team, &content.env(), 99, turn).unwrap())
            .collect();
        // With six tied units and sixteen turns, at least two orderings differ
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }
}
