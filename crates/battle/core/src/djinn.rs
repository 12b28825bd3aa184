//! Djinn synergy engine: element compatibility, stat bonuses, and ability
//! grants.
//!
//! Only Djinn in the `Set` state contribute. Bonuses sum linearly per Set
//! Djinn; grants honor at most `grants_per_tier` ability ids from the tier
//! matching the unit↔djinn element compatibility.

use crate::env::{BattleEnv, GrantTiers, OracleError, SynergyBonus};
use crate::state::types::common::{AbilityId, DjinnId};
use crate::state::types::element::ElementCompatibility;
use crate::state::types::team::{DjinnState, Team};
use crate::state::types::unit::Unit;

/// Provenance of one grantable ability, for UI surfaces that show locked
/// grants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnAbilityMetadata {
    pub ability_id: AbilityId,
    pub djinn_id: DjinnId,
    pub compatibility: ElementCompatibility,
}

/// Total stat bonus this unit receives from the team's Set Djinn.
pub fn synergy_bonus_for_unit(
    unit: &Unit,
    team: &Team,
    env: &BattleEnv<'_>,
) -> Result<SynergyBonus, OracleError> {
    let oracle = env.djinn()?;
    let tables = env.tables()?.djinn();

    let mut total = SynergyBonus::default();
    for id in team.set_djinn_ids() {
        let Some(def) = oracle.djinn(id) else {
            continue;
        };
        let bonus = match unit.element.compatibility_with(def.element) {
            ElementCompatibility::Same => tables.same_bonus,
            ElementCompatibility::Counter => tables.counter_bonus,
            ElementCompatibility::Neutral => tables.neutral_bonus,
        };
        total = total.plus(bonus);
    }
    Ok(total)
}

fn tier_list<'a>(tiers: &'a GrantTiers, compatibility: ElementCompatibility) -> &'a [AbilityId] {
    match compatibility {
        ElementCompatibility::Same => &tiers.same,
        ElementCompatibility::Counter => &tiers.counter,
        ElementCompatibility::Neutral => &tiers.neutral,
    }
}

/// Ability ids granted to `unit` by the team's Set Djinn, deduplicated in
/// grant order.
pub fn granted_ability_ids_for_unit(
    unit: &Unit,
    team: &Team,
    env: &BattleEnv<'_>,
) -> Result<Vec<AbilityId>, OracleError> {
    let oracle = env.djinn()?;
    let per_tier = env.tables()?.djinn().grants_per_tier;

    let mut granted: Vec<AbilityId> = Vec::new();
    for id in team.set_djinn_ids() {
        let Some(def) = oracle.djinn(id) else {
            continue;
        };
        let Some(tiers) = def.granted_abilities.get(&unit.id) else {
            continue;
        };
        let compatibility = unit.element.compatibility_with(def.element);
        for ability_id in tier_list(tiers, compatibility).iter().take(per_tier) {
            if !granted.contains(ability_id) {
                granted.push(ability_id.clone());
            }
        }
    }
    Ok(granted)
}

/// Recomputes the unit's Djinn-granted abilities from the team's current
/// equipment.
///
/// Djinn-sourced entries not in the new grant set are dropped; innate and
/// equipment abilities pass through untouched; the result is deduplicated
/// by id.
pub fn merge_djinn_abilities_into_unit(
    unit: &Unit,
    team: &Team,
    env: &BattleEnv<'_>,
) -> Result<Unit, OracleError> {
    let abilities = env.abilities()?;
    let granted = granted_ability_ids_for_unit(unit, team, env)?;

    let is_djinn_sourced = |id: &AbilityId| {
        abilities
            .ability(id)
            .is_some_and(|def| def.source == crate::env::AbilitySource::Djinn)
    };

    let mut merged: Vec<AbilityId> = unit
        .abilities
        .iter()
        .filter(|id| !is_djinn_sourced(id) || granted.contains(id))
        .cloned()
        .collect();
    let mut unlocked: Vec<AbilityId> = unit
        .unlocked_ability_ids
        .iter()
        .filter(|id| !is_djinn_sourced(id) || granted.contains(id))
        .cloned()
        .collect();

    for id in &granted {
        if abilities.ability(id).is_none() {
            continue;
        }
        if !merged.contains(id) {
            merged.push(id.clone());
        }
        if !unlocked.contains(id) {
            unlocked.push(id.clone());
        }
    }

    let mut updated = unit.clone();
    updated.abilities = merged;
    updated.unlocked_ability_ids = unlocked;
    Ok(updated)
}

/// Grant metadata for `unit` across `djinn_ids` (defaults to all equipped
/// Djinn), deduplicated by ability id.
pub fn djinn_ability_metadata_for_unit(
    unit: &Unit,
    team: &Team,
    env: &BattleEnv<'_>,
    djinn_ids: Option<&[DjinnId]>,
) -> Result<Vec<DjinnAbilityMetadata>, OracleError> {
    let oracle = env.djinn()?;

    let equipped = team.equipped_djinn();
    let targets: &[DjinnId] = djinn_ids.unwrap_or(equipped);

    let mut seen: Vec<&AbilityId> = Vec::new();
    let mut metadata = Vec::new();
    for djinn_id in targets {
        let Some(def) = oracle.djinn(djinn_id) else {
            continue;
        };
        let Some(tiers) = def.granted_abilities.get(&unit.id) else {
            continue;
        };
        let compatibility = unit.element.compatibility_with(def.element);
        for ability_id in tier_list(tiers, compatibility) {
            if seen.contains(&ability_id) {
                continue;
            }
            seen.push(ability_id);
            metadata.push(DjinnAbilityMetadata {
                ability_id: ability_id.clone(),
                djinn_id: djinn_id.clone(),
                compatibility,
            });
        }
    }
    Ok(metadata)
}

/// Grants owed by equipped-but-not-Set Djinn, surfaced as locked so callers
/// can present them as unavailable without touching the usable list.
pub fn locked_djinn_ability_metadata_for_unit(
    unit: &Unit,
    team: &Team,
    env: &BattleEnv<'_>,
) -> Result<Vec<DjinnAbilityMetadata>, OracleError> {
    let locked: Vec<DjinnId> = team
        .equipped_djinn()
        .iter()
        .filter(|id| team.djinn_state(id) != Some(DjinnState::Set))
        .cloned()
        .collect();

    if locked.is_empty() {
        return Ok(Vec::new());
    }

    let all = djinn_ability_metadata_for_unit(unit, team, env, None)?;
    Ok(all
        .into_iter()
        .filter(|meta| locked.contains(&meta.djinn_id))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::env::{
        AbilityKind, AbilitySource, DjinnDefinition, Targeting, UnleashEffect, UnleashKind,
    };
    use crate::state::types::element::Element;
    use crate::testutil::{TestContent, basic_ability, test_unit};

    fn djinn(id: &str, element: Element, grants: BTreeMap<String, GrantTiers>) -> DjinnDefinition {
        DjinnDefinition {
            id: id.to_string(),
            name: id.to_string(),
            element,
            tier: 1,
            unleash: UnleashEffect {
                kind: UnleashKind::Damage,
                base_power: 20,
                targeting: Targeting::AllEnemies,
                applies: Vec::new(),
            },
            granted_abilities: grants,
            lore: String::new(),
        }
    }

    fn team_with_set_djinn(unit: Unit, djinn_ids: &[&str]) -> Team {
        let mut team = Team::new(vec![unit]).unwrap();
        for id in djinn_ids {
            team = team.with_collected_djinn(id.to_string());
        }
        team.equip_djinn(djinn_ids.iter().map(|s| s.to_string()).collect())
            .unwrap()
    }

    #[test]
    fn set_djinn_bonuses_sum_linearly() {
        let content = TestContent::new()
            .with_djinn(djinn("flint", Element::Venus, BTreeMap::new()))
            .with_djinn(djinn("granite", Element::Venus, BTreeMap::new()));

        let unit = test_unit("isaac", Element::Venus);
        let team = team_with_set_djinn(unit.clone(), &["flint", "granite"]);

        let bonus = synergy_bonus_for_unit(&unit, &team, &content.env()).unwrap();
        assert_eq!(bonus.atk, 8);
        assert_eq!(bonus.def, 6);
    }

    #[test]
    fn standby_djinn_contribute_nothing() {
        let content = TestContent::new().with_djinn(djinn("flint", Element::Venus, BTreeMap::new()));

        let unit = test_unit("isaac", Element::Venus);
        let team = team_with_set_djinn(unit.clone(), &["flint"])
            .activate_djinn("flint", 1)
            .unwrap();

        let bonus = synergy_bonus_for_unit(&unit, &team, &content.env()).unwrap();
        assert_eq!(bonus, SynergyBonus::default());
    }

    #[test]
    fn counter_djinn_penalize() {
        let content = TestContent::new().with_djinn(djinn("forge", Element::Mars, BTreeMap::new()));

        let unit = test_unit("isaac", Element::Venus);
        let team = team_with_set_djinn(unit.clone(), &["forge"]);

        let bonus = synergy_bonus_for_unit(&unit, &team, &content.env()).unwrap();
        assert_eq!(bonus.atk, -3);
        assert_eq!(bonus.def, -2);
    }

    #[test]
    fn grants_cap_at_two_per_tier() {
        let mut grants = BTreeMap::new();
        grants.insert(
            "isaac".to_string(),
            GrantTiers {
                same: vec!["quake".into(), "clay-spire".into(), "ragnarok".into()],
                counter: Vec::new(),
                neutral: Vec::new(),
            },
        );
        let mut content = TestContent::new().with_djinn(djinn("flint", Element::Venus, grants));
        for id in ["quake", "clay-spire", "ragnarok"] {
            let mut def = basic_ability(id, AbilityKind::Psynergy, 25);
            def.source = AbilitySource::Djinn;
            content = content.with_ability(def);
        }

        let unit = test_unit("isaac", Element::Venus);
        let team = team_with_set_djinn(unit.clone(), &["flint"]);

        let granted = granted_ability_ids_for_unit(&unit, &team, &content.env()).unwrap();
        assert_eq!(granted, vec!["quake".to_string(), "clay-spire".to_string()]);
    }

    #[test]
    fn merge_replaces_stale_djinn_grants_and_keeps_innate() {
        let mut grants = BTreeMap::new();
        grants.insert(
            "isaac".to_string(),
            GrantTiers {
                same: vec!["quake".into()],
                counter: Vec::new(),
                neutral: Vec::new(),
            },
        );
        let mut content = TestContent::new().with_djinn(djinn("flint", Element::Venus, grants));
        content = content.with_ability(basic_ability("slash", AbilityKind::Physical, 10));
        let mut quake = basic_ability("quake", AbilityKind::Psynergy, 25);
        quake.source = AbilitySource::Djinn;
        content = content.with_ability(quake);
        let mut stale = basic_ability("whirlwind", AbilityKind::Psynergy, 20);
        stale.source = AbilitySource::Djinn;
        content = content.with_ability(stale);

        // Unit still carries a grant from a previously equipped djinn.
        let mut unit = test_unit("isaac", Element::Venus);
        unit.abilities = vec!["slash".into(), "whirlwind".into()];
        unit.unlocked_ability_ids = vec!["slash".into(), "whirlwind".into()];

        let team = team_with_set_djinn(unit.clone(), &["flint"]);
        let merged = merge_djinn_abilities_into_unit(&unit, &team, &content.env()).unwrap();

        assert_eq!(merged.abilities, vec!["slash".to_string(), "quake".to_string()]);
        assert_eq!(
            merged.unlocked_ability_ids,
            vec!["slash".to_string(), "quake".to_string()]
        );
    }

    #[test]
    fn locked_metadata_lists_non_set_djinn_only() {
        let mut grants = BTreeMap::new();
        grants.insert(
            "isaac".to_string(),
            GrantTiers {
                same: vec!["quake".into()],
                counter: Vec::new(),
                neutral: Vec::new(),
            },
        );
        let content = TestContent::new().with_djinn(djinn("flint", Element::Venus, grants));

        let unit = test_unit("isaac", Element::Venus);
        let team = team_with_set_djinn(unit.clone(), &["flint"]);

        assert!(
            locked_djinn_ability_metadata_for_unit(&unit, &team, &content.env())
                .unwrap()
                .is_empty()
        );

        let team = team.activate_djinn("flint", 1).unwrap();
        let locked = locked_djinn_ability_metadata_for_unit(&unit, &team, &content.env()).unwrap();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].djinn_id, "flint");
        assert_eq!(locked[0].ability_id, "quake");
    }
}
