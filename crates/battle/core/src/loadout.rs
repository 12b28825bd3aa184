//! Equipment loadout management.
//!
//! Equipping is a pre-battle concern, but it owns one piece of battle-facing
//! bookkeeping: legendary gear can unlock an ability while worn, so every
//! loadout change recomputes the unit's equipment-sourced ability entries
//! (mirroring how Djinn grants are recomputed on equip changes).

use crate::env::{AbilitySource, BattleEnv, OracleError};
use crate::state::types::common::{AbilityId, EquipmentId};
use crate::state::types::equipment::EquipmentSlot;
use crate::state::types::unit::Unit;

/// Loadout validation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("unknown equipment: {0}")]
    UnknownEquipment(EquipmentId),

    #[error("cannot equip {id} ({actual}) in the {requested} slot")]
    WrongSlot {
        id: EquipmentId,
        requested: EquipmentSlot,
        actual: EquipmentSlot,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Equips an item into its slot, returning the updated unit.
///
/// Fails when the item is unknown or its definition names a different slot.
pub fn equip_item(
    unit: &Unit,
    slot: EquipmentSlot,
    id: EquipmentId,
    env: &BattleEnv<'_>,
) -> Result<Unit, EquipError> {
    let def = env
        .equipment()?
        .equipment(&id)
        .ok_or_else(|| EquipError::UnknownEquipment(id.clone()))?;
    if def.slot != slot {
        return Err(EquipError::WrongSlot {
            id,
            requested: slot,
            actual: def.slot,
        });
    }

    let mut updated = unit.clone();
    updated.equipment.set(slot, Some(id));
    refresh_equipment_unlocks(&mut updated, env)?;
    Ok(updated)
}

/// Clears a slot, returning the updated unit and the removed item id.
pub fn unequip_item(
    unit: &Unit,
    slot: EquipmentSlot,
    env: &BattleEnv<'_>,
) -> Result<(Unit, Option<EquipmentId>), EquipError> {
    let mut updated = unit.clone();
    let removed = updated.equipment.get(slot).cloned();
    updated.equipment.set(slot, None);
    refresh_equipment_unlocks(&mut updated, env)?;
    Ok((updated, removed))
}

/// Recomputes equipment-sourced ability entries from the current loadout.
///
/// Innate and Djinn-sourced entries pass through untouched.
fn refresh_equipment_unlocks(unit: &mut Unit, env: &BattleEnv<'_>) -> Result<(), OracleError> {
    let abilities = env.abilities()?;
    let equipment = env.equipment()?;

    let granted: Vec<AbilityId> = unit
        .equipment
        .equipped()
        .filter_map(|(_slot, id)| equipment.equipment(id))
        .filter_map(|def| def.unlocks_ability.clone())
        .filter(|id| abilities.ability(id).is_some())
        .collect();

    let is_equipment_sourced = |id: &AbilityId| {
        abilities
            .ability(id)
            .is_some_and(|def| def.source == AbilitySource::Equipment)
    };

    unit.abilities
        .retain(|id| !is_equipment_sourced(id) || granted.contains(id));
    unit.unlocked_ability_ids
        .retain(|id| !is_equipment_sourced(id) || granted.contains(id));

    for id in granted {
        if !unit.abilities.contains(&id) {
            unit.abilities.push(id.clone());
        }
        if !unit.unlocked_ability_ids.contains(&id) {
            unit.unlocked_ability_ids.push(id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AbilityKind, EquipmentDefinition};
    use crate::state::types::element::Element;
    use crate::state::types::stats::Stats;
    use crate::testutil::{TestContent, basic_ability, test_unit};

    fn content() -> TestContent {
        let mut megiddo = basic_ability("megiddo", AbilityKind::Physical, 45);
        megiddo.source = AbilitySource::Equipment;
        TestContent::new()
            .with_ability(megiddo)
            .with_equipment(EquipmentDefinition {
                id: "sol-blade".into(),
                name: "Sol Blade".into(),
                slot: EquipmentSlot::Weapon,
                stat_bonus: Stats::new(0, 0, 10, 0, 0, 0),
                always_first_turn: false,
                unlocks_ability: Some("megiddo".into()),
            })
    }

    #[test]
    fn equipping_legendary_gear_unlocks_its_ability() {
        let content = content();
        let unit = test_unit("isaac", Element::Venus);

        let unit = equip_item(&unit, EquipmentSlot::Weapon, "sol-blade".into(), &content.env())
            .unwrap();
        assert!(unit.has_unlocked("megiddo"));

        let (unit, removed) =
            unequip_item(&unit, EquipmentSlot::Weapon, &content.env()).unwrap();
        assert_eq!(removed, Some("sol-blade".to_string()));
        assert!(!unit.has_unlocked("megiddo"));
        assert!(!unit.abilities.contains(&"megiddo".to_string()));
    }

    #[test]
    fn slot_mismatch_is_rejected() {
        let content = content();
        let unit = test_unit("isaac", Element::Venus);

        let err = equip_item(&unit, EquipmentSlot::Boots, "sol-blade".into(), &content.env())
            .unwrap_err();
        assert!(matches!(err, EquipError::WrongSlot { .. }));
    }

    #[test]
    fn unknown_equipment_is_rejected() {
        let content = content();
        let unit = test_unit("isaac", Element::Venus);

        let err = equip_item(&unit, EquipmentSlot::Weapon, "excalibur".into(), &content.env())
            .unwrap_err();
        assert_eq!(err, EquipError::UnknownEquipment("excalibur".into()));
    }
}
