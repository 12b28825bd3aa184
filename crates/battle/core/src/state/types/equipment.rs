//! Equipment loadout: five named slots, each optionally holding the id of an
//! equipment definition resolved through the [`crate::env::EquipmentOracle`].

use super::common::EquipmentId;

/// The five equipment slots every unit carries.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helm,
    Boots,
    Accessory,
}

/// A unit's equipped item ids, one optional entry per slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentLoadout {
    pub weapon: Option<EquipmentId>,
    pub armor: Option<EquipmentId>,
    pub helm: Option<EquipmentId>,
    pub boots: Option<EquipmentId>,
    pub accessory: Option<EquipmentId>,
}

impl EquipmentLoadout {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquipmentId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Helm => self.helm.as_ref(),
            EquipmentSlot::Boots => self.boots.as_ref(),
            EquipmentSlot::Accessory => self.accessory.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, id: Option<EquipmentId>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = id,
            EquipmentSlot::Armor => self.armor = id,
            EquipmentSlot::Helm => self.helm = id,
            EquipmentSlot::Boots => self.boots = id,
            EquipmentSlot::Accessory => self.accessory = id,
        }
    }

    /// Iterates over occupied slots only.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &EquipmentId)> {
        [
            (EquipmentSlot::Weapon, self.weapon.as_ref()),
            (EquipmentSlot::Armor, self.armor.as_ref()),
            (EquipmentSlot::Helm, self.helm.as_ref()),
            (EquipmentSlot::Boots, self.boots.as_ref()),
            (EquipmentSlot::Accessory, self.accessory.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, id)| id.map(|id| (slot, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipped_skips_empty_slots() {
        let mut loadout = EquipmentLoadout::empty();
        loadout.set(EquipmentSlot::Weapon, Some("long-sword".to_string()));
        loadout.set(EquipmentSlot::Boots, Some("hermes-sandals".to_string()));

        let equipped: Vec<_> = loadout.equipped().collect();
        assert_eq!(equipped.len(), 2);
        assert_eq!(equipped[0].0, EquipmentSlot::Weapon);
        assert_eq!(equipped[1].1, "hermes-sandals");
    }
}
