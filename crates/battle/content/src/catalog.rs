//! In-memory content registry implementing every `battle-core` oracle.
//!
//! Content is consumed by the engine through the oracle traits and never
//! appears in battle state; a bundle outlives every battle fought over it.

use std::collections::HashMap;

use battle_core::{
    AbilityDefinition, AbilityOracle, BattleEnv, CombatTables, DjinnDefinition, DjinnOracle,
    DjinnTables, Env, EquipmentDefinition, EquipmentOracle, PcgRng, RngOracle, StatusTables,
    TablesOracle, Unit, UnitDefinition, UnitOracle,
};

use crate::loaders::BalanceTables;

/// Id-keyed content tables plus balance numbers and the deterministic RNG.
pub struct ContentBundle {
    abilities: HashMap<String, AbilityDefinition>,
    units: HashMap<String, UnitDefinition>,
    djinn: HashMap<String, DjinnDefinition>,
    equipment: HashMap<String, EquipmentDefinition>,
    tables: BalanceTables,
    rng: PcgRng,
}

impl ContentBundle {
    pub fn new(
        abilities: Vec<AbilityDefinition>,
        units: Vec<UnitDefinition>,
        djinn: Vec<DjinnDefinition>,
        equipment: Vec<EquipmentDefinition>,
        tables: BalanceTables,
    ) -> Self {
        Self {
            abilities: abilities.into_iter().map(|a| (a.id.clone(), a)).collect(),
            units: units.into_iter().map(|u| (u.id.clone(), u)).collect(),
            djinn: djinn.into_iter().map(|d| (d.id.clone(), d)).collect(),
            equipment: equipment.into_iter().map(|e| (e.id.clone(), e)).collect(),
            tables,
            rng: PcgRng,
        }
    }

    /// Cross-checks every id reference between catalogs.
    pub fn validate(&self) -> anyhow::Result<()> {
        for unit in self.units.values() {
            for ability_id in &unit.abilities {
                if !self.abilities.contains_key(ability_id) {
                    anyhow::bail!(
                        "unit {} references unknown ability {}",
                        unit.id,
                        ability_id
                    );
                }
            }
        }
        for djinn in self.djinn.values() {
            for tiers in djinn.granted_abilities.values() {
                for ability_id in tiers
                    .same
                    .iter()
                    .chain(tiers.counter.iter())
                    .chain(tiers.neutral.iter())
                {
                    if !self.abilities.contains_key(ability_id) {
                        anyhow::bail!(
                            "djinn {} grants unknown ability {}",
                            djinn.id,
                            ability_id
                        );
                    }
                }
            }
        }
        for equipment in self.equipment.values() {
            if let Some(ability_id) = &equipment.unlocks_ability {
                if !self.abilities.contains_key(ability_id) {
                    anyhow::bail!(
                        "equipment {} unlocks unknown ability {}",
                        equipment.id,
                        ability_id
                    );
                }
            }
        }
        Ok(())
    }

    /// Bundles all oracles into the trait-object env the engine consumes.
    pub fn env(&self) -> BattleEnv<'_> {
        Env::with_all(
            self as &dyn AbilityOracle,
            self as &dyn UnitOracle,
            self as &dyn DjinnOracle,
            self as &dyn EquipmentOracle,
            self as &dyn TablesOracle,
            &self.rng as &dyn RngOracle,
        )
    }

    /// Instantiates a battle-ready unit from its definition.
    pub fn instantiate_unit(&self, id: &str, level: u32) -> Option<Unit> {
        self.units.get(id).map(|def| def.to_unit(level, 0, self))
    }

    pub fn ability_ids(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn djinn_ids(&self) -> impl Iterator<Item = &str> {
        self.djinn.keys().map(String::as_str)
    }
}

impl AbilityOracle for ContentBundle {
    fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }
}

impl UnitOracle for ContentBundle {
    fn unit(&self, id: &str) -> Option<&UnitDefinition> {
        self.units.get(id)
    }
}

impl DjinnOracle for ContentBundle {
    fn djinn(&self, id: &str) -> Option<&DjinnDefinition> {
        self.djinn.get(id)
    }
}

impl EquipmentOracle for ContentBundle {
    fn equipment(&self, id: &str) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }
}

impl TablesOracle for ContentBundle {
    fn combat(&self) -> CombatTables {
        self.tables.combat
    }

    fn status(&self) -> StatusTables {
        self.tables.status
    }

    fn djinn(&self) -> DjinnTables {
        self.tables.djinn
    }
}
