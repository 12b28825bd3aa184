//! Shared fixtures for unit tests.

use std::collections::HashMap;

use crate::env::{
    AbilityDefinition, AbilityKind, AbilityOracle, AbilitySource, BattleEnv, CombatTables,
    DjinnDefinition, DjinnOracle, DjinnTables, Env, EquipmentDefinition, EquipmentOracle, PcgRng,
    RngOracle, StatusTables, TablesOracle, Targeting, UnitDefinition, UnitOracle,
};
use crate::state::types::element::Element;
use crate::state::types::equipment::EquipmentLoadout;
use crate::state::types::stats::{GrowthRates, Stats};
use crate::state::types::status::StatusEffects;
use crate::state::types::unit::{BattleCounters, Role, Unit};

pub(crate) fn test_unit(id: &str, element: Element) -> Unit {
    Unit {
        id: id.to_string(),
        name: id.to_string(),
        element,
        role: Role::Warrior,
        base_stats: Stats::new(50, 10, 10, 8, 6, 9),
        growth_rates: GrowthRates::new(5, 1, 2, 1, 1, 1),
        level: 1,
        xp: 0,
        current_hp: 50,
        equipment: EquipmentLoadout::empty(),
        abilities: Vec::new(),
        unlocked_ability_ids: Vec::new(),
        status_effects: StatusEffects::new(),
        mana_contribution: 1,
        counters: BattleCounters::default(),
    }
}

pub(crate) fn basic_ability(id: &str, kind: AbilityKind, base_power: i32) -> AbilityDefinition {
    AbilityDefinition {
        id: id.to_string(),
        name: id.to_string(),
        kind,
        targeting: match kind {
            AbilityKind::Healing | AbilityKind::Buff | AbilityKind::Cleanse => {
                Targeting::SingleAlly
            }
            _ => Targeting::SingleEnemy,
        },
        element: None,
        base_power,
        mana_cost: 0,
        unlock_level: 0,
        source: AbilitySource::Innate,
        splash_factor: None,
        applies: Vec::new(),
        cleanse: None,
        revives_fallen: false,
    }
}

/// In-memory oracle bundle for tests; the content crate provides the real
/// one.
#[derive(Default)]
pub(crate) struct TestContent {
    pub abilities: HashMap<String, AbilityDefinition>,
    pub units: HashMap<String, UnitDefinition>,
    pub djinn: HashMap<String, DjinnDefinition>,
    pub equipment: HashMap<String, EquipmentDefinition>,
    pub combat: CombatTables,
    pub status: StatusTables,
    pub djinn_tables: DjinnTables,
    pub rng: PcgRng,
}

impl TestContent {
    pub fn new() -> Self {
        Self {
            combat: CombatTables::default(),
            status: StatusTables::default(),
            djinn_tables: DjinnTables::default(),
            ..Default::default()
        }
    }

    pub fn with_ability(mut self, def: AbilityDefinition) -> Self {
        self.abilities.insert(def.id.clone(), def);
        self
    }

    pub fn with_djinn(mut self, def: DjinnDefinition) -> Self {
        self.djinn.insert(def.id.clone(), def);
        self
    }

    pub fn with_equipment(mut self, def: EquipmentDefinition) -> Self {
        self.equipment.insert(def.id.clone(), def);
        self
    }

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
}

impl AbilityOracle for TestContent {
    fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }
}

impl UnitOracle for TestContent {
    fn unit(&self, id: &str) -> Option<&UnitDefinition> {
        self.units.get(id)
    }
}

impl DjinnOracle for TestContent {
    fn djinn(&self, id: &str) -> Option<&DjinnDefinition> {
        self.djinn.get(id)
    }
}

impl EquipmentOracle for TestContent {
    fn equipment(&self, id: &str) -> Option<&EquipmentDefinition> {
        self.equipment.get(id)
    }
}

impl TablesOracle for TestContent {
    fn combat(&self) -> CombatTables {
        self.combat
    }

    fn status(&self) -> StatusTables {
        self.status
    }

    fn djinn(&self) -> DjinnTables {
        self.djinn_tables
    }
}
