//! Deterministic battle rules and data types shared across hosts.
//!
//! `battle-core` defines the canonical combat rules (damage pipeline, status
//! engine, turn order, mana ledger, Djinn synergy) and exposes pure APIs
//! reused by UIs, AI drivers, and test harnesses. All state mutation flows
//! through [`service::BattleService`], which consumes one immutable
//! [`state::BattleState`] snapshot and publishes the next; content tables
//! and randomness are injected through the oracle traits in [`env`].

pub mod combat;
pub mod config;
pub mod djinn;
pub mod env;
pub mod loadout;
pub mod mana;
pub mod order;
pub mod service;
pub mod state;
pub mod stats;
pub mod status;

#[cfg(test)]
pub(crate) mod testutil;

pub use combat::{
    BlockSource, DamageApplication, apply_damage_modifiers, apply_damage_with_shields,
    apply_healing, calculate_physical_damage, calculate_psynergy_damage, revive_fallen,
};
pub use config::BattleConfig;
pub use djinn::{
    DjinnAbilityMetadata, djinn_ability_metadata_for_unit, granted_ability_ids_for_unit,
    locked_djinn_ability_metadata_for_unit, merge_djinn_abilities_into_unit,
    synergy_bonus_for_unit,
};
pub use env::{
    AbilityDefinition, AbilityKind, AbilityOracle, AbilitySource, BattleEnv, CombatTables,
    DjinnDefinition, DjinnOracle, DjinnTables, Env, EquipmentDefinition, EquipmentOracle,
    GrantTiers, OracleError, PcgRng, RngOracle, StatusTables, SynergyBonus, TablesOracle,
    Targeting, UnitDefinition, UnitOracle, UnleashEffect, UnleashKind, compute_seed, unit_key,
};
pub use loadout::{EquipError, equip_item, unequip_item};
pub use mana::{
    ManaError, ability_mana_cost, is_queue_complete, team_mana_pool, total_queued_cost,
    validate_queued_actions,
};
pub use order::calculate_turn_order;
pub use service::{BattleError, BattleEvent, BattleOutcome, BattleService, SkipReason};
pub use state::{
    AbilityId, BattleMetadata, BattleMode, BattlePhase, BattleState, BattleStatus, CleanseScope,
    Difficulty, DjinnId, DjinnState, DjinnTracker, Element, ElementCompatibility, EquipmentId,
    EquipmentLoadout, EquipmentSlot, GrowthRates, ImmunityScope, QueueMode, QueuedAction, Role,
    Side, StatKind, Stats, StatusEffect, StatusEffects, StatusKind, Team, TeamError, TurnMode,
    Unit, UnitId, UnitIndex, UnitSlot, empty_queue,
};
#[cfg(feature = "serde")]
pub use state::state_digest;
pub use stats::{effective_spd, effective_stats};
pub use status::{
    TickDelta, TickOutcome, apply_status, cleanse, is_blocked_from_acting, is_immune_to,
    is_negative, tick_statuses,
};
