//! Authoritative battle state representation.
//!
//! A `BattleState` is a pure value: the service consumes one snapshot and
//! publishes the next, never mutating a caller-visible state in place. Every
//! field is plain data so snapshots serialize to flat JSON with no live
//! references.

pub mod types;

use std::collections::{BTreeMap, HashMap};

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

pub use types::{
    AbilityId, BattleCounters, CleanseScope, DjinnId, DjinnState, DjinnTracker, Element,
    ElementCompatibility, EquipmentId, EquipmentLoadout, EquipmentSlot, GrowthRates,
    ImmunityScope, Role, StatKind, Stats, StatusEffect, StatusEffects, StatusKind, Team,
    TeamError, Unit, UnitId,
};

/// Which side of the battlefield a unit stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

/// Position of a unit inside the state's arenas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSlot {
    pub side: Side,
    pub index: usize,
}

/// Id → slot side table over the two unit arenas.
///
/// Built on demand ([`BattleState::build_index`]) and dropped with the scope
/// that needed it: it is never stored in a snapshot, so immutable states
/// cannot alias stale lookups.
#[derive(Clone, Debug, Default)]
pub struct UnitIndex {
    slots: HashMap<UnitId, UnitSlot>,
}

impl UnitIndex {
    pub fn get(&self, id: &str) -> Option<UnitSlot> {
        self.slots.get(id).copied()
    }

    pub fn is_player(&self, id: &str) -> bool {
        matches!(
            self.get(id),
            Some(UnitSlot {
                side: Side::Player,
                ..
            })
        )
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Battle outcome as seen by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    Ongoing,
    PlayerVictory,
    PlayerDefeat,
}

/// Phase of the round-based queue mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    Planning,
    Executing,
    Victory,
    Defeat,
}

/// One planned action for one player unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedAction {
    pub unit_id: UnitId,
    /// `None` is the free basic attack.
    pub ability_id: Option<AbilityId>,
    pub target_ids: Vec<UnitId>,
    /// Cost captured at queue time so refunds are exact.
    pub mana_cost: u32,
}

/// Queue of planned actions, one slot per team unit.
pub type ActionQueue = ArrayVec<Option<QueuedAction>, { BattleConfig::MAX_TEAM_UNITS }>;

/// Builds an all-empty queue sized to the team.
pub fn empty_queue(team_size: usize) -> ActionQueue {
    let mut queue = ActionQueue::new();
    for _ in 0..team_size.min(BattleConfig::MAX_TEAM_UNITS) {
        queue.push(None);
    }
    queue
}

/// Legacy per-unit-turn mode state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnMode {
    /// Unit ids in action order for the current round.
    pub turn_order: Vec<UnitId>,
    pub current_actor_index: usize,
}

/// Round-based queued mode state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueMode {
    pub phase: BattlePhase,
    pub queued_actions: ActionQueue,
    /// Djinn ids marked for activation this round.
    pub queued_djinn: Vec<DjinnId>,
    /// Index of the action currently resolving during execution.
    pub execution_index: usize,
}

/// The two battle modes, each carrying only its own fields so impossible
/// combinations are unrepresentable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleMode {
    Turn(TurnMode),
    Queue(QueueMode),
}

/// Encounter difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    Normal,
    Elite,
    Boss,
}

/// Context about the encounter. `encounter_id` has exactly one home here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleMetadata {
    pub encounter_id: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Boss battles cannot be fled.
    pub is_boss: bool,
    /// NPC that triggered the battle, for post-battle dialogue.
    pub npc_id: Option<String>,
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed fixed at battle start and never modified; combined with
    /// turn/round counters to derive per-roll seeds.
    pub seed: u64,

    pub player_team: Team,
    pub enemies: Vec<Unit>,

    pub mode: BattleMode,
    pub status: BattleStatus,

    /// Turn counter used by Djinn recovery tracking.
    pub current_turn: u32,
    /// Increments each planning phase.
    pub round_number: u32,

    pub remaining_mana: u32,
    pub max_mana: u32,

    /// Djinn id → rounds until it returns to Set.
    pub djinn_recovery_timers: BTreeMap<DjinnId, u32>,

    /// Append-only, human-readable event log.
    pub log: Vec<String>,

    pub meta: BattleMetadata,
}

impl BattleState {
    /// Builds the id → slot side table for O(1) lookups during resolution.
    pub fn build_index(&self) -> UnitIndex {
        let mut slots = HashMap::with_capacity(self.player_team.units().len() + self.enemies.len());
        for (index, unit) in self.player_team.units().iter().enumerate() {
            slots.insert(
                unit.id.clone(),
                UnitSlot {
                    side: Side::Player,
                    index,
                },
            );
        }
        for (index, unit) in self.enemies.iter().enumerate() {
            slots.insert(
                unit.id.clone(),
                UnitSlot {
                    side: Side::Enemy,
                    index,
                },
            );
        }
        UnitIndex { slots }
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.player_team
            .unit(id)
            .or_else(|| self.enemies.iter().find(|u| u.id == id))
    }

    pub(crate) fn unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        if self.player_team.contains(id) {
            return self.player_team.unit_mut(id);
        }
        self.enemies.iter_mut().find(|u| u.id == id)
    }

    pub fn all_units(&self) -> impl Iterator<Item = &Unit> {
        self.player_team.units().iter().chain(self.enemies.iter())
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Unit> {
        self.player_team.living_units()
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Unit> {
        self.enemies.iter().filter(|u| !u.is_ko())
    }

    pub fn is_over(&self) -> bool {
        self.status != BattleStatus::Ongoing
    }

    /// Queue-mode accessor; `None` in legacy turn mode.
    pub fn queue(&self) -> Option<&QueueMode> {
        match &self.mode {
            BattleMode::Queue(queue) => Some(queue),
            BattleMode::Turn(_) => None,
        }
    }

    pub(crate) fn queue_mut(&mut self) -> Option<&mut QueueMode> {
        match &mut self.mode {
            BattleMode::Queue(queue) => Some(queue),
            BattleMode::Turn(_) => None,
        }
    }

    /// Turn-mode accessor; `None` in queue mode.
    pub fn turn(&self) -> Option<&TurnMode> {
        match &self.mode {
            BattleMode::Turn(turn) => Some(turn),
            BattleMode::Queue(_) => None,
        }
    }

    pub(crate) fn turn_mut(&mut self) -> Option<&mut TurnMode> {
        match &mut self.mode {
            BattleMode::Turn(turn) => Some(turn),
            BattleMode::Queue(_) => None,
        }
    }

    /// Unit whose turn it is (turn mode only).
    pub fn current_actor(&self) -> Option<&Unit> {
        let turn = self.turn()?;
        let id = turn.turn_order.get(turn.current_actor_index)?;
        self.unit(id)
    }
}

/// Deterministic SHA-256 digest over the bincode encoding of a state.
///
/// Two hosts replaying the same seed and action sequence must converge on
/// the same digest; tests use this to pin determinism.
#[cfg(feature = "serde")]
pub fn state_digest(state: &BattleState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}
