//! Battle orchestration.
//!
//! `BattleService` is the authoritative reducer for [`BattleState`]: every
//! mutation flows through it and follows the same contract — validate
//! against the caller's snapshot, apply to a private clone, publish the
//! clone wholesale. Any `Err` therefore leaves the caller's state exactly as
//! it was; no partial mutation is ever observable.

mod errors;
mod events;
mod resolve;
mod round;
mod turn;

pub use errors::BattleError;
pub use events::{BattleEvent, SkipReason};

use crate::config::BattleConfig;
use crate::djinn::merge_djinn_abilities_into_unit;
use crate::env::BattleEnv;
use crate::mana::{ability_mana_cost, team_mana_pool};
use crate::order::calculate_turn_order;
use crate::state::types::common::UnitId;
use crate::state::types::team::{DjinnState, Team};
use crate::state::types::unit::Unit;
use crate::state::{
    BattleMetadata, BattleMode, BattlePhase, BattleState, BattleStatus, QueueMode, QueuedAction,
    TurnMode, empty_queue,
};

/// A published transition: the next state plus the ordered events that
/// produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleOutcome {
    pub state: BattleState,
    pub events: Vec<BattleEvent>,
}

/// Stateless battle reducer over an injected oracle environment.
pub struct BattleService<'a> {
    env: BattleEnv<'a>,
    config: BattleConfig,
}

impl<'a> BattleService<'a> {
    pub fn new(env: BattleEnv<'a>) -> Self {
        Self {
            env,
            config: BattleConfig::default(),
        }
    }

    pub fn with_config(env: BattleEnv<'a>, config: BattleConfig) -> Self {
        Self { env, config }
    }

    fn env(&self) -> &BattleEnv<'a> {
        &self.env
    }

    fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Starts a round-based (queued) battle.
    ///
    /// Djinn-granted abilities are merged into every party member, battle
    /// counters reset, and the mana pool derived from unit contributions.
    pub fn start_battle(
        &self,
        team: Team,
        enemies: Vec<Unit>,
        seed: u64,
        meta: BattleMetadata,
    ) -> Result<BattleState, BattleError> {
        let (team, enemies) = self.prepare_combatants(team, enemies)?;
        let max_mana = team_mana_pool(&team);
        let team_size = team.units().len();

        tracing::debug!(seed, units = team_size, enemies = enemies.len(), "battle started");

        Ok(BattleState {
            seed,
            player_team: team,
            enemies,
            mode: BattleMode::Queue(QueueMode {
                phase: BattlePhase::Planning,
                queued_actions: empty_queue(team_size),
                queued_djinn: Vec::new(),
                execution_index: 0,
            }),
            status: BattleStatus::Ongoing,
            current_turn: 0,
            round_number: 1,
            remaining_mana: max_mana,
            max_mana,
            djinn_recovery_timers: std::collections::BTreeMap::new(),
            log: Vec::new(),
            meta,
        })
    }

    /// Starts a legacy per-unit-turn battle with a precomputed turn order.
    pub fn start_turn_based(
        &self,
        team: Team,
        enemies: Vec<Unit>,
        seed: u64,
        meta: BattleMetadata,
    ) -> Result<BattleState, BattleError> {
        let (team, enemies) = self.prepare_combatants(team, enemies)?;
        let max_mana = team_mana_pool(&team);

        let turn_order = {
            let units: Vec<&Unit> = team.units().iter().chain(enemies.iter()).collect();
            calculate_turn_order(&units, &team, &self.env, seed, 0)?
        };

        Ok(BattleState {
            seed,
            player_team: team,
            enemies,
            mode: BattleMode::Turn(TurnMode {
                turn_order,
                current_actor_index: 0,
            }),
            status: BattleStatus::Ongoing,
            current_turn: 0,
            round_number: 1,
            remaining_mana: max_mana,
            max_mana,
            djinn_recovery_timers: std::collections::BTreeMap::new(),
            log: Vec::new(),
            meta,
        })
    }

    fn prepare_combatants(
        &self,
        team: Team,
        enemies: Vec<Unit>,
    ) -> Result<(Team, Vec<Unit>), BattleError> {
        if enemies.is_empty() {
            return Err(BattleError::NoEnemies);
        }

        let mut units = Vec::with_capacity(team.units().len());
        for unit in team.units() {
            let merged = merge_djinn_abilities_into_unit(unit, &team, &self.env)?;
            units.push(merged.with_reset_counters());
        }
        let team = team.with_units(units)?;
        let enemies = enemies.iter().map(Unit::with_reset_counters).collect();
        Ok((team, enemies))
    }

    // ========================================================================
    // Planning-phase queue management
    // ========================================================================

    /// Queues (or replaces) one unit's action for this round, deducting its
    /// mana cost immediately. Replacing a queued action refunds the old
    /// cost first.
    pub fn queue_action(
        &self,
        state: &BattleState,
        unit_id: &str,
        ability_id: Option<&str>,
        target_ids: Vec<UnitId>,
    ) -> Result<BattleState, BattleError> {
        let queue = self.planning_queue(state)?;

        let slot = state
            .player_team
            .units()
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| BattleError::UnknownUnit(unit_id.to_string()))?;
        let unit = &state.player_team.units()[slot];
        if unit.is_ko() {
            return Err(BattleError::UnitKnockedOut(unit_id.to_string()));
        }

        let ability = match ability_id {
            Some(id) => {
                let def = self
                    .env
                    .abilities()?
                    .ability(id)
                    .ok_or_else(|| BattleError::UnknownAbility(id.to_string()))?;
                if !unit.has_unlocked(id) {
                    return Err(BattleError::AbilityNotUnlocked {
                        unit: unit_id.to_string(),
                        ability: id.to_string(),
                    });
                }
                Some(def)
            }
            None => None,
        };

        if target_ids.is_empty() {
            return Err(BattleError::NoTargets);
        }
        let allows_ko_target = ability.is_some_and(|a| a.revives_fallen);
        for target_id in &target_ids {
            let target = state
                .unit(target_id)
                .ok_or_else(|| BattleError::UnknownUnit(target_id.clone()))?;
            if target.is_ko() && !allows_ko_target {
                return Err(BattleError::TargetKnockedOut(target_id.clone()));
            }
        }

        let cost = ability_mana_cost(ability_id, ability)?;
        let refund = queue.queued_actions[slot]
            .as_ref()
            .map_or(0, |action| action.mana_cost);
        let available = state.remaining_mana + refund;
        if cost > available {
            return Err(BattleError::InsufficientMana {
                needed: cost,
                available,
            });
        }

        let mut work = state.clone();
        work.remaining_mana = available - cost;
        let queue = work.queue_mut().expect("queue mode");
        queue.queued_actions[slot] = Some(QueuedAction {
            unit_id: unit_id.to_string(),
            ability_id: ability_id.map(String::from),
            target_ids,
            mana_cost: cost,
        });
        Ok(work)
    }

    /// Clears one unit's queued action, refunding its mana cost.
    pub fn clear_queued_action(
        &self,
        state: &BattleState,
        unit_id: &str,
    ) -> Result<BattleState, BattleError> {
        let queue = self.planning_queue(state)?;

        let slot = state
            .player_team
            .units()
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| BattleError::UnknownUnit(unit_id.to_string()))?;
        let refund = queue.queued_actions[slot]
            .as_ref()
            .map_or(0, |action| action.mana_cost);

        let mut work = state.clone();
        work.remaining_mana += refund;
        work.queue_mut().expect("queue mode").queued_actions[slot] = None;
        Ok(work)
    }

    /// Marks an equipped, Set Djinn for activation this round.
    pub fn queue_djinn(
        &self,
        state: &BattleState,
        djinn_id: &str,
    ) -> Result<BattleState, BattleError> {
        let queue = self.planning_queue(state)?;

        if queue.queued_djinn.iter().any(|id| id == djinn_id) {
            return Err(BattleError::DjinnAlreadyQueued(djinn_id.to_string()));
        }
        if !state
            .player_team
            .equipped_djinn()
            .iter()
            .any(|id| id == djinn_id)
        {
            return Err(crate::state::TeamError::DjinnNotEquipped(djinn_id.to_string()).into());
        }
        match state.player_team.djinn_state(djinn_id) {
            Some(DjinnState::Set) => {}
            Some(other) => {
                return Err(crate::state::TeamError::DjinnNotSet {
                    id: djinn_id.to_string(),
                    state: other,
                }
                .into());
            }
            None => {
                return Err(crate::state::TeamError::DjinnNotEquipped(djinn_id.to_string()).into());
            }
        }

        let mut work = state.clone();
        work.queue_mut()
            .expect("queue mode")
            .queued_djinn
            .push(djinn_id.to_string());
        Ok(work)
    }

    /// Unmarks a Djinn queued for activation.
    pub fn unqueue_djinn(
        &self,
        state: &BattleState,
        djinn_id: &str,
    ) -> Result<BattleState, BattleError> {
        let queue = self.planning_queue(state)?;

        if !queue.queued_djinn.iter().any(|id| id == djinn_id) {
            return Err(BattleError::DjinnNotQueued(djinn_id.to_string()));
        }

        let mut work = state.clone();
        work.queue_mut()
            .expect("queue mode")
            .queued_djinn
            .retain(|id| id != djinn_id);
        Ok(work)
    }

    /// Shared planning-phase guard for queue operations.
    fn planning_queue<'s>(&self, state: &'s BattleState) -> Result<&'s QueueMode, BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleOver);
        }
        let queue = state.queue().ok_or(BattleError::NotQueueMode)?;
        if queue.phase != BattlePhase::Planning {
            return Err(BattleError::NotPlanning);
        }
        Ok(queue)
    }

    /// Debug-build invariant sweep; release builds trace instead of
    /// panicking so a defect is recorded rather than hidden.
    fn assert_invariants(&self, state: &BattleState) {
        let mana_ok = state.remaining_mana <= state.max_mana;
        let hp_ok = state
            .all_units()
            .all(|u| u.current_hp >= 0 && u.current_hp <= u.max_hp());
        let queue_ok = state
            .queue()
            .is_none_or(|q| q.queued_actions.len() == state.player_team.units().len());

        if !(mana_ok && hp_ok && queue_ok) {
            tracing::error!(
                mana_ok,
                hp_ok,
                queue_ok,
                round = state.round_number,
                "battle state invariant violated"
            );
            debug_assert!(mana_ok, "remaining mana exceeds pool");
            debug_assert!(hp_ok, "unit hp out of [0, max_hp]");
            debug_assert!(queue_ok, "queue length differs from team size");
        }
    }
}
