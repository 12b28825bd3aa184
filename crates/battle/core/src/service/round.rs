//! Queued-round resolution: the executing phase of the round-based mode.

use crate::env::{CTX_ENEMY_TARGET, compute_seed, unit_key};
use crate::mana::{is_queue_complete, team_mana_pool};
use crate::order::calculate_turn_order;
use crate::state::types::common::UnitId;
use crate::state::types::unit::Unit;
use crate::state::{BattlePhase, BattleState, Side, empty_queue};

use super::errors::BattleError;
use super::events::BattleEvent;
use super::resolve::{
    check_battle_end, djinn_recovery_step, resolve_action, resolve_unleash, tick_all,
};
use super::{BattleOutcome, BattleService};

impl BattleService<'_> {
    /// Resolves every queued action in turn order, then status ticks and
    /// Djinn recovery, and returns the next state with its event stream.
    ///
    /// Requires a complete queue (every living unit's slot filled). Mana was
    /// already deducted at queue time, so execution spends no further mana.
    pub fn execute_queued_round(
        &self,
        state: &BattleState,
    ) -> Result<BattleOutcome, BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleOver);
        }
        let queue = state.queue().ok_or(BattleError::NotQueueMode)?;
        if queue.phase != BattlePhase::Planning {
            return Err(BattleError::NotPlanning);
        }
        if !is_queue_complete(&queue.queued_actions, &state.player_team)? {
            return Err(BattleError::QueueIncomplete);
        }

        let env = self.env();
        let queued_djinn = queue.queued_djinn.clone();
        let queued_actions = queue.queued_actions.clone();

        let mut work = state.clone();
        let mut events = vec![BattleEvent::RoundStarted {
            round: work.round_number,
        }];
        work.queue_mut().expect("queue mode").phase = BattlePhase::Executing;

        tracing::debug!(
            round = work.round_number,
            actions = queued_actions.iter().flatten().count(),
            djinn = queued_djinn.len(),
            "executing queued round"
        );

        // Djinn unleashes fire before any unit acts.
        for djinn_id in &queued_djinn {
            if work.is_over() {
                break;
            }
            work.player_team = work.player_team.activate_djinn(djinn_id, work.current_turn)?;
            events.push(BattleEvent::DjinnActivated {
                djinn: djinn_id.clone(),
            });
            resolve_unleash(&mut work, env, djinn_id, &mut events)?;
            check_battle_end(&mut work, &mut events);
        }

        // Units act in speed order; players consume their queued actions,
        // enemies pick a seeded basic-attack target.
        if !work.is_over() {
            let team = work.player_team.clone();
            let order: Vec<UnitId> = {
                let units: Vec<&Unit> = work.all_units().collect();
                calculate_turn_order(&units, &team, env, work.seed, work.round_number)?
            };
            let index = work.build_index();

            for unit_id in &order {
                if work.is_over() {
                    break;
                }
                let Some(slot) = index.get(unit_id) else {
                    continue;
                };

                match slot.side {
                    Side::Player => {
                        let position = work
                            .player_team
                            .units()
                            .iter()
                            .position(|u| u.id == *unit_id);
                        let Some(position) = position else { continue };
                        if let Some(queue) = work.queue_mut() {
                            queue.execution_index = position;
                        }
                        let Some(action) = queued_actions.get(position).cloned().flatten() else {
                            continue;
                        };
                        resolve_action(
                            &mut work,
                            env,
                            self.config(),
                            unit_id,
                            action.ability_id.as_deref(),
                            &action.target_ids,
                            &mut events,
                        )?;
                    }
                    Side::Enemy => {
                        if work.unit(unit_id).is_none_or(Unit::is_ko) {
                            continue;
                        }
                        let players: Vec<UnitId> =
                            work.living_players().map(|u| u.id.clone()).collect();
                        if players.is_empty() {
                            break;
                        }
                        let pick = env.rng()?.pick(
                            compute_seed(
                                work.seed,
                                work.round_number as u64,
                                unit_key(unit_id),
                                CTX_ENEMY_TARGET,
                            ),
                            players.len(),
                        );
                        resolve_action(
                            &mut work,
                            env,
                            self.config(),
                            unit_id,
                            None,
                            &[players[pick].clone()],
                            &mut events,
                        )?;
                    }
                }
                check_battle_end(&mut work, &mut events);
            }
        }

        // End-of-round upkeep: status ticks, then the Djinn recovery cycle.
        if !work.is_over() {
            tick_all(&mut work, env, &mut events)?;
            check_battle_end(&mut work, &mut events);
        }
        djinn_recovery_step(&mut work, env, &mut events)?;

        work.current_turn += 1;
        work.player_team.current_turn = work.current_turn;

        if !work.is_over() {
            work.round_number += 1;
            let team_size = work.player_team.units().len();
            let queue = work.queue_mut().expect("queue mode");
            queue.phase = BattlePhase::Planning;
            queue.queued_actions = empty_queue(team_size);
            queue.queued_djinn.clear();
            queue.execution_index = 0;
            // Mana circles recharge between rounds.
            work.max_mana = team_mana_pool(&work.player_team);
            work.remaining_mana = work.max_mana;
        }

        self.assert_invariants(&work);
        for event in &events {
            work.log.push(event.to_string());
        }
        Ok(BattleOutcome {
            state: work,
            events,
        })
    }
}
