//! Legacy per-unit-turn mode: one action per call, explicit turn advance.

use crate::mana::{ability_mana_cost, team_mana_pool};
use crate::order::calculate_turn_order;
use crate::state::types::common::UnitId;
use crate::state::types::unit::Unit;
use crate::state::BattleState;

use super::errors::BattleError;
use super::events::BattleEvent;
use super::resolve::{check_battle_end, djinn_recovery_step, resolve_action, tick_all};
use super::{BattleOutcome, BattleService};

impl BattleService<'_> {
    /// Executes one action for the current actor.
    ///
    /// Validation failures return the error with the caller's state
    /// untouched; on success the returned state has the full damage/status/
    /// mana pipeline applied.
    pub fn perform_action(
        &self,
        state: &BattleState,
        actor_id: &str,
        ability_id: Option<&str>,
        target_ids: &[UnitId],
    ) -> Result<BattleOutcome, BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleOver);
        }
        let turn = state.turn().ok_or(BattleError::NotTurnMode)?;

        let actor = state
            .unit(actor_id)
            .ok_or_else(|| BattleError::UnknownUnit(actor_id.to_string()))?;
        if actor.is_ko() {
            return Err(BattleError::UnitKnockedOut(actor_id.to_string()));
        }
        if turn.turn_order.get(turn.current_actor_index).map(String::as_str) != Some(actor_id) {
            return Err(BattleError::NotCurrentActor(actor_id.to_string()));
        }

        let ability = match ability_id {
            Some(id) => {
                let def = self
                    .env()
                    .abilities()?
                    .ability(id)
                    .ok_or_else(|| BattleError::UnknownAbility(id.to_string()))?;
                if !actor.has_unlocked(id) {
                    return Err(BattleError::AbilityNotUnlocked {
                        unit: actor_id.to_string(),
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
        for target_id in target_ids {
            let target = state
                .unit(target_id)
                .ok_or_else(|| BattleError::UnknownUnit(target_id.clone()))?;
            if target.is_ko() && !allows_ko_target {
                return Err(BattleError::TargetKnockedOut(target_id.clone()));
            }
        }

        // Only the player side draws on the team mana pool.
        let is_player = state.player_team.contains(actor_id);
        let cost = if is_player {
            let cost = ability_mana_cost(ability_id, ability)?;
            if cost > state.remaining_mana {
                return Err(BattleError::InsufficientMana {
                    needed: cost,
                    available: state.remaining_mana,
                });
            }
            cost
        } else {
            0
        };

        let mut work = state.clone();
        let mut events = Vec::new();
        if cost > 0 {
            work.remaining_mana -= cost;
            events.push(BattleEvent::ManaSpent {
                amount: cost,
                remaining: work.remaining_mana,
            });
        }

        resolve_action(
            &mut work,
            self.env(),
            self.config(),
            actor_id,
            ability_id,
            target_ids,
            &mut events,
        )?;
        check_battle_end(&mut work, &mut events);

        self.assert_invariants(&work);
        for event in &events {
            work.log.push(event.to_string());
        }
        Ok(BattleOutcome {
            state: work,
            events,
        })
    }

    /// Advances the turn pointer past the current actor, skipping KO'd
    /// units. Wrapping a full round ticks statuses, steps Djinn recovery,
    /// recharges the mana pool, and recomputes turn order.
    pub fn end_turn(&self, state: &BattleState) -> Result<BattleOutcome, BattleError> {
        if state.is_over() {
            return Err(BattleError::BattleOver);
        }
        let turn = state.turn().ok_or(BattleError::NotTurnMode)?;

        let mut work = state.clone();
        let mut events = Vec::new();

        let order = turn.turn_order.clone();
        let mut next = turn.current_actor_index + 1;
        while next < order.len()
            && work.unit(&order[next]).is_none_or(Unit::is_ko)
        {
            next += 1;
        }

        if next < order.len() {
            work.turn_mut().expect("turn mode").current_actor_index = next;
        } else {
            // Round wrap
            work.current_turn += 1;
            work.player_team.current_turn = work.current_turn;
            work.round_number += 1;

            tick_all(&mut work, self.env(), &mut events)?;
            check_battle_end(&mut work, &mut events);
            djinn_recovery_step(&mut work, self.env(), &mut events)?;

            work.max_mana = team_mana_pool(&work.player_team);
            work.remaining_mana = work.max_mana;

            if !work.is_over() {
                let team = work.player_team.clone();
                let new_order: Vec<UnitId> = {
                    let units: Vec<&Unit> = work.all_units().collect();
                    calculate_turn_order(&units, &team, self.env(), work.seed, work.current_turn)?
                };
                let turn = work.turn_mut().expect("turn mode");
                turn.turn_order = new_order;
                turn.current_actor_index = 0;
                events.push(BattleEvent::RoundStarted {
                    round: work.round_number,
                });
            }
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
