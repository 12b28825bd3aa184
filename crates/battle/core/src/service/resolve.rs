//! Shared resolution primitives used by both battle modes.

use crate::combat::{
    apply_damage_modifiers, apply_damage_with_shields, apply_healing, calculate_physical_damage,
    calculate_psynergy_damage, revive_fallen,
};
use crate::config::BattleConfig;
use crate::env::{AbilityDefinition, AbilityKind, AbilitySource, BattleEnv, Targeting, UnleashKind};
use crate::state::types::common::UnitId;
use crate::state::types::status::{CleanseScope, StatusEffect};
use crate::state::types::team::DjinnTracker;
use crate::state::{BattlePhase, BattleState, BattleStatus};
use crate::status::{apply_status, cleanse, is_blocked_from_acting, tick_statuses};

use super::errors::BattleError;
use super::events::{BattleEvent, SkipReason};

/// The free basic attack is a synthetic zero-power physical ability; damage
/// comes entirely from ATK vs DEF.
fn basic_attack() -> AbilityDefinition {
    AbilityDefinition {
        id: "basic-attack".to_string(),
        name: "Attack".to_string(),
        kind: AbilityKind::Physical,
        targeting: Targeting::SingleEnemy,
        element: None,
        base_power: 0,
        mana_cost: 0,
        unlock_level: 0,
        source: AbilitySource::Innate,
        splash_factor: None,
        applies: Vec::new(),
        cleanse: None,
        revives_fallen: false,
    }
}

/// Resolves one action against the working state, appending events.
///
/// Assumes boundary validation already ran. A KO'd or crowd-controlled actor
/// consumes the action with a skip event rather than an error: both are
/// legal battle outcomes, not caller mistakes.
pub(super) fn resolve_action(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    actor_id: &str,
    ability_id: Option<&str>,
    target_ids: &[UnitId],
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let actor = state
        .unit(actor_id)
        .cloned()
        .ok_or_else(|| BattleError::UnknownUnit(actor_id.to_string()))?;

    if actor.is_ko() {
        events.push(BattleEvent::ActionSkipped {
            unit: actor_id.to_string(),
            reason: SkipReason::KnockedOut,
        });
        return Ok(());
    }
    if is_blocked_from_acting(&actor) {
        events.push(BattleEvent::ActionSkipped {
            unit: actor_id.to_string(),
            reason: SkipReason::CrowdControl,
        });
        return Ok(());
    }

    let basic;
    let ability = match ability_id {
        Some(id) => env
            .abilities()?
            .ability(id)
            .ok_or_else(|| BattleError::UnknownAbility(id.to_string()))?,
        None => {
            basic = basic_attack();
            &basic
        }
    };

    events.push(BattleEvent::AbilityUsed {
        actor: actor_id.to_string(),
        ability: ability_id.map(String::from),
    });

    match ability.kind {
        AbilityKind::Physical | AbilityKind::Psynergy => {
            resolve_strike(state, env, actor_id, ability, target_ids, events)?;
        }
        AbilityKind::Healing => {
            resolve_heal(state, env, config, actor_id, ability, target_ids, events)?;
        }
        AbilityKind::Buff | AbilityKind::Debuff => {
            for target_id in target_ids {
                if state.unit(target_id).is_some_and(|t| !t.is_ko()) {
                    apply_ability_statuses(state, target_id, &ability.applies, events);
                }
            }
        }
        AbilityKind::Cleanse => {
            let scope = ability.cleanse.clone().unwrap_or(CleanseScope::Negative);
            for target_id in target_ids {
                let Some(target) = state.unit(target_id).cloned() else {
                    continue;
                };
                let (cleansed, removed) = cleanse(&target, &scope);
                if !removed.is_empty() {
                    *state.unit_mut(target_id).expect("target exists") = cleansed;
                    events.push(BattleEvent::Cleansed {
                        target: target_id.clone(),
                        kinds: removed,
                    });
                }
            }
        }
    }

    if let Some(unit) = state.unit_mut(actor_id) {
        unit.counters.actions_taken += 1;
    }
    Ok(())
}

fn resolve_strike(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    actor_id: &str,
    ability: &AbilityDefinition,
    target_ids: &[UnitId],
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let team = state.player_team.clone();
    let attacker = state
        .unit(actor_id)
        .cloned()
        .ok_or_else(|| BattleError::UnknownUnit(actor_id.to_string()))?;

    let mut total_dealt: u32 = 0;
    for (position, target_id) in target_ids.iter().enumerate() {
        let Some(target) = state.unit(target_id).cloned() else {
            continue;
        };
        if target.is_ko() {
            continue;
        }

        let mut base = match ability.kind {
            AbilityKind::Physical => {
                calculate_physical_damage(&attacker, &target, &team, ability, env)?
            }
            _ => calculate_psynergy_damage(&attacker, &target, &team, ability, env)?,
        };
        // Secondary targets take splash damage, still run through the full
        // modifier and shield pipeline below.
        if position > 0 {
            if let Some(factor) = ability.splash_factor {
                base = (base as f64 * factor).round() as i32;
            }
        }

        let modified = apply_damage_modifiers(base as f64, ability.element, &target).round() as i32;
        let application = apply_damage_with_shields(&target, modified);

        events.push(BattleEvent::Hit {
            actor: actor_id.to_string(),
            target: target_id.clone(),
            amount: application.actual_damage,
            blocked: application.blocked_by,
        });
        total_dealt += application.actual_damage.max(0) as u32;

        let auto_revived = application.auto_revived;
        let blocked = application.blocked_by.is_some();
        let final_hp = application.unit.current_hp;
        let is_ko = application.unit.is_ko();
        *state.unit_mut(target_id).expect("target exists") = application.unit;

        if auto_revived {
            events.push(BattleEvent::AutoRevived {
                unit: target_id.clone(),
                hp: final_hp,
            });
        }
        if is_ko {
            events.push(BattleEvent::KnockedOut {
                unit: target_id.clone(),
            });
        }
        if !blocked && !is_ko {
            apply_ability_statuses(state, target_id, &ability.applies, events);
        }
    }

    if let Some(unit) = state.unit_mut(actor_id) {
        unit.counters.damage_dealt += total_dealt;
    }
    Ok(())
}

fn resolve_heal(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    config: &BattleConfig,
    actor_id: &str,
    ability: &AbilityDefinition,
    target_ids: &[UnitId],
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let team = state.player_team.clone();
    let caster = state
        .unit(actor_id)
        .cloned()
        .ok_or_else(|| BattleError::UnknownUnit(actor_id.to_string()))?;
    let mag = crate::stats::effective_stats(&caster, Some(&team), env)?.mag;
    let amount = (ability.base_power + mag).max(0);

    for target_id in target_ids {
        let Some(target) = state.unit(target_id).cloned() else {
            continue;
        };

        if target.is_ko() {
            if ability.revives_fallen {
                let (revived, hp) = revive_fallen(&target, config.revive_fraction);
                *state.unit_mut(target_id).expect("target exists") = revived;
                events.push(BattleEvent::Revived {
                    actor: actor_id.to_string(),
                    target: target_id.clone(),
                    hp,
                });
            }
            continue;
        }

        let (healed, restored) = apply_healing(&target, amount);
        *state.unit_mut(target_id).expect("target exists") = healed;
        events.push(BattleEvent::Healed {
            actor: actor_id.to_string(),
            target: target_id.clone(),
            amount: restored,
        });
        apply_ability_statuses(state, target_id, &ability.applies, events);
    }
    Ok(())
}

fn apply_ability_statuses(
    state: &mut BattleState,
    target_id: &str,
    applies: &[StatusEffect],
    events: &mut Vec<BattleEvent>,
) {
    for template in applies {
        let Some(target) = state.unit(target_id).cloned() else {
            return;
        };
        let (updated, applied) = apply_status(&target, template.clone());
        *state.unit_mut(target_id).expect("target exists") = updated;
        events.push(if applied {
            BattleEvent::StatusApplied {
                target: target_id.to_string(),
                kind: template.kind(),
            }
        } else {
            BattleEvent::StatusResisted {
                target: target_id.to_string(),
                kind: template.kind(),
            }
        });
    }
}

/// Resolves a queued Djinn's unleash effect.
pub(super) fn resolve_unleash(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    djinn_id: &str,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let Some(def) = env.djinn()?.djinn(djinn_id) else {
        return Ok(());
    };
    let unleash = def.unleash.clone();
    let element = def.element;

    let target_ids: Vec<UnitId> = match unleash.targeting {
        Targeting::AllEnemies => state.living_enemies().map(|u| u.id.clone()).collect(),
        Targeting::SingleEnemy => state
            .living_enemies()
            .next()
            .map(|u| u.id.clone())
            .into_iter()
            .collect(),
        Targeting::AllAllies => state.living_players().map(|u| u.id.clone()).collect(),
        Targeting::SingleAlly => state
            .living_players()
            .next()
            .map(|u| u.id.clone())
            .into_iter()
            .collect(),
    };

    for target_id in &target_ids {
        let Some(target) = state.unit(target_id).cloned() else {
            continue;
        };
        match unleash.kind {
            UnleashKind::Damage => {
                let modified =
                    apply_damage_modifiers(unleash.base_power as f64, Some(element), &target)
                        .round() as i32;
                let application = apply_damage_with_shields(&target, modified);
                events.push(BattleEvent::Hit {
                    actor: djinn_id.to_string(),
                    target: target_id.clone(),
                    amount: application.actual_damage,
                    blocked: application.blocked_by,
                });
                let auto_revived = application.auto_revived;
                let final_hp = application.unit.current_hp;
                let is_ko = application.unit.is_ko();
                *state.unit_mut(target_id).expect("target exists") = application.unit;
                if auto_revived {
                    events.push(BattleEvent::AutoRevived {
                        unit: target_id.clone(),
                        hp: final_hp,
                    });
                }
                if is_ko {
                    events.push(BattleEvent::KnockedOut {
                        unit: target_id.clone(),
                    });
                }
            }
            UnleashKind::Heal => {
                let (healed, restored) = apply_healing(&target, unleash.base_power);
                *state.unit_mut(target_id).expect("target exists") = healed;
                events.push(BattleEvent::Healed {
                    actor: djinn_id.to_string(),
                    target: target_id.clone(),
                    amount: restored,
                });
            }
        }
        apply_ability_statuses(state, target_id, &unleash.applies, events);
    }
    Ok(())
}

/// Ticks statuses on every living combatant, players first.
pub(super) fn tick_all(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let tables = env.tables()?.status();
    let rng = env.rng()?;

    let ids: Vec<UnitId> = state.all_units().map(|u| u.id.clone()).collect();
    for id in ids {
        let Some(unit) = state.unit(&id) else {
            continue;
        };
        if unit.is_ko() {
            continue;
        }

        let outcome = tick_statuses(unit, tables, rng);
        for delta in &outcome.deltas {
            events.push(match delta {
                crate::status::TickDelta::Damage { kind, amount } => BattleEvent::StatusTick {
                    target: id.clone(),
                    kind: *kind,
                    amount: *amount,
                },
                crate::status::TickDelta::Heal { amount } => BattleEvent::StatusHealed {
                    target: id.clone(),
                    amount: *amount,
                },
            });
        }
        if outcome.auto_revived {
            events.push(BattleEvent::AutoRevived {
                unit: id.clone(),
                hp: outcome.unit.current_hp,
            });
        }
        if outcome.unit.is_ko() {
            events.push(BattleEvent::KnockedOut { unit: id.clone() });
        }
        for kind in &outcome.expired {
            events.push(BattleEvent::StatusExpired {
                target: id.clone(),
                kind: *kind,
            });
        }
        *state.unit_mut(&id).expect("unit exists") = outcome.unit;
    }
    Ok(())
}

/// Steps the Djinn recovery cycle at round end: Recovery timers count down
/// (0 → Set), then this round's Standby activations enter Recovery.
pub(super) fn djinn_recovery_step(
    state: &mut BattleState,
    env: &BattleEnv<'_>,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let tables = env.tables()?.djinn();

    let mut recovered = Vec::new();
    for (id, turns) in state.djinn_recovery_timers.iter_mut() {
        *turns = turns.saturating_sub(1);
        if *turns == 0 {
            recovered.push(id.clone());
        }
    }
    for id in &recovered {
        state.djinn_recovery_timers.remove(id);
        state.player_team = state.player_team.with_tracker(id, DjinnTracker::set());
        events.push(BattleEvent::DjinnRecovered { djinn: id.clone() });
    }

    let standby: Vec<String> = state
        .player_team
        .equipped_djinn()
        .iter()
        .filter(|id| {
            state.player_team.djinn_state(id) == Some(crate::state::DjinnState::Standby)
        })
        .cloned()
        .collect();
    for id in standby {
        let last_activated_turn = state
            .player_team
            .tracker(&id)
            .and_then(|t| t.last_activated_turn);
        state.player_team = state.player_team.with_tracker(
            &id,
            DjinnTracker {
                state: crate::state::DjinnState::Recovery,
                last_activated_turn,
            },
        );
        state.djinn_recovery_timers.insert(id, tables.recovery_turns);
    }
    Ok(())
}

/// Applies the terminal status when one side is wiped. Returns true when the
/// battle is over (including already-terminal states).
pub(super) fn check_battle_end(state: &mut BattleState, events: &mut Vec<BattleEvent>) -> bool {
    if state.is_over() {
        return true;
    }

    let enemies_down = state.living_enemies().next().is_none();
    let players_down = state.living_players().next().is_none();
    let status = if enemies_down {
        BattleStatus::PlayerVictory
    } else if players_down {
        BattleStatus::PlayerDefeat
    } else {
        return false;
    };

    state.status = status;
    if let Some(queue) = state.queue_mut() {
        queue.phase = if enemies_down {
            BattlePhase::Victory
        } else {
            BattlePhase::Defeat
        };
    }
    events.push(BattleEvent::BattleEnded { status });
    true
}
