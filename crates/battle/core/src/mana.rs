//! Team mana ledger.
//!
//! Mana is a team-wide pool: each unit contributes a fixed amount
//! (`mana_contribution`, never stat-derived), planning deducts queued costs
//! immediately, and the pool re-derives to its maximum at every planning
//! phase.

use crate::config::BattleConfig;
use crate::env::AbilityDefinition;
use crate::state::QueuedAction;
use crate::state::types::team::Team;

/// Mana bookkeeping failures. These are caller mistakes, surfaced as errors
/// rather than panics.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ManaError {
    #[error("ability {0} not found")]
    UnknownAbility(String),

    #[error("team size must be between 1 and 4, got {0}")]
    InvalidTeamSize(usize),
}

/// Total mana pool from unit contributions.
pub fn team_mana_pool(team: &Team) -> u32 {
    team.units().iter().map(|u| u.mana_contribution).sum()
}

/// Cost of an action: basic attacks (`None`) are free; abilities cost their
/// definition's `mana_cost`. A non-null id without a definition is an error.
pub fn ability_mana_cost(
    ability_id: Option<&str>,
    ability: Option<&AbilityDefinition>,
) -> Result<u32, ManaError> {
    match ability_id {
        None => Ok(0),
        Some(id) => ability
            .map(|def| def.mana_cost)
            .ok_or_else(|| ManaError::UnknownAbility(id.to_string())),
    }
}

/// Sum of costs across filled queue slots.
pub fn total_queued_cost(queue: &[Option<QueuedAction>]) -> u32 {
    queue
        .iter()
        .flatten()
        .map(|action| action.mana_cost)
        .sum()
}

/// True when every queued cost fits in the remaining pool.
pub fn validate_queued_actions(remaining_mana: u32, queue: &[Option<QueuedAction>]) -> bool {
    total_queued_cost(queue) <= remaining_mana
}

/// True when the queue is sized to the team and every living unit's slot is
/// filled. KO'd units are excused.
pub fn is_queue_complete(queue: &[Option<QueuedAction>], team: &Team) -> Result<bool, ManaError> {
    let team_size = team.units().len();
    if team_size < BattleConfig::MIN_TEAM_UNITS || team_size > BattleConfig::MAX_TEAM_UNITS {
        return Err(ManaError::InvalidTeamSize(team_size));
    }
    if queue.len() != team_size {
        return Ok(false);
    }

    Ok(team
        .units()
        .iter()
        .zip(queue.iter())
        .all(|(unit, slot)| unit.is_ko() || slot.is_some()))
}
