//! Errors surfaced at the battle service boundary.
//!
//! Everything here is an *expected* validation failure: the caller receives
//! the error and the original state stays untouched. Invariant violations
//! (negative HP, mana over the pool) are bugs, asserted in debug builds and
//! traced in release builds, never returned.

use crate::env::OracleError;
use crate::mana::ManaError;
use crate::state::types::common::{AbilityId, DjinnId, UnitId};
use crate::state::types::team::TeamError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("no enemies to fight")]
    NoEnemies,

    #[error("unknown unit: {0}")]
    UnknownUnit(UnitId),

    #[error("unknown ability: {0}")]
    UnknownAbility(AbilityId),

    #[error("{unit} has not unlocked {ability}")]
    AbilityNotUnlocked { unit: UnitId, ability: AbilityId },

    #[error("{0} is knocked out and cannot act")]
    UnitKnockedOut(UnitId),

    #[error("{0} is knocked out and cannot be targeted")]
    TargetKnockedOut(UnitId),

    #[error("an action needs at least one target")]
    NoTargets,

    #[error("not enough mana: need {needed}, have {available}")]
    InsufficientMana { needed: u32, available: u32 },

    #[error("battle is already over")]
    BattleOver,

    #[error("operation requires the planning phase")]
    NotPlanning,

    #[error("operation requires queue mode")]
    NotQueueMode,

    #[error("operation requires turn mode")]
    NotTurnMode,

    #[error("round queue is incomplete")]
    QueueIncomplete,

    #[error("it is not {0}'s turn")]
    NotCurrentActor(UnitId),

    #[error("djinn {0} is already queued")]
    DjinnAlreadyQueued(DjinnId),

    #[error("djinn {0} is not queued")]
    DjinnNotQueued(DjinnId),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Mana(#[from] ManaError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
