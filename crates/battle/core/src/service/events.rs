//! Typed battle events.
//!
//! Every state-changing step of a resolution emits one event, in order. The
//! UI replays them for animation pacing; the service also renders each into
//! a log line appended to `BattleState::log`.

use std::fmt;

use crate::combat::BlockSource;
use crate::state::{BattleStatus, StatusKind};
use crate::state::types::common::{AbilityId, DjinnId, UnitId};

/// Why a scheduled action did not resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    KnockedOut,
    CrowdControl,
}

/// One entry of the ordered battle event stream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    RoundStarted {
        round: u32,
    },
    AbilityUsed {
        actor: UnitId,
        /// `None` is the basic attack.
        ability: Option<AbilityId>,
    },
    ActionSkipped {
        unit: UnitId,
        reason: SkipReason,
    },
    Hit {
        actor: UnitId,
        target: UnitId,
        amount: i32,
        blocked: Option<BlockSource>,
    },
    Healed {
        actor: UnitId,
        target: UnitId,
        amount: i32,
    },
    Revived {
        actor: UnitId,
        target: UnitId,
        hp: i32,
    },
    StatusApplied {
        target: UnitId,
        kind: StatusKind,
    },
    StatusResisted {
        target: UnitId,
        kind: StatusKind,
    },
    StatusTick {
        target: UnitId,
        kind: StatusKind,
        amount: i32,
    },
    StatusHealed {
        target: UnitId,
        amount: i32,
    },
    StatusExpired {
        target: UnitId,
        kind: StatusKind,
    },
    Cleansed {
        target: UnitId,
        kinds: Vec<StatusKind>,
    },
    KnockedOut {
        unit: UnitId,
    },
    AutoRevived {
        unit: UnitId,
        hp: i32,
    },
    DjinnActivated {
        djinn: DjinnId,
    },
    DjinnRecovered {
        djinn: DjinnId,
    },
    ManaSpent {
        amount: u32,
        remaining: u32,
    },
    BattleEnded {
        status: BattleStatus,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::RoundStarted { round } => write!(f, "Round {round} begins!"),
            BattleEvent::AbilityUsed { actor, ability } => match ability {
                Some(ability) => write!(f, "{actor} uses {ability}!"),
                None => write!(f, "{actor} attacks!"),
            },
            BattleEvent::ActionSkipped { unit, reason } => match reason {
                SkipReason::KnockedOut => write!(f, "{unit} is down and cannot act"),
                SkipReason::CrowdControl => write!(f, "{unit} cannot move!"),
            },
            BattleEvent::Hit {
                target,
                amount,
                blocked,
                ..
            } => match blocked {
                Some(BlockSource::Invulnerable) => write!(f, "{target} is untouchable!"),
                Some(BlockSource::Shield) => write!(f, "{target}'s shield absorbs the blow!"),
                None => write!(f, "{target} takes {amount} damage"),
            },
            BattleEvent::Healed { target, amount, .. } => {
                write!(f, "{target} recovers {amount} HP")
            }
            BattleEvent::Revived { target, hp, .. } => {
                write!(f, "{target} returns to the fight with {hp} HP!")
            }
            BattleEvent::StatusApplied { target, kind } => {
                write!(f, "{target} is afflicted by {kind}")
            }
            BattleEvent::StatusResisted { target, kind } => {
                write!(f, "{target} resists {kind}")
            }
            BattleEvent::StatusTick {
                target,
                kind,
                amount,
            } => write!(f, "{target} takes {amount} {kind} damage"),
            BattleEvent::StatusHealed { target, amount } => {
                write!(f, "{target} regenerates {amount} HP")
            }
            BattleEvent::StatusExpired { target, kind } => {
                write!(f, "{kind} wears off {target}")
            }
            BattleEvent::Cleansed { target, .. } => write!(f, "{target} is cleansed"),
            BattleEvent::KnockedOut { unit } => write!(f, "{unit} is knocked out!"),
            BattleEvent::AutoRevived { unit, hp } => {
                write!(f, "{unit} refuses to fall and rises with {hp} HP!")
            }
            BattleEvent::DjinnActivated { djinn } => write!(f, "{djinn} is unleashed!"),
            BattleEvent::DjinnRecovered { djinn } => write!(f, "{djinn} returns to its set state"),
            BattleEvent::ManaSpent { amount, remaining } => {
                write!(f, "{amount} mana spent ({remaining} left)")
            }
            BattleEvent::BattleEnded { status } => match status {
                BattleStatus::PlayerVictory => write!(f, "Victory!"),
                BattleStatus::PlayerDefeat => write!(f, "The party has fallen..."),
                BattleStatus::Ongoing => write!(f, "The battle rages on"),
            },
        }
    }
}
