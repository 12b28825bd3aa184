//! State model building blocks: elements, stats, statuses, equipment slots,
//! units, and the team.

pub mod common;
pub mod element;
pub mod equipment;
pub mod stats;
pub mod status;
pub mod team;
pub mod unit;

pub use common::{AbilityId, DjinnId, EquipmentId, UnitId};
pub use element::{Element, ElementCompatibility};
pub use equipment::{EquipmentLoadout, EquipmentSlot};
pub use stats::{GrowthRates, StatKind, Stats};
pub use status::{CleanseScope, ImmunityScope, StatusEffect, StatusEffects, StatusKind};
pub use team::{DjinnState, DjinnTracker, Team, TeamError};
pub use unit::{BattleCounters, Role, Unit};
