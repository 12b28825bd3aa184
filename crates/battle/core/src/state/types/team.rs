//! Team state: the player party plus the team-wide Djinn system.
//!
//! Djinn are equipped to the *team*, not to individual units; their bonuses
//! and ability grants fan out to every member by element compatibility.

use std::collections::BTreeMap;

use crate::config::BattleConfig;

use super::common::DjinnId;
use super::unit::Unit;

/// Lifecycle of an equipped Djinn.
///
/// `Set` is the resting state that yields bonuses and grants. Activation
/// moves it to `Standby` for the round; at round end it enters `Recovery`
/// and counts down back to `Set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DjinnState {
    Set,
    Standby,
    Recovery,
}

/// Per-Djinn bookkeeping on the team.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DjinnTracker {
    pub state: DjinnState,
    pub last_activated_turn: Option<u32>,
}

impl DjinnTracker {
    pub fn set() -> Self {
        Self {
            state: DjinnState::Set,
            last_activated_turn: None,
        }
    }
}

/// Validation failures around team construction and Djinn management.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeamError {
    #[error("team must have between {min} and {max} units, got {count}")]
    InvalidSize {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("cannot equip more than {max} djinn, got {count}")]
    TooManyDjinn { count: usize, max: usize },

    #[error("djinn {0} equipped twice")]
    DuplicateDjinn(DjinnId),

    #[error("djinn {0} not yet collected")]
    DjinnNotCollected(DjinnId),

    #[error("djinn {0} is not equipped")]
    DjinnNotEquipped(DjinnId),

    #[error("djinn {id} is not in Set state (current: {state})")]
    DjinnNotSet { id: DjinnId, state: DjinnState },
}

/// The player party. Unit count is a hard 1–4 invariant enforced at
/// construction; the field stays private so no path can bypass it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    units: Vec<Unit>,
    equipped_djinn: Vec<DjinnId>,
    pub collected_djinn: Vec<DjinnId>,
    djinn_trackers: BTreeMap<DjinnId, DjinnTracker>,
    pub current_turn: u32,
}

impl Team {
    /// Creates a team. Fails unless the unit count is in `[1, 4]`.
    pub fn new(units: Vec<Unit>) -> Result<Team, TeamError> {
        if units.len() < BattleConfig::MIN_TEAM_UNITS || units.len() > BattleConfig::MAX_TEAM_UNITS
        {
            return Err(TeamError::InvalidSize {
                count: units.len(),
                min: BattleConfig::MIN_TEAM_UNITS,
                max: BattleConfig::MAX_TEAM_UNITS,
            });
        }

        Ok(Team {
            units,
            equipped_djinn: Vec::new(),
            collected_djinn: Vec::new(),
            djinn_trackers: BTreeMap::new(),
            current_turn: 0,
        })
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub(crate) fn unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.unit(id).is_some()
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.is_ko())
    }

    /// Returns a copy with the unit list replaced. The size invariant is
    /// re-checked: a team can never shrink to zero or grow past four.
    pub fn with_units(&self, units: Vec<Unit>) -> Result<Team, TeamError> {
        if units.len() < BattleConfig::MIN_TEAM_UNITS || units.len() > BattleConfig::MAX_TEAM_UNITS
        {
            return Err(TeamError::InvalidSize {
                count: units.len(),
                min: BattleConfig::MIN_TEAM_UNITS,
                max: BattleConfig::MAX_TEAM_UNITS,
            });
        }
        let mut team = self.clone();
        team.units = units;
        Ok(team)
    }

    // ========================================================================
    // Djinn management
    // ========================================================================

    pub fn equipped_djinn(&self) -> &[DjinnId] {
        &self.equipped_djinn
    }

    pub fn tracker(&self, id: &str) -> Option<&DjinnTracker> {
        self.djinn_trackers.get(id)
    }

    pub fn djinn_trackers(&self) -> &BTreeMap<DjinnId, DjinnTracker> {
        &self.djinn_trackers
    }

    pub fn djinn_state(&self, id: &str) -> Option<DjinnState> {
        self.djinn_trackers.get(id).map(|t| t.state)
    }

    /// Ids of equipped Djinn currently in `Set` state, in equip order.
    pub fn set_djinn_ids(&self) -> Vec<&DjinnId> {
        self.equipped_djinn
            .iter()
            .filter(|id| self.djinn_state(id) == Some(DjinnState::Set))
            .collect()
    }

    /// Returns a copy with `id` added to the collection (idempotent).
    pub fn with_collected_djinn(&self, id: DjinnId) -> Team {
        let mut team = self.clone();
        if !team.collected_djinn.contains(&id) {
            team.collected_djinn.push(id);
        }
        team
    }

    /// Equips a set of collected Djinn to the team slots, resetting all
    /// trackers to `Set`. Fails on more than three entries, duplicates, or
    /// uncollected ids.
    pub fn equip_djinn(&self, djinn: Vec<DjinnId>) -> Result<Team, TeamError> {
        if djinn.len() > BattleConfig::MAX_DJINN_SLOTS {
            return Err(TeamError::TooManyDjinn {
                count: djinn.len(),
                max: BattleConfig::MAX_DJINN_SLOTS,
            });
        }
        for (i, id) in djinn.iter().enumerate() {
            if djinn[..i].contains(id) {
                return Err(TeamError::DuplicateDjinn(id.clone()));
            }
            if !self.collected_djinn.contains(id) {
                return Err(TeamError::DjinnNotCollected(id.clone()));
            }
        }

        let mut team = self.clone();
        team.djinn_trackers = djinn.iter().map(|id| (id.clone(), DjinnTracker::set())).collect();
        team.equipped_djinn = djinn;
        Ok(team)
    }

    /// Activates an equipped `Set` Djinn: it moves to `Standby` and records
    /// the activation turn. The unleash effect itself is resolved by the
    /// battle service.
    pub fn activate_djinn(&self, id: &str, turn: u32) -> Result<Team, TeamError> {
        if !self.equipped_djinn.iter().any(|d| d == id) {
            return Err(TeamError::DjinnNotEquipped(id.to_string()));
        }
        let state = self
            .djinn_state(id)
            .ok_or_else(|| TeamError::DjinnNotEquipped(id.to_string()))?;
        if state != DjinnState::Set {
            return Err(TeamError::DjinnNotSet {
                id: id.to_string(),
                state,
            });
        }

        let mut team = self.clone();
        team.djinn_trackers.insert(
            id.to_string(),
            DjinnTracker {
                state: DjinnState::Standby,
                last_activated_turn: Some(turn),
            },
        );
        Ok(team)
    }

    /// Overwrites one Djinn tracker, returning the new team.
    pub(crate) fn with_tracker(&self, id: &str, tracker: DjinnTracker) -> Team {
        let mut team = self.clone();
        team.djinn_trackers.insert(id.to_string(), tracker);
        team
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::element::Element;
    use crate::testutil::test_unit;

    fn team_of(n: usize) -> Result<Team, TeamError> {
        let units = (0..n)
            .map(|i| test_unit(&format!("u{i}"), Element::Venus))
            .collect();
        Team::new(units)
    }

    #[test]
    fn team_size_invariant() {
        assert!(team_of(0).is_err());
        assert!(team_of(1).is_ok());
        assert!(team_of(4).is_ok());
        assert!(team_of(5).is_err());
    }

    #[test]
    fn equip_rejects_duplicates_and_excess() {
        let team = team_of(2)
            .unwrap()
            .with_collected_djinn("flint".into())
            .with_collected_djinn("granite".into())
            .with_collected_djinn("forge".into())
            .with_collected_djinn("fizz".into());

        let err = team
            .equip_djinn(vec!["flint".into(), "flint".into()])
            .unwrap_err();
        assert_eq!(err, TeamError::DuplicateDjinn("flint".into()));

        let err = team
            .equip_djinn(vec![
                "flint".into(),
                "granite".into(),
                "forge".into(),
                "fizz".into(),
            ])
            .unwrap_err();
        assert!(matches!(err, TeamError::TooManyDjinn { count: 4, .. }));

        let team = team
            .equip_djinn(vec!["flint".into(), "granite".into()])
            .unwrap();
        assert_eq!(team.djinn_state("flint"), Some(DjinnState::Set));
    }

    #[test]
    fn equip_requires_collection() {
        let team = team_of(1).unwrap();
        let err = team.equip_djinn(vec!["flint".into()]).unwrap_err();
        assert_eq!(err, TeamError::DjinnNotCollected("flint".into()));
    }

    #[test]
    fn activation_requires_set_state() {
        let team = team_of(1)
            .unwrap()
            .with_collected_djinn("flint".into())
            .equip_djinn(vec!["flint".into()])
            .unwrap();

        let team = team.activate_djinn("flint", 3).unwrap();
        assert_eq!(team.djinn_state("flint"), Some(DjinnState::Standby));
        assert_eq!(team.tracker("flint").unwrap().last_activated_turn, Some(3));

        // Already standby: second activation fails
        let err = team.activate_djinn("flint", 4).unwrap_err();
        assert!(matches!(err, TeamError::DjinnNotSet { .. }));
    }
}
