/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Fraction of max HP restored by a revival ability on a KO'd target.
    pub revive_fraction: f64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of units on the player team.
    pub const MAX_TEAM_UNITS: usize = 4;
    /// Minimum number of units on the player team.
    pub const MIN_TEAM_UNITS: usize = 1;
    /// Maximum number of Djinn equipped to the team at once.
    pub const MAX_DJINN_SLOTS: usize = 3;
    /// Number of equipment slots per unit (weapon/armor/helm/boots/accessory).
    pub const EQUIPMENT_SLOTS: usize = 5;

    // ===== level bounds (canonical clamp rule) =====
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REVIVE_FRACTION: f64 = 0.5;

    pub fn new() -> Self {
        Self {
            revive_fraction: Self::DEFAULT_REVIVE_FRACTION,
        }
    }

    /// Clamps a requested level into the canonical `[MIN_LEVEL, MAX_LEVEL]` range.
    pub fn clamp_level(level: u32) -> u32 {
        level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
