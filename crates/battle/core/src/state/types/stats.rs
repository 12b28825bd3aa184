//! Base stats and per-level growth rates.

/// The six stats carried by every unit definition.
///
/// `hp` and `pp` are pool maxima at level 1; `atk`/`def`/`mag`/`spd` feed the
/// damage and turn-order formulas after growth, equipment, Djinn and status
/// modifiers are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub hp: i32,
    pub pp: i32,
    pub atk: i32,
    pub def: i32,
    pub mag: i32,
    pub spd: i32,
}

impl Stats {
    pub const ZERO: Self = Self {
        hp: 0,
        pp: 0,
        atk: 0,
        def: 0,
        mag: 0,
        spd: 0,
    };

    pub fn new(hp: i32, pp: i32, atk: i32, def: i32, mag: i32, spd: i32) -> Self {
        Self {
            hp,
            pp,
            atk,
            def,
            mag,
            spd,
        }
    }

    /// Reads a single stat by kind.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Pp => self.pp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Mag => self.mag,
            StatKind::Spd => self.spd,
        }
    }

    /// Adds `amount` to a single stat by kind.
    pub fn add(&mut self, kind: StatKind, amount: i32) {
        match kind {
            StatKind::Hp => self.hp += amount,
            StatKind::Pp => self.pp += amount,
            StatKind::Atk => self.atk += amount,
            StatKind::Def => self.def += amount,
            StatKind::Mag => self.mag += amount,
            StatKind::Spd => self.spd += amount,
        }
    }

    /// Component-wise sum.
    pub fn plus(&self, other: &Stats) -> Stats {
        Stats {
            hp: self.hp + other.hp,
            pp: self.pp + other.pp,
            atk: self.atk + other.atk,
            def: self.def + other.def,
            mag: self.mag + other.mag,
            spd: self.spd + other.spd,
        }
    }
}

/// Selects a stat in buffs, debuffs, and growth lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    Hp,
    Pp,
    Atk,
    Def,
    Mag,
    Spd,
}

/// Per-level stat gains. Applied as `growth × (level − 1)` on top of base
/// stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthRates {
    pub hp: i32,
    pub pp: i32,
    pub atk: i32,
    pub def: i32,
    pub mag: i32,
    pub spd: i32,
}

impl GrowthRates {
    pub fn new(hp: i32, pp: i32, atk: i32, def: i32, mag: i32, spd: i32) -> Self {
        Self {
            hp,
            pp,
            atk,
            def,
            mag,
            spd,
        }
    }

    /// Total gains accumulated by reaching `level`.
    pub fn at_level(&self, level: u32) -> Stats {
        let steps = level.saturating_sub(1) as i32;
        Stats {
            hp: self.hp * steps,
            pp: self.pp * steps,
            atk: self.atk * steps,
            def: self.def * steps,
            mag: self.mag * steps,
            spd: self.spd * steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_scales_with_level_minus_one() {
        let growth = GrowthRates::new(5, 1, 2, 2, 1, 1);
        assert_eq!(growth.at_level(1), Stats::ZERO);
        assert_eq!(growth.at_level(4).hp, 15);
        assert_eq!(growth.at_level(4).atk, 6);
    }

    #[test]
    fn stat_kind_roundtrip() {
        let mut stats = Stats::new(30, 10, 8, 6, 4, 7);
        stats.add(StatKind::Atk, 4);
        assert_eq!(stats.get(StatKind::Atk), 12);
        assert_eq!(stats.get(StatKind::Spd), 7);
    }
}
