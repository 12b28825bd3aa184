//! Status effect engine: application, immunity, ticking, cleansing.
//!
//! Stacking rules are implemented here in one exhaustive pass per concern
//! rather than scattered filters: application appends (duplicates legal),
//! reads sum (see [`crate::stats`] and [`crate::combat`]), and the tick
//! decrements every duration in lockstep.

use crate::combat::apply_damage_with_shields;
use crate::env::{RngOracle, StatusTables};
use crate::state::types::status::{
    CleanseScope, ImmunityScope, StatusEffect, StatusKind,
};
use crate::state::types::unit::Unit;

/// True if any immunity on the unit blocks statuses of `kind`.
///
/// An `All` immunity blocks everything — including other immunities.
pub fn is_immune_to(unit: &Unit, kind: StatusKind) -> bool {
    unit.status_effects.iter().any(|effect| match effect {
        StatusEffect::Immunity { scope, .. } => match scope {
            ImmunityScope::All => true,
            ImmunityScope::Kinds(kinds) => kinds.contains(&kind),
        },
        _ => false,
    })
}

/// Applies a status to the unit. Immune units are returned unchanged; the
/// bool reports whether the status landed.
///
/// No deduplication: identical kinds may coexist and stack per their read
/// rules.
pub fn apply_status(unit: &Unit, status: StatusEffect) -> (Unit, bool) {
    if is_immune_to(unit, status.kind()) {
        return (unit.clone(), false);
    }
    (unit.with_status(status), true)
}

/// Negative statuses are the cleansable afflictions; everything protective
/// or beneficial is not.
pub fn is_negative(status: &StatusEffect) -> bool {
    matches!(
        status.kind(),
        StatusKind::Poison
            | StatusKind::Burn
            | StatusKind::Freeze
            | StatusKind::Paralyze
            | StatusKind::Stun
            | StatusKind::Debuff
    )
}

/// True if crowd control currently prevents the unit from acting.
pub fn is_blocked_from_acting(unit: &Unit) -> bool {
    unit.status_effects.iter().any(|e| e.blocks_acting())
}

/// One per-status change applied during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickDelta {
    Damage { kind: StatusKind, amount: i32 },
    Heal { amount: i32 },
}

/// Result of ticking one unit's statuses at round end.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub unit: Unit,
    pub deltas: Vec<TickDelta>,
    pub expired: Vec<StatusKind>,
    pub auto_revived: bool,
}

/// Processes one status tick: damage/heal over time, then duration decay.
///
/// DoT damage routes through the same shield/invulnerability/auto-revive
/// resolver as attack damage. The `rng` is threaded through for future
/// stochastic tick effects; the current rules draw nothing from it.
pub fn tick_statuses(
    unit: &Unit,
    tables: StatusTables,
    _rng: &(impl RngOracle + ?Sized),
) -> TickOutcome {
    if unit.is_ko() {
        return TickOutcome {
            unit: unit.clone(),
            deltas: Vec::new(),
            expired: Vec::new(),
            auto_revived: false,
        };
    }

    let mut current = unit.clone();
    let mut deltas = Vec::new();
    let mut auto_revived = false;
    let max_hp = unit.max_hp();

    // Damage/heal over time, instance by instance in application order.
    for effect in unit.status_effects.iter() {
        match effect {
            StatusEffect::Poison { .. } | StatusEffect::Burn { .. } => {
                let kind = effect.kind();
                let fraction = if kind == StatusKind::Poison {
                    tables.poison_fraction
                } else {
                    tables.burn_fraction
                };
                let amount = (max_hp as f64 * fraction).floor() as i32;
                let result = apply_damage_with_shields(&current, amount);
                auto_revived |= result.auto_revived;
                deltas.push(TickDelta::Damage {
                    kind,
                    amount: result.actual_damage,
                });
                current = result.unit;
                if current.is_ko() {
                    break;
                }
            }
            StatusEffect::HealOverTime { heal_per_turn, .. } => {
                let (healed, restored) = crate::combat::apply_healing(&current, *heal_per_turn);
                deltas.push(TickDelta::Heal { amount: restored });
                current = healed;
            }
            _ => {}
        }
    }

    // Duration decay. Auto-revive has no duration and only expires by use.
    let mut expired = Vec::new();
    for effect in current.status_effects.iter_mut() {
        if let Some(duration) = effect.duration_mut() {
            *duration = duration.saturating_sub(1);
            if *duration == 0 {
                expired.push(effect.kind());
            }
        }
    }
    current
        .status_effects
        .retain(|effect| effect.duration() != Some(0));

    TickOutcome {
        unit: current,
        deltas,
        expired,
        auto_revived,
    }
}

/// Strips statuses per scope, returning the cleansed unit and the kinds
/// removed (one entry per removed instance).
pub fn cleanse(unit: &Unit, scope: &CleanseScope) -> (Unit, Vec<StatusKind>) {
    let mut cleansed = unit.clone();
    let mut removed = Vec::new();
    cleansed.status_effects.retain(|effect| {
        let strip = match scope {
            CleanseScope::Negative => is_negative(effect),
            CleanseScope::Kinds(kinds) => kinds.contains(&effect.kind()),
        };
        if strip {
            removed.push(effect.kind());
        }
        !strip
    });
    (cleansed, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::types::element::Element;
    use crate::state::types::stats::StatKind;
    use crate::testutil::test_unit;

    #[test]
    fn immunity_blocks_matching_kind_only() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::Immunity {
            scope: ImmunityScope::Kinds(vec![StatusKind::Poison]),
            duration: 3,
        });

        let (unit, applied) = apply_status(&unit, StatusEffect::Poison { duration: 3 });
        assert!(!applied);
        assert!(!unit.status_effects.has(StatusKind::Poison));

        let (unit, applied) = apply_status(&unit, StatusEffect::Burn { duration: 3 });
        assert!(applied);
        assert!(unit.status_effects.has(StatusKind::Burn));
    }

    #[test]
    fn all_immunity_blocks_even_other_immunities() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::Immunity {
            scope: ImmunityScope::All,
            duration: 3,
        });

        let (unit, applied) = apply_status(
            &unit,
            StatusEffect::Immunity {
                scope: ImmunityScope::Kinds(vec![StatusKind::Burn]),
                duration: 5,
            },
        );
        assert!(!applied);
        assert_eq!(unit.status_effects.len(), 1);
    }

    #[test]
    fn duplicate_applications_stack() {
        let unit = test_unit("isaac", Element::Venus);
        let (unit, _) = apply_status(&unit, StatusEffect::Poison { duration: 3 });
        let (unit, _) = apply_status(&unit, StatusEffect::Poison { duration: 5 });
        assert_eq!(unit.status_effects.len(), 2);
    }

    #[test]
    fn negativity_partition() {
        assert!(is_negative(&StatusEffect::Poison { duration: 1 }));
        assert!(is_negative(&StatusEffect::Debuff {
            stat: StatKind::Atk,
            modifier: 2,
            duration: 1
        }));
        assert!(!is_negative(&StatusEffect::Buff {
            stat: StatKind::Atk,
            modifier: 2,
            duration: 1
        }));
        assert!(!is_negative(&StatusEffect::Shield {
            remaining_charges: 1,
            duration: 1
        }));
        assert!(!is_negative(&StatusEffect::AutoRevive {
            hp_percent: 0.5,
            uses_remaining: 1
        }));
    }

    #[test]
    fn tick_applies_dot_and_decays_durations() {
        let tables = StatusTables::default();
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Poison { duration: 2 })
            .with_status(StatusEffect::Burn { duration: 1 });

        let outcome = tick_statuses(&unit, tables, &PcgRng);
        // poison 8% of 50 = 4, burn 10% of 50 = 5
        assert_eq!(outcome.unit.current_hp, 41);
        assert_eq!(
            outcome.deltas,
            vec![
                TickDelta::Damage {
                    kind: StatusKind::Poison,
                    amount: 4
                },
                TickDelta::Damage {
                    kind: StatusKind::Burn,
                    amount: 5
                },
            ]
        );
        // burn expired, poison has one turn left
        assert_eq!(outcome.expired, vec![StatusKind::Burn]);
        assert!(outcome.unit.status_effects.has(StatusKind::Poison));
        assert!(!outcome.unit.status_effects.has(StatusKind::Burn));
    }

    #[test]
    fn tick_heals_over_time_within_bounds() {
        let tables = StatusTables::default();
        let unit = test_unit("isaac", Element::Venus)
            .with_current_hp(45)
            .with_status(StatusEffect::HealOverTime {
                heal_per_turn: 20,
                duration: 3,
            });

        let outcome = tick_statuses(&unit, tables, &PcgRng);
        assert_eq!(outcome.unit.current_hp, 50);
        assert_eq!(outcome.deltas, vec![TickDelta::Heal { amount: 5 }]);
    }

    #[test]
    fn dot_respects_shields() {
        let tables = StatusTables::default();
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Poison { duration: 3 })
            .with_status(StatusEffect::Shield {
                remaining_charges: 1,
                duration: 5,
            });

        let outcome = tick_statuses(&unit, tables, &PcgRng);
        assert_eq!(outcome.unit.current_hp, 50);
        assert_eq!(
            outcome.deltas,
            vec![TickDelta::Damage {
                kind: StatusKind::Poison,
                amount: 0
            }]
        );
    }

    #[test]
    fn cleanse_negative_strips_afflictions_only() {
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Poison { duration: 3 })
            .with_status(StatusEffect::Stun { duration: 1 })
            .with_status(StatusEffect::Buff {
                stat: StatKind::Atk,
                modifier: 3,
                duration: 2,
            });

        let (cleansed, removed) = cleanse(&unit, &CleanseScope::Negative);
        assert_eq!(removed, vec![StatusKind::Poison, StatusKind::Stun]);
        assert_eq!(cleansed.status_effects.len(), 1);
        assert!(cleansed.status_effects.has(StatusKind::Buff));
    }

    #[test]
    fn cleanse_by_explicit_kinds() {
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Poison { duration: 3 })
            .with_status(StatusEffect::Burn { duration: 3 });

        let (cleansed, removed) =
            cleanse(&unit, &CleanseScope::Kinds(vec![StatusKind::Burn]));
        assert_eq!(removed, vec![StatusKind::Burn]);
        assert!(cleansed.status_effects.has(StatusKind::Poison));
    }
}
