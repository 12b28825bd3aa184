//! Damage application: invulnerability, shields, HP, and auto-revive.
//!
//! Resolution order is fixed: invulnerability blocks first (shields keep
//! their charges), then a charged shield absorbs the hit, then HP takes the
//! damage, and only a drop to exactly 0 HP consults auto-revive.

use crate::state::types::status::StatusEffect;
use crate::state::types::unit::Unit;

/// What absorbed a blocked hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockSource {
    Invulnerable,
    Shield,
}

/// Result of applying one hit to a defender.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageApplication {
    pub unit: Unit,
    /// HP actually lost (0 when blocked).
    pub actual_damage: i32,
    pub blocked_by: Option<BlockSource>,
    pub auto_revived: bool,
}

/// Applies `raw_damage` to the defender, resolving invulnerability, shield
/// charges, the HP floor, and auto-revive.
///
/// Zero-damage hits never consume a shield charge.
pub fn apply_damage_with_shields(defender: &Unit, raw_damage: i32) -> DamageApplication {
    let mut unit = defender.clone();
    let raw_damage = raw_damage.max(0);

    if unit.status_effects.has(crate::state::types::status::StatusKind::Invulnerable) {
        return DamageApplication {
            unit,
            actual_damage: 0,
            blocked_by: Some(BlockSource::Invulnerable),
            auto_revived: false,
        };
    }

    if raw_damage > 0 {
        let mut consumed = false;
        for effect in unit.status_effects.iter_mut() {
            if let StatusEffect::Shield {
                remaining_charges, ..
            } = effect
            {
                if *remaining_charges > 0 {
                    *remaining_charges -= 1;
                    consumed = true;
                    break;
                }
            }
        }
        if consumed {
            unit.status_effects.retain(|effect| {
                !matches!(
                    effect,
                    StatusEffect::Shield {
                        remaining_charges: 0,
                        ..
                    }
                )
            });
            return DamageApplication {
                unit,
                actual_damage: 0,
                blocked_by: Some(BlockSource::Shield),
                auto_revived: false,
            };
        }
    }

    let before = unit.current_hp;
    unit.current_hp = (unit.current_hp - raw_damage).max(0);
    let actual_damage = before - unit.current_hp;
    unit.counters.damage_taken += actual_damage as u32;

    let mut auto_revived = false;
    if unit.current_hp == 0 {
        auto_revived = check_auto_revive(&mut unit);
    }

    DamageApplication {
        unit,
        actual_damage,
        blocked_by: None,
        auto_revived,
    }
}

/// Consumes one auto-revive use if present, restoring
/// `round(max_hp × hp_percent)`. Returns whether a revive fired.
fn check_auto_revive(unit: &mut Unit) -> bool {
    let max_hp = unit.max_hp();
    let mut revived_hp: Option<i32> = None;

    for effect in unit.status_effects.iter_mut() {
        if let StatusEffect::AutoRevive {
            hp_percent,
            uses_remaining,
        } = effect
        {
            if *uses_remaining > 0 {
                revived_hp = Some((max_hp as f64 * *hp_percent).round() as i32);
                *uses_remaining -= 1;
                break;
            }
        }
    }

    let Some(hp) = revived_hp else {
        return false;
    };

    unit.status_effects.retain(|effect| {
        !matches!(
            effect,
            StatusEffect::AutoRevive {
                uses_remaining: 0,
                ..
            }
        )
    });
    unit.current_hp = hp.clamp(0, max_hp);
    true
}

/// Heals a living unit, clamping into `[0, max_hp]`. Never reduces HP; KO'd
/// units are untouched (revival is a separate path).
pub fn apply_healing(unit: &Unit, amount: i32) -> (Unit, i32) {
    if unit.is_ko() {
        return (unit.clone(), 0);
    }
    let amount = amount.max(0);

    let mut healed = unit.clone();
    let before = healed.current_hp;
    healed.current_hp = (healed.current_hp + amount).min(healed.max_hp());
    let restored = healed.current_hp - before;
    (healed, restored)
}

/// Restores a KO'd unit to `round(max_hp × fraction)`. Living units are
/// untouched.
pub fn revive_fallen(unit: &Unit, fraction: f64) -> (Unit, i32) {
    if !unit.is_ko() {
        return (unit.clone(), 0);
    }
    let mut revived = unit.clone();
    let hp = (revived.max_hp() as f64 * fraction).round() as i32;
    revived.current_hp = hp.clamp(0, revived.max_hp());
    let restored = revived.current_hp;
    (revived, restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::element::Element;
    use crate::testutil::test_unit;

    #[test]
    fn invulnerability_blocks_without_spending_shields() {
        let unit = test_unit("isaac", Element::Venus)
            .with_status(StatusEffect::Shield {
                remaining_charges: 2,
                duration: 3,
            })
            .with_status(StatusEffect::Invulnerable { duration: 1 });

        let result = apply_damage_with_shields(&unit, 30);
        assert_eq!(result.actual_damage, 0);
        assert_eq!(result.blocked_by, Some(BlockSource::Invulnerable));
        assert_eq!(result.unit.current_hp, 50);
        // Shield untouched
        assert!(result.unit.status_effects.iter().any(|e| matches!(
            e,
            StatusEffect::Shield {
                remaining_charges: 2,
                ..
            }
        )));
    }

    #[test]
    fn shield_blocks_exactly_n_hits_then_expires() {
        let mut unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::Shield {
            remaining_charges: 2,
            duration: 5,
        });

        for _ in 0..2 {
            let result = apply_damage_with_shields(&unit, 20);
            assert_eq!(result.actual_damage, 0);
            assert_eq!(result.blocked_by, Some(BlockSource::Shield));
            unit = result.unit;
        }
        // Charges exhausted: shield removed, third hit lands
        assert!(!unit
            .status_effects
            .has(crate::state::StatusKind::Shield));
        let result = apply_damage_with_shields(&unit, 20);
        assert_eq!(result.actual_damage, 20);
        assert_eq!(result.unit.current_hp, 30);
    }

    #[test]
    fn zero_damage_hit_never_consumes_a_charge() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::Shield {
            remaining_charges: 1,
            duration: 5,
        });

        let result = apply_damage_with_shields(&unit, 0);
        assert_eq!(result.actual_damage, 0);
        assert_eq!(result.blocked_by, None);
        assert!(result.unit.status_effects.iter().any(|e| matches!(
            e,
            StatusEffect::Shield {
                remaining_charges: 1,
                ..
            }
        )));
    }

    #[test]
    fn hp_floors_at_zero() {
        let unit = test_unit("isaac", Element::Venus);
        let result = apply_damage_with_shields(&unit, 999);
        assert_eq!(result.unit.current_hp, 0);
        assert_eq!(result.actual_damage, 50);
        assert!(result.unit.is_ko());
    }

    #[test]
    fn auto_revive_fires_only_at_exactly_zero() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::AutoRevive {
            hp_percent: 0.5,
            uses_remaining: 1,
        });

        // Non-lethal: no trigger
        let result = apply_damage_with_shields(&unit, 10);
        assert!(!result.auto_revived);

        // Lethal: revive at 50% of max (50 → 25), status removed
        let result = apply_damage_with_shields(&result.unit, 100);
        assert!(result.auto_revived);
        assert_eq!(result.unit.current_hp, 25);
        assert!(!result
            .unit
            .status_effects
            .has(crate::state::StatusKind::AutoRevive));
    }

    #[test]
    fn auto_revive_decrements_uses() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::AutoRevive {
            hp_percent: 0.2,
            uses_remaining: 2,
        });

        let result = apply_damage_with_shields(&unit, 100);
        assert!(result.auto_revived);
        assert_eq!(result.unit.current_hp, 10);
        assert!(result.unit.status_effects.iter().any(|e| matches!(
            e,
            StatusEffect::AutoRevive {
                uses_remaining: 1,
                ..
            }
        )));
    }

    #[test]
    fn zero_percent_auto_revive_leaves_unit_ko() {
        let unit = test_unit("isaac", Element::Venus).with_status(StatusEffect::AutoRevive {
            hp_percent: 0.0,
            uses_remaining: 1,
        });

        let result = apply_damage_with_shields(&unit, 100);
        // The use is consumed even though the unit stays down
        assert!(result.auto_revived);
        assert_eq!(result.unit.current_hp, 0);
        assert!(result.unit.is_ko());
    }

    #[test]
    fn healing_clamps_and_skips_the_dead() {
        let unit = test_unit("isaac", Element::Venus).with_current_hp(40);
        let (healed, restored) = apply_healing(&unit, 100);
        assert_eq!(healed.current_hp, 50);
        assert_eq!(restored, 10);

        let dead = unit.with_current_hp(0);
        let (still_dead, restored) = apply_healing(&dead, 100);
        assert_eq!(still_dead.current_hp, 0);
        assert_eq!(restored, 0);

        // Negative amounts never damage
        let (unchanged, restored) = apply_healing(&unit, -20);
        assert_eq!(unchanged.current_hp, 40);
        assert_eq!(restored, 0);
    }

    #[test]
    fn revive_fallen_restores_half() {
        let dead = test_unit("isaac", Element::Venus).with_current_hp(0);
        let (revived, hp) = revive_fallen(&dead, 0.5);
        assert_eq!(revived.current_hp, 25);
        assert_eq!(hp, 25);

        let alive = test_unit("isaac", Element::Venus);
        let (unchanged, hp) = revive_fallen(&alive, 0.5);
        assert_eq!(unchanged.current_hp, 50);
        assert_eq!(hp, 0);
    }
}
