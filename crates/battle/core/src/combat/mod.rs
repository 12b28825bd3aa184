//! Damage calculation and application.

mod damage;
mod guard;

pub use damage::{
    apply_damage_modifiers, calculate_physical_damage, calculate_psynergy_damage,
    element_multiplier,
};
pub use guard::{
    BlockSource, DamageApplication, apply_damage_with_shields, apply_healing, revive_fallen,
};

#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::state::types::element::Element;
    use crate::testutil::test_unit;

    proptest! {
        // HP stays in [0, max_hp] under any damage/heal interleaving.
        #[test]
        fn hp_bounds_hold_for_any_sequence(steps in prop::collection::vec((any::<bool>(), 0..200i32), 0..40)) {
            let mut unit = test_unit("subject", Element::Venus);
            for (heal, amount) in steps {
                unit = if heal {
                    apply_healing(&unit, amount).0
                } else {
                    apply_damage_with_shields(&unit, amount).unit
                };
                prop_assert!(unit.current_hp >= 0);
                prop_assert!(unit.current_hp <= unit.max_hp());
            }
        }

        // The modifier pipeline never inverts damage and respects the
        // reduction clamp.
        #[test]
        fn modified_damage_is_never_negative(
            base in 0.0f64..10_000.0,
            resistance in -2.0f64..3.0,
            reduction in 0.0f64..3.0,
        ) {
            let defender = test_unit("subject", Element::Mars)
                .with_status(crate::state::StatusEffect::ElementalResistance {
                    element: Element::Venus,
                    modifier: resistance,
                    duration: 3,
                })
                .with_status(crate::state::StatusEffect::DamageReduction {
                    percent: reduction,
                    duration: 3,
                });

            let modified = apply_damage_modifiers(base, Some(Element::Venus), &defender);
            prop_assert!(modified >= 0.0);
        }

        // Purity: the pipeline is a function of its inputs.
        #[test]
        fn modifier_pipeline_is_pure(base in 0.0f64..10_000.0) {
            let defender = test_unit("subject", Element::Mars)
                .with_status(crate::state::StatusEffect::DamageReduction {
                    percent: 0.25,
                    duration: 3,
                });
            let first = apply_damage_modifiers(base, None, &defender);
            let second = apply_damage_modifiers(base, None, &defender);
            prop_assert_eq!(first, second);
        }
    }
}
