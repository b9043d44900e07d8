//! Derivation strategies and the naming policy
//!
//! The engine does not branch on the saturation mode itself: it asks a
//! [`DerivationStrategy`], chosen once per run, to turn "`subject` has a
//! `property`-successor in `filler`" into axioms.

use crate::config::SaturationMode;
use ontosat_core::{Axiom, ClassExpression, Entity, Individual, Iri, ObjectProperty, OwlClass};
use tracing::trace;

/// Turns one existential fact into axioms
pub trait DerivationStrategy: Send + Sync {
    fn mode(&self) -> SaturationMode;

    /// Axioms stating that `subject` has some `property`-successor in `filler`.
    fn derive(&self, subject: &Individual, property: &ObjectProperty, filler: &ClassExpression) -> Vec<Axiom>;
}

/// Assertional mode: `ClassAssertion(∃property.filler, subject)`
#[derive(Debug, Clone, Copy, Default)]
pub struct AssertionalDerivation;

impl DerivationStrategy for AssertionalDerivation {
    fn mode(&self) -> SaturationMode {
        SaturationMode::Assertional
    }

    fn derive(&self, subject: &Individual, property: &ObjectProperty, filler: &ClassExpression) -> Vec<Axiom> {
        vec![Axiom::class_assertion(
            ClassExpression::some(property.clone(), filler.clone()),
            subject.clone(),
        )]
    }
}

/// Terminological mode: a named class `pC` with `pC ≡ ∃p.C`
///
/// Only atomic fillers get a name. Nested restrictions produced by role
/// chains are not named and yield no axioms.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminologicalDerivation;

impl DerivationStrategy for TerminologicalDerivation {
    fn mode(&self) -> SaturationMode {
        SaturationMode::Terminological
    }

    fn derive(&self, _subject: &Individual, property: &ObjectProperty, filler: &ClassExpression) -> Vec<Axiom> {
        let Some(class) = filler.as_class() else {
            trace!(property = %property.0, filler = %filler, "no name minted for nested filler");
            return Vec::new();
        };

        let named = mint_class_name(property, class);
        vec![
            Axiom::Declaration(Entity::Class(named.clone())),
            Axiom::EquivalentClasses(
                ClassExpression::Class(named),
                ClassExpression::some(property.clone(), filler.clone()),
            ),
        ]
    }
}

/// Selects the strategy for `mode`.
pub fn strategy_for(mode: SaturationMode) -> Box<dyn DerivationStrategy> {
    match mode {
        SaturationMode::Assertional => Box::new(AssertionalDerivation),
        SaturationMode::Terminological => Box::new(TerminologicalDerivation),
    }
}

/// Name of the class equivalent to `∃property.class`:
/// `namespace(class) + local(property) + local(class)`.
///
/// Equal inputs always give the same name, so deriving the same pair along
/// different paths collapses into one class.
pub fn mint_class_name(property: &ObjectProperty, class: &OwlClass) -> OwlClass {
    OwlClass(Iri::new(format!(
        "{}{}{}",
        class.0.namespace(),
        property.0.local_name(),
        class.0.local_name()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontosat_core::vocabulary::OWL_NAMESPACE;

    fn ex(name: &str) -> String {
        format!("http://example.org/family#{}", name)
    }

    #[test]
    fn test_mint_class_name() {
        let named = mint_class_name(&ObjectProperty::new(ex("hasChild")), &OwlClass::new(ex("Person")));
        assert_eq!(named.0.as_str(), "http://example.org/family#hasChildPerson");
    }

    #[test]
    fn test_mint_class_name_is_idempotent() {
        let property = ObjectProperty::new(ex("hasChild"));
        let class = OwlClass::new(ex("Person"));
        assert_eq!(mint_class_name(&property, &class), mint_class_name(&property, &class));
    }

    #[test]
    fn test_mint_class_name_uses_filler_namespace() {
        let property = ObjectProperty::new("http://other.org/vocab/r");
        let named = mint_class_name(&property, &OwlClass::thing());
        assert_eq!(named.0.as_str(), format!("{}rThing", OWL_NAMESPACE));
    }

    #[test]
    fn test_assertional_derivation() {
        let strategy = AssertionalDerivation;
        let subject = Individual::new(ex("john"));
        let property = ObjectProperty::new(ex("hasChild"));
        let filler = ClassExpression::from(OwlClass::new(ex("Person")));

        let axioms = strategy.derive(&subject, &property, &filler);
        assert_eq!(
            axioms,
            vec![Axiom::class_assertion(ClassExpression::some(property, filler), subject)]
        );
    }

    #[test]
    fn test_terminological_derivation() {
        let strategy = TerminologicalDerivation;
        let property = ObjectProperty::new(ex("hasChild"));
        let person = OwlClass::new(ex("Person"));

        let axioms = strategy.derive(&Individual::new(ex("john")), &property, &person.clone().into());
        let named = OwlClass::new(ex("hasChildPerson"));
        assert_eq!(
            axioms,
            vec![
                Axiom::Declaration(Entity::Class(named.clone())),
                Axiom::EquivalentClasses(named.into(), ClassExpression::some(property, person.into())),
            ]
        );
    }

    #[test]
    fn test_terminological_derivation_skips_nested_fillers() {
        let strategy = TerminologicalDerivation;
        let r = ObjectProperty::new(ex("r"));
        let nested = ClassExpression::some(ObjectProperty::new(ex("s")), OwlClass::new(ex("C")).into());

        assert!(strategy.derive(&Individual::new(ex("a")), &r, &nested).is_empty());
    }

    #[test]
    fn test_strategy_for() {
        assert_eq!(strategy_for(SaturationMode::Assertional).mode(), SaturationMode::Assertional);
        assert_eq!(strategy_for(SaturationMode::Terminological).mode(), SaturationMode::Terminological);
    }
}
