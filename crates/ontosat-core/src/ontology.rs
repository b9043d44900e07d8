//! Ontology: a set of axioms with its signature

use crate::model::{Axiom, ClassExpression, Entity, Individual, Iri, ObjectProperty, OwlClass};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// OWL ontology
///
/// Axioms are kept in a set, so inserting an axiom twice is a no-op.
/// Signature and type indexes are maintained on insert; nothing is ever
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OntologyDocument", into = "OntologyDocument")]
pub struct Ontology {
    iri: Option<Iri>,
    axioms: BTreeSet<Axiom>,
    classes: BTreeSet<OwlClass>,
    object_properties: BTreeSet<ObjectProperty>,
    individuals: BTreeSet<Individual>,
    types: BTreeMap<Individual, BTreeSet<ClassExpression>>,
}

/// Serialized form of an [`Ontology`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OntologyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iri: Option<Iri>,
    #[serde(default)]
    axioms: Vec<Axiom>,
}

impl From<OntologyDocument> for Ontology {
    fn from(document: OntologyDocument) -> Self {
        let mut ontology = Ontology::new();
        ontology.iri = document.iri;
        ontology.add_axioms(document.axioms);
        ontology
    }
}

impl From<Ontology> for OntologyDocument {
    fn from(ontology: Ontology) -> Self {
        OntologyDocument {
            iri: ontology.iri,
            axioms: ontology.axioms.into_iter().collect(),
        }
    }
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_iri(iri: Iri) -> Self {
        Self {
            iri: Some(iri),
            ..Self::default()
        }
    }

    pub fn from_axioms(axioms: impl IntoIterator<Item = Axiom>) -> Self {
        let mut ontology = Self::new();
        ontology.add_axioms(axioms);
        ontology
    }

    pub fn iri(&self) -> Option<&Iri> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: Iri) {
        self.iri = Some(iri);
    }

    /// Namespace used to mint IRIs for entities that have none yet.
    pub fn namespace(&self) -> Option<String> {
        self.iri.as_ref().map(|iri| {
            let s = iri.as_str();
            if s.ends_with('#') || s.ends_with('/') {
                s.to_string()
            } else {
                format!("{}#", s)
            }
        })
    }

    /// Adds an axiom, returning `false` if it was already present.
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        if self.axioms.contains(&axiom) {
            return false;
        }
        self.index(&axiom);
        self.axioms.insert(axiom)
    }

    /// Adds all axioms, returning how many were new.
    pub fn add_axioms(&mut self, axioms: impl IntoIterator<Item = Axiom>) -> usize {
        axioms
            .into_iter()
            .map(|axiom| self.add_axiom(axiom))
            .filter(|added| *added)
            .count()
    }

    fn index(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::Declaration(entity) => match entity {
                Entity::Class(c) => {
                    self.classes.insert(c.clone());
                }
                Entity::ObjectProperty(p) => {
                    self.object_properties.insert(p.clone());
                }
                Entity::NamedIndividual(i) => {
                    self.individuals.insert(i.clone());
                }
            },
            Axiom::ClassAssertion { class, individual } => {
                self.index_expression(class);
                self.individuals.insert(individual.clone());
                self.types
                    .entry(individual.clone())
                    .or_default()
                    .insert(class.clone());
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                self.object_properties.insert(property.clone());
                self.individuals.insert(subject.clone());
                self.individuals.insert(object.clone());
            }
            Axiom::EquivalentClasses(a, b) | Axiom::SubClassOf(a, b) => {
                self.index_expression(a);
                self.index_expression(b);
            }
        }
    }

    fn index_expression(&mut self, expression: &ClassExpression) {
        match expression {
            ClassExpression::Class(c) => {
                self.classes.insert(c.clone());
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                self.object_properties.insert(property.clone());
                self.index_expression(filler);
            }
        }
    }

    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.axioms.contains(axiom)
    }

    pub fn axioms(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    pub fn axiom_set(&self) -> &BTreeSet<Axiom> {
        &self.axioms
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Individuals in the signature, in IRI order.
    pub fn individuals_in_signature(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    pub fn classes_in_signature(&self) -> impl Iterator<Item = &OwlClass> {
        self.classes.iter()
    }

    pub fn object_properties_in_signature(&self) -> impl Iterator<Item = &ObjectProperty> {
        self.object_properties.iter()
    }

    /// All class expressions asserted for `individual`.
    pub fn types_of(&self, individual: &Individual) -> impl Iterator<Item = &ClassExpression> {
        self.types.get(individual).into_iter().flatten()
    }

    /// Named classes asserted for `individual`.
    pub fn atomic_types_of(&self, individual: &Individual) -> impl Iterator<Item = &OwlClass> {
        self.types_of(individual).filter_map(ClassExpression::as_class)
    }

    /// (property, subject, object) for every object property assertion.
    pub fn object_property_assertions(
        &self,
    ) -> impl Iterator<Item = (&ObjectProperty, &Individual, &Individual)> {
        self.axioms.iter().filter_map(|axiom| match axiom {
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => Some((property, subject, object)),
            _ => None,
        })
    }

    /// Looks up an entity of any kind by its local name.
    pub fn find_by_local_name(&self, name: &str) -> Vec<Entity> {
        let classes = self
            .classes
            .iter()
            .filter(|c| c.0.local_name() == name)
            .cloned()
            .map(Entity::Class);
        let properties = self
            .object_properties
            .iter()
            .filter(|p| p.0.local_name() == name)
            .cloned()
            .map(Entity::ObjectProperty);
        let individuals = self
            .individuals
            .iter()
            .filter(|i| i.0.local_name() == name)
            .cloned()
            .map(Entity::NamedIndividual);

        classes.chain(properties).chain(individuals).collect()
    }
}

impl Extend<Axiom> for Ontology {
    fn extend<T: IntoIterator<Item = Axiom>>(&mut self, iter: T) {
        self.add_axioms(iter);
    }
}

impl FromIterator<Axiom> for Ontology {
    fn from_iter<T: IntoIterator<Item = Axiom>>(iter: T) -> Self {
        Self::from_axioms(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(name: &str) -> String {
        format!("http://example.org/{}", name)
    }

    #[test]
    fn test_ontology_creation() {
        let ontology = Ontology::new();
        assert!(ontology.is_empty());
        assert_eq!(ontology.individuals_in_signature().count(), 0);
        assert!(ontology.namespace().is_none());
    }

    #[test]
    fn test_duplicate_axioms_collapse() {
        let mut ontology = Ontology::new();
        let axiom = Axiom::class_assertion(OwlClass::new(ex("Person")), Individual::new(ex("john")));

        assert!(ontology.add_axiom(axiom.clone()));
        assert!(!ontology.add_axiom(axiom));
        assert_eq!(ontology.len(), 1);
    }

    #[test]
    fn test_signature_from_assertions() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(
                ObjectProperty::new(ex("hasParent")),
                Individual::new(ex("john")),
                Individual::new(ex("mary")),
            ),
            Axiom::class_assertion(
                ClassExpression::some(
                    ObjectProperty::new(ex("likes")),
                    OwlClass::new(ex("Cat")).into(),
                ),
                Individual::new(ex("alice")),
            ),
            Axiom::Declaration(Entity::NamedIndividual(Individual::new(ex("bob")))),
        ]);

        let individuals: Vec<_> = ontology
            .individuals_in_signature()
            .map(|i| i.0.local_name().to_string())
            .collect();
        assert_eq!(individuals, vec!["alice", "bob", "john", "mary"]);
        assert_eq!(ontology.object_properties_in_signature().count(), 2);
        assert!(ontology
            .classes_in_signature()
            .any(|c| c == &OwlClass::new(ex("Cat"))));
    }

    #[test]
    fn test_types_index() {
        let john = Individual::new(ex("john"));
        let ontology = Ontology::from_axioms(vec![
            Axiom::class_assertion(OwlClass::new(ex("Person")), john.clone()),
            Axiom::class_assertion(
                ClassExpression::some(ObjectProperty::new(ex("r")), ClassExpression::thing()),
                john.clone(),
            ),
        ]);

        assert_eq!(ontology.types_of(&john).count(), 2);
        let atomic: Vec<_> = ontology.atomic_types_of(&john).collect();
        assert_eq!(atomic, vec![&OwlClass::new(ex("Person"))]);
        assert_eq!(ontology.types_of(&Individual::new(ex("nobody"))).count(), 0);
    }

    #[test]
    fn test_namespace() {
        assert_eq!(
            Ontology::with_iri(Iri::new("http://example.org/family")).namespace(),
            Some("http://example.org/family#".to_string())
        );
        assert_eq!(
            Ontology::with_iri(Iri::new("http://example.org/family#")).namespace(),
            Some("http://example.org/family#".to_string())
        );
    }

    #[test]
    fn test_find_by_local_name() {
        let ontology = Ontology::from_axioms(vec![Axiom::class_assertion(
            OwlClass::new(ex("Person")),
            Individual::new(ex("john")),
        )]);

        assert_eq!(
            ontology.find_by_local_name("Person"),
            vec![Entity::Class(OwlClass::new(ex("Person")))]
        );
        assert!(ontology.find_by_local_name("Nobody").is_empty());
    }

    #[test]
    fn test_json_roundtrip_rebuilds_indexes() {
        let john = Individual::new(ex("john"));
        let mut ontology = Ontology::with_iri(Iri::new(ex("family")));
        ontology.add_axiom(Axiom::class_assertion(OwlClass::new(ex("Person")), john.clone()));

        let json = serde_json::to_string(&ontology).unwrap();
        let back: Ontology = serde_json::from_str(&json).unwrap();

        assert_eq!(back, ontology);
        assert_eq!(back.atomic_types_of(&john).count(), 1);
    }
}
