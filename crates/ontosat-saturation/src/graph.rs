//! Relation graph over individuals

use ontosat_core::{Individual, ObjectProperty, Ontology};
use std::collections::{BTreeMap, BTreeSet};

/// Directed graph of role assertions
///
/// Each node (individual) maps to the individuals it points to, together
/// with the set of properties connecting the pair. Several assertions
/// between the same pair share one edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    adjacency: BTreeMap<Individual, BTreeMap<Individual, BTreeSet<ObjectProperty>>>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from the ontology's individuals and role assertions.
    pub fn from_ontology(ontology: &Ontology) -> Self {
        let mut graph = Self::new();

        // isolated individuals still get a node so they can be visited
        for individual in ontology.individuals_in_signature() {
            graph.add_node(individual.clone());
        }

        for (property, subject, object) in ontology.object_property_assertions() {
            graph.add_edge(subject, property.clone(), object);
        }

        graph
    }

    /// Adds a node; returns `false` if it already existed.
    pub fn add_node(&mut self, individual: Individual) -> bool {
        if self.adjacency.contains_key(&individual) {
            return false;
        }
        self.adjacency.insert(individual, BTreeMap::new());
        true
    }

    /// Adds `property` to the edge `from → to`, creating nodes and edge as
    /// needed. Returns `false` if the property was already on the edge.
    pub fn add_edge(&mut self, from: &Individual, property: ObjectProperty, to: &Individual) -> bool {
        if !self.adjacency.contains_key(to) {
            self.add_node(to.clone());
        }
        self.adjacency
            .entry(from.clone())
            .or_default()
            .entry(to.clone())
            .or_default()
            .insert(property)
    }

    /// The graph's own copy of `individual`, if it is a node.
    pub fn node(&self, individual: &Individual) -> Option<&Individual> {
        self.adjacency.get_key_value(individual).map(|(node, _)| node)
    }

    pub fn contains(&self, individual: &Individual) -> bool {
        self.adjacency.contains_key(individual)
    }

    /// Outgoing edges of `individual` with their property sets.
    pub fn successors(&self, individual: &Individual) -> impl Iterator<Item = (&Individual, &BTreeSet<ObjectProperty>)> {
        self.adjacency.get(individual).into_iter().flatten()
    }

    pub fn properties_between(&self, from: &Individual, to: &Individual) -> Option<&BTreeSet<ObjectProperty>> {
        self.adjacency.get(from).and_then(|edges| edges.get(to))
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of (from, to) pairs, regardless of how many properties each carries.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontosat_core::{Axiom, Entity, OwlClass};

    fn ind(name: &str) -> Individual {
        Individual::new(format!("http://example.org/{}", name))
    }

    fn prop(name: &str) -> ObjectProperty {
        ObjectProperty::new(format!("http://example.org/{}", name))
    }

    #[test]
    fn test_isolated_individuals_are_nodes() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::Declaration(Entity::NamedIndividual(ind("alone"))),
            Axiom::class_assertion(OwlClass::new("http://example.org/C"), ind("typed")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.contains(&ind("alone")));
        assert_eq!(graph.successors(&ind("alone")).count(), 0);
    }

    #[test]
    fn test_parallel_properties_merge_into_one_edge() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("s"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("r"), ind("b"), ind("a")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);

        assert_eq!(graph.edge_count(), 2);
        let forward = graph.properties_between(&ind("a"), &ind("b")).unwrap();
        assert_eq!(forward.len(), 2);
        assert!(forward.contains(&prop("r")) && forward.contains(&prop("s")));
        assert_eq!(graph.properties_between(&ind("b"), &ind("a")).unwrap().len(), 1);
        assert!(graph.properties_between(&ind("a"), &ind("c")).is_none());
    }

    #[test]
    fn test_build_is_deterministic() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("r"), ind("b"), ind("c")),
            Axiom::property_assertion(prop("s"), ind("c"), ind("a")),
        ]);

        assert_eq!(RelationGraph::from_ontology(&ontology), RelationGraph::from_ontology(&ontology));
    }

    #[test]
    fn test_add_edge_creates_target_node() {
        let mut graph = RelationGraph::new();
        assert!(graph.add_edge(&ind("a"), prop("r"), &ind("b")));
        assert!(!graph.add_edge(&ind("a"), prop("r"), &ind("b")));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.individuals().collect::<Vec<_>>(), vec![&ind("a"), &ind("b")]);
    }
}
