//! Depth-first saturation over the relation graph
//!
//! Each individual moves `Unvisited → Exploring → Done`. Processing a node
//! walks its outgoing edges `n → u` (properties `P`) and, per edge:
//!
//! 1. derives `∃p.C` for `n` from every named class `C` of `u` recorded in
//!    the output ontology (`owl:Thing` when `u` has no class assertion);
//! 2. consults `u`'s derived set (visiting it first if unvisited, its final
//!    set if done, its partial set if it is still exploring) and rewraps every
//!    `D(u)` found there into `∃p.D` for `n`.
//!
//! A node's set also absorbs the sets it consulted, so the set returned for
//! a traversal root holds everything derived below it.
//!
//! Back-edges into an exploring node do not re-enter it; they see whatever
//! that node had accumulated so far. Chains through a cycle are therefore
//! derived up to the point of re-entry only, not to a fixpoint.
//!
//! Traversal uses an explicit frame stack, so path length is not limited by
//! the thread stack.

use crate::derivation::DerivationStrategy;
use crate::graph::RelationGraph;
use itertools::Itertools;
use ontosat_core::{Axiom, ClassExpression, Individual, ObjectProperty, Ontology};
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// Per-individual traversal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Unvisited,
    Exploring,
    Done,
}

type Edge<'g> = (&'g Individual, &'g BTreeSet<ObjectProperty>);

/// Stack frame of a node being explored
struct Frame<'g> {
    node: &'g Individual,
    edges: Vec<Edge<'g>>,
    next: usize,
    /// The edge at `next` led into a child frame that has not returned yet.
    descended: bool,
}

/// Traversal state for one saturation run
pub struct SaturationEngine<'g> {
    graph: &'g RelationGraph,
    strategy: Box<dyn DerivationStrategy>,
    status: HashMap<&'g Individual, NodeStatus>,
    memo: HashMap<&'g Individual, BTreeSet<Axiom>>,
}

impl<'g> SaturationEngine<'g> {
    /// Every node of `graph` starts out unvisited with an empty memo.
    pub fn new(graph: &'g RelationGraph, strategy: Box<dyn DerivationStrategy>) -> Self {
        let status = graph
            .individuals()
            .map(|individual| (individual, NodeStatus::Unvisited))
            .collect();

        Self {
            graph,
            strategy,
            status,
            memo: HashMap::new(),
        }
    }

    pub fn status(&self, individual: &Individual) -> NodeStatus {
        self.status
            .get(individual)
            .copied()
            .unwrap_or(NodeStatus::Unvisited)
    }

    /// Derived axioms accumulated for `individual` so far.
    pub fn derived(&self, individual: &Individual) -> Option<&BTreeSet<Axiom>> {
        self.memo.get(individual)
    }

    /// Runs the traversal from `root` and returns the axioms derived for the
    /// subtree it reaches. Class memberships are read from `output`.
    ///
    /// Exploring an already finished root returns its memoized set.
    pub fn explore(&mut self, root: &Individual, output: &Ontology) -> BTreeSet<Axiom> {
        let Some(root) = self.graph.node(root) else {
            return BTreeSet::new();
        };
        if self.status(root) != NodeStatus::Unvisited {
            return self.memo.get(root).cloned().unwrap_or_default();
        }

        let mut stack = vec![self.enter(root)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;

            if frame.descended {
                // child finished: its memo is final
                let (target, properties) = frame.edges[frame.next];
                frame.descended = false;
                frame.next += 1;
                self.chain(node, target, properties);
                continue;
            }

            let Some(&(target, properties)) = frame.edges.get(frame.next) else {
                stack.pop();
                self.status.insert(node, NodeStatus::Done);
                trace!(individual = %node.0, "done");
                continue;
            };

            let derived = self.derive_from_object_classes(node, target, properties, output);
            self.accumulate(node, derived);

            match self.status(target) {
                NodeStatus::Unvisited => {
                    frame.descended = true;
                    let child = self.enter(target);
                    stack.push(child);
                }
                NodeStatus::Exploring | NodeStatus::Done => {
                    frame.next += 1;
                    self.chain(node, target, properties);
                }
            }
        }

        self.memo.get(root).cloned().unwrap_or_default()
    }

    fn enter(&mut self, node: &'g Individual) -> Frame<'g> {
        self.status.insert(node, NodeStatus::Exploring);
        self.memo.entry(node).or_default();
        trace!(individual = %node.0, "exploring");

        Frame {
            node,
            edges: self.graph.successors(node).collect(),
            next: 0,
            descended: false,
        }
    }

    fn accumulate(&mut self, node: &'g Individual, axioms: Vec<Axiom>) {
        if axioms.is_empty() {
            return;
        }
        self.memo.entry(node).or_default().extend(axioms);
    }

    /// `∃p.C` for `node` from the named classes of `target`.
    ///
    /// `owl:Thing` stands in only when `target` has no class assertion at all;
    /// a target typed by restrictions alone yields nothing here.
    fn derive_from_object_classes(
        &self,
        node: &Individual,
        target: &Individual,
        properties: &BTreeSet<ObjectProperty>,
        output: &Ontology,
    ) -> Vec<Axiom> {
        let fillers: Vec<ClassExpression> = if output.types_of(target).next().is_none() {
            vec![ClassExpression::thing()]
        } else {
            output
                .atomic_types_of(target)
                .cloned()
                .map(ClassExpression::Class)
                .collect()
        };

        fillers
            .iter()
            .cartesian_product(properties.iter())
            .flat_map(|(filler, property)| {
                trace!(subject = %node.0, property = %property.0, filler = %filler, "object class");
                self.strategy.derive(node, property, filler)
            })
            .collect()
    }

    /// Absorbs `target`'s current set into `node` and rewraps every class
    /// assertion about `target` through each of `properties`.
    fn chain(&mut self, node: &'g Individual, target: &'g Individual, properties: &BTreeSet<ObjectProperty>) {
        let Some(target_axioms) = self.memo.get(target) else {
            return;
        };

        let chained: Vec<Axiom> = target_axioms
            .iter()
            .filter_map(|axiom| axiom.class_asserted_for(target))
            .cartesian_product(properties.iter())
            .flat_map(|(filler, property)| {
                trace!(subject = %node.0, property = %property.0, filler = %filler, "chain");
                self.strategy.derive(node, property, filler)
            })
            .chain(target_axioms.iter().cloned())
            .collect();

        self.accumulate(node, chained);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::AssertionalDerivation;
    use ontosat_core::OwlClass;

    fn ind(name: &str) -> Individual {
        Individual::new(format!("http://example.org/{}", name))
    }

    fn prop(name: &str) -> ObjectProperty {
        ObjectProperty::new(format!("http://example.org/{}", name))
    }

    fn class(name: &str) -> ClassExpression {
        OwlClass::new(format!("http://example.org/{}", name)).into()
    }

    #[test]
    fn test_statuses_after_exploration() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("r"), ind("c"), ind("c")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);
        let mut engine = SaturationEngine::new(&graph, Box::new(AssertionalDerivation));

        assert_eq!(engine.status(&ind("a")), NodeStatus::Unvisited);
        engine.explore(&ind("a"), &ontology);

        assert_eq!(engine.status(&ind("a")), NodeStatus::Done);
        assert_eq!(engine.status(&ind("b")), NodeStatus::Done);
        assert_eq!(engine.status(&ind("c")), NodeStatus::Unvisited);
    }

    #[test]
    fn test_root_set_contains_descendant_derivations() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("s"), ind("b"), ind("c")),
            Axiom::class_assertion(class("C"), ind("c")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);
        let mut engine = SaturationEngine::new(&graph, Box::new(AssertionalDerivation));

        let derived = engine.explore(&ind("a"), &ontology);

        let s_c = ClassExpression::some(prop("s"), class("C"));
        assert!(derived.contains(&Axiom::class_assertion(s_c.clone(), ind("b"))));
        assert!(derived.contains(&Axiom::class_assertion(ClassExpression::some(prop("r"), s_c), ind("a"))));
        assert_eq!(engine.derived(&ind("c")).map(BTreeSet::len), Some(0));
    }

    #[test]
    fn test_explore_done_root_returns_memo() {
        let ontology = Ontology::from_axioms(vec![Axiom::property_assertion(prop("r"), ind("a"), ind("b"))]);
        let graph = RelationGraph::from_ontology(&ontology);
        let mut engine = SaturationEngine::new(&graph, Box::new(AssertionalDerivation));

        let first = engine.explore(&ind("a"), &ontology);
        let second = engine.explore(&ind("a"), &ontology);
        assert_eq!(first, second);
        assert!(engine.explore(&ind("unknown"), &ontology).is_empty());
    }

    #[test]
    fn test_self_loop_terminates() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("a")),
            Axiom::class_assertion(class("C"), ind("a")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);
        let mut engine = SaturationEngine::new(&graph, Box::new(AssertionalDerivation));

        let derived = engine.explore(&ind("a"), &ontology);

        let r_c = ClassExpression::some(prop("r"), class("C"));
        assert!(derived.contains(&Axiom::class_assertion(r_c.clone(), ind("a"))));
        // the partial set already holds ∃r.C(a) when the loop edge is chained
        assert!(derived.contains(&Axiom::class_assertion(ClassExpression::some(prop("r"), r_c), ind("a"))));
        assert_eq!(derived.len(), 2);
    }

    #[test]
    fn test_thing_only_for_targets_without_class_assertions() {
        let ontology = Ontology::from_axioms(vec![
            Axiom::property_assertion(prop("r"), ind("a"), ind("b")),
            Axiom::property_assertion(prop("r"), ind("a"), ind("c")),
            Axiom::class_assertion(ClassExpression::some(prop("s"), class("C")), ind("b")),
        ]);
        let graph = RelationGraph::from_ontology(&ontology);
        let mut engine = SaturationEngine::new(&graph, Box::new(AssertionalDerivation));

        let derived = engine.explore(&ind("a"), &ontology);

        let r_thing = ClassExpression::some(prop("r"), ClassExpression::thing());
        assert_eq!(derived, BTreeSet::from([Axiom::class_assertion(r_thing, ind("a"))]));
    }
}
