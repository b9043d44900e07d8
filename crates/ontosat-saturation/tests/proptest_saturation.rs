//! Property tests for saturation over random relation graphs

use ontosat_core::*;
use ontosat_saturation::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

const INDIVIDUALS: usize = 8;
const PROPERTIES: [&str; 3] = ["r", "s", "t"];
const CLASSES: [&str; 3] = ["A", "B", "C"];

fn ind(i: usize) -> Individual {
    Individual::new(format!("http://example.org/g#i{}", i))
}

fn prop(i: usize) -> ObjectProperty {
    ObjectProperty::new(format!("http://example.org/g#{}", PROPERTIES[i]))
}

fn class(i: usize) -> OwlClass {
    OwlClass::new(format!("http://example.org/g#{}", CLASSES[i]))
}

/// Role assertions (subject, property, object) and class assertions (individual, class)
type Graph = (Vec<(usize, usize, usize)>, Vec<(usize, usize)>);

fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..INDIVIDUALS).prop_flat_map(|n| {
        (
            proptest::collection::vec((0..n, 0..PROPERTIES.len(), 0..n), 0..16),
            proptest::collection::vec((0..n, 0..CLASSES.len()), 0..6),
        )
    })
}

/// Only edges from a lower to a higher index, so the graph has no cycles
fn arb_acyclic_graph() -> impl Strategy<Value = Graph> {
    arb_graph().prop_map(|(edges, types)| {
        let edges = edges
            .into_iter()
            .filter(|(s, _, o)| s != o)
            .map(|(s, p, o)| (s.min(o), p, s.max(o)))
            .collect();
        (edges, types)
    })
}

fn build((edges, types): &Graph) -> Ontology {
    let roles = edges
        .iter()
        .map(|&(s, p, o)| Axiom::property_assertion(prop(p), ind(s), ind(o)));
    let memberships = types
        .iter()
        .map(|&(i, c)| Axiom::class_assertion(class(c), ind(i)));
    roles.chain(memberships).collect()
}

/// An acyclic graph plus a random order to start traversals in
fn arb_acyclic_graph_with_roots() -> impl Strategy<Value = (Graph, Vec<usize>)> {
    (arb_acyclic_graph(), Just((0..INDIVIDUALS).collect::<Vec<_>>()).prop_shuffle())
}

/// Union of the sets the engine returns when roots are explored in `order`
fn explore_in_order(ontology: &Ontology, mode: SaturationMode, order: &[usize]) -> BTreeSet<Axiom> {
    let graph = RelationGraph::from_ontology(ontology);
    let mut engine = SaturationEngine::new(&graph, strategy_for(mode));
    order
        .iter()
        .flat_map(|&i| engine.explore(&ind(i), ontology))
        .collect()
}

fn arb_mode() -> impl Strategy<Value = SaturationMode> {
    prop_oneof![Just(SaturationMode::Assertional), Just(SaturationMode::Terminological)]
}

proptest! {
    /// The output never loses an input axiom
    #[test]
    fn output_is_superset(graph in arb_graph(), mode in arb_mode()) {
        let input = build(&graph);
        let output = Saturator::with_mode(input.clone(), mode).saturate();

        for axiom in input.axioms() {
            prop_assert!(output.contains(axiom));
        }
    }

    /// Without cycles the order roots are explored in does not change what is derived
    #[test]
    fn root_order_does_not_change_derivations(
        (graph, order) in arb_acyclic_graph_with_roots(),
        mode in arb_mode(),
    ) {
        let input = build(&graph);
        let sorted: Vec<usize> = (0..INDIVIDUALS).collect();

        prop_assert_eq!(
            explore_in_order(&input, mode, &order),
            explore_in_order(&input, mode, &sorted)
        );
    }

    /// Without cycles a second pass is a fixpoint
    #[test]
    fn acyclic_resaturation_is_fixpoint(graph in arb_acyclic_graph(), mode in arb_mode()) {
        let once = Saturator::with_mode(build(&graph), mode).saturate();
        let (twice, report) = Saturator::with_mode(once.clone(), mode).saturate_with_report();

        prop_assert_eq!(report.new_axioms, 0);
        prop_assert_eq!(twice, once);
    }

    /// Every edge yields an existential for its subject in assertional mode
    #[test]
    fn every_edge_derives_for_its_subject(graph in arb_graph()) {
        let input = build(&graph);
        let output = Saturator::new(input.clone()).saturate();

        for (property, subject, object) in input.object_property_assertions() {
            let mut fillers: Vec<ClassExpression> =
                input.atomic_types_of(object).cloned().map(ClassExpression::Class).collect();
            // nothing is ever derived about an object without outgoing edges
            let has_successors = input.object_property_assertions().any(|(_, s, _)| s == object);
            if fillers.is_empty() && !has_successors {
                fillers.push(ClassExpression::thing());
            }
            for filler in fillers {
                let expected = Axiom::class_assertion(ClassExpression::some(property.clone(), filler), subject.clone());
                prop_assert!(output.contains(&expected), "missing {}", expected);
            }
        }
    }

    /// Terminological mode only adds named one-hop definitions
    #[test]
    fn terminological_names_follow_naming_policy(graph in arb_graph()) {
        let input = build(&graph);
        let output = Saturator::with_mode(input.clone(), SaturationMode::Terminological).saturate();

        for axiom in output.axioms().filter(|a| !input.contains(a)) {
            match axiom {
                Axiom::Declaration(Entity::Class(_)) => {}
                Axiom::EquivalentClasses(ClassExpression::Class(named), ClassExpression::ObjectSomeValuesFrom { property, filler }) => {
                    let filler = filler.as_class();
                    prop_assert!(filler.is_some());
                    if let Some(filler) = filler {
                        prop_assert_eq!(named, &mint_class_name(property, filler));
                    }
                }
                other => {
                    prop_assert!(false, "unexpected axiom {}", other);
                }
            }
        }
    }
}
