//! Saturator facade

use crate::config::{SaturationMode, SaturationOptions};
use crate::derivation::strategy_for;
use crate::engine::{NodeStatus, SaturationEngine};
use crate::graph::RelationGraph;
use crate::SaturationError;
use ontosat_core::{Axiom, Individual, Ontology};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Summary of one saturation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaturationReport {
    pub mode: SaturationMode,
    /// Nodes in the relation graph
    pub individuals: usize,
    /// Distinct (subject, object) edges
    pub edges: usize,
    /// Individuals a traversal was started from, in order
    pub roots: Vec<Individual>,
    /// Axioms returned by the engine, including ones already present
    pub derived_axioms: usize,
    /// Axioms the output gained over the input
    pub new_axioms: usize,
}

/// Saturates one input ontology
///
/// The input is never modified; every call to [`saturate`](Self::saturate)
/// builds a fresh graph and engine state and returns a new ontology.
#[derive(Debug, Clone)]
pub struct Saturator {
    ontology: Ontology,
    options: SaturationOptions,
}

impl Saturator {
    pub fn builder() -> SaturatorBuilder {
        SaturatorBuilder::new()
    }

    /// Assertional-mode saturator over `ontology`.
    pub fn new(ontology: Ontology) -> Self {
        Self::with_options(ontology, SaturationOptions::default())
    }

    pub fn with_mode(ontology: Ontology, mode: SaturationMode) -> Self {
        Self::with_options(ontology, SaturationOptions::with_mode(mode))
    }

    pub fn with_options(ontology: Ontology, options: SaturationOptions) -> Self {
        Self { ontology, options }
    }

    pub fn mode(&self) -> SaturationMode {
        self.options.mode
    }

    /// The input ontology, including supplemental axioms.
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Returns the input ontology extended with every derived axiom.
    pub fn saturate(&self) -> Ontology {
        self.saturate_with_report().0
    }

    pub fn saturate_with_report(&self) -> (Ontology, SaturationReport) {
        let mode = self.options.mode;
        let mut output = self.ontology.clone();
        let graph = RelationGraph::from_ontology(&self.ontology);

        info!(
            %mode,
            axioms = self.ontology.len(),
            individuals = graph.node_count(),
            edges = graph.edge_count(),
            "Starting saturation"
        );

        let mut engine = SaturationEngine::new(&graph, strategy_for(mode));
        let mut roots = Vec::new();
        let mut derived_axioms = 0;

        for individual in self.ontology.individuals_in_signature() {
            if engine.status(individual) != NodeStatus::Unvisited {
                continue;
            }

            let derived: BTreeSet<Axiom> = engine.explore(individual, &output);
            let added = output.add_axioms(derived.iter().cloned());
            debug!(root = %individual.0, derived = derived.len(), added, "explored");

            derived_axioms += derived.len();
            roots.push(individual.clone());
        }

        let report = SaturationReport {
            mode,
            individuals: graph.node_count(),
            edges: graph.edge_count(),
            roots,
            derived_axioms,
            new_axioms: output.len() - self.ontology.len(),
        };

        info!(
            roots = report.roots.len(),
            new_axioms = report.new_axioms,
            total_axioms = output.len(),
            "Saturation finished"
        );

        (output, report)
    }
}

/// Builder for [`Saturator`]
#[derive(Debug, Clone, Default)]
pub struct SaturatorBuilder {
    ontology: Option<Ontology>,
    options: SaturationOptions,
    supplement: Vec<Axiom>,
}

impl SaturatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ontology(mut self, ontology: Ontology) -> Self {
        self.ontology = Some(ontology);
        self
    }

    pub fn mode(mut self, mode: SaturationMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn options(mut self, options: SaturationOptions) -> Self {
        self.options = options;
        self
    }

    /// Extra axioms added to the input before the graph is built.
    pub fn supplement(mut self, axioms: impl IntoIterator<Item = Axiom>) -> Self {
        self.supplement.extend(axioms);
        self
    }

    pub fn build(self) -> Result<Saturator, SaturationError> {
        let mut ontology = self.ontology.ok_or(SaturationError::MissingOntology)?;

        if !self.supplement.is_empty() {
            let added = ontology.add_axioms(self.supplement);
            debug!(added, "supplemental axioms");
        }

        Ok(Saturator::with_options(ontology, self.options))
    }
}
