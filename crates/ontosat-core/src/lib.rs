//! OWL ontology model for ontosat
//!
//! This crate provides the value types the saturator works on:
//! - IRIs, classes, object properties and individuals
//! - class expressions (named classes and existential restrictions)
//! - axioms (declarations, assertions, class equivalence and subsumption)
//! - the ontology as a set of axioms with signature indexes

pub mod model;
pub mod ontology;
pub mod vocabulary;

pub use model::{Axiom, AxiomKind, ClassExpression, Entity, Individual, Iri, ObjectProperty, OwlClass};
pub use ontology::Ontology;

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),
}
