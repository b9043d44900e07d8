//! Ontology loading and saving for ontosat
//!
//! - [`provider`]: the [`OntologyProvider`] trait and its file-backed implementation
//! - [`rdf`]: RDF/XML, Turtle and N-Triples mapping to and from the ontosat axiom model
//! - [`json`]: serde_json form of an [`Ontology`](ontosat_core::Ontology)
//! - [`syntax`]: one-axiom-per-line text notation for supplemental axioms

pub mod format;
pub mod json;
pub mod provider;
pub mod rdf;
pub mod syntax;

pub use format::OntologyFormat;
pub use provider::{FileOntologyProvider, OntologyProvider};
pub use syntax::{parse_document, parse_line, SyntaxError};

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

/// Category of a [`ProviderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    ParseFailure,
    StorageFailure,
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ProviderError::ParseFailure(_) => ErrorKind::ParseFailure,
            ProviderError::StorageFailure(_) => ErrorKind::StorageFailure,
        }
    }
}

impl From<SyntaxError> for ProviderError {
    fn from(error: SyntaxError) -> Self {
        ProviderError::ParseFailure(error.to_string())
    }
}
