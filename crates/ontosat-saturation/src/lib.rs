//! Saturation engine
//!
//! For every role assertion `r(x, y)` and every class `C` with `C(y)`, the
//! saturator makes `∃r.C` explicit for `x`, either as a class assertion
//! (assertional mode) or as a freshly named class `rC ≡ ∃r.C` (terminological
//! mode). Role chains `r(x, y), s(y, z), C(z)` compose into `∃r.∃s.C(x)`.
//!
//! - [`graph`]: relation graph over individuals
//! - [`derivation`]: per-mode derivation strategies and the naming policy
//! - [`engine`]: depth-first traversal with memoized per-node results
//! - [`saturator`]: facade tying the pieces together

pub mod config;
pub mod derivation;
pub mod engine;
pub mod graph;
pub mod saturator;

pub use config::{SaturationMode, SaturationOptions};
pub use derivation::{
    mint_class_name, strategy_for, AssertionalDerivation, DerivationStrategy, TerminologicalDerivation,
};
pub use engine::{NodeStatus, SaturationEngine};
pub use graph::RelationGraph;
pub use saturator::{SaturationReport, Saturator, SaturatorBuilder};

// Error types
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaturationError {
    #[error("Missing ontology: a saturator needs an input ontology")]
    MissingOntology,

    #[error("Invalid saturation mode: {0}")]
    InvalidMode(String),
}
