//! # ontosat - ontology saturation
//!
//! Role assertions such as `hasChild(john, mary)` together with the classes of
//! `mary` imply existential knowledge about `john` (`∃hasChild.Person(john)`)
//! that an ontology rarely states. ontosat walks the graph of role assertions
//! once and writes that knowledge back, either as class assertions or as named
//! classes equivalent to the restrictions.
//!
//! ## Quick Start
//!
//! ```rust
//! use ontosat::prelude::*;
//!
//! let has_child = ObjectProperty::new("http://example.org/family#hasChild");
//! let person = OwlClass::new("http://example.org/family#Person");
//! let john = Individual::new("http://example.org/family#john");
//! let mary = Individual::new("http://example.org/family#mary");
//!
//! let ontology = Ontology::from_axioms(vec![
//!     Axiom::property_assertion(has_child.clone(), john.clone(), mary.clone()),
//!     Axiom::class_assertion(person.clone(), mary),
//! ]);
//!
//! let saturated = Saturator::new(ontology).saturate();
//! assert!(saturated.contains(&Axiom::class_assertion(
//!     ClassExpression::some(has_child, person.into()),
//!     john,
//! )));
//! ```
//!
//! ## Architecture
//!
//! - **`ontosat-core`**: IRIs, class expressions, axioms and the indexed ontology
//! - **`ontosat-saturation`**: relation graph, DFS engine, derivation strategies and the `Saturator`
//! - **`ontosat-io`**: Turtle, N-Triples and JSON providers plus the line syntax for extra axioms
//! - **`ontosat-cli`**: the `ontosat` command
//!
//! ## Feature Flags
//!
//! - `full` (default): all crates included
//! - `core`: only the data model
//! - `saturation`: data model and saturator
//! - `io`: data model and file providers
//! - `cli`: command-line tools

#[cfg(feature = "ontosat-core")]
pub use ontosat_core as core;

#[cfg(feature = "ontosat-saturation")]
pub use ontosat_saturation as saturation;

#[cfg(feature = "ontosat-io")]
pub use ontosat_io as io;

#[cfg(feature = "ontosat-cli")]
pub use ontosat_cli as cli;

#[cfg(feature = "ontosat-core")]
pub use ontosat_core::model;

#[cfg(feature = "ontosat-saturation")]
pub use ontosat_saturation::{SaturationError, SaturationMode, SaturationReport, Saturator};

#[cfg(feature = "ontosat-io")]
pub use ontosat_io::{FileOntologyProvider, OntologyFormat, OntologyProvider, ProviderError};

// Commonly used external dependencies
pub use anyhow;
pub use serde;
pub use serde_json;

/// Prelude module for convenient imports
///
/// ```rust
/// use ontosat::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "ontosat-core")]
    pub use crate::model::*;
    #[cfg(feature = "ontosat-core")]
    pub use ontosat_core::Ontology;

    #[cfg(feature = "ontosat-saturation")]
    pub use crate::{SaturationError, SaturationMode, SaturationReport, Saturator};

    #[cfg(feature = "ontosat-io")]
    pub use crate::{FileOntologyProvider, OntologyFormat, OntologyProvider, ProviderError};

    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}

/// Current version of ontosat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
