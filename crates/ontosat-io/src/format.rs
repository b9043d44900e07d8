//! Ontology file formats

use crate::ProviderError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OntologyFormat {
    Turtle,
    NTriples,
    RdfXml,
    Json,
}

impl OntologyFormat {
    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "ttl" | "turtle" => Ok(OntologyFormat::Turtle),
            "nt" => Ok(OntologyFormat::NTriples),
            "owl" | "rdf" | "xml" => Ok(OntologyFormat::RdfXml),
            "json" => Ok(OntologyFormat::Json),
            "owx" | "ofn" | "omn" => Err(ProviderError::ParseFailure(format!(
                "unsupported ontology format '.{}' for {} (use RDF/XML, Turtle, N-Triples or JSON)",
                extension,
                path.display()
            ))),
            _ => Err(ProviderError::ParseFailure(format!(
                "cannot infer ontology format of {}",
                path.display()
            ))),
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OntologyFormat::Turtle => "ttl",
            OntologyFormat::NTriples => "nt",
            OntologyFormat::RdfXml => "owl",
            OntologyFormat::Json => "json",
        }
    }
}

impl fmt::Display for OntologyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OntologyFormat::Turtle => write!(f, "turtle"),
            OntologyFormat::NTriples => write!(f, "ntriples"),
            OntologyFormat::RdfXml => write!(f, "rdfxml"),
            OntologyFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OntologyFormat {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(OntologyFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(OntologyFormat::NTriples),
            "rdfxml" | "rdf/xml" | "rdf" | "owl" | "xml" => Ok(OntologyFormat::RdfXml),
            "json" => Ok(OntologyFormat::Json),
            _ => Err(ProviderError::InvalidArgument(format!("Unknown ontology format: {}", s))),
        }
    }
}
