//! Ontology provider

use crate::format::OntologyFormat;
use crate::syntax::parse_document;
use crate::{json, rdf, ProviderError};
use ontosat_core::{Axiom, Ontology};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Loads and saves ontologies
pub trait OntologyProvider {
    /// Fails with `InvalidArgument` when `locator` is absent.
    fn load(&self, locator: Option<&Path>) -> Result<Ontology, ProviderError>;

    fn save(&self, ontology: &Ontology, destination: &Path) -> Result<(), ProviderError>;
}

/// File-backed provider; the format is forced or inferred from the extension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOntologyProvider {
    pub format: Option<OntologyFormat>,
}

impl FileOntologyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: OntologyFormat) -> Self {
        Self { format: Some(format) }
    }

    fn format_for(&self, path: &Path) -> Result<OntologyFormat, ProviderError> {
        match self.format {
            Some(format) => Ok(format),
            None => OntologyFormat::from_path(path),
        }
    }

    /// Reads supplemental axioms in the line syntax, resolving names against
    /// `ontology`. The ontology itself is left untouched.
    pub fn load_axioms(&self, ontology: &Ontology, path: &Path) -> Result<Vec<Axiom>, ProviderError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ProviderError::ParseFailure(format!("cannot read {}: {}", path.display(), e)))?;

        let mut scope = ontology.clone();
        let axioms = parse_document(&mut scope, &text)?;
        debug!(path = %path.display(), axioms = axioms.len(), "Supplemental axioms parsed");
        Ok(axioms)
    }
}

impl OntologyProvider for FileOntologyProvider {
    fn load(&self, locator: Option<&Path>) -> Result<Ontology, ProviderError> {
        let path = locator
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| ProviderError::InvalidArgument("ontology locator cannot be empty".to_string()))?;
        let format = self.format_for(path)?;

        let file = File::open(path)
            .map_err(|e| ProviderError::ParseFailure(format!("cannot read {}: {}", path.display(), e)))?;
        let reader = BufReader::new(file);

        let ontology = match format {
            OntologyFormat::Turtle => rdf::read_turtle(reader),
            OntologyFormat::NTriples => rdf::read_ntriples(reader),
            OntologyFormat::RdfXml => rdf::read_rdf_xml(reader),
            OntologyFormat::Json => json::read_json(reader),
        }?;

        info!(
            path = %path.display(),
            %format,
            axioms = ontology.len(),
            "Ontology loaded"
        );
        Ok(ontology)
    }

    fn save(&self, ontology: &Ontology, destination: &Path) -> Result<(), ProviderError> {
        let format = self.format_for(destination).map_err(|e| match e {
            ProviderError::ParseFailure(message) => ProviderError::StorageFailure(message),
            other => other,
        })?;

        let file = File::create(destination)
            .map_err(|e| ProviderError::StorageFailure(format!("cannot write {}: {}", destination.display(), e)))?;
        let writer = BufWriter::new(file);

        let mut writer = match format {
            OntologyFormat::Turtle => rdf::write_turtle(ontology, writer),
            OntologyFormat::NTriples => rdf::write_ntriples(ontology, writer),
            OntologyFormat::RdfXml => rdf::write_rdf_xml(ontology, writer),
            OntologyFormat::Json => json::write_json(ontology, writer),
        }?;
        writer
            .flush()
            .map_err(|e| ProviderError::StorageFailure(format!("cannot write {}: {}", destination.display(), e)))?;

        info!(path = %destination.display(), %format, axioms = ontology.len(), "Ontology saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_missing_locator() {
        let provider = FileOntologyProvider::new();

        let error = provider.load(None).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.to_string(), "Invalid argument: ontology locator cannot be empty");

        assert_eq!(provider.load(Some(Path::new(""))).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_unreadable_file_is_parse_failure() {
        let provider = FileOntologyProvider::new();
        let error = provider.load(Some(Path::new("/nonexistent/family.ttl"))).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_unwritable_destination_is_storage_failure() {
        let provider = FileOntologyProvider::new();
        let error = provider
            .save(&Ontology::new(), Path::new("/nonexistent/dir/out.ttl"))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::StorageFailure);

        let error = provider.save(&Ontology::new(), Path::new("out.owx")).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::StorageFailure);
    }
}
