//! JSON form of an ontology

use crate::ProviderError;
use ontosat_core::Ontology;
use std::io::{Read, Write};

pub fn read_json(reader: impl Read) -> Result<Ontology, ProviderError> {
    serde_json::from_reader(reader).map_err(|e| ProviderError::ParseFailure(format!("invalid ontology JSON: {}", e)))
}

/// Writes the ontology pretty-printed.
pub fn write_json<W: Write>(ontology: &Ontology, mut writer: W) -> Result<W, ProviderError> {
    serde_json::to_writer_pretty(&mut writer, ontology).map_err(|e| ProviderError::StorageFailure(e.to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| ProviderError::StorageFailure(e.to_string()))?;
    Ok(writer)
}
