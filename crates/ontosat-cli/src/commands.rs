//! Command line arguments and execution

use anyhow::{Context, Result};
use clap::Parser;
use ontosat_io::{FileOntologyProvider, OntologyFormat, OntologyProvider};
use ontosat_saturation::{SaturationMode, Saturator};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ontosat")]
#[command(about = "Makes the existential knowledge implied by role assertions explicit in an ontology")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Ontology to saturate (.owl/.rdf RDF/XML, .ttl, .nt or .json)
    #[arg(short = 'i', long = "ontology")]
    pub ontology: Option<PathBuf>,

    /// Saturated ontology path [default: <input dir>/<input stem>-saturated.<ext>]
    #[arg(short = 'o', long = "saturated-ontology")]
    pub output: Option<PathBuf>,

    /// assertional: add ∃r.C(x) facts; terminological: add named classes rC ≡ ∃r.C
    #[arg(short, long, env = "ONTOSAT_MODE", default_value = "assertional")]
    pub mode: SaturationMode,

    /// File of extra axioms, one per line, added before saturating
    #[arg(short, long)]
    pub axioms: Option<PathBuf>,

    /// Force the ontology format instead of inferring it from the extension
    #[arg(short, long)]
    pub format: Option<OntologyFormat>,

    /// Print the saturation report as JSON after saving
    #[arg(long)]
    pub report: bool,
}

/// Command execution result
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Only the program name was given.
pub fn is_bare_invocation<I, T>(args: I) -> bool
where
    I: IntoIterator<Item = T>,
{
    args.into_iter().nth(1).is_none()
}

/// `<input dir>/<input stem>-saturated.<ext>`, where `ext` is the forced
/// format's extension or the input's own.
pub fn default_output_path(input: &Path, format: Option<OntologyFormat>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ontology".to_string());
    let extension = match format {
        Some(format) => format.extension().to_string(),
        None => input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| OntologyFormat::Turtle.extension().to_string()),
    };

    let file_name = format!("{}-saturated.{}", stem, extension);
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Runs one saturation request
pub struct CommandExecutor {
    provider: FileOntologyProvider,
}

impl CommandExecutor {
    pub fn new(format: Option<OntologyFormat>) -> Self {
        Self {
            provider: FileOntologyProvider { format },
        }
    }

    /// Loads, saturates and saves. A missing `--ontology` is reported as an
    /// unsuccessful result rather than an error.
    pub fn execute(&self, cli: &Cli) -> Result<CommandResult> {
        let Some(input) = cli.ontology.as_deref() else {
            return Ok(CommandResult {
                success: false,
                message: "Missing arguments.".to_string(),
                data: None,
            });
        };

        let ontology = self
            .provider
            .load(Some(input))
            .with_context(|| format!("Failed to load ontology {}", input.display()))?;

        let supplement = match cli.axioms.as_deref() {
            Some(path) => self
                .provider
                .load_axioms(&ontology, path)
                .with_context(|| format!("Failed to read axioms from {}", path.display()))?,
            None => Vec::new(),
        };

        info!(mode = %cli.mode, supplement = supplement.len(), "Running saturator");
        let saturator = Saturator::builder()
            .ontology(ontology)
            .mode(cli.mode)
            .supplement(supplement)
            .build()?;
        let (saturated, report) = saturator.saturate_with_report();

        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(input, self.provider.format));
        self.provider
            .save(&saturated, &output)
            .with_context(|| format!("Failed to save saturated ontology to {}", output.display()))?;

        Ok(CommandResult {
            success: true,
            message: format!(
                "Saturated ontology saved at {} ({} new axioms, {} mode)",
                output.display(),
                report.new_axioms,
                report.mode
            ),
            data: Some(serde_json::to_value(&report)?),
        })
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(None)
    }
}
