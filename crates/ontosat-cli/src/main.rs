//! ontosat CLI main entry point

use anyhow::Result;
use clap::{CommandFactory, Parser};
use ontosat_cli::commands::{is_bare_invocation, Cli, CommandExecutor};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if is_bare_invocation(std::env::args_os()) {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();

    let executor = CommandExecutor::new(cli.format);
    let result = executor.execute(&cli)?;

    if !result.success {
        eprintln!("{}", result.message);
        eprintln!();
        Cli::command().print_help()?;
        std::process::exit(1);
    }

    println!("{}", result.message);
    if cli.report {
        if let Some(report) = &result.data {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
