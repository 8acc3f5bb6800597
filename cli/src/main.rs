#![deny(missing_docs)]

//! # Insomnia OAS CLI
//!
//! Command line host for the exporter.
//!
//! Supported Commands:
//! - `export`: Insomnia JSON export -> OpenAPI 3.0 YAML.

use clap::{Parser, Subcommand};

use crate::error::CliResult;

mod error;
mod export;
mod logging;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Insomnia -> OpenAPI 3.0 exporter")]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a workspace as an OpenAPI 3.0 YAML document.
    Export(export::ExportArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Commands::Export(args) => {
            export::execute(args)?;
        }
    }

    Ok(())
}
