#![deny(missing_docs)]

//! # Export Command
//!
//! Loads an Insomnia export, converts the selected workspace and writes the
//! OpenAPI YAML.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use insomnia_oas_core::options::{DEFAULT_API_VERSION, DEFAULT_SERVER_URL};
use insomnia_oas_core::{default_file_name, export_yaml, Collection, ExportOptions};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Arguments for the export command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the Insomnia JSON export.
    #[clap(short, long)]
    pub input: PathBuf,

    /// Output file. Defaults to `<workspace>-openapi.yaml`; `-` writes to stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Workspace `_id` or name. Defaults to the first workspace in the export.
    #[clap(short, long)]
    pub workspace: Option<String>,

    /// Server URL used when the base environment has no base URL variable.
    #[clap(long, env = "INSOMNIA_OAS_FALLBACK_SERVER", default_value = DEFAULT_SERVER_URL)]
    pub fallback_server: String,

    /// Value of `info.version`.
    #[clap(long, env = "INSOMNIA_OAS_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            fallback_server_url: self.fallback_server.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

/// Executes the export.
///
/// The document is rendered completely before the destination is touched.
/// Returns the path written, or `None` for stdout.
pub fn execute(args: &ExportArgs) -> CliResult<Option<PathBuf>> {
    if !args.input.exists() {
        return Err(CliError::General(format!(
            "Export file not found: {:?}",
            args.input
        )));
    }

    let collection = Collection::from_path(&args.input, args.workspace.as_deref())?;
    let yaml = export_yaml(&collection, &args.options())?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(&collection.workspace)));

    if output.as_os_str() == "-" {
        io::stdout().write_all(yaml.as_bytes())?;
        return Ok(None);
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, yaml)?;
    info!(path = %output.display(), "OpenAPI spec exported");
    Ok(Some(output))
}
