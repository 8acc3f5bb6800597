//! # Error Handling
//!
//! Provides the unified `ExportError` enum used across the workspace.
//!
//! Problems with individual requests (no method, empty URL, unnamed
//! parameters) are not errors: they are skipped during flattening.

use derive_more::{Display, From};

/// The Global Error Enum.
#[derive(Debug, Display, From)]
pub enum ExportError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The export file is not valid JSON or does not match the expected shape.
    #[display("Invalid export: {_0}")]
    Json(serde_json::Error),

    /// The OpenAPI document could not be rendered.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// No workspace in the export matches the selector.
    #[from(ignore)]
    #[display("Workspace not found: {_0}")]
    WorkspaceNotFound(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for ExportError {}

/// Helper type alias for Result using ExportError.
pub type ExportResult<T> = Result<T, ExportError>;
