#![deny(missing_docs)]

//! # Insomnia OAS Core
//!
//! Converts a saved Insomnia request collection (workspace, folders,
//! requests, environments) into an OpenAPI 3.0 document.
//!
//! The transform is a pure function of its input snapshot. Requests that
//! cannot be exported are skipped and logged; only loading the collection and
//! rendering YAML can fail.

/// Shared error types.
pub mod error;

/// Input snapshot and Insomnia export loader.
pub mod collection;

/// Export configuration.
pub mod options;

/// `operationId` sanitizing.
pub mod naming;

/// Request URL -> path template.
pub mod url;

/// Path and query parameter extraction.
pub mod params;

/// Request body extraction.
pub mod body;

/// Folder tree flattening.
pub mod tree;

/// Document assembly and YAML rendering.
pub mod document;

pub use body::extract_request_body;
pub use collection::{Body, Collection, Environment, Param, Request, RequestGroup, Workspace};
pub use document::{build_document, default_file_name, export_yaml, to_yaml};
pub use error::{ExportError, ExportResult};
pub use naming::sanitize_for_operation_id;
pub use options::ExportOptions;
pub use params::{collect_parameters, extract_parameters, ParamLocation, RequestParam};
pub use tree::{flatten, ResourceIndex};
pub use url::normalize_url;
