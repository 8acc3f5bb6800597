//! # Export Options
//!
//! Knobs for the parts of the document that are not derived from the
//! collection itself.

/// Server URL used when the base environment defines no base URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost";

/// `info.version` of the generated document.
pub const DEFAULT_API_VERSION: &str = "1.0.0";

/// Options for [`crate::document::build_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Server URL emitted when no base URL variable is found.
    pub fallback_server_url: String,
    /// Value of `info.version`.
    pub api_version: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            fallback_server_url: DEFAULT_SERVER_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!(options.fallback_server_url, "http://localhost");
        assert_eq!(options.api_version, "1.0.0");
    }
}
