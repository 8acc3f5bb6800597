//! # Document Assembly
//!
//! Wraps the flattened paths into a complete OpenAPI 3.0 document and renders
//! it as YAML.

use crate::collection::{Collection, Environment, Workspace};
use crate::error::ExportResult;
use crate::options::ExportOptions;
use crate::tree::flatten;
use openapiv3::{Info, OpenAPI, Server};
use serde_json::Value;

/// Version string written to the `openapi` field.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Base URL variable names, checked in this order.
pub const BASE_URL_KEYS: [&str; 4] = ["baseURL", "base_url", "baseUrl", "BASE_URL"];

/// Looks up the base URL in an environment's variables.
///
/// The first key of [`BASE_URL_KEYS`] holding a non-empty string wins.
pub fn base_url(environment: &Environment) -> Option<&str> {
    let data = environment.data.as_ref()?;
    BASE_URL_KEYS
        .iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_str))
        .find(|url| !url.is_empty())
}

/// Builds the OpenAPI document for `collection`.
pub fn build_document(collection: &Collection, options: &ExportOptions) -> OpenAPI {
    let workspace = &collection.workspace;

    let server_url = collection
        .base_environment()
        .and_then(base_url)
        .unwrap_or(options.fallback_server_url.as_str());

    let paths = flatten(
        &collection.requests,
        &collection.request_groups,
        &workspace.id,
        Some(workspace.name.as_str()),
    );
    tracing::info!(
        workspace = %workspace.name,
        server = server_url,
        paths = paths.paths.len(),
        "Built OpenAPI document"
    );

    OpenAPI {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: workspace.name.clone(),
            description: Some(workspace.description.clone().unwrap_or_default()),
            version: options.api_version.clone(),
            ..Default::default()
        },
        servers: vec![Server {
            url: server_url.to_string(),
            ..Default::default()
        }],
        paths,
        ..Default::default()
    }
}

/// Renders `document` as YAML, keeping field and map insertion order.
pub fn to_yaml(document: &OpenAPI) -> ExportResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Builds and renders in one step. The YAML is complete before it is returned.
pub fn export_yaml(collection: &Collection, options: &ExportOptions) -> ExportResult<String> {
    to_yaml(&build_document(collection, options))
}

/// Suggested output file name, e.g. `Demo-openapi.yaml`.
pub fn default_file_name(workspace: &Workspace) -> String {
    format!("{}-openapi.yaml", workspace.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Request;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn env(parent: &str, data: Option<Value>) -> Environment {
        Environment {
            id: "env_1".into(),
            parent_id: Some(parent.into()),
            data: data.map(|d| serde_json::from_value::<IndexMap<String, Value>>(d).unwrap()),
        }
    }

    fn demo(environments: Vec<Environment>) -> Collection {
        Collection {
            workspace: Workspace {
                id: "wrk_1".into(),
                name: "Demo".into(),
                description: None,
            },
            environments,
            requests: vec![Request {
                id: "req_1".into(),
                parent_id: Some("wrk_1".into()),
                name: Some("Get Widget".into()),
                method: Some("GET".into()),
                url: Some("{{ baseURL }}/widgets/:id".into()),
                ..Default::default()
            }],
            request_groups: vec![],
        }
    }

    #[test]
    fn test_base_url_priority() {
        let e = env(
            "wrk_1",
            Some(json!({"BASE_URL": "https://d", "base_url": "https://b", "baseURL": ""})),
        );
        assert_eq!(base_url(&e), Some("https://b"));
        assert_eq!(base_url(&env("wrk_1", Some(json!({"baseUrl": 3})))), None);
        assert_eq!(base_url(&env("wrk_1", None)), None);
    }

    #[test]
    fn test_document_header() {
        let collection = demo(vec![env("wrk_1", Some(json!({"baseURL": "https://api.x.com"})))]);
        let doc = build_document(&collection, &ExportOptions::default());
        assert_eq!(doc.openapi, "3.0.0");
        assert_eq!(doc.info.title, "Demo");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(doc.info.description.as_deref(), Some(""));
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.servers[0].url, "https://api.x.com");
        assert!(doc.paths.paths.contains_key("/widgets/{id}"));
    }

    #[test]
    fn test_fallback_server() {
        let options = ExportOptions {
            fallback_server_url: "https://fallback".into(),
            api_version: "2.1.0".into(),
        };
        // Sub environment only: parent is not the workspace.
        let sub_only = demo(vec![env("env_base", Some(json!({"baseURL": "x"})))]);
        let doc = build_document(&sub_only, &options);
        assert_eq!(doc.servers[0].url, "https://fallback");
        assert_eq!(doc.info.version, "2.1.0");

        let doc = build_document(&demo(vec![]), &ExportOptions::default());
        assert_eq!(doc.servers[0].url, "http://localhost");
    }

    #[test]
    fn test_yaml_is_deterministic() {
        let collection = demo(vec![]);
        let options = ExportOptions::default();
        assert_eq!(
            export_yaml(&collection, &options).unwrap(),
            export_yaml(&collection, &options).unwrap()
        );
    }

    #[test]
    fn test_yaml_key_order() {
        let yaml = export_yaml(&demo(vec![]), &ExportOptions::default()).unwrap();
        let top: Vec<&str> = yaml
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-') && l.contains(':'))
            .map(|l| l.split(':').next().unwrap())
            .collect();
        let position = |key: &str| top.iter().position(|k| *k == key).unwrap();
        assert_eq!(position("openapi"), 0);
        assert!(position("info") < position("servers"));
        assert!(position("servers") < position("paths"));
        assert!(yaml.contains("\n  title: Demo\n"));
    }

    #[test]
    fn test_default_file_name() {
        let ws = Workspace {
            name: "Demo".into(),
            ..Default::default()
        };
        assert_eq!(default_file_name(&ws), "Demo-openapi.yaml");
    }
}
