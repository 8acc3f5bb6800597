//! # Collection Snapshot
//!
//! Read-only input model for one export run: a workspace plus the
//! environments, folders (request groups) and requests saved under it.
//!
//! Field names follow the Insomnia export format (`_id`, `parentId`,
//! `mimeType`, ...). Every field other than `_id` is optional so that a
//! partially filled resource still deserializes and can be skipped later.

use crate::error::{ExportError, ExportResult};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// `_id` prefix carried by folders.
pub const FOLDER_PREFIX: &str = "fld_";

/// `_id` prefix carried by requests.
pub const REQUEST_PREFIX: &str = "req_";

/// Root of the parent-pointer tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Workspace {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name, used as the document title and the root tag.
    #[serde(default)]
    pub name: String,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A set of template variables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// The workspace (base environment) or another environment (sub environment).
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Variable values.
    #[serde(default)]
    pub data: Option<IndexMap<String, Value>>,
}

/// A folder of requests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestGroup {
    /// Unique identifier, `fld_` prefixed.
    #[serde(rename = "_id")]
    pub id: String,
    /// Enclosing folder or workspace.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Folder name, becomes the tag of every operation below it.
    #[serde(default)]
    pub name: Option<String>,
}

/// A saved HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier, `req_` prefixed.
    #[serde(rename = "_id")]
    pub id: String,
    /// Enclosing folder or workspace.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// HTTP verb in any case.
    #[serde(default)]
    pub method: Option<String>,
    /// Raw URL, may contain `{{ var }}` templates and a query string.
    #[serde(default)]
    pub url: Option<String>,
    /// Request payload definition.
    #[serde(default)]
    pub body: Option<Body>,
    /// Query parameters.
    #[serde(default)]
    pub parameters: Vec<Param>,
    /// Path parameters.
    #[serde(default)]
    pub path_parameters: Vec<Param>,
}

/// A request payload definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    /// Content type, e.g. `multipart/form-data`.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Form fields.
    #[serde(default)]
    pub params: Vec<Param>,
}

/// A named value: query, path or form parameter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Param {
    /// Parameter name. Unnamed parameters are skipped.
    #[serde(default)]
    pub name: Option<String>,
    /// Sample value.
    #[serde(default)]
    pub value: Option<String>,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Disabled parameters are exported as optional.
    #[serde(default)]
    pub disabled: bool,
    /// Form field kind, `file` for uploads.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Param {
    /// Returns the name if it is present and non-empty.
    pub fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Immutable snapshot consumed by one export run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// The exported workspace.
    pub workspace: Workspace,
    /// All environments.
    pub environments: Vec<Environment>,
    /// All requests.
    pub requests: Vec<Request>,
    /// All folders.
    pub request_groups: Vec<RequestGroup>,
}

#[derive(Debug, Deserialize)]
struct InsomniaExport {
    #[serde(default)]
    resources: Vec<Value>,
}

/// Decodes one non-workspace resource. A malformed resource is logged and
/// dropped so the rest of the export still loads.
fn decode_lenient<T: DeserializeOwned>(resource: Value) -> Option<T> {
    let id = resource.get("_id").cloned();
    match serde_json::from_value(resource) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::warn!(id = ?id, %err, "Skipping malformed resource");
            None
        }
    }
}

impl Collection {
    /// Reads an Insomnia JSON export from disk.
    ///
    /// See [`Collection::from_insomnia_export`] for the meaning of `selector`.
    pub fn from_path(path: impl AsRef<Path>, selector: Option<&str>) -> ExportResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_insomnia_export(&raw, selector)
    }

    /// Parses an Insomnia v4 JSON export.
    ///
    /// Resources are routed by their `_type`; unknown types (cookie jars,
    /// api specs, grpc requests, ...) are ignored. `selector` picks the
    /// workspace by `_id` or by name, otherwise the first workspace is used.
    pub fn from_insomnia_export(json: &str, selector: Option<&str>) -> ExportResult<Self> {
        let export: InsomniaExport = serde_json::from_str(json)?;

        let mut workspaces: Vec<Workspace> = Vec::new();
        let mut collection = Collection::default();

        for resource in export.resources {
            let kind = resource
                .get("_type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            match kind.as_str() {
                "workspace" => workspaces.push(serde_json::from_value(resource)?),
                "environment" => collection.environments.extend(decode_lenient(resource)),
                "request_group" => collection.request_groups.extend(decode_lenient(resource)),
                "request" => collection.requests.extend(decode_lenient(resource)),
                _ => {}
            }
        }

        let workspace = match selector {
            Some(sel) => workspaces
                .into_iter()
                .find(|w| w.id == sel || w.name == sel)
                .ok_or_else(|| ExportError::WorkspaceNotFound(sel.to_string()))?,
            None => workspaces
                .into_iter()
                .next()
                .ok_or_else(|| ExportError::WorkspaceNotFound("<none in export>".to_string()))?,
        };
        tracing::debug!(
            workspace = %workspace.name,
            requests = collection.requests.len(),
            folders = collection.request_groups.len(),
            environments = collection.environments.len(),
            "Loaded collection"
        );

        collection.workspace = workspace;
        Ok(collection)
    }

    /// The environment directly under the workspace, if any.
    pub fn base_environment(&self) -> Option<&Environment> {
        self.environments
            .iter()
            .find(|e| e.parent_id.as_deref() == Some(self.workspace.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EXPORT: &str = r#"{
        "_type": "export",
        "__export_format": 4,
        "resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "Demo", "description": "Demo API"},
            {"_id": "wrk_2", "_type": "workspace", "name": "Other"},
            {"_id": "env_1", "_type": "environment", "parentId": "wrk_1", "data": {"baseURL": "https://api.x.com"}},
            {"_id": "fld_1", "_type": "request_group", "parentId": "wrk_1", "name": "Users"},
            {"_id": "req_1", "_type": "request", "parentId": "fld_1", "name": "List", "method": "GET",
             "url": "{{ baseURL }}/users", "body": {},
             "parameters": [{"name": "page", "value": "1", "disabled": true}]},
            {"_id": "jar_1", "_type": "cookie_jar", "parentId": "wrk_1"}
        ]
    }"#;

    #[test]
    fn test_parse_export_first_workspace() {
        let c = Collection::from_insomnia_export(EXPORT, None).unwrap();
        assert_eq!(c.workspace.id, "wrk_1");
        assert_eq!(c.workspace.description.as_deref(), Some("Demo API"));
        assert_eq!(c.environments.len(), 1);
        assert_eq!(c.request_groups.len(), 1);
        assert_eq!(c.requests.len(), 1);

        let req = &c.requests[0];
        assert_eq!(req.parent_id.as_deref(), Some("fld_1"));
        assert_eq!(req.body, Some(Body::default()));
        assert_eq!(req.parameters[0].named(), Some("page"));
        assert!(req.parameters[0].disabled);
        assert!(req.path_parameters.is_empty());
    }

    #[test]
    fn test_select_workspace_by_name_and_id() {
        let by_name = Collection::from_insomnia_export(EXPORT, Some("Other")).unwrap();
        assert_eq!(by_name.workspace.id, "wrk_2");
        let by_id = Collection::from_insomnia_export(EXPORT, Some("wrk_1")).unwrap();
        assert_eq!(by_id.workspace.name, "Demo");
    }

    #[test]
    fn test_missing_workspace() {
        let err = Collection::from_insomnia_export(EXPORT, Some("nope")).unwrap_err();
        assert!(matches!(err, ExportError::WorkspaceNotFound(s) if s == "nope"));

        let empty = r#"{"resources": []}"#;
        let err = Collection::from_insomnia_export(empty, None).unwrap_err();
        assert!(matches!(err, ExportError::WorkspaceNotFound(_)));
    }

    #[test]
    fn test_base_environment() {
        let c = Collection::from_insomnia_export(EXPORT, None).unwrap();
        assert_eq!(c.base_environment().map(|e| e.id.as_str()), Some("env_1"));

        let other = Collection::from_insomnia_export(EXPORT, Some("wrk_2")).unwrap();
        assert!(other.base_environment().is_none());
    }

    #[test]
    fn test_malformed_resources_are_skipped() {
        let export = r#"{"resources": [
            {"_id": "wrk_1", "_type": "workspace", "name": "Demo"},
            {"_id": "req_good", "_type": "request", "parentId": "wrk_1",
             "method": "GET", "url": "/ok"},
            {"_id": "req_null", "_type": "request", "parentId": "wrk_1",
             "method": "GET", "url": "/bad", "parameters": null},
            {"_id": "req_num", "_type": "request", "parentId": "wrk_1", "name": 5},
            {"_id": "fld_bad", "_type": "request_group", "parentId": "wrk_1", "name": []},
            {"_id": "env_bad", "_type": "environment", "parentId": "wrk_1", "data": "x"}
        ]}"#;
        let c = Collection::from_insomnia_export(export, None).unwrap();
        assert_eq!(c.requests.len(), 1);
        assert_eq!(c.requests[0].id, "req_good");
        assert!(c.request_groups.is_empty());
        assert!(c.environments.is_empty());
    }

    #[test]
    fn test_malformed_workspace_is_fatal() {
        let export = r#"{"resources": [{"_id": "wrk_1", "_type": "workspace", "name": 5}]}"#;
        let err = Collection::from_insomnia_export(export, None).unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }

    #[test]
    fn test_named_rejects_empty() {
        let p = Param {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(p.named(), None);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, EXPORT).unwrap();
        let c = Collection::from_path(&path, None).unwrap();
        assert_eq!(c.workspace.name, "Demo");

        let err = Collection::from_path(dir.path().join("missing.json"), None).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
