//! # Resource Tree Flattening
//!
//! Folders and requests point at their parent by id. The tree is rebuilt once
//! as a parent id -> children index, then walked depth first into a flat
//! `path -> method -> operation` table. Each operation is tagged with the name
//! of its nearest named folder, or the root tag when there is none.

use crate::body::extract_request_body;
use crate::collection::{Request, RequestGroup, FOLDER_PREFIX, REQUEST_PREFIX};
use crate::naming::operation_id;
use crate::params::extract_parameters;
use crate::url::normalize_url;
use indexmap::IndexMap;
use openapiv3::{Operation, PathItem, Paths, ReferenceOr, Response, Responses, StatusCode};
use std::collections::HashMap;

/// A child of a folder or of the workspace.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// A nested folder.
    Folder(&'a RequestGroup),
    /// A leaf request.
    Request(&'a Request),
}

/// Why a request produced no operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL normalized to an empty path.
    EmptyPath,
    /// No method was saved.
    MissingMethod,
    /// The method has no OpenAPI 3.0 path item slot.
    UnsupportedMethod(String),
}

/// Parent id -> ordered children, built once per export run.
///
/// Within one parent, folders come first (in group order), then requests
/// (in request order). Resources whose id lacks the `fld_` / `req_` prefix are
/// left out.
#[derive(Debug, Default)]
pub struct ResourceIndex<'a> {
    children: HashMap<&'a str, Vec<Resource<'a>>>,
}

impl<'a> ResourceIndex<'a> {
    /// Indexes `groups` and `requests` by parent id.
    pub fn new(requests: &'a [Request], groups: &'a [RequestGroup]) -> Self {
        let mut children: HashMap<&'a str, Vec<Resource<'a>>> = HashMap::new();

        for group in groups {
            if !group.id.starts_with(FOLDER_PREFIX) {
                tracing::debug!(id = %group.id, "Ignoring folder without fld_ prefix");
                continue;
            }
            if let Some(parent) = group.parent_id.as_deref() {
                children.entry(parent).or_default().push(Resource::Folder(group));
            }
        }
        for request in requests {
            if !request.id.starts_with(REQUEST_PREFIX) {
                tracing::debug!(id = %request.id, "Ignoring request without req_ prefix");
                continue;
            }
            if let Some(parent) = request.parent_id.as_deref() {
                children.entry(parent).or_default().push(Resource::Request(request));
            }
        }

        Self { children }
    }

    /// Direct children of `parent_id`.
    pub fn children(&self, parent_id: &str) -> &[Resource<'a>] {
        self.children
            .get(parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Flattens everything below `root_parent_id` into OpenAPI paths.
///
/// `root_tag` tags operations that have no named enclosing folder; pass the
/// workspace name. Requests that cannot be exported are skipped.
pub fn flatten(
    requests: &[Request],
    groups: &[RequestGroup],
    root_parent_id: &str,
    root_tag: Option<&str>,
) -> Paths {
    let index = ResourceIndex::new(requests, groups);
    let mut paths = Paths::default();
    process_resources(&index, root_parent_id, root_tag, &mut paths);
    paths
}

fn process_resources(
    index: &ResourceIndex<'_>,
    parent_id: &str,
    tag: Option<&str>,
    paths: &mut Paths,
) {
    for resource in index.children(parent_id) {
        match *resource {
            Resource::Folder(group) => {
                let folder_tag = group.name.as_deref().filter(|n| !n.is_empty()).or(tag);
                process_resources(index, &group.id, folder_tag, paths);
            }
            Resource::Request(request) => {
                if let Err(reason) = insert_operation(request, tag, paths) {
                    tracing::debug!(
                        request = %request.id,
                        name = request.name.as_deref().unwrap_or_default(),
                        ?reason,
                        "Skipping request"
                    );
                }
            }
        }
    }
}

fn insert_operation(
    request: &Request,
    tag: Option<&str>,
    paths: &mut Paths,
) -> Result<(), SkipReason> {
    let (path, method, operation) = build_operation(request, tag)?;

    let item = paths
        .paths
        .entry(path)
        .or_insert_with(|| ReferenceOr::Item(PathItem::default()));
    if let ReferenceOr::Item(item) = item {
        if let Some(slot) = method_slot(item, &method) {
            *slot = Some(operation);
        }
    }
    Ok(())
}

/// Builds the operation for one request, returning its path key and method.
pub fn build_operation(
    request: &Request,
    tag: Option<&str>,
) -> Result<(String, String, Operation), SkipReason> {
    let path = normalize_url(request.url.as_deref());
    if path.is_empty() {
        return Err(SkipReason::EmptyPath);
    }

    let method = request
        .method
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or(SkipReason::MissingMethod)?
        .to_lowercase();
    if !is_path_item_method(&method) {
        return Err(SkipReason::UnsupportedMethod(method));
    }

    let operation = Operation {
        summary: Some(
            request
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "No summary".to_string()),
        ),
        description: Some(request.description.clone().unwrap_or_default()),
        operation_id: Some(operation_id(&method, &path, request.name.as_deref())),
        tags: tag
            .filter(|t| !t.is_empty())
            .map(|t| vec![t.to_string()])
            .unwrap_or_default(),
        parameters: extract_parameters(request),
        request_body: extract_request_body(request).map(ReferenceOr::Item),
        responses: placeholder_responses(),
        ..Default::default()
    };

    Ok((path, method, operation))
}

/// `200`, `400` and `500` with fixed descriptions.
pub fn placeholder_responses() -> Responses {
    let mut responses = IndexMap::new();
    for (code, description) in [(200, "Successful"), (400, "Bad Request"), (500, "Server Error")] {
        responses.insert(
            StatusCode::Code(code),
            ReferenceOr::Item(Response {
                description: description.to_string(),
                ..Default::default()
            }),
        );
    }
    Responses {
        responses,
        ..Default::default()
    }
}

const PATH_ITEM_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

fn is_path_item_method(method: &str) -> bool {
    PATH_ITEM_METHODS.contains(&method)
}

/// The operation slot of `item` for a lowercase `method`.
pub fn method_slot<'i>(
    item: &'i mut PathItem,
    method: &str,
) -> Option<&'i mut Option<Operation>> {
    match method {
        "get" => Some(&mut item.get),
        "put" => Some(&mut item.put),
        "post" => Some(&mut item.post),
        "delete" => Some(&mut item.delete),
        "options" => Some(&mut item.options),
        "head" => Some(&mut item.head),
        "patch" => Some(&mut item.patch),
        "trace" => Some(&mut item.trace),
        _ => None,
    }
}
