//! # Parameter Extraction
//!
//! Derives the path and query parameters of one request. Path parameters come
//! first, then query parameters, each in declaration order, with at most one
//! entry per `(name, location)`.

use crate::collection::Request;
use indexmap::map::Entry;
use indexmap::IndexMap;
use openapiv3::{
    Parameter, ParameterData, ParameterSchemaOrContent, PathStyle, QueryStyle, ReferenceOr,
    Schema, SchemaData, SchemaKind, StringType, Type,
};
use std::fmt;

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// A `{name}` segment of the path template.
    Path,
    /// A query string entry.
    Query,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamLocation::Path => write!(f, "path"),
            ParamLocation::Query => write!(f, "query"),
        }
    }
}

/// A deduplicated request parameter, before conversion to OpenAPI types.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParam {
    /// Parameter name.
    pub name: String,
    /// Path or query.
    pub location: ParamLocation,
    /// Always true for path parameters; for query parameters, true when any
    /// occurrence is enabled.
    pub required: bool,
    /// Description, empty when the saved parameter has none.
    pub description: String,
}

impl RequestParam {
    /// Converts into an OpenAPI parameter with a `string` schema.
    pub fn into_openapi(self) -> Parameter {
        let parameter_data = ParameterData {
            name: self.name,
            description: Some(self.description),
            required: self.required,
            deprecated: None,
            format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(string_schema())),
            example: None,
            examples: IndexMap::new(),
            explode: None,
            extensions: IndexMap::new(),
        };
        match self.location {
            ParamLocation::Path => Parameter::Path {
                parameter_data,
                style: PathStyle::Simple,
            },
            ParamLocation::Query => Parameter::Query {
                parameter_data,
                allow_reserved: false,
                style: QueryStyle::Form,
                allow_empty_value: None,
            },
        }
    }
}

pub(crate) fn string_schema() -> Schema {
    Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(Type::String(StringType::default())),
    }
}

/// Collects the parameters of `request`.
///
/// Unnamed parameters are skipped. A repeated path parameter is dropped. A
/// repeated query parameter keeps its first entry, except that an enabled
/// occurrence upgrades an optional entry to required.
pub fn collect_parameters(request: &Request) -> Vec<RequestParam> {
    let mut seen: IndexMap<(String, ParamLocation), RequestParam> = IndexMap::new();

    for param in &request.path_parameters {
        let Some(name) = param.named() else {
            tracing::debug!(request = %request.id, "Skipping unnamed path parameter");
            continue;
        };
        seen.entry((name.to_string(), ParamLocation::Path))
            .or_insert_with(|| RequestParam {
                name: name.to_string(),
                location: ParamLocation::Path,
                required: true,
                description: param.description.clone().unwrap_or_default(),
            });
    }

    for param in &request.parameters {
        let Some(name) = param.named() else {
            tracing::debug!(request = %request.id, "Skipping unnamed query parameter");
            continue;
        };
        match seen.entry((name.to_string(), ParamLocation::Query)) {
            Entry::Occupied(mut existing) => {
                let existing = existing.get_mut();
                if !param.disabled && !existing.required {
                    existing.required = true;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(RequestParam {
                    name: name.to_string(),
                    location: ParamLocation::Query,
                    required: !param.disabled,
                    description: param.description.clone().unwrap_or_default(),
                });
            }
        }
    }

    seen.into_values().collect()
}

/// Collects the parameters of `request` as OpenAPI parameter objects.
pub fn extract_parameters(request: &Request) -> Vec<ReferenceOr<Parameter>> {
    collect_parameters(request)
        .into_iter()
        .map(|p| ReferenceOr::Item(p.into_openapi()))
        .collect()
}
