//! # Request Body Extraction
//!
//! Maps a saved form body onto an OpenAPI `requestBody` with one `string`
//! property per form field.

use crate::collection::Request;
use indexmap::IndexMap;
use openapiv3::{
    MediaType, ObjectType, ReferenceOr, RequestBody, Schema, SchemaData, SchemaKind, StringFormat,
    StringType, Type, VariantOrUnknownOrEmpty,
};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn bracket_suffix_re() -> &'static Regex {
    static BRACKET_RE: OnceLock<Regex> = OnceLock::new();
    BRACKET_RE.get_or_init(|| Regex::new(r"\[.*?\]").expect("Invalid regex"))
}

/// Strips `[...]` groups so `tags[]` and `tags[0]` both map to `tags`.
pub fn property_name(raw: &str) -> String {
    bracket_suffix_re().replace_all(raw, "").into_owned()
}

/// Builds the request body, or `None` when the request has no body or no
/// mime type.
pub fn extract_request_body(request: &Request) -> Option<RequestBody> {
    let body = request.body.as_ref()?;
    let mime_type = body.mime_type.as_deref().filter(|m| !m.is_empty())?;

    let mut properties: IndexMap<String, ReferenceOr<Box<Schema>>> = IndexMap::new();
    for param in &body.params {
        let Some(name) = param.named() else {
            continue;
        };

        let format = if param.kind.as_deref() == Some("file") {
            VariantOrUnknownOrEmpty::Item(StringFormat::Binary)
        } else {
            VariantOrUnknownOrEmpty::Empty
        };
        let schema = Schema {
            schema_data: SchemaData {
                description: Some(param.description.clone().unwrap_or_default()),
                example: Some(Value::String(param.value.clone().unwrap_or_default())),
                ..Default::default()
            },
            schema_kind: SchemaKind::Type(Type::String(StringType {
                format,
                ..Default::default()
            })),
        };
        properties.insert(property_name(name), ReferenceOr::Item(Box::new(schema)));
    }

    let schema = Schema {
        schema_data: SchemaData::default(),
        schema_kind: SchemaKind::Type(Type::Object(ObjectType {
            properties,
            ..Default::default()
        })),
    };

    let mut content = IndexMap::new();
    content.insert(
        mime_type.to_string(),
        MediaType {
            schema: Some(ReferenceOr::Item(schema)),
            ..Default::default()
        },
    );

    Some(RequestBody {
        content,
        ..Default::default()
    })
}
