//! Read-only view over untyped JSON-LD
//!
//! Structured data arrives as whatever the page author wrote. [`JsonLdView`]
//! offers named accessors that answer `None`/empty for anything missing or
//! oddly shaped, so rules never have to pattern-match raw JSON.

use serde_json::Value as JsonValue;
use std::collections::BTreeSet;

/// Borrowed view of a single JSON-LD node
#[derive(Debug, Clone, Copy)]
pub struct JsonLdView<'a> {
    value: &'a JsonValue,
}

impl<'a> JsonLdView<'a> {
    pub fn new(value: &'a JsonValue) -> Self {
        Self { value }
    }

    /// Flatten a raw block into its nodes.
    ///
    /// Handles top-level arrays and `@graph` containers, which is how sites
    /// commonly bundle several entities into one script tag.
    pub fn nodes(block: &'a JsonValue) -> Vec<JsonLdView<'a>> {
        let mut nodes = Vec::new();
        collect_nodes(block, &mut nodes);
        nodes
    }

    /// Schema types of this node, with IRI prefixes stripped
    pub fn types(&self) -> Vec<&'a str> {
        match self.value.get("@type") {
            Some(JsonValue::String(s)) => vec![shorten_iri(s)],
            Some(JsonValue::Array(items)) => items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(shorten_iri)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether this node declares `schema_type` (case-insensitive)
    pub fn has_type(&self, schema_type: &str) -> bool {
        self.types()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(schema_type))
    }

    /// A string property, if present and a string
    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        self.value
            .get(key)
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// A nested object property as another view
    pub fn object_field(&self, key: &str) -> Option<JsonLdView<'a>> {
        self.value
            .get(key)
            .filter(|v| v.is_object())
            .map(JsonLdView::new)
    }

    /// `dateModified`, falling back to `datePublished`
    pub fn date(&self) -> Option<&'a str> {
        self.str_field("dateModified")
            .or_else(|| self.str_field("datePublished"))
    }
}

fn collect_nodes<'a>(value: &'a JsonValue, out: &mut Vec<JsonLdView<'a>>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                collect_nodes(item, out);
            }
        }
        JsonValue::Object(map) => {
            if map.contains_key("@type") {
                out.push(JsonLdView::new(value));
            }
            if let Some(graph) = map.get("@graph") {
                collect_nodes(graph, out);
            }
        }
        _ => {}
    }
}

/// Strip the namespace from a schema IRI (`https://schema.org/Product` → `Product`)
pub fn shorten_iri(iri: &str) -> &str {
    if let Some(pos) = iri.rfind('#') {
        &iri[pos + 1..]
    } else if let Some(pos) = iri.rfind('/') {
        &iri[pos + 1..]
    } else {
        iri
    }
}

/// Distinct schema types across a set of blocks
pub fn distinct_types<'a>(blocks: impl IntoIterator<Item = &'a JsonValue>) -> BTreeSet<&'a str> {
    blocks
        .into_iter()
        .flat_map(JsonLdView::nodes)
        .flat_map(|node| node.types())
        .collect()
}
