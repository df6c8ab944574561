//! Knowledge-graph JSON loader
//!
//! Reads the ecosystem document
//!
//! ```json
//! {
//!   "entities": { "<id>": { "type": "startup", "properties": { ... } } },
//!   "relationships": [ { "source": "<id>", "target": "<id>", "type": "USES_TECHNOLOGY", "properties": { ... } } ]
//! }
//! ```
//!
//! into a frozen [`GraphStore`]. Entities are added in document order.
//!
//! Values are cleaned on the way in: JSON `null`, the sentinel strings
//! `"NaN"`, `"None"` and `"null"`, and bare `NaN`/`Infinity` tokens (as
//! written by Python's `json` module) all become [`PropertyValue::Null`].
//! Arrays and objects are not scalars and are kept as their JSON text.

use crate::graph::{EntityKind, GraphError, GraphStore, PropertyMap, PropertyValue};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a knowledge graph
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed knowledge graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entity {id} has unknown type '{tag}'")]
    UnknownEntityType { id: String, tag: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type LoadResult<T> = Result<T, LoadError>;

const NULL_SENTINELS: [&str; 3] = ["NaN", "None", "null"];

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    entities: IndexMap<String, RawEntity>,
    #[serde(default)]
    relationships: Vec<RawRelationship>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    source: String,
    target: String,
    #[serde(rename = "type")]
    rel_type: String,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// Load a knowledge graph from a reader
pub fn load_knowledge_graph(mut reader: impl Read) -> LoadResult<GraphStore> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    load_knowledge_graph_str(&text)
}

/// Load a knowledge graph from a JSON file
pub fn load_knowledge_graph_file(path: impl AsRef<Path>) -> LoadResult<GraphStore> {
    let path = path.as_ref();
    info!("Loading knowledge graph from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_knowledge_graph(std::io::BufReader::new(file))
}

/// Load a knowledge graph from JSON text
pub fn load_knowledge_graph_str(text: &str) -> LoadResult<GraphStore> {
    let raw: RawGraph = serde_json::from_str(&null_non_finite(text))?;
    debug!(
        "Parsed {} entities and {} relationships",
        raw.entities.len(),
        raw.relationships.len()
    );

    let mut store = GraphStore::new();

    for (id, entity) in raw.entities {
        let kind = EntityKind::from_tag(&entity.kind).ok_or_else(|| LoadError::UnknownEntityType {
            id: id.clone(),
            tag: entity.kind.clone(),
        })?;
        store.add_entity(id, kind, clean_properties(entity.properties))?;
    }

    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for rel in raw.relationships {
        *by_type.entry(rel.rel_type.clone()).or_default() += 1;
        store.add_relationship(
            rel.source,
            rel.target,
            rel.rel_type,
            clean_properties(rel.properties),
        )?;
    }

    store.freeze();

    info!(
        "Loaded knowledge graph: {} entities, {} relationships",
        store.entity_count(),
        store.relationship_count()
    );
    for kind in EntityKind::ALL {
        info!("  {}: {}", kind, store.count_by_kind(kind));
    }
    for (rel_type, count) in &by_type {
        debug!("  {}: {}", rel_type, count);
    }

    Ok(store)
}

/// Clean a property map into scalar attributes
pub fn clean_properties(properties: Option<Map<String, Value>>) -> PropertyMap {
    properties
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, clean_value(value)))
        .collect()
}

/// Convert one JSON value into a scalar attribute
pub fn clean_value(value: Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => PropertyValue::Integer(i),
            None => match n.as_f64() {
                Some(f) if f.is_finite() => PropertyValue::Float(f),
                _ => PropertyValue::Null,
            },
        },
        Value::String(s) if NULL_SENTINELS.contains(&s.as_str()) => PropertyValue::Null,
        Value::String(s) => PropertyValue::String(s),
        nested @ (Value::Array(_) | Value::Object(_)) => PropertyValue::String(nested.to_string()),
    }
}

/// Replace bare `NaN`, `Infinity` and `-Infinity` tokens outside string
/// literals with `null`. Borrows the input when there is nothing to replace.
fn null_non_finite(text: &str) -> Cow<'_, str> {
    const TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

    if !TOKENS.iter().any(|token| text.contains(token)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}
