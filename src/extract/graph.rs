//! Reference graph resolution
//!
//! The embedded state stores its records as a flat mapping from keys such as
//! `"StartupResult:123"` to node bodies. Bodies point at each other through
//! small reference objects instead of nesting. [`GraphResolver`] inlines
//! those references so every listing becomes a self-contained tree.
//!
//! Resolution is depth-first with a memo table and an on-path set. A
//! reference back onto the current path is left as-is, and so is any
//! reference more than [`MAX_REFERENCE_DEPTH`] hops from where resolution
//! started. Resolution therefore terminates with bounded stack use for any
//! graph shape.

use crate::{ExtractionError, ExtractionResult};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Flat mapping from node key to node body
pub type NodeMap = Map<String, Value>;

/// Longest chain of reference hops inlined from one starting node
pub const MAX_REFERENCE_DEPTH: usize = 128;

/// Locates the flat node mapping inside an embedded state document
///
/// Looks at `props.pageProps.apolloState.data` first, then at
/// `props.pageProps.apolloState` itself.
pub fn node_map(state: &Value) -> ExtractionResult<&NodeMap> {
    let cache = state.pointer("/props/pageProps/apolloState");

    let nodes = cache
        .and_then(|c| c.get("data"))
        .and_then(Value::as_object)
        .or_else(|| cache.and_then(Value::as_object))
        .filter(|map| !map.is_empty())
        .ok_or(ExtractionError::MissingGraph)?;

    Ok(nodes)
}

/// Returns the target key if `value` is a reference pointer
///
/// Three pointer shapes are recognised:
/// `{"type": "id", "id": k}`, `{"__ref": k}` and `{"kind": "reference", "id": k}`.
pub fn as_reference(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;

    if let Some(key) = obj.get("__ref").and_then(Value::as_str) {
        return Some(key);
    }

    let tagged = matches!(obj.get("type").and_then(Value::as_str), Some("id"))
        || matches!(obj.get("kind").and_then(Value::as_str), Some("reference"));

    if tagged {
        obj.get("id").and_then(Value::as_str)
    } else {
        None
    }
}

/// What a node represents, derived from its key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A job listing
    Listing,
    /// Search metadata (result counts, pagination)
    SearchResult,
    /// Anything else: companies, locations, tags...
    Other,
}

/// Key prefix conventions of a site's graph
#[derive(Debug, Clone)]
pub struct GraphSchema {
    listing_prefixes: Vec<String>,
    search_result_prefixes: Vec<String>,
}

impl GraphSchema {
    pub fn new(listing_prefixes: Vec<String>, search_result_prefixes: Vec<String>) -> Self {
        Self {
            listing_prefixes,
            search_result_prefixes,
        }
    }

    /// Classifies a node key
    pub fn kind_of(&self, key: &str) -> NodeKind {
        if self.listing_prefixes.iter().any(|p| key.starts_with(p.as_str())) {
            NodeKind::Listing
        } else if self
            .search_result_prefixes
            .iter()
            .any(|p| key.starts_with(p.as_str()))
        {
            NodeKind::SearchResult
        } else {
            NodeKind::Other
        }
    }

    /// Iterates the mapping as tagged nodes, in document order
    pub fn nodes<'g>(&'g self, nodes: &'g NodeMap) -> impl Iterator<Item = GraphNode<'g>> + 'g {
        nodes.iter().map(move |(key, body)| GraphNode {
            key,
            kind: self.kind_of(key),
            body,
        })
    }
}

/// One entry of the flat mapping, tagged with its kind
#[derive(Debug, Clone, Copy)]
pub struct GraphNode<'g> {
    pub key: &'g str,
    pub kind: NodeKind,
    pub body: &'g Value,
}

/// A listing node with every resolvable reference inlined
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedListing {
    /// Key of the listing node in the flat mapping
    pub key: String,
    /// Resolved node body
    pub body: Value,
}

/// Inlines reference pointers over one flat node mapping
///
/// The memo table lives as long as the resolver; create one per page.
pub struct GraphResolver<'g> {
    nodes: &'g NodeMap,
    memo: HashMap<String, Value>,
    on_path: HashSet<String>,
}

impl<'g> GraphResolver<'g> {
    pub fn new(nodes: &'g NodeMap) -> Self {
        Self {
            nodes,
            memo: HashMap::new(),
            on_path: HashSet::new(),
        }
    }

    /// Resolves the node stored under `key`
    ///
    /// Returns `None` if the mapping has no such key.
    pub fn resolve_node(&mut self, key: &str) -> Option<Value> {
        let nodes = self.nodes;
        let body = nodes.get(key)?;
        Some(self.resolve_key(key, body))
    }

    /// Resolves an arbitrary value against the mapping
    ///
    /// Values without pointers come back unchanged.
    pub fn resolve_value(&mut self, value: &Value) -> Value {
        if let Some(target) = as_reference(value) {
            return self.follow(target, value);
        }

        match value {
            Value::Object(obj) => Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_value(v)))
                    .collect(),
            ),
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.resolve_value(v)).collect())
            }
            other => other.clone(),
        }
    }

    /// Resolves every node in the mapping
    pub fn resolve_all(mut self) -> NodeMap {
        let nodes = self.nodes;
        nodes
            .iter()
            .map(|(key, body)| (key.clone(), self.resolve_key(key, body)))
            .collect()
    }

    fn follow(&mut self, target: &str, pointer: &Value) -> Value {
        let nodes = self.nodes;
        match nodes.get(target) {
            Some(body) => {
                if self.on_path.contains(target) {
                    tracing::trace!("Reference cycle through {}, leaving pointer", target);
                    return pointer.clone();
                }
                if self.on_path.len() >= MAX_REFERENCE_DEPTH {
                    tracing::trace!("Reference depth limit at {}, leaving pointer", target);
                    return pointer.clone();
                }
                self.resolve_key(target, body)
            }
            None => pointer.clone(),
        }
    }

    fn resolve_key(&mut self, key: &str, body: &Value) -> Value {
        if let Some(done) = self.memo.get(key) {
            return done.clone();
        }

        self.on_path.insert(key.to_string());
        let resolved = self.resolve_value(body);
        self.on_path.remove(key);

        self.memo.insert(key.to_string(), resolved.clone());
        resolved
    }
}

/// Resolves every listing-typed node, in document order
pub fn resolve_listings(nodes: &NodeMap, schema: &GraphSchema) -> Vec<ResolvedListing> {
    let mut resolver = GraphResolver::new(nodes);

    schema
        .nodes(nodes)
        .filter(|node| node.kind == NodeKind::Listing && node.body.is_object())
        .map(|node| ResolvedListing {
            key: node.key.to_string(),
            body: resolver.resolve_key(node.key, node.body),
        })
        .collect()
}

/// Best-effort total page count for the current search
///
/// Takes `pageCount` or `totalPages` from the first search-result node, or
/// else `pageCount` from the first node that has one. Returns `None` when
/// nothing page-count-shaped is found.
pub fn page_count_hint(nodes: &NodeMap, schema: &GraphSchema) -> Option<u32> {
    for node in schema.nodes(nodes) {
        let Some(obj) = node.body.as_object() else {
            continue;
        };

        if node.kind == NodeKind::SearchResult {
            return ["pageCount", "totalPages"]
                .iter()
                .filter_map(|k| obj.get(*k))
                .find_map(as_count);
        }

        if let Some(count) = obj.get("pageCount") {
            return as_count(count);
        }
    }

    None
}

fn as_count(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u32::try_from(n).ok().filter(|n| *n > 0)
}
