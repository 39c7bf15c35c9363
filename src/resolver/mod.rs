//! Resolver
//!
//! Stateless lookup functions over the [`TaxonomyStore`](crate::taxonomy::store::TaxonomyStore):
//! forward resolution for navigation (`resolve_context`), reverse
//! reconstruction of a persisted flat value (`reconstruct_selection`), and
//! the cascading selection state machine (`CategorySelection` /
//! `derive_flat_value`). All outputs are derived per call; nothing here
//! mutates the taxonomy.

pub mod context;
pub mod reconstruct;
pub mod selection;

pub use context::resolve_context;
pub use reconstruct::reconstruct_selection;
pub use selection::{CategorySelection, SelectionState};

use serde::{Deserialize, Serialize};

/// One breadcrumb step: the pair a navigation UI renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: String,
    pub display_name: String,
}

/// The answer to "where am I in the tree" for one node: breadcrumb from
/// root to the node inclusive, the node itself, its parent (None only for
/// roots), and its sibling list (which always includes the node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathContext {
    pub breadcrumb: Vec<PathSegment>,
    pub node: PathSegment,
    pub is_leaf: bool,
    pub parent: Option<PathSegment>,
    pub siblings: Vec<PathSegment>,
}

/// An ordered, per-level list of chosen node ids, root first. Transient UI
/// state; level `k` is only meaningful once levels `0..k` are chosen.
pub type SelectionChain = Vec<String>;

/// The single string persisted on a product record for its leaf category.
///
/// Existing data addresses nodes two ways: by globally-unique `id`, or by
/// bare `display_name` for shallow leaves whose name does not collide. New
/// values carry the tag; [`FlatValue::from_raw`] accepts the bare strings
/// already in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FlatValue {
    Id(String),
    Name(String),
}

impl FlatValue {
    /// Wrap a bare persisted string. Legacy records do not record which
    /// form they used, so the raw value is matched against both id and
    /// display name during reconstruction either way.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        FlatValue::Name(raw.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            FlatValue::Id(v) | FlatValue::Name(v) => v,
        }
    }
}

impl std::fmt::Display for FlatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
