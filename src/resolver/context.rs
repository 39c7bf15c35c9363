//! Forward resolution: identifier -> breadcrumb, parent, siblings.

use crate::error::ResolveError;
use crate::resolver::{PathContext, PathSegment};
use crate::taxonomy::store::{name_key, TaxonomyStore};
use crate::types::NodeIndex;
use tracing::debug;

fn segment(store: &TaxonomyStore, index: NodeIndex) -> PathSegment {
    let entry = store.node(index);
    PathSegment {
        id: entry.id.clone(),
        display_name: entry.display_name.clone(),
    }
}

/// Resolve an identifier (an `id` or a `display_name` — callers supply
/// either, depending on whether they hold a URL slug or a legacy product
/// value) to its position in the forest.
///
/// Matching is depth-first pre-order across the whole forest; the first
/// node whose id or display name equals the identifier wins. Display names
/// are not globally unique, so an ambiguous name deterministically resolves
/// to the pre-order-first match, stable across calls.
///
/// `NotFound` is an expected outcome (stale URL); callers render a 404, not
/// an error page.
pub fn resolve_context(
    store: &TaxonomyStore,
    identifier: &str,
) -> Result<PathContext, ResolveError> {
    let key = name_key(identifier);
    let index = store
        .preorder()
        .find(|idx| store.matches_identifier(*idx, &key))
        .ok_or_else(|| ResolveError::NotFound(identifier.to_string()))?;

    let entry = store.node(index);
    debug!(identifier, id = %entry.id, depth = entry.depth, "resolved category");

    let breadcrumb: Vec<PathSegment> = store
        .path_to(index)
        .into_iter()
        .map(|idx| segment(store, idx))
        .collect();
    let parent = entry.parent.map(|idx| segment(store, idx));
    let siblings = store
        .siblings(index)
        .iter()
        .map(|idx| segment(store, *idx))
        .collect();

    Ok(PathContext {
        node: segment(store, index),
        is_leaf: entry.is_leaf(),
        breadcrumb,
        parent,
        siblings,
    })
}
