//! Reverse resolution: persisted flat value -> per-level selection chain.
//!
//! A product record stores a single flat string that may be a node's id or
//! its display name, for a node at any depth. Editing that product needs
//! the full chain of per-level choices back, one id per selector row. The
//! search is depth-first pre-order with short-circuit on first match; it
//! never backtracks to consider later matches, which is the accepted
//! resolution policy for colliding display names in existing data.

use crate::error::ResolveError;
use crate::resolver::{FlatValue, SelectionChain};
use crate::taxonomy::store::{name_key, TaxonomyStore};
use crate::types::NodeIndex;
use tracing::debug;

/// Recover the ordered chain of node choices a flat value corresponds to.
///
/// Roots only terminate the search when they are 1-level leaves; a root
/// whose name matches but has children is descended into instead. Every
/// deeper node terminates on an id or display-name match regardless of
/// whether it is a leaf. The returned chain runs root to matched node
/// inclusive, so its last element is the matched node's own id.
pub fn reconstruct_selection(
    store: &TaxonomyStore,
    flat_value: &FlatValue,
) -> Result<SelectionChain, ResolveError> {
    let key = name_key(flat_value.as_str());

    for &root in store.roots() {
        if store.matches_identifier(root, &key) && store.node(root).is_leaf() {
            return Ok(vec![store.node(root).id.clone()]);
        }
        if let Some(found) = find_in_subtree(store, root, &key) {
            let chain: SelectionChain = store
                .path_to(found)
                .into_iter()
                .map(|idx| store.node(idx).id.clone())
                .collect();
            debug!(flat_value = flat_value.as_str(), depth = chain.len(), "reconstructed selection");
            return Ok(chain);
        }
    }

    Err(ResolveError::NotFound(flat_value.as_str().to_string()))
}

fn find_in_subtree(store: &TaxonomyStore, parent: NodeIndex, key: &str) -> Option<NodeIndex> {
    for &child in &store.node(parent).children {
        if store.matches_identifier(child, key) {
            return Some(child);
        }
        if let Some(found) = find_in_subtree(store, child, key) {
            return Some(found);
        }
    }
    None
}
