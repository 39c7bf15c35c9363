//! Taxonomy Store
//!
//! Owns the immutable forest as a flat arena of pre-order node entries with
//! explicit parent/children links, acting as the index every resolver
//! function walks. Built once at process start; read-only thereafter, so
//! concurrent readers never need coordination.
//!
//! The arena order is load-bearing: entries are stored in depth-first
//! pre-order (roots in forest order, each node's children in order before
//! the next root), so "first match in pre-order" is a linear scan. That
//! ordering is the deterministic tie-break for ambiguous display-name
//! lookups.

use crate::error::ForestError;
use crate::taxonomy::{CategoryNode, Forest};
use crate::types::{Depth, NodeIndex, MAX_DEPTH};
use std::collections::HashMap;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

/// One node in the arena.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub id: String,
    pub display_name: String,
    /// NFC-normalized display name, the key used for name matching.
    name_key: String,
    pub parent: Option<NodeIndex>,
    pub children: Vec<NodeIndex>,
    pub depth: Depth,
}

impl NodeEntry {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Forest statistics for the audit/validate surface.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ForestStats {
    pub root_count: usize,
    pub node_count: usize,
    pub leaf_count: usize,
    pub max_depth: Depth,
}

/// The immutable taxonomy index.
#[derive(Debug)]
pub struct TaxonomyStore {
    nodes: Vec<NodeEntry>,
    roots: Vec<NodeIndex>,
    by_id: HashMap<String, NodeIndex>,
    name_counts: HashMap<String, usize>,
}

/// NFC-normalize a display name or identifier for comparison, so composed
/// and decomposed forms of accented names ("Móviles") compare equal.
pub(crate) fn name_key(s: &str) -> String {
    s.nfc().collect()
}

impl TaxonomyStore {
    /// Build the store from a definition forest.
    ///
    /// Fails fast on a malformed definition: an empty forest, a duplicate
    /// id anywhere in the forest, or a branch past the depth ceiling. There
    /// is no graceful degradation; the taxonomy is required for the
    /// product-authoring flow to function at all.
    pub fn from_forest(forest: &Forest) -> Result<Self, ForestError> {
        if forest.is_empty() {
            return Err(ForestError::EmptyForest);
        }

        let mut store = TaxonomyStore {
            nodes: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
            name_counts: HashMap::new(),
        };

        for root in &forest.roots {
            let index = store.insert(root, None, 0)?;
            store.roots.push(index);
        }

        info!(
            nodes = store.nodes.len(),
            roots = store.roots.len(),
            "taxonomy store built"
        );
        Ok(store)
    }

    fn insert(
        &mut self,
        node: &CategoryNode,
        parent: Option<NodeIndex>,
        depth: Depth,
    ) -> Result<NodeIndex, ForestError> {
        if depth >= MAX_DEPTH {
            return Err(ForestError::DepthExceeded {
                id: node.id.clone(),
                max: MAX_DEPTH,
            });
        }
        if self.by_id.contains_key(&node.id) {
            return Err(ForestError::DuplicateId {
                id: node.id.clone(),
            });
        }

        let index = self.nodes.len();
        let key = name_key(&node.display_name);
        *self.name_counts.entry(key.clone()).or_insert(0) += 1;
        self.nodes.push(NodeEntry {
            id: node.id.clone(),
            display_name: node.display_name.clone(),
            name_key: key,
            parent,
            children: Vec::new(),
            depth,
        });
        self.by_id.insert(node.id.clone(), index);

        for child in &node.children {
            let child_index = self.insert(child, Some(index), depth + 1)?;
            self.nodes[index].children.push(child_index);
        }
        Ok(index)
    }

    /// Root indices in canonical (definition) order.
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    pub fn node(&self, index: NodeIndex) -> &NodeEntry {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// O(1) id lookup. Ids are globally unique by the load-time invariant;
    /// the map is populated in pre-order with first insertion winning, so
    /// even a duplicate that slipped past validation would resolve to the
    /// pre-order-first node.
    pub fn find_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// All node indices in depth-first pre-order. Arena order is pre-order,
    /// so this is just the index range.
    pub fn preorder(&self) -> impl Iterator<Item = NodeIndex> {
        0..self.nodes.len()
    }

    /// Whether a node matches an identifier on either its id or its
    /// (NFC-normalized) display name.
    pub fn matches_identifier(&self, index: NodeIndex, identifier_key: &str) -> bool {
        let entry = &self.nodes[index];
        entry.id == identifier_key || entry.name_key == identifier_key
    }

    /// Indices from the root down to `index`, inclusive.
    pub fn path_to(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            path.push(idx);
            current = self.nodes[idx].parent;
        }
        path.reverse();
        path
    }

    /// Sibling indices of a node: its parent's children, or the root list
    /// when the node is itself a root. Always includes the node.
    pub fn siblings(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.nodes[index].parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        }
    }

    /// How many nodes anywhere in the forest carry this display name.
    pub fn name_occurrences(&self, display_name: &str) -> usize {
        self.name_counts
            .get(&name_key(display_name))
            .copied()
            .unwrap_or(0)
    }

    /// Display names that occur more than once forest-wide, with counts.
    /// These are the names whose bare-string lookups rely on the pre-order
    /// tie-break.
    pub fn duplicate_display_names(&self) -> Vec<(String, usize)> {
        let mut dupes: Vec<(String, usize)> = self
            .name_counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        dupes.sort();
        dupes
    }

    pub fn stats(&self) -> ForestStats {
        ForestStats {
            root_count: self.roots.len(),
            node_count: self.nodes.len(),
            leaf_count: self.nodes.iter().filter(|n| n.is_leaf()).count(),
            max_depth: self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::definition::default_forest;
    use crate::taxonomy::CategoryNode as N;

    fn store() -> TaxonomyStore {
        TaxonomyStore::from_forest(&default_forest()).unwrap()
    }

    #[test]
    fn test_empty_forest_rejected() {
        let err = TaxonomyStore::from_forest(&Forest::new(vec![])).unwrap_err();
        assert!(matches!(err, ForestError::EmptyForest));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let forest = Forest::new(vec![
            N::leaf("dup", "Primero"),
            N::branch("otro", "Otro", vec![N::leaf("dup", "Segundo")]),
        ]);
        let err = TaxonomyStore::from_forest(&forest).unwrap_err();
        assert!(matches!(err, ForestError::DuplicateId { id } if id == "dup"));
    }

    #[test]
    fn test_id_uniqueness_in_default_forest() {
        // Building the store is itself the uniqueness check; re-assert over
        // the arena for good measure.
        let store = store();
        let mut seen = std::collections::HashSet::new();
        for idx in store.preorder() {
            assert!(seen.insert(store.node(idx).id.clone()));
        }
    }

    #[test]
    fn test_arena_is_preorder() {
        let forest = Forest::new(vec![
            N::branch(
                "a",
                "A",
                vec![
                    N::branch("a1", "A1", vec![N::leaf("a1x", "X")]),
                    N::leaf("a2", "A2"),
                ],
            ),
            N::leaf("b", "B"),
        ]);
        let store = TaxonomyStore::from_forest(&forest).unwrap();
        let ids: Vec<&str> = store
            .preorder()
            .map(|idx| store.node(idx).id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "a1", "a1x", "a2", "b"]);
    }

    #[test]
    fn test_find_by_id() {
        let store = store();
        let idx = store.find_by_id("gameboy-consolas").unwrap();
        assert_eq!(store.node(idx).display_name, "Consolas");
        assert_eq!(store.node(idx).depth, 4);
        assert!(store.find_by_id("no-such-id").is_none());
    }

    #[test]
    fn test_path_and_siblings() {
        let store = store();
        let idx = store.find_by_id("gameboy-consolas").unwrap();
        let path: Vec<&str> = store
            .path_to(idx)
            .iter()
            .map(|i| store.node(*i).id.as_str())
            .collect();
        assert_eq!(
            path,
            vec![
                "juegos",
                "juegos-retro",
                "retro-nintendo",
                "nintendo-gameboy",
                "gameboy-consolas"
            ]
        );
        assert!(store.siblings(idx).contains(&idx));

        // Roots are their own sibling set.
        let root = store.find_by_id("juegos").unwrap();
        assert_eq!(store.siblings(root), store.roots());
    }

    #[test]
    fn test_name_occurrences_counts_duplicates() {
        let store = store();
        assert!(store.name_occurrences("Consolas") > 1);
        assert!(store.name_occurrences("Accesorios") > 1);
        assert_eq!(store.name_occurrences("PC Juegos"), 1);
        assert_eq!(store.name_occurrences("Inexistente"), 0);
    }

    #[test]
    fn test_name_matching_is_nfc_normalized() {
        let store = store();
        let idx = store.find_by_id("moviles").unwrap();
        // "Móviles" with a decomposed o + combining acute accent.
        let decomposed = "Mo\u{0301}viles";
        assert!(store.matches_identifier(idx, &name_key(decomposed)));
    }

    #[test]
    fn test_stats() {
        let store = store();
        let stats = store.stats();
        assert_eq!(stats.root_count, store.roots().len());
        assert_eq!(stats.max_depth, 5);
        assert!(stats.leaf_count < stats.node_count);
    }
}
