//! Cascading selection state machine and flat-value derivation.
//!
//! The product-authoring UI drives one selector row per level. Choosing a
//! node at level `k` invalidates everything deeper; a value is committable
//! only once the chain ends on a leaf. No I/O, no failure modes beyond
//! "no value yet", which is the normal mid-selection state.

use crate::error::ResolveError;
use crate::resolver::{FlatValue, PathSegment, SelectionChain};
use crate::taxonomy::store::TaxonomyStore;
use crate::types::NodeIndex;

/// Where the operator is in the selection flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    /// Nothing chosen yet (new product).
    Unselected,
    /// A chain is in progress; the deepest chosen level is recorded, but
    /// its node still has children so no value is committable.
    PartiallySelected(usize),
    /// The chain ends on a leaf; terminal until an ancestor level changes.
    Committed(String),
}

/// The persistence form of a leaf: `display_name` for first/second-level
/// leaves whose name is unique forest-wide, `id` for everything else. Ids
/// below the second level are mandatory to disambiguate from same-named
/// leaves elsewhere in the forest; the uniqueness check keeps shallow
/// values unambiguous too.
pub fn persistence_form(store: &TaxonomyStore, index: NodeIndex) -> FlatValue {
    let entry = store.node(index);
    if entry.depth <= 1 && store.name_occurrences(&entry.display_name) == 1 {
        FlatValue::Name(entry.display_name.clone())
    } else {
        FlatValue::Id(entry.id.clone())
    }
}

/// Collapse a full selection chain into the value persisted on the product
/// record. Returns `Ok(None)` while the chain is empty or ends on an
/// internal node (nothing committable yet); `InvalidSelection` if the chain
/// does not describe a real root-to-descendant walk.
pub fn derive_flat_value(
    store: &TaxonomyStore,
    chain: &SelectionChain,
) -> Result<Option<FlatValue>, ResolveError> {
    let mut current: Option<NodeIndex> = None;
    for (level, id) in chain.iter().enumerate() {
        let candidates = match current {
            None => store.roots(),
            Some(parent) => &store.node(parent).children,
        };
        let next = candidates
            .iter()
            .copied()
            .find(|idx| store.node(*idx).id == *id)
            .ok_or_else(|| ResolveError::InvalidSelection {
                level,
                id: id.clone(),
            })?;
        current = Some(next);
    }

    Ok(current
        .filter(|idx| store.node(*idx).is_leaf())
        .map(|idx| persistence_form(store, idx)))
}

/// Per-level selection state for one product being edited.
pub struct CategorySelection<'a> {
    store: &'a TaxonomyStore,
    chain: Vec<NodeIndex>,
}

impl<'a> CategorySelection<'a> {
    /// Start unselected (new product).
    pub fn new(store: &'a TaxonomyStore) -> Self {
        Self {
            store,
            chain: Vec::new(),
        }
    }

    /// Seed the selection from a previously persisted flat value (editing
    /// an existing product). `NotFound` means the stored value no longer
    /// resolves; callers fall back to [`CategorySelection::new`].
    pub fn from_flat_value(
        store: &'a TaxonomyStore,
        flat_value: &FlatValue,
    ) -> Result<Self, ResolveError> {
        let ids = crate::resolver::reconstruct_selection(store, flat_value)?;
        let chain = ids
            .iter()
            .map(|id| {
                store
                    .find_by_id(id)
                    .ok_or_else(|| ResolveError::NotFound(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { store, chain })
    }

    /// The nodes choosable at a level given the current chain: roots at
    /// level 0, otherwise the children of the node chosen one level up.
    /// `None` when the level is not meaningful yet (shallower levels are
    /// unchosen, or the parent is a leaf).
    pub fn options_at(&self, level: usize) -> Option<Vec<PathSegment>> {
        let candidates: &[NodeIndex] = if level == 0 {
            self.store.roots()
        } else {
            let parent = *self.chain.get(level - 1)?;
            let children = &self.store.node(parent).children;
            if children.is_empty() {
                return None;
            }
            children
        };
        Some(
            candidates
                .iter()
                .map(|idx| {
                    let entry = self.store.node(*idx);
                    PathSegment {
                        id: entry.id.clone(),
                        display_name: entry.display_name.clone(),
                    }
                })
                .collect(),
        )
    }

    /// Choose a node at a level. Any previously chosen deeper levels are
    /// discarded; their selections are no longer valid once an ancestor
    /// changes.
    pub fn choose(&mut self, level: usize, id: &str) -> Result<SelectionState, ResolveError> {
        if level > self.chain.len() {
            return Err(ResolveError::InvalidSelection {
                level,
                id: id.to_string(),
            });
        }
        let candidates: &[NodeIndex] = if level == 0 {
            self.store.roots()
        } else {
            &self.store.node(self.chain[level - 1]).children
        };
        let chosen = candidates
            .iter()
            .copied()
            .find(|idx| self.store.node(*idx).id == id)
            .ok_or_else(|| ResolveError::InvalidSelection {
                level,
                id: id.to_string(),
            })?;

        self.chain.truncate(level);
        self.chain.push(chosen);
        Ok(self.state())
    }

    /// Discard the whole selection.
    pub fn clear(&mut self) {
        self.chain.clear();
    }

    pub fn state(&self) -> SelectionState {
        match self.chain.last() {
            None => SelectionState::Unselected,
            Some(&idx) if self.store.node(idx).is_leaf() => {
                SelectionState::Committed(self.store.node(idx).id.clone())
            }
            Some(_) => SelectionState::PartiallySelected(self.chain.len() - 1),
        }
    }

    /// The chosen ids, root first.
    pub fn chain(&self) -> SelectionChain {
        self.chain
            .iter()
            .map(|idx| self.store.node(*idx).id.clone())
            .collect()
    }

    /// The committable persistence value: `Some` iff the chain ends on a
    /// leaf, empty while internal nodes remain unresolved.
    pub fn flat_value(&self) -> Option<FlatValue> {
        self.chain
            .last()
            .filter(|idx| self.store.node(**idx).is_leaf())
            .map(|idx| persistence_form(self.store, *idx))
    }
}
