//! Contract tests for the resolver over the built-in retail forest.

use taxa::resolver::selection::{derive_flat_value, persistence_form};
use taxa::resolver::{
    reconstruct_selection, resolve_context, CategorySelection, FlatValue, SelectionState,
};
use taxa::taxonomy::definition::default_forest;
use taxa::taxonomy::store::TaxonomyStore;

fn store() -> TaxonomyStore {
    TaxonomyStore::from_forest(&default_forest()).unwrap()
}

#[test]
fn every_leaf_round_trips_through_its_persistence_form() {
    let store = store();
    for idx in store.preorder() {
        if !store.node(idx).is_leaf() {
            continue;
        }
        let value = persistence_form(&store, idx);
        let chain = reconstruct_selection(&store, &value)
            .unwrap_or_else(|_| panic!("leaf {} did not reconstruct", store.node(idx).id));
        assert_eq!(chain.last().unwrap(), &store.node(idx).id);

        let ctx = resolve_context(&store, chain.last().unwrap()).unwrap();
        assert_eq!(ctx.node.id, store.node(idx).id);
        let crumbs: Vec<String> = ctx.breadcrumb.into_iter().map(|s| s.id).collect();
        assert_eq!(crumbs, chain);
    }
}

#[test]
fn reconstruction_by_id_returns_full_five_level_chain() {
    let store = store();
    let chain = reconstruct_selection(&store, &FlatValue::from_raw("gameboy-consolas")).unwrap();
    assert_eq!(
        chain,
        vec![
            "juegos",
            "juegos-retro",
            "retro-nintendo",
            "nintendo-gameboy",
            "gameboy-consolas"
        ]
    );
}

#[test]
fn one_level_leaf_resolves_by_name_with_no_ancestors() {
    let store = store();
    let chain = reconstruct_selection(&store, &FlatValue::from_raw("PC Juegos")).unwrap();
    assert_eq!(chain, vec!["pc-juegos"]);

    let ctx = resolve_context(&store, "pc-juegos").unwrap();
    assert!(ctx.parent.is_none());
    assert_eq!(ctx.breadcrumb.len(), 1);
}

#[test]
fn unknown_identifier_is_not_found() {
    let store = store();
    assert!(resolve_context(&store, "no-such-id").is_err());
    assert!(reconstruct_selection(&store, &FlatValue::from_raw("no-such-id")).is_err());
}

#[test]
fn ambiguous_names_resolve_deterministically() {
    let store = store();
    let first = resolve_context(&store, "Accesorios").unwrap();
    for _ in 0..10 {
        assert_eq!(resolve_context(&store, "Accesorios").unwrap(), first);
    }
    // Pre-order first "Accesorios" lives under PS5.
    assert_eq!(first.node.id, "ps5-accesorios");
}

#[test]
fn derive_is_nonempty_iff_chain_ends_on_leaf() {
    let store = store();
    for idx in store.preorder() {
        let chain: Vec<String> = store
            .path_to(idx)
            .into_iter()
            .map(|i| store.node(i).id.clone())
            .collect();
        let value = derive_flat_value(&store, &chain).unwrap();
        assert_eq!(value.is_some(), store.node(idx).is_leaf());
    }
}

#[test]
fn changing_an_ancestor_discards_the_committed_chain() {
    let store = store();
    let mut selection =
        CategorySelection::from_flat_value(&store, &FlatValue::from_raw("gameboy-consolas"))
            .unwrap();
    assert!(selection.flat_value().is_some());

    selection.choose(0, "consolas").unwrap();
    assert_eq!(selection.state(), SelectionState::PartiallySelected(0));
    assert!(selection.flat_value().is_none());
    assert_eq!(selection.chain(), vec!["consolas"]);

    // Re-choosing down to a leaf commits again.
    selection.choose(1, "consolas-switch").unwrap();
    assert!(matches!(selection.state(), SelectionState::Committed(_)));
}

#[test]
fn stale_flat_value_leaves_selection_unseeded() {
    let store = store();
    let result = CategorySelection::from_flat_value(&store, &FlatValue::from_raw("retired-cat"));
    assert!(result.is_err());
    // UI falls back to an unselected state.
    let selection = CategorySelection::new(&store);
    assert_eq!(selection.state(), SelectionState::Unselected);
}
