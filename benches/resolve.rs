//! Resolver lookup benchmarks over the built-in retail forest.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taxa::resolver::{reconstruct_selection, resolve_context, FlatValue};
use taxa::taxonomy::definition::default_forest;
use taxa::taxonomy::store::TaxonomyStore;

fn bench_resolve(c: &mut Criterion) {
    let store = TaxonomyStore::from_forest(&default_forest()).unwrap();

    c.bench_function("resolve_context_by_id", |b| {
        b.iter(|| resolve_context(&store, black_box("gameboy-consolas")))
    });

    c.bench_function("resolve_context_by_ambiguous_name", |b| {
        b.iter(|| resolve_context(&store, black_box("Consolas")))
    });

    c.bench_function("reconstruct_selection_deep_leaf", |b| {
        let value = FlatValue::Id("gameboy-consolas".to_string());
        b.iter(|| reconstruct_selection(&store, black_box(&value)))
    });

    c.bench_function("store_build", |b| {
        let forest = default_forest();
        b.iter(|| TaxonomyStore::from_forest(black_box(&forest)))
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
