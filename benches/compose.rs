use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pentad::{
    composer::{Composer, ComposerConfig},
    hexad::{CorrespondenceTable, Duad},
    permutation::Permutation,
    scene::MemoryRenderer,
};

fn bench_compose(c: &mut Criterion) {
    let table = CorrespondenceTable::outer();
    let swaps: Vec<Permutation> = Duad::all().map(|d| d.transposition()).collect();

    c.bench_function("compose_fifteen_transpositions", |b| {
        b.iter(|| {
            swaps
                .iter()
                .fold(Permutation::identity(6), |acc, s| acc.compose(black_box(s)))
        });
    });

    c.bench_function("compose_table_images", |b| {
        b.iter(|| {
            table
                .iter()
                .fold(Permutation::identity(6), |acc, (_, image)| {
                    acc.compose(black_box(image))
                })
                .cycle_notation()
                .len()
        });
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut composer = Composer::new(ComposerConfig::default(), MemoryRenderer::new())
        .expect("standard scene builds");
    composer.toggle(0).expect("position 0 exists");
    composer.toggle(5).expect("position 5 exists");

    c.bench_function("interpolate_full_scene", |b| {
        b.iter(|| composer.interpolate(black_box(0.37)).expect("frame draws"));
    });
}

criterion_group!(compose_benches, bench_compose, bench_frame);
criterion_main!(compose_benches);
