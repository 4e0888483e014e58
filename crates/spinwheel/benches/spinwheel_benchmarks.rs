use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use spinwheel::{
    DEFAULT_DARKEN, Palette, SectorLayout, SpinConfig, SpinEngine, ease_out_cubic, resolve_winner,
};

const NAMES: [&str; 8] = ["Ann", "Bo", "Cat", "Dee", "Eve", "Fay", "Gus", "Hal"];

fn bench_easing(c: &mut Criterion) {
    let mut group = c.benchmark_group("spinwheel/easing");

    group.bench_function("ease_out_cubic", |b| {
        b.iter(|| black_box(ease_out_cubic(black_box(0.37))));
    });

    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("spinwheel/geometry");
    let palette = Palette::default();

    group.bench_function("SectorLayout::sectors/18", |b| {
        b.iter(|| black_box(SectorLayout::new(18).sectors(&palette, DEFAULT_DARKEN)));
    });

    group.bench_function("resolve_winner", |b| {
        b.iter(|| black_box(resolve_winner(black_box(-2987.25), &NAMES)));
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("spinwheel/engine");

    group.bench_function("tick/60fps", |b| {
        let mut engine = SpinEngine::with_seed(SpinConfig::default(), 7).unwrap();
        b.iter(|| {
            if !engine.is_spinning() {
                engine.dismiss();
                engine.start_spin(&NAMES).unwrap();
            }
            black_box(engine.tick(Duration::from_micros(16_667)))
        });
    });

    group.bench_function("full_spin/60fps", |b| {
        b.iter(|| {
            let mut engine = SpinEngine::with_seed(SpinConfig::default(), 7).unwrap();
            engine.start_spin(&NAMES).unwrap();
            while engine.is_spinning() {
                engine.tick(Duration::from_micros(16_667));
            }
            black_box(engine.winner().cloned())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_easing, bench_geometry, bench_engine);
criterion_main!(benches);
