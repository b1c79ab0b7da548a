use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gems_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in [
        ("12x12x6", GameConfig::default()),
        ("30x30x4", GameConfig::new((30, 30), 4)),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let mut rng = SmallRng::seed_from_u64(seed);
                black_box(RandomBoardGenerator::default().generate(&config, &mut rng))
            })
        });
    }
    group.finish();
}

fn bench_find_matches(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(17);
    let board = Board::filled((12, 12), 6, &mut rng);

    c.bench_function("find_matches/12x12x6", |b| {
        b.iter(|| black_box(find_matches(black_box(&board))))
    });
}

fn bench_swaps(c: &mut Criterion) {
    let engine = PlayEngine::new_game(GameConfig::default(), 99).unwrap();

    c.bench_function("try_swap/row_sweep", |b| {
        b.iter(|| {
            let mut engine = engine.clone();
            for col in 0..11 {
                black_box(engine.try_swap((6, col), (6, col + 1)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_generate, bench_find_matches, bench_swaps);
criterion_main!(benches);
