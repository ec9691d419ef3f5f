use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minesweep_core::{
    Game, GameConfig, Grid, GridGenerator, Placement, RandomGridGenerator, open_multiple_cells,
};

fn bench_generate(c: &mut Criterion) {
    let config = GameConfig::default();

    for (name, placement) in [
        ("generate.expert.rejection", Placement::Rejection),
        ("generate.expert.shuffle", Placement::Shuffle),
    ] {
        let mut generator = RandomGridGenerator::new(20261016, placement);
        c.bench_function(name, |b| b.iter(|| generator.generate(black_box(config))));
    }

    // nearly full board, worst case for rejection sampling
    let dense = GameConfig::new((16, 30), 470).unwrap();
    let mut generator = RandomGridGenerator::new(20261016, Placement::Rejection);
    c.bench_function("generate.dense.rejection", |b| {
        b.iter(|| generator.generate(black_box(dense)))
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    let empty = Grid::from_mine_coords((255, 255), &[]).unwrap();
    c.bench_function("flood.empty_255", |b| {
        b.iter_batched(
            || empty.clone(),
            |mut grid| open_multiple_cells(&mut grid, black_box((127, 127))),
            BatchSize::LargeInput,
        )
    });
}

fn bench_first_reveal(c: &mut Criterion) {
    c.bench_function("game.first_reveal.expert", |b| {
        let mut seed = 0;
        b.iter_batched(
            || {
                seed += 1;
                Game::with_seed(GameConfig::default(), seed)
            },
            |mut game| game.reveal(black_box((0, 0))),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill, bench_first_reveal);
criterion_main!(benches);
