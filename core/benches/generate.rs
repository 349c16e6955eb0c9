use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sapper_core::{BoardConfig, Grid, LayoutGenerator, Match, RandomLayoutGenerator};
use std::hint::black_box;

fn layout_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for (name, config) in [
        ("demo", BoardConfig::DEMO),
        ("general", BoardConfig::GENERAL),
        ("dense", BoardConfig::new_unchecked((20, 16), 300)),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomLayoutGenerator::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn grid_construction(c: &mut Criterion) {
    let layout = RandomLayoutGenerator::new(0xdead_beef).generate(BoardConfig::GENERAL);
    c.bench_function("grid/general", |b| {
        b.iter(|| black_box(Grid::new(black_box(&layout), (320, 240))));
    });
}

fn win_scan(c: &mut Criterion) {
    c.bench_function("match/reveal_all", |b| {
        b.iter_batched(
            || Match::new(BoardConfig::GENERAL, (0, 0), 7, ()),
            |mut game| {
                let safe: Vec<_> = game
                    .grid()
                    .iter()
                    .filter(|(_, cell)| !cell.has_mine())
                    .map(|(coords, _)| game.grid().grid_to_pixel(coords))
                    .collect();
                for pos in safe {
                    black_box(game.on_reveal(pos));
                }
                game
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, layout_generation, grid_construction, win_scan);
criterion_main!(benches);
