use concentration_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for size in [(4, 4), (10, 7), (7, 10)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size.0, size.1)),
            &size,
            |b, &size| {
                let mut rng = SmallRng::seed_from_u64(0x5eed);
                b.iter(|| Board::generate(black_box(size), &mut rng).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_intro(c: &mut Criterion) {
    let config = GameConfig::default();
    let sequencer = AnimationSequencer::new(&config);
    let cells: Vec<Coord2> = iter_coords(config.size).collect();

    c.bench_function("intro_frames", |b| {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        b.iter(|| {
            sequencer
                .intro(black_box(cells.clone()), config.intro_group_size, &mut rng)
                .map(|sweep| sweep.sum::<i16>() as i32)
                .sum::<i32>()
        });
    });
}

criterion_group!(benches, bench_generate, bench_intro);
criterion_main!(benches);
