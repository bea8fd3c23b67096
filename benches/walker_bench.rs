//! Benchmarks for unlock-walker
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_legal_moves(c: &mut Criterion) {
    use unlock_walker::grid::Point;
    use unlock_walker::walker::{is_legal_move, legal_moves, Path};

    let points: Vec<Point> = [0, 4, 8].iter().filter_map(|&id| Point::new(id)).collect();
    let path = Path::from_points(&points).unwrap();

    c.bench_function("legal_moves", |b| {
        b.iter(|| black_box(legal_moves(black_box(&path)).count()))
    });

    c.bench_function("is_legal_move_all_points", |b| {
        b.iter(|| {
            Point::ALL
                .iter()
                .filter(|&&p| is_legal_move(black_box(&path), p))
                .count()
        })
    });
}

fn benchmark_enumeration(c: &mut Criterion) {
    use unlock_walker::grid::CENTER;
    use unlock_walker::walker::Enumerator;
    use unlock_walker::{Strategy, WalkConfig};

    let mut group = c.benchmark_group("enumerate_center_len6");
    group.sample_size(20);

    for strategy in [Strategy::FanOut, Strategy::Pool] {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                let config = WalkConfig::default()
                    .with_strategy(strategy)
                    .with_workers(4)
                    .with_seeds(&[CENTER])
                    .with_max_length(6);
                let (patterns, _) = Enumerator::new(config).unwrap().collect().unwrap();
                black_box(patterns.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_legal_moves, benchmark_enumeration);
criterion_main!(benches);
