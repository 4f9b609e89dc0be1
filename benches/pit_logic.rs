use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockout_pit::core::{standard_shape, Coord, Pit, PitConfig, Polycube, Session};
use blockout_pit::place::best_placement;
use blockout_pit::types::{Axis, CellContent, Rgb};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(PitConfig::default(), 12345).unwrap();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(16));
            session.drain_events();
        })
    });
}

fn bench_layer_clear(c: &mut Criterion) {
    let stone = Some(CellContent {
        color: Rgb::new(90, 90, 90),
    });
    c.bench_function("clear_4_layers", |b| {
        b.iter(|| {
            let mut pit = Pit::new(5, 5, 15);
            // Fill bottom 4 layers
            for z in 0..4 {
                for y in 0..5 {
                    for x in 0..5 {
                        pit.set(x, y, z, stone);
                    }
                }
            }
            black_box(pit.check_and_clear_layers());
        })
    });
}

fn bench_can_place(c: &mut Criterion) {
    let pit = Pit::new(5, 5, 15);
    let mut piece = Polycube::new(Arc::new(standard_shape("twist").unwrap()));
    piece.position = Coord::new(1, 1, 7);

    c.bench_function("can_place", |b| {
        b.iter(|| black_box(pit.can_place(black_box(&piece))))
    });
}

fn bench_rotate_piece(c: &mut Criterion) {
    let mut session = Session::new(PitConfig::default(), 12345).unwrap();
    session.start();

    c.bench_function("rotate_piece", |b| {
        b.iter(|| {
            session.rotate_piece(Axis::Y, 1);
            session.drain_events();
        })
    });
}

fn bench_best_placement(c: &mut Criterion) {
    let mut session = Session::new(PitConfig::default(), 12345).unwrap();
    session.start();
    session.drain_events();

    c.bench_function("best_placement", |b| {
        b.iter(|| black_box(best_placement(&session)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_layer_clear,
    bench_can_place,
    bench_rotate_piece,
    bench_best_placement
);
criterion_main!(benches);
