use criterion::{black_box, criterion_group, criterion_main, Criterion};
use block_drop::core::{collides, Engine, Grid, Piece, TickOutcome};
use block_drop::types::{Color, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::new(12345);
    engine.start_new_game();

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.start_new_game();
            }
            black_box(engine.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::canonical();
            grid.fill_rows_except(16..20, &[], Color::Cyan);
            grid.set(0, 15, Some(Color::Red));
            black_box(grid.clear_full_rows());
        })
    });
}

fn bench_lock_and_promote(c: &mut Criterion) {
    c.bench_function("drop_to_lock", |b| {
        let mut engine = Engine::new(12345);
        engine.start_new_game();
        b.iter(|| {
            if engine.is_game_over() {
                engine.start_new_game();
            }
            while engine.request_soft_drop() {}
            black_box(matches!(engine.tick(), TickOutcome::Locked(_)));
        })
    });
}

fn bench_new_game(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("start_new_game", |b| {
        b.iter(|| {
            engine.start_new_game();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut engine = Engine::new(12345);
    engine.start_new_game();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !engine.request_move_right() {
                while engine.request_move_left() {}
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(12345);
    engine.start_new_game();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            black_box(engine.request_rotate());
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut grid = Grid::canonical();
    grid.fill_rows_except(10..20, &[4], Color::Blue);
    let piece = Piece::new(PieceKind::T, 3, 9);

    c.bench_function("collides", |b| {
        b.iter(|| black_box(collides(black_box(&piece), &grid)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = Engine::new(12345);
    engine.start_new_game();

    c.bench_function("snapshot", |b| b.iter(|| black_box(engine.snapshot())));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_lock_and_promote,
    bench_new_game,
    bench_try_move,
    bench_try_rotate,
    bench_collision,
    bench_snapshot
);
criterion_main!(benches);
