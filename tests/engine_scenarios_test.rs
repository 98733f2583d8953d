//! End-to-end engine scenarios, driven tick by tick

use block_drop::core::{collides, Engine, GameOverReason, Grid, Piece, Shape, TickOutcome};
use block_drop::types::{Color, Command, GameStatus, PieceKind};

fn lock_active(engine: &mut Engine) -> TickOutcome {
    loop {
        match engine.tick() {
            TickOutcome::Fell => continue,
            outcome => return outcome,
        }
    }
}

#[test]
fn test_bar_completes_bottom_row() {
    let mut grid = Grid::canonical();
    grid.fill_rows_except(19..20, &[6, 7, 8, 9], Color::Red);
    grid.set(0, 18, Some(Color::Blue));
    let mut engine = Engine::with_grid(grid, 11);
    engine.start_new_game();

    assert!(engine.replace_active(Piece::new(PieceKind::I, 6, 0)));
    let TickOutcome::Locked(report) = lock_active(&mut engine) else {
        panic!("piece never locked");
    };

    assert_eq!(report.kind, PieceKind::I);
    assert_eq!(report.cleared_rows, 1);
    assert_eq!(report.points, 100);
    assert_eq!(engine.current_score(), 100);
    assert_eq!(engine.lines_cleared(), 1);

    let grid = engine.snapshot_grid();
    assert_eq!(grid.color(0, 19), Some(Color::Blue));
    assert!(!grid.is_occupied(0, 18));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_move_left_stops_at_wall() {
    let mut engine = Engine::new(8);
    engine.start_new_game();
    assert!(engine.replace_active(Piece::new(PieceKind::O, 4, 0)));

    for expected_x in [3, 2, 1, 0] {
        assert!(engine.request_move_left());
        assert_eq!(engine.active().unwrap().x, expected_x);
    }

    let before = *engine.active().unwrap();
    assert!(!engine.request_move_left());
    assert_eq!(engine.active(), Some(&before));
}

#[test]
fn test_move_right_stops_at_wall() {
    let mut engine = Engine::new(8);
    engine.start_new_game();
    assert!(engine.replace_active(Piece::new(PieceKind::I, 3, 0)));

    let mut moves = 0;
    while engine.request_move_right() {
        moves += 1;
    }
    assert_eq!(moves, 3);
    assert_eq!(engine.active().unwrap().x, 6);
}

#[test]
fn test_moves_blocked_by_committed_cells() {
    let mut grid = Grid::canonical();
    grid.set(2, 0, Some(Color::Green));
    let mut engine = Engine::with_grid(grid, 8);
    engine.start_new_game();
    assert!(engine.replace_active(Piece::new(PieceKind::O, 3, 0)));

    assert!(!engine.request_move_left());
    assert_eq!(engine.active().unwrap().x, 3);
}

#[test]
fn test_piece_at_i8_edge_is_rejected() {
    let mut engine = Engine::new(8);
    engine.start_new_game();
    let far = Piece::new(PieceKind::I, 126, 0);

    assert!(collides(&far, engine.grid()));
    assert!(!engine.replace_active(far));
    assert_eq!(engine.grid().clone().commit(&far), 0);
    assert_eq!(engine.active().unwrap().x, 3);
}

#[test]
fn test_custom_shape_piece_locks() {
    let hook = Shape::from_rows(&[[1, 1], [1, 0], [1, 0]]).unwrap();
    let mut engine = Engine::new(8);
    engine.start_new_game();
    assert!(engine.replace_active(Piece::with_shape(PieceKind::J, hook, Color::Red, 0, 0)));

    let TickOutcome::Locked(report) = lock_active(&mut engine) else {
        panic!("piece never locked");
    };
    assert_eq!(report.kind, PieceKind::J);
    let grid = engine.snapshot_grid();
    assert_eq!(grid.color(0, 17), Some(Color::Red));
    assert_eq!(grid.color(1, 17), Some(Color::Red));
    assert_eq!(grid.color(0, 19), Some(Color::Red));
    assert_eq!(grid.occupied_count(), 4);
}

#[test]
fn test_rotation_rejected_at_floor() {
    let mut engine = Engine::new(8);
    engine.start_new_game();
    assert!(engine.replace_active(Piece::new(PieceKind::I, 3, 19)));

    // upright bar would need rows 19..23
    assert!(!engine.request_rotate());
    assert_eq!(engine.active().unwrap().shape().rows(), 1);
}

#[test]
fn test_filled_grid_ends_game_and_freezes_state() {
    let mut grid = Grid::canonical();
    grid.fill_rows_except(0..20, &[3], Color::Blue);
    let mut engine = Engine::with_grid(grid, 4);
    engine.start_new_game();

    assert!(engine.is_game_over());
    assert_eq!(engine.status(), GameStatus::GameOver);
    assert_eq!(engine.game_over_reason(), Some(GameOverReason::BlockOut));

    let before = engine.snapshot();
    for command in [Command::MoveLeft, Command::MoveRight, Command::Rotate, Command::SoftDrop] {
        assert!(!engine.apply(command), "{:?} applied after game over", command);
    }
    assert_eq!(engine.tick(), TickOutcome::Idle);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_stacking_eventually_ends_game() {
    let mut engine = Engine::new(31337);
    engine.start_new_game();

    let mut locks = 0;
    while !engine.is_game_over() {
        if let TickOutcome::Locked(_) = lock_active(&mut engine) {
            locks += 1;
        }
        assert!(locks < 200, "game never ended");
    }
    assert!(engine.game_over_reason().is_some());
    assert_eq!(engine.pieces_locked(), locks);
    assert!(engine.snapshot().to_string().ends_with("GAME OVER"));
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut engine = Engine::new(seed);
        engine.start_new_game();
        let mut kinds = Vec::new();
        for _ in 0..10 {
            kinds.push(engine.active().unwrap().kind);
            engine.request_move_left();
            lock_active(&mut engine);
        }
        (kinds, engine.snapshot())
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_first_two_pieces_differ() {
    for seed in 1..50 {
        let mut engine = Engine::new(seed);
        engine.start_new_game();
        let active = engine.active().unwrap().kind;
        let next = engine.next().unwrap().kind;
        assert_ne!(active, next, "seed {}", seed);
    }
}

#[test]
fn test_snapshot_reports_pieces() {
    let mut engine = Engine::new(6);
    engine.start_new_game();

    let snapshot = engine.snapshot();
    let active = snapshot.active.as_ref().unwrap();
    assert_eq!(active.cells.len(), 4);
    assert_eq!(active.cells, engine.active_piece_cells());
    let preview = engine.next_piece_preview().unwrap();
    assert_eq!(snapshot.next, Some(preview));
    assert_eq!(preview.color, preview.kind.color());
    assert_eq!(snapshot.game_id, 1);
    assert_eq!(snapshot.tick_interval_ms, 1000);
}

#[test]
fn test_custom_grid_size() {
    let mut engine = Engine::with_size(6, 8, 1).unwrap();
    engine.start_new_game();
    assert_eq!(engine.active().unwrap().x, 1);
    lock_active(&mut engine);
    assert_eq!(engine.pieces_locked(), 1);
    assert!(Engine::with_size(60, 100, 1).is_err());
}
