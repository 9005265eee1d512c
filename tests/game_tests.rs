//! Controller behavior through the public API

use tstack::game::piece::center;
use tstack::{Game, GameConfig, GameState, TickOutcome};

fn seeded(seed: u64) -> Game {
    let mut game = Game::new(GameConfig { seed: Some(seed), ..GameConfig::default() });
    assert!(game.start());
    game
}

// Plays until game over by dropping every piece straight down
fn play_out(game: &mut Game) -> usize {
    let mut pieces = 0;
    for _ in 0..10_000 {
        game.hard_drop();
        match game.tick() {
            TickOutcome::Spawned => {
                pieces += 1;
                let piece = game.current();
                assert_eq!(piece.y, 0);
                assert_eq!(piece.x, center(game.board().width() as i32, piece.shape.width()));
            }
            TickOutcome::Clearing(rows) => {
                assert!(!rows.is_empty());
                game.complete_clear();
            }
            TickOutcome::GameOver => return pieces,
            TickOutcome::Fell | TickOutcome::Idle => {}
        }
    }
    panic!("game never ended");
}

#[test]
fn stacking_in_the_middle_ends_the_game() {
    let mut game = seeded(11);
    let pieces = play_out(&mut game);
    assert!(pieces > 0);
    assert_eq!(game.state(), GameState::GameOver);

    // the piece that did not fit is drawn above the board
    let piece = game.current();
    assert!(piece.y < 0);
    assert!(piece.y >= -piece.shape.height());
    let visible_from = -piece.y;
    if visible_from < piece.shape.height() {
        assert!(game.board().can_put_part(&piece.shape, piece.x, piece.y, visible_from));
    }
}

#[test]
fn same_seed_same_game() {
    let mut a = seeded(99);
    let mut b = seeded(99);
    assert_eq!(play_out(&mut a), play_out(&mut b));
    assert_eq!(a.board(), b.board());
    assert_eq!(a.score(), b.score());
}

#[test]
fn colors_stay_in_palette() {
    let mut game = Game::new(GameConfig { seed: Some(4), colors: 2, ..GameConfig::default() });
    game.start();
    play_out(&mut game);
    assert!(game.board().rows().flatten().all(|&c| c <= 2));
    assert!((1..=2).contains(&game.preview().color));
}

#[test]
fn restart_after_game_over() {
    let mut game = seeded(7);
    play_out(&mut game);
    let preview = game.preview().info;

    game.restart();
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.current().info, preview);
    assert!(game.board().find_full_rows().is_empty());
    assert!(game.board().rows().all(|row| row.iter().all(|&c| c == 0)));
}
