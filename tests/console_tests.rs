//! Console game loop tests
//!
//! Drive [`Console`] with scripted input and inspect what it printed.

use std::io::Cursor;

use chess_mcts::{Color, GameState, Mcts, Outcome, SearchConfig};
use mcts_chess::Console;

fn engine() -> Mcts {
    let config = SearchConfig {
        iterations: 8,
        use_book: false,
        ..SearchConfig::default()
    }
    .with_seed(17);
    Mcts::new(config).unwrap()
}

fn run(fen: &str, engine_color: Color, script: &str) -> (Option<Outcome>, String, GameState) {
    let game = GameState::from_fen(fen).unwrap();
    let mut output = Vec::new();
    let mut console = Console::new(game, engine(), engine_color, Cursor::new(script), &mut output);
    let outcome = console.run().unwrap();
    let game = console.game().clone();
    drop(console);
    (outcome, String::from_utf8(output).unwrap(), game)
}

#[test]
fn test_human_delivers_mate() {
    let (outcome, printed, _) = run(
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        Color::Black,
        "a1a8\n",
    );
    assert_eq!(
        outcome,
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    assert!(printed.contains("Game over: checkmate"), "{printed}");
}

#[test]
fn test_bad_input_is_reported_and_game_continues() {
    let (outcome, printed, game) = run(
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
        Color::Black,
        "zz\na1a9\ng1g3\nquit\n",
    );
    assert_eq!(outcome, None);
    assert_eq!(printed.matches("Rejected:").count(), 3, "{printed}");
    assert_eq!(game.turn(), Color::White);
    assert!(game.history().is_empty());
}

#[test]
fn test_engine_answers_for_its_colour() {
    //! Black's only move is forced, so the engine reply is known in advance

    let (outcome, printed, game) = run("k7/8/8/8/8/8/8/1R5K b - - 0 1", Color::Black, "");
    assert_eq!(outcome, None);
    assert!(printed.contains("Engine plays a8a7"), "{printed}");
    assert_eq!(game.turn(), Color::White);
}

#[test]
fn test_info_commands_do_not_move() {
    let (_, printed, game) = run(
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
        Color::Black,
        "fen\nmoves\nhelp\n",
    );
    assert!(printed.contains("4k3/8/8/8/8/8/8/R3K3 w - - 0 1"));
    assert!(printed.contains("a1a8"));
    assert!(printed.contains("quit"));
    assert!(game.history().is_empty());
}

#[test]
fn test_stalemated_engine_stops_cleanly() {
    let (outcome, printed, game) = run("k7/8/1Q6/8/8/8/8/2K5 b - - 0 1", Color::Black, "");
    assert_eq!(outcome, None);
    assert!(printed.contains("Black has no legal moves."), "{printed}");
    assert!(game.history().is_empty());
}

#[test]
fn test_promotion_is_typed_as_four_characters() {
    let (_, printed, game) = run(
        "k7/4P3/8/8/8/8/8/K7 w - - 0 1",
        Color::Black,
        "help\ne7e8q\ne7e8\n",
    );
    assert!(!printed.contains("e7e8q |"), "{printed}");
    assert_eq!(printed.matches("Rejected:").count(), 1, "{printed}");
    assert_eq!(game.history().first().map(ToString::to_string), Some("e7e8".to_string()));
}
