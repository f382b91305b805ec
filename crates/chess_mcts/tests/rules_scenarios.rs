//! Integration tests for the rules engine
//!
//! Plays short concrete sequences through the public `GameState` API and checks the resulting
//! positions, outcomes and counters.

use chess_mcts::move_gen::is_in_check;
use chess_mcts::{Color, GameResult, GameState, MoveError, Outcome, PieceKind, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sq(text: &str) -> Square {
    text.parse().unwrap()
}

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        game.apply_notation(text)
            .unwrap_or_else(|e| panic!("{text} rejected: {e}"));
    }
}

#[test]
fn test_queen_pawn_opening() {
    let mut game = GameState::new();
    play(&mut game, &["d2d4"]);

    let pawn = game.position().piece_at(sq("d4")).unwrap();
    assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
    assert!(game.position().is_empty(sq("d2")));
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn test_centre_pawn_exchange() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "d7d5", "e4d5"]);

    let pawn = game.position().piece_at(sq("d5")).unwrap();
    assert_eq!((pawn.kind, pawn.color), (PieceKind::Pawn, Color::White));
    assert!(game.position().is_empty(sq("e4")));
    assert_eq!(game.position().pieces_of(Color::Black).count(), 15);
    assert_eq!(game.position().half_moves(), 0);
}

#[test]
fn test_pawn_capture_removes_victim_and_resets_clock() {
    let mut game = GameState::new();
    play(&mut game, &["g1f3", "e7e6", "e2e4", "d7d5"]);
    assert_eq!(game.position().half_moves(), 0);
    play(&mut game, &["e4d5"]);

    let pawn = game.position().piece_at(sq("d5")).unwrap();
    assert_eq!(pawn.color, Color::White);
    assert_eq!(game.position().pieces().len(), 31);
    assert_eq!(game.position().pieces_of(Color::Black).count(), 15);
    assert_eq!(game.position().half_moves(), 0);
    assert!(game.position().is_consistent());
}

#[test]
fn test_back_rank_checkmate() {
    //! The mated side has no escape square and nothing can block or capture

    let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let outcome = game.apply_notation("a1a8");
    assert_eq!(
        outcome,
        Err(MoveError::GameOver(Outcome::Checkmate {
            winner: Color::White
        }))
    );
    assert_eq!(game.result(), Some(GameResult::WhiteWin));
    // Final position is kept
    assert_eq!(
        game.position().piece_at(sq("a8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
}

#[test]
fn test_two_kings_is_drawn_immediately() {
    let mut game = GameState::from_fen("8/8/8/8/8/8/1q6/K5k1 w - - 0 1").unwrap();
    let outcome = game.apply_notation("a1b2");
    assert_eq!(
        outcome,
        Err(MoveError::GameOver(Outcome::InsufficientMaterial))
    );
    assert_eq!(game.result().map(GameResult::value), Some(0.5));
}

#[test]
fn test_scholars_mate() {
    let mut game = GameState::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"],
    );
    let outcome = game.apply_notation("h5f7");
    assert_eq!(
        outcome,
        Err(MoveError::GameOver(Outcome::Checkmate {
            winner: Color::White
        }))
    );
    assert_eq!(game.result().map(GameResult::value), Some(1.0));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_fools_mate_scores_for_black() {
    let mut game = GameState::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4"]);
    let outcome = game.apply_notation("d8h4");
    assert_eq!(
        outcome,
        Err(MoveError::GameOver(Outcome::Checkmate {
            winner: Color::Black
        }))
    );
    assert_eq!(game.result().map(GameResult::value), Some(0.0));
}

#[test]
fn test_fifty_move_rule_on_hundredth_half_move() {
    let mut game = GameState::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    let cycle = ["a1b1", "a8b8", "b1a1", "b8a8"];

    for ply in 0..99 {
        let text = cycle[ply % 4];
        assert_eq!(game.apply_notation(text), Ok(()), "ply {ply}: {text}");
    }
    assert_eq!(game.position().half_moves(), 99);
    assert!(!game.is_game_over());

    let last = cycle[99 % 4];
    assert_eq!(
        game.apply_notation(last),
        Err(MoveError::GameOver(Outcome::FiftyMoveRule))
    );
    assert_eq!(game.result(), Some(GameResult::Draw));
}

#[test]
fn test_draw_classification() {
    let bare = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(bare.is_insufficient_material());

    for fen in [
        "4k3/8/8/8/8/8/P7/4K3 w - - 0 1",
        "4k3/p7/8/8/8/8/8/1NN1K3 w - - 0 1",
        "4k3/8/8/8/8/8/7p/2BBK3 w - - 0 1",
    ] {
        let game = GameState::from_fen(fen).unwrap();
        assert!(!game.is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_castling_relocates_two_pieces() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]);
    let before = game.position().clone();
    play(&mut game, &["e1g1"]);
    let after = game.position();

    let changed: Vec<Square> = Square::all()
        .filter(|&s| before.piece_at(s).map(|p| p.fen_char()) != after.piece_at(s).map(|p| p.fen_char()))
        .collect();
    assert_eq!(changed, vec![sq("e1"), sq("f1"), sq("g1"), sq("h1")]);
    assert_eq!(after.pieces().len(), before.pieces().len());
}

#[test]
fn test_fen_reflects_single_relocation() {
    let mut game = GameState::new();
    play(&mut game, &["g1f3"]);
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1"
    );
    play(&mut game, &["b8c6"]);
    assert_eq!(
        game.fen(),
        "r1bqkbnr/pppppppp/2n5/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 2 2"
    );
}

#[test]
fn test_random_games_never_expose_own_king() {
    //! Every move the enumerator offers keeps the mover's king safe, across seeded random games

    for seed in 0..4u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new();
        for _ in 0..120 {
            if game.is_game_over() {
                break;
            }
            let mover = game.turn();
            let legal = game.legal_moves();
            assert_eq!(legal, game.legal_moves());
            for mv in &legal {
                let mut trial = game.clone();
                match trial.apply(*mv) {
                    Ok(()) | Err(MoveError::GameOver(_)) => {}
                    Err(e) => panic!("seed {seed}: legal move {mv} rejected: {e}"),
                }
                assert!(!is_in_check(trial.position(), mover), "seed {seed}: {mv}");
            }
            match game.play_random_move(&mut rng) {
                Ok(mv) => assert!(legal.contains(&mv)),
                Err(MoveError::GameOver(_)) => {}
                Err(e) => panic!("seed {seed}: random play failed: {e}"),
            }
            assert!(game.position().is_consistent());
        }
    }
}
