//! Text console game loop
//!
//! One human plays against the MCTS engine. The human types moves in coordinate notation
//! (`e2e4`; pawns reaching the last rank become queens); the engine answers for its own
//! colour. The loop ends on a terminal outcome, on `quit`, when the side to move has no legal
//! move, or when input runs out.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_mcts::{Color, GameState, Mcts, MoveError, Outcome};
use tracing::{debug, info};

const HELP: &str =
    "moves: e2e4 (promotion is always to a queen) | board | fen | moves | help | quit";

pub struct Console<R, W> {
    game: GameState,
    engine: Mcts,
    engine_color: Color,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(game: GameState, engine: Mcts, engine_color: Color, input: R, output: W) -> Self {
        Console {
            game,
            engine,
            engine_color,
            input,
            output,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Play until the game ends or the human stops.
    ///
    /// Returns the outcome when the game reached one.
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        writeln!(self.output, "{}\n", self.game.position())?;
        writeln!(
            self.output,
            "You play {}. Type 'help' for commands.",
            self.engine_color.opponent()
        )?;

        loop {
            if self.game.legal_moves().is_empty() {
                writeln!(self.output, "{} has no legal moves.", self.game.turn())?;
                return Ok(None);
            }
            if self.game.turn() == self.engine_color {
                if let Some(outcome) = self.engine_turn()? {
                    return Ok(Some(outcome));
                }
                continue;
            }

            write!(self.output, "{} to move> ", self.game.turn())?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line).context("reading move")? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match line.trim() {
                "" => {}
                "quit" | "exit" => return Ok(None),
                "help" => writeln!(self.output, "{HELP}")?,
                "board" => writeln!(self.output, "{}", self.game.position())?,
                "fen" => writeln!(self.output, "{}", self.game.fen())?,
                "moves" => {
                    let moves: Vec<String> = self
                        .game
                        .legal_moves()
                        .iter()
                        .map(ToString::to_string)
                        .collect();
                    writeln!(self.output, "{}", moves.join(" "))?;
                }
                text => {
                    if let Some(outcome) = self.human_move(text)? {
                        return Ok(Some(outcome));
                    }
                }
            }
        }
    }

    fn human_move(&mut self, text: &str) -> Result<Option<Outcome>> {
        match self.game.apply_notation(text) {
            Ok(()) => {
                debug!("[CONSOLE] Human played {}", text);
                writeln!(self.output, "{}\n", self.game.position())?;
                Ok(None)
            }
            Err(MoveError::GameOver(outcome)) => self.finish(outcome),
            Err(e) => {
                writeln!(self.output, "Rejected: {e}")?;
                Ok(None)
            }
        }
    }

    fn engine_turn(&mut self) -> Result<Option<Outcome>> {
        let mv = self
            .engine
            .select_move(&self.game)
            .context("engine failed to pick a move")?;
        info!("[CONSOLE] Engine plays {}", mv);
        writeln!(self.output, "Engine plays {mv}")?;
        match self.game.apply(mv) {
            Ok(()) => {
                writeln!(self.output, "{}\n", self.game.position())?;
                Ok(None)
            }
            Err(MoveError::GameOver(outcome)) => self.finish(outcome),
            Err(e) => Err(e).with_context(|| format!("engine move {mv} was rejected")),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Result<Option<Outcome>> {
        info!("[CONSOLE] Game over: {}", outcome);
        writeln!(self.output, "{}\n", self.game.position())?;
        writeln!(self.output, "Game over: {outcome}")?;
        Ok(Some(outcome))
    }
}
