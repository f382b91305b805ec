//! Position scoring
//!
//! Advisory scoring only; legality never depends on it. Scores are in pawns and signed so that
//! positive values favor White.
//!
//! ## Module Organization
//!
//! - `material` - static material balance
//! - `position` - material plus the pawn and knight positional terms

mod material;
mod position;

pub use material::material_balance;
pub use position::{evaluate_position, piece_score};
