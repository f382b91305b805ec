//! Search configuration and difficulty levels
//!
//! [`SearchConfig`] carries every tunable of the MCTS engine and round-trips through serde so the
//! front-end can persist it. [`Difficulty`] is the coarse knob exposed to players; it only picks
//! an iteration budget.
//!
//! # Difficulty Levels
//!
//! | Difficulty | Iterations/Move |
//! |------------|-----------------|
//! | Easy       | 50              |
//! | Medium     | 200             |
//! | Hard       | 800             |
//!
//! More iterations means more rollouts per candidate, so the visit statistics the engine picks
//! from are less noisy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXPLORATION, DEFAULT_ITERATIONS};
use crate::error::ConfigError;
use crate::hash::TableMode;

/// Engine strength presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Quick replies, frequent blunders
    Easy,
    #[default]
    Medium,
    /// Slow, noticeably stronger in tactical positions
    Hard,
}

impl Difficulty {
    /// Iterations per searched move.
    pub fn iterations(self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => DEFAULT_ITERATIONS,
            Difficulty::Hard => 800,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (50 iterations)",
            Difficulty::Medium => "Medium (200 iterations)",
            Difficulty::Hard => "Hard (800 iterations)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty \"{other}\" (easy, medium, hard)")),
        }
    }
}

/// Tunables of one [`crate::search::Mcts`] engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Select/expand/simulate/backpropagate cycles per `select_move`
    pub iterations: u32,
    /// UCB1 exploration constant
    pub exploration: f64,
    /// Selection stops descending at this depth below the current node
    pub max_depth: Option<u32>,
    /// Consult the opening book before searching
    pub use_book: bool,
    pub table: TableMode,
    /// Seed for the engine's RNG; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            iterations: DEFAULT_ITERATIONS,
            exploration: DEFAULT_EXPLORATION,
            max_depth: None,
            use_book: true,
            table: TableMode::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> SearchConfig {
        SearchConfig {
            iterations: difficulty.iterations(),
            ..SearchConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> SearchConfig {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::Exploration {
                value: self.exploration,
            });
        }
        if let TableMode::Lossy { slots: 0 } = self.table {
            return Err(ConfigError::ZeroSlots);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_budgets_increase() {
        assert!(Difficulty::Easy.iterations() < Difficulty::Medium.iterations());
        assert!(Difficulty::Medium.iterations() < Difficulty::Hard.iterations());
        assert_eq!(
            SearchConfig::for_difficulty(Difficulty::Hard).iterations,
            800
        );
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SearchConfig::default();
        assert_eq!(config.validate(), Ok(()));

        config.iterations = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIterations));

        config = SearchConfig {
            exploration: f64::NAN,
            ..SearchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Exploration { .. })
        ));

        config = SearchConfig {
            table: TableMode::Lossy { slots: 0 },
            ..SearchConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroSlots));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SearchConfig {
            max_depth: Some(12),
            table: TableMode::Exact,
            seed: Some(99),
            ..SearchConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"iterations": 10}"#).unwrap();
        assert_eq!(config.iterations, 10);
        assert!(config.use_book);
        assert_eq!(config.table, TableMode::default());
    }
}
