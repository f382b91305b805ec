//! Algebraic coordinate notation
//!
//! Converts between [`Square`] / [`Move`] values and their text form: a file letter `a`-`h`
//! followed by a rank digit `1`-`8` for squares, and two squares back to back for moves
//! (`"e2e4"`). Disambiguation, check suffixes and piece prefixes are not supported.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::types::{Move, Square};

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

fn parse_square(file: char, rank: char) -> Result<Square, NotationError> {
    if !('a'..='h').contains(&file) {
        return Err(NotationError::InvalidFile { file });
    }
    if !('1'..='8').contains(&rank) {
        return Err(NotationError::InvalidRank { rank });
    }
    Ok(Square {
        rank: rank as u8 - b'1',
        file: file as u8 - b'a',
    })
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        match chars.as_slice() {
            [file, rank] => parse_square(file.to_ascii_lowercase(), *rank),
            _ => Err(NotationError::InvalidLength {
                text: s.to_string(),
                expected: 2,
            }),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        match chars.as_slice() {
            [f1, r1, f2, r2] => Ok(Move {
                from: parse_square(f1.to_ascii_lowercase(), *r1)?,
                to: parse_square(f2.to_ascii_lowercase(), *r2)?,
            }),
            _ => Err(NotationError::InvalidLength {
                text: s.to_string(),
                expected: 4,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_move() {
        let mv: Move = "e2e4".parse().unwrap();
        assert_eq!(mv.from, Square { rank: 1, file: 4 });
        assert_eq!(mv.to, Square { rank: 3, file: 4 });
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_corner_squares() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square { rank: 0, file: 0 });
        assert_eq!("h8".parse::<Square>().unwrap(), Square { rank: 7, file: 7 });
    }

    #[test]
    fn test_rejects_malformed_text() {
        assert_eq!(
            "i2e4".parse::<Move>(),
            Err(NotationError::InvalidFile { file: 'i' })
        );
        assert_eq!(
            "e9e4".parse::<Move>(),
            Err(NotationError::InvalidRank { rank: '9' })
        );
        assert!(matches!(
            "e2e".parse::<Move>(),
            Err(NotationError::InvalidLength { expected: 4, .. })
        ));
    }
}
