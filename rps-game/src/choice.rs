use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Choice as submitted by a caller, including the `NotPlayed` sentinel.
///
/// Codes: 0 = NotPlayed, 1 = Rock, 2 = Paper, 3 = Scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Choice {
    NotPlayed = 0,
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Choice {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Choice {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Choice::NotPlayed),
            1 => Ok(Choice::Rock),
            2 => Ok(Choice::Paper),
            3 => Ok(Choice::Scissors),
            other => Err(GameError::UnknownChoice(other.to_string())),
        }
    }
}

impl FromStr for Choice {
    type Err = GameError;

    /// Accepts a numeric code or a case-insensitive name
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Choice::try_from(code);
        }

        match s.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "notplayed" => Ok(Choice::NotPlayed),
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            _ => Err(GameError::UnknownChoice(s.to_string())),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::NotPlayed => f.write_str("NOT PLAYED"),
            Choice::Rock => f.write_str("Rock"),
            Choice::Paper => f.write_str("Paper"),
            Choice::Scissors => f.write_str("Scissors"),
        }
    }
}

/// A move that has passed validation. Evaluation only ever sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Rock beats Scissors, Scissors beats Paper, Paper beats Rock
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Scissors, Move::Paper)
                | (Move::Paper, Move::Rock)
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
        }
    }
}

impl TryFrom<Choice> for Move {
    type Error = GameError;

    fn try_from(choice: Choice) -> Result<Self> {
        match choice {
            Choice::NotPlayed => Err(GameError::InvalidChoice),
            Choice::Rock => Ok(Move::Rock),
            Choice::Paper => Ok(Move::Paper),
            Choice::Scissors => Ok(Move::Scissors),
        }
    }
}

impl From<Move> for Choice {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Rock => Choice::Rock,
            Move::Paper => Choice::Paper,
            Move::Scissors => Choice::Scissors,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
