//! Choices, round outcomes and the resolver

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A hand shown in one round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

/// Result of a round from the user's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// True if `self` defeats `other`
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    /// The choice that defeats `self`
    pub fn counter(self) -> Choice {
        match self {
            Choice::Rock => Choice::Paper,
            Choice::Paper => Choice::Scissors,
            Choice::Scissors => Choice::Rock,
        }
    }

    /// Position in `Choice::ALL`
    pub fn index(self) -> usize {
        match self {
            Choice::Rock => 0,
            Choice::Paper => 1,
            Choice::Scissors => 2,
        }
    }

    /// Verb used when this choice wins, e.g. "Rock crushes Scissors"
    pub fn verb(self) -> &'static str {
        match self {
            Choice::Rock => "crushes",
            Choice::Paper => "covers",
            Choice::Scissors => "cut",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" => Ok(Choice::Rock),
            "paper" => Ok(Choice::Paper),
            "scissors" => Ok(Choice::Scissors),
            _ => Err(GameError::InvalidChoice(s.to_string())),
        }
    }
}

impl Outcome {
    /// Same round seen from the opponent's side
    pub fn reversed(self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Resolve a round. Identical choices draw; otherwise standard dominance.
pub fn resolve(user: Choice, ai: Choice) -> Outcome {
    if user == ai {
        Outcome::Draw
    } else if user.beats(ai) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}
