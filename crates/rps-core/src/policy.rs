//! Opponent difficulty levels and move selection

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::error::GameError;
use crate::game::RoundRecord;
use crate::random::SeededRng;

/// Opponent difficulty, fixed for a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Uniform random, ignores history.
    Easy,
    /// Uniform random, ignores history.
    #[default]
    Medium,
    /// Leans toward the counter of the user's most frequent choice.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Tuning for the policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyParams {
    /// Percent chance (0-100) that Hard plays the counter outright
    pub counter_bias: u8,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self { counter_bias: 60 }
    }
}

/// Anything that can pick the opponent's hand for the next round
pub trait Opponent {
    fn choose(&mut self, difficulty: Difficulty, history: &[RoundRecord]) -> Choice;
}

/// Pick the opponent's move for one round
///
/// # Arguments
/// * `difficulty` - Opponent tier for this match
/// * `history` - Rounds played so far, oldest first
/// * `params` - Policy tuning
/// * `rng` - Random source
pub fn choose_move(
    difficulty: Difficulty,
    history: &[RoundRecord],
    params: &PolicyParams,
    rng: &mut SeededRng,
) -> Choice {
    match difficulty {
        Difficulty::Easy | Difficulty::Medium => random_choice(rng),
        Difficulty::Hard => choose_counter(history, params, rng),
    }
}

fn random_choice(rng: &mut SeededRng) -> Choice {
    Choice::ALL[rng.next_range(Choice::ALL.len() as u32) as usize]
}

/// Counter the user's habit with probability `counter_bias`, uniform otherwise.
fn choose_counter(history: &[RoundRecord], params: &PolicyParams, rng: &mut SeededRng) -> Choice {
    match favourite_choice(history) {
        Some(favourite) if rng.next_percent() < params.counter_bias => favourite.counter(),
        _ => random_choice(rng),
    }
}

/// The user's single most frequent choice; `None` when history is empty or the top is tied
pub fn favourite_choice(history: &[RoundRecord]) -> Option<Choice> {
    let mut counts = [0usize; 3];
    for record in history {
        counts[record.user.index()] += 1;
    }

    let max = *counts.iter().max()?;
    if max == 0 || counts.iter().filter(|c| **c == max).count() > 1 {
        return None;
    }
    Choice::ALL.into_iter().find(|c| counts[c.index()] == max)
}

/// The difficulty policy backed by a seeded RNG
#[derive(Clone, Debug)]
pub struct PolicyOpponent {
    params: PolicyParams,
    rng: SeededRng,
}

impl PolicyOpponent {
    pub fn new(params: PolicyParams, rng: SeededRng) -> Self {
        Self { params, rng }
    }

    pub fn from_entropy(params: PolicyParams) -> Self {
        Self::new(params, SeededRng::from_entropy())
    }
}

impl Opponent for PolicyOpponent {
    fn choose(&mut self, difficulty: Difficulty, history: &[RoundRecord]) -> Choice {
        choose_move(difficulty, history, &self.params, &mut self.rng)
    }
}

/// Plays a fixed sequence, cycling when it runs out. Ignores difficulty.
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    moves: Vec<Choice>,
    next: usize,
}

impl ScriptedOpponent {
    /// Returns `None` for an empty script
    pub fn new(moves: Vec<Choice>) -> Option<Self> {
        if moves.is_empty() {
            return None;
        }
        Some(Self { moves, next: 0 })
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(&mut self, _difficulty: Difficulty, _history: &[RoundRecord]) -> Choice {
        let choice = self.moves[self.next % self.moves.len()];
        self.next += 1;
        choice
    }
}
