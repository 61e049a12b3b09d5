//! Match state machine
//!
//! A `Match` is an immutable value. `play_round` returns the next state and
//! leaves the receiver untouched, so a rejected round can never leave a
//! half-applied match behind.

use serde::{Deserialize, Serialize};

use crate::choice::{resolve, Choice, Outcome};
use crate::error::{GameError, Result};
use crate::policy::{Difficulty, Opponent};

/// Match phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Finished,
}

/// Which side took the match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    User,
    Ai,
}

/// One resolved round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub user: Choice,
    pub ai: Choice,
    pub outcome: Outcome,
}

/// Snapshot of a match
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub user_score: u32,
    pub ai_score: u32,
    pub target_score: u32,
    pub last_user_choice: Option<Choice>,
    pub last_ai_choice: Option<Choice>,
    pub history: Vec<RoundRecord>,
    pub last_outcome: Option<Outcome>,
    pub message: String,
}

impl Match {
    /// Start a match. The name is trimmed and must not end up empty.
    pub fn new(player_name: &str, difficulty: Difficulty, target_score: u32) -> Result<Self> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if target_score == 0 {
            return Err(GameError::InvalidTargetScore(target_score));
        }

        Ok(Self {
            player_name: player_name.to_string(),
            difficulty,
            phase: Phase::Playing,
            user_score: 0,
            ai_score: 0,
            target_score,
            last_user_choice: None,
            last_ai_choice: None,
            history: Vec::new(),
            last_outcome: None,
            message: format!("First to {} wins. Make your move, {}.", target_score, player_name),
        })
    }

    /// Fresh match with the same name, difficulty and target
    pub fn rematch(&self) -> Self {
        Self {
            phase: Phase::Playing,
            user_score: 0,
            ai_score: 0,
            last_user_choice: None,
            last_ai_choice: None,
            history: Vec::new(),
            last_outcome: None,
            message: format!(
                "First to {} wins. Make your move, {}.",
                self.target_score, self.player_name
            ),
            ..self.clone()
        }
    }

    /// Parse a snapshot handed back by a front end and check it
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Match = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidSnapshot(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Check the invariants `new` and `play_round` maintain
    pub fn validate(&self) -> Result<()> {
        if self.player_name.trim().is_empty() {
            return Err(GameError::EmptyPlayerName);
        }
        if self.target_score == 0 {
            return Err(GameError::InvalidTargetScore(self.target_score));
        }
        if self.user_score > self.target_score || self.ai_score > self.target_score {
            return Err(GameError::InvalidSnapshot(format!(
                "score {}-{} exceeds target {}",
                self.user_score, self.ai_score, self.target_score
            )));
        }
        if self.user_score == self.target_score && self.ai_score == self.target_score {
            return Err(GameError::InvalidSnapshot("both sides reached the target".into()));
        }
        if self.is_finished() != self.winner().is_some() {
            return Err(GameError::InvalidSnapshot(format!(
                "phase {:?} does not match score {}-{}",
                self.phase, self.user_score, self.ai_score
            )));
        }
        if let Some(bad) = self.history.iter().position(|r| resolve(r.user, r.ai) != r.outcome) {
            return Err(GameError::InvalidSnapshot(format!("round {} has the wrong outcome", bad + 1)));
        }
        let wins = self.history.iter().filter(|r| r.outcome == Outcome::Win).count();
        let losses = self.history.iter().filter(|r| r.outcome == Outcome::Lose).count();
        if wins != self.user_score as usize || losses != self.ai_score as usize {
            return Err(GameError::InvalidSnapshot("history does not add up to the score".into()));
        }
        Ok(())
    }

    /// Play one round against `opponent` and return the next state
    pub fn play_round(&self, user: Choice, opponent: &mut dyn Opponent) -> Result<Self> {
        self.validate()?;
        if self.phase != Phase::Playing {
            return Err(GameError::MatchFinished);
        }

        let ai = opponent.choose(self.difficulty, &self.history);
        Ok(self.apply_round(user, ai))
    }

    /// Apply a round whose choices are already known
    fn apply_round(&self, user: Choice, ai: Choice) -> Self {
        let outcome = resolve(user, ai);
        let mut next = self.clone();

        match outcome {
            Outcome::Win => next.user_score += 1,
            Outcome::Lose => next.ai_score += 1,
            Outcome::Draw => {}
        }
        next.history.push(RoundRecord { user, ai, outcome });
        next.last_user_choice = Some(user);
        next.last_ai_choice = Some(ai);
        next.last_outcome = Some(outcome);
        next.message = round_message(user, ai, outcome);

        log::debug!(
            "round {}: {} vs {} -> {:?} ({}-{})",
            next.history.len(),
            user,
            ai,
            outcome,
            next.user_score,
            next.ai_score
        );

        if let Some(winner) = next.winner() {
            next.phase = Phase::Finished;
            next.message = match_message(&next, winner);
        }
        next
    }

    /// The side that reached the target, if any
    pub fn winner(&self) -> Option<Side> {
        if self.user_score >= self.target_score {
            Some(Side::User)
        } else if self.ai_score >= self.target_score {
            Some(Side::Ai)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_user_winner(&self) -> bool {
        self.winner() == Some(Side::User)
    }

    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    pub fn draws(&self) -> usize {
        self.history.iter().filter(|r| r.outcome == Outcome::Draw).count()
    }
}

fn round_message(user: Choice, ai: Choice, outcome: Outcome) -> String {
    match outcome {
        Outcome::Win => format!("{} {} {}. You take the round!", user, user.verb(), ai),
        Outcome::Lose => format!("{} {} {}. The AI takes the round.", ai, ai.verb(), user),
        Outcome::Draw => format!("Both chose {}. Stalemate.", user),
    }
}

fn match_message(state: &Match, winner: Side) -> String {
    match winner {
        Side::User => format!(
            "Victory! {} wins the match {}-{}.",
            state.player_name, state.user_score, state.ai_score
        ),
        Side::Ai => format!(
            "Defeat. The AI wins the match {}-{}.",
            state.ai_score, state.user_score
        ),
    }
}
