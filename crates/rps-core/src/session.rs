//! Play session: owns the active match and runs the completion hook
//!
//! The session is the only writer of a match. A caller that wants the
//! reveal pause waits `reveal_delay()` before calling `play_round`; nothing
//! changes until the call is made, so abandoning the wait needs no rollback.
//!
//! A finished match is committed before its result is saved. If the save
//! fails the computed stats stay pending and are written again, unchanged,
//! by `retry_save`, `start` or `rematch`, so a match is never counted twice.

use std::time::Duration;

use crate::choice::Choice;
use crate::config::MatchConfig;
use crate::error::{GameError, Result};
use crate::game::Match;
use crate::policy::{Difficulty, Opponent, PolicyOpponent, PolicyParams};
use crate::stats::{record_match, LeaderboardEntry, PlayerStats};
use crate::store::StatsStore;

pub struct Session<S: StatsStore> {
    store: S,
    config: MatchConfig,
    opponent: Box<dyn Opponent>,
    current: Option<Match>,
    stats: PlayerStats,
    /// Result of the last finished match not yet written to the store
    pending: Option<PlayerStats>,
    leaderboard: Vec<LeaderboardEntry>,
}

impl<S: StatsStore> Session<S> {
    /// Open a session with the difficulty policy seeded from entropy
    pub fn new(store: S, config: MatchConfig) -> Result<Self> {
        let params = PolicyParams { counter_bias: config.hard_counter_bias };
        Self::with_opponent(store, config, Box::new(PolicyOpponent::from_entropy(params)))
    }

    /// Open a session against a specific opponent
    pub fn with_opponent(store: S, config: MatchConfig, opponent: Box<dyn Opponent>) -> Result<Self> {
        config.validate()?;
        let stats = store.load_stats()?;
        let leaderboard = store.load_leaderboard()?;

        Ok(Self { store, config, opponent, current: None, stats, pending: None, leaderboard })
    }

    /// Start a new match, replacing any match in progress
    pub fn start(&mut self, player_name: &str, difficulty: Difficulty) -> Result<&Match> {
        let next = Match::new(player_name, difficulty, self.config.target_score)?;
        self.retry_save()?;
        log::info!(
            "{} starts a {} match, first to {}",
            next.player_name,
            difficulty,
            next.target_score
        );
        Ok(&*self.current.insert(next))
    }

    /// Same player, difficulty and target as the last match
    pub fn rematch(&mut self) -> Result<&Match> {
        let last = self.current.as_ref().ok_or(GameError::NoActiveMatch)?;
        let next = last.rematch();
        self.retry_save()?;
        log::info!("{} requests a rematch", next.player_name);
        Ok(&*self.current.insert(next))
    }

    /// Abandon the current match without touching stats
    pub fn resign(&mut self) {
        if let Some(abandoned) = self.current.take() {
            log::info!(
                "{} resigns at {}-{}",
                abandoned.player_name,
                abandoned.user_score,
                abandoned.ai_score
            );
        }
    }

    /// Play one round. Records the result once when the match finishes.
    ///
    /// The new state is kept even when saving the result fails; the error is
    /// returned and the save can be retried with `retry_save`.
    pub fn play_round(&mut self, choice: Choice) -> Result<&Match> {
        let current = self.current.as_ref().ok_or(GameError::NoActiveMatch)?;
        let next = current.play_round(choice, self.opponent.as_mut())?;

        if next.is_finished() {
            self.pending = Some(record_match(&self.stats, &next)?);
            log::info!("match over: {} ({}-{})", next.message, next.user_score, next.ai_score);
        }
        self.current = Some(next);
        self.retry_save()?;

        self.current.as_ref().ok_or(GameError::NoActiveMatch)
    }

    /// Parse a choice from user input and play it
    pub fn play_named(&mut self, choice: &str) -> Result<&Match> {
        let choice: Choice = choice.parse()?;
        self.play_round(choice)
    }

    /// Write the pending match result, if any. Safe to call repeatedly.
    pub fn retry_save(&mut self) -> Result<()> {
        let Some(updated) = self.pending.clone() else {
            return Ok(());
        };
        self.store.save_stats(&updated)?;
        log::info!(
            "saved stats for {}: streak {} best {}",
            updated.name,
            updated.win_streak,
            updated.high_streak
        );

        self.pending = None;
        self.stats = updated;
        self.leaderboard = self.store.load_leaderboard()?;
        Ok(())
    }

    /// True while a finished match's result has not reached the store
    pub fn has_unsaved_result(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn reveal_delay(&self) -> Duration {
        self.config.reveal_delay()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
