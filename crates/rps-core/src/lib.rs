//! Rock-Paper-Scissors match engine
//!
//! Core game logic for a human versus a scripted opponent: the round
//! resolver, the opponent policy per difficulty, the match state machine and
//! the stats/leaderboard aggregator. This crate is compiled to:
//! - Native (sessions backed by a JSON file store)
//! - WASM (browser front end)

mod choice;
mod config;
mod error;
mod game;
mod policy;
mod random;
mod session;
mod stats;
mod store;

#[cfg(feature = "wasm")]
mod wasm;

pub use choice::{resolve, Choice, Outcome};
pub use config::MatchConfig;
pub use error::{GameError, Result};
pub use game::{Match, Phase, RoundRecord, Side};
pub use policy::{
    choose_move, favourite_choice, Difficulty, Opponent, PolicyOpponent, PolicyParams,
    ScriptedOpponent,
};
pub use random::SeededRng;
pub use session::Session;
pub use stats::{rank, record_match, upsert, LeaderboardEntry, PlayerStats};
pub use store::{JsonFileStore, MemoryStore, StatsStore};

/// Start a match; see [`Match::new`]
pub fn new_match(player_name: &str, difficulty: Difficulty, target_score: u32) -> Result<Match> {
    Match::new(player_name, difficulty, target_score)
}

/// Submit one round; see [`Match::play_round`]
pub fn play_round(state: &Match, user: Choice, opponent: &mut dyn Opponent) -> Result<Match> {
    state.play_round(user, opponent)
}
