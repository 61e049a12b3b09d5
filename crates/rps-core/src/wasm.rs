//! WASM bindings for the browser front end
//!
//! Matches cross the boundary as JSON snapshots. The front end keeps the
//! latest snapshot, passes it back with the next choice and gets the new
//! snapshot in return. Storage stays on the JS side.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::policy::{Difficulty, PolicyOpponent, PolicyParams};
use crate::stats::{rank, LeaderboardEntry, PlayerStats};
use crate::{record_match, Choice, Match};

fn parse_match(json: &str) -> Result<Match, JsError> {
    Match::from_json(json).map_err(|e| JsError::new(&format!("Invalid match: {}", e)))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Start a match
///
/// # Arguments
/// * `player_name` - Non-empty display name
/// * `difficulty` - "Easy", "Medium" or "Hard"
/// * `target_score` - Points needed to win
///
/// # Returns
/// JSON serialized Match
#[wasm_bindgen]
pub fn new_match(player_name: &str, difficulty: &str, target_score: u32) -> Result<String, JsError> {
    let difficulty: Difficulty = difficulty.parse().map_err(|e: crate::GameError| JsError::new(&e.to_string()))?;
    let state = Match::new(player_name, difficulty, target_score)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_json::to_string(&state)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Play one round against the difficulty policy
///
/// # Arguments
/// * `match_json` - Latest JSON snapshot from `new_match` or `play_round`
/// * `choice` - "Rock", "Paper" or "Scissors"
/// * `counter_bias` - Hard-tier counter percentage (0-100)
///
/// # Returns
/// JSON serialized Match after the round
#[wasm_bindgen]
pub fn play_round(match_json: &str, choice: &str, counter_bias: u8) -> Result<String, JsError> {
    let state = parse_match(match_json)?;
    let choice: Choice = choice.parse().map_err(|e: crate::GameError| JsError::new(&e.to_string()))?;

    let mut opponent = PolicyOpponent::from_entropy(PolicyParams { counter_bias: counter_bias.min(100) });
    let next = state
        .play_round(choice, &mut opponent)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_json::to_string(&next)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Fold a finished match into stored stats
///
/// `stats_json` may be empty for a first-time player.
#[wasm_bindgen]
pub fn record_finished_match(stats_json: &str, match_json: &str) -> Result<JsValue, JsError> {
    let prior: PlayerStats = if stats_json.trim().is_empty() {
        PlayerStats::default()
    } else {
        serde_json::from_str(stats_json)
            .map_err(|e| JsError::new(&format!("Invalid stats: {}", e)))?
    };
    let finished = parse_match(match_json)?;
    let updated = record_match(&prior, &finished).map_err(|e| JsError::new(&e.to_string()))?;

    to_js(&updated)
}

/// Sort stored profiles into a leaderboard
#[wasm_bindgen]
pub fn rank_leaderboard(entries_json: &str, limit: usize) -> Result<JsValue, JsError> {
    let entries: Vec<LeaderboardEntry> = serde_json::from_str(entries_json)
        .map_err(|e| JsError::new(&format!("Invalid leaderboard: {}", e)))?;

    to_js(&rank(entries, limit))
}

#[derive(serde::Serialize)]
struct OptionInfo {
    id: &'static str,
    description: &'static str,
}

/// Choices the player can make
#[wasm_bindgen]
pub fn get_choices() -> Result<JsValue, JsError> {
    let choices: Vec<OptionInfo> = Choice::ALL
        .iter()
        .map(|c| OptionInfo {
            id: c.as_str(),
            description: match c {
                Choice::Rock => "Crushes Scissors.",
                Choice::Paper => "Covers Rock.",
                Choice::Scissors => "Cut Paper.",
            },
        })
        .collect();

    to_js(&choices)
}

/// Difficulty levels with a short description
#[wasm_bindgen]
pub fn get_difficulties() -> Result<JsValue, JsError> {
    let levels: Vec<OptionInfo> = Difficulty::ALL
        .iter()
        .map(|d| OptionInfo {
            id: d.as_str(),
            description: match d {
                Difficulty::Easy => "Picks at random.",
                Difficulty::Medium => "Picks at random.",
                Difficulty::Hard => "Learns your favourite move and counters it.",
            },
        })
        .collect();

    to_js(&levels)
}
