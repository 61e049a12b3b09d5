//! Cumulative player statistics and the leaderboard projection

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::game::Match;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Consecutive match wins, reset by any loss
    pub win_streak: u32,
    /// Best `win_streak` ever observed
    pub high_streak: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub high_streak: u32,
    pub wins: u32,
}

impl From<&PlayerStats> for LeaderboardEntry {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            name: stats.name.clone(),
            high_streak: stats.high_streak,
            wins: stats.wins,
        }
    }
}

/// Fold a completed match into the prior stats
///
/// The user wins iff they reached the target score. The name is always
/// replaced by the match's player name. Counters saturate rather than wrap.
pub fn record_match(prior: &PlayerStats, finished: &Match) -> Result<PlayerStats> {
    if !finished.is_finished() {
        return Err(GameError::MatchNotFinished);
    }
    let won = finished.user_score >= finished.target_score;
    let win_streak = if won { prior.win_streak.saturating_add(1) } else { 0 };

    Ok(PlayerStats {
        name: finished.player_name.clone(),
        matches_played: prior.matches_played.saturating_add(1),
        wins: prior.wins.saturating_add(u32::from(won)),
        losses: prior.losses.saturating_add(u32::from(!won)),
        win_streak,
        high_streak: prior.high_streak.max(win_streak),
    })
}

/// Sort by high streak desc, then wins desc, then name; keep the top `limit`
pub fn rank(mut entries: Vec<LeaderboardEntry>, limit: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.high_streak
            .cmp(&a.high_streak)
            .then(b.wins.cmp(&a.wins))
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(limit);
    entries
}

/// Replace `stats.name`'s entry (or add it) and re-rank
pub fn upsert(
    entries: Vec<LeaderboardEntry>,
    stats: &PlayerStats,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<_> = entries.into_iter().filter(|e| e.name != stats.name).collect();
    entries.push(LeaderboardEntry::from(stats));
    rank(entries, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice::*;
    use crate::policy::{Difficulty, ScriptedOpponent};

    fn finished(name: &str, user_wins: bool) -> Match {
        let ai = if user_wins { Scissors } else { Paper };
        let mut opponent = ScriptedOpponent::new(vec![ai]).unwrap();
        let mut m = Match::new(name, Difficulty::Easy, 2).unwrap();
        while !m.is_finished() {
            m = m.play_round(Rock, &mut opponent).unwrap();
        }
        m
    }

    fn entry(name: &str, high_streak: u32, wins: u32) -> LeaderboardEntry {
        LeaderboardEntry { name: name.to_string(), high_streak, wins }
    }

    #[test]
    fn test_fresh_stats_plus_win() {
        let stats = record_match(&PlayerStats::default(), &finished("Ada", true)).unwrap();
        assert_eq!(
            stats,
            PlayerStats {
                name: "Ada".to_string(),
                matches_played: 1,
                wins: 1,
                losses: 0,
                win_streak: 1,
                high_streak: 1,
            }
        );
    }

    #[test]
    fn test_loss_resets_streak_keeps_high() {
        let prior = PlayerStats {
            name: "Ada".to_string(),
            matches_played: 4,
            wins: 4,
            losses: 0,
            win_streak: 4,
            high_streak: 4,
        };
        let stats = record_match(&prior, &finished("Ada", false)).unwrap();
        assert_eq!(stats.win_streak, 0);
        assert_eq!(stats.high_streak, 4);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.wins + stats.losses, stats.matches_played);
    }

    #[test]
    fn test_win_extends_streak_past_high() {
        let prior = PlayerStats { win_streak: 2, high_streak: 2, wins: 2, matches_played: 2, ..Default::default() };
        let stats = record_match(&prior, &finished("Ada", true)).unwrap();
        assert_eq!(stats.win_streak, 3);
        assert_eq!(stats.high_streak, 3);
    }

    #[test]
    fn test_win_below_high_keeps_high() {
        let prior = PlayerStats { win_streak: 0, high_streak: 7, matches_played: 9, wins: 7, losses: 2, ..Default::default() };
        let stats = record_match(&prior, &finished("Ada", true)).unwrap();
        assert_eq!(stats.win_streak, 1);
        assert_eq!(stats.high_streak, 7);
    }

    #[test]
    fn test_name_overwritten() {
        let prior = PlayerStats { name: "Ada".to_string(), ..Default::default() };
        let stats = record_match(&prior, &finished("Grace", true)).unwrap();
        assert_eq!(stats.name, "Grace");
    }

    #[test]
    fn test_unfinished_match_rejected() {
        let m = Match::new("Ada", Difficulty::Easy, 3).unwrap();
        let err = record_match(&PlayerStats::default(), &m).unwrap_err();
        assert_eq!(err, GameError::MatchNotFinished);
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_counters_saturate() {
        let prior = PlayerStats {
            name: "Ada".to_string(),
            matches_played: u32::MAX,
            wins: u32::MAX,
            losses: 0,
            win_streak: u32::MAX,
            high_streak: u32::MAX,
        };
        let stats = record_match(&prior, &finished("Ada", true)).unwrap();
        assert_eq!(stats.matches_played, u32::MAX);
        assert_eq!(stats.wins, u32::MAX);
        assert_eq!(stats.win_streak, u32::MAX);
        assert_eq!(stats.high_streak, u32::MAX);
    }

    #[test]
    fn test_stats_storage_layout() {
        let json = r#"{"name":"Ada","matchesPlayed":3,"wins":2,"losses":1,"winStreak":2,"highStreak":2}"#;
        let stats: PlayerStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.matches_played, 3);
        assert_eq!(stats.high_streak, 2);

        // older saves may lack streak fields
        let stats: PlayerStats = serde_json::from_str(r#"{"name":"Ada","wins":1}"#).unwrap();
        assert_eq!(stats.win_streak, 0);
    }

    #[test]
    fn test_rank_orders_and_truncates() {
        let ranked = rank(
            vec![entry("c", 1, 5), entry("a", 3, 3), entry("b", 3, 4), entry("d", 0, 9)],
            3,
        );
        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let board = vec![entry("Ada", 1, 1), entry("Grace", 2, 2)];
        let stats = PlayerStats { name: "Ada".to_string(), high_streak: 5, wins: 6, ..Default::default() };
        let board = upsert(board, &stats, 10);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0], entry("Ada", 5, 6));
    }
}
