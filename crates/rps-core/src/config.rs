//! Match and session configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Tunables for a play session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// Points needed to win a match
    pub target_score: u32,
    /// Percent chance the Hard opponent plays the counter to the user's favourite choice
    pub hard_counter_bias: u8,
    /// Entries kept on the leaderboard
    pub leaderboard_size: usize,
    /// Suspense pause the caller waits before submitting a round
    pub reveal_delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: 5,
            hard_counter_bias: 60,
            leaderboard_size: 10,
            reveal_delay_ms: 450,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target_score == 0 {
            return Err(GameError::InvalidTargetScore(self.target_score));
        }
        if self.hard_counter_bias > 100 {
            return Err(GameError::InvalidConfig(format!(
                "hard_counter_bias must be 0-100 (got {})",
                self.hard_counter_bias
            )));
        }
        if self.leaderboard_size == 0 {
            return Err(GameError::InvalidConfig("leaderboard_size must be at least 1".into()));
        }
        Ok(())
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MatchConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.target_score, 5);
        assert_eq!(config.hard_counter_bias, 60);
        assert_eq!(config.reveal_delay(), Duration::from_millis(450));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = MatchConfig::from_json(r#"{"targetScore": 3}"#).unwrap();
        assert_eq!(config.target_score, 3);
        assert_eq!(config.leaderboard_size, 10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            MatchConfig::from_json(r#"{"targetScore": 0}"#),
            Err(GameError::InvalidTargetScore(0))
        );
        assert!(MatchConfig::from_json(r#"{"hardCounterBias": 101}"#).is_err());
        assert!(MatchConfig::from_json(r#"{"leaderboardSize": 0}"#).is_err());
        assert!(MatchConfig::from_json("not json").is_err());
    }
}
