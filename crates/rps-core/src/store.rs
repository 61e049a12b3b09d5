//! Persistence for player stats and the leaderboard

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::stats::{rank, upsert, LeaderboardEntry, PlayerStats};

const STATS_FILE: &str = "stats.json";
const LEADERBOARD_FILE: &str = "leaderboard.json";

/// Backing storage for the single current profile and the ranked board
pub trait StatsStore {
    /// Current profile, or defaults when nothing has been saved
    fn load_stats(&self) -> Result<PlayerStats>;

    /// Overwrite the current profile and refresh its leaderboard entry
    fn save_stats(&mut self, stats: &PlayerStats) -> Result<()>;

    /// Entries ordered by high streak, descending
    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;
}

/// In-process store
#[derive(Debug)]
pub struct MemoryStore {
    stats: Option<PlayerStats>,
    leaderboard: Vec<LeaderboardEntry>,
    limit: usize,
}

impl MemoryStore {
    pub fn new(limit: usize) -> Self {
        Self { stats: None, leaderboard: Vec::new(), limit }
    }
}

impl StatsStore for MemoryStore {
    fn load_stats(&self) -> Result<PlayerStats> {
        Ok(self.stats.clone().unwrap_or_default())
    }

    fn save_stats(&mut self, stats: &PlayerStats) -> Result<()> {
        self.stats = Some(stats.clone());
        self.leaderboard = upsert(std::mem::take(&mut self.leaderboard), stats, self.limit);
        Ok(())
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        Ok(self.leaderboard.clone())
    }
}

/// JSON files under a data directory
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    limit: usize,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>, limit: usize) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Self { data_dir, limit })
    }

    fn stats_path(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(LEADERBOARD_FILE)
    }
}

/// Read JSON from `path`
///
/// A missing file is `None`, and so is a corrupt one (with a warning). Any
/// other I/O failure is an error so callers never overwrite data they could
/// not read.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match serde_json::from_str(&contents) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("ignoring corrupt {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

impl StatsStore for JsonFileStore {
    fn load_stats(&self) -> Result<PlayerStats> {
        Ok(read_json(&self.stats_path())?.unwrap_or_default())
    }

    fn save_stats(&mut self, stats: &PlayerStats) -> Result<()> {
        write_json(&self.stats_path(), stats)?;
        let board = upsert(self.load_leaderboard()?, stats, self.limit);
        write_json(&self.leaderboard_path(), &board)
    }

    fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let entries: Vec<LeaderboardEntry> =
            read_json(&self.leaderboard_path())?.unwrap_or_default();
        Ok(rank(entries, self.limit))
    }
}
