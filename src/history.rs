use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

impl GameResult {
    pub fn from_scores(player: u32, opponent: u32) -> Self {
        match player.cmp(&opponent) {
            std::cmp::Ordering::Greater => Self::Win,
            std::cmp::Ordering::Less => Self::Loss,
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Tie => "Tie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub result: GameResult,
    #[serde(rename = "you")]
    pub player_score: u32,
    #[serde(rename = "computer")]
    pub opponent_score: u32,
    #[serde(rename = "rounds")]
    pub rounds_requested: u32,
    pub timestamp: String,
}

impl GameRecord {
    pub fn finished(
        player_score: u32,
        opponent_score: u32,
        rounds_requested: u32,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            result: GameResult::from_scores(player_score, opponent_score),
            player_score,
            opponent_score,
            rounds_requested,
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

pub struct HistoryStore {
    path: PathBuf,
    records: Vec<GameRecord>,
}

impl HistoryStore {
    /// Read the log at `path`; a missing or blank file is an empty log.
    pub fn load(path: &Path) -> Result<Self> {
        let records: Vec<GameRecord> = match fs::read_to_string(path) {
            Ok(raw) if raw.trim().is_empty() => {
                log::warn!("game history at {} is empty", path.display());
                Vec::new()
            }
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("malformed game history at {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read game history at {}", path.display()));
            }
        };
        log::info!(
            "loaded {} game record(s) from {}",
            records.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    #[cfg(test)]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn append(&mut self, record: GameRecord) -> Result<()> {
        self.records.push(record);
        self.persist()?;
        log::info!("appended game record #{}", self.records.len());
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to delete game history at {}", self.path.display())
                });
            }
        }
        log::info!("game history cleared");
        Ok(())
    }

    pub fn show(&self) -> impl Iterator<Item = HistoryLine<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| HistoryLine {
                number: idx + 1,
                record,
            })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create history directory {}", parent.display())
            })?;
        }
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.records
            .serialize(&mut serializer)
            .context("failed to serialize game history")?;
        fs::write(&self.path, buf)
            .with_context(|| format!("failed to write game history at {}", self.path.display()))
    }
}

pub struct HistoryLine<'a> {
    pub number: usize,
    pub record: &'a GameRecord,
}

impl fmt::Display for HistoryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        let label = record.result.label();
        let result = match record.result {
            GameResult::Win => label.green().bold(),
            GameResult::Loss => label.red().bold(),
            GameResult::Tie => label.yellow().bold(),
        };
        write!(
            f,
            "{}. {} Result: {} | You: {} | Computer: {} | Rounds: {}",
            self.number,
            format!("[{}]", record.timestamp).magenta(),
            result,
            record.player_score.to_string().green(),
            record.opponent_score.to_string().red(),
            record.rounds_requested
        )
    }
}
