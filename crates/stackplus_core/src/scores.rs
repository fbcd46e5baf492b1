//! High score persistence
//!
//! Scores are kept per shape. [`RonScoreFile`] stores them as a RON map;
//! a missing file reads as all zeros and is created on the first write.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error reading or writing high scores
#[derive(Debug)]
pub enum ScoreError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for ScoreError {
    fn from(e: io::Error) -> Self {
        ScoreError::Io(e)
    }
}

impl From<ron::error::SpannedError> for ScoreError {
    fn from(e: ron::error::SpannedError) -> Self {
        ScoreError::Parse(e)
    }
}

impl From<ron::Error> for ScoreError {
    fn from(e: ron::Error) -> Self {
        ScoreError::Serialize(e)
    }
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::Io(e) => write!(f, "IO error: {}", e),
            ScoreError::Parse(e) => write!(f, "Parse error: {}", e),
            ScoreError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Per-shape best scores
pub trait ScoreStore {
    /// Best score for `shape`, 0 if none was recorded
    fn high_score(&self, shape: &str) -> u32;

    /// Overwrite the best score for `shape`
    fn set_high_score(&mut self, shape: &str, score: u32) -> Result<(), ScoreError>;

    /// Record `score` if it beats the current best; returns whether it did
    fn submit(&mut self, shape: &str, score: u32) -> Result<bool, ScoreError> {
        if score > self.high_score(shape) {
            self.set_high_score(shape, score)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Scores kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: BTreeMap<String, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn high_score(&self, shape: &str) -> u32 {
        self.scores.get(shape).copied().unwrap_or(0)
    }

    fn set_high_score(&mut self, shape: &str, score: u32) -> Result<(), ScoreError> {
        self.scores.insert(shape.to_string(), score);
        Ok(())
    }
}

/// On-disk layout of the score file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HighScores {
    scores: BTreeMap<String, u32>,
}

/// Scores backed by a RON file, written through on every change
#[derive(Debug, Clone)]
pub struct RonScoreFile {
    path: PathBuf,
    scores: HighScores,
}

impl RonScoreFile {
    /// Open the score file at `path`
    ///
    /// A missing file is not an error; it is created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScoreError> {
        let path = path.as_ref().to_path_buf();
        let scores = match fs::read_to_string(&path) {
            Ok(contents) => ron::from_str(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting from zero", path.display());
                HighScores::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all scores to disk
    pub fn save(&self) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let contents = ron::ser::to_string_pretty(&self.scores, pretty)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl ScoreStore for RonScoreFile {
    fn high_score(&self, shape: &str) -> u32 {
        self.scores.scores.get(shape).copied().unwrap_or(0)
    }

    fn set_high_score(&mut self, shape: &str, score: u32) -> Result<(), ScoreError> {
        self.scores.scores.insert(shape.to_string(), score);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir()
            .join(format!("stackplus_{}_{}_{}", tag, std::process::id(), nanos))
            .join("scores.ron")
    }

    #[test]
    fn test_memory_store_defaults_to_zero() {
        let store = MemoryScoreStore::new();
        assert_eq!(store.high_score("square"), 0);
    }

    #[test]
    fn test_submit_only_keeps_better_scores() {
        let mut store = MemoryScoreStore::new();
        assert!(store.submit("square", 4).unwrap());
        assert!(!store.submit("square", 3).unwrap());
        assert!(!store.submit("square", 4).unwrap());
        assert_eq!(store.high_score("square"), 4);
        assert_eq!(store.high_score("triangle"), 0);
    }

    #[test]
    fn test_missing_file_reads_as_zero() {
        let path = scratch_path("missing");
        let store = RonScoreFile::open(&path).unwrap();
        assert_eq!(store.high_score("square"), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_file_is_created_on_first_write() {
        let path = scratch_path("persist");
        let mut store = RonScoreFile::open(&path).unwrap();
        assert!(store.submit("pi", 12).unwrap());
        assert!(path.exists());

        let reopened = RonScoreFile::open(&path).unwrap();
        assert_eq!(reopened.high_score("pi"), 12);
        assert_eq!(reopened.high_score("square"), 0);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is { not ron").unwrap();
        assert!(matches!(RonScoreFile::open(&path), Err(ScoreError::Parse(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
