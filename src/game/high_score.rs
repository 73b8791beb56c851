use std::{collections::HashMap, convert::Infallible, path::PathBuf};

use rocket::serde::json::serde_json;

/// Key the best level is stored under.
pub const HIGH_SCORE_KEY: &str = "simonHighScore";

/// Local, per-player persistence of the best level reached.
pub trait HighScoreStore {
    type Error: std::error::Error;

    fn load(&self) -> Result<u32, Self::Error>;
    fn save(&mut self, high_score: u32) -> Result<(), Self::Error>;
}

/// String key/value storage, the way a browser's local storage works.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScores {
    entries: HashMap<String, String>,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

impl HighScoreStore for MemoryHighScores {
    type Error = Infallible;

    fn load(&self) -> Result<u32, Self::Error> {
        // Unparsable values count as no high score
        Ok(self
            .get(HIGH_SCORE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0))
    }

    fn save(&mut self, high_score: u32) -> Result<(), Self::Error> {
        self.set(HIGH_SCORE_KEY, high_score.to_string());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HighScoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize high scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A JSON object file mapping [`HIGH_SCORE_KEY`] to the high score.
#[derive(Clone, Debug)]
pub struct FileHighScores {
    path: PathBuf,
}

impl FileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<HashMap<String, u32>, HighScoreError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(HighScoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&data).map_err(|source| HighScoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for FileHighScores {
    type Error = HighScoreError;

    fn load(&self) -> Result<u32, Self::Error> {
        Ok(self
            .read_entries()?
            .get(HIGH_SCORE_KEY)
            .copied()
            .unwrap_or(0))
    }

    fn save(&mut self, high_score: u32) -> Result<(), Self::Error> {
        // Other keys in the file are kept; a corrupt file is overwritten
        let mut entries = match self.read_entries() {
            Err(HighScoreError::Parse { .. }) => HashMap::new(),
            entries => entries?,
        };
        entries.insert(HIGH_SCORE_KEY.to_owned(), high_score);

        let data = serde_json::to_string(&entries)?;
        std::fs::write(&self.path, data).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
