use std::path::{Path, PathBuf};

use rocket::serde::json::serde_json;
use tokio::{fs, sync::Mutex};

use super::*;
use crate::leaderboard::Leaderboard;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access the score file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse the score file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize scores: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Score records persisted as a JSON array in a single file.
///
/// Reads go straight to the file. Read-modify-write cycles are serialized
/// by `write_lock`, and the file is replaced by renaming a temporary file,
/// so readers never observe a partial write.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    max_records: usize,
    write_lock: Mutex<()>,
}

impl ScoreStore {
    /// Opens the store, creating an empty score file if there is none.
    pub async fn open(path: impl Into<PathBuf>, max_records: usize) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            max_records,
            write_lock: Mutex::new(()),
        };

        let exists = fs::metadata(&store.path).await.is_ok();
        if !exists {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| store.io_error(source))?;
            }
            store.persist(&Leaderboard::new(Vec::new(), max_records)).await?;
            log::info!("Created an empty score file at {}", store.path.display());
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored record, sorted by descending score.
    /// A file holding more than `max_records` entries is read in full;
    /// the cap is applied by the next insert.
    pub async fn load(&self) -> StoreResult<Leaderboard<ScoreRecord>> {
        let data = fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        let records: Vec<ScoreRecord> =
            serde_json::from_str(&data).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(Leaderboard::new(records, self.max_records))
    }

    /// Inserts a record and persists the truncated leaderboard.
    pub async fn insert(&self, record: ScoreRecord) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut leaderboard = self.load().await?;
        leaderboard.add(record);
        self.persist(&leaderboard).await
    }

    async fn persist(&self, leaderboard: &Leaderboard<ScoreRecord>) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(leaderboard)?;

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, data)
            .await
            .map_err(|source| self.io_error(source))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
