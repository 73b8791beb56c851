use std::path::PathBuf;

use rocket::serde::{Deserialize, Serialize};

/// Application settings, extracted from Rocket's figment
/// (`Rocket.toml` or `ROCKET_*` environment variables).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde", default)]
pub struct LeaderboardConfig {
    pub scores_file: PathBuf,
    /// Directory with the game frontend, served at `/` when set.
    pub static_dir: Option<PathBuf>,
    pub max_records: usize,
    pub top_count: usize,
    pub nickname_limit: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            scores_file: PathBuf::from("scores.json"),
            static_dir: None,
            max_records: 100,
            top_count: 10,
            nickname_limit: 20,
        }
    }
}
