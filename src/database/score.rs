use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::leaderboard::LeaderboardItem;

/// Level reached by the player.
pub type GameScore = u32;

/// One persisted leaderboard entry.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreRecord {
    pub nickname: String,
    pub score: GameScore,
    pub difficulty: Difficulty,
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(nickname: String, score: GameScore, difficulty: Difficulty) -> Self {
        Self {
            nickname,
            score,
            difficulty,
            timestamp: Utc::now(),
        }
    }
}

impl LeaderboardItem for ScoreRecord {
    fn score(&self) -> GameScore {
        self.score
    }
}

/// Body of `POST /api/scores`.
///
/// Every field is optional so that an absent field can be
/// reported as missing instead of failing the whole body.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
#[serde(crate = "rocket::serde")]
pub struct ScoreSubmission {
    pub nickname: Option<String>,
    pub score: Option<GameScore>,
    pub difficulty: Option<Difficulty>,
}

impl ScoreSubmission {
    pub fn new(nickname: impl Into<String>, score: GameScore, difficulty: Difficulty) -> Self {
        Self {
            nickname: Some(nickname.into()),
            score: Some(score),
            difficulty: Some(difficulty),
        }
    }

    /// Turns the submission into a record, truncating the nickname
    /// to `nickname_limit` characters.
    /// Returns `None` if a field is missing or the nickname is empty.
    pub fn into_record(self, nickname_limit: usize) -> Option<ScoreRecord> {
        let nickname = self.nickname.filter(|nickname| !nickname.is_empty())?;
        let nickname = nickname.chars().take(nickname_limit).collect();
        Some(ScoreRecord::new(nickname, self.score?, self.difficulty?))
    }
}

/// Response of `POST /api/scores`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct SubmitResponse {
    pub success: bool,
    pub score: ScoreRecord,
}
