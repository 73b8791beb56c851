use crate::{database::ScoreRecord, difficulty::Difficulty};

pub const OFFLINE_PLACEHOLDER: &str = "Start the backend server to see leaderboard";
pub const EMPTY_PLACEHOLDER: &str = "No scores yet. Be the first!";

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRow {
    pub rank: String,
    pub nickname: String,
    pub score: u32,
    pub difficulty: Difficulty,
}

/// What the game shows in its leaderboard panel.
#[derive(Clone, Debug, PartialEq)]
pub enum LeaderboardView {
    /// The leaderboard could not be fetched. Fetch errors are not shown.
    Offline,
    Empty,
    Rows(Vec<LeaderboardRow>),
}

impl LeaderboardView {
    pub fn from_response<E>(response: Result<Vec<ScoreRecord>, E>) -> Self {
        match response {
            Err(_) => Self::Offline,
            Ok(scores) if scores.is_empty() => Self::Empty,
            Ok(scores) => Self::Rows(
                scores
                    .into_iter()
                    .enumerate()
                    .map(|(index, record)| LeaderboardRow {
                        rank: rank_label(index),
                        nickname: record.nickname,
                        score: record.score,
                        difficulty: record.difficulty,
                    })
                    .collect(),
            ),
        }
    }
}

/// Medals for the podium, `#n` below it.
fn rank_label(index: usize) -> String {
    match index {
        0 => "🥇".to_owned(),
        1 => "🥈".to_owned(),
        2 => "🥉".to_owned(),
        _ => format!("#{}", index + 1),
    }
}

impl std::fmt::Display for LeaderboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offline => write!(f, "{}", OFFLINE_PLACEHOLDER),
            Self::Empty => write!(f, "{}", EMPTY_PLACEHOLDER),
            Self::Rows(rows) => {
                for row in rows {
                    writeln!(
                        f,
                        "{} {} {} {}",
                        row.rank, row.nickname, row.score, row.difficulty
                    )?;
                }
                Ok(())
            }
        }
    }
}
