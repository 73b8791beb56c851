use rocket::serde::json::{self, Json};

use super::*;
use crate::{config::LeaderboardConfig, leaderboard::LeaderboardStats};

/// Returns the best `top_count` scores, sorted by descending score.
#[get("/api/leaderboard")]
pub async fn get_leaderboard(
    store: &State<ScoreStore>,
    config: &State<LeaderboardConfig>,
) -> RequestResult<Json<Vec<ScoreRecord>>> {
    let leaderboard = store
        .load()
        .await
        .map_err(RequestError::store("Failed to load leaderboard"))?;

    Ok(Json(leaderboard.top(config.top_count).to_vec()))
}

/// Validates and stores a new score.
/// The stored collection is re-sorted and truncated to `max_records`.
#[post("/api/scores", data = "<submission>")]
pub async fn add_score(
    submission: Result<Json<ScoreSubmission>, json::Error<'_>>,
    store: &State<ScoreStore>,
    config: &State<LeaderboardConfig>,
) -> RequestResult<Json<SubmitResponse>> {
    let submission = submission
        .map_err(|err| RequestError::InvalidBody(err.to_string()))?
        .into_inner();

    let record = submission
        .into_record(config.nickname_limit)
        .ok_or(RequestError::MissingFields)?;

    store
        .insert(record.clone())
        .await
        .map_err(RequestError::store("Failed to save score"))?;

    log::info!(
        "Saved score {} by {} ({})",
        record.score,
        record.nickname,
        record.difficulty
    );

    Ok(Json(SubmitResponse {
        success: true,
        score: record,
    }))
}

/// Aggregates every stored score.
#[get("/api/stats")]
pub async fn get_stats(store: &State<ScoreStore>) -> RequestResult<Json<LeaderboardStats>> {
    let leaderboard = store
        .load()
        .await
        .map_err(RequestError::store("Failed to load stats"))?;

    Ok(Json(leaderboard.stats()))
}
