use std::path::Path;

use rocket::{
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
    serde::json::serde_json,
};
use tempfile::TempDir;

use crate::{
    database::{ErrorBody, ScoreRecord, ScoreSubmission, SubmitResponse},
    difficulty::Difficulty,
    leaderboard::LeaderboardStats,
};

/// Spawns a client whose score file lives in a fresh temporary directory.
async fn spawn_client() -> (Client, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create a temporary directory");
    let client = spawn_client_with_file(&dir.path().join("scores.json")).await;
    (client, dir)
}

async fn spawn_client_with_file(scores_file: &Path) -> Client {
    let figment = rocket::Config::figment().merge(("scores_file", scores_file));
    Client::tracked(super::rocket(figment))
        .await
        .expect("valid rocket instance")
}

async fn deserialize_response<'a, T: rocket::serde::DeserializeOwned>(
    response: LocalResponse<'a>,
) -> serde_json::Result<T> {
    let string = response.into_string().await.unwrap();
    serde_json::from_str(&string)
}

/// Submits a score and returns the stored record.
async fn add_score<'a>(
    client: &'a Client,
    submission: &ScoreSubmission,
) -> Result<ScoreRecord, LocalResponse<'a>> {
    let response = client.post("/api/scores").json(submission).dispatch().await;
    if response.status() != Status::Ok {
        return Err(response);
    }

    let response = deserialize_response::<SubmitResponse>(response)
        .await
        .unwrap();
    assert!(response.success);
    Ok(response.score)
}

async fn get_leaderboard(client: &Client) -> Vec<ScoreRecord> {
    let response = client.get("/api/leaderboard").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await.unwrap()
}

async fn get_stats(client: &Client) -> LeaderboardStats {
    let response = client.get("/api/stats").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    deserialize_response(response).await.unwrap()
}

fn assert_sorted(records: &[ScoreRecord]) {
    assert!(records.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[rocket::async_test]
async fn empty_leaderboard() {
    let (client, dir) = spawn_client().await;

    assert!(get_leaderboard(&client).await.is_empty());
    assert_eq!(
        get_stats(&client).await,
        LeaderboardStats {
            total_games: 0,
            highest_score: 0,
            average_score: 0.0,
        }
    );
    assert!(dir.path().join("scores.json").exists());
}

#[rocket::async_test]
async fn submit_score() {
    let (client, dir) = spawn_client().await;

    let record = add_score(&client, &ScoreSubmission::new("Al", 5, Difficulty::Easy))
        .await
        .unwrap();
    assert_eq!(record.nickname, "Al");
    assert_eq!(record.score, 5);
    assert_eq!(record.difficulty, Difficulty::Easy);

    assert_eq!(get_leaderboard(&client).await, vec![record.clone()]);

    // The file holds the same record
    let data = std::fs::read_to_string(dir.path().join("scores.json")).unwrap();
    let stored: Vec<ScoreRecord> = serde_json::from_str(&data).unwrap();
    assert_eq!(stored, vec![record]);
}

#[rocket::async_test]
async fn submit_response_shape() {
    let (client, _dir) = spawn_client().await;

    let response = client
        .post("/api/scores")
        .header(ContentType::JSON)
        .body(r#"{"nickname":"Al","score":5,"difficulty":"easy"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: serde_json::Value = deserialize_response(response).await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["score"]["nickname"], "Al");
    assert_eq!(body["score"]["score"], 5);
    assert_eq!(body["score"]["difficulty"], "easy");
    assert!(body["score"]["timestamp"].is_string());
}

#[rocket::async_test]
async fn missing_fields() {
    let (client, _dir) = spawn_client().await;

    let bodies = [
        r#"{"score":5,"difficulty":"easy"}"#,
        r#"{"nickname":"","score":5,"difficulty":"easy"}"#,
        r#"{"nickname":"Al","difficulty":"easy"}"#,
        r#"{"nickname":"Al","score":null,"difficulty":"easy"}"#,
        r#"{"nickname":"Al","score":5}"#,
        r#"{}"#,
    ];
    for body in bodies.iter() {
        let response = client
            .post("/api/scores")
            .header(ContentType::JSON)
            .body(*body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest, "body: {}", body);
        let error: ErrorBody = deserialize_response(response).await.unwrap();
        assert_eq!(error.error, "Missing required fields");
    }

    assert!(get_leaderboard(&client).await.is_empty());
}

#[rocket::async_test]
async fn malformed_submission() {
    let (client, _dir) = spawn_client().await;

    let bodies = [
        "not json",
        r#"{"nickname":"Al","score":5,"difficulty":"insane"}"#,
        r#"{"nickname":"Al","score":-3,"difficulty":"easy"}"#,
        // Scores must be JSON integers, numeric strings are not parsed
        r#"{"nickname":"Al","score":"5","difficulty":"easy"}"#,
    ];
    for body in bodies.iter() {
        let response = client
            .post("/api/scores")
            .header(ContentType::JSON)
            .body(*body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest, "body: {}", body);
        let error: ErrorBody = deserialize_response(response).await.unwrap();
        assert_eq!(error.error, "Invalid score submission");
    }
}

#[rocket::async_test]
async fn nickname_is_truncated() {
    let (client, _dir) = spawn_client().await;

    let nickname = "abcdefghijklmnopqrstuvwxyz";
    let record = add_score(&client, &ScoreSubmission::new(nickname, 1, Difficulty::Hard))
        .await
        .unwrap();
    assert_eq!(record.nickname, "abcdefghijklmnopqrst");
}

#[rocket::async_test]
async fn leaderboard_returns_top_ten() {
    let (client, _dir) = spawn_client().await;

    let scores = [4, 17, 2, 9, 30, 1, 12, 8, 25, 3, 14, 6, 21];
    for (i, score) in scores.iter().enumerate() {
        let submission = ScoreSubmission::new(format!("player{}", i), *score, Difficulty::Medium);
        add_score(&client, &submission).await.unwrap();
    }

    let leaderboard = get_leaderboard(&client).await;
    assert_eq!(leaderboard.len(), 10);
    assert_sorted(&leaderboard);
    let top: Vec<_> = leaderboard.iter().map(|record| record.score).collect();
    assert_eq!(top, [30, 25, 21, 17, 14, 12, 9, 8, 6, 4]);

    let stats = get_stats(&client).await;
    assert_eq!(stats.total_games, scores.len());
    assert_eq!(stats.highest_score, 30);
    assert_eq!(stats.average_score, 11.7);
}

#[rocket::async_test]
async fn stored_scores_are_capped() {
    let (client, dir) = spawn_client().await;

    for score in 1..=100 {
        let submission = ScoreSubmission::new("filler", score + 10, Difficulty::Easy);
        add_score(&client, &submission).await.unwrap();
    }

    // Lower than every stored score: accepted, then dropped by the truncation
    let low = add_score(&client, &ScoreSubmission::new("low", 3, Difficulty::Easy)).await;
    assert!(low.is_ok());

    let data = std::fs::read_to_string(dir.path().join("scores.json")).unwrap();
    let stored: Vec<ScoreRecord> = serde_json::from_str(&data).unwrap();
    assert_eq!(stored.len(), 100);
    assert_sorted(&stored);
    assert!(stored.iter().all(|record| record.nickname != "low"));

    add_score(&client, &ScoreSubmission::new("high", 500, Difficulty::Hard))
        .await
        .unwrap();
    let stats = get_stats(&client).await;
    assert_eq!(stats.total_games, 100);
    assert_eq!(stats.highest_score, 500);
    assert_eq!(get_leaderboard(&client).await[0].nickname, "high");
}

#[rocket::async_test]
async fn stats_cover_every_stored_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    let records: Vec<_> = (0..150)
        .map(|score| ScoreRecord::new(format!("old{}", score), score, Difficulty::Easy))
        .collect();
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    let client = spawn_client_with_file(&path).await;

    assert_eq!(
        get_stats(&client).await,
        LeaderboardStats {
            total_games: 150,
            highest_score: 149,
            average_score: 74.5,
        }
    );
    let top: Vec<_> = get_leaderboard(&client)
        .await
        .iter()
        .map(|record| record.score)
        .collect();
    assert_eq!(top, [149, 148, 147, 146, 145, 144, 143, 142, 141, 140]);

    // The next insert applies the cap
    add_score(&client, &ScoreSubmission::new("new", 120, Difficulty::Hard))
        .await
        .unwrap();
    let stats = get_stats(&client).await;
    assert_eq!(stats.total_games, 100);
    assert_eq!(stats.highest_score, 149);
}

#[rocket::async_test]
async fn corrupt_file_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    std::fs::write(&path, "definitely not json").unwrap();
    let client = spawn_client_with_file(&path).await;

    let expectations = [
        (client.get("/api/leaderboard"), "Failed to load leaderboard"),
        (client.get("/api/stats"), "Failed to load stats"),
        (
            client
                .post("/api/scores")
                .json(&ScoreSubmission::new("Al", 5, Difficulty::Easy)),
            "Failed to save score",
        ),
    ];
    for (request, message) in expectations {
        let response = request.dispatch().await;
        assert_eq!(response.status(), Status::InternalServerError);
        let error: ErrorBody = deserialize_response(response).await.unwrap();
        assert_eq!(error.error, message);
    }
}

#[rocket::async_test]
async fn cors_headers() {
    let (client, _dir) = spawn_client().await;

    let response = client.get("/api/leaderboard").dispatch().await;
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let response = client.options("/api/scores").dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Methods"),
        Some("GET, POST, OPTIONS")
    );
}

#[rocket::async_test]
async fn unknown_route_is_json() {
    let (client, _dir) = spawn_client().await;

    let response = client.get("/api/nothing").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let error: ErrorBody = deserialize_response(response).await.unwrap();
    assert_eq!(error.error, "Not found");
}

#[rocket::async_test]
async fn game_session_submission() {
    use crate::game::{GameSession, MemoryHighScores, PressOutcome};

    let (client, _dir) = spawn_client().await;

    let mut session = GameSession::new(MemoryHighScores::new());
    session.set_difficulty(Difficulty::Hard).unwrap();
    session.start().unwrap();
    session.finish_playback().unwrap();
    let expected = session.sequence()[0];
    let wrong = crate::game::Color::ALL
        .iter()
        .copied()
        .find(|&color| color != expected)
        .unwrap();
    assert!(matches!(session.press(wrong), PressOutcome::GameOver(_)));

    let submission = session.submission("").unwrap();
    let record = add_score(&client, &submission).await.unwrap();
    assert_eq!(record.nickname, "Anonymous");
    assert_eq!(record.score, 1);
    assert_eq!(record.difficulty, Difficulty::Hard);
}
