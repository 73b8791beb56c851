#[macro_use]
extern crate rocket;

use rocket::{
    fairing::AdHoc,
    figment::Figment,
    fs::FileServer,
    http::Status,
    serde::json::Json,
    Build, Request, Rocket,
};

pub mod config;
pub mod cors;
pub mod database;
pub mod difficulty;
pub mod game;
pub mod leaderboard;
#[cfg(test)]
mod tests;

use config::LeaderboardConfig;
use database::{requests, ErrorBody, ScoreStore};

/// Builds the leaderboard server from the given configuration.
pub fn rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .mount(
            "/",
            routes![
                requests::get_leaderboard,
                requests::add_score,
                requests::get_stats,
                cors::preflight,
            ],
        )
        .register("/", catchers![not_found, internal_error, default_catcher])
        .attach(cors::Cors)
        .attach(AdHoc::try_on_ignite("Score store", open_store))
}

async fn open_store(rocket: Rocket<Build>) -> rocket::fairing::Result {
    let config = match rocket.figment().extract::<LeaderboardConfig>() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid leaderboard configuration: {}", err);
            return Err(rocket);
        }
    };

    let store = match ScoreStore::open(&config.scores_file, config.max_records).await {
        Ok(store) => store,
        Err(err) => {
            log::error!("Failed to open the score store: {}", err);
            return Err(rocket);
        }
    };
    log::info!("Serving scores from {}", store.path().display());

    let rocket = match &config.static_dir {
        Some(dir) if !dir.is_dir() => {
            log::error!("Static directory {} does not exist", dir.display());
            return Err(rocket);
        }
        Some(dir) => rocket.mount("/", FileServer::from(dir)),
        None => rocket.mount("/", routes![index]),
    };

    Ok(rocket.manage(store).manage(config))
}

#[get("/")]
fn index() -> &'static str {
    "Simon Says leaderboard server"
}

#[catch(404)]
fn not_found(_request: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Not found"))
}

#[catch(500)]
fn internal_error(_request: &Request) -> Json<ErrorBody> {
    Json(ErrorBody::new("Internal server error"))
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request) -> (Status, Json<ErrorBody>) {
    let reason = status.reason().unwrap_or("Unknown error");
    (status, Json(ErrorBody::new(reason)))
}
