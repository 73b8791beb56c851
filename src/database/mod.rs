use rocket::State;

mod request_error;
pub mod requests;
mod score;
mod store;

pub use request_error::*;
pub use score::{GameScore, ScoreRecord, ScoreSubmission, SubmitResponse};
pub use store::{ScoreStore, StoreError, StoreResult};
