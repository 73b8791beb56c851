use rocket::{
    http::Status,
    response::{self, Responder},
    serde::{json::Json, Deserialize, Serialize},
    Request,
};

use super::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid score submission: {0}")]
    InvalidBody(String),
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        source: StoreError,
    },
}

impl RequestError {
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::MissingFields | Self::InvalidBody(_) => Status::BadRequest,
            Self::Store { .. } => Status::InternalServerError,
        }
    }

    /// The message sent to the client. Store failures are never detailed.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingFields => "Missing required fields".to_owned(),
            Self::InvalidBody(_) => "Invalid score submission".to_owned(),
            Self::Store { context, .. } => (*context).to_owned(),
        }
    }
}

/// JSON body of every error response.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for RequestError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        match &self {
            Self::Store { .. } => log::error!("{}", self),
            _ => log::info!("Rejected request: {}", self),
        }

        (self.status(), Json(ErrorBody::new(self.public_message()))).respond_to(request)
    }
}

pub type RequestResult<T, E = RequestError> = std::result::Result<T, E>;
