use std::error::Error;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::hn::HnError;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Invalid item ID")]
    InvalidItemId,

    #[error("Missing user ID")]
    MissingUserId,

    #[error("User not found")]
    UserNotFound(#[source] HnError),

    #[error("Internal Server Error")]
    Upstream(#[from] HnError),
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        error!("{}: {:?}", self, self.source());

        let status = match self {
            RestError::InvalidItemId => StatusCode::BAD_REQUEST,
            RestError::MissingUserId => StatusCode::BAD_REQUEST,
            RestError::UserNotFound(_) => StatusCode::NOT_FOUND,
            RestError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(json!({"message": self.to_string()}));

        (status, payload).into_response()
    }
}
