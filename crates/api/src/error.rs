use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use runtime::{ErrorKind, ScenarioError};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Scenario(ScenarioError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "bad_request: {msg}"),
            Self::Scenario(err) => write!(f, "{}: {err}", err.kind().as_str()),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Scenario(err) => match err.kind() {
                ErrorKind::Parse | ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
                ErrorKind::DivisionByZero | ErrorKind::EmptySeries | ErrorKind::OutOfRange => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
                ErrorKind::InvalidPriceData => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Scenario(err) => err.to_string(),
        };
        if status.is_server_error() {
            tracing::warn!(%status, error = %message, "scenario request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ScenarioError> for ApiError {
    fn from(err: ScenarioError) -> Self {
        Self::Scenario(err)
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
