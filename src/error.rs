use axum::{response::IntoResponse, Json};
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing Discogs configuration")]
    MissingConfig,
    #[error("Discogs API error: {0}")]
    DiscogsApi(String),
    #[error("count must be a positive integer")]
    InvalidCount,
    #[error("pagination did not terminate after {0} pages")]
    PageLimit(u32),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCount => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("request failed: {self}");

        let status = self.status_code();
        let body = Json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Internal Server Error"),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
