use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("TMDB request failed: {0}")]
    Tmdb(#[from] wreq::Error),
}

impl AppError {
    pub fn movie_not_found(id: i32) -> Self {
        Self::NotFound(format!("movie {id} not found"))
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Tmdb(_) => StatusCode::BAD_GATEWAY,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user. TMDB errors carry the request URL, and with it
    /// the API key, so only the log sees them in full.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(message) => message.clone(),
            AppError::Db(_) => "Database error".to_string(),
            AppError::Tmdb(_) => "TMDB request failed".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }

        let body = crate::templates::error_page(&self.public_message());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
