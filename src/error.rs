use axum::{
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Gathering metrics failed: {0}")]
    Gather(eyre::Report),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(err = %self, "metrics request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_errors_are_internal_server_errors() {
        let response = AppError::Gather(eyre::eyre!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
