use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pair_annotator_common::Error as CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("アップロードが不正です: {0}")]
    Upload(String),

    #[error("アップロードが大きすぎます: {0}")]
    PayloadTooLarge(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("サーバーエラー: {0}")]
    Server(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Core(CoreError::Export(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Core(_) | AppError::Upload(_) | AppError::JsonParse(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// エラー時のレスポンスボディ `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Core(CoreError::ColumnNotFound("a".into())), StatusCode::BAD_REQUEST),
            (
                AppError::Core(CoreError::IndexOutOfRange { index: 5, len: 1 }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Core(CoreError::MalformedTable("x".into())), StatusCode::BAD_REQUEST),
            (AppError::Upload("file".into()), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge("limit".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::Core(CoreError::Export("x".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Server("bind".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_core_error_is_transparent() {
        let error: AppError = CoreError::ColumnNotFound("text_a".into()).into();
        assert_eq!(error.to_string(), "Column not found: text_a");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Upload("column1 がありません".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
