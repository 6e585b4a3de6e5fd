//! HTTP 错误响应构建
//!
//! 错误分类到状态码的映射集中在这里：
//! - 校验失败 → 400
//! - 资源不存在 → 404
//! - 生成失败 / 存储失败 → 500
//!
//! 响应体统一为 `{"error": "..."}`。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use storynest_core::errors::{ExportError, GenerateError, StoryError};

/// 请求处理错误
#[derive(Debug)]
pub enum ApiError {
    /// 输入校验失败
    Validation(String),
    /// 资源不存在
    NotFound(String),
    /// 故事生成失败
    Generation(GenerateError),
    /// 服务端内部错误
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Generation(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::Generation(err) => err.user_message().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("[响应] {} -> {:?}", status, self);
        }
        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::NotFound(_) => ApiError::NotFound("Story not found".into()),
            other => ApiError::Internal(format!("Database error: {other}")),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        ApiError::Generation(err)
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::Internal(format!("PDF export failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_error_kinds_to_statuses() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Generation(GenerateError::Quota("429".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn should_map_story_not_found_to_404() {
        let err: ApiError = StoryError::NotFound(42).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn should_use_generation_user_message() {
        let err: ApiError = GenerateError::Config("401".into()).into();
        assert!(err.message().contains("API key configuration"));
    }
}
