use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Response classification carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Success,
    Warning,
    Error,
}

/// Uniform body returned by every endpoint: `{msg, variant, payload}`,
/// plus `total` on the list endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub msg: String,
    pub variant: Variant,
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(msg: impl Into<String>, payload: T) -> Self {
        Self {
            msg: msg.into(),
            variant: Variant::Success,
            payload: Some(payload),
            total: None,
        }
    }

    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }
}

/// Terminal failure for one request, rendered as an envelope with a null
/// payload.
#[derive(Debug, thiserror::Error)]
#[error("{msg}")]
pub struct ApiError {
    pub status: StatusCode,
    pub variant: Variant,
    pub msg: String,
}

impl ApiError {
    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            variant: Variant::Error,
            msg: msg.into(),
        }
    }

    pub fn warning(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            variant: Variant::Warning,
            msg: msg.into(),
        }
    }

    pub fn server_error() -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        Self::server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Envelope::<serde_json::Value> {
            msg: self.msg,
            variant: self.variant,
            payload: None,
            total: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_lowercase_variant() {
        let env = Envelope::success("All users", vec![1, 2, 3]).with_total(3);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["msg"], "All users");
        assert_eq!(json["variant"], "success");
        assert_eq!(json["payload"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["total"], 3);
    }

    #[test]
    fn error_envelope_has_null_payload_and_no_total() {
        let err = ApiError::warning(StatusCode::NOT_FOUND, "User not found");
        let body = Envelope::<serde_json::Value> {
            msg: err.msg,
            variant: err.variant,
            payload: None,
            total: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variant"], "warning");
        assert!(json["payload"].is_null());
        assert!(json.get("total").is_none());
    }
}
