use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform wrapper for every service outcome. This is a value, not an error
/// type: callers inspect `success` and `status_code` and must never assume
/// `data` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    pub status_code: u16,
}

impl<T> ServiceResponse<T> {
    /// Successful outcome, status 200.
    pub fn ok(data: T) -> Self {
        Self::ok_with_message(data, "Operation completed successfully")
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: Vec::new(),
            status_code: 200,
        }
    }

    /// Successful creation, status 201.
    pub fn created(data: T) -> Self {
        Self {
            success: true,
            message: "Entity created successfully".to_string(),
            data: Some(data),
            errors: Vec::new(),
            status_code: 201,
        }
    }

    /// Failed outcome with an explicit status code; `data` is absent.
    pub fn error(message: impl Into<String>, status_code: u16) -> Self {
        Self::error_with_details(message, status_code, Vec::new())
    }

    pub fn error_with_details(
        message: impl Into<String>,
        status_code: u16,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
            status_code,
        }
    }

    /// Absent row or ownership mismatch; deliberately the same shape for
    /// both so existence of other users' data is never confirmed.
    pub fn not_found(id: &str) -> Self {
        Self::error(format!("Entity with ID {} not found", id), 404)
    }

    /// Generic 500 with no internal detail. The real cause is logged where
    /// it happened.
    pub fn internal_error() -> Self {
        Self::error("Internal server error", 500)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_defaults_to_200() {
        let resp = ServiceResponse::ok(42);
        assert!(resp.success);
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.data, Some(42));
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn created_is_201() {
        let resp = ServiceResponse::created("row");
        assert!(resp.success);
        assert_eq!(resp.status_code, 201);
    }

    #[test]
    fn error_has_no_data() {
        let resp = ServiceResponse::<()>::error("nope", 400);
        assert!(!resp.success);
        assert_eq!(resp.status_code, 400);
        assert!(resp.data.is_none());

        let v = serde_json::to_value(&resp).unwrap();
        assert!(v.get("data").is_none(), "absent data must not serialize");
    }

    #[test]
    fn not_found_shape_depends_only_on_id() {
        // Ownership mismatch and true absence must be indistinguishable
        let absent = ServiceResponse::<()>::not_found("abc");
        let foreign = ServiceResponse::<()>::not_found("abc");
        assert_eq!(absent, foreign);
    }
}
