use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{MembershipError, RedemptionError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    Redemption(#[from] RedemptionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Stable error code and status for a membership rejection. The code is
/// what clients branch on to show a specific inline message.
fn membership_parts(err: &MembershipError) -> (StatusCode, &'static str) {
    match err {
        MembershipError::NotAuthorized => (StatusCode::FORBIDDEN, "not_authorized"),
        MembershipError::NotAMember => (StatusCode::NOT_FOUND, "not_a_member"),
        MembershipError::AlreadyOwner => (StatusCode::CONFLICT, "already_owner"),
        MembershipError::CannotRemoveOwner => (StatusCode::FORBIDDEN, "cannot_remove_owner"),
        MembershipError::OwnerCannotLeave => (StatusCode::FORBIDDEN, "owner_cannot_leave"),
    }
}

fn redemption_parts(err: &RedemptionError) -> (StatusCode, &'static str) {
    match err {
        RedemptionError::InvalidOrExpired => (StatusCode::NOT_FOUND, "invalid_or_expired"),
        RedemptionError::MaxUsesReached => (StatusCode::GONE, "max_uses_reached"),
        RedemptionError::Expired => (StatusCode::GONE, "expired"),
        RedemptionError::GroupFull => (StatusCode::CONFLICT, "group_full"),
        RedemptionError::AlreadyMember => (StatusCode::CONFLICT, "already_member"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests. Please try again later.".into(),
            ),
            ApiError::Membership(err) => {
                let (status, code) = membership_parts(err);
                (status, code, err.to_string())
            }
            ApiError::Redemption(err) => {
                let (status, code) = redemption_parts(err);
                (status, code, err.to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or_default()
                    )
                })
            })
            .collect();

        ApiError::Validation(messages.join(", "))
    }
}

impl From<shared::pagination::CursorError> for ApiError {
    fn from(err: shared::pagination::CursorError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_api_error_unauthorized() {
        let error = ApiError::Unauthorized("test message".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::NotFound("resource not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_validation() {
        let error = ApiError::Validation("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_error_rate_limited() {
        let error = ApiError::RateLimited;
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_membership_errors_map_to_distinct_codes() {
        let cases = [
            (MembershipError::NotAuthorized, StatusCode::FORBIDDEN),
            (MembershipError::NotAMember, StatusCode::NOT_FOUND),
            (MembershipError::AlreadyOwner, StatusCode::CONFLICT),
            (MembershipError::CannotRemoveOwner, StatusCode::FORBIDDEN),
            (MembershipError::OwnerCannotLeave, StatusCode::FORBIDDEN),
        ];
        for (err, expected_status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected_status, "{:?}", err);
        }
    }

    #[test]
    fn test_redemption_errors_map_to_distinct_codes() {
        let cases = [
            (RedemptionError::InvalidOrExpired, StatusCode::NOT_FOUND),
            (RedemptionError::MaxUsesReached, StatusCode::GONE),
            (RedemptionError::Expired, StatusCode::GONE),
            (RedemptionError::GroupFull, StatusCode::CONFLICT),
            (RedemptionError::AlreadyMember, StatusCode::CONFLICT),
        ];
        for (err, expected_status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected_status, "{:?}", err);
        }
    }

    #[test]
    fn test_membership_error_codes_match_taxonomy() {
        assert_eq!(
            membership_parts(&MembershipError::OwnerCannotLeave).1,
            "owner_cannot_leave"
        );
        assert_eq!(
            membership_parts(&MembershipError::CannotRemoveOwner).1,
            "cannot_remove_owner"
        );
        assert_eq!(
            redemption_parts(&RedemptionError::GroupFull).1,
            "group_full"
        );
        assert_eq!(
            redemption_parts(&RedemptionError::MaxUsesReached).1,
            "max_uses_reached"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Unauthorized("test".to_string())),
            "Unauthorized: test"
        );
        assert_eq!(format!("{}", ApiError::RateLimited), "Rate limited");
        assert_eq!(
            format!("{}", ApiError::Membership(MembershipError::OwnerCannotLeave)),
            "You're the owner. Transfer ownership to another member first"
        );
    }
}
