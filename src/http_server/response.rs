//! HTTP response shapes and error mapping
//!
//! Domain errors carry their own status codes; this module turns them
//! into `(StatusCode, Json<ErrorBody>)` pairs for handlers.

use std::collections::BTreeMap;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::auth::AuthError;
use crate::travel::TravelError;

/// Error payload
///
/// `errors` is present only for validation failures, keyed by field.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Error half of a handler result
pub type ApiError = (StatusCode, Json<ErrorBody>);

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Map an auth error to its HTTP response
pub fn auth_error(err: AuthError) -> ApiError {
    let code = err.status_code();
    (
        status(code),
        Json(ErrorBody {
            message: err.to_string(),
            code,
            errors: None,
        }),
    )
}

/// Map a travel workflow error to its HTTP response
pub fn travel_error(err: TravelError) -> ApiError {
    let code = err.status_code();

    let (message, errors) = match err {
        TravelError::Validation(validation) => {
            ("Validation failed".to_string(), Some(validation.errors))
        }
        other => (other.to_string(), None),
    };

    (
        status(code),
        Json(ErrorBody {
            message,
            code,
            errors,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::ValidationErrors;

    #[test]
    fn test_auth_error_mapping() {
        let (code, body) = auth_error(AuthError::WrongRole);
        assert_eq!(code, StatusCode::FORBIDDEN);
        assert!(body.0.errors.is_none());
    }

    #[test]
    fn test_validation_error_carries_field_messages() {
        let mut validation = ValidationErrors::new();
        validation.add("status", "The status must be one of: pending, approved, cancelled.");

        let (code, body) = travel_error(TravelError::Validation(validation));
        assert_eq!(code, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.0.errors.as_ref().unwrap().contains_key("status"));
    }

    #[test]
    fn test_business_rule_is_conflict() {
        let (code, body) = travel_error(TravelError::BusinessRule(
            "request already approved and cannot be cancelled".to_string(),
        ));
        assert_eq!(code, StatusCode::CONFLICT);
        assert!(body.0.message.contains("already approved"));
    }
}
