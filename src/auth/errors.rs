//! # Auth Errors
//!
//! Error types for the identity provider.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and role-gate errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Wrong email or password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    // ==================
    // Token Errors
    // ==================

    /// No bearer token on the request
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Bearer token unknown or revoked
    #[error("Invalid or revoked token")]
    InvalidToken,

    // ==================
    // Role Gate
    // ==================

    /// Authenticated but wrong role for this route
    #[error("This action is not permitted for your role")]
    WrongRole,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::InvalidToken => 401,

            // 403 Forbidden
            AuthError::WrongRole => 403,

            // 409 Conflict
            AuthError::EmailAlreadyExists => 409,

            // 422 Unprocessable Entity
            AuthError::WeakPassword(_) => 422,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::StorageError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::WrongRole.status_code(), 403);
        assert_eq!(AuthError::EmailAlreadyExists.status_code(), 409);
        assert_eq!(AuthError::StorageError("x".into()).status_code(), 500);
    }

    #[test]
    fn test_credential_errors_stay_generic() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("email"));
    }
}
