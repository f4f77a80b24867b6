//! # Notification Errors
//!
//! Errors raised by the email sender and the realtime broadcaster. These
//! never propagate past the transition engine; they are logged at the
//! dispatch boundary.

use thiserror::Error;

/// Result type for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Notification delivery errors
#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    /// Could not resolve the recipient for a request owner
    #[error("Unknown recipient for owner {0}")]
    UnknownRecipient(uuid::Uuid),

    /// Building or sending the email failed
    #[error("Email error: {0}")]
    Email(String),

    /// Publishing the realtime event failed
    #[error("Broadcast error: {0}")]
    Broadcast(String),
}
