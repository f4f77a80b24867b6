//! Shared application state
//!
//! Wires the concrete in-memory stores, the auth service, the travel
//! service, and the notification side channels together for the router.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::auth::{
    AuthError, AuthService, InMemoryTokenStore, InMemoryUserRepository, Principal, Role, User,
};
use crate::notify::{DefaultDispatcher, EmailConfig, EmailSender, InMemoryBroadcaster};
use crate::travel::{InMemoryTravelRequestStore, TravelRequestService};

use super::config::HttpServerConfig;

/// Shared state behind every route
pub struct AppState {
    pub auth: AuthService<InMemoryUserRepository, InMemoryTokenStore>,
    pub travel: TravelRequestService<InMemoryTravelRequestStore>,
    pub broadcaster: Arc<InMemoryBroadcaster>,
}

impl AppState {
    /// Build the full service graph, seeding the admin account
    ///
    /// `smtp` of `None` falls back to the mock email sender, which keeps
    /// development setups working without an SMTP server.
    pub fn new(config: &HttpServerConfig, smtp: Option<EmailConfig>) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let broadcaster = Arc::new(InMemoryBroadcaster::new());
        let email: Arc<dyn EmailSender> = crate::notify::email::create_email_sender(smtp);

        let dispatcher = Arc::new(DefaultDispatcher::new(
            users.clone(),
            email,
            broadcaster.clone(),
        ));

        let state = Self {
            auth: AuthService::new(users.clone(), InMemoryTokenStore::new()),
            travel: TravelRequestService::new(
                Arc::new(InMemoryTravelRequestStore::new()),
                dispatcher,
            ),
            broadcaster,
        };

        state.seed_admin(users.as_ref(), config);
        state
    }

    fn seed_admin(&self, users: &InMemoryUserRepository, config: &HttpServerConfig) {
        use crate::auth::UserRepository;

        let admin = match User::new(
            "Administrator".to_string(),
            config.admin_email.clone(),
            &config.admin_password,
            Role::Admin,
        ) {
            Ok(admin) => admin,
            Err(e) => {
                tracing::error!(error = %e, "failed to build seeded admin account");
                return;
            }
        };

        if let Err(e) = users.create(&admin) {
            tracing::error!(error = %e, "failed to seed admin account");
        }
    }

    /// Resolve the bearer token on a request to a principal
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let token = bearer_token(headers)?;
        self.auth.authenticate(token)
    }
}

/// Extract the raw bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::AuthenticationRequired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Bearer abc123".parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc123");

        headers.insert(
            axum::http::header::AUTHORIZATION,
            "Basic abc123".parse().unwrap(),
        );
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_seeded_admin_can_log_in() {
        let config = HttpServerConfig::default();
        let state = AppState::new(&config, None);

        let (user, _token) = state
            .auth
            .login(crate::auth::service::LoginRequest {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
            })
            .unwrap();

        assert_eq!(user.role, Role::Admin);
    }
}
