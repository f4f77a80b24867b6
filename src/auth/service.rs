//! # Auth Service
//!
//! Register, login, logout, and token authentication, combined over a user
//! repository and a token store.
//!
//! Login is shared by the user and admin routes; the route decides which
//! role it requires after authentication. A login never reveals whether
//! the email or the password was wrong.

use std::sync::Arc;

use serde::Deserialize;

use super::errors::{AuthError, AuthResult};
use super::principal::Principal;
use super::token::{TokenManager, TokenStore};
use super::user::{Role, User, UserRepository};

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Auth service combining accounts and tokens
pub struct AuthService<U: UserRepository, T: TokenStore> {
    users: Arc<U>,
    tokens: TokenManager<T>,
}

impl<U: UserRepository, T: TokenStore> AuthService<U, T> {
    pub fn new(users: Arc<U>, token_store: T) -> Self {
        Self {
            users,
            tokens: TokenManager::new(token_store),
        }
    }

    /// Register a new account (always `Role::User`; admins are seeded)
    pub fn register(&self, request: RegisterRequest) -> AuthResult<(User, String)> {
        if self.users.email_exists(&request.email)? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let user = User::new(request.name, request.email, &request.password, Role::User)?;
        self.users.create(&user)?;

        let token = self.tokens.issue(user.id, user.role)?;
        Ok((user, token))
    }

    /// Authenticate credentials and issue a bearer token
    pub fn login(&self, request: LoginRequest) -> AuthResult<(User, String)> {
        let user = self
            .users
            .find_by_email(&request.email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, user.role)?;
        Ok((user, token))
    }

    /// Revoke a bearer token
    pub fn logout(&self, token: &str) -> AuthResult<()> {
        self.tokens.revoke(token)
    }

    /// Resolve a bearer token to a principal
    pub fn authenticate(&self, token: &str) -> AuthResult<Principal> {
        self.tokens.authenticate(token)
    }
}
