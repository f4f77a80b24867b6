//! # Identity Provider
//!
//! Authentication for the travel-request backend: user accounts with a
//! closed role set, Argon2id password hashing, and opaque bearer tokens
//! stored hashed. Authenticating a token yields a [`Principal`] which is
//! passed explicitly into the travel workflow.

pub mod crypto;
pub mod errors;
pub mod principal;
pub mod service;
pub mod token;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use principal::Principal;
pub use service::AuthService;
pub use token::{InMemoryTokenStore, TokenManager, TokenStore};
pub use user::{InMemoryUserRepository, Role, User, UserRepository};
