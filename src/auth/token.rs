//! # Bearer Tokens
//!
//! Opaque access tokens issued on login and revoked on logout. The raw
//! token is returned to the client exactly once; only its SHA-256 hash is
//! stored, and lookups compare hashes in constant time.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::crypto::{constant_time_str_eq, generate_token, hash_token};
use super::errors::{AuthError, AuthResult};
use super::principal::Principal;
use super::user::Role;

/// A stored access token (hash at rest)
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// SHA-256 hash of the raw token
    pub token_hash: String,

    /// User this token authenticates
    pub user_id: Uuid,

    /// Role captured at issue time
    pub role: Role,

    /// When the token was issued
    pub issued_at: DateTime<Utc>,
}

/// Token storage trait
pub trait TokenStore: Send + Sync {
    /// Persist a token
    fn insert(&self, token: AccessToken) -> AuthResult<()>;

    /// Find a token by its hash
    fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<AccessToken>>;

    /// Remove a token by its hash (logout)
    fn remove_by_hash(&self, token_hash: &str) -> AuthResult<bool>;
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: std::sync::RwLock<Vec<AccessToken>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn insert(&self, token: AccessToken) -> AuthResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        tokens.push(token);
        Ok(())
    }

    fn find_by_hash(&self, token_hash: &str) -> AuthResult<Option<AccessToken>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(tokens
            .iter()
            .find(|t| constant_time_str_eq(&t.token_hash, token_hash))
            .cloned())
    }

    fn remove_by_hash(&self, token_hash: &str) -> AuthResult<bool> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        let len_before = tokens.len();
        tokens.retain(|t| !constant_time_str_eq(&t.token_hash, token_hash));
        Ok(tokens.len() != len_before)
    }
}

/// Issues, validates, and revokes bearer tokens
pub struct TokenManager<S: TokenStore> {
    store: S,
}

impl<S: TokenStore> TokenManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Issue a fresh token for a user, returning the raw value
    pub fn issue(&self, user_id: Uuid, role: Role) -> AuthResult<String> {
        let raw = generate_token();

        self.store.insert(AccessToken {
            token_hash: hash_token(&raw),
            user_id,
            role,
            issued_at: Utc::now(),
        })?;

        Ok(raw)
    }

    /// Resolve a raw bearer token to a principal
    pub fn authenticate(&self, raw: &str) -> AuthResult<Principal> {
        let token = self
            .store
            .find_by_hash(&hash_token(raw))?
            .ok_or(AuthError::InvalidToken)?;

        Ok(Principal::new(token.user_id, token.role))
    }

    /// Revoke a raw token (logout); unknown tokens are already revoked
    pub fn revoke(&self, raw: &str) -> AuthResult<()> {
        self.store.remove_by_hash(&hash_token(raw))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager<InMemoryTokenStore> {
        TokenManager::new(InMemoryTokenStore::new())
    }

    #[test]
    fn test_issue_and_authenticate() {
        let manager = manager();
        let user_id = Uuid::new_v4();

        let raw = manager.issue(user_id, Role::User).unwrap();
        let principal = manager.authenticate(&raw).unwrap();

        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.role, Role::User);
    }

    #[test]
    fn test_unknown_token_rejected() {
        let manager = manager();

        assert!(matches!(
            manager.authenticate("not-a-real-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_revoked_token_rejected() {
        let manager = manager();
        let raw = manager.issue(Uuid::new_v4(), Role::Admin).unwrap();

        manager.revoke(&raw).unwrap();

        assert!(matches!(
            manager.authenticate(&raw),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tokens_are_independent() {
        let manager = manager();
        let raw1 = manager.issue(Uuid::new_v4(), Role::User).unwrap();
        let raw2 = manager.issue(Uuid::new_v4(), Role::User).unwrap();

        manager.revoke(&raw1).unwrap();

        assert!(manager.authenticate(&raw1).is_err());
        assert!(manager.authenticate(&raw2).is_ok());
    }
}
