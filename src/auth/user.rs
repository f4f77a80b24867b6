//! # User Accounts
//!
//! User model and repository. Roles are a closed enumeration so every
//! role check is an exhaustive match; there is no string-typed role field
//! anywhere in the system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, validate_password, verify_password};
use super::errors::{AuthError, AuthResult};

/// Closed role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Lowercase wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Account role
    pub role: Role,

    /// Argon2id password hash (never plaintext, never serialized)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account with a validated, hashed password
    pub fn new(name: String, email: String, password: &str, role: Role) -> AuthResult<Self> {
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            role,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a password against this account's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// User repository trait
///
/// Abstracts account storage for the auth service and the notification
/// dispatcher (which resolves owner ids to email addresses).
pub trait UserRepository: Send + Sync {
    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Check if an email is already registered
    fn email_exists(&self, email: &str) -> AuthResult<bool>;

    /// Create a new user
    fn create(&self, user: &User) -> AuthResult<()>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn email_exists(&self, email: &str) -> AuthResult<bool> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().any(|u| u.email == email))
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation_hashes_password() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "password123",
            Role::User,
        )
        .unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "password123");
        assert!(user.verify_password("password123").unwrap());
    }

    #[test]
    fn test_weak_password_rejected() {
        let result = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "short",
            Role::User,
        );
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_in_memory_repository() {
        let repo = InMemoryUserRepository::new();

        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "password123",
            Role::User,
        )
        .unwrap();
        let user_id = user.id;

        repo.create(&user).unwrap();

        assert_eq!(repo.find_by_id(user_id).unwrap().unwrap().name, "Alice");
        assert!(repo.find_by_email("alice@example.com").unwrap().is_some());
        assert!(repo.email_exists("alice@example.com").unwrap());
        assert!(!repo.email_exists("bob@example.com").unwrap());

        // Duplicate email rejected
        let dup = User::new(
            "Other".to_string(),
            "alice@example.com".to_string(),
            "password456",
            Role::User,
        )
        .unwrap();
        assert!(matches!(
            repo.create(&dup),
            Err(AuthError::EmailAlreadyExists)
        ));
    }

    #[test]
    fn test_serialization_omits_password_hash() {
        let user = User::new(
            "Alice".to_string(),
            "alice@example.com".to_string(),
            "password123",
            Role::User,
        )
        .unwrap();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
    }
}
