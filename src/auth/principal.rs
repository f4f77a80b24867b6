//! # Principal
//!
//! The authenticated actor (id + role) behind a request. Built once from a
//! bearer token and passed explicitly into the transition policy and engine
//! so the core never reaches for ambient auth state.

use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::user::Role;

/// Authenticated actor performing an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// The authenticated user's ID
    pub user_id: Uuid,

    /// The authenticated user's role
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Enforce a route-level role gate
    ///
    /// Wrong role for the route is a 403, distinct from 404.
    pub fn require_role(&self, role: Role) -> AuthResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::WrongRole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_gate() {
        let admin = Principal::new(Uuid::new_v4(), Role::Admin);
        let user = Principal::new(Uuid::new_v4(), Role::User);

        assert!(admin.is_admin());
        assert!(admin.require_role(Role::Admin).is_ok());
        assert!(matches!(
            admin.require_role(Role::User),
            Err(AuthError::WrongRole)
        ));

        assert!(!user.is_admin());
        assert!(user.require_role(Role::User).is_ok());
        assert!(matches!(
            user.require_role(Role::Admin),
            Err(AuthError::WrongRole)
        ));
    }
}
