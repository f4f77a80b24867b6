//! # Transition Policy
//!
//! Pure authorization predicate for status transitions. Stateless and
//! side-effect free; thread safety falls out of being a function of its
//! inputs.
//!
//! The policy decides WHO may request WHAT. Whether the record's current
//! status admits the transition is the engine's terminal-state rule, not
//! an authorization matter: an owner cancelling an approved request gets
//! a business error there, never a deny here.

use crate::auth::{Principal, Role};

use super::request::{TravelRequest, TravelRequestStatus};

/// Whether the actor may request this transition on this record
///
/// - Admins may set any status on any record.
/// - Users may only request `Cancelled`, and only on their own records.
pub fn can_transition(
    principal: &Principal,
    request: &TravelRequest,
    target: TravelRequestStatus,
) -> bool {
    match principal.role {
        Role::Admin => true,
        Role::User => {
            request.owner_id == principal.user_id && target == TravelRequestStatus::Cancelled
        }
    }
}
