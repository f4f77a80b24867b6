//! # Transition Engine
//!
//! Validates and applies status transitions.
//!
//! The state machine has three states: `Pending` (initial), `Approved`
//! and `Cancelled` (terminal sinks). The only legal non-identity edges
//! are `Pending -> Approved` and `Pending -> Cancelled`. The terminal
//! rule binds every actor; admins get no exemption.
//!
//! A committed transition fires at most one notification, and only when
//! the actor is not the record owner. Dispatcher failures are logged and
//! swallowed; the committed transition stands.

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::Principal;
use crate::notify::NotificationDispatcher;

use super::errors::{TravelError, TravelResult};
use super::policy;
use super::request::{TravelRequest, TravelRequestStatus};
use super::store::TravelRequestStore;

/// Applies status transitions against a store, notifying on commit
pub struct TransitionEngine<S: TravelRequestStore> {
    store: Arc<S>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl<S: TravelRequestStore> TransitionEngine<S> {
    pub fn new(store: Arc<S>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Validate and apply one transition, returning the updated record
    ///
    /// Lookup is owner-scoped for users, so a user acting on someone
    /// else's record sees `NotFound` rather than a deny.
    pub fn apply(
        &self,
        principal: &Principal,
        request_id: Uuid,
        target: TravelRequestStatus,
    ) -> TravelResult<TravelRequest> {
        let request = self.lookup(principal, request_id)?;

        if !policy::can_transition(principal, &request, target) {
            return Err(TravelError::Forbidden);
        }

        if request.status.is_terminal() && target != request.status {
            return Err(TravelError::BusinessRule(terminal_violation(
                request.status,
                target,
            )));
        }

        let old_status = request.status;
        let updated = self.store.update_status(request.id, target)?;

        if updated.status != old_status && principal.user_id != updated.owner_id {
            self.dispatch(&updated);
        }

        Ok(updated)
    }

    fn lookup(&self, principal: &Principal, request_id: Uuid) -> TravelResult<TravelRequest> {
        let found = if principal.is_admin() {
            self.store.find_by_id(request_id)?
        } else {
            self.store
                .find_by_id_for_owner(principal.user_id, request_id)?
        };

        found.ok_or(TravelError::NotFound)
    }

    /// Fire-and-continue notification for a committed transition
    fn dispatch(&self, request: &TravelRequest) {
        let result = match request.status {
            TravelRequestStatus::Approved => self.dispatcher.notify_approved(request),
            TravelRequestStatus::Cancelled => self.dispatcher.notify_cancelled(request),
            // Reopening to Pending has no notification semantics
            TravelRequestStatus::Pending => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(
                request_id = %request.id,
                owner_id = %request.owner_id,
                status = request.status.as_str(),
                error = %e,
                "notification dispatch failed; transition already committed"
            );
        }
    }
}

/// Business message for a rejected terminal-state transition
fn terminal_violation(current: TravelRequestStatus, target: TravelRequestStatus) -> String {
    match (current, target) {
        (TravelRequestStatus::Approved, TravelRequestStatus::Cancelled) => {
            "request already approved and cannot be cancelled".to_string()
        }
        (current, target) => format!(
            "request already {} and cannot change to {}",
            current.as_str(),
            target.as_str()
        ),
    }
}
