//! # Travel Request Service
//!
//! Facade consumed by the HTTP layer: creation, details, listing, and the
//! two transition entry points (owner cancel, admin status update). Every
//! method takes the acting principal explicitly.

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::Principal;
use crate::notify::NotificationDispatcher;

use super::engine::TransitionEngine;
use super::errors::{TravelError, TravelResult};
use super::filters::{ListParams, Page};
use super::request::{NewTravelRequest, TravelRequest, TravelRequestStatus};
use super::store::TravelRequestStore;

/// Application service over the store and the transition engine
pub struct TravelRequestService<S: TravelRequestStore> {
    store: Arc<S>,
    engine: TransitionEngine<S>,
}

impl<S: TravelRequestStore> TravelRequestService<S> {
    pub fn new(store: Arc<S>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            engine: TransitionEngine::new(store.clone(), dispatcher),
            store,
        }
    }

    /// Create a new request owned by the acting principal
    pub fn create(
        &self,
        principal: &Principal,
        payload: NewTravelRequest,
    ) -> TravelResult<TravelRequest> {
        payload.validate()?;

        let request = payload.into_request(principal.user_id);
        self.store.insert(&request)?;

        Ok(request)
    }

    /// Fetch one request
    ///
    /// Users only see their own records; a foreign id is `NotFound`.
    pub fn details(&self, principal: &Principal, id: Uuid) -> TravelResult<TravelRequest> {
        let found = if principal.is_admin() {
            self.store.find_by_id(id)?
        } else {
            self.store.find_by_id_for_owner(principal.user_id, id)?
        };

        found.ok_or(TravelError::NotFound)
    }

    /// List requests with filters and pagination
    ///
    /// Users get their own records; admins get everything.
    pub fn list(
        &self,
        principal: &Principal,
        params: ListParams,
    ) -> TravelResult<Page<TravelRequest>> {
        let (filter, page) = params.into_query()?;

        let owner_scope = if principal.is_admin() {
            None
        } else {
            Some(principal.user_id)
        };

        self.store.list(owner_scope, &filter, &page)
    }

    /// Owner self-service cancellation
    pub fn cancel(&self, principal: &Principal, id: Uuid) -> TravelResult<TravelRequest> {
        self.engine
            .apply(principal, id, TravelRequestStatus::Cancelled)
    }

    /// Admin status update to any of the three statuses
    pub fn update_status(
        &self,
        principal: &Principal,
        id: Uuid,
        status: TravelRequestStatus,
    ) -> TravelResult<TravelRequest> {
        self.engine.apply(principal, id, status)
    }
}
