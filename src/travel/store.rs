//! # Travel Request Store
//!
//! Persistence contract consumed by the workflow core, plus the in-memory
//! implementation backing the default server and the tests.
//!
//! The store exclusively owns persisted records; `update_status` is the
//! single atomic write primitive the engine relies on.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::errors::{TravelError, TravelResult};
use super::filters::{ListFilter, Page, PageRequest};
use super::request::{TravelRequest, TravelRequestStatus};

/// Storage contract for travel requests
pub trait TravelRequestStore: Send + Sync {
    /// Persist a new record
    fn insert(&self, request: &TravelRequest) -> TravelResult<()>;

    /// Find a record by id
    fn find_by_id(&self, id: Uuid) -> TravelResult<Option<TravelRequest>>;

    /// Find a record by id, scoped to its owner
    ///
    /// Returns `None` both for unknown ids and for records owned by
    /// someone else, so existence never leaks across owners.
    fn find_by_id_for_owner(&self, owner_id: Uuid, id: Uuid) -> TravelResult<Option<TravelRequest>>;

    /// Atomically set the status of a record, bump `updated_at`, and
    /// return the post-update state
    fn update_status(
        &self,
        id: Uuid,
        status: TravelRequestStatus,
    ) -> TravelResult<TravelRequest>;

    /// List records matching the filter, newest first, one page at a time
    ///
    /// `owner_id` scopes the listing to one user's records; `None` lists
    /// across all owners (admin view).
    fn list(
        &self,
        owner_id: Option<Uuid>,
        filter: &ListFilter,
        page: &PageRequest,
    ) -> TravelResult<Page<TravelRequest>>;
}

/// In-memory travel request store
#[derive(Debug, Default)]
pub struct InMemoryTravelRequestStore {
    requests: RwLock<Vec<TravelRequest>>,
}

impl InMemoryTravelRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TravelRequestStore for InMemoryTravelRequestStore {
    fn insert(&self, request: &TravelRequest) -> TravelResult<()> {
        let mut requests = self
            .requests
            .write()
            .map_err(|_| TravelError::Storage("Lock poisoned".to_string()))?;
        requests.push(request.clone());
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> TravelResult<Option<TravelRequest>> {
        let requests = self
            .requests
            .read()
            .map_err(|_| TravelError::Storage("Lock poisoned".to_string()))?;
        Ok(requests.iter().find(|r| r.id == id).cloned())
    }

    fn find_by_id_for_owner(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> TravelResult<Option<TravelRequest>> {
        let requests = self
            .requests
            .read()
            .map_err(|_| TravelError::Storage("Lock poisoned".to_string()))?;
        Ok(requests
            .iter()
            .find(|r| r.id == id && r.owner_id == owner_id)
            .cloned())
    }

    fn update_status(
        &self,
        id: Uuid,
        status: TravelRequestStatus,
    ) -> TravelResult<TravelRequest> {
        // One write-lock critical section: the whole update is atomic
        let mut requests = self
            .requests
            .write()
            .map_err(|_| TravelError::Storage("Lock poisoned".to_string()))?;

        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(TravelError::NotFound)?;

        request.status = status;
        request.updated_at = Utc::now();

        Ok(request.clone())
    }

    fn list(
        &self,
        owner_id: Option<Uuid>,
        filter: &ListFilter,
        page: &PageRequest,
    ) -> TravelResult<Page<TravelRequest>> {
        let requests = self
            .requests
            .read()
            .map_err(|_| TravelError::Storage("Lock poisoned".to_string()))?;

        let mut matched: Vec<TravelRequest> = requests
            .iter()
            .filter(|r| owner_id.map_or(true, |owner| r.owner_id == owner))
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        // Newest first; ids break created_at ties so ordering is stable
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(Page::paginate(matched, page))
    }
}
