//! # Travel Request Workflow
//!
//! The core of the backend: travel-request records, the status state
//! machine, and the authorization rules around it.
//!
//! ## Invariants
//! - TRV-S1: `Pending` is the only initial status
//! - TRV-S2: `Approved` and `Cancelled` are terminal for every actor,
//!   admins included
//! - TRV-S3: a committed transition notifies at most once, and only when
//!   the actor is not the record owner
//! - TRV-S4: users never learn whether another user's request exists

pub mod engine;
pub mod errors;
pub mod filters;
pub mod policy;
pub mod request;
pub mod service;
pub mod store;

pub use engine::TransitionEngine;
pub use errors::{TravelError, TravelResult, ValidationErrors};
pub use filters::{ListFilter, ListParams, Page, PageRequest};
pub use request::{NewTravelRequest, TravelRequest, TravelRequestStatus};
pub use service::TravelRequestService;
pub use store::{InMemoryTravelRequestStore, TravelRequestStore};
