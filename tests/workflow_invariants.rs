//! Workflow Invariant Tests
//!
//! End-to-end checks of the travel-request workflow through the service
//! layer:
//! - Pending is the only source of real transitions
//! - Approved and Cancelled are terminal for every actor
//! - Exactly one notification per committed status change, and only when
//!   the actor is not the owner
//! - Ownership scoping hides foreign records from users

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use tripdesk::auth::{Principal, Role};
use tripdesk::notify::MockDispatcher;
use tripdesk::travel::{
    InMemoryTravelRequestStore, NewTravelRequest, TravelError, TravelRequestService,
    TravelRequestStatus,
};

struct Workflow {
    service: TravelRequestService<InMemoryTravelRequestStore>,
    dispatcher: Arc<MockDispatcher>,
}

fn workflow() -> Workflow {
    let dispatcher = Arc::new(MockDispatcher::new());
    Workflow {
        service: TravelRequestService::new(
            Arc::new(InMemoryTravelRequestStore::new()),
            dispatcher.clone(),
        ),
        dispatcher,
    }
}

fn trip(name: &str) -> NewTravelRequest {
    NewTravelRequest {
        name: name.to_string(),
        country: "Spain".to_string(),
        town: Some("Madrid".to_string()),
        state: None,
        region: None,
        departure_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        return_date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
    }
}

fn user() -> Principal {
    Principal::new(Uuid::new_v4(), Role::User)
}

fn admin() -> Principal {
    Principal::new(Uuid::new_v4(), Role::Admin)
}

// =============================================================================
// Lifecycle
// =============================================================================

/// New requests start Pending, owned by the creator.
#[test]
fn test_new_request_starts_pending() {
    let workflow = workflow();
    let owner = user();

    let request = workflow.service.create(&owner, trip("Offsite")).unwrap();

    assert_eq!(request.status, TravelRequestStatus::Pending);
    assert_eq!(request.owner_id, owner.user_id);
}

/// The full happy path: submit, admin approves, approval is final.
#[test]
fn test_submit_approve_lifecycle() {
    let workflow = workflow();
    let owner = user();
    let reviewer = admin();

    let request = workflow.service.create(&owner, trip("Offsite")).unwrap();

    let approved = workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, TravelRequestStatus::Approved);

    // Approval is terminal, even for the admin who granted it
    let result = workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Cancelled);
    match result {
        Err(TravelError::BusinessRule(message)) => {
            assert_eq!(message, "request already approved and cannot be cancelled");
        }
        other => panic!("expected business rule rejection, got {:?}", other),
    }

    // The record still reads Approved
    let refetched = workflow.service.details(&reviewer, request.id).unwrap();
    assert_eq!(refetched.status, TravelRequestStatus::Approved);
}

/// Cancelled is a sink: no target, including Pending, leaves it.
#[test]
fn test_cancelled_is_a_sink() {
    let workflow = workflow();
    let reviewer = admin();

    let request = workflow.service.create(&user(), trip("Offsite")).unwrap();
    workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Cancelled)
        .unwrap();

    for target in [TravelRequestStatus::Pending, TravelRequestStatus::Approved] {
        assert!(matches!(
            workflow.service.update_status(&reviewer, request.id, target),
            Err(TravelError::BusinessRule(_))
        ));
    }
}

// =============================================================================
// Notification Semantics
// =============================================================================

/// One committed admin approval fires exactly one approval notification.
#[test]
fn test_admin_approval_notifies_exactly_once() {
    let workflow = workflow();
    let reviewer = admin();

    let request = workflow.service.create(&user(), trip("Offsite")).unwrap();
    workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Approved)
        .unwrap();

    assert_eq!(workflow.dispatcher.approved_count(), 1);
    assert_eq!(workflow.dispatcher.cancelled_count(), 0);
}

/// An owner cancelling their own request never triggers a notification.
#[test]
fn test_self_cancellation_is_silent() {
    let workflow = workflow();
    let owner = user();

    let request = workflow.service.create(&owner, trip("Offsite")).unwrap();
    let cancelled = workflow.service.cancel(&owner, request.id).unwrap();

    assert_eq!(cancelled.status, TravelRequestStatus::Cancelled);
    assert_eq!(workflow.dispatcher.cancelled_count(), 0);
}

/// An admin cancelling someone else's request notifies the owner.
#[test]
fn test_admin_cancellation_notifies_owner() {
    let workflow = workflow();
    let reviewer = admin();

    let request = workflow.service.create(&user(), trip("Offsite")).unwrap();
    workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Cancelled)
        .unwrap();

    assert_eq!(workflow.dispatcher.cancelled_count(), 1);
}

/// Rejected transitions fire nothing, and repeating a status fires nothing.
#[test]
fn test_no_notification_without_a_status_change() {
    let workflow = workflow();
    let reviewer = admin();

    let request = workflow.service.create(&user(), trip("Offsite")).unwrap();
    workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Approved)
        .unwrap();

    // Identity transition: commits, does not notify again
    workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Approved)
        .unwrap();

    // Rejected transition: no notification either
    let _ = workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Cancelled);

    assert_eq!(workflow.dispatcher.approved_count(), 1);
    assert_eq!(workflow.dispatcher.cancelled_count(), 0);
}

/// A failing dispatcher never rolls back the committed transition.
#[test]
fn test_notification_failure_is_swallowed() {
    let workflow = workflow();
    let reviewer = admin();

    let request = workflow.service.create(&user(), trip("Offsite")).unwrap();
    workflow.dispatcher.set_failing(true);

    let approved = workflow
        .service
        .update_status(&reviewer, request.id, TravelRequestStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, TravelRequestStatus::Approved);

    let refetched = workflow.service.details(&reviewer, request.id).unwrap();
    assert_eq!(refetched.status, TravelRequestStatus::Approved);
}

// =============================================================================
// Authorization & Scoping
// =============================================================================

/// Users cannot approve anything, their own requests included.
#[test]
fn test_users_cannot_approve() {
    let workflow = workflow();
    let owner = user();

    let request = workflow.service.create(&owner, trip("Offsite")).unwrap();

    assert!(matches!(
        workflow
            .service
            .update_status(&owner, request.id, TravelRequestStatus::Approved),
        Err(TravelError::Forbidden)
    ));
}

/// A foreign record looks nonexistent to another user, for reads and writes.
#[test]
fn test_foreign_records_are_hidden_from_users() {
    let workflow = workflow();
    let owner = user();
    let stranger = user();

    let request = workflow.service.create(&owner, trip("Offsite")).unwrap();

    assert!(matches!(
        workflow.service.details(&stranger, request.id),
        Err(TravelError::NotFound)
    ));
    assert!(matches!(
        workflow.service.cancel(&stranger, request.id),
        Err(TravelError::NotFound)
    ));

    // And the failed cancel left the record untouched
    let refetched = workflow.service.details(&owner, request.id).unwrap();
    assert_eq!(refetched.status, TravelRequestStatus::Pending);
}

/// Admins see and act on any record.
#[test]
fn test_admins_reach_every_record() {
    let workflow = workflow();
    let reviewer = admin();

    let first = workflow.service.create(&user(), trip("First")).unwrap();
    let second = workflow.service.create(&user(), trip("Second")).unwrap();

    assert!(workflow.service.details(&reviewer, first.id).is_ok());
    assert!(workflow
        .service
        .update_status(&reviewer, second.id, TravelRequestStatus::Approved)
        .is_ok());
}

/// Validation failures never reach the store.
#[test]
fn test_invalid_payload_creates_nothing() {
    let workflow = workflow();
    let owner = user();

    let mut bad = trip("Offsite");
    bad.return_date = bad.departure_date;
    assert!(matches!(
        workflow.service.create(&owner, bad),
        Err(TravelError::Validation(_))
    ));

    let page = workflow
        .service
        .list(&owner, Default::default())
        .unwrap();
    assert_eq!(page.meta.total, 0);
}
