//! # Notification Dispatcher
//!
//! The contract the transition engine fires into after a committed status
//! change. The default implementation emails the request owner and
//! publishes a realtime event on their private channel; either half
//! failing does not stop the other.

use std::sync::Arc;

use crate::auth::UserRepository;
use crate::travel::TravelRequest;

use super::broadcast::{EventBroadcaster, RealtimeEvent};
use super::email::{EmailSender, EmailTemplate};
use super::errors::{NotifyError, NotifyResult};

/// Dispatcher contract for completed transitions
pub trait NotificationDispatcher: Send + Sync {
    /// A request was approved on the owner's behalf
    fn notify_approved(&self, request: &TravelRequest) -> NotifyResult<()>;

    /// A request was cancelled on the owner's behalf
    fn notify_cancelled(&self, request: &TravelRequest) -> NotifyResult<()>;
}

/// Default dispatcher: email plus realtime broadcast
pub struct DefaultDispatcher<U: UserRepository> {
    users: Arc<U>,
    email: Arc<dyn EmailSender>,
    broadcaster: Arc<dyn EventBroadcaster>,
}

impl<U: UserRepository> DefaultDispatcher<U> {
    pub fn new(
        users: Arc<U>,
        email: Arc<dyn EmailSender>,
        broadcaster: Arc<dyn EventBroadcaster>,
    ) -> Self {
        Self {
            users,
            email,
            broadcaster,
        }
    }

    /// Resolve the owner's email address
    fn recipient(&self, request: &TravelRequest) -> NotifyResult<String> {
        self.users
            .find_by_id(request.owner_id)
            .map_err(|e| NotifyError::Email(e.to_string()))?
            .map(|user| user.email)
            .ok_or(NotifyError::UnknownRecipient(request.owner_id))
    }

    fn deliver(
        &self,
        template: EmailTemplate,
        event: RealtimeEvent,
    ) -> NotifyResult<()> {
        // Try both halves; report the first failure after attempting each
        let email_result = self.email.send(template);
        let broadcast_result = self.broadcaster.publish(event);

        email_result?;
        broadcast_result
    }
}

impl<U: UserRepository> NotificationDispatcher for DefaultDispatcher<U> {
    fn notify_approved(&self, request: &TravelRequest) -> NotifyResult<()> {
        let recipient = self.recipient(request)?;

        self.deliver(
            EmailTemplate::RequestApproved {
                recipient,
                request: request.clone(),
            },
            RealtimeEvent::approved(request),
        )
    }

    fn notify_cancelled(&self, request: &TravelRequest) -> NotifyResult<()> {
        let recipient = self.recipient(request)?;

        self.deliver(
            EmailTemplate::RequestCancelled {
                recipient,
                request: request.clone(),
            },
            RealtimeEvent::cancelled(request),
        )
    }
}

/// Recording dispatcher for tests
#[derive(Debug, Default)]
pub struct MockDispatcher {
    /// Requests passed to `notify_approved`
    pub approved: std::sync::RwLock<Vec<TravelRequest>>,

    /// Requests passed to `notify_cancelled`
    pub cancelled: std::sync::RwLock<Vec<TravelRequest>>,

    /// When set, every call fails (for failure-isolation tests)
    pub fail: std::sync::atomic::AtomicBool,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn approved_count(&self) -> usize {
        self.approved.read().unwrap().len()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled.read().unwrap().len()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    fn check_failure(&self) -> NotifyResult<()> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            Err(NotifyError::Email("mock failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl NotificationDispatcher for MockDispatcher {
    fn notify_approved(&self, request: &TravelRequest) -> NotifyResult<()> {
        self.check_failure()?;
        self.approved.write().unwrap().push(request.clone());
        Ok(())
    }

    fn notify_cancelled(&self, request: &TravelRequest) -> NotifyResult<()> {
        self.check_failure()?;
        self.cancelled.write().unwrap().push(request.clone());
        Ok(())
    }
}
