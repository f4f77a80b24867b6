//! # Notification Dispatcher
//!
//! Side-channel notifications for committed status transitions: an email
//! to the request owner and a realtime event on their private channel.
//!
//! Everything here is fire-and-forget from the transition engine's
//! perspective. A dispatcher failure is logged and swallowed; it never
//! rolls back or surfaces as a failure of the transition itself.

pub mod broadcast;
pub mod dispatcher;
pub mod email;
pub mod errors;

pub use broadcast::{EventBroadcaster, InMemoryBroadcaster, RealtimeEvent};
pub use dispatcher::{DefaultDispatcher, MockDispatcher, NotificationDispatcher};
pub use email::{EmailConfig, EmailSender, EmailTemplate, MockEmailSender, SmtpEmailSender};
pub use errors::{NotifyError, NotifyResult};
