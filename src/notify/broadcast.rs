//! # Realtime Broadcast
//!
//! Per-user private channels for status-change events. Delivery is
//! best-effort: publishing to a channel nobody is subscribed to is not an
//! error, and a full receiver simply drops the oldest events.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::travel::{TravelRequest, TravelRequestStatus};

use super::errors::{NotifyError, NotifyResult};

/// Buffered events per user channel
const CHANNEL_CAPACITY: usize = 64;

/// Event published to a user's private channel on a status change
#[derive(Debug, Clone, Serialize)]
pub struct RealtimeEvent {
    /// Travel request id
    pub id: Uuid,

    /// `"approve"` or `"cancelled"`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Human-readable message for the owner
    pub message: String,

    /// Status after the transition
    pub status: TravelRequestStatus,

    /// The request owner (also the channel key)
    pub owner_id: Uuid,

    /// When the event was published
    pub timestamp: DateTime<Utc>,
}

impl RealtimeEvent {
    /// Build the event for an approved request
    pub fn approved(request: &TravelRequest) -> Self {
        Self {
            id: request.id,
            event_type: "approve".to_string(),
            message: format!("Your travel request {} has been approved", request.id),
            status: request.status,
            owner_id: request.owner_id,
            timestamp: Utc::now(),
        }
    }

    /// Build the event for a cancelled request
    pub fn cancelled(request: &TravelRequest) -> Self {
        Self {
            id: request.id,
            event_type: "cancelled".to_string(),
            message: format!("Your travel request {} has been cancelled", request.id),
            status: request.status,
            owner_id: request.owner_id,
            timestamp: Utc::now(),
        }
    }
}

/// Realtime publisher trait
pub trait EventBroadcaster: Send + Sync {
    /// Publish an event to the owner's private channel
    fn publish(&self, event: RealtimeEvent) -> NotifyResult<()>;
}

/// In-memory broadcaster backed by per-user tokio broadcast channels
#[derive(Debug, Default)]
pub struct InMemoryBroadcaster {
    channels: RwLock<HashMap<Uuid, broadcast::Sender<RealtimeEvent>>>,
}

impl InMemoryBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a user's private channel
    pub fn subscribe(&self, owner_id: Uuid) -> broadcast::Receiver<RealtimeEvent> {
        // Channel creation is infallible; recover the map if poisoned
        let mut channels = self
            .channels
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        channels
            .entry(owner_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }
}

impl EventBroadcaster for InMemoryBroadcaster {
    fn publish(&self, event: RealtimeEvent) -> NotifyResult<()> {
        let channels = self
            .channels
            .read()
            .map_err(|_| NotifyError::Broadcast("Lock poisoned".to_string()))?;

        // No subscribers means nothing to deliver; not an error
        if let Some(sender) = channels.get(&event.owner_id) {
            let _ = sender.send(event);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travel::NewTravelRequest;
    use chrono::NaiveDate;

    fn sample_request(owner_id: Uuid) -> TravelRequest {
        let mut request = NewTravelRequest {
            name: "Trip".to_string(),
            country: "Spain".to_string(),
            town: None,
            state: None,
            region: None,
            departure_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2025, 8, 7).unwrap(),
        }
        .into_request(owner_id);
        request.status = TravelRequestStatus::Approved;
        request
    }

    #[test]
    fn test_event_payload_shape() {
        let request = sample_request(Uuid::new_v4());
        let event = RealtimeEvent::approved(&request);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "approve");
        assert_eq!(json["status"], "approved");
        assert_eq!(json["owner_id"], request.owner_id.to_string());
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains(&request.id.to_string()));
    }

    #[test]
    fn test_publish_reaches_subscriber() {
        let broadcaster = InMemoryBroadcaster::new();
        let owner_id = Uuid::new_v4();
        let mut receiver = broadcaster.subscribe(owner_id);

        let request = sample_request(owner_id);
        broadcaster
            .publish(RealtimeEvent::cancelled(&request))
            .unwrap();

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.event_type, "cancelled");
        assert_eq!(event.id, request.id);
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let broadcaster = InMemoryBroadcaster::new();
        let request = sample_request(Uuid::new_v4());

        assert!(broadcaster
            .publish(RealtimeEvent::approved(&request))
            .is_ok());
    }

    #[test]
    fn test_channels_are_private_per_user() {
        let broadcaster = InMemoryBroadcaster::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_rx = broadcaster.subscribe(alice);
        let mut bob_rx = broadcaster.subscribe(bob);

        broadcaster
            .publish(RealtimeEvent::approved(&sample_request(alice)))
            .unwrap();

        assert!(alice_rx.try_recv().is_ok());
        assert!(bob_rx.try_recv().is_err());
    }
}
