//! # Travel Request Model
//!
//! The `TravelRequest` record and its status enum. Requests are created
//! `Pending` by their owner and only change status through the transition
//! engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{TravelResult, ValidationErrors};

/// Maximum length for free-text fields
const MAX_TEXT_LENGTH: usize = 255;

/// Travel request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelRequestStatus {
    Pending,
    Approved,
    Cancelled,
}

impl TravelRequestStatus {
    /// All accepted wire values, for validation messages
    pub const VALUES: [&'static str; 3] = ["pending", "approved", "cancelled"];

    /// Lowercase wire name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelRequestStatus::Pending => "pending",
            TravelRequestStatus::Approved => "approved",
            TravelRequestStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a wire value; `None` for anything outside the closed set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TravelRequestStatus::Pending),
            "approved" => Some(TravelRequestStatus::Approved),
            "cancelled" => Some(TravelRequestStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TravelRequestStatus::Approved | TravelRequestStatus::Cancelled
        )
    }
}

/// Travel request record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Opaque unique identifier, immutable once created
    pub id: Uuid,

    /// The requesting user, immutable
    pub owner_id: Uuid,

    /// Trip name
    pub name: String,

    /// Destination country (required)
    pub country: String,

    /// Destination town (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    /// Destination state (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Destination region (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Departure date
    pub departure_date: NaiveDate,

    /// Return date; always after the departure date
    pub return_date: NaiveDate,

    /// Current workflow status
    pub status: TravelRequestStatus,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// Changes exactly when the record changes
    pub updated_at: DateTime<Utc>,
}

/// Creation payload for a travel request
#[derive(Debug, Clone, Deserialize)]
pub struct NewTravelRequest {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub departure_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl NewTravelRequest {
    /// Validate the payload, collecting field-level messages
    pub fn validate(&self) -> TravelResult<()> {
        let mut errors = ValidationErrors::new();

        required_text(&mut errors, "name", &self.name);
        required_text(&mut errors, "country", &self.country);
        optional_text(&mut errors, "town", self.town.as_deref());
        optional_text(&mut errors, "state", self.state.as_deref());
        optional_text(&mut errors, "region", self.region.as_deref());

        if self.return_date <= self.departure_date {
            errors.add(
                "return_date",
                "The return date must be after the departure date.",
            );
        }

        errors.into_result()
    }

    /// Build a `Pending` record owned by the given user
    ///
    /// Callers must have validated the payload first.
    pub fn into_request(self, owner_id: Uuid) -> TravelRequest {
        let now = Utc::now();
        TravelRequest {
            id: Uuid::new_v4(),
            owner_id,
            name: self.name,
            country: self.country,
            town: self.town,
            state: self.state,
            region: self.region,
            departure_date: self.departure_date,
            return_date: self.return_date,
            status: TravelRequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("The {} field is required.", field));
    } else if value.len() > MAX_TEXT_LENGTH {
        errors.add(
            field,
            format!("The {} may not be greater than {} characters.", field, MAX_TEXT_LENGTH),
        );
    }
}

fn optional_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        if value.len() > MAX_TEXT_LENGTH {
            errors.add(
                field,
                format!("The {} may not be greater than {} characters.", field, MAX_TEXT_LENGTH),
            );
        }
    }
}
