//! Reservation entity and its lifecycle state.
//!
//! # Invariants
//! - A reservation is created `active` and can only transition to
//!   `canceled`; canceled is terminal.
//! - `canceled_at` is non-empty exactly when the status is `canceled`
//!   (empty string while active, matching the persisted record shape).

use super::{require_non_empty, Entity, ValidationError};
use serde::{Deserialize, Serialize};

/// Reservation lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Active,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
        }
    }
}

/// Booking of `rooms` rooms in one hotel by one customer.
///
/// `hotel_id` and `customer_id` are foreign-key-style lookups into the
/// other entity kinds, not object references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservation {
    pub id: String,
    pub hotel_id: String,
    pub customer_id: String,
    pub rooms: i64,
    pub status: ReservationStatus,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 cancellation timestamp; empty while the reservation is
    /// active.
    pub canceled_at: String,
}

impl Default for Reservation {
    fn default() -> Self {
        Self {
            id: String::new(),
            hotel_id: String::new(),
            customer_id: String::new(),
            rooms: 1,
            status: ReservationStatus::Active,
            created_at: String::new(),
            canceled_at: String::new(),
        }
    }
}

impl Reservation {
    /// Creates an active reservation.
    pub fn new(
        id: impl Into<String>,
        hotel_id: impl Into<String>,
        customer_id: impl Into<String>,
        rooms: i64,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            hotel_id: hotel_id.into(),
            customer_id: customer_id.into(),
            rooms,
            status: ReservationStatus::Active,
            created_at: created_at.into(),
            canceled_at: String::new(),
        }
    }

    /// Marks this reservation canceled at the given timestamp.
    pub fn cancel(&mut self, canceled_at: impl Into<String>) {
        self.status = ReservationStatus::Canceled;
        self.canceled_at = canceled_at.into();
    }

    pub fn is_canceled(&self) -> bool {
        self.status == ReservationStatus::Canceled
    }
}

impl Entity for Reservation {
    const KIND: &'static str = "reservation";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(Self::KIND, "id", &self.id)?;
        require_non_empty(Self::KIND, "hotel_id", &self.hotel_id)?;
        require_non_empty(Self::KIND, "customer_id", &self.customer_id)?;

        if self.rooms <= 0 {
            return Err(ValidationError::NonPositiveRooms(self.rooms));
        }

        require_non_empty(Self::KIND, "created_at", &self.created_at)?;

        if self.is_canceled() && self.canceled_at.trim().is_empty() {
            return Err(ValidationError::MissingCanceledAt);
        }
        Ok(())
    }
}
