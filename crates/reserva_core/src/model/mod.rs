//! Domain entity contracts and validation.
//!
//! # Responsibility
//! - Define the capability trait every persisted entity kind satisfies:
//!   identity, self-validation, record round-trip.
//! - Name the first violated constraint when validation fails.
//!
//! # Invariants
//! - Every valid entity carries a non-empty string `id`.
//! - `from_record` always re-runs `validate()` before returning an entity.
//! - `from_record(to_record(e)) == e` for every valid entity `e`.

use crate::store::Record;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod customer;
mod hotel;
mod reservation;

pub use customer::Customer;
pub use hotel::Hotel;
pub use reservation::{Reservation, ReservationStatus};

/// Entity validation failure describing the first violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field is missing or blank.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// A room count that must be non-negative is negative.
    NegativeCount {
        entity: &'static str,
        field: &'static str,
        value: i64,
    },
    /// `available_rooms` exceeds `total_rooms`.
    AvailableExceedsTotal { available: i64, total: i64 },
    /// A reservation must cover at least one room.
    NonPositiveRooms(i64),
    /// `canceled_at` is required once a reservation is canceled.
    MissingCanceledAt,
    /// The record shape could not be decoded into the entity.
    Malformed {
        entity: &'static str,
        details: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity}.{field} must be a non-empty string")
            }
            Self::NegativeCount {
                entity,
                field,
                value,
            } => write!(
                f,
                "{entity}.{field} must be a non-negative integer, got {value}"
            ),
            Self::AvailableExceedsTotal { available, total } => write!(
                f,
                "hotel.available_rooms ({available}) cannot exceed hotel.total_rooms ({total})"
            ),
            Self::NonPositiveRooms(value) => write!(
                f,
                "reservation.rooms must be a positive integer, got {value}"
            ),
            Self::MissingCanceledAt => write!(
                f,
                "reservation.canceled_at is required when status is canceled"
            ),
            Self::Malformed { entity, details } => {
                write!(f, "malformed {entity} record: {details}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Shared capability contract for persisted domain entities.
///
/// Each entity kind is an independent value type; relations between kinds
/// are foreign-key-style string identifiers, never object references.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Entity kind name used in diagnostics and error messages.
    const KIND: &'static str;

    /// Unique identifier; non-empty for every valid entity.
    fn id(&self) -> &str;

    /// Checks domain invariants, reporting the first violated constraint.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Serializes the full field set, defaults applied, in declaration
    /// order.
    fn to_record(&self) -> Record {
        // Entities are plain field structs; serializing one always yields a
        // JSON object.
        let value = serde_json::to_value(self).expect("entity serializes to JSON");
        match value {
            Value::Object(record) => record,
            other => unreachable!("entity serialized to non-object JSON: {other}"),
        }
    }

    /// Decodes a record, ignoring unknown fields and applying defaults for
    /// missing ones, then re-runs `validate()` on the result.
    fn from_record(record: &Record) -> Result<Self, ValidationError> {
        let entity: Self = serde_json::from_value(Value::Object(record.clone())).map_err(
            |err| ValidationError::Malformed {
                entity: Self::KIND,
                details: err.to_string(),
            },
        )?;
        entity.validate()?;
        Ok(entity)
    }
}

pub(crate) fn require_non_empty(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field });
    }
    Ok(())
}
