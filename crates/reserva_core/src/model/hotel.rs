//! Hotel entity.

use super::{require_non_empty, Entity, ValidationError};
use serde::{Deserialize, Serialize};

/// Hotel capacity record.
///
/// `total_rooms` is the fixed capacity. `available_rooms` moves with
/// reservation create/cancel flows and never exceeds `total_rooms`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub total_rooms: i64,
    pub available_rooms: i64,
}

impl Hotel {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        total_rooms: i64,
        available_rooms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            total_rooms,
            available_rooms,
        }
    }
}

impl Entity for Hotel {
    const KIND: &'static str = "hotel";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(Self::KIND, "id", &self.id)?;
        require_non_empty(Self::KIND, "name", &self.name)?;
        require_non_empty(Self::KIND, "location", &self.location)?;

        if self.total_rooms < 0 {
            return Err(ValidationError::NegativeCount {
                entity: Self::KIND,
                field: "total_rooms",
                value: self.total_rooms,
            });
        }
        if self.available_rooms < 0 {
            return Err(ValidationError::NegativeCount {
                entity: Self::KIND,
                field: "available_rooms",
                value: self.available_rooms,
            });
        }
        if self.available_rooms > self.total_rooms {
            return Err(ValidationError::AvailableExceedsTotal {
                available: self.available_rooms,
                total: self.total_rooms,
            });
        }
        Ok(())
    }
}
