//! Customer entity.

use super::{require_non_empty, Entity, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Customer {
    const KIND: &'static str = "customer";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty(Self::KIND, "id", &self.id)?;
        require_non_empty(Self::KIND, "name", &self.name)?;
        require_non_empty(Self::KIND, "email", &self.email)?;
        Ok(())
    }
}
