//! Object type domain model.
//!
//! # Responsibility
//! - Define the record for a user-defined category of business entity.
//!
//! # Invariants
//! - `id` is store-assigned and immutable once read.
//! - `name` is required; empty names are rejected before persistence.

use crate::model::ValidationError;
use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for an object type row.
pub type ObjectTypeId = i64;

/// A user-defined category of business entity, described by a name,
/// a description, and a set of typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Store-assigned row id.
    pub id: ObjectTypeId,
    pub name: String,
    pub description: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last-update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl ObjectType {
    /// Checks record-level invariants before a write path touches SQL.
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyObjectTypeName);
        }
        Ok(())
    }
}
