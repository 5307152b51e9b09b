//! Entity records for the MetaCat catalog.
//!
//! # Responsibility
//! - Define the canonical data shapes persisted by the repository layer.
//! - Keep every enumerated field a closed set with an explicit db tag.
//!
//! # Invariants
//! - Identifiers are store-assigned; draft types carry no identity.
//! - Enumerations are persisted as lowercase snake_case tags and parsed
//!   back with case-insensitive, space-to-underscore normalization.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attribute;
pub mod facility;
pub mod object_type;
pub mod relationship;
pub mod use_case;

/// Field-level validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyObjectTypeName,
    EmptyAttributeName,
    EmptyRelationshipName,
    EmptyDependencyName,
    EmptyFacilityName,
    EmptyUseCaseTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyObjectTypeName => write!(f, "object type name must not be empty"),
            Self::EmptyAttributeName => write!(f, "attribute name must not be empty"),
            Self::EmptyRelationshipName => write!(f, "relationship name must not be empty"),
            Self::EmptyDependencyName => write!(f, "dependency name must not be empty"),
            Self::EmptyFacilityName => write!(f, "facility name must not be empty"),
            Self::EmptyUseCaseTitle => write!(f, "use case title must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Normalizes a stored enum tag before matching: trims, lowercases, and
/// maps embedded spaces to underscores so `"Manufacturing Plant"` and
/// `"MANUFACTURING_PLANT"` both resolve to `manufacturing_plant`.
pub(crate) fn normalize_tag(value: &str) -> String {
    value.trim().to_ascii_lowercase().replace(' ', "_")
}
