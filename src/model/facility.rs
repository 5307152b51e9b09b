//! Facility domain model.
//!
//! # Responsibility
//! - Define the physical-site record with its type and operational status.
//!
//! # Invariants
//! - `facility_type` and `operational_status` are closed enumerations.
//! - The owning organization reference is immutable after create.

use crate::model::{normalize_tag, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for a facility row.
pub type FacilityId = i64;

/// Physical category of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    ManufacturingPlant,
    Warehouse,
    RDCenter,
}

impl FacilityKind {
    /// Canonical tag stored in the `facility_type` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::ManufacturingPlant => "manufacturing_plant",
            Self::Warehouse => "warehouse",
            Self::RDCenter => "r_d_center",
        }
    }

    /// Parses a stored tag. Returns `None` for tags outside the closed set.
    pub fn parse_db(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "manufacturing_plant" => Some(Self::ManufacturingPlant),
            "warehouse" => Some(Self::Warehouse),
            "r_d_center" => Some(Self::RDCenter),
            _ => None,
        }
    }

    /// All members, in declaration order.
    pub const ALL: [Self; 3] = [Self::ManufacturingPlant, Self::Warehouse, Self::RDCenter];
}

/// Lifecycle stage of a facility or use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Active,
    Inactive,
    UnderConstruction,
}

impl OperationalStatus {
    /// Canonical tag stored in `operational_status` columns.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::UnderConstruction => "under_construction",
        }
    }

    /// Parses a stored tag. Returns `None` for tags outside the closed set.
    pub fn parse_db(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "under_construction" => Some(Self::UnderConstruction),
            _ => None,
        }
    }

    /// All members, in declaration order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::UnderConstruction];
}

/// A physical site record with type and operational status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Store-assigned row id.
    pub id: FacilityId,
    pub name: String,
    pub location: String,
    pub size_in_square_footage: f64,
    pub facility_type: FacilityKind,
    pub operational_status: OperationalStatus,
    /// Owning organization. Immutable after create.
    pub organization_id: String,
}

/// Facility fields without identity; used by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityDraft {
    pub name: String,
    pub location: String,
    pub size_in_square_footage: f64,
    pub facility_type: FacilityKind,
    pub operational_status: OperationalStatus,
    pub organization_id: String,
}

impl FacilityDraft {
    /// Checks draft invariants before the repository builds SQL from it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyFacilityName);
        }
        Ok(())
    }
}
