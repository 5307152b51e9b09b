//! Attribute domain model.
//!
//! # Responsibility
//! - Define typed field definitions attached to object types.
//! - Map the closed data-type enumeration to and from its stored tag.
//!
//! # Invariants
//! - Every attribute belongs to exactly one object type.
//! - `data_type` is one of the fixed enumeration; unknown stored tags
//!   fail the read instead of defaulting.

use crate::model::object_type::ObjectTypeId;
use crate::model::{normalize_tag, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for an attribute row.
pub type AttributeId = i64;

/// Closed set of value types an attribute can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeDataType {
    Integer,
    Float,
    Varchar,
    Text,
    Date,
    Datetime,
    Enum,
}

impl AttributeDataType {
    /// Canonical tag stored in the `data_type` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Enum => "enum",
        }
    }

    /// Parses a stored tag. Returns `None` for tags outside the closed set.
    pub fn parse_db(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "varchar" => Some(Self::Varchar),
            "text" => Some(Self::Text),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::Datetime),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    /// All members, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Integer,
        Self::Float,
        Self::Varchar,
        Self::Text,
        Self::Date,
        Self::Datetime,
        Self::Enum,
    ];
}

/// A typed field definition attached to one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Store-assigned row id.
    pub id: AttributeId,
    pub name: String,
    pub data_type: AttributeDataType,
    pub is_required: bool,
    /// Optional default applied by the application layer, stored verbatim.
    pub default_value: Option<String>,
    pub is_indexed: bool,
    /// How many live records currently use this attribute.
    pub usage_count: i64,
    /// Owning object type. Immutable after create.
    pub object_type_id: ObjectTypeId,
}

/// Attribute fields without identity or ownership; used by create and by
/// the replace-set step of the object-type cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDraft {
    pub name: String,
    pub data_type: AttributeDataType,
    pub is_required: bool,
    pub default_value: Option<String>,
    pub is_indexed: bool,
    pub usage_count: i64,
}

impl AttributeDraft {
    /// Creates a draft with the common defaults: optional, unindexed, unused.
    pub fn new(name: impl Into<String>, data_type: AttributeDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_required: false,
            default_value: None,
            is_indexed: false,
            usage_count: 0,
        }
    }

    /// Checks draft invariants before the repository builds SQL from it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyAttributeName);
        }
        Ok(())
    }
}
