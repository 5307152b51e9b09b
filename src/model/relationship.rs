//! Relationship and relationship-dependency domain models.
//!
//! # Responsibility
//! - Define named, typed associations between object types.
//! - Track the entities a relationship depends on.
//!
//! # Invariants
//! - `kind` is fixed to the three listed variants.
//! - A dependency belongs to exactly one relationship.

use crate::model::object_type::ObjectTypeId;
use crate::model::{normalize_tag, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable store-assigned identifier for a relationship row.
pub type RelationshipId = i64;

/// Stable store-assigned identifier for a dependency row.
pub type RelationshipDependencyId = i64;

/// Cardinality of an association between two object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationshipKind {
    /// Canonical tag stored in the `type` and `filter_by_type` columns.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToMany => "many_to_many",
        }
    }

    /// Parses a stored tag. Returns `None` for tags outside the closed set.
    pub fn parse_db(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "one_to_one" => Some(Self::OneToOne),
            "one_to_many" => Some(Self::OneToMany),
            "many_to_many" => Some(Self::ManyToMany),
            _ => None,
        }
    }

    /// All members, in declaration order.
    pub const ALL: [Self; 3] = [Self::OneToOne, Self::OneToMany, Self::ManyToMany];
}

/// Kind of entity a relationship dependency points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    ObjectType,
    Attribute,
    Relationship,
}

impl DependencyKind {
    /// Canonical tag stored in the `dependency_type` column.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::ObjectType => "object_type",
            Self::Attribute => "attribute",
            Self::Relationship => "relationship",
        }
    }

    /// Parses a stored tag. Returns `None` for tags outside the closed set.
    pub fn parse_db(value: &str) -> Option<Self> {
        match normalize_tag(value).as_str() {
            "object_type" => Some(Self::ObjectType),
            "attribute" => Some(Self::Attribute),
            "relationship" => Some(Self::Relationship),
            _ => None,
        }
    }

    /// All members, in declaration order.
    pub const ALL: [Self; 3] = [Self::ObjectType, Self::Attribute, Self::Relationship];
}

/// A named, typed association between object types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Store-assigned row id.
    pub id: RelationshipId,
    pub name: String,
    pub kind: RelationshipKind,
    pub description: String,
    /// Attribute names carried by the association, persisted as JSON.
    pub attribute_names: Vec<String>,
    /// Stable position in the relationship list view.
    pub sort_order: i64,
    /// Optional cardinality filter applied by list views.
    pub filter_by_kind: Option<RelationshipKind>,
    /// Optional object-type filter applied by list views.
    pub filter_by_object_type_id: Option<ObjectTypeId>,
}

/// Relationship fields without identity; used by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDraft {
    pub name: String,
    pub kind: RelationshipKind,
    pub description: String,
    pub attribute_names: Vec<String>,
    pub sort_order: i64,
    pub filter_by_kind: Option<RelationshipKind>,
    pub filter_by_object_type_id: Option<ObjectTypeId>,
}

impl RelationshipDraft {
    /// Creates a draft with empty description, no attributes, and no filters.
    pub fn new(name: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            attribute_names: Vec::new(),
            sort_order: 0,
            filter_by_kind: None,
            filter_by_object_type_id: None,
        }
    }

    /// Checks draft invariants before the repository builds SQL from it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyRelationshipName);
        }
        Ok(())
    }
}

/// A record of another entity that a relationship depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDependency {
    /// Store-assigned row id.
    pub id: RelationshipDependencyId,
    pub dependency_name: String,
    pub dependency_type: DependencyKind,
    /// Owning relationship. Immutable after create.
    pub relationship_id: RelationshipId,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last-update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl RelationshipDependency {
    /// Checks the dependency name invariant before a write path runs.
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyDependencyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DependencyKind, RelationshipKind};

    #[test]
    fn relationship_kind_tags_roundtrip() {
        for member in RelationshipKind::ALL {
            assert_eq!(RelationshipKind::parse_db(member.as_db_str()), Some(member));
        }
        assert_eq!(RelationshipKind::parse_db("Many To Many"), Some(RelationshipKind::ManyToMany));
        assert_eq!(RelationshipKind::parse_db("one_to_none"), None);
    }

    #[test]
    fn dependency_kind_tags_roundtrip() {
        for member in DependencyKind::ALL {
            assert_eq!(DependencyKind::parse_db(member.as_db_str()), Some(member));
        }
        assert_eq!(DependencyKind::parse_db("OBJECT_TYPE"), Some(DependencyKind::ObjectType));
        assert_eq!(DependencyKind::parse_db("table"), None);
    }
}
