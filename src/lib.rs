//! Persistence core for the MetaCat metadata catalog.
//! This crate is the single source of truth for catalog storage contracts.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attribute::{Attribute, AttributeDataType, AttributeDraft, AttributeId};
pub use model::facility::{Facility, FacilityDraft, FacilityId, FacilityKind, OperationalStatus};
pub use model::object_type::{ObjectType, ObjectTypeId};
pub use model::relationship::{
    DependencyKind, Relationship, RelationshipDependency, RelationshipDependencyId,
    RelationshipDraft, RelationshipId, RelationshipKind,
};
pub use model::use_case::{UseCase, UseCaseDraft, UseCaseId};
pub use model::ValidationError;
pub use repo::attribute_repo::{AttributeRepository, SqliteAttributeRepository};
pub use repo::facility_repo::{FacilityRepository, SqliteFacilityRepository};
pub use repo::object_type_repo::{ObjectTypeRepository, SqliteObjectTypeRepository};
pub use repo::relationship_dependency_repo::{
    RelationshipDependencyRepository, SqliteRelationshipDependencyRepository,
};
pub use repo::relationship_repo::{RelationshipRepository, SqliteRelationshipRepository};
pub use repo::use_case_repo::{SqliteUseCaseRepository, UseCaseRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog_service::CatalogService;
pub use service::facility_service::FacilityService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
