//! Catalog use-case service for object types and their attributes.

use crate::model::attribute::AttributeDraft;
use crate::model::object_type::{ObjectType, ObjectTypeId};
use crate::repo::object_type_repo::ObjectTypeRepository;
use crate::repo::RepoResult;
use log::error;

/// Service wrapper for object-type operations, including the attribute
/// cascade. Failures are logged here and returned unchanged.
pub struct CatalogService<R: ObjectTypeRepository> {
    repo: R,
}

impl<R: ObjectTypeRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an object type and returns its store-assigned id.
    pub fn create_object_type(&self, name: &str, description: &str) -> RepoResult<ObjectTypeId> {
        self.repo
            .create_object_type(name, description)
            .inspect_err(|err| {
                error!("event=object_type_create module=catalog status=error error={err}");
            })
    }

    /// Gets one object type by id.
    pub fn get_object_type(&self, id: ObjectTypeId) -> RepoResult<Option<ObjectType>> {
        self.repo.get_object_type(id).inspect_err(|err| {
            error!("event=object_type_get module=catalog status=error id={id} error={err}");
        })
    }

    /// Lists every object type for list tables and dropdowns.
    pub fn list_object_types(&self) -> RepoResult<Vec<ObjectType>> {
        self.repo.list_object_types().inspect_err(|err| {
            error!("event=object_type_list module=catalog status=error error={err}");
        })
    }

    /// Updates an object type and replaces its attribute set atomically.
    ///
    /// Either both the parent row and the attribute set reflect the new
    /// values after this returns `Ok`, or neither changed.
    pub fn update_object_type(
        &self,
        id: ObjectTypeId,
        name: &str,
        description: &str,
        attributes: &[AttributeDraft],
    ) -> RepoResult<()> {
        self.repo
            .update_object_type_with_attributes(id, name, description, attributes)
            .inspect_err(|err| {
                error!("event=object_type_update module=catalog status=error id={id} error={err}");
            })
    }

    /// Deletes one object type by id.
    pub fn delete_object_type(&self, id: ObjectTypeId) -> RepoResult<()> {
        self.repo.delete_object_type(id).inspect_err(|err| {
            error!("event=object_type_delete module=catalog status=error id={id} error={err}");
        })
    }
}
