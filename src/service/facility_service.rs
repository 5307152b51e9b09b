//! Facility use-case service.

use crate::model::facility::{Facility, FacilityDraft, FacilityId};
use crate::repo::facility_repo::FacilityRepository;
use crate::repo::RepoResult;
use log::error;

/// Service wrapper for facility operations. Failures are logged here and
/// returned unchanged.
pub struct FacilityService<R: FacilityRepository> {
    repo: R,
}

impl<R: FacilityRepository> FacilityService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a facility and returns its store-assigned id.
    pub fn create_facility(&self, draft: &FacilityDraft) -> RepoResult<FacilityId> {
        self.repo.create_facility(draft).inspect_err(|err| {
            error!("event=facility_create module=facility status=error error={err}");
        })
    }

    /// Gets one facility by id.
    pub fn get_facility(&self, id: FacilityId) -> RepoResult<Option<Facility>> {
        self.repo.get_facility(id).inspect_err(|err| {
            error!("event=facility_get module=facility status=error id={id} error={err}");
        })
    }

    /// Overwrites one facility's details by id.
    pub fn update_facility(&self, id: FacilityId, draft: &FacilityDraft) -> RepoResult<()> {
        self.repo.update_facility(id, draft).inspect_err(|err| {
            error!("event=facility_update module=facility status=error id={id} error={err}");
        })
    }

    /// Deletes one facility by id.
    pub fn delete_facility(&self, id: FacilityId) -> RepoResult<()> {
        self.repo.delete_facility(id).inspect_err(|err| {
            error!("event=facility_delete module=facility status=error id={id} error={err}");
        })
    }
}
