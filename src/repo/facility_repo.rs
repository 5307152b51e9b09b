//! Facility repository contracts and SQLite implementation.

use crate::model::facility::{Facility, FacilityDraft, FacilityId, FacilityKind, OperationalStatus};
use crate::repo::{ensure_repo_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const FACILITY_SELECT_SQL: &str = "SELECT
    id,
    name,
    location,
    size_in_square_footage,
    facility_type,
    operational_status,
    organization_id
FROM facilities";

const FACILITY_COLUMNS: &[&str] = &[
    "id",
    "name",
    "location",
    "size_in_square_footage",
    "facility_type",
    "operational_status",
    "organization_id",
];

/// Repository interface for facility CRUD operations.
pub trait FacilityRepository {
    /// Inserts one facility and returns the store-assigned id.
    fn create_facility(&self, draft: &FacilityDraft) -> RepoResult<FacilityId>;
    /// Loads one facility by id.
    fn get_facility(&self, id: FacilityId) -> RepoResult<Option<Facility>>;
    /// Overwrites the mutable columns of one facility by id. The owning
    /// organization reference is not part of the update.
    fn update_facility(&self, id: FacilityId, draft: &FacilityDraft) -> RepoResult<()>;
    /// Removes one facility by id.
    fn delete_facility(&self, id: FacilityId) -> RepoResult<()>;
}

/// SQLite-backed facility repository.
pub struct SqliteFacilityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFacilityRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "facilities", FACILITY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl FacilityRepository for SqliteFacilityRepository<'_> {
    fn create_facility(&self, draft: &FacilityDraft) -> RepoResult<FacilityId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO facilities (
                name,
                location,
                size_in_square_footage,
                facility_type,
                operational_status,
                organization_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.name.as_str(),
                draft.location.as_str(),
                draft.size_in_square_footage,
                draft.facility_type.as_db_str(),
                draft.operational_status.as_db_str(),
                draft.organization_id.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_facility(&self, id: FacilityId) -> RepoResult<Option<Facility>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FACILITY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_facility_row(row)?));
        }
        Ok(None)
    }

    fn update_facility(&self, id: FacilityId, draft: &FacilityDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE facilities
             SET
                name = ?1,
                location = ?2,
                size_in_square_footage = ?3,
                facility_type = ?4,
                operational_status = ?5
             WHERE id = ?6;",
            params![
                draft.name.as_str(),
                draft.location.as_str(),
                draft.size_in_square_footage,
                draft.facility_type.as_db_str(),
                draft.operational_status.as_db_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "facility",
                id,
            });
        }
        Ok(())
    }

    fn delete_facility(&self, id: FacilityId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM facilities WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "facility",
                id,
            });
        }
        Ok(())
    }
}

fn parse_facility_row(row: &Row<'_>) -> RepoResult<Facility> {
    let type_text: String = row.get("facility_type")?;
    let facility_type = FacilityKind::parse_db(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid facility type `{type_text}` in facilities.facility_type"
        ))
    })?;

    let status_text: String = row.get("operational_status")?;
    let operational_status = OperationalStatus::parse_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid operational status `{status_text}` in facilities.operational_status"
        ))
    })?;

    Ok(Facility {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
        size_in_square_footage: row.get("size_in_square_footage")?,
        facility_type,
        operational_status,
        organization_id: row.get("organization_id")?,
    })
}
