//! Use case repository contracts and SQLite implementation.

use crate::model::facility::{FacilityId, OperationalStatus};
use crate::model::use_case::{UseCase, UseCaseDraft, UseCaseId};
use crate::repo::{ensure_repo_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const USE_CASE_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    objective,
    operational_status,
    fk_facility_id
FROM use_cases";

const USE_CASE_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "objective",
    "operational_status",
    "fk_facility_id",
];

/// Repository interface for use case CRUD operations.
pub trait UseCaseRepository {
    /// Inserts one use case under a facility and returns the new id.
    fn create_use_case(
        &self,
        facility_id: FacilityId,
        draft: &UseCaseDraft,
    ) -> RepoResult<UseCaseId>;
    /// Loads one use case by id.
    fn get_use_case(&self, id: UseCaseId) -> RepoResult<Option<UseCase>>;
    /// Lists all use cases tied to a facility.
    fn use_cases_for_facility(&self, facility_id: FacilityId) -> RepoResult<Vec<UseCase>>;
    /// Overwrites the mutable columns of one use case by id. The owning
    /// facility reference is not part of the update.
    fn update_use_case(&self, id: UseCaseId, draft: &UseCaseDraft) -> RepoResult<()>;
    /// Removes one use case by id.
    fn delete_use_case(&self, id: UseCaseId) -> RepoResult<()>;
}

/// SQLite-backed use case repository.
pub struct SqliteUseCaseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUseCaseRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "use_cases", USE_CASE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UseCaseRepository for SqliteUseCaseRepository<'_> {
    fn create_use_case(
        &self,
        facility_id: FacilityId,
        draft: &UseCaseDraft,
    ) -> RepoResult<UseCaseId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO use_cases (
                title,
                description,
                objective,
                operational_status,
                fk_facility_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                draft.description.as_str(),
                draft.objective.as_str(),
                draft.operational_status.as_db_str(),
                facility_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_use_case(&self, id: UseCaseId) -> RepoResult<Option<UseCase>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USE_CASE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_use_case_row(row)?));
        }
        Ok(None)
    }

    fn use_cases_for_facility(&self, facility_id: FacilityId) -> RepoResult<Vec<UseCase>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USE_CASE_SELECT_SQL} WHERE fk_facility_id = ?1;"))?;
        let mut rows = stmt.query([facility_id])?;
        let mut use_cases = Vec::new();
        while let Some(row) = rows.next()? {
            use_cases.push(parse_use_case_row(row)?);
        }
        Ok(use_cases)
    }

    fn update_use_case(&self, id: UseCaseId, draft: &UseCaseDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE use_cases
             SET
                title = ?1,
                description = ?2,
                objective = ?3,
                operational_status = ?4
             WHERE id = ?5;",
            params![
                draft.title.as_str(),
                draft.description.as_str(),
                draft.objective.as_str(),
                draft.operational_status.as_db_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "use case",
                id,
            });
        }
        Ok(())
    }

    fn delete_use_case(&self, id: UseCaseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM use_cases WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "use case",
                id,
            });
        }
        Ok(())
    }
}

fn parse_use_case_row(row: &Row<'_>) -> RepoResult<UseCase> {
    let status_text: String = row.get("operational_status")?;
    let operational_status = OperationalStatus::parse_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid operational status `{status_text}` in use_cases.operational_status"
        ))
    })?;

    Ok(UseCase {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        objective: row.get("objective")?,
        operational_status,
        facility_id: row.get("fk_facility_id")?,
    })
}
