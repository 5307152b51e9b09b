//! Relationship dependency repository contracts and SQLite implementation.
//!
//! Dependencies record which entities a relationship rests on, so list
//! views can warn about the impact of a delete before it runs.

use crate::model::relationship::{
    DependencyKind, RelationshipDependency, RelationshipDependencyId, RelationshipId,
};
use crate::repo::{ensure_repo_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const DEPENDENCY_SELECT_SQL: &str = "SELECT
    id,
    dependency_name,
    dependency_type,
    relationship_id,
    created_at,
    updated_at
FROM relationship_dependencies";

const DEPENDENCY_COLUMNS: &[&str] = &[
    "id",
    "dependency_name",
    "dependency_type",
    "relationship_id",
    "created_at",
    "updated_at",
];

/// Repository interface for relationship dependency CRUD operations.
pub trait RelationshipDependencyRepository {
    /// Inserts one dependency under a relationship and returns the new id.
    fn create_dependency(
        &self,
        relationship_id: RelationshipId,
        dependency_name: &str,
        dependency_type: DependencyKind,
    ) -> RepoResult<RelationshipDependencyId>;
    /// Loads one dependency by id.
    fn get_dependency(
        &self,
        id: RelationshipDependencyId,
    ) -> RepoResult<Option<RelationshipDependency>>;
    /// Lists all dependencies recorded for a relationship.
    fn dependencies_for_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> RepoResult<Vec<RelationshipDependency>>;
    /// Overwrites the name and type of one dependency by id.
    fn update_dependency(
        &self,
        id: RelationshipDependencyId,
        dependency_name: &str,
        dependency_type: DependencyKind,
    ) -> RepoResult<()>;
    /// Removes one dependency by id.
    fn delete_dependency(&self, id: RelationshipDependencyId) -> RepoResult<()>;
}

/// SQLite-backed relationship dependency repository.
pub struct SqliteRelationshipDependencyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRelationshipDependencyRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "relationship_dependencies", DEPENDENCY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl RelationshipDependencyRepository for SqliteRelationshipDependencyRepository<'_> {
    fn create_dependency(
        &self,
        relationship_id: RelationshipId,
        dependency_name: &str,
        dependency_type: DependencyKind,
    ) -> RepoResult<RelationshipDependencyId> {
        RelationshipDependency::validate_name(dependency_name)?;

        self.conn.execute(
            "INSERT INTO relationship_dependencies (
                dependency_name,
                dependency_type,
                relationship_id
            ) VALUES (?1, ?2, ?3);",
            params![
                dependency_name,
                dependency_type.as_db_str(),
                relationship_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_dependency(
        &self,
        id: RelationshipDependencyId,
    ) -> RepoResult<Option<RelationshipDependency>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPENDENCY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_dependency_row(row)?));
        }
        Ok(None)
    }

    fn dependencies_for_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> RepoResult<Vec<RelationshipDependency>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPENDENCY_SELECT_SQL} WHERE relationship_id = ?1;"))?;
        let mut rows = stmt.query([relationship_id])?;
        let mut dependencies = Vec::new();
        while let Some(row) = rows.next()? {
            dependencies.push(parse_dependency_row(row)?);
        }
        Ok(dependencies)
    }

    fn update_dependency(
        &self,
        id: RelationshipDependencyId,
        dependency_name: &str,
        dependency_type: DependencyKind,
    ) -> RepoResult<()> {
        RelationshipDependency::validate_name(dependency_name)?;

        let changed = self.conn.execute(
            "UPDATE relationship_dependencies
             SET
                dependency_name = ?1,
                dependency_type = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![dependency_name, dependency_type.as_db_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "relationship dependency",
                id,
            });
        }
        Ok(())
    }

    fn delete_dependency(&self, id: RelationshipDependencyId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM relationship_dependencies WHERE id = ?1;",
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "relationship dependency",
                id,
            });
        }
        Ok(())
    }
}

fn parse_dependency_row(row: &Row<'_>) -> RepoResult<RelationshipDependency> {
    let type_text: String = row.get("dependency_type")?;
    let dependency_type = DependencyKind::parse_db(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid dependency type `{type_text}` in relationship_dependencies.dependency_type"
        ))
    })?;

    Ok(RelationshipDependency {
        id: row.get("id")?,
        dependency_name: row.get("dependency_name")?,
        dependency_type,
        relationship_id: row.get("relationship_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
