//! Object type repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `object_types` table.
//! - Own the transactional update that cascades to the attribute set.
//!
//! # Invariants
//! - The cascade commits only when both the parent row and the full
//!   attribute replacement succeed; any failure rolls back both.
//! - Concurrent readers never observe an object type whose attributes
//!   belong to a different revision.

use crate::model::attribute::AttributeDraft;
use crate::model::object_type::{ObjectType, ObjectTypeId};
use crate::repo::attribute_repo::replace_attributes_tx;
use crate::repo::{ensure_repo_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const OBJECT_TYPE_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    created_at,
    updated_at
FROM object_types";

const OBJECT_TYPE_COLUMNS: &[&str] = &["id", "name", "description", "created_at", "updated_at"];

/// Repository interface for object type CRUD operations.
pub trait ObjectTypeRepository {
    /// Inserts one object type and returns the store-assigned id.
    fn create_object_type(&self, name: &str, description: &str) -> RepoResult<ObjectTypeId>;
    /// Loads one object type by id.
    fn get_object_type(&self, id: ObjectTypeId) -> RepoResult<Option<ObjectType>>;
    /// Lists every object type, for list tables and dropdown population.
    fn list_object_types(&self) -> RepoResult<Vec<ObjectType>>;
    /// Updates an object type and replaces its attribute set atomically.
    fn update_object_type_with_attributes(
        &self,
        id: ObjectTypeId,
        name: &str,
        description: &str,
        attributes: &[AttributeDraft],
    ) -> RepoResult<()>;
    /// Removes one object type by id.
    fn delete_object_type(&self, id: ObjectTypeId) -> RepoResult<()>;
}

/// SQLite-backed object type repository.
pub struct SqliteObjectTypeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteObjectTypeRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "object_types", OBJECT_TYPE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ObjectTypeRepository for SqliteObjectTypeRepository<'_> {
    fn create_object_type(&self, name: &str, description: &str) -> RepoResult<ObjectTypeId> {
        ObjectType::validate_name(name)?;

        self.conn.execute(
            "INSERT INTO object_types (name, description) VALUES (?1, ?2);",
            params![name, description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_object_type(&self, id: ObjectTypeId) -> RepoResult<Option<ObjectType>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OBJECT_TYPE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_object_type_row(row)?));
        }
        Ok(None)
    }

    fn list_object_types(&self) -> RepoResult<Vec<ObjectType>> {
        let mut stmt = self.conn.prepare(&format!("{OBJECT_TYPE_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut object_types = Vec::new();
        while let Some(row) = rows.next()? {
            object_types.push(parse_object_type_row(row)?);
        }
        Ok(object_types)
    }

    fn update_object_type_with_attributes(
        &self,
        id: ObjectTypeId,
        name: &str,
        description: &str,
        attributes: &[AttributeDraft],
    ) -> RepoResult<()> {
        ObjectType::validate_name(name)?;

        // Both statements run on this transaction; dropping it without
        // commit rolls back the parent update together with any partial
        // attribute replacement.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE object_types
             SET
                name = ?1,
                description = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![name, description, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "object type",
                id,
            });
        }

        replace_attributes_tx(&tx, id, attributes)?;

        tx.commit()?;
        Ok(())
    }

    fn delete_object_type(&self, id: ObjectTypeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM object_types WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "object type",
                id,
            });
        }
        Ok(())
    }
}

fn parse_object_type_row(row: &Row<'_>) -> RepoResult<ObjectType> {
    Ok(ObjectType {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
