//! Attribute repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `attributes` table.
//! - Own the replace-set operation used by the object-type update cascade.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - `replace_for_object_type` swaps the whole attribute set atomically.
//! - The owning object type reference never changes after create.

use crate::model::attribute::{Attribute, AttributeDataType, AttributeDraft, AttributeId};
use crate::model::object_type::ObjectTypeId;
use crate::repo::{bool_to_int, ensure_repo_ready, parse_bool_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const ATTRIBUTE_SELECT_SQL: &str = "SELECT
    id,
    name,
    data_type,
    is_required,
    default_value,
    is_indexed,
    attribute_usage_count,
    fk_object_type_id
FROM attributes";

const ATTRIBUTE_COLUMNS: &[&str] = &[
    "id",
    "name",
    "data_type",
    "is_required",
    "default_value",
    "is_indexed",
    "attribute_usage_count",
    "fk_object_type_id",
];

/// Repository interface for attribute CRUD operations.
pub trait AttributeRepository {
    /// Inserts one attribute under an object type and returns the new id.
    fn create_attribute(
        &self,
        object_type_id: ObjectTypeId,
        draft: &AttributeDraft,
    ) -> RepoResult<AttributeId>;
    /// Loads one attribute by id.
    fn get_attribute(&self, id: AttributeId) -> RepoResult<Option<Attribute>>;
    /// Lists all attributes owned by an object type.
    fn attributes_for_object_type(
        &self,
        object_type_id: ObjectTypeId,
    ) -> RepoResult<Vec<Attribute>>;
    /// Overwrites the mutable columns of one attribute by id.
    fn update_attribute(&self, id: AttributeId, draft: &AttributeDraft) -> RepoResult<()>;
    /// Removes one attribute by id.
    fn delete_attribute(&self, id: AttributeId) -> RepoResult<()>;
    /// Replaces the whole attribute set of an object type in one
    /// transaction of its own.
    fn replace_for_object_type(
        &self,
        object_type_id: ObjectTypeId,
        drafts: &[AttributeDraft],
    ) -> RepoResult<()>;
}

/// SQLite-backed attribute repository.
pub struct SqliteAttributeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttributeRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "attributes", ATTRIBUTE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl AttributeRepository for SqliteAttributeRepository<'_> {
    fn create_attribute(
        &self,
        object_type_id: ObjectTypeId,
        draft: &AttributeDraft,
    ) -> RepoResult<AttributeId> {
        insert_attribute(self.conn, object_type_id, draft)
    }

    fn get_attribute(&self, id: AttributeId) -> RepoResult<Option<Attribute>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATTRIBUTE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_attribute_row(row)?));
        }
        Ok(None)
    }

    fn attributes_for_object_type(
        &self,
        object_type_id: ObjectTypeId,
    ) -> RepoResult<Vec<Attribute>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ATTRIBUTE_SELECT_SQL} WHERE fk_object_type_id = ?1;"))?;
        let mut rows = stmt.query([object_type_id])?;
        let mut attributes = Vec::new();
        while let Some(row) = rows.next()? {
            attributes.push(parse_attribute_row(row)?);
        }
        Ok(attributes)
    }

    fn update_attribute(&self, id: AttributeId, draft: &AttributeDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE attributes
             SET
                name = ?1,
                data_type = ?2,
                is_required = ?3,
                default_value = ?4,
                is_indexed = ?5,
                attribute_usage_count = ?6
             WHERE id = ?7;",
            params![
                draft.name.as_str(),
                draft.data_type.as_db_str(),
                bool_to_int(draft.is_required),
                draft.default_value.as_deref(),
                bool_to_int(draft.is_indexed),
                draft.usage_count,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "attribute",
                id,
            });
        }
        Ok(())
    }

    fn delete_attribute(&self, id: AttributeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM attributes WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "attribute",
                id,
            });
        }
        Ok(())
    }

    fn replace_for_object_type(
        &self,
        object_type_id: ObjectTypeId,
        drafts: &[AttributeDraft],
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        replace_attributes_tx(&tx, object_type_id, drafts)?;
        tx.commit()?;
        Ok(())
    }
}

/// Replaces the attribute set of an object type on an externally supplied
/// transaction or connection.
///
/// The object-type update cascade calls this with its own open
/// transaction so both steps commit or roll back together; standalone
/// callers go through `replace_for_object_type`, which wraps this in a
/// transaction of its own.
pub fn replace_attributes_tx(
    conn: &Connection,
    object_type_id: ObjectTypeId,
    drafts: &[AttributeDraft],
) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM attributes WHERE fk_object_type_id = ?1;",
        [object_type_id],
    )?;

    for draft in drafts {
        insert_attribute(conn, object_type_id, draft)?;
    }

    Ok(())
}

fn insert_attribute(
    conn: &Connection,
    object_type_id: ObjectTypeId,
    draft: &AttributeDraft,
) -> RepoResult<AttributeId> {
    draft.validate()?;

    conn.execute(
        "INSERT INTO attributes (
            name,
            data_type,
            is_required,
            default_value,
            is_indexed,
            attribute_usage_count,
            fk_object_type_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            draft.name.as_str(),
            draft.data_type.as_db_str(),
            bool_to_int(draft.is_required),
            draft.default_value.as_deref(),
            bool_to_int(draft.is_indexed),
            draft.usage_count,
            object_type_id,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn parse_attribute_row(row: &Row<'_>) -> RepoResult<Attribute> {
    let data_type_text: String = row.get("data_type")?;
    let data_type = AttributeDataType::parse_db(&data_type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid data type `{data_type_text}` in attributes.data_type"
        ))
    })?;

    let is_required = parse_bool_column(row.get("is_required")?, "attributes.is_required")?;
    let is_indexed = parse_bool_column(row.get("is_indexed")?, "attributes.is_indexed")?;

    Ok(Attribute {
        id: row.get("id")?,
        name: row.get("name")?,
        data_type,
        is_required,
        default_value: row.get("default_value")?,
        is_indexed,
        usage_count: row.get("attribute_usage_count")?,
        object_type_id: row.get("fk_object_type_id")?,
    })
}
