//! Relationship repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `relationships` table.
//! - Keep the serialized attribute list inside this boundary.
//!
//! # Invariants
//! - List order is deterministic: `sort_order ASC, id ASC`.
//! - `attributes_json` always holds a JSON string array; malformed
//!   stored values fail the read.

use crate::model::relationship::{
    Relationship, RelationshipDraft, RelationshipId, RelationshipKind,
};
use crate::repo::{ensure_repo_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const RELATIONSHIP_SELECT_SQL: &str = "SELECT
    id,
    name,
    type,
    description,
    attributes_json,
    sort_order,
    filter_by_type,
    filter_by_object_type_id
FROM relationships";

const RELATIONSHIP_COLUMNS: &[&str] = &[
    "id",
    "name",
    "type",
    "description",
    "attributes_json",
    "sort_order",
    "filter_by_type",
    "filter_by_object_type_id",
];

/// Repository interface for relationship CRUD operations.
pub trait RelationshipRepository {
    /// Inserts one relationship and returns the store-assigned id.
    fn create_relationship(&self, draft: &RelationshipDraft) -> RepoResult<RelationshipId>;
    /// Loads one relationship by id.
    fn get_relationship(&self, id: RelationshipId) -> RepoResult<Option<Relationship>>;
    /// Lists all relationships in list-view order.
    fn list_relationships(&self) -> RepoResult<Vec<Relationship>>;
    /// Overwrites the mutable columns of one relationship by id.
    fn update_relationship(&self, id: RelationshipId, draft: &RelationshipDraft)
        -> RepoResult<()>;
    /// Removes one relationship by id.
    fn delete_relationship(&self, id: RelationshipId) -> RepoResult<()>;
}

/// SQLite-backed relationship repository.
pub struct SqliteRelationshipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRelationshipRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_repo_ready(conn, "relationships", RELATIONSHIP_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl RelationshipRepository for SqliteRelationshipRepository<'_> {
    fn create_relationship(&self, draft: &RelationshipDraft) -> RepoResult<RelationshipId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO relationships (
                name,
                type,
                description,
                attributes_json,
                sort_order,
                filter_by_type,
                filter_by_object_type_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                draft.name.as_str(),
                draft.kind.as_db_str(),
                draft.description.as_str(),
                encode_attribute_names(&draft.attribute_names)?,
                draft.sort_order,
                draft.filter_by_kind.map(RelationshipKind::as_db_str),
                draft.filter_by_object_type_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_relationship(&self, id: RelationshipId) -> RepoResult<Option<Relationship>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RELATIONSHIP_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_relationship_row(row)?));
        }
        Ok(None)
    }

    fn list_relationships(&self) -> RepoResult<Vec<Relationship>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RELATIONSHIP_SELECT_SQL} ORDER BY sort_order ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut relationships = Vec::new();
        while let Some(row) = rows.next()? {
            relationships.push(parse_relationship_row(row)?);
        }
        Ok(relationships)
    }

    fn update_relationship(
        &self,
        id: RelationshipId,
        draft: &RelationshipDraft,
    ) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE relationships
             SET
                name = ?1,
                type = ?2,
                description = ?3,
                attributes_json = ?4,
                sort_order = ?5,
                filter_by_type = ?6,
                filter_by_object_type_id = ?7
             WHERE id = ?8;",
            params![
                draft.name.as_str(),
                draft.kind.as_db_str(),
                draft.description.as_str(),
                encode_attribute_names(&draft.attribute_names)?,
                draft.sort_order,
                draft.filter_by_kind.map(RelationshipKind::as_db_str),
                draft.filter_by_object_type_id,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "relationship",
                id,
            });
        }
        Ok(())
    }

    fn delete_relationship(&self, id: RelationshipId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM relationships WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "relationship",
                id,
            });
        }
        Ok(())
    }
}

fn encode_attribute_names(names: &[String]) -> RepoResult<String> {
    serde_json::to_string(names).map_err(|err| {
        RepoError::InvalidData(format!("attribute name list is not serializable: {err}"))
    })
}

fn parse_relationship_row(row: &Row<'_>) -> RepoResult<Relationship> {
    let kind_text: String = row.get("type")?;
    let kind = RelationshipKind::parse_db(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid relationship type `{kind_text}` in relationships.type"
        ))
    })?;

    let filter_by_kind = match row.get::<_, Option<String>>("filter_by_type")? {
        Some(value) => Some(RelationshipKind::parse_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid relationship type `{value}` in relationships.filter_by_type"
            ))
        })?),
        None => None,
    };

    let attributes_text: String = row.get("attributes_json")?;
    let attribute_names: Vec<String> = serde_json::from_str(&attributes_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid attribute list `{attributes_text}` in relationships.attributes_json"
        ))
    })?;

    Ok(Relationship {
        id: row.get("id")?,
        name: row.get("name")?,
        kind,
        description: row.get("description")?,
        attribute_names,
        sort_order: row.get("sort_order")?,
        filter_by_kind,
        filter_by_object_type_id: row.get("filter_by_object_type_id")?,
    })
}
