use metacat_core::db::migrations::latest_version;
use metacat_core::db::open_db_in_memory;
use metacat_core::{
    AttributeDataType, AttributeDraft, AttributeRepository, CatalogService, ObjectTypeRepository,
    RepoError, SqliteAttributeRepository, SqliteObjectTypeRepository,
};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_object_type("Customer", "A buying organization")
        .unwrap();

    let loaded = repo.get_object_type(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Customer");
    assert_eq!(loaded.description, "A buying organization");
    assert!(loaded.created_at > 0);
    assert!(loaded.updated_at > 0);
}

#[test]
fn get_absent_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();

    assert!(repo.get_object_type(12345).unwrap().is_none());
}

#[test]
fn create_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();

    let err = repo.create_object_type("  ", "whatever").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn list_returns_all_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();

    let first = repo.create_object_type("Customer", "").unwrap();
    let second = repo.create_object_type("Order", "").unwrap();

    let all = repo.list_object_types().unwrap();
    let ids: Vec<i64> = all.iter().map(|item| item.id).collect();
    assert_eq!(all.len(), 2);
    assert!(ids.contains(&first));
    assert!(ids.contains(&second));
}

#[test]
fn delete_removes_row_and_repeat_delete_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();

    let id = repo.create_object_type("Ephemeral", "").unwrap();
    repo.delete_object_type(id).unwrap();

    assert!(repo.get_object_type(id).unwrap().is_none());
    let err = repo.delete_object_type(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn cascade_update_replaces_parent_and_attributes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();
    let attribute_repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let id = repo.create_object_type("Customer", "before").unwrap();
    attribute_repo
        .replace_for_object_type(
            id,
            &[
                AttributeDraft::new("legacy_code", AttributeDataType::Varchar),
                AttributeDraft::new("legacy_flag", AttributeDataType::Integer),
            ],
        )
        .unwrap();

    let mut email = AttributeDraft::new("email", AttributeDataType::Varchar);
    email.is_required = true;
    email.is_indexed = true;
    let mut signed_up_on = AttributeDraft::new("signed_up_on", AttributeDataType::Date);
    signed_up_on.default_value = Some("1970-01-01".to_string());

    repo.update_object_type_with_attributes(id, "Account", "after", &[email, signed_up_on])
        .unwrap();

    let parent = repo.get_object_type(id).unwrap().unwrap();
    assert_eq!(parent.name, "Account");
    assert_eq!(parent.description, "after");

    let attributes = attribute_repo.attributes_for_object_type(id).unwrap();
    let names: Vec<&str> = attributes.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(attributes.len(), 2);
    assert!(names.contains(&"email"));
    assert!(names.contains(&"signed_up_on"));
    assert!(!names.contains(&"legacy_code"));

    let stored_email = attributes
        .iter()
        .find(|item| item.name == "email")
        .unwrap();
    assert!(stored_email.is_required);
    assert!(stored_email.is_indexed);
    assert_eq!(stored_email.object_type_id, id);
}

#[test]
fn cascade_update_rolls_back_when_a_replacement_attribute_is_invalid() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();
    let attribute_repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let id = repo.create_object_type("Customer", "stable").unwrap();
    attribute_repo
        .replace_for_object_type(
            id,
            &[
                AttributeDraft::new("email", AttributeDataType::Varchar),
                AttributeDraft::new("age", AttributeDataType::Integer),
            ],
        )
        .unwrap();

    let before_parent = repo.get_object_type(id).unwrap().unwrap();
    let before_attributes = attribute_repo.attributes_for_object_type(id).unwrap();

    // Second draft fails validation after the first was already inserted,
    // so the whole transaction must roll back.
    let err = repo
        .update_object_type_with_attributes(
            id,
            "Account",
            "changed",
            &[
                AttributeDraft::new("nickname", AttributeDataType::Varchar),
                AttributeDraft::new("   ", AttributeDataType::Text),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let after_parent = repo.get_object_type(id).unwrap().unwrap();
    assert_eq!(after_parent, before_parent);

    let after_attributes = attribute_repo.attributes_for_object_type(id).unwrap();
    assert_eq!(after_attributes, before_attributes);
}

#[test]
fn cascade_update_on_absent_id_reports_not_found_and_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();
    let attribute_repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let err = repo
        .update_object_type_with_attributes(
            9999,
            "Ghost",
            "",
            &[AttributeDraft::new("email", AttributeDataType::Varchar)],
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 9999, .. }));

    // The aborted transaction must leave the connection fully usable.
    let id = repo.create_object_type("Customer", "").unwrap();
    assert!(attribute_repo
        .attributes_for_object_type(id)
        .unwrap()
        .is_empty());
}

#[test]
fn cascade_update_is_idempotent_under_identical_inputs() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();
    let attribute_repo = SqliteAttributeRepository::try_new(&conn).unwrap();

    let id = repo.create_object_type("Customer", "v1").unwrap();
    let drafts = [
        AttributeDraft::new("email", AttributeDataType::Varchar),
        AttributeDraft::new("age", AttributeDataType::Integer),
    ];

    repo.update_object_type_with_attributes(id, "Account", "v2", &drafts)
        .unwrap();
    let first_attributes = attribute_repo.attributes_for_object_type(id).unwrap();

    repo.update_object_type_with_attributes(id, "Account", "v2", &drafts)
        .unwrap();
    let second_parent = repo.get_object_type(id).unwrap().unwrap();
    let second_attributes = attribute_repo.attributes_for_object_type(id).unwrap();

    assert_eq!(second_parent.name, "Account");
    assert_eq!(second_parent.description, "v2");
    assert_eq!(first_attributes.len(), second_attributes.len());
    for (first, second) in first_attributes.iter().zip(second_attributes.iter()) {
        assert_eq!(first.name, second.name);
        assert_eq!(first.data_type, second.data_type);
        assert_eq!(first.is_required, second.is_required);
        assert_eq!(first.default_value, second.default_value);
        assert_eq!(first.is_indexed, second.is_indexed);
        assert_eq!(first.usage_count, second.usage_count);
    }
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteObjectTypeRepository::try_new(&conn).unwrap();
    let service = CatalogService::new(repo);

    let id = service.create_object_type("Customer", "from service").unwrap();
    let fetched = service.get_object_type(id).unwrap().unwrap();
    assert_eq!(fetched.description, "from service");

    service
        .update_object_type(id, "Account", "updated", &[])
        .unwrap();
    assert_eq!(service.get_object_type(id).unwrap().unwrap().name, "Account");

    service.delete_object_type(id).unwrap();
    assert!(service.get_object_type(id).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteObjectTypeRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteObjectTypeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("object_types"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE object_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteObjectTypeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "object_types",
            column: "description"
        })
    ));
}
