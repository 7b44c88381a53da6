use electroexpert_core::db::open_db_in_memory;
use electroexpert_core::{
    CollectionKey, CollectionRepository, RecordValidationError, RepoError, Schematic,
    SchematicDraft, SchematicStore, SqliteCollectionRepository,
};
use rusqlite::Connection;
use std::collections::BTreeSet;

fn persisted(conn: &Connection) -> Vec<Schematic> {
    SqliteCollectionRepository::new(conn)
        .load(CollectionKey::UserSchematics)
        .unwrap()
}

fn draft_with_id(id: &str, title: &str, category: &str) -> SchematicDraft {
    SchematicDraft {
        id: Some(id.to_string()),
        ..SchematicDraft::new(title, category, format!("https://example.invalid/{id}.jpg"))
    }
}

fn store_with(
    conn: &Connection,
    drafts: Vec<SchematicDraft>,
) -> SchematicStore<SqliteCollectionRepository<'_>> {
    let repo = SqliteCollectionRepository::new(conn);
    let schematics: Vec<Schematic> = drafts
        .into_iter()
        .map(|draft| Schematic::from_draft(draft).unwrap())
        .collect();
    repo.save(CollectionKey::UserSchematics, &schematics).unwrap();
    SchematicStore::open(repo).unwrap()
}

#[test]
fn empty_catalog_installs_ten_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = SchematicStore::open(SqliteCollectionRepository::new(&conn)).unwrap();

    assert_eq!(store.len(), 10);
    let categories: BTreeSet<&str> = store
        .list()
        .iter()
        .map(|s| s.category.as_str())
        .collect();
    let expected: BTreeSet<&str> = [
        "clima-hvac",
        "acs-calderas",
        "spa-piscina",
        "cocina-ind",
        "cuadros-gral",
        "emergencia",
        "otros",
    ]
    .into_iter()
    .collect();
    assert_eq!(categories, expected);
    assert!(store.list().iter().all(|s| !s.img.is_empty()));
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn non_empty_catalog_is_not_reseeded() {
    let conn = open_db_in_memory().unwrap();
    let store = store_with(&conn, vec![draft_with_id("s1", "Cuadro propio", "otros")]);

    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].id, "s1");
}

#[test]
fn upsert_without_image_is_rejected_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, vec![draft_with_id("s1", "Cuadro propio", "otros")]);
    let before = store.list().to_vec();

    let missing = SchematicDraft {
        title: Some("Sin foto".to_string()),
        category: Some("otros".to_string()),
        ..SchematicDraft::default()
    };
    let err = store.upsert(missing).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::MissingImage)
    ));

    let blank_edit = SchematicDraft {
        img: Some(String::new()),
        ..draft_with_id("s1", "Editado", "otros")
    };
    assert!(store.upsert(blank_edit).is_err());

    assert_eq!(store.list(), before.as_slice());
    assert_eq!(persisted(&conn), before);
}

#[test]
fn upsert_creates_at_front_and_replaces_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(
        &conn,
        vec![
            draft_with_id("s1", "Cuadro A", "otros"),
            draft_with_id("s2", "Cuadro B", "emergencia"),
        ],
    );

    let created = store
        .upsert(SchematicDraft::new(
            "Foto cuadro planta 3",
            "cuadros-gral",
            "data:image/jpeg;base64,/9j/",
        ))
        .unwrap();
    assert_eq!(store.list()[0], created);
    assert!(!created.id.is_empty());
    assert_eq!(created.description, "");

    let replaced = store
        .upsert(SchematicDraft {
            img: Some("data:image/jpeg;base64,NEW".to_string()),
            ..draft_with_id("s2", "Cuadro B v2", "emergencia")
        })
        .unwrap();

    let ids: Vec<&str> = store.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, [created.id.as_str(), "s1", "s2"]);
    assert_eq!(store.get("s2"), Some(&replaced));
    assert_eq!(replaced.img, "data:image/jpeg;base64,NEW");
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn remove_is_a_noop_for_absent_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(
        &conn,
        vec![
            draft_with_id("s1", "Cuadro A", "otros"),
            draft_with_id("s2", "Cuadro B", "otros"),
        ],
    );

    store.remove("s1").unwrap();
    store.remove("s1").unwrap();
    store.remove("nope").unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn search_matches_title_or_category_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let store = store_with(
        &conn,
        vec![
            draft_with_id("s1", "Cuadro Clima General", "clima-hvac"),
            draft_with_id("s2", "Bomba de Incendios", "emergencia"),
            draft_with_id("s3", "Lobby", "clima-hvac"),
        ],
    );

    let ids = |filter: &str| -> Vec<String> {
        store.search(filter).into_iter().map(|s| s.id).collect()
    };
    assert_eq!(ids("CLIMA"), ["s1", "s3"]);
    assert_eq!(ids("incendios"), ["s2"]);
    assert_eq!(ids("EMERG"), ["s2"]);
    assert_eq!(ids(""), ["s1", "s2", "s3"]);
}

#[test]
fn stored_entries_without_image_are_skipped_at_load() {
    let conn = open_db_in_memory().unwrap();
    let payload = serde_json::json!([
        {"id": "ok", "title": "Con foto", "category": "otros", "img": "a.jpg"},
        {"id": "bad", "title": "Sin foto", "category": "otros", "img": ""}
    ]);
    conn.execute(
        "INSERT INTO collections (key, payload) VALUES (?1, ?2);",
        [
            CollectionKey::UserSchematics.storage_name(),
            payload.to_string().as_str(),
        ],
    )
    .unwrap();

    let store = SchematicStore::open(SqliteCollectionRepository::new(&conn)).unwrap();
    let ids: Vec<&str> = store.list().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["ok"]);
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn generated_ids_for_legacy_entries_survive_reopening() {
    let conn = open_db_in_memory().unwrap();
    let payload = serde_json::json!([
        {"title": "Sin id", "category": "otros", "img": "a.jpg"}
    ]);
    conn.execute(
        "INSERT INTO collections (key, payload) VALUES (?1, ?2);",
        [
            CollectionKey::UserSchematics.storage_name(),
            payload.to_string().as_str(),
        ],
    )
    .unwrap();

    let first = SchematicStore::open(SqliteCollectionRepository::new(&conn)).unwrap();
    let id = first.list()[0].id.clone();
    drop(first);

    let second = SchematicStore::open(SqliteCollectionRepository::new(&conn)).unwrap();
    assert_eq!(second.list()[0].id, id);
    assert_eq!(persisted(&conn), second.list().to_vec());
}

#[test]
fn to_draft_then_from_draft_is_identity() {
    let original = Schematic::from_draft(SchematicDraft {
        description: Some("Planta baja".to_string()),
        ..SchematicDraft::new("Cuadro general", "cuadros-gral", "a.jpg")
    })
    .unwrap();

    let rebuilt = Schematic::from_draft(original.to_draft()).unwrap();
    assert_eq!(rebuilt, original);
}
