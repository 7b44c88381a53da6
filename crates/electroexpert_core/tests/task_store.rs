use electroexpert_core::db::open_db_in_memory;
use electroexpert_core::model::task::KNOWN_TASK_CATEGORIES;
use electroexpert_core::{
    CollectionKey, CollectionRepository, FixedClock, RepoError, RepoResult, Severity,
    SharedClock, SqliteCollectionRepository, Task, TaskDraft, TaskStore,
};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::sync::Arc;

fn clock() -> SharedClock {
    Arc::new(FixedClock::at_date(2024, 1, 15).unwrap())
}

fn persisted(conn: &Connection) -> Vec<Task> {
    SqliteCollectionRepository::new(conn)
        .load(CollectionKey::Tasks)
        .unwrap()
}

/// Opens a store over a repository that already holds `tasks`.
fn store_with<'a>(conn: &'a Connection, tasks: &[Task]) -> TaskStore<SqliteCollectionRepository<'a>> {
    let repo = SqliteCollectionRepository::new(conn);
    repo.save(CollectionKey::Tasks, tasks).unwrap();
    TaskStore::open(repo, clock()).unwrap()
}

fn task(id: &str, title: &str, date: &str) -> Task {
    Task::from_draft(
        TaskDraft {
            id: Some(id.to_string()),
            date: Some(date.to_string()),
            ..TaskDraft::titled(title)
        },
        clock().as_ref(),
    )
}

#[test]
fn empty_store_seeds_ten_demo_tasks_and_persists_them() {
    let conn = open_db_in_memory().unwrap();
    let store = TaskStore::open(SqliteCollectionRepository::new(&conn), clock()).unwrap();

    assert_eq!(store.len(), 10);
    let categories: BTreeSet<&str> = store.list().iter().map(|t| t.category.as_str()).collect();
    let expected: BTreeSet<&str> = KNOWN_TASK_CATEGORIES.iter().copied().collect();
    assert_eq!(categories, expected);
    assert!(store.list().iter().all(|t| t.date_string() == "2024-01-15"));
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn non_empty_store_is_not_reseeded() {
    let conn = open_db_in_memory().unwrap();
    let existing = vec![task("a", "Hab 101", "2024-01-02")];
    let store = store_with(&conn, &existing);

    assert_eq!(store.list(), existing.as_slice());
}

#[test]
fn reopening_a_seeded_store_keeps_the_same_records() {
    let conn = open_db_in_memory().unwrap();
    let first = TaskStore::open(SqliteCollectionRepository::new(&conn), clock()).unwrap();
    let seeded = first.list().to_vec();
    drop(first);

    let second = TaskStore::open(SqliteCollectionRepository::new(&conn), clock()).unwrap();
    assert_eq!(second.list(), seeded.as_slice());
}

#[test]
fn corrupt_snapshot_is_treated_as_empty_and_reseeded() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO collections (key, payload) VALUES (?1, ?2);",
        [CollectionKey::Tasks.storage_name(), "[{\"id\": 1"],
    )
    .unwrap();

    let store = TaskStore::open(SqliteCollectionRepository::new(&conn), clock()).unwrap();
    assert_eq!(store.len(), 10);
    assert_eq!(persisted(&conn).len(), 10);
}

#[test]
fn upsert_without_id_inserts_at_front_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[task("a", "Hab 101", "2024-01-02")]);

    let created = store.upsert(TaskDraft::titled("Bomba piscina")).unwrap();

    assert_eq!(store.list()[0], created);
    assert_eq!(store.len(), 2);
    assert_eq!(created.category, "otros");
    assert_eq!(created.severity, Severity::Medium);
    assert_eq!(created.date_string(), "2024-01-15");
    let matching = store.list().iter().filter(|t| t.id == created.id).count();
    assert_eq!(matching, 1);
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn upsert_with_existing_id_replaces_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(
        &conn,
        &[
            task("a", "Hab 101", "2024-01-02"),
            task("b", "Hab 102", "2024-01-03"),
            task("c", "Hab 103", "2024-01-04"),
        ],
    );

    let updated = store
        .upsert(TaskDraft {
            id: Some("b".to_string()),
            solution: Some("Cambiado condensador".to_string()),
            date: Some("2024-01-03".to_string()),
            ..TaskDraft::titled("Hab 102 - revisado")
        })
        .unwrap();

    let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(store.get("b"), Some(&updated));
    assert_eq!(updated.title, "Hab 102 - revisado");
    assert!(!updated.is_pending());
    assert_eq!(persisted(&conn), store.list().to_vec());
}

#[test]
fn upsert_with_unknown_id_creates_with_that_id() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(&conn, &[task("a", "Hab 101", "2024-01-02")]);

    let created = store
        .upsert(TaskDraft {
            id: Some("imported-7".to_string()),
            ..TaskDraft::titled("Importada")
        })
        .unwrap();

    assert_eq!(created.id, "imported-7");
    assert_eq!(store.list()[0].id, "imported-7");
    assert_eq!(store.len(), 2);
}

#[test]
fn remove_is_idempotent_and_absent_ids_are_noops() {
    let conn = open_db_in_memory().unwrap();
    let mut store = store_with(
        &conn,
        &[
            task("a", "Hab 101", "2024-01-02"),
            task("b", "Hab 102", "2024-01-03"),
        ],
    );

    store.remove("a").unwrap();
    let after_once = store.list().to_vec();
    store.remove("a").unwrap();
    store.remove("missing").unwrap();

    assert_eq!(store.list(), after_once.as_slice());
    assert_eq!(after_once.len(), 1);
    assert_eq!(persisted(&conn), after_once);
}

#[test]
fn list_by_date_returns_exact_matches_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = store_with(
        &conn,
        &[
            task("a", "Hab 101", "2024-01-02"),
            task("b", "Hab 102", "2024-01-03"),
            task("c", "Hab 103", "2024-01-02"),
        ],
    );

    let ids: Vec<String> = store
        .list_by_date("2024-01-02")
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, ["a", "c"]);

    let expected: Vec<Task> = store
        .list()
        .iter()
        .filter(|t| t.date_string() == "2024-01-03")
        .cloned()
        .collect();
    assert_eq!(store.list_by_date("2024-01-03"), expected);
    assert!(store.list_by_date("2024-01-09").is_empty());
    assert!(store.list_by_date("2024-1-2").is_empty());
}

#[test]
fn search_is_case_insensitive_over_title_description_and_category() {
    let conn = open_db_in_memory().unwrap();
    let mut records = vec![
        task("a", "Hab 101 - Fuga Agua AC", "2024-01-02"),
        task("b", "Cocina - Hornos", "2024-01-02"),
        task("c", "Garaje", "2024-01-02"),
    ];
    records[1].category = "cocina".to_string();
    records[2].description = "Disparo del DIFERENCIAL".to_string();
    let store = store_with(&conn, &records);

    let ids = |query: &str| -> Vec<String> {
        store.search(query).into_iter().map(|t| t.id).collect()
    };
    assert_eq!(ids("fuga"), ["a"]);
    assert_eq!(ids("COCINA"), ["b"]);
    assert_eq!(ids("diferencial"), ["c"]);
    assert_eq!(ids(""), ["a", "b", "c"]);
    assert!(ids("ascensor").is_empty());
}

#[test]
fn duplicate_ids_in_snapshot_keep_first_occurrence() {
    let conn = open_db_in_memory().unwrap();
    let store = store_with(
        &conn,
        &[
            task("a", "primero", "2024-01-02"),
            task("a", "duplicado", "2024-01-03"),
        ],
    );

    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "primero");
}

#[test]
fn legacy_entries_are_normalized_once_and_stay_stable_across_reopens() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO collections (key, payload) VALUES (?1, ?2);",
        [
            CollectionKey::Tasks.storage_name(),
            r#"[{"title": "legacy"}, {"id": "b", "title": "sin fecha", "date": "2024-1-2"}]"#,
        ],
    )
    .unwrap();

    let first = TaskStore::open(SqliteCollectionRepository::new(&conn), clock()).unwrap();
    let normalized = first.list().to_vec();
    assert_eq!(persisted(&conn), normalized);
    assert!(normalized.iter().all(|t| t.date_string() == "2024-01-15"));
    drop(first);

    let later: SharedClock = Arc::new(FixedClock::at_date(2024, 2, 20).unwrap());
    let second = TaskStore::open(SqliteCollectionRepository::new(&conn), later).unwrap();
    assert_eq!(second.list(), normalized.as_slice());
    assert_eq!(second.list()[0].title, "legacy");
    assert_eq!(second.list()[1].id, "b");
}

#[test]
fn dropped_duplicates_are_removed_from_storage() {
    let conn = open_db_in_memory().unwrap();
    let store = store_with(
        &conn,
        &[
            task("a", "primero", "2024-01-02"),
            task("a", "duplicado", "2024-01-03"),
        ],
    );

    assert_eq!(persisted(&conn), store.list().to_vec());
    assert_eq!(persisted(&conn).len(), 1);
}

/// Repository whose saves can be switched to fail.
struct FlakyRepo<'conn> {
    inner: SqliteCollectionRepository<'conn>,
    fail_saves: Cell<bool>,
}

impl CollectionRepository for &FlakyRepo<'_> {
    fn load<T: DeserializeOwned>(&self, key: CollectionKey) -> RepoResult<Vec<T>> {
        self.inner.load(key)
    }

    fn save<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::Encode("disk full".to_string()));
        }
        self.inner.save(key, records)
    }
}

#[test]
fn failed_persist_leaves_memory_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let flaky = FlakyRepo {
        inner: SqliteCollectionRepository::new(&conn),
        fail_saves: Cell::new(false),
    };
    let mut store = TaskStore::open(&flaky, clock()).unwrap();
    let before = store.list().to_vec();

    flaky.fail_saves.set(true);
    assert!(store.upsert(TaskDraft::titled("no cabe")).is_err());
    assert!(store.remove(&before[0].id).is_err());

    assert_eq!(store.list(), before.as_slice());
    assert_eq!(persisted(&conn), before);
}
