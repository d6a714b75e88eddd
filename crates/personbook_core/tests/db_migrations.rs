use personbook_core::db::migrations::latest_version;
use personbook_core::db::{
    open_db, open_db_in_memory, ConnectionProvider, DbError, FileDatabase,
};
use personbook_core::{Person, PersonRepository, SqlitePersonRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "person");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("personbook.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "person");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_name_pair_is_rejected_at_schema_level() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO person (first_name, last_name) VALUES ('Ana', 'Lee');",
        [],
    )
    .unwrap();
    let err = conn
        .execute(
            "INSERT INTO person (first_name, last_name) VALUES ('Ana', 'Lee');",
            [],
        )
        .unwrap_err();

    assert!(matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation
    ));
}

#[test]
fn file_provider_reacquires_the_same_database() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FileDatabase::new(dir.path().join("personbook.db"));

    let conn = provider.acquire().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let mut person = Person::new("Ana", "Lee").unwrap();
    repo.create(&mut person).unwrap();
    drop(conn);

    let conn = provider.acquire().unwrap();
    let repo = SqlitePersonRepository::try_new(&conn).unwrap();
    let loaded = repo.find_by_id(person.id()).unwrap().unwrap();
    assert_eq!(loaded, person);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
