use rusqlite::Connection;
use student_record_manager::db::{add_course, ensure_schema, fetch_courses};

#[test]
fn schema_creation_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();
}

#[test]
fn schema_creates_the_three_tables() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    for table in ["available_course", "course", "student"] {
        assert!(names.iter().any(|name| name == table), "missing {table}");
    }
}

#[test]
fn reopening_a_file_backed_store_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite");

    {
        let conn = Connection::open(&path).unwrap();
        ensure_schema(&conn).unwrap();
        add_course(&conn, "Algorithms").unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    ensure_schema(&conn).unwrap();
    let courses = fetch_courses(&conn).unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].name, "Algorithms");
}
