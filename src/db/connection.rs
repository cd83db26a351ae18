use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use rusqlite::Connection;

use super::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-record-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "records.sqlite";

/// Open (creating if necessary) the on-disk store and return a live
/// connection with foreign-key enforcement enabled. The connection is held
/// for the whole process lifetime; a failure here is the one fatal error in
/// the system, surfaced by `main` before the menu ever appears.
pub fn open_store() -> Result<Connection, StoreError> {
    let db_path = db_path()?;

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(&db_path).map_err(|source| StoreError::Open {
        path: db_path.clone(),
        source,
    })?;
    conn.execute_batch("PRAGMA foreign_keys = ON")?;

    Ok(conn)
}

/// Ensure the three tables exist. Idempotent: `IF NOT EXISTS` makes repeated
/// invocation a no-op, so there is no separate migration step.
///
/// The enrollment table is named `course` for historical reasons but carries
/// its own surrogate key (`enrollment_id`) separate from the catalog
/// reference (`catalog_course_id`), and both references are real foreign
/// keys. `course_name` is a nullable snapshot of the catalog name taken at
/// enrollment time.
pub fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS student (
            student_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            dob TEXT,
            gender TEXT,
            phone TEXT,
            email TEXT,
            father_name TEXT,
            address TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS available_course (
            course_id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS course (
            enrollment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            catalog_course_id INTEGER NOT NULL,
            course_name TEXT,
            FOREIGN KEY(student_id) REFERENCES student(student_id),
            FOREIGN KEY(catalog_course_id) REFERENCES available_course(course_id)
        )",
        [],
    )?;

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::NoHomeDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
