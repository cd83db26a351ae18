use rusqlite::{params, Connection, OptionalExtension};

use super::error::StoreError;
use crate::models::CatalogCourse;

/// Insert a new catalog course, returning the hydrated struct so the caller
/// can push it straight into an in-memory list without re-querying.
pub fn add_course(conn: &Connection, name: &str) -> Result<CatalogCourse, StoreError> {
    conn.execute(
        "INSERT INTO available_course (course_name) VALUES (?1)",
        params![name],
    )
    .map_err(|err| StoreError::from_write(err, "failed to add course"))?;

    Ok(CatalogCourse {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Report whether a catalog course with this identifier exists. Same bounded
/// probe shape as `student_exists`: no cursor outlives the call.
pub fn course_exists(conn: &Connection, course_id: i64) -> Result<bool, StoreError> {
    let mut stmt = conn.prepare("SELECT 1 FROM available_course WHERE course_id = ?1 LIMIT 1")?;
    Ok(stmt.exists(params![course_id])?)
}

/// Retrieve every catalog course. No ORDER BY on purpose: the report shows
/// rows in storage order, which for this schema is insertion order.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<CatalogCourse>, StoreError> {
    let mut stmt = conn.prepare("SELECT course_id, course_name FROM available_course")?;

    let courses = stmt
        .query_map([], |row| {
            Ok(CatalogCourse {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(courses)
}

/// Look up the display name for a catalog course. `Ok(None)` when no such
/// course exists; the enrollment path treats that as tolerable rather than
/// an error.
pub fn course_name(conn: &Connection, course_id: i64) -> Result<Option<String>, StoreError> {
    let name = conn
        .query_row(
            "SELECT course_name FROM available_course WHERE course_id = ?1",
            params![course_id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(name)
}

/// Insert one enrollment row linking a student to a catalog course, with the
/// course name snapshotted alongside the two identifiers.
///
/// The caller is expected to have verified `student_exists` and
/// `course_exists` already; this function only performs the name lookup and
/// the insert. A lookup that finds nothing stores NULL for the name instead
/// of failing. The foreign keys still reject references that truly do not
/// exist, surfaced as `StoreError::Constraint`.
pub fn enroll_student(
    conn: &Connection,
    student_id: i64,
    course_id: i64,
) -> Result<i64, StoreError> {
    let name = course_name(conn, course_id)?;

    conn.execute(
        "INSERT INTO course (student_id, catalog_course_id, course_name)
         VALUES (?1, ?2, ?3)",
        params![student_id, course_id, name],
    )
    .map_err(|err| StoreError::from_write(err, "failed to register course"))?;

    Ok(conn.last_insert_rowid())
}
