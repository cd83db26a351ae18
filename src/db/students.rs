use rusqlite::{params, Connection};

use super::error::StoreError;
use crate::models::{NewStudent, Student, StudentDetail};

/// Insert one student row with all seven attributes exactly as supplied and
/// return the freshly assigned surrogate key. The caller owns any format
/// validation; this function stores the date of birth as given.
pub fn register_student(conn: &Connection, student: &NewStudent) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO student (name, dob, gender, phone, email, father_name, address)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            student.name,
            student.dob,
            student.gender,
            student.phone,
            student.email,
            student.father_name,
            student.address,
        ],
    )
    .map_err(|err| StoreError::from_write(err, "failed to register student"))?;

    Ok(conn.last_insert_rowid())
}

/// Report whether a student row with this identifier exists. A single bounded
/// probe: the prepared statement and its cursor are dropped before returning,
/// and the first matching row (if any) decides the answer.
pub fn student_exists(conn: &Connection, student_id: i64) -> Result<bool, StoreError> {
    let mut stmt = conn.prepare("SELECT 1 FROM student WHERE student_id = ?1 LIMIT 1")?;
    Ok(stmt.exists(params![student_id])?)
}

/// Produce the full enrollment report: every student LEFT JOINed against the
/// enrollment table. Students without enrollments appear once with no course;
/// students with several appear once per enrollment, attributes repeated.
/// The fan-out is deliberate display denormalization.
pub fn fetch_student_details(conn: &Connection) -> Result<Vec<StudentDetail>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT s.student_id, s.name, s.dob, s.gender, s.phone, s.email,
                s.father_name, s.address, c.course_name
         FROM student s
         LEFT JOIN course c ON s.student_id = c.student_id",
    )?;

    let details = stmt
        .query_map([], |row| {
            Ok(StudentDetail {
                student: Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    dob: row.get(2)?,
                    gender: row.get(3)?,
                    phone: row.get(4)?,
                    email: row.get(5)?,
                    father_name: row.get(6)?,
                    address: row.get(7)?,
                },
                course_name: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(details)
}
