//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;

/// Field values collected for a new student registration. Every attribute is
/// stored as the operator typed it; the persistence layer performs no format
/// validation, not even on `dob`.
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: String,
    /// Date of birth, conventionally `YYYY-MM-DD` but persisted verbatim.
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub father_name: String,
    pub address: String,
}

/// A registered student as stored in the `student` table. Rows are append-only:
/// once registered a student is never updated or deleted.
#[derive(Debug, Clone)]
pub struct Student {
    /// Surrogate key assigned by the database at registration time.
    pub id: i64,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub father_name: String,
    pub address: String,
}

/// An offering in the institution's catalog, independent of any student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCourse {
    /// Primary key from the `available_course` table. Enrollment flows bubble
    /// this id back to the persistence layer, so we keep it around even when
    /// the UI only needs the name.
    pub id: i64,
    pub name: String,
}

impl fmt::Display for CatalogCourse {
    /// Render as `id. name`, the shape the menu uses when presenting the
    /// catalog before enrollment.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.id, self.name)
    }
}

/// One row of the student detail report: a student joined against one of their
/// enrollments. A student with no enrollments still produces a row, with
/// `course_name` absent. A student with several enrollments appears once per
/// enrollment with the student attributes repeated.
#[derive(Debug, Clone)]
pub struct StudentDetail {
    pub student: Student,
    /// Name snapshotted into the enrollment row at enrollment time, so a later
    /// catalog rename never rewrites history. `None` both for students without
    /// enrollments and for enrollments whose name lookup came up empty.
    pub course_name: Option<String>,
}
