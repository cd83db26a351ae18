//! Persistence module split across logical submodules. Every function takes
//! an explicit `&Connection` so the same code path runs against the on-disk
//! store in production and an in-memory store in tests.

mod connection;
mod courses;
mod error;
mod students;

pub use connection::{ensure_schema, open_store};
pub use courses::{add_course, course_exists, course_name, enroll_student, fetch_courses};
pub use error::StoreError;
pub use students::{fetch_student_details, register_student, student_exists};
