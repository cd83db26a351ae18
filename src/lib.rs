//! Core library surface for the student record manager. The public modules
//! keep the API intentionally small so the `bin` target and the integration
//! tests can reuse the same pieces: an explicit-connection persistence layer
//! under `db`, plain data holders under `models`, and the terminal front-end
//! under `ui`.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer, used by `main.rs` to
/// bring up the store and by callers that drive the six record actions
/// without going through the TUI.
pub use db::{ensure_schema, fetch_courses, open_store, StoreError};

/// The primary domain types that other layers manipulate.
pub use models::{CatalogCourse, NewStudent, Student, StudentDetail};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
