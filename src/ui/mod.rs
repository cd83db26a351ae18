//! Ratatui front-end for the student record manager. This layer owns
//! everything the persistence core deliberately does not: menu navigation,
//! collecting and coercing field values, and the existence pre-checks that
//! run before an enrollment write is attempted.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
