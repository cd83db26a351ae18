//! Binary entry point that glues the SQLite-backed record store to the TUI.
//! The bootstrapping pipeline is deliberately short: open the store, ensure
//! the schema exists, hand the single long-lived connection to the app, and
//! drive the event loop until the operator exits.
use student_record_manager::{ensure_schema, open_store, run_app, App};

/// Initialize persistence and launch the menu loop.
///
/// Returning a `Result` bubbles fatal initialization problems (an unreachable
/// or unwritable database) to the terminal with a non-zero exit instead of
/// crashing silently. Nothing after startup is fatal: per-action failures are
/// rendered in the footer and the menu continues.
fn main() -> anyhow::Result<()> {
    let conn = open_store()?;
    ensure_schema(&conn)?;

    let mut app = App::new(conn);
    run_app(&mut app)
}
