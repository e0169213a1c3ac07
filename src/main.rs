//! Binary entry point that glues the REST-backed domain model to the TUI.
//! Bootstrapping is deliberately linear: install logging, bring up a tokio
//! runtime for the HTTP client, wire the dispatch bridge, queue the initial
//! catalog load, and drive the Ratatui event loop until the user exits.
use std::sync::Arc;

use anyhow::Context;

use book_inventory_manager::{logging, run_app, ApiClient, ApiDriver, App};

/// Initialize logging and the HTTP client, then launch the Ratatui event
/// loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example a malformed base URL in the environment) to the terminal instead
/// of crashing silently.
fn main() -> anyhow::Result<()> {
    logging::init()?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let api = Arc::new(ApiClient::from_env()?);
    let (driver, events) = ApiDriver::new(api, runtime.handle().clone());

    let mut app = App::new();
    app.request_reload();
    run_app(&mut app, &driver, &events)
}
