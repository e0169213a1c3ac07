//! Core library surface for the Book Inventory Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the wire types, the HTTP client and its dispatch bridge, and the
//! interactive application itself.
pub mod api;
pub mod logging;
pub mod models;
pub mod ui;

/// The remote-service layer: the concrete client, the trait it implements,
/// and the request/event pair the UI exchanges with the dispatch bridge.
pub use api::{ApiClient, ApiDriver, ApiEvent, ApiRequest, BookApi};

/// The primary domain types that other layers manipulate.
pub use models::{Book, Category, StockUnit};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
