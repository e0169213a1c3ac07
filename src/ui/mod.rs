//! Ratatui front-end for the book inventory. `app` holds the state machine,
//! `screens` renders it, `forms` covers the modal editor, and `terminal`
//! owns the raw-mode event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
