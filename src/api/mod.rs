//! Remote-service module split across logical submodules.

mod client;
mod driver;
mod error;

pub use client::{ApiClient, BookApi};
pub use driver::{ApiDriver, ApiEvent, ApiRequest};
pub use error::ApiError;
