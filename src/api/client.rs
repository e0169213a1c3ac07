//! Typed wrappers around the remote book service. Every method encapsulates
//! one endpoint so the rest of the codebase can stay focused on UI state
//! management, mirroring how the persistence layer was split before the
//! catalog moved behind a REST API.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Response;

use crate::models::Book;

use super::error::ApiError;

/// Host used when no override is configured. The development server the
/// original catalog UI talked to listens here.
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Environment variable that overrides the base URL.
const BASE_URL_ENV: &str = "BOOK_API_URL";
/// Query parameter that asks the server to sort by low-stock-alert priority.
/// The sort happens server-side; the client never re-orders locally.
const SORT_PARAM: &str = "sortByLowStockAlert";
/// Per-request deadline. Nothing retries, so a hung request should fail fast
/// enough for the notification footer to stay meaningful.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The four catalog operations the UI needs. Kept as a trait so the request
/// driver can be exercised against an in-process fake in tests.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Fetch every record, optionally sorted by low-stock priority.
    async fn list_books(&self, sort_by_low_stock: bool) -> Result<Vec<Book>, ApiError>;
    /// Persist a new record; the server assigns the identifier and echoes the
    /// stored record back.
    async fn create_book(&self, book: &Book) -> Result<Book, ApiError>;
    /// Replace an existing record; the server echoes the stored record back.
    async fn update_book(&self, book: &Book) -> Result<Book, ApiError>;
    /// Remove a record by identifier. The acknowledgment body is ignored.
    async fn delete_book(&self, id: &str) -> Result<(), ApiError>;
}

/// reqwest-backed implementation of [`BookApi`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the configured base URL, falling back to the
    /// compiled-in default when the environment variable is unset.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        let base_url = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/book", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        format!("{}/api/book/{}", self.base_url, id)
    }
}

/// Reject non-2xx answers before anyone tries to decode the body. The server
/// reports failures through status codes, not through a JSON envelope.
fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::UnexpectedStatus(status))
    }
}

#[async_trait]
impl BookApi for ApiClient {
    async fn list_books(&self, sort_by_low_stock: bool) -> Result<Vec<Book>, ApiError> {
        let mut request = self.http.get(self.collection_url());
        if sort_by_low_stock {
            request = request.query(&[(SORT_PARAM, "true")]);
        }
        let response = check_status(request.send().await?)?;
        Ok(response.json().await?)
    }

    async fn create_book(&self, book: &Book) -> Result<Book, ApiError> {
        let response = check_status(self.http.post(self.collection_url()).json(book).send().await?)?;
        Ok(response.json().await?)
    }

    async fn update_book(&self, book: &Book) -> Result<Book, ApiError> {
        let response = check_status(
            self.http
                .put(self.record_url(&book.id))
                .json(book)
                .send()
                .await?,
        )?;
        Ok(response.json().await?)
    }

    async fn delete_book(&self, id: &str) -> Result<(), ApiError> {
        check_status(self.http.delete(self.record_url(id)).send().await?)?;
        Ok(())
    }
}
