//! Bridge between the synchronous draw/poll loop and the async HTTP client.
//! The app state queues [`ApiRequest`] values; the driver spawns each one as
//! a task on the tokio runtime and funnels its completion back through an
//! unbounded channel that the UI loop drains every tick. Results therefore
//! always apply on the UI thread, and slow responses never block drawing.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::models::Book;

use super::client::BookApi;
use super::error::ApiError;

/// Work the app state wants performed against the remote service.
#[derive(Debug)]
pub enum ApiRequest {
    /// Refetch the whole catalog. `generation` tags the eventual completion
    /// so the app can discard answers that a newer load has superseded.
    Load {
        generation: u64,
        sort_by_low_stock: bool,
    },
    /// Persist a brand-new record.
    Create { book: Book },
    /// Replace an existing record. `previous` is the pre-edit copy the app
    /// restores if the request fails.
    Update { previous: Book, book: Book },
    /// Remove a record. The name rides along for the notification text.
    Delete { id: String, name: String },
}

/// Completion of a previously dispatched request.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded {
        generation: u64,
        result: Result<Vec<Book>, ApiError>,
    },
    Created {
        name: String,
        result: Result<Book, ApiError>,
    },
    Updated {
        previous: Book,
        result: Result<Book, ApiError>,
    },
    Deleted {
        name: String,
        result: Result<(), ApiError>,
    },
}

/// Owns the API handle and the sending half of the completion channel.
pub struct ApiDriver {
    api: Arc<dyn BookApi>,
    handle: Handle,
    tx: Sender<ApiEvent>,
}

impl ApiDriver {
    /// Pair a driver with the receiver the UI loop should drain.
    pub fn new(api: Arc<dyn BookApi>, handle: Handle) -> (Self, Receiver<ApiEvent>) {
        let (tx, rx) = channel();
        (Self { api, handle, tx }, rx)
    }

    /// Fire one request as a detached task. The send at the end only fails if
    /// the UI loop has already shut down, in which case nobody is left to
    /// care about the result.
    pub fn dispatch(&self, request: ApiRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tracing::debug!(?request, "dispatching api request");
        self.handle.spawn(async move {
            let event = match request {
                ApiRequest::Load {
                    generation,
                    sort_by_low_stock,
                } => ApiEvent::Loaded {
                    generation,
                    result: api.list_books(sort_by_low_stock).await,
                },
                ApiRequest::Create { book } => ApiEvent::Created {
                    name: book.name.clone(),
                    result: api.create_book(&book).await,
                },
                ApiRequest::Update { previous, book } => ApiEvent::Updated {
                    previous,
                    result: api.update_book(&book).await,
                },
                ApiRequest::Delete { id, name } => ApiEvent::Deleted {
                    name,
                    result: api.delete_book(&id).await,
                },
            };
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;

    /// Records every call and answers from a canned list.
    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        books: Vec<Book>,
    }

    #[async_trait]
    impl BookApi for FakeApi {
        async fn list_books(&self, sort_by_low_stock: bool) -> Result<Vec<Book>, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("list sort={sort_by_low_stock}"));
            Ok(self.books.clone())
        }

        async fn create_book(&self, book: &Book) -> Result<Book, ApiError> {
            self.calls.lock().unwrap().push(format!("create {}", book.name));
            let mut created = book.clone();
            created.id = "fresh-id".to_string();
            Ok(created)
        }

        async fn update_book(&self, book: &Book) -> Result<Book, ApiError> {
            self.calls.lock().unwrap().push(format!("update {}", book.id));
            Ok(book.clone())
        }

        async fn delete_book(&self, id: &str) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(format!("delete {id}"));
            Ok(())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn load_round_trips_through_the_channel() {
        let mut book = Book::unsaved();
        book.id = "b1".to_string();
        book.name = "Dune".to_string();

        let api = Arc::new(FakeApi {
            books: vec![book],
            ..FakeApi::default()
        });
        let (driver, events) = ApiDriver::new(api.clone(), Handle::current());

        driver.dispatch(ApiRequest::Load {
            generation: 7,
            sort_by_low_stock: true,
        });

        let event = events
            .recv_timeout(Duration::from_secs(2))
            .expect("load completion");
        match event {
            ApiEvent::Loaded { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(api.calls.lock().unwrap().as_slice(), ["list sort=true"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn create_reports_the_record_name() {
        let api = Arc::new(FakeApi::default());
        let (driver, events) = ApiDriver::new(api, Handle::current());

        let mut book = Book::unsaved();
        book.name = "Emma".to_string();
        driver.dispatch(ApiRequest::Create { book });

        let event = events
            .recv_timeout(Duration::from_secs(2))
            .expect("create completion");
        match event {
            ApiEvent::Created { name, result } => {
                assert_eq!(name, "Emma");
                assert_eq!(result.unwrap().id, "fresh-id");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
