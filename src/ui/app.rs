use std::cmp::min;
use std::mem;
use std::ops::Range;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::style::{Color, Style};
use ratatui::Frame;

use crate::api::{ApiEvent, ApiRequest};
use crate::models::Book;

use super::forms::{BookForm, FieldKind};
use super::helpers::surface_error;
use super::screens;

/// How long a transient notification stays on screen before the tick sweeps
/// it away.
pub(crate) const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level navigation tabs. Only Books carries real content; the other two
/// panels are placeholders kept so Tab/BackTab navigation has somewhere to
/// go.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Tab {
    Books,
    Others,
    Another,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Books, Tab::Others, Tab::Another];

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Tab::Books => "Books",
            Tab::Others => "Others",
            Tab::Another => "Another",
        }
    }

    fn next(&self) -> Tab {
        let idx = Self::ALL.iter().position(|tab| tab == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn previous(&self) -> Tab {
        let idx = Self::ALL.iter().position(|tab| tab == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Fine-grained modes scoped to the Books tab. Keeping this explicit makes
/// it easy to reason about which rendering path runs and what keyboard
/// shortcuts should do.
pub(crate) enum Mode {
    Normal,
    EditingBook(BookForm),
    ConfirmDelete(ConfirmBookDelete),
}

/// State for confirming a permanent book deletion.
pub(crate) struct ConfirmBookDelete {
    pub(crate) id: String,
    pub(crate) name: String,
}

/// Rows shown per table page. Mirrors the size options the catalog UI has
/// always offered, including a show-everything setting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PageSize {
    Five,
    Ten,
    TwentyFive,
    All,
}

impl PageSize {
    /// Row cap for the page, or `None` for the show-everything setting.
    pub(crate) fn limit(&self) -> Option<usize> {
        match self {
            PageSize::Five => Some(5),
            PageSize::Ten => Some(10),
            PageSize::TwentyFive => Some(25),
            PageSize::All => None,
        }
    }

    pub(crate) fn cycle(&self) -> PageSize {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::TwentyFive,
            PageSize::TwentyFive => PageSize::All,
            PageSize::All => PageSize::Five,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            PageSize::Five => "5",
            PageSize::Ten => "10",
            PageSize::TwentyFive => "25",
            PageSize::All => "All",
        }
    }
}

/// Severity of the footer notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum NotifyKind {
    Info,
    Error,
}

impl NotifyKind {
    pub(crate) fn style(&self) -> Style {
        match self {
            NotifyKind::Info => Style::default().fg(Color::Green),
            NotifyKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Single-slot transient message shown in the footer. A newer message
/// replaces whatever is showing; unrelated key presses never dismiss it.
pub(crate) struct Notification {
    pub(crate) text: String,
    pub(crate) kind: NotifyKind,
    pub(crate) raised: Instant,
}

/// Central application state shared across the TUI. All mutation happens on
/// the UI thread: key events call [`App::handle_key`], completed network
/// calls arrive through [`App::apply_event`], and outgoing work accumulates
/// in an internal queue the run loop drains with [`App::drain_requests`].
pub struct App {
    pub(crate) active_tab: Tab,
    pub(crate) books: Vec<Book>,
    /// Absolute index into `books`; the page follows the selection.
    pub(crate) selected: usize,
    pub(crate) page: usize,
    pub(crate) page_size: PageSize,
    pub(crate) filter_enabled: bool,
    pub(crate) loading: bool,
    pub(crate) mode: Mode,
    pub(crate) notification: Option<Notification>,
    /// Counter tagging each load request. Completions carrying an older
    /// generation are dropped, so a slow response can never clobber a newer
    /// one after rapid filter toggles.
    load_generation: u64,
    requests: Vec<ApiRequest>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::Books,
            books: Vec::new(),
            selected: 0,
            page: 0,
            page_size: PageSize::Five,
            filter_enabled: false,
            loading: false,
            mode: Mode::Normal,
            notification: None,
            load_generation: 0,
            requests: Vec::new(),
        }
    }

    /// Queue a full refetch of the catalog, honoring the current filter.
    /// Bumping the generation first means any response still in flight for
    /// an earlier load will be discarded on arrival. The notification slot
    /// is left alone so an operation message raised just before the reload
    /// (such as "Deleted X.") stays visible; the `loading` flag covers the
    /// in-flight footer text.
    pub fn request_reload(&mut self) {
        self.load_generation += 1;
        self.loading = true;
        self.requests.push(ApiRequest::Load {
            generation: self.load_generation,
            sort_by_low_stock: self.filter_enabled,
        });
    }

    /// Hand the queued requests to the caller for dispatch.
    pub fn drain_requests(&mut self) -> Vec<ApiRequest> {
        mem::take(&mut self.requests)
    }

    /// Housekeeping run once per draw cycle: expire the notification.
    pub fn tick(&mut self) {
        if let Some(notification) = &self.notification {
            if notification.raised.elapsed() >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::EditingBook(form) => self.handle_edit_book(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                return Mode::Normal;
            }
            KeyCode::Tab => {
                self.active_tab = self.active_tab.next();
                return Mode::Normal;
            }
            KeyCode::BackTab => {
                self.active_tab = self.active_tab.previous();
                return Mode::Normal;
            }
            _ => {}
        }

        // Everything below belongs to the Books tab; the placeholder tabs
        // only react to navigation and quit.
        if self.active_tab != Tab::Books {
            return Mode::Normal;
        }

        match code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => self.change_page(-1),
            KeyCode::Right => self.change_page(1),
            KeyCode::Char('s') => {
                self.page_size = self.page_size.cycle();
                // Changing the page size always snaps back to the first
                // page, and the selection must land inside it.
                self.page = 0;
                if !self.visible_range().contains(&self.selected) {
                    self.selected = 0;
                }
            }
            KeyCode::Char('f') => {
                self.filter_enabled = !self.filter_enabled;
                self.request_reload();
            }
            KeyCode::Char('r') => self.request_reload(),
            KeyCode::Char('x') => self.notification = None,
            KeyCode::Char('+') | KeyCode::Char('a') => {
                return Mode::EditingBook(BookForm::blank());
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(book) = self.current_book() {
                    return Mode::EditingBook(BookForm::from_book(book));
                }
                self.set_notification("No book selected to edit.", NotifyKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                if let Some(book) = self.current_book() {
                    return Mode::ConfirmDelete(ConfirmBookDelete {
                        id: book.id.clone(),
                        name: book.name.clone(),
                    });
                }
                self.set_notification("No book selected to delete.", NotifyKind::Error);
            }
            KeyCode::Char('o') => self.open_cover_image(),
            _ => {}
        }

        Mode::Normal
    }

    fn handle_edit_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Enter => match form.parse_inputs() {
                Ok(book) => {
                    self.submit_book(book);
                    return Mode::Normal;
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Right => form.cycle_forward(),
            KeyCode::Left => form.cycle_backward(),
            KeyCode::Char(' ') if form.active.kind() == FieldKind::Toggle => form.toggle(),
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            KeyCode::Backspace => form.backspace(),
            _ => {}
        }
        Mode::EditingBook(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                tracing::info!(id = %confirm.id, name = %confirm.name, "deleting book");
                self.requests.push(ApiRequest::Delete {
                    id: confirm.id,
                    name: confirm.name,
                });
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Mode::Normal,
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    /// Reconcile a completed form submission. An unsaved record turns into a
    /// create request followed by a reload (any local optimism is discarded
    /// when the fresh list arrives); an existing record is replaced locally
    /// right away, with the pre-edit copy riding along so a failed update
    /// can be rolled back.
    fn submit_book(&mut self, book: Book) {
        if book.is_unsaved() {
            tracing::info!(name = %book.name, "creating book");
            self.requests.push(ApiRequest::Create { book });
            return;
        }

        tracing::info!(id = %book.id, name = %book.name, "updating book");
        if let Some(slot) = self.books.iter_mut().find(|other| other.id == book.id) {
            let previous = slot.clone();
            *slot = book.clone();
            self.requests.push(ApiRequest::Update { previous, book });
        } else {
            // The record vanished from the local list (a reload raced the
            // edit). Send the update anyway; the echo reconciles on success
            // and the rollback is a no-op.
            self.requests.push(ApiRequest::Update {
                previous: book.clone(),
                book,
            });
        }
    }

    /// Apply one completed network call to the local state. Runs on the UI
    /// thread, so nothing here needs synchronization.
    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded { generation, result } => {
                if generation != self.load_generation {
                    tracing::debug!(generation, current = self.load_generation, "discarding stale load");
                    return;
                }
                self.loading = false;
                match result {
                    Ok(books) => {
                        self.books = books;
                        self.clamp_view();
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "failed to load books");
                        self.set_notification(
                            format!("Failed to load books: {err}"),
                            NotifyKind::Error,
                        );
                    }
                }
            }
            ApiEvent::Created { name, result } => match result {
                Ok(_) => {
                    self.set_notification(format!("Added {name}."), NotifyKind::Info);
                    self.request_reload();
                }
                Err(err) => {
                    tracing::error!(error = %err, name = %name, "failed to create book");
                    self.set_notification(
                        format!("Failed to add {name}: {err}"),
                        NotifyKind::Error,
                    );
                }
            },
            ApiEvent::Updated { previous, result } => match result {
                Ok(echo) => {
                    // Adopt the server's copy wholesale; it is authoritative
                    // over whatever we wrote optimistically.
                    if let Some(slot) = self.books.iter_mut().find(|other| other.id == echo.id) {
                        *slot = echo.clone();
                    }
                    self.set_notification(format!("Updated {}.", echo.name), NotifyKind::Info);
                }
                Err(err) => {
                    tracing::error!(error = %err, id = %previous.id, "failed to update book");
                    if let Some(slot) = self.books.iter_mut().find(|other| other.id == previous.id)
                    {
                        *slot = previous.clone();
                    }
                    self.set_notification(
                        format!("Failed to update {}: {err}", previous.name),
                        NotifyKind::Error,
                    );
                }
            },
            ApiEvent::Deleted { name, result } => match result {
                Ok(()) => {
                    self.set_notification(format!("Deleted {name}."), NotifyKind::Info);
                    self.request_reload();
                }
                Err(err) => {
                    // No reload here: the list only refreshes after a
                    // successful delete.
                    tracing::error!(error = %err, name = %name, "failed to delete book");
                    self.set_notification(
                        format!("Failed to delete {name}: {err}"),
                        NotifyKind::Error,
                    );
                }
            },
        }
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    /// Slice of `books` shown on the current page.
    pub(crate) fn visible_range(&self) -> Range<usize> {
        let len = self.books.len();
        match self.page_size.limit() {
            None => 0..len,
            Some(size) => {
                let start = min(self.page * size, len);
                start..min(start + size, len)
            }
        }
    }

    pub(crate) fn page_count(&self) -> usize {
        match self.page_size.limit() {
            None => 1,
            Some(size) => self.books.len().div_ceil(size).max(1),
        }
    }

    /// Blank rows padding the last page so every page renders at the same
    /// height. Only pages after the first need padding; the first page is
    /// short only when the whole catalog is.
    pub(crate) fn trailing_empty_rows(&self) -> usize {
        match self.page_size.limit() {
            None => 0,
            Some(size) => {
                if self.page == 0 {
                    0
                } else {
                    ((self.page + 1) * size).saturating_sub(self.books.len())
                }
            }
        }
    }

    fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
        // The page follows the selection across page boundaries.
        if let Some(size) = self.page_size.limit() {
            self.page = self.selected / size;
        }
    }

    fn change_page(&mut self, offset: isize) {
        let pages = self.page_count() as isize;
        let new = (self.page as isize + offset).clamp(0, pages - 1);
        self.page = new as usize;
        let range = self.visible_range();
        if !range.contains(&self.selected) {
            self.selected = range.start;
        }
    }

    /// Re-establish the view invariants after the list was replaced
    /// wholesale: selection inside the list, page inside the page count,
    /// selection inside the page.
    fn clamp_view(&mut self) {
        if self.books.is_empty() {
            self.selected = 0;
            self.page = 0;
            return;
        }
        self.selected = min(self.selected, self.books.len() - 1);
        self.page = min(self.page, self.page_count() - 1);
        if let Some(size) = self.page_size.limit() {
            if !self.visible_range().contains(&self.selected) {
                self.page = self.selected / size;
            }
        }
    }

    fn open_cover_image(&mut self) {
        let Some(book) = self.current_book() else {
            self.set_notification("No book selected.", NotifyKind::Error);
            return;
        };
        let link = book.image.trim().to_string();
        let name = book.name.clone();
        if link.is_empty() {
            self.set_notification(
                format!("{name} does not have a cover image."),
                NotifyKind::Error,
            );
        } else if let Err(err) = open_link(&link) {
            self.set_notification(
                format!("Failed to open cover image: {err}"),
                NotifyKind::Error,
            );
        } else {
            self.set_notification(format!("Opened cover of {name}."), NotifyKind::Info);
        }
    }

    pub(crate) fn set_notification(&mut self, text: impl Into<String>, kind: NotifyKind) {
        self.notification = Some(Notification {
            text: text.into(),
            kind,
            raised: Instant::now(),
        });
    }

    pub fn draw(&self, frame: &mut Frame) {
        screens::draw(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn book(id: &str, name: &str) -> Book {
        let mut book = Book::unsaved();
        book.id = id.to_string();
        book.name = name.to_string();
        book
    }

    fn populated(count: usize) -> App {
        let mut app = App::new();
        app.books = (0..count)
            .map(|idx| book(&format!("id-{idx}"), &format!("Book {idx}")))
            .collect();
        app
    }

    fn queued_load(app: &mut App) -> (u64, bool) {
        let requests = app.drain_requests();
        assert_eq!(requests.len(), 1, "expected exactly one queued request");
        match &requests[0] {
            ApiRequest::Load {
                generation,
                sort_by_low_stock,
            } => (*generation, *sort_by_low_stock),
            other => panic!("expected a load request, got {other:?}"),
        }
    }

    #[test]
    fn second_page_of_twelve_books_shows_indices_five_through_nine() {
        let mut app = populated(12);
        app.page = 1;
        assert_eq!(app.visible_range(), 5..10);
        assert_eq!(app.trailing_empty_rows(), 0);
    }

    #[test]
    fn last_page_is_padded_to_uniform_height() {
        let mut app = populated(12);
        app.page = 2;
        assert_eq!(app.visible_range(), 10..12);
        assert_eq!(app.trailing_empty_rows(), 3);
    }

    #[test]
    fn changing_page_size_resets_to_the_first_page() {
        let mut app = populated(30);
        app.page = 3;
        app.selected = 17;
        app.handle_key(KeyCode::Char('s')).unwrap();
        assert_eq!(app.page_size, PageSize::Ten);
        assert_eq!(app.page, 0);
        assert!(app.visible_range().contains(&app.selected) || app.selected == 0);
    }

    #[test]
    fn selection_drags_the_page_along() {
        let mut app = populated(12);
        app.selected = 4;
        app.move_selection(1);
        assert_eq!(app.selected, 5);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn filter_toggle_issues_sorted_then_unsorted_loads() {
        let mut app = populated(0);
        app.handle_key(KeyCode::Char('f')).unwrap();
        let (first_generation, first_sorted) = queued_load(&mut app);
        assert!(first_sorted);

        app.handle_key(KeyCode::Char('f')).unwrap();
        let (second_generation, second_sorted) = queued_load(&mut app);
        assert!(!second_sorted);
        assert!(second_generation > first_generation);
    }

    #[test]
    fn stale_load_completions_are_discarded() {
        let mut app = App::new();
        app.request_reload();
        let (first_generation, _) = queued_load(&mut app);
        app.request_reload();
        let (second_generation, _) = queued_load(&mut app);

        // The slow first response arrives after the second was requested.
        app.apply_event(ApiEvent::Loaded {
            generation: first_generation,
            result: Ok(vec![book("stale", "Stale")]),
        });
        assert!(app.books.is_empty(), "stale response must not apply");
        assert!(app.loading);

        app.apply_event(ApiEvent::Loaded {
            generation: second_generation,
            result: Ok(vec![book("fresh", "Fresh")]),
        });
        assert_eq!(app.books.len(), 1);
        assert_eq!(app.books[0].id, "fresh");
        assert!(!app.loading);
    }

    #[test]
    fn load_failure_keeps_the_stale_list_and_notifies() {
        let mut app = populated(2);
        app.request_reload();
        let (generation, _) = queued_load(&mut app);
        app.apply_event(ApiEvent::Loaded {
            generation,
            result: Err(ApiError::UnexpectedStatus(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            )),
        });
        assert_eq!(app.books.len(), 2);
        let notification = app.notification.as_ref().expect("failure notification");
        assert_eq!(notification.kind, NotifyKind::Error);
    }

    #[test]
    fn submitting_an_unsaved_record_queues_a_create_and_leaves_books_alone() {
        let mut app = populated(3);
        let mut fresh = Book::unsaved();
        fresh.name = "New Arrival".to_string();
        app.submit_book(fresh);

        assert_eq!(app.books.len(), 3, "create must not mutate locally");
        let requests = app.drain_requests();
        assert!(matches!(&requests[..], [ApiRequest::Create { book }] if book.name == "New Arrival"));
    }

    #[test]
    fn create_success_triggers_a_full_reload() {
        let mut app = populated(0);
        app.apply_event(ApiEvent::Created {
            name: "New Arrival".to_string(),
            result: Ok(book("assigned", "New Arrival")),
        });
        let (_, sorted) = queued_load(&mut app);
        assert!(!sorted);
        let notification = app.notification.as_ref().expect("create notification");
        assert!(notification.text.contains("New Arrival"));
    }

    #[test]
    fn submitting_an_existing_record_replaces_exactly_the_matching_book() {
        let mut app = populated(3);
        let mut edited = app.books[1].clone();
        edited.name = "Renamed".to_string();
        app.submit_book(edited.clone());

        assert_eq!(app.books[1], edited);
        assert_eq!(app.books[0].name, "Book 0");
        assert_eq!(app.books[2].name, "Book 2");

        let requests = app.drain_requests();
        match &requests[..] {
            [ApiRequest::Update { previous, book }] => {
                assert_eq!(previous.name, "Book 1");
                assert_eq!(book.name, "Renamed");
            }
            other => panic!("expected an update request, got {other:?}"),
        }
    }

    #[test]
    fn update_success_adopts_the_server_echo() {
        let mut app = populated(2);
        let mut echo = app.books[0].clone();
        echo.name = "Server Truth".to_string();
        app.apply_event(ApiEvent::Updated {
            previous: app.books[0].clone(),
            result: Ok(echo.clone()),
        });
        assert_eq!(app.books[0], echo);
        assert!(app.drain_requests().is_empty(), "no reload after update");
    }

    #[test]
    fn update_failure_rolls_back_to_the_pre_edit_record() {
        let mut app = populated(2);
        let previous = app.books[0].clone();
        let mut edited = previous.clone();
        edited.name = "Optimistic".to_string();
        app.submit_book(edited);
        app.drain_requests();
        assert_eq!(app.books[0].name, "Optimistic");

        app.apply_event(ApiEvent::Updated {
            previous: previous.clone(),
            result: Err(ApiError::UnexpectedStatus(
                reqwest::StatusCode::BAD_GATEWAY,
            )),
        });
        assert_eq!(app.books[0], previous, "failed update must roll back");
        let notification = app.notification.as_ref().expect("failure notification");
        assert_eq!(notification.kind, NotifyKind::Error);
        assert!(notification.text.contains(&previous.name));
    }

    #[test]
    fn delete_success_reloads_and_names_the_record() {
        let mut app = populated(1);
        app.apply_event(ApiEvent::Deleted {
            name: "Book 0".to_string(),
            result: Ok(()),
        });
        queued_load(&mut app);
        let notification = app.notification.as_ref().expect("delete notification");
        assert!(notification.text.contains("Book 0"));
    }

    #[test]
    fn delete_failure_does_not_reload() {
        let mut app = populated(1);
        app.apply_event(ApiEvent::Deleted {
            name: "Book 0".to_string(),
            result: Err(ApiError::UnexpectedStatus(
                reqwest::StatusCode::NOT_FOUND,
            )),
        });
        assert!(app.drain_requests().is_empty());
        let notification = app.notification.as_ref().expect("failure notification");
        assert_eq!(notification.kind, NotifyKind::Error);
    }

    #[test]
    fn success_notification_survives_the_follow_up_reload() {
        let mut app = populated(1);
        app.apply_event(ApiEvent::Deleted {
            name: "Book 0".to_string(),
            result: Ok(()),
        });
        let (generation, _) = queued_load(&mut app);
        assert_eq!(app.notification.as_ref().unwrap().text, "Deleted Book 0.");

        // The reload finishing must not replace the record-naming message.
        app.apply_event(ApiEvent::Loaded {
            generation,
            result: Ok(Vec::new()),
        });
        assert_eq!(app.notification.as_ref().unwrap().text, "Deleted Book 0.");
        assert!(!app.loading);
    }

    #[test]
    fn manual_reload_does_not_clobber_a_fresh_error() {
        let mut app = populated(2);
        app.set_notification("Failed to update Book 0: bad gateway", NotifyKind::Error);
        app.handle_key(KeyCode::Char('r')).unwrap();
        let (generation, _) = queued_load(&mut app);

        let notification = app.notification.as_ref().expect("error still showing");
        assert_eq!(notification.kind, NotifyKind::Error);

        app.apply_event(ApiEvent::Loaded {
            generation,
            result: Ok(app.books.clone()),
        });
        let notification = app.notification.as_ref().expect("error still showing");
        assert_eq!(notification.kind, NotifyKind::Error);
    }

    #[test]
    fn confirm_dialog_queues_the_delete_only_on_yes() {
        let mut app = populated(2);
        app.handle_key(KeyCode::Char('d')).unwrap();
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        app.handle_key(KeyCode::Char('n')).unwrap();
        assert!(matches!(app.mode, Mode::Normal));
        assert!(app.drain_requests().is_empty());

        app.handle_key(KeyCode::Char('d')).unwrap();
        app.handle_key(KeyCode::Char('y')).unwrap();
        let requests = app.drain_requests();
        assert!(matches!(&requests[..], [ApiRequest::Delete { id, .. }] if id == "id-0"));
    }

    #[test]
    fn notifications_replace_and_expire() {
        let mut app = App::new();
        app.set_notification("first", NotifyKind::Info);
        app.set_notification("second", NotifyKind::Error);
        assert_eq!(app.notification.as_ref().unwrap().text, "second");

        // Nothing expires while the message is fresh.
        app.tick();
        assert!(app.notification.is_some());

        app.notification = Some(Notification {
            text: "old".to_string(),
            kind: NotifyKind::Info,
            raised: Instant::now() - NOTIFICATION_TTL,
        });
        app.tick();
        assert!(app.notification.is_none());
    }

    #[test]
    fn placeholder_tabs_ignore_list_shortcuts() {
        let mut app = populated(2);
        app.handle_key(KeyCode::Tab).unwrap();
        assert_eq!(app.active_tab, Tab::Others);
        app.handle_key(KeyCode::Char('a')).unwrap();
        assert!(matches!(app.mode, Mode::Normal), "no modal outside Books");
        app.handle_key(KeyCode::BackTab).unwrap();
        assert_eq!(app.active_tab, Tab::Books);
    }
}
