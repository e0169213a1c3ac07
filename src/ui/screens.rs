//! Rendering for the inventory TUI. All widgets are rebuilt from [`App`]
//! state on every draw; nothing here mutates anything.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;

use crate::models::Book;

use super::app::{App, ConfirmBookDelete, Mode, Tab};
use super::forms::{BookForm, FieldKind, FieldPath};
use super::helpers::{centered_rect, ellipsize};

const TABS_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const DESCRIPTION_WIDTH: usize = 30;

pub(crate) fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT.min(area.height)),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT.min(area.height)),
        ])
        .split(area);

    draw_tabs(frame, chunks[0], app);

    match app.active_tab {
        Tab::Books => draw_book_table(frame, chunks[1], app),
        Tab::Others | Tab::Another => draw_placeholder(frame, chunks[1], app.active_tab),
    }

    draw_footer(frame, chunks[2], app);

    match &app.mode {
        Mode::EditingBook(form) => draw_book_form(frame, area, form),
        Mode::ConfirmDelete(confirm) => draw_confirm_delete(frame, area, confirm),
        Mode::Normal => {}
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.label())).collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == app.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Inventory"))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn draw_placeholder(frame: &mut Frame, area: Rect, tab: Tab) {
    let message = Paragraph::new(format!("{} has nothing to show yet.", tab.label()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(tab.label()));
    frame.render_widget(message, area);
}

fn draw_book_table(frame: &mut Frame, area: Rect, app: &App) {
    let title = table_title(app);

    if app.books.is_empty() {
        let text = if app.loading {
            "Loading books..."
        } else {
            "No books yet. Press '+' to add one."
        };
        let message = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(message, area);
        return;
    }

    let range = app.visible_range();
    let mut rows: Vec<Row> = app.books[range.clone()]
        .iter()
        .enumerate()
        .map(|(offset, book)| book_row(range.start + offset, book))
        .collect();

    // Pad short trailing pages so the table height stays stable while
    // flipping pages.
    for _ in 0..app.trailing_empty_rows() {
        rows.push(Row::new(vec![Cell::from("")]));
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Name"),
        Cell::from("Category"),
        Cell::from("Code"),
        Cell::from("Description"),
        Cell::from("Price"),
        Cell::from("Stock"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if range.contains(&app.selected) {
        state.select(Some(app.selected - range.start));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn book_row(index: usize, book: &Book) -> Row<'static> {
    let stock_text = format!("{} {}", book.stock.quantity, book.stock.unit.label());
    let stock_cell = if book.is_low_stock() {
        Cell::from(format!("{stock_text} !")).style(Style::default().fg(Color::Red))
    } else {
        Cell::from(stock_text)
    };

    Row::new(vec![
        Cell::from(format!("{}", index + 1)),
        Cell::from(book.name.clone()),
        Cell::from(book.category.label().to_string()),
        Cell::from(book.code.to_string()),
        Cell::from(ellipsize(&book.description, DESCRIPTION_WIDTH)),
        Cell::from(format!("{:.2}", book.price.price)),
        stock_cell,
    ])
}

fn table_title(app: &App) -> String {
    let mut title = format!(
        "Books ({}) - Page {}/{} - Size {}",
        app.books.len(),
        app.page + 1,
        app.page_count(),
        app.page_size.label(),
    );
    if app.filter_enabled {
        title.push_str(" - Low Stock First");
    }
    title
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let status_line = if let Some(notification) = &app.notification {
        Line::from(vec![Span::styled(
            notification.text.clone(),
            notification.kind.style(),
        )])
    } else if app.loading {
        Line::from(Span::styled(
            "Loading books...",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };

    let paragraph =
        Paragraph::new(vec![status_line, footer_instructions(app)]).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn footer_instructions(app: &App) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    match &app.mode {
        Mode::EditingBook(_) => Line::from(vec![
            Span::styled("[Tab]", key_style),
            Span::raw(" Next Field   "),
            Span::styled("[←→]", key_style),
            Span::raw(" Cycle   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Save   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Cancel"),
        ]),
        Mode::ConfirmDelete(_) => Line::from(vec![
            Span::styled("[y]", key_style),
            Span::raw(" Delete   "),
            Span::styled("[n]", key_style),
            Span::raw(" Cancel"),
        ]),
        Mode::Normal => Line::from(vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Select   "),
            Span::styled("[←→]", key_style),
            Span::raw(" Page   "),
            Span::styled("[s]", key_style),
            Span::raw(" Page Size   "),
            Span::styled("[f]", key_style),
            Span::raw(" Low Stock   "),
            Span::styled("[+]", key_style),
            Span::raw(" Add   "),
            Span::styled("[e]", key_style),
            Span::raw(" Edit   "),
            Span::styled("[d]", key_style),
            Span::raw(" Delete   "),
            Span::styled("[o]", key_style),
            Span::raw(" Cover   "),
            Span::styled("[r]", key_style),
            Span::raw(" Reload   "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ]),
    }
}

fn draw_book_form(frame: &mut Frame, area: Rect, form: &BookForm) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let title = if form.is_new() { "Add Book" } else { "Edit Book" };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Book Details",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for field in [
        FieldPath::Name,
        FieldPath::Image,
        FieldPath::Description,
        FieldPath::Category,
        FieldPath::Code,
    ] {
        lines.push(form.build_line(field));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Price and Stock",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for field in [
        FieldPath::PricePrice,
        FieldPath::PriceTax,
        FieldPath::PriceDiscount,
        FieldPath::StockUnit,
        FieldPath::StockQuantity,
        FieldPath::StockDate,
        FieldPath::StockLowStockAlertQuantity,
        FieldPath::StockEnableLowStockAlert,
    ] {
        lines.push(form.build_line(field));
    }

    lines.push(Line::from(""));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter saves, Esc cancels.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);

    // Place the cursor at the end of the active buffer so typing feels like
    // a normal input. Select and toggle fields have no cursor.
    if matches!(form.active.kind(), FieldKind::Text | FieldKind::Number) {
        if let Some(line_offset) = form_line_offset(form.active) {
            let label_len = form.active.label().len() as u16 + 2;
            let cursor_x = inner.x + label_len + form.value_len(form.active) as u16;
            let cursor_y = inner.y + line_offset;
            if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}

/// Row the field occupies inside the form popup, counting the section
/// headers and the blank spacer between sections.
fn form_line_offset(field: FieldPath) -> Option<u16> {
    let position = FieldPath::ORDER.iter().position(|other| *other == field)? as u16;
    // Details section: header at 0, fields at 1..=5. Price and stock:
    // spacer + header push everything after index 4 down by two more rows.
    if position < 5 {
        Some(position + 1)
    } else {
        Some(position + 3)
    }
}

fn draw_confirm_delete(frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
    let popup = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup);

    let block = Block::default().borders(Borders::ALL).title("Delete Book");
    let lines = vec![
        Line::from(format!("Permanently delete \"{}\"?", confirm.name)),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[y]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Delete   "),
            Span::styled(
                "[n]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Cancel"),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup);
}
