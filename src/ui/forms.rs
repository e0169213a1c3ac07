use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, BookPrice, BookStock, Category, StockUnit};

/// Every editable slot in a book record, one variant per dotted wire path.
/// Enumerating the paths (instead of splitting strings at runtime) means a
/// typo in a field address is a compile error, and each field can declare
/// what kind of editing it supports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FieldPath {
    Name,
    Image,
    Description,
    Category,
    Code,
    PricePrice,
    PriceTax,
    PriceDiscount,
    StockUnit,
    StockQuantity,
    StockDate,
    StockLowStockAlertQuantity,
    StockEnableLowStockAlert,
}

/// How a field is edited and how its buffer is coerced on submit. Coercion is
/// driven by this declaration, never by whether the entered text happens to
/// look numeric.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Number,
    Select,
    Toggle,
}

impl FieldPath {
    /// Focus traversal order for the form. Grouped the way the form renders:
    /// book details first, then price and stock.
    pub(crate) const ORDER: [FieldPath; 13] = [
        FieldPath::Name,
        FieldPath::Image,
        FieldPath::Description,
        FieldPath::Category,
        FieldPath::Code,
        FieldPath::PricePrice,
        FieldPath::PriceTax,
        FieldPath::PriceDiscount,
        FieldPath::StockUnit,
        FieldPath::StockQuantity,
        FieldPath::StockDate,
        FieldPath::StockLowStockAlertQuantity,
        FieldPath::StockEnableLowStockAlert,
    ];

    /// Dotted wire path this variant stands for.
    pub(crate) fn path(&self) -> &'static str {
        match self {
            FieldPath::Name => "name",
            FieldPath::Image => "image",
            FieldPath::Description => "description",
            FieldPath::Category => "category",
            FieldPath::Code => "code",
            FieldPath::PricePrice => "price.price",
            FieldPath::PriceTax => "price.tax",
            FieldPath::PriceDiscount => "price.discount",
            FieldPath::StockUnit => "stock.unit",
            FieldPath::StockQuantity => "stock.quantity",
            FieldPath::StockDate => "stock.date",
            FieldPath::StockLowStockAlertQuantity => "stock.lowStockAlertQuantity",
            FieldPath::StockEnableLowStockAlert => "stock.enableLowStockAlert",
        }
    }

    /// Inverse of [`FieldPath::path`].
    pub(crate) fn from_path(path: &str) -> Option<FieldPath> {
        Self::ORDER.iter().copied().find(|field| field.path() == path)
    }

    pub(crate) fn kind(&self) -> FieldKind {
        match self {
            FieldPath::Name
            | FieldPath::Image
            | FieldPath::Description
            | FieldPath::StockDate => FieldKind::Text,
            FieldPath::Code
            | FieldPath::PricePrice
            | FieldPath::PriceTax
            | FieldPath::PriceDiscount
            | FieldPath::StockQuantity
            | FieldPath::StockLowStockAlertQuantity => FieldKind::Number,
            FieldPath::Category | FieldPath::StockUnit => FieldKind::Select,
            FieldPath::StockEnableLowStockAlert => FieldKind::Toggle,
        }
    }

    /// Label rendered in front of the field value.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            FieldPath::Name => "Name",
            FieldPath::Image => "Image",
            FieldPath::Description => "Description",
            FieldPath::Category => "Category",
            FieldPath::Code => "Code",
            FieldPath::PricePrice => "Price",
            FieldPath::PriceTax => "Tax",
            FieldPath::PriceDiscount => "Discount",
            FieldPath::StockUnit => "Unit",
            FieldPath::StockQuantity => "Quantity",
            FieldPath::StockDate => "Stock Date",
            FieldPath::StockLowStockAlertQuantity => "Low Stock At",
            FieldPath::StockEnableLowStockAlert => "Low Stock Alert",
        }
    }
}

/// Form state for creating or editing a book. Text and numeric fields keep
/// raw string buffers while the user types; nothing is converted until
/// submit, so an entry like "12a" in a numeric field stays visible exactly as
/// typed and is reported as an error rather than silently mistyped.
#[derive(Clone)]
pub(crate) struct BookForm {
    /// Identifier of the record being edited; empty for a new record. The
    /// form never shows it, it only rides along to the submit payload.
    id: String,
    name: String,
    image: String,
    description: String,
    code: String,
    price: String,
    tax: String,
    discount: String,
    quantity: String,
    date: String,
    alert_quantity: String,
    category: Category,
    unit: StockUnit,
    enable_alert: bool,
    pub(crate) active: FieldPath,
    pub(crate) error: Option<String>,
}

impl BookForm {
    /// Blank form with the standard defaults for a new record.
    pub(crate) fn blank() -> Self {
        Self::from_book(&Book::unsaved())
    }

    /// Populate the form from an existing record when entering edit mode.
    pub(crate) fn from_book(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            image: book.image.clone(),
            description: book.description.clone(),
            code: book.code.to_string(),
            price: format_number(book.price.price),
            tax: format_number(book.price.tax),
            discount: format_number(book.price.discount),
            quantity: book.stock.quantity.to_string(),
            date: book.stock.date.clone(),
            alert_quantity: book.stock.low_stock_alert_quantity.to_string(),
            category: book.category,
            unit: book.stock.unit,
            enable_alert: book.stock.enable_low_stock_alert,
            active: FieldPath::Name,
            error: None,
        }
    }

    /// True while the form edits a record the server has never seen.
    pub(crate) fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Move focus to the next field in traversal order, wrapping at the end.
    pub(crate) fn focus_next(&mut self) {
        let idx = Self::position(self.active);
        self.active = FieldPath::ORDER[(idx + 1) % FieldPath::ORDER.len()];
    }

    /// Move focus to the previous field, wrapping at the start.
    pub(crate) fn focus_previous(&mut self) {
        let idx = Self::position(self.active);
        self.active = FieldPath::ORDER[(idx + FieldPath::ORDER.len() - 1) % FieldPath::ORDER.len()];
    }

    fn position(field: FieldPath) -> usize {
        FieldPath::ORDER
            .iter()
            .position(|candidate| *candidate == field)
            .unwrap_or(0)
    }

    /// Append a character to the active buffer. Select and toggle fields
    /// ignore typed characters; they are driven by [`BookForm::cycle_forward`]
    /// and [`BookForm::toggle`].
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let accepted = match self.active.kind() {
            FieldKind::Text | FieldKind::Number => {
                if let Some(buffer) = self.buffer_mut(self.active) {
                    buffer.push(ch);
                    true
                } else {
                    false
                }
            }
            FieldKind::Select | FieldKind::Toggle => false,
        };
        if accepted {
            self.error = None;
        }
        accepted
    }

    /// Remove the last character from the active buffer.
    pub(crate) fn backspace(&mut self) {
        if let Some(buffer) = self.buffer_mut(self.active) {
            buffer.pop();
            self.error = None;
        }
    }

    /// Advance the active select field, or flip the toggle.
    pub(crate) fn cycle_forward(&mut self) {
        match self.active {
            FieldPath::Category => self.category = self.category.next(),
            FieldPath::StockUnit => self.unit = self.unit.next(),
            FieldPath::StockEnableLowStockAlert => self.toggle(),
            _ => {}
        }
    }

    /// Step the active select field backward, or flip the toggle.
    pub(crate) fn cycle_backward(&mut self) {
        match self.active {
            FieldPath::Category => self.category = self.category.previous(),
            FieldPath::StockUnit => self.unit = self.unit.previous(),
            FieldPath::StockEnableLowStockAlert => self.toggle(),
            _ => {}
        }
    }

    /// Flip the low-stock-alert toggle if it is the active field.
    pub(crate) fn toggle(&mut self) {
        if self.active == FieldPath::StockEnableLowStockAlert {
            self.enable_alert = !self.enable_alert;
            self.error = None;
        }
    }

    /// Borrow the raw buffer behind a text or numeric field. Select and
    /// toggle fields have no buffer.
    pub(crate) fn buffer(&self, field: FieldPath) -> Option<&str> {
        match field {
            FieldPath::Name => Some(&self.name),
            FieldPath::Image => Some(&self.image),
            FieldPath::Description => Some(&self.description),
            FieldPath::Code => Some(&self.code),
            FieldPath::PricePrice => Some(&self.price),
            FieldPath::PriceTax => Some(&self.tax),
            FieldPath::PriceDiscount => Some(&self.discount),
            FieldPath::StockQuantity => Some(&self.quantity),
            FieldPath::StockDate => Some(&self.date),
            FieldPath::StockLowStockAlertQuantity => Some(&self.alert_quantity),
            FieldPath::Category | FieldPath::StockUnit | FieldPath::StockEnableLowStockAlert => {
                None
            }
        }
    }

    fn buffer_mut(&mut self, field: FieldPath) -> Option<&mut String> {
        match field {
            FieldPath::Name => Some(&mut self.name),
            FieldPath::Image => Some(&mut self.image),
            FieldPath::Description => Some(&mut self.description),
            FieldPath::Code => Some(&mut self.code),
            FieldPath::PricePrice => Some(&mut self.price),
            FieldPath::PriceTax => Some(&mut self.tax),
            FieldPath::PriceDiscount => Some(&mut self.discount),
            FieldPath::StockQuantity => Some(&mut self.quantity),
            FieldPath::StockDate => Some(&mut self.date),
            FieldPath::StockLowStockAlertQuantity => Some(&mut self.alert_quantity),
            FieldPath::Category | FieldPath::StockUnit | FieldPath::StockEnableLowStockAlert => {
                None
            }
        }
    }

    /// Character count of a field's buffer, used for cursor placement.
    pub(crate) fn value_len(&self, field: FieldPath) -> usize {
        self.buffer(field).map_or(0, |value| value.chars().count())
    }

    /// Validate the buffers and return a typed record ready to submit.
    /// Numeric fields parse according to their declared kind; a buffer that
    /// fails to parse is left untouched and the error names the field.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let code = parse_integer(&self.code, FieldPath::Code.label())?;
        let price = parse_number(&self.price, FieldPath::PricePrice.label())?;
        let tax = parse_number(&self.tax, FieldPath::PriceTax.label())?;
        let discount = parse_number(&self.discount, FieldPath::PriceDiscount.label())?;
        let quantity = parse_integer(&self.quantity, FieldPath::StockQuantity.label())?;
        let alert_quantity = parse_integer(
            &self.alert_quantity,
            FieldPath::StockLowStockAlertQuantity.label(),
        )?;

        Ok(Book {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            image: self.image.trim().to_string(),
            category: self.category,
            code,
            description: self.description.trim().to_string(),
            price: BookPrice {
                price,
                tax,
                discount,
            },
            stock: BookStock {
                unit: self.unit,
                quantity,
                date: self.date.trim().to_string(),
                enable_low_stock_alert: self.enable_alert,
                low_stock_alert_quantity: alert_quantity,
            },
        })
    }

    /// Render a styled line for the modal form. Select fields show arrows
    /// when active, the toggle renders as a checkbox.
    pub(crate) fn build_line(&self, field: FieldPath) -> Line<'static> {
        let is_active = self.active == field;
        let label = format!("{}: ", field.label());

        let (display, empty) = match field.kind() {
            FieldKind::Select => {
                let value = match field {
                    FieldPath::Category => self.category.label().to_string(),
                    _ => self.unit.label().to_string(),
                };
                if is_active {
                    (format!("< {value} >"), false)
                } else {
                    (value, false)
                }
            }
            FieldKind::Toggle => {
                let mark = if self.enable_alert { "[x]" } else { "[ ]" };
                (format!("{mark} enabled"), false)
            }
            FieldKind::Text | FieldKind::Number => {
                let value = self.buffer(field).unwrap_or_default();
                if value.is_empty() {
                    ("<empty>".to_string(), true)
                } else {
                    (value.to_string(), false)
                }
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if empty {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![Span::raw(label), Span::styled(display, style)])
    }
}

/// Render a float without a trailing `.0` so integral prices edit cleanly.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parse an integer buffer; an empty buffer falls back to zero, matching the
/// blank-form defaults. The error is a single field-naming message, not a
/// wrapped `ParseIntError`, so it reads the same whichever end of the chain
/// a caller surfaces.
fn parse_integer(raw: &str, label: &str) -> Result<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| anyhow!("{label} must be a whole number."))
}

/// Parse a float buffer; an empty buffer falls back to zero.
fn parse_number(raw: &str, label: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("{label} must be a number."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::helpers::surface_error;

    fn type_into(form: &mut BookForm, field: FieldPath, text: &str) {
        form.active = field;
        while form.value_len(field) > 0 {
            form.backspace();
        }
        for ch in text.chars() {
            form.push_char(ch);
        }
    }

    #[test]
    fn blank_form_uses_safe_defaults() {
        let book = BookForm::blank().parse_inputs().unwrap();
        assert!(book.is_unsaved());
        assert_eq!(book.code, 0);
        assert_eq!(book.price.price, 0.0);
        assert_eq!(book.stock.quantity, 0);
        assert!(book.stock.enable_low_stock_alert);
    }

    #[test]
    fn edit_round_trips_an_existing_record() {
        let mut original = Book::unsaved();
        original.id = "b7".to_string();
        original.name = "Emma".to_string();
        original.code = 31;
        original.price.price = 9.75;
        original.stock.quantity = 4;
        original.stock.low_stock_alert_quantity = 2;

        let book = BookForm::from_book(&original).parse_inputs().unwrap();
        assert_eq!(book, original);
    }

    #[test]
    fn numeric_buffer_parses_to_a_number() {
        let mut form = BookForm::blank();
        type_into(&mut form, FieldPath::Code, "12");
        assert_eq!(form.parse_inputs().unwrap().code, 12);
    }

    #[test]
    fn malformed_numeric_buffer_is_retained_and_reported() {
        let mut form = BookForm::blank();
        type_into(&mut form, FieldPath::Code, "12a");

        // The buffer stays exactly as typed instead of being coerced.
        assert_eq!(form.buffer(FieldPath::Code), Some("12a"));

        let err = form.parse_inputs().unwrap_err();
        assert_eq!(surface_error(&err), "Code must be a whole number.");

        // Still as typed after the failed submit.
        assert_eq!(form.buffer(FieldPath::Code), Some("12a"));
    }

    #[test]
    fn malformed_price_buffer_reports_the_field() {
        let mut form = BookForm::blank();
        type_into(&mut form, FieldPath::PricePrice, "9.9.9");

        let err = form.parse_inputs().unwrap_err();
        // The message is the whole chain, so both ends surface the same text.
        assert_eq!(err.to_string(), "Price must be a number.");
        assert_eq!(surface_error(&err), "Price must be a number.");
    }

    #[test]
    fn numeric_looking_text_stays_text() {
        let mut form = BookForm::blank();
        type_into(&mut form, FieldPath::Name, "1984");
        assert_eq!(form.parse_inputs().unwrap().name, "1984");
    }

    #[test]
    fn toggle_flips_only_when_active() {
        let mut form = BookForm::blank();
        form.active = FieldPath::Name;
        form.toggle();
        assert!(form.parse_inputs().unwrap().stock.enable_low_stock_alert);

        form.active = FieldPath::StockEnableLowStockAlert;
        form.toggle();
        assert!(!form.parse_inputs().unwrap().stock.enable_low_stock_alert);
    }

    #[test]
    fn select_fields_cycle_instead_of_accepting_text() {
        let mut form = BookForm::blank();
        form.active = FieldPath::Category;
        assert!(!form.push_char('x'));
        form.cycle_forward();
        assert_eq!(form.parse_inputs().unwrap().category, Category::ScienceFiction);
        form.cycle_backward();
        assert_eq!(form.parse_inputs().unwrap().category, Category::Fantasy);
    }

    #[test]
    fn focus_wraps_around_the_field_order() {
        let mut form = BookForm::blank();
        assert_eq!(form.active, FieldPath::Name);
        form.focus_previous();
        assert_eq!(form.active, FieldPath::StockEnableLowStockAlert);
        form.focus_next();
        assert_eq!(form.active, FieldPath::Name);
    }

    #[test]
    fn field_paths_round_trip() {
        for field in FieldPath::ORDER {
            assert_eq!(FieldPath::from_path(field.path()), Some(field));
        }
        assert_eq!(FieldPath::from_path("price.price"), Some(FieldPath::PricePrice));
        assert_eq!(FieldPath::from_path("price.unknown"), None);
    }
}
