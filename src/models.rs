//! Domain models that mirror the JSON shape exchanged with the remote book
//! service and get passed throughout the TUI. The intent is that these types
//! stay light-weight data holders so other layers can focus on presentation
//! and request logic. Keeping the commentary here means later refactors can
//! reconstruct the wire-format assumptions even if other context is lost.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One book record as exchanged with the server. Field names follow the wire
/// format: the identifier travels as `_id`, the nested `stock` object uses
/// camelCase keys, and the enums serialize as snake_case strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Opaque identifier assigned by the server. An empty string marks a
    /// record that has not been persisted yet, which is why create requests
    /// omit the field entirely instead of sending `""`.
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Title displayed in the table and in notifications.
    pub name: String,
    /// Cover image URL. Kept as raw text so non-web references survive too.
    pub image: String,
    pub category: Category,
    /// Catalog code. The service treats this as an integer.
    pub code: i64,
    pub description: String,
    pub price: BookPrice,
    pub stock: BookStock,
}

/// Pricing sub-object. All three components are plain numbers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookPrice {
    pub price: f64,
    pub tax: f64,
    pub discount: f64,
}

/// Stock sub-object. The alert fields drive the derived low-stock indicator;
/// they are configuration, not state, so nothing outside the entry form ever
/// mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStock {
    pub unit: StockUnit,
    pub quantity: i64,
    /// Free-form date string; the server neither parses nor validates it.
    pub date: String,
    pub enable_low_stock_alert: bool,
    pub low_stock_alert_quantity: i64,
}

/// Fixed category enumeration. Serialized as snake_case to match the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fantasy,
    ScienceFiction,
    Romance,
    Mystery,
}

impl Category {
    /// All variants in display order, used by the form's select field.
    pub const ALL: [Category; 4] = [
        Category::Fantasy,
        Category::ScienceFiction,
        Category::Romance,
        Category::Mystery,
    ];

    /// Human-readable label shown in the table and the form.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Fantasy => "fantasy",
            Category::ScienceFiction => "science_fiction",
            Category::Romance => "romance",
            Category::Mystery => "mystery",
        }
    }

    /// Cycle forward through the enumeration, wrapping at the end.
    pub fn next(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Cycle backward through the enumeration, wrapping at the start.
    pub fn previous(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Unit of stock keeping. Serialized as snake_case to match the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockUnit {
    Piece,
    Box,
}

impl StockUnit {
    pub const ALL: [StockUnit; 2] = [StockUnit::Piece, StockUnit::Box];

    pub fn label(&self) -> &'static str {
        match self {
            StockUnit::Piece => "piece",
            StockUnit::Box => "box",
        }
    }

    pub fn next(&self) -> StockUnit {
        let idx = Self::ALL.iter().position(|u| u == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> StockUnit {
        // Two variants, so backward equals forward; kept separate so the form
        // can call the matching direction without special-casing.
        self.next()
    }
}

impl fmt::Display for StockUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Book {
    /// Blank record used when adding: all numerics zero, alerting enabled.
    /// These are the defaults the entry form starts from for a new book.
    pub fn unsaved() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            image: String::new(),
            category: Category::Fantasy,
            code: 0,
            description: String::new(),
            price: BookPrice::default(),
            stock: BookStock {
                unit: StockUnit::Piece,
                quantity: 0,
                date: String::new(),
                enable_low_stock_alert: true,
                low_stock_alert_quantity: 0,
            },
        }
    }

    /// Whether this record has been persisted by the server yet. Create vs.
    /// update decisions hang off this single check.
    pub fn is_unsaved(&self) -> bool {
        self.id.is_empty()
    }

    /// Derived display condition for the warning indicator in the stock
    /// column. Read-only: nothing in the UI ever writes it back.
    pub fn is_low_stock(&self) -> bool {
        self.stock.enable_low_stock_alert
            && self.stock.quantity < self.stock.low_stock_alert_quantity
    }
}

impl fmt::Display for Book {
    /// Write the book name to any formatter so the type plays nicely with
    /// widgets and notification text that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
