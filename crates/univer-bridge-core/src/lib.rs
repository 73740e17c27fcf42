//! # univer-bridge-core
//!
//! Workbook object model for the Excel side of univer-bridge.
//!
//! This crate provides the types the transfer engine reads from and writes to:
//! - [`CellValue`] - Cell values (numbers, text, booleans, dates, times, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Style`] - Cell formatting (fonts, fills, borders, alignment, number formats)
//! - [`Workbook`], [`Worksheet`] - The document structures, including merges,
//!   autofilter, freeze panes, comments, pictures and conditional formats
//!
//! ## Example
//!
//! ```rust
//! use univer_bridge_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Data").unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42.0).unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::text("World")).unwrap();
//!
//! assert_eq!(sheet.last_row_used(), Some(1));
//! ```

pub mod cell;
pub mod comment;
pub mod conditional_format;
pub mod error;
pub mod picture;
pub mod style;
pub mod workbook;
pub mod worksheet;

#[cfg(feature = "serde")]
mod serde_util;

pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue};
pub use comment::CellComment;
pub use conditional_format::{
    CfColorValue, CfIconOperator, CfIconValue, CfOperator, CfRuleType, CfValue, CfValueType,
    ConditionalFormatRule, IconSetStyle, TimePeriod,
};
pub use error::{Error, Result};
pub use picture::{Picture, PictureFormat};
pub use workbook::Workbook;
pub use worksheet::{FreezePanes, Worksheet};

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle,
    FontStyle, HorizontalAlignment, NumberFormat, ReadingOrder, Style, StylePool, Theme,
    Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
