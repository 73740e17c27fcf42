//! The async boundary to a live Univer document.
//!
//! Every call names its sheet and range explicitly; implementations keep
//! no "active sheet" or "active range" between calls.

use async_trait::async_trait;

use crate::comment::{Comment, User};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::Result;
use crate::image::{ImageInfo, NewImage};
use crate::range::RangeSpec;
use crate::sheet::{Freeze, MergeStrategy, SheetInfo};
use crate::style::{BorderStyleType, BorderType, FontProperties, StyleData};
use crate::value::{FormulaMatrix, ValueMatrix};

/// Remote handle to a spreadsheet document
#[async_trait]
pub trait UniverAgent: Send + Sync {
    // Reads

    /// Every sheet, in tab order
    async fn sheets_info(&self) -> Result<Vec<SheetInfo>>;

    /// Values of `range`, one row per range row
    async fn values(&self, sheet: &str, range: RangeSpec) -> Result<ValueMatrix>;

    /// Formulas of `range`; cells without a formula hold `""`
    async fn formulas(&self, sheet: &str, range: RangeSpec) -> Result<FormulaMatrix>;

    /// Style records of `range`; `None` for unstyled cells
    async fn styles(&self, sheet: &str, range: RangeSpec) -> Result<Vec<Vec<Option<StyleData>>>>;

    async fn merges(&self, sheet: &str) -> Result<Vec<RangeSpec>>;

    /// The filter range, if the sheet has a filter
    async fn filter(&self, sheet: &str) -> Result<Option<RangeSpec>>;

    async fn freeze(&self, sheet: &str) -> Result<Freeze>;

    async fn comments(&self, sheet: &str) -> Result<Vec<Comment>>;

    async fn image_ids(&self, sheet: &str) -> Result<Vec<String>>;

    /// Image placement; `source` may be left empty by the agent
    async fn image(&self, sheet: &str, id: &str) -> Result<ImageInfo>;

    /// Image payload as a data URI
    async fn image_source(&self, sheet: &str, id: &str) -> Result<String>;

    /// Widths in pixels, one per requested column
    async fn column_widths(&self, sheet: &str, columns: &[i32]) -> Result<Vec<f64>>;

    /// Heights in pixels, one per requested row
    async fn row_heights(&self, sheet: &str, rows: &[i32]) -> Result<Vec<f64>>;

    async fn conditional_formats(&self, sheet: &str) -> Result<Vec<ConditionalFormatRule>>;

    // Writes

    /// Append a sheet sized `row_count` x `column_count`
    async fn add_sheet(
        &self,
        name: &str,
        row_count: i32,
        column_count: i32,
        tab_color: Option<&str>,
    ) -> Result<SheetInfo>;

    async fn set_values(&self, sheet: &str, range: RangeSpec, values: ValueMatrix) -> Result<()>;

    /// Write formulas; empty strings leave the cell untouched
    async fn set_formulas(
        &self,
        sheet: &str,
        range: RangeSpec,
        formulas: FormulaMatrix,
    ) -> Result<()>;

    async fn set_font_properties(
        &self,
        sheet: &str,
        range: RangeSpec,
        properties: &FontProperties,
    ) -> Result<()>;

    async fn set_border_style(
        &self,
        sheet: &str,
        range: RangeSpec,
        border: BorderType,
        style: BorderStyleType,
        color: &str,
    ) -> Result<()>;

    async fn merge(&self, sheet: &str, range: RangeSpec, strategy: MergeStrategy) -> Result<()>;

    async fn create_filter(&self, sheet: &str, range: RangeSpec) -> Result<()>;

    async fn set_freeze(&self, sheet: &str, rows: u32, columns: u32) -> Result<()>;

    async fn insert_comment(&self, sheet: &str, comment: Comment) -> Result<()>;

    async fn add_image(&self, sheet: &str, image: NewImage) -> Result<()>;

    async fn add_conditional_format(&self, sheet: &str, rule: ConditionalFormatRule)
        -> Result<()>;

    /// Set a column width in pixels
    async fn set_column_width(&self, sheet: &str, column: i32, width: f64) -> Result<()>;

    /// Set a row height in pixels
    async fn set_row_height(&self, sheet: &str, row: i32, height: f64) -> Result<()>;
}

/// Lookup of session users
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user(&self, id: &str) -> Result<User>;

    /// The user performing the transfer
    async fn current_user(&self) -> Result<User>;
}
