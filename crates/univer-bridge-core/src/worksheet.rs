//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::comment::CellComment;
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::picture::Picture;
use crate::style::{Color, Style};
use crate::{MAX_COLS, MAX_ROWS};

/// Default row height in points
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Default column width in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

static EMPTY_VALUE: CellValue = CellValue::Empty;

/// Frozen rows and columns at the top-left of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FreezePanes {
    /// Number of frozen rows
    pub rows: u32,
    /// Number of frozen columns
    pub cols: u16,
}

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worksheet {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    tab_color: Option<Color>,
    #[cfg_attr(feature = "serde", serde(default))]
    cells: CellStorage,
    #[cfg_attr(feature = "serde", serde(default))]
    merged_regions: Vec<CellRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    auto_filter: Option<CellRange>,
    #[cfg_attr(feature = "serde", serde(default))]
    freeze_panes: Option<FreezePanes>,
    #[cfg_attr(feature = "serde", serde(default))]
    row_heights: BTreeMap<u32, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    column_widths: BTreeMap<u16, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pictures: Vec<Picture>,
    #[cfg_attr(feature = "serde", serde(default))]
    conditional_formats: Vec<ConditionalFormatRule>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            tab_color: None,
            cells: CellStorage::new(),
            merged_regions: Vec::new(),
            auto_filter: None,
            freeze_panes: None,
            row_heights: BTreeMap::new(),
            column_widths: BTreeMap::new(),
            pictures: Vec::new(),
            conditional_formats: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tab color
    pub fn tab_color(&self) -> Option<Color> {
        self.tab_color
    }

    /// Set the tab color
    pub fn set_tab_color(&mut self, color: Option<Color>) {
        self.tab_color = color;
    }

    // === Cell Access ===

    fn check_bounds(row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get the value of a cell ([`CellValue::Empty`] when unset)
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        self.cells.get(row, col).map_or(&EMPTY_VALUE, |c| &c.value)
    }

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        Self::check_bounds(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a formula (with or without leading `=`)
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        self.set_cell_value_at(row, col, CellValue::formula(formula))
    }

    /// Style of a cell, falling back to the sheet's default style
    pub fn cell_style_at(&self, row: u32, col: u16) -> &Style {
        self.cells.style(row, col)
    }

    /// Set a cell style by address string
    pub fn set_cell_style(&mut self, address: &str, style: &Style) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_style_at(addr.row, addr.col, style)
    }

    /// Set a cell style by row and column indices
    ///
    /// A style equal to the sheet default clears the cell's own style.
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        Self::check_bounds(row, col)?;
        self.cells.set_style(row, col, style);
        Ok(())
    }

    /// Get the sheet-level default style
    pub fn default_style(&self) -> &Style {
        self.cells.style_pool().default_style()
    }

    /// Replace the sheet-level default style
    ///
    /// Cells without a style of their own follow the new default.
    pub fn set_default_style(&mut self, style: Style) {
        self.cells.set_default_style(style);
    }

    /// Iterate over all stored cells in row order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Iterate over stored cells within an inclusive row span
    pub fn iter_rows(
        &self,
        start_row: u32,
        end_row: u32,
    ) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter_rows(start_row, end_row)
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check whether the sheet has no stored cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding range of the stored cells
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(r1, c1, r2, c2)| CellRange::from_indices(r1, c1, r2, c2))
    }

    /// Last row holding a stored cell
    pub fn last_row_used(&self) -> Option<u32> {
        self.used_range().map(|r| r.end.row)
    }

    /// Last column holding a stored cell
    pub fn last_column_used(&self) -> Option<u16> {
        self.used_range().map(|r| r.end.col)
    }

    // === Rows and Columns ===

    /// Row height in points
    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(DEFAULT_ROW_HEIGHT)
    }

    /// Set a row height in points
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Column width in characters
    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Set a column width in characters
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Rows with an explicit height
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Columns with an explicit width
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self.merged_regions.iter().any(|existing| range.overlaps(existing)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.merged_regions.push(*range);
        Ok(())
    }

    // === Auto Filter ===

    /// Range covered by the autofilter, if enabled
    pub fn auto_filter(&self) -> Option<&CellRange> {
        self.auto_filter.as_ref()
    }

    /// Enable the autofilter over a range, or disable it
    pub fn set_auto_filter(&mut self, range: Option<CellRange>) {
        self.auto_filter = range;
    }

    // === Freeze Panes ===

    /// Get freeze pane settings
    pub fn freeze_panes(&self) -> Option<FreezePanes> {
        self.freeze_panes
    }

    /// Freeze the given number of top rows and left columns
    ///
    /// Freezing nothing in either direction removes the freeze.
    pub fn set_freeze_panes(&mut self, rows: u32, cols: u16) {
        self.freeze_panes = if rows == 0 && cols == 0 {
            None
        } else {
            Some(FreezePanes { rows, cols })
        };
    }

    // === Cell Comments ===

    /// Set a comment on a cell by address string
    pub fn set_comment(&mut self, address: &str, comment: CellComment) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_comment_at(addr.row, addr.col, comment)
    }

    /// Set a comment on a cell by row and column indices
    pub fn set_comment_at(&mut self, row: u32, col: u16, comment: CellComment) -> Result<()> {
        Self::check_bounds(row, col)?;
        self.cells.set_comment(row, col, Some(comment));
        Ok(())
    }

    /// Get the comment on a cell by address string
    pub fn comment(&self, address: &str) -> Result<Option<&CellComment>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.comment_at(addr.row, addr.col))
    }

    /// Get the comment on a cell by row and column indices
    pub fn comment_at(&self, row: u32, col: u16) -> Option<&CellComment> {
        self.cells.get(row, col).and_then(|c| c.comment.as_ref())
    }

    /// Iterate over all comments in row order
    pub fn comments(&self) -> impl Iterator<Item = (CellAddress, &CellComment)> {
        self.cells.iter().filter_map(|(row, col, data)| {
            data.comment
                .as_ref()
                .map(|c| (CellAddress::new(row, col), c))
        })
    }

    // === Pictures ===

    /// Add a picture
    pub fn add_picture(&mut self, picture: Picture) {
        self.pictures.push(picture);
    }

    /// All pictures in insertion order
    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    // === Conditional Formatting ===

    /// Add a conditional formatting rule
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// All conditional formatting rules
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }
}
