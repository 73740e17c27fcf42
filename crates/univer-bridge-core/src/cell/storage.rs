//! Cell storage implementation
//!
//! Sparse row-based storage: only cells with a value, a non-default style or
//! a comment are kept.

use std::collections::BTreeMap;

use super::CellValue;
use crate::comment::CellComment;
use crate::style::{Style, StylePool};

/// Complete data for a single cell
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellData {
    /// The cell's value
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: CellValue,
    /// Index into the style pool (0 = default style)
    #[cfg_attr(feature = "serde", serde(default))]
    pub style_index: u32,
    /// Note attached to the cell
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub comment: Option<CellComment>,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    /// Check if this cell carries nothing worth storing
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style_index == 0 && self.comment.is_none()
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) style_pool: StylePool,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    fn entry(&mut self, row: u32, col: u16) -> &mut CellData {
        self.rows.entry(row).or_default().entry(col).or_default()
    }

    fn prune(&mut self, row: u32, col: u16) {
        if let Some(row_map) = self.rows.get_mut(&row) {
            if row_map.get(&col).map_or(false, CellData::is_empty) {
                row_map.remove(&col);
            }
            if row_map.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    /// Set just the cell value (preserving style and comment)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        self.entry(row, col).value = value;
        self.prune(row, col);
    }

    /// Intern a style and attach it to a cell
    pub fn set_style(&mut self, row: u32, col: u16, style: &Style) {
        let index = self.style_pool.get_or_insert(style.clone());
        self.entry(row, col).style_index = index;
        self.prune(row, col);
    }

    /// Attach or remove a comment
    pub fn set_comment(&mut self, row: u32, col: u16, comment: Option<CellComment>) {
        self.entry(row, col).comment = comment;
        self.prune(row, col);
    }

    /// Resolve the style of a cell (default style when unset)
    pub fn style(&self, row: u32, col: u16) -> &Style {
        let index = self.get(row, col).map_or(0, |c| c.style_index);
        self.style_pool
            .get(index)
            .unwrap_or_else(|| self.style_pool.default_style())
    }

    /// Replace the style that unstyled cells resolve to
    pub fn set_default_style(&mut self, style: Style) {
        self.style_pool.set_default_style(style);
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounds of the stored cells as (min_row, min_col, max_row, max_col)
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over cells whose row falls in `rows` (inclusive)
    pub fn iter_rows(
        &self,
        start_row: u32,
        end_row: u32,
    ) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .range(start_row..=end_row)
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// The style pool shared by every cell
    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_prune() {
        let mut storage = CellStorage::new();
        storage.set_value(2, 3, CellValue::Number(1.0));
        assert_eq!(storage.cell_count(), 1);
        assert_eq!(storage.used_bounds(), Some((2, 3, 2, 3)));

        storage.set_value(2, 3, CellValue::Empty);
        assert!(storage.is_empty());
        assert_eq!(storage.used_bounds(), None);
    }

    #[test]
    fn test_style_only_cell_is_kept() {
        let mut storage = CellStorage::new();
        let style = Style::new().bold(true);
        storage.set_style(0, 0, &style);
        assert_eq!(storage.cell_count(), 1);
        assert!(storage.style(0, 0).font.bold);
        assert!(!storage.style(5, 5).font.bold);

        storage.set_style(0, 0, &Style::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_iter_rows_range() {
        let mut storage = CellStorage::new();
        for row in 0..5 {
            storage.set_value(row, 0, CellValue::Number(row as f64));
        }
        let rows: Vec<u32> = storage.iter_rows(1, 3).map(|(r, _, _)| r).collect();
        assert_eq!(rows, vec![1, 2, 3]);
    }
}
