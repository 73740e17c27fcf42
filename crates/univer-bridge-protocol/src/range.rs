//! Zero-based rectangular ranges as Univer exchanges them.

use serde::{Deserialize, Serialize};
use univer_bridge_core::{CellAddress, CellRange};

use crate::error::{AgentError, Result};

/// A rectangular block of cells, zero-based and inclusive on both ends.
///
/// Indices are signed because Univer uses `-1` as a "not set" sentinel in
/// some payloads (see [`Freeze`](crate::Freeze)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSpec {
    pub start_row: i32,
    pub end_row: i32,
    pub start_column: i32,
    pub end_column: i32,
}

impl RangeSpec {
    pub const fn new(start_row: i32, end_row: i32, start_column: i32, end_column: i32) -> Self {
        Self {
            start_row,
            end_row,
            start_column,
            end_column,
        }
    }

    /// A range covering exactly one cell
    pub const fn single(row: i32, column: i32) -> Self {
        Self::new(row, row, column, column)
    }

    /// Parse an A1 reference such as `"B2"` or `"A1:C3"`
    pub fn parse_a1(reference: &str) -> Result<Self> {
        CellRange::parse(reference)
            .map(Self::from)
            .map_err(|_| AgentError::InvalidRange(reference.to_string()))
    }

    /// Number of rows spanned
    pub fn row_count(&self) -> i32 {
        self.end_row - self.start_row + 1
    }

    /// Number of columns spanned
    pub fn column_count(&self) -> i32 {
        self.end_column - self.start_column + 1
    }

    /// The top-left cell as a single-cell range
    pub fn first_cell(&self) -> Self {
        Self::single(self.start_row, self.start_column)
    }

    /// Convert to a workbook range. Fails on negative indices.
    pub fn to_cell_range(&self) -> Result<CellRange> {
        let invalid = || AgentError::InvalidRange(format!("{self:?}"));
        let start_row = u32::try_from(self.start_row).map_err(|_| invalid())?;
        let end_row = u32::try_from(self.end_row).map_err(|_| invalid())?;
        let start_col = u16::try_from(self.start_column).map_err(|_| invalid())?;
        let end_col = u16::try_from(self.end_column).map_err(|_| invalid())?;
        Ok(CellRange::from_indices(start_row, start_col, end_row, end_col))
    }

    /// Format as an A1 reference (`"C3"` for single cells)
    pub fn to_a1(&self) -> Result<String> {
        Ok(self.to_cell_range()?.to_a1_string())
    }
}

impl From<CellRange> for RangeSpec {
    fn from(range: CellRange) -> Self {
        Self::new(
            range.start.row as i32,
            range.end.row as i32,
            range.start.col as i32,
            range.end.col as i32,
        )
    }
}

impl From<CellAddress> for RangeSpec {
    fn from(addr: CellAddress) -> Self {
        Self::single(addr.row as i32, addr.col as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a1() {
        assert_eq!(RangeSpec::parse_a1("A1:B2").unwrap(), RangeSpec::new(0, 1, 0, 1));
        assert_eq!(RangeSpec::parse_a1("C3").unwrap(), RangeSpec::single(2, 2));
        assert!(RangeSpec::parse_a1("not a range").is_err());
    }

    #[test]
    fn test_to_a1() {
        assert_eq!(RangeSpec::new(0, 1, 0, 1).to_a1().unwrap(), "A1:B2");
        assert_eq!(RangeSpec::new(4, 9, 2, 3).first_cell().to_a1().unwrap(), "C5");
        assert!(RangeSpec::single(-1, 0).to_a1().is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&RangeSpec::new(0, 2, 1, 3)).unwrap();
        assert_eq!(
            json,
            r#"{"startRow":0,"endRow":2,"startColumn":1,"endColumn":3}"#
        );
    }
}
