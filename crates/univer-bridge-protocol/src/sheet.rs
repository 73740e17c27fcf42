//! Sheet-level records: identity, used range, freeze state, merge modes.

use serde::{Deserialize, Serialize};

use crate::range::RangeSpec;

/// A sheet as listed by the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetInfo {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<String>,
    /// Bounding box of every used cell; drives chunked scans
    pub max_used: RangeSpec,
}

/// Frozen panes. `start_row`/`start_column` of `-1` means nothing is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freeze {
    pub start_row: i32,
    pub start_column: i32,
    pub x_split: i32,
    pub y_split: i32,
}

impl Freeze {
    /// The "nothing frozen" sentinel
    pub const NONE: Freeze = Freeze {
        start_row: -1,
        start_column: -1,
        x_split: 0,
        y_split: 0,
    };

    pub fn is_none(&self) -> bool {
        self.start_row == -1 && self.start_column == -1
    }

    /// Number of frozen rows
    pub fn frozen_rows(&self) -> i32 {
        self.start_row + self.x_split
    }

    /// Number of frozen columns
    pub fn frozen_columns(&self) -> i32 {
        self.start_column + self.y_split
    }
}

impl Default for Freeze {
    fn default() -> Self {
        Self::NONE
    }
}

/// How a merge call groups the selected cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// One region covering the whole range
    #[default]
    All,
    /// One region per row
    Horizontal,
    /// One region per column
    Vertical,
}

impl MergeStrategy {
    /// Split `range` into the regions this strategy produces
    pub fn regions(&self, range: RangeSpec) -> Vec<RangeSpec> {
        match self {
            MergeStrategy::All => vec![range],
            MergeStrategy::Horizontal => (range.start_row..=range.end_row)
                .map(|row| RangeSpec::new(row, row, range.start_column, range.end_column))
                .collect(),
            MergeStrategy::Vertical => (range.start_column..=range.end_column)
                .map(|col| RangeSpec::new(range.start_row, range.end_row, col, col))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_sentinel() {
        assert!(Freeze::default().is_none());
        let freeze = Freeze {
            start_row: 1,
            start_column: 0,
            x_split: 1,
            y_split: 2,
        };
        assert!(!freeze.is_none());
        assert_eq!((freeze.frozen_rows(), freeze.frozen_columns()), (2, 2));
    }

    #[test]
    fn test_merge_strategy_regions() {
        let range = RangeSpec::new(0, 1, 0, 2);
        assert_eq!(MergeStrategy::All.regions(range), vec![range]);
        assert_eq!(MergeStrategy::Horizontal.regions(range).len(), 2);
        assert_eq!(MergeStrategy::Vertical.regions(range).len(), 3);
    }
}
