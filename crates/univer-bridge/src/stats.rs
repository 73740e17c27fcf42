//! Transfer statistics

use std::fmt;

/// Counters from one transfer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Sheets created on the destination side
    pub sheets: usize,
    /// Chunks read or written by the data and style stages
    pub chunks: usize,
    /// Literal cell values written
    pub values: usize,
    /// Formulas written
    pub formulas: usize,
    /// Cells whose style was transferred
    pub styled_cells: usize,
    pub merges: usize,
    pub filters: usize,
    pub freezes: usize,
    pub comments: usize,
    pub images: usize,
    pub conditional_formats: usize,
    /// Items left out because the destination cannot express them
    pub skipped: usize,
}

impl TransferStats {
    /// Add the counters of `other` to these
    pub fn merge(&mut self, other: &TransferStats) {
        self.sheets += other.sheets;
        self.chunks += other.chunks;
        self.values += other.values;
        self.formulas += other.formulas;
        self.styled_cells += other.styled_cells;
        self.merges += other.merges;
        self.filters += other.filters;
        self.freezes += other.freezes;
        self.comments += other.comments;
        self.images += other.images;
        self.conditional_formats += other.conditional_formats;
        self.skipped += other.skipped;
    }
}

impl fmt::Display for TransferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sheets, {} values, {} formulas, {} styled cells, {} merges, {} comments, \
             {} images, {} conditional formats ({} skipped) in {} chunks",
            self.sheets,
            self.values,
            self.formulas,
            self.styled_cells,
            self.merges,
            self.comments,
            self.images,
            self.conditional_formats,
            self.skipped,
            self.chunks,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_and_display() {
        let mut total = TransferStats::default();
        total.merge(&TransferStats {
            sheets: 1,
            values: 3,
            chunks: 2,
            ..Default::default()
        });
        total.merge(&TransferStats {
            sheets: 1,
            skipped: 1,
            ..Default::default()
        });
        assert_eq!(total.sheets, 2);
        assert_eq!(total.values, 3);
        assert!(total.to_string().starts_with("2 sheets, 3 values"));
        assert!(total.to_string().ends_with("(1 skipped) in 2 chunks"));
    }
}
