//! Chunk sizing for matrix reads and writes
//!
//! A sheet's used range is walked in horizontal bands of whole rows so that
//! each agent round trip stays within a cell budget.

use univer_bridge_protocol::RangeSpec;

use crate::error::{Error, Result};

/// Rows that fit in one chunk of at most `max_cells` cells.
///
/// Capped at `total_rows`. Fails when there are no columns, no cell budget,
/// or when a single row is wider than the budget.
pub fn rows_per_chunk(max_cells: usize, total_rows: usize, total_cols: usize) -> Result<usize> {
    if total_cols == 0 {
        return Err(Error::InvalidArgument("chunk planning needs at least one column".into()));
    }
    if max_cells == 0 {
        return Err(Error::InvalidArgument("cell budget must be greater than zero".into()));
    }

    let rows = max_cells / total_cols;
    let rows = if rows > total_rows { total_rows } else { rows };
    if rows == 0 {
        return Err(Error::InvalidArgument(format!(
            "a budget of {max_cells} cells cannot hold one row of {total_cols} columns"
        )));
    }
    Ok(rows)
}

/// Iterator over the row bands covering a used range.
///
/// Bands start at row 0 and advance by `rows` until the band start reaches
/// the last used row. Read bands span `rows + 1` rows, so consecutive bands
/// share a row and the final band may extend past the data; callers skip
/// rows the agent does not return. Write bands (see [`ChunkPlan::exact`])
/// span exactly `rows` rows and continue until the last row is covered.
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    next_row: i32,
    last_row: i32,
    last_column: i32,
    rows: i32,
    overlap: bool,
    started: bool,
}

impl ChunkPlan {
    /// Plan read bands over `used`, sized for `max_cells` per band
    pub fn new(used: RangeSpec, max_cells: usize) -> Result<Self> {
        if used.end_row < 0 || used.end_column < 0 {
            return Err(Error::InvalidArgument(format!(
                "used range {used:?} has negative bounds"
            )));
        }
        let total_rows = used.end_row as usize + 1;
        let total_cols = used.end_column as usize + 1;
        let rows = rows_per_chunk(max_cells, total_rows, total_cols)?;
        Ok(Self {
            next_row: 0,
            last_row: used.end_row,
            last_column: used.end_column,
            rows: i32::try_from(rows)
                .map_err(|_| Error::InvalidArgument(format!("{rows} rows per chunk")))?,
            overlap: true,
            started: false,
        })
    }

    /// Plan bands over a sheet's used range, widening the budget to one
    /// full row when the sheet is wider than `max_cells`
    pub fn for_sheet(used: RangeSpec, max_cells: usize) -> Result<Self> {
        let total_cols = used.end_column.max(0) as usize + 1;
        let max_cells = if max_cells < total_cols {
            tracing::warn!(
                "{} used columns exceed the budget of {} cells per batch; sending one row per chunk",
                total_cols,
                max_cells
            );
            total_cols
        } else {
            max_cells
        };
        Self::new(used, max_cells)
    }

    /// Switch to non-overlapping bands of exactly `rows_per_chunk` rows
    pub fn exact(mut self) -> Self {
        self.overlap = false;
        self
    }

    /// Rows advanced per band
    pub fn rows_per_chunk(&self) -> usize {
        self.rows as usize
    }
}

impl Iterator for ChunkPlan {
    type Item = RangeSpec;

    fn next(&mut self) -> Option<RangeSpec> {
        let done = if self.overlap {
            self.next_row >= self.last_row
        } else {
            self.next_row > self.last_row
        };
        if self.started && done {
            return None;
        }
        self.started = true;

        let start = self.next_row;
        let end = if self.overlap {
            start + self.rows
        } else {
            start + self.rows - 1
        };
        self.next_row += self.rows;
        Some(RangeSpec::new(start, end, 0, self.last_column))
    }
}
