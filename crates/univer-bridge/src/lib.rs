//! # univer-bridge
//!
//! Transfers sheet content between a live Univer document and the
//! [`univer_bridge_core`] workbook model.
//!
//! The Univer side is reached through the [`UniverAgent`] trait, so the
//! engine never holds "active sheet" state: every call names its sheet and
//! range. Each transfer runs a fixed sequence of stages (data, styles,
//! merges, filters, freeze, comments, column/row sizes, images, conditional
//! formats) which [`TransferOptions`] switches on and off individually.
//!
//! Large sheets are moved in row chunks sized by [`ChunkPlan`] so a single
//! agent call carries at most `max_cells_per_batch` cells, or one row when a
//! sheet is wider than that.
//!
//! ## Example
//!
//! ```rust
//! use univer_bridge::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let agent = MemoryAgent::from_sheets(vec![
//!     SheetSnapshot::new("s1", "Data").with_cell(CellRecord::value(0, 0, 42.0)),
//! ]);
//! let users = MemoryUsers::default();
//!
//! let (workbook, stats) = Bridge::default().export_workbook(&agent, &users).await.unwrap();
//! assert_eq!(stats.values, 1);
//! assert_eq!(workbook.sheet_count(), 1);
//! # });
//! ```

pub mod batch;
pub mod bridge;
pub mod color;
pub mod conditional_format;
pub mod config;
pub mod defaults;
pub mod error;
pub mod export;
pub mod import;
pub mod mapping;
pub mod memory;
pub mod options;
pub mod prelude;
pub mod stats;
pub mod style;
pub mod units;
pub mod values;

pub use batch::{rows_per_chunk, ChunkPlan};
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use export::Exporter;
pub use import::Importer;
pub use memory::{CellRecord, MemoryAgent, MemoryUsers, SheetSnapshot, UniverSnapshot};
pub use options::{Stage, TransferOptions};
pub use stats::TransferStats;

use std::path::Path;

use univer_bridge_core::Workbook;

/// JSON file I/O for [`Workbook`]
pub trait WorkbookJsonExt: Sized {
    /// Read a workbook model saved with [`WorkbookJsonExt::save_json`]
    fn open_json<P: AsRef<Path>>(path: P) -> Result<Self>;

    /// Write the workbook model as pretty-printed JSON
    fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookJsonExt for Workbook {
    fn open_json<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
