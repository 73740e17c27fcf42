//! Prelude module - common imports for univer-bridge users
//!
//! ```rust
//! use univer_bridge::prelude::*;
//! ```

pub use crate::{
    Bridge,
    BridgeConfig,
    CellRecord,
    ChunkPlan,
    Error,
    Exporter,
    Importer,
    // In-memory agent
    MemoryAgent,
    MemoryUsers,
    Result,
    SheetSnapshot,
    Stage,
    TransferOptions,
    TransferStats,
    UniverSnapshot,
    WorkbookJsonExt,
};

pub use univer_bridge_core::{CellRange, Workbook, Worksheet};
pub use univer_bridge_protocol::{RangeSpec, SheetInfo, UniverAgent, UserDirectory};
