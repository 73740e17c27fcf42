//! Entry point bundling configuration and stage switches

use univer_bridge_core::style::Theme;
use univer_bridge_core::{Workbook, Worksheet};
use univer_bridge_protocol::{AgentError, SheetInfo, UniverAgent, UserDirectory};

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::export::Exporter;
use crate::import::Importer;
use crate::options::TransferOptions;
use crate::stats::TransferStats;

/// Moves sheet content between a Univer agent and a [`Workbook`].
///
/// ```rust,no_run
/// use univer_bridge::prelude::*;
///
/// # async fn run(agent: &MemoryAgent, users: &MemoryUsers) -> univer_bridge::Result<()> {
/// let bridge = Bridge::new(BridgeConfig::default())
///     .with_options(TransferOptions::all(true).with_images(false));
/// let (workbook, stats) = bridge.export_workbook(agent, users).await?;
/// println!("{} worksheets, {stats}", workbook.sheet_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Bridge {
    config: BridgeConfig,
    options: TransferOptions,
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl Bridge {
    /// A bridge running every stage
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            options: TransferOptions::all(true),
        }
    }

    pub fn with_options(mut self, options: TransferOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn options(&self) -> TransferOptions {
        self.options
    }

    /// Export every sheet the agent lists into a new workbook
    pub async fn export_workbook(
        &self,
        agent: &dyn UniverAgent,
        users: &dyn UserDirectory,
    ) -> Result<(Workbook, TransferStats)> {
        self.config.validate()?;
        let (workbook, stats) = Exporter::new(agent, users, &self.config, self.options)
            .export_workbook()
            .await?;
        tracing::info!("Export finished: {}", stats);
        Ok((workbook, stats))
    }

    /// Export the sheet with id or name `sheet`, appending it to `workbook`
    pub async fn export_sheet(
        &self,
        agent: &dyn UniverAgent,
        users: &dyn UserDirectory,
        sheet: &str,
        workbook: &mut Workbook,
    ) -> Result<TransferStats> {
        self.config.validate()?;
        let info = find_sheet(agent, sheet).await?;
        let mut exporter = Exporter::new(agent, users, &self.config, self.options);
        exporter.export_sheet(&info, workbook).await?;
        Ok(exporter.stats().clone())
    }

    /// Import every worksheet of `workbook` as new agent sheets
    pub async fn import_workbook(
        &self,
        workbook: &Workbook,
        agent: &dyn UniverAgent,
        users: &dyn UserDirectory,
    ) -> Result<TransferStats> {
        self.config.validate()?;
        let stats = Importer::new(agent, users, &self.config, self.options)
            .import_workbook(workbook)
            .await?;
        tracing::info!("Import finished: {}", stats);
        Ok(stats)
    }

    /// Import one worksheet; `None` when it has no content
    pub async fn import_worksheet(
        &self,
        worksheet: &Worksheet,
        theme: &Theme,
        agent: &dyn UniverAgent,
        users: &dyn UserDirectory,
    ) -> Result<(Option<SheetInfo>, TransferStats)> {
        self.config.validate()?;
        let mut importer = Importer::new(agent, users, &self.config, self.options);
        let info = importer.import_worksheet(worksheet, theme).await?;
        Ok((info, importer.stats().clone()))
    }
}

async fn find_sheet(agent: &dyn UniverAgent, sheet: &str) -> Result<SheetInfo> {
    agent
        .sheets_info()
        .await?
        .into_iter()
        .find(|info| info.id == sheet || info.name == sheet)
        .ok_or_else(|| AgentError::UnknownSheet(sheet.to_string()).into())
}
