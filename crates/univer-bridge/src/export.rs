//! Univer to workbook transfer.
//!
//! Sheets are exported one after another in the order the agent lists
//! them. Within a sheet the enabled stages run in [`Stage::ALL`] order.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDateTime;
use univer_bridge_core::style::{HorizontalAlignment, VerticalAlignment};
use univer_bridge_core::{CellAddress, CellComment, Picture, PictureFormat, Workbook, Worksheet};
use univer_bridge_protocol::image::split_data_uri;
use univer_bridge_protocol::value::all_absent;
use univer_bridge_protocol::{SheetInfo, UniverAgent, UserDirectory};

use crate::batch::ChunkPlan;
use crate::color::parse_optional_color;
use crate::conditional_format::to_workbook_rule;
use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::options::{Stage, TransferOptions};
use crate::stats::TransferStats;
use crate::{mapping, style, units, values};

/// Convert agent coordinates to workbook indices
pub(crate) fn cell_index(row: i32, column: i32) -> Result<(u32, u16)> {
    let row = u32::try_from(row)
        .map_err(|_| Error::InvalidArgument(format!("row index {row} is negative")))?;
    let column = u16::try_from(column)
        .map_err(|_| Error::InvalidArgument(format!("column index {column} is out of range")))?;
    Ok((row, column))
}

/// Runs the export stages against one agent
pub struct Exporter<'a> {
    agent: &'a dyn UniverAgent,
    users: &'a dyn UserDirectory,
    config: &'a BridgeConfig,
    options: TransferOptions,
    stats: TransferStats,
}

impl<'a> Exporter<'a> {
    pub fn new(
        agent: &'a dyn UniverAgent,
        users: &'a dyn UserDirectory,
        config: &'a BridgeConfig,
        options: TransferOptions,
    ) -> Self {
        Self {
            agent,
            users,
            config,
            options,
            stats: TransferStats::default(),
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// Export every sheet into a new workbook
    pub async fn export_workbook(mut self) -> Result<(Workbook, TransferStats)> {
        let mut workbook = Workbook::new();
        let sheets = self.agent.sheets_info().await?;
        tracing::info!("Exporting {} sheets", sheets.len());

        for info in &sheets {
            self.export_sheet(info, &mut workbook).await?;
        }
        Ok((workbook, self.stats))
    }

    /// Export one sheet into `workbook`, appending a worksheet named after it
    pub async fn export_sheet(&mut self, info: &SheetInfo, workbook: &mut Workbook) -> Result<()> {
        tracing::info!("Exporting sheet '{}' ({})", info.name, info.id);

        let sheet = workbook.add_worksheet(&info.name)?;
        sheet.set_tab_color(parse_optional_color(info.tab_color.as_deref())?);
        self.stats.sheets += 1;

        let options = self.options;
        for stage in options.enabled_stages() {
            tracing::debug!("Stage {} on '{}'", stage, info.name);
            match stage {
                Stage::Data => self.data(info, sheet).await?,
                Stage::Styles => self.styles(info, sheet).await?,
                Stage::Merges => self.merges(info, sheet).await?,
                Stage::Filters => self.filters(info, sheet).await?,
                Stage::Freeze => self.freeze(info, sheet).await?,
                Stage::Comments => self.comments(info, sheet).await?,
                Stage::ColumnsAndRows => self.columns_and_rows(info, sheet).await?,
                Stage::Images => self.images(info, sheet).await?,
                Stage::ConditionalFormats => self.conditional_formats(info, sheet).await?,
                Stage::Accessibility => {
                    tracing::debug!("No accessibility content to export");
                }
            }
        }
        Ok(())
    }

    fn plan(&self, info: &SheetInfo) -> Result<ChunkPlan> {
        ChunkPlan::for_sheet(info.max_used, self.config.max_cells_per_batch)
    }

    async fn data(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        let mut done_through = -1;

        for chunk in self.plan(info)? {
            let cell_values = self.agent.values(&info.id, chunk).await?;
            let formulas = self.agent.formulas(&info.id, chunk).await?;
            self.stats.chunks += 1;

            if all_absent(&cell_values) && formulas.iter().flatten().all(String::is_empty) {
                tracing::debug!("Chunk rows {}..={} is empty", chunk.start_row, chunk.end_row);
                continue;
            }

            for (r, row) in cell_values.iter().enumerate() {
                let row_index = chunk.start_row + r as i32;
                if row_index <= done_through {
                    continue;
                }
                for (c, value) in row.iter().enumerate() {
                    let formula = formulas.get(r).and_then(|f| f.get(c)).map(String::as_str);
                    let Some(value) = values::to_workbook(value, formula) else {
                        continue;
                    };
                    if value.is_formula() {
                        self.stats.formulas += 1;
                    } else {
                        self.stats.values += 1;
                    }
                    let (row, col) = cell_index(row_index, chunk.start_column + c as i32)?;
                    sheet.set_cell_value_at(row, col, value)?;
                }
            }
            done_through = done_through.max(chunk.start_row + cell_values.len() as i32 - 1);
        }
        Ok(())
    }

    async fn styles(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        let mut done_through = -1;

        for chunk in self.plan(info)? {
            let styles = self.agent.styles(&info.id, chunk).await?;
            self.stats.chunks += 1;

            for (r, row) in styles.iter().enumerate() {
                let row_index = chunk.start_row + r as i32;
                if row_index <= done_through {
                    continue;
                }
                for (c, data) in row.iter().enumerate() {
                    let Some(data) = data else {
                        continue;
                    };
                    let (row, col) = cell_index(row_index, chunk.start_column + c as i32)?;
                    let mut cell_style = sheet.cell_style_at(row, col).clone();
                    style::apply_style_data(&mut cell_style, data)?;
                    if cell_style == *sheet.default_style() {
                        continue;
                    }
                    sheet.set_cell_style_at(row, col, &cell_style)?;
                    self.stats.styled_cells += 1;
                }
            }
            done_through = done_through.max(chunk.start_row + styles.len() as i32 - 1);
        }
        Ok(())
    }

    async fn merges(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        for range in self.agent.merges(&info.id).await? {
            let cells = range.to_cell_range()?;
            let (row, col) = (cells.start.row, cells.start.col);

            let mut first = sheet.cell_style_at(row, col).clone();
            first.alignment.horizontal = HorizontalAlignment::Center;
            first.alignment.vertical = VerticalAlignment::Center;
            sheet.set_cell_style_at(row, col, &first)?;

            sheet.merge_cells(&cells)?;
            self.stats.merges += 1;
        }
        Ok(())
    }

    async fn filters(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        if let Some(range) = self.agent.filter(&info.id).await? {
            sheet.set_auto_filter(Some(range.to_cell_range()?));
            self.stats.filters += 1;
        }
        Ok(())
    }

    async fn freeze(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        let freeze = self.agent.freeze(&info.id).await?;
        if freeze.is_none() {
            tracing::debug!("Sheet '{}' has no frozen panes", info.name);
            return Ok(());
        }

        let rows = u32::try_from(freeze.frozen_rows())
            .map_err(|_| Error::InvalidArgument(format!("frozen rows in {freeze:?}")))?;
        let columns = u16::try_from(freeze.frozen_columns())
            .map_err(|_| Error::InvalidArgument(format!("frozen columns in {freeze:?}")))?;
        sheet.set_freeze_panes(rows, columns);
        self.stats.freezes += 1;
        Ok(())
    }

    async fn comments(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        for comment in self.agent.comments(&info.id).await? {
            let author = self.users.user(&comment.person_id).await?;
            let mut note = CellComment::new(author.name, comment.text.plain_text());
            match NaiveDateTime::parse_from_str(&comment.date_time, values::COMMENT_TIME_FORMAT) {
                Ok(created) => note = note.with_created(created),
                Err(_) => tracing::debug!(
                    "Comment {} has unreadable timestamp '{}'",
                    comment.id,
                    comment.date_time
                ),
            }
            sheet.set_comment(&comment.reference, note)?;
            self.stats.comments += 1;
        }
        Ok(())
    }

    async fn columns_and_rows(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        let used = info.max_used;

        let columns = units::values_between(used.start_column, used.end_column)?;
        let widths = self.agent.column_widths(&info.id, &columns).await?;
        for (&column, px) in columns.iter().zip(widths) {
            let (_, col) = cell_index(0, column)?;
            sheet.set_column_width(col, units::column_px_to_chars(px));
        }

        let rows = units::values_between(used.start_row, used.end_row)?;
        let heights = self.agent.row_heights(&info.id, &rows).await?;
        for (&row, px) in rows.iter().zip(heights) {
            let (row, _) = cell_index(row, 0)?;
            sheet.set_row_height(row, units::row_px_to_pt(px));
        }
        Ok(())
    }

    async fn images(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        for id in self.agent.image_ids(&info.id).await? {
            let image = self.agent.image(&info.id, &id).await?;
            let source = if image.source.is_empty() {
                self.agent.image_source(&info.id, &id).await?
            } else {
                image.source.clone()
            };
            let (mime, payload) = split_data_uri(&source).unwrap_or(("", source.as_str()));
            let data = BASE64.decode(payload.trim())?;

            let from = image.sheet_transform.from;
            let (row, col) = cell_index(from.row, from.column)?;
            let mut picture = Picture::from_bytes(data, CellAddress::new(row, col))
                .with_offset(
                    units::pixels_to_points(from.column_offset),
                    units::pixels_to_points(from.row_offset),
                )
                .with_size(
                    image.transform.width.round().max(0.0) as u32,
                    image.transform.height.round().max(0.0) as u32,
                );
            if picture.format == PictureFormat::Unknown {
                picture.format = mapping::picture_format_from_mime(mime);
            }

            sheet.add_picture(picture);
            self.stats.images += 1;
        }
        Ok(())
    }

    async fn conditional_formats(&mut self, info: &SheetInfo, sheet: &mut Worksheet) -> Result<()> {
        for rule in self.agent.conditional_formats(&info.id).await? {
            match to_workbook_rule(&rule)? {
                Some(converted) => {
                    sheet.add_conditional_format(converted);
                    self.stats.conditional_formats += 1;
                }
                None => self.stats.skipped += 1,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index(4, 2).unwrap(), (4, 2));
        assert!(matches!(cell_index(-1, 0), Err(Error::InvalidArgument(_))));
        assert!(cell_index(0, 70_000).is_err());
    }
}
