//! Workbook to Univer transfer.
//!
//! Each worksheet with content becomes a new Univer sheet sized to its used
//! range. Styles are sent only for attributes that differ from the
//! worksheet's default style.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use univer_bridge_core::style::Theme;
use univer_bridge_core::{CellRange, Workbook, Worksheet};
use univer_bridge_protocol::{
    CellValue, Comment, DocumentBody, MergeStrategy, NewImage, RangeSpec, SheetInfo, UniverAgent,
    UserDirectory,
};

use crate::batch::ChunkPlan;
use crate::color::{format_color, is_fully_transparent};
use crate::conditional_format::to_univer_rule;
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::options::{Stage, TransferOptions};
use crate::stats::TransferStats;
use crate::{defaults, mapping, style, units, values};

/// Eight hex digits, as Univer uses for comment and rule ids
pub fn random_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Runs the import stages against one agent
pub struct Importer<'a> {
    agent: &'a dyn UniverAgent,
    users: &'a dyn UserDirectory,
    config: &'a BridgeConfig,
    options: TransferOptions,
    stats: TransferStats,
}

impl<'a> Importer<'a> {
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

    /// Import every worksheet of `workbook`
    pub async fn import_workbook(mut self, workbook: &Workbook) -> Result<TransferStats> {
        tracing::info!("Importing {} worksheets", workbook.sheet_count());
        for worksheet in workbook.worksheets() {
            self.import_worksheet(worksheet, workbook.theme()).await?;
        }
        Ok(self.stats)
    }

    /// Import one worksheet as a new sheet.
    ///
    /// Returns `None` without touching the agent when the worksheet has no
    /// stored cells.
    pub async fn import_worksheet(
        &mut self,
        worksheet: &Worksheet,
        theme: &Theme,
    ) -> Result<Option<SheetInfo>> {
        let Some(used) = worksheet.used_range() else {
            tracing::info!("Skipping empty worksheet '{}'", worksheet.name());
            return Ok(None);
        };
        tracing::info!("Importing worksheet '{}' ({})", worksheet.name(), used);

        let tab_color = worksheet
            .tab_color()
            .filter(|c| !is_fully_transparent(c, theme))
            .map(|c| format_color(&c, theme, false));
        let info = self
            .agent
            .add_sheet(
                worksheet.name(),
                used.end.row as i32 + 1,
                i32::from(used.end.col) + 1,
                tab_color.as_deref(),
            )
            .await?;
        self.stats.sheets += 1;

        let options = self.options;
        for stage in options.enabled_stages() {
            tracing::debug!("Stage {} on '{}'", stage, info.name);
            match stage {
                Stage::Data => self.data(&info, worksheet, used).await?,
                Stage::Styles => self.styles(&info, worksheet, used, theme).await?,
                Stage::Merges => self.merges(&info, worksheet).await?,
                Stage::Filters => self.filters(&info, worksheet).await?,
                Stage::Freeze => self.freeze(&info, worksheet).await?,
                Stage::Comments => self.comments(&info, worksheet).await?,
                Stage::ColumnsAndRows => self.columns_and_rows(&info, worksheet, used).await?,
                Stage::Images => self.images(&info, worksheet).await?,
                Stage::ConditionalFormats => {
                    self.conditional_formats(&info, worksheet, theme).await?
                }
                Stage::Accessibility => {
                    tracing::debug!("No accessibility content to import");
                }
            }
        }
        Ok(Some(info))
    }

    /// Write bands over the new sheet, clipped to the worksheet's last row
    fn bands(&self, info: &SheetInfo, used: CellRange) -> Result<Vec<RangeSpec>> {
        let last_row = used.end.row as i32;
        let last_column = i32::from(used.end.col);
        Ok(ChunkPlan::for_sheet(info.max_used, self.config.max_cells_per_batch)?
            .exact()
            .take_while(|band| band.start_row <= last_row)
            .map(|band| RangeSpec::new(band.start_row, band.end_row.min(last_row), 0, last_column))
            .collect())
    }

    async fn data(&mut self, info: &SheetInfo, worksheet: &Worksheet, used: CellRange) -> Result<()> {
        for band in self.bands(info, used)? {
            let mut band_values = Vec::with_capacity(band.row_count() as usize);
            let mut band_formulas = Vec::with_capacity(band.row_count() as usize);

            for row in band.start_row..=band.end_row {
                let mut row_values = Vec::with_capacity(band.column_count() as usize);
                let mut row_formulas = Vec::with_capacity(band.column_count() as usize);
                for col in band.start_column..=band.end_column {
                    let (value, formula) =
                        values::to_univer(worksheet.value_at(row as u32, col as u16));
                    if !formula.is_empty() {
                        self.stats.formulas += 1;
                    } else if !value.is_absent() {
                        self.stats.values += 1;
                    }
                    row_values.push(value);
                    row_formulas.push(formula);
                }
                band_values.push(row_values);
                band_formulas.push(row_formulas);
            }

            let has_formulas = band_formulas.iter().flatten().any(|f| !f.is_empty());
            let has_values = band_values.iter().flatten().any(|v| !CellValue::is_absent(v));
            self.stats.chunks += 1;
            if !has_values && !has_formulas {
                tracing::debug!("Band rows {}..={} is empty", band.start_row, band.end_row);
                continue;
            }

            self.agent.set_values(&info.id, band, band_values).await?;
            if has_formulas {
                self.agent.set_formulas(&info.id, band, band_formulas).await?;
            }
        }
        Ok(())
    }

    async fn styles(
        &mut self,
        info: &SheetInfo,
        worksheet: &Worksheet,
        used: CellRange,
        theme: &Theme,
    ) -> Result<()> {
        let reference = worksheet.default_style();

        for band in self.bands(info, used)? {
            self.stats.chunks += 1;
            let cells: Vec<(u32, u16)> = worksheet
                .iter_rows(band.start_row as u32, band.end_row as u32)
                .map(|(row, col, _)| (row, col))
                .filter(|&(row, col)| {
                    !defaults::is_default(worksheet.cell_style_at(row, col), reference, theme)
                })
                .collect();

            for (row, col) in cells {
                let cell_style = worksheet.cell_style_at(row, col);
                let cell = RangeSpec::single(row as i32, i32::from(col));

                let properties = style::font_properties(cell_style, reference, theme);
                if !properties.is_empty() {
                    self.agent
                        .set_font_properties(&info.id, cell, &properties)
                        .await?;
                }
                for border in style::border_settings(cell_style, reference, theme) {
                    self.agent
                        .set_border_style(&info.id, cell, border.border, border.style, &border.color)
                        .await?;
                }
                self.stats.styled_cells += 1;
            }
        }
        Ok(())
    }

    async fn merges(&mut self, info: &SheetInfo, worksheet: &Worksheet) -> Result<()> {
        for region in worksheet.merged_regions() {
            self.agent
                .merge(&info.id, RangeSpec::from(*region), MergeStrategy::All)
                .await?;
            self.stats.merges += 1;
        }
        Ok(())
    }

    async fn filters(&mut self, info: &SheetInfo, worksheet: &Worksheet) -> Result<()> {
        if let Some(range) = worksheet.auto_filter() {
            self.agent.create_filter(&info.id, RangeSpec::from(*range)).await?;
            self.stats.filters += 1;
        }
        Ok(())
    }

    async fn freeze(&mut self, info: &SheetInfo, worksheet: &Worksheet) -> Result<()> {
        let (rows, columns) = worksheet
            .freeze_panes()
            .map_or((0, 0), |panes| (panes.rows, u32::from(panes.cols)));
        self.agent.set_freeze(&info.id, rows, columns).await?;
        if rows > 0 || columns > 0 {
            self.stats.freezes += 1;
        }
        Ok(())
    }

    async fn comments(&mut self, info: &SheetInfo, worksheet: &Worksheet) -> Result<()> {
        let notes: Vec<_> = worksheet.comments().collect();
        if notes.is_empty() {
            return Ok(());
        }

        let user = self.users.current_user().await?;
        for (address, note) in notes {
            let created = note.created.unwrap_or_else(|| Local::now().naive_local());
            let comment = Comment {
                id: random_id(),
                reference: address.to_a1_string(),
                date_time: created.format(values::COMMENT_TIME_FORMAT).to_string(),
                person_id: user.user_id.clone(),
                text: DocumentBody::from_text(&note.text),
            };
            self.agent.insert_comment(&info.id, comment).await?;
            self.stats.comments += 1;
        }
        Ok(())
    }

    async fn columns_and_rows(
        &mut self,
        info: &SheetInfo,
        worksheet: &Worksheet,
        used: CellRange,
    ) -> Result<()> {
        for col in used.start.col..=used.end.col {
            let width = units::column_chars_to_px(worksheet.column_width(col));
            self.agent
                .set_column_width(&info.id, i32::from(col), width)
                .await?;
        }
        for row in used.start.row..=used.end.row {
            let height = units::row_pt_to_px(worksheet.row_height(row));
            self.agent.set_row_height(&info.id, row as i32, height).await?;
        }
        Ok(())
    }

    async fn images(&mut self, info: &SheetInfo, worksheet: &Worksheet) -> Result<()> {
        for picture in worksheet.pictures() {
            let mime = mapping::mime_type(picture.format)?;
            let image = NewImage {
                source: format!("data:{mime};base64,{}", BASE64.encode(&picture.data)),
                row: picture.anchor.row as i32,
                column: i32::from(picture.anchor.col),
                column_offset: units::points_to_pixels(picture.offset_x),
                row_offset: units::points_to_pixels(picture.offset_y),
                width: f64::from(picture.width),
                height: f64::from(picture.height),
            };
            self.agent.add_image(&info.id, image).await?;
            self.stats.images += 1;
        }
        Ok(())
    }

    async fn conditional_formats(
        &mut self,
        info: &SheetInfo,
        worksheet: &Worksheet,
        theme: &Theme,
    ) -> Result<()> {
        for rule in worksheet.conditional_formats() {
            match to_univer_rule(rule, random_id(), theme) {
                Some(converted) => {
                    self.agent.add_conditional_format(&info.id, converted).await?;
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
    fn test_random_id_shape() {
        let id = random_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
