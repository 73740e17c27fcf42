//! Per-feature transfer switches

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One transfer stage, in the order stages run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Data,
    Styles,
    Merges,
    Filters,
    Freeze,
    Comments,
    ColumnsAndRows,
    Images,
    ConditionalFormats,
    Accessibility,
}

impl Stage {
    /// Every stage in run order
    pub const ALL: [Stage; 10] = [
        Stage::Data,
        Stage::Styles,
        Stage::Merges,
        Stage::Filters,
        Stage::Freeze,
        Stage::Comments,
        Stage::ColumnsAndRows,
        Stage::Images,
        Stage::ConditionalFormats,
        Stage::Accessibility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Data => "data",
            Stage::Styles => "styles",
            Stage::Merges => "merges",
            Stage::Filters => "filters",
            Stage::Freeze => "freeze",
            Stage::Comments => "comments",
            Stage::ColumnsAndRows => "columns-rows",
            Stage::Images => "images",
            Stage::ConditionalFormats => "conditional-formats",
            Stage::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == key)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown stage '{s}'")))
    }
}

/// Which stages a transfer runs. Every switch is independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferOptions {
    pub data: bool,
    pub styles: bool,
    pub merges: bool,
    pub filters: bool,
    pub freeze: bool,
    pub comments: bool,
    pub columns_and_rows: bool,
    pub images: bool,
    pub conditional_formats: bool,
    pub accessibility: bool,
}

impl TransferOptions {
    /// Enable or disable every stage at once
    pub fn all(enabled: bool) -> Self {
        Self {
            data: enabled,
            styles: enabled,
            merges: enabled,
            filters: enabled,
            freeze: enabled,
            comments: enabled,
            columns_and_rows: enabled,
            images: enabled,
            conditional_formats: enabled,
            accessibility: enabled,
        }
    }

    /// Only the given stages
    pub fn only<I: IntoIterator<Item = Stage>>(stages: I) -> Self {
        stages
            .into_iter()
            .fold(Self::all(false), |options, stage| options.with(stage, true))
    }

    /// Toggle a single stage
    pub fn with(mut self, stage: Stage, enabled: bool) -> Self {
        *self.switch_mut(stage) = enabled;
        self
    }

    pub fn with_data(self, enabled: bool) -> Self {
        self.with(Stage::Data, enabled)
    }

    pub fn with_styles(self, enabled: bool) -> Self {
        self.with(Stage::Styles, enabled)
    }

    pub fn with_merges(self, enabled: bool) -> Self {
        self.with(Stage::Merges, enabled)
    }

    pub fn with_filters(self, enabled: bool) -> Self {
        self.with(Stage::Filters, enabled)
    }

    pub fn with_freeze(self, enabled: bool) -> Self {
        self.with(Stage::Freeze, enabled)
    }

    pub fn with_comments(self, enabled: bool) -> Self {
        self.with(Stage::Comments, enabled)
    }

    pub fn with_columns_and_rows(self, enabled: bool) -> Self {
        self.with(Stage::ColumnsAndRows, enabled)
    }

    pub fn with_images(self, enabled: bool) -> Self {
        self.with(Stage::Images, enabled)
    }

    pub fn with_conditional_formats(self, enabled: bool) -> Self {
        self.with(Stage::ConditionalFormats, enabled)
    }

    pub fn with_accessibility(self, enabled: bool) -> Self {
        self.with(Stage::Accessibility, enabled)
    }

    /// Whether a stage is switched on
    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Data => self.data,
            Stage::Styles => self.styles,
            Stage::Merges => self.merges,
            Stage::Filters => self.filters,
            Stage::Freeze => self.freeze,
            Stage::Comments => self.comments,
            Stage::ColumnsAndRows => self.columns_and_rows,
            Stage::Images => self.images,
            Stage::ConditionalFormats => self.conditional_formats,
            Stage::Accessibility => self.accessibility,
        }
    }

    /// Enabled stages in run order
    pub fn enabled_stages(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ALL.into_iter().filter(|s| self.is_enabled(*s))
    }

    fn switch_mut(&mut self, stage: Stage) -> &mut bool {
        match stage {
            Stage::Data => &mut self.data,
            Stage::Styles => &mut self.styles,
            Stage::Merges => &mut self.merges,
            Stage::Filters => &mut self.filters,
            Stage::Freeze => &mut self.freeze,
            Stage::Comments => &mut self.comments,
            Stage::ColumnsAndRows => &mut self.columns_and_rows,
            Stage::Images => &mut self.images,
            Stage::ConditionalFormats => &mut self.conditional_formats,
            Stage::Accessibility => &mut self.accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_builders() {
        assert_eq!(TransferOptions::all(false), TransferOptions::default());
        assert_eq!(TransferOptions::all(true).enabled_stages().count(), 10);

        let options = TransferOptions::all(false).with_styles(true).with_freeze(true);
        assert!(options.styles && options.freeze);
        assert!(!options.data);
        assert_eq!(
            options.enabled_stages().collect::<Vec<_>>(),
            vec![Stage::Styles, Stage::Freeze]
        );
    }

    #[test]
    fn test_stage_parsing() {
        assert_eq!("columns_rows".parse::<Stage>().unwrap(), Stage::ColumnsAndRows);
        assert_eq!("Conditional-Formats".parse::<Stage>().unwrap(), Stage::ConditionalFormats);
        assert!("charts".parse::<Stage>().is_err());

        let options = TransferOptions::only([Stage::Data, Stage::Images]);
        assert!(options.data && options.images && !options.styles);
    }
}
