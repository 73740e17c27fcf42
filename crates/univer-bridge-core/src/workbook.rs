//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::style::Theme;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook: an ordered list of worksheets and the theme their colors resolve against
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workbook {
    #[cfg_attr(feature = "serde", serde(default))]
    worksheets: Vec<Worksheet>,
    #[cfg_attr(feature = "serde", serde(default))]
    theme: Theme,
}

impl Workbook {
    /// Create a workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        let lower = name.to_lowercase();
        self.worksheets
            .iter()
            .find(|ws| ws.name().to_lowercase() == lower)
    }

    /// Get a mutable worksheet by name (case-insensitive)
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        let lower = name.to_lowercase();
        self.worksheets
            .iter_mut()
            .find(|ws| ws.name().to_lowercase() == lower)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// Iterate over all worksheets in order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append a new worksheet and return it
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.validate_sheet_name(name)?;
        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(&mut self.worksheets[index])
    }

    /// The workbook theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the workbook theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        if self.worksheet_by_name(name).is_some() {
            return Err(Error::DuplicateSheetName(name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_find() {
        let mut wb = Workbook::new();
        assert!(wb.is_empty());

        wb.add_worksheet("Data").unwrap().set_cell_value("A1", 1.0).unwrap();
        wb.add_worksheet("Summary").unwrap();

        assert_eq!(wb.sheet_count(), 2);
        assert_eq!(wb.worksheet(1).map(|ws| ws.name()), Some("Summary"));
        assert!(wb.worksheet_by_name("data").is_some());
        assert!(wb.worksheet_by_name_mut("missing").is_err());
    }

    #[test]
    fn test_sheet_name_validation() {
        let mut wb = Workbook::new();
        wb.add_worksheet("Sheet1").unwrap();

        assert!(matches!(
            wb.add_worksheet("sheet1"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(matches!(wb.add_worksheet(""), Err(Error::InvalidSheetName(_))));
        assert!(matches!(wb.add_worksheet("a/b"), Err(Error::InvalidSheetName(_))));
        assert!(matches!(
            wb.add_worksheet(&"x".repeat(32)),
            Err(Error::InvalidSheetName(_))
        ));
    }
}
