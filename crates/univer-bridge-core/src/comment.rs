//! Cell comments (notes)
//!
//! ## Example
//!
//! ```rust
//! use univer_bridge_core::{CellComment, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Notes").unwrap();
//!
//! sheet.set_comment("A1", CellComment::new("Ada", "Check this total")).unwrap();
//! assert_eq!(sheet.comment("A1").unwrap().map(|c| c.author.as_str()), Some("Ada"));
//! ```

use chrono::NaiveDateTime;

/// A note attached to a cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellComment {
    /// Display name of the author
    pub author: String,
    /// Plain text content
    pub text: String,
    /// When the comment was written, if known
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub created: Option<NaiveDateTime>,
}

impl CellComment {
    /// Create a new comment with the given author and text
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            created: None,
        }
    }

    /// Set the creation timestamp
    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = Some(created);
        self
    }

    /// Check if this comment has an author
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl std::fmt::Display for CellComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_author() {
            write!(f, "[{}]: {}", self.author, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellComment::new("John", "Hello").to_string(), "[John]: Hello");
        assert_eq!(CellComment::new("", "Hello").to_string(), "Hello");
    }
}
