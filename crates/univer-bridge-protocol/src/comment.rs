//! Threaded comments.

use serde::{Deserialize, Serialize};

/// Line terminator Univer appends to every document body
pub const PARAGRAPH_END: &str = "\r\n";

/// Rich-text body of a comment; only the plain data stream is exchanged
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBody {
    pub data_stream: String,
}

impl DocumentBody {
    /// Wrap plain text, terminating the paragraph
    pub fn from_text(text: &str) -> Self {
        Self {
            data_stream: format!("{text}{PARAGRAPH_END}"),
        }
    }

    /// The text without the trailing paragraph terminator
    pub fn plain_text(&self) -> &str {
        self.data_stream
            .strip_suffix(PARAGRAPH_END)
            .unwrap_or(&self.data_stream)
    }
}

/// A comment attached to a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// A1 reference of the commented cell
    #[serde(rename = "ref")]
    pub reference: String,
    /// Creation time, `YYYY/MM/DD HH:mm`
    #[serde(rename = "dT")]
    pub date_time: String,
    pub person_id: String,
    pub text: DocumentBody,
}

/// A member of the editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
}

impl User {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_terminator() {
        let body = DocumentBody::from_text("check totals");
        assert_eq!(body.data_stream, "check totals\r\n");
        assert_eq!(body.plain_text(), "check totals");
        assert_eq!(DocumentBody::default().plain_text(), "");
    }

    #[test]
    fn test_wire_names() {
        let comment = Comment {
            id: "a1b2c3d4".into(),
            reference: "B2".into(),
            date_time: "2024/01/31 09:15".into(),
            person_id: "u1".into(),
            text: DocumentBody::from_text("hi"),
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["ref"], "B2");
        assert_eq!(json["dT"], "2024/01/31 09:15");
        assert_eq!(json["personId"], "u1");
        assert_eq!(json["text"]["dataStream"], "hi\r\n");
    }
}
