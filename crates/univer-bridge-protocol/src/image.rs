//! Floating images.

use serde::{Deserialize, Serialize};

/// Cell-relative anchor point; offsets are in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPosition {
    pub column: i32,
    pub column_offset: f64,
    pub row: i32,
    pub row_offset: f64,
}

/// Position of an image relative to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetTransform {
    pub from: AnchorPosition,
    pub to: AnchorPosition,
}

/// Absolute placement in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// An image as the editor reports it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub id: String,
    /// Data URI (`data:image/png;base64,...`) or bare base64 payload
    #[serde(default)]
    pub source: String,
    pub sheet_transform: SheetTransform,
    pub transform: Transform,
}

impl ImageInfo {
    /// The base64 payload with any data-URI header removed
    pub fn base64_payload(&self) -> &str {
        split_data_uri(&self.source).map_or(self.source.as_str(), |(_, payload)| payload)
    }
}

/// Split `data:<mime>;base64,<payload>` into its MIME type and payload
pub fn split_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64").unwrap_or(header);
    Some((mime, payload))
}

/// An image to insert; offsets and size are in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    /// `data:<mime>;base64,<payload>`
    pub source: String,
    pub row: i32,
    pub column: i32,
    pub column_offset: f64,
    pub row_offset: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_uri() {
        assert_eq!(
            split_data_uri("data:image/png;base64,iVBO"),
            Some(("image/png", "iVBO"))
        );
        assert_eq!(split_data_uri("iVBO"), None);
    }

    #[test]
    fn test_base64_payload() {
        let mut info = ImageInfo {
            source: "data:image/gif;base64,R0lG".into(),
            ..Default::default()
        };
        assert_eq!(info.base64_payload(), "R0lG");
        info.source = "R0lG".into();
        assert_eq!(info.base64_payload(), "R0lG");
    }
}
