//! Embedded pictures

use crate::cell::CellAddress;

/// Image encoding of a picture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PictureFormat {
    /// Not recognised
    #[default]
    Unknown,
    Bmp,
    Gif,
    Png,
    Tiff,
    Icon,
    Pcx,
    Jpeg,
    Emf,
    Wmf,
    Webp,
}

impl PictureFormat {
    /// Detect the format from the leading bytes of an image
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x89, b'P', b'N', b'G', ..] => PictureFormat::Png,
            [0xFF, 0xD8, 0xFF, ..] => PictureFormat::Jpeg,
            [b'G', b'I', b'F', b'8', ..] => PictureFormat::Gif,
            [b'B', b'M', ..] => PictureFormat::Bmp,
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => PictureFormat::Tiff,
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => PictureFormat::Webp,
            [0x00, 0x00, 0x01, 0x00, ..] => PictureFormat::Icon,
            [0x0A, 0x00..=0x05, 0x01, ..] => PictureFormat::Pcx,
            [0xD7, 0xCD, 0xC6, 0x9A, ..] => PictureFormat::Wmf,
            [0x01, 0x00, 0x00, 0x00, ..] if data.get(40..44) == Some(&b" EMF"[..]) => {
                PictureFormat::Emf
            }
            _ => PictureFormat::Unknown,
        }
    }
}

/// A picture anchored to a cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Picture {
    /// Image encoding
    pub format: PictureFormat,
    /// Raw image bytes
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_util::base64_bytes"))]
    pub data: Vec<u8>,
    /// Top-left anchor cell
    pub anchor: CellAddress,
    /// Horizontal offset from the anchor, in points
    pub offset_x: f64,
    /// Vertical offset from the anchor, in points
    pub offset_y: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Picture {
    /// Create a picture from raw bytes, detecting its format
    pub fn from_bytes(data: Vec<u8>, anchor: CellAddress) -> Self {
        Self {
            format: PictureFormat::detect(&data),
            data,
            anchor,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 0,
            height: 0,
        }
    }

    /// Set the offsets from the anchor cell, in points
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Set the size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            PictureFormat::detect(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            PictureFormat::Png
        );
        assert_eq!(PictureFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), PictureFormat::Jpeg);
        assert_eq!(PictureFormat::detect(b"GIF89a"), PictureFormat::Gif);
        assert_eq!(PictureFormat::detect(b"RIFF\0\0\0\0WEBPVP8 "), PictureFormat::Webp);
        assert_eq!(PictureFormat::detect(b"hello"), PictureFormat::Unknown);
        assert_eq!(PictureFormat::detect(&[]), PictureFormat::Unknown);
    }
}
