//! Color representation

use std::fmt;

use super::Theme;

/// Color representation
///
/// Supports ARGB, theme and indexed colors. [`Color::Auto`] renders as
/// opaque black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with tint
    ///
    /// Indices follow the theme palette order: 0 = Background 1,
    /// 1 = Text 1, 2 = Background 2, 3 = Text 2, 4-9 = Accent 1-6,
    /// 10 = Hyperlink, 11 = Followed hyperlink.
    Theme {
        /// Theme color index (0-11)
        index: u8,
        /// Tint as a percentage (-100 to 100)
        tint: i8,
    },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque red
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Fully transparent white
    pub const TRANSPARENT: Color = Color::argb(0, 255, 255, 255);

    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a: 255, r, g, b }
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color::Argb { a, r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Resolve to `(a, r, g, b)` against a theme palette
    pub fn components(&self, theme: &Theme) -> (u8, u8, u8, u8) {
        match *self {
            Color::Auto => (255, 0, 0, 0),
            Color::Argb { a, r, g, b } => (a, r, g, b),
            Color::Theme { index, tint } => {
                let (r, g, b) = theme.resolve(index, tint);
                (255, r, g, b)
            }
            Color::Indexed(i) => {
                let (r, g, b) = indexed_to_rgb(i);
                (255, r, g, b)
            }
        }
    }

    /// Format as `AARRGGBB` using the default theme
    pub fn to_argb_hex(&self) -> String {
        let (a, r, g, b) = self.components(&Theme::default());
        format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
    }
}

/// Legacy 56-color palette, entries 8..=63 (0..=7 repeat the first eight)
const INDEXED_PALETTE: [u32; 56] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, //
    0x800000, 0x008000, 0x000080, 0x808000, 0x800080, 0x008080, 0xC0C0C0, 0x808080, //
    0x9999FF, 0x993366, 0xFFFFCC, 0xCCFFFF, 0x660066, 0xFF8080, 0x0066CC, 0xCCCCFF, //
    0x000080, 0xFF00FF, 0xFFFF00, 0x00FFFF, 0x800080, 0x800000, 0x008080, 0x0000FF, //
    0x00CCFF, 0xCCFFFF, 0xCCFFCC, 0xFFFF99, 0x99CCFF, 0xFF99CC, 0xCC99FF, 0xFFCC99, //
    0x3366FF, 0x33CCCC, 0x99CC00, 0xFFCC00, 0xFF9900, 0xFF6600, 0x666699, 0x969696, //
    0x003366, 0x339966, 0x003300, 0x333300, 0x993300, 0x993366, 0x333399, 0x333333,
];

fn indexed_to_rgb(index: u8) -> (u8, u8, u8) {
    let slot = match index {
        0..=7 => index as usize,
        8..=63 => index as usize - 8,
        _ => return (0, 0, 0),
    };
    let rgb = INDEXED_PALETTE[slot];
    ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Theme { index, tint } => write!(f, "theme({}, {}%)", index, tint),
            _ => write!(f, "#{}", self.to_argb_hex()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let theme = Theme::default();
        assert_eq!(Color::Auto.components(&theme), (255, 0, 0, 0));
        assert_eq!(Color::Indexed(10).components(&theme), Color::RED.components(&theme));
        assert_eq!(Color::Indexed(2).components(&theme), (255, 255, 0, 0));
        assert_eq!(Color::theme(1, 0).components(&theme), (255, 0, 0, 0));
        assert_eq!(Color::TRANSPARENT.to_argb_hex(), "00FFFFFF");
    }
}
