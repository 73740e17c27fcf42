//! Workbook theme palette

/// Theme color palette used to resolve [`Color::Theme`](super::Color::Theme)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// RGB values in palette order (lt1, dk1, lt2, dk2, accent1-6, hlink, folHlink)
    pub colors: [u32; 12],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Office Theme".to_string(),
            colors: [
                0xFFFFFF, 0x000000, 0xE7E6E6, 0x44546A, 0x4472C4, 0xED7D31, 0xA5A5A5, 0xFFC000,
                0x5B9BD5, 0x70AD47, 0x0563C1, 0x954F72,
            ],
        }
    }
}

impl Theme {
    /// Resolve a theme index and tint percentage to RGB
    ///
    /// Positive tints lighten toward white, negative tints darken toward black.
    /// Unknown indices resolve to black.
    pub fn resolve(&self, index: u8, tint: i8) -> (u8, u8, u8) {
        let rgb = self.colors.get(index as usize).copied().unwrap_or(0);
        let base = ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
        apply_tint(base, tint)
    }
}

fn apply_tint((r, g, b): (u8, u8, u8), tint: i8) -> (u8, u8, u8) {
    let t = f64::from(tint.clamp(-100, 100)) / 100.0;
    let channel = |c: u8| {
        let c = f64::from(c);
        let v = if t >= 0.0 {
            c + (255.0 - c) * t
        } else {
            c * (1.0 + t)
        };
        v.round().clamp(0.0, 255.0) as u8
    };
    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let theme = Theme::default();
        assert_eq!(theme.resolve(4, 0), (0x44, 0x72, 0xC4));
        assert_eq!(theme.resolve(1, 100), (255, 255, 255));
        assert_eq!(theme.resolve(0, -100), (0, 0, 0));
        assert_eq!(theme.resolve(42, 0), (0, 0, 0));
    }
}
