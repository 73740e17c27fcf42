//! Color strings as Univer writes them, and back

use univer_bridge_core::style::{Color, Theme};

use crate::error::{Error, Result};

/// Parse a Univer color string.
///
/// Accepted shapes:
/// - `"null"`: opaque black
/// - `rgb(r,g,b)` and `rgba(r,g,b,a)` without spaces
/// - 6 hex digits, `#` optional: read as `RRGGBB` with alpha `FF`
/// - 8 hex digits, `#` optional: read as `RRGGBBAA`
pub fn parse_color(value: &str) -> Result<Color> {
    if value == "null" {
        return Ok(Color::argb(255, 0, 0, 0));
    }

    if value.starts_with("rgb") {
        let channel = |s: &str| s.parse::<u8>().map_err(|_| Error::InvalidColor(value.into()));
        if let Some((_, r, g, b)) = lazy_regex::regex_captures!(r"^rgb\((\d+),(\d+),(\d+)\)", value)
        {
            return Ok(Color::rgb(channel(r)?, channel(g)?, channel(b)?));
        }
        if let Some((_, r, g, b, a)) =
            lazy_regex::regex_captures!(r"^rgba\((\d+),(\d+),(\d+),(\d+)\)", value)
        {
            return Ok(Color::argb(channel(a)?, channel(r)?, channel(g)?, channel(b)?));
        }
    }

    let hex = value.strip_prefix('#').unwrap_or(value);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(value.into()));
    }
    let rrggbbaa = match hex.len() {
        6 => format!("{hex}FF"),
        8 => hex.to_string(),
        _ => return Err(Error::InvalidColor(value.into())),
    };
    let packed =
        u32::from_str_radix(&rrggbbaa, 16).map_err(|_| Error::InvalidColor(value.into()))?;
    let [r, g, b, a] = packed.to_be_bytes();
    Ok(Color::argb(a, r, g, b))
}

/// Parse an optional color, treating absent and empty strings as "no color"
pub fn parse_optional_color(value: Option<&str>) -> Result<Option<Color>> {
    match value {
        Some(s) if !s.is_empty() => parse_color(s).map(Some),
        _ => Ok(None),
    }
}

/// Format as `#RRGGBBAA`, or `#RRGGBB` when `only_rgb` is set.
/// Theme and indexed colors are resolved against `theme` first.
pub fn format_color(color: &Color, theme: &Theme, only_rgb: bool) -> String {
    let (a, r, g, b) = color.components(theme);
    if only_rgb {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

/// True for `#00000000`, the color of an unset tab
pub fn is_fully_transparent(color: &Color, theme: &Theme) -> bool {
    color.components(theme) == (0, 0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(parse_color("null").unwrap(), Color::BLACK);
        assert_eq!(parse_color("#FF8000").unwrap(), Color::rgb(0xFF, 0x80, 0x00));
        assert_eq!(parse_color("FF8000").unwrap(), Color::rgb(0xFF, 0x80, 0x00));
        assert_eq!(
            parse_color("11223344").unwrap(),
            Color::argb(0x44, 0x11, 0x22, 0x33)
        );
        assert_eq!(parse_color("rgb(1,2,3)").unwrap(), Color::rgb(1, 2, 3));
        assert_eq!(parse_color("rgba(1,2,3,4)").unwrap(), Color::argb(4, 1, 2, 3));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(matches!(parse_color("#12"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("rgb(1, 2, 3)"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("rgb(300,0,0)"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("#GGGGGG"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_parse_rejects_signed_hex() {
        assert!(matches!(parse_color("+12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(parse_color("#+1234567"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_optional() {
        assert_eq!(parse_optional_color(None).unwrap(), None);
        assert_eq!(parse_optional_color(Some("")).unwrap(), None);
        assert_eq!(parse_optional_color(Some("#000000")).unwrap(), Some(Color::BLACK));
    }

    #[test]
    fn test_format() {
        let theme = Theme::default();
        assert_eq!(format_color(&Color::rgb(1, 2, 3), &theme, false), "#010203FF");
        assert_eq!(format_color(&Color::rgb(1, 2, 3), &theme, true), "#010203");
        assert_eq!(format_color(&Color::theme(4, 0), &theme, true), "#4472C4");
        assert!(is_fully_transparent(&Color::argb(0, 0, 0, 0), &theme));
        assert!(!is_fully_transparent(&Color::TRANSPARENT, &theme));
    }
}
