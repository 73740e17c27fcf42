//! Univer cell style records.
//!
//! Univer stores styles with terse keys (`ff`, `fs`, `bl`, ...) and encodes
//! most enums as small integers. The types here mirror that layout so that
//! payloads decode without any intermediate JSON handling.

use serde::{Deserialize, Serialize};

/// Declares a `#[repr(u8)]`-style enum that travels as its integer value.
macro_rules! numeric_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(format!("invalid {} value: {}", stringify!($name), other)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }
    };
}

numeric_enum! {
    /// Univer's 0/1 boolean
    pub enum BooleanNumber {
        False = 0,
        True = 1,
    }
}

impl BooleanNumber {
    pub fn is_true(self) -> bool {
        self == BooleanNumber::True
    }
}

impl From<bool> for BooleanNumber {
    fn from(value: bool) -> Self {
        if value {
            BooleanNumber::True
        } else {
            BooleanNumber::False
        }
    }
}

numeric_enum! {
    /// Border line kinds
    pub enum BorderStyleType {
        None = 0,
        Thin = 1,
        Hair = 2,
        Dotted = 3,
        Dashed = 4,
        DashDot = 5,
        DashDotDot = 6,
        Double = 7,
        Medium = 8,
        MediumDashed = 9,
        MediumDashDot = 10,
        MediumDashDotDot = 11,
        SlantDashDot = 12,
        Thick = 13,
    }
}

numeric_enum! {
    pub enum HorizontalAlign {
        Unspecified = 0,
        Left = 1,
        Center = 2,
        Right = 3,
        Justified = 4,
        Both = 5,
        Distributed = 6,
    }
}

numeric_enum! {
    pub enum VerticalAlign {
        Unspecified = 0,
        Top = 1,
        Middle = 2,
        Bottom = 3,
    }
}

numeric_enum! {
    pub enum WrapStrategy {
        Unspecified = 0,
        Overflow = 1,
        Clip = 2,
        Wrap = 3,
    }
}

numeric_enum! {
    pub enum TextDirection {
        Unspecified = 0,
        LeftToRight = 1,
        RightToLeft = 2,
    }
}

/// A color slot; `rgb` holds whatever string the editor produced
/// (`#RRGGBB`, `rgb(...)`, the literal `"null"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
}

impl ColorStyle {
    pub fn rgb(value: impl Into<String>) -> Self {
        Self {
            rgb: Some(value.into()),
        }
    }

    /// The color string when present and non-empty
    pub fn value(&self) -> Option<&str> {
        self.rgb.as_deref().filter(|s| !s.is_empty())
    }
}

/// Underline / strikethrough / overline decoration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDecoration {
    pub s: BooleanNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<ColorStyle>,
}

impl TextDecoration {
    pub fn on(on: bool) -> Self {
        Self {
            s: on.into(),
            cl: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.s.is_true()
    }
}

/// Text rotation; `v` marks vertical (stacked) text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRotation {
    #[serde(default)]
    pub a: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<BooleanNumber>,
}

/// Number format pattern (dates use the same slot)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormatPattern {
    pub pattern: String,
}

/// One border edge
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderStyleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<BorderStyleType>,
    #[serde(default)]
    pub cl: ColorStyle,
}

/// Border edges of a cell; `tl_br` runs top-left to bottom-right and
/// `bl_tr` bottom-left to top-right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BorderData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<BorderStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<BorderStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<BorderStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<BorderStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tl_br: Option<BorderStyleData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl_tr: Option<BorderStyleData>,
}

/// A full Univer cell style record.
///
/// Overline, padding and the subscript/superscript offset exist in Univer
/// but have no workbook counterpart; they are ignored when decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleData {
    /// Font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ff: Option<String>,
    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<f64>,
    /// Italic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it: Option<BooleanNumber>,
    /// Bold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl: Option<BooleanNumber>,
    /// Underline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ul: Option<TextDecoration>,
    /// Strikethrough
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st: Option<TextDecoration>,
    /// Font color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<ColorStyle>,
    /// Background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ColorStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bd: Option<BorderData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ht: Option<HorizontalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vt: Option<VerticalAlign>,
    /// Wrap strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tb: Option<WrapStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td: Option<TextDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tr: Option<TextRotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<NumberFormatPattern>,
}

/// Horizontal alignment as accepted by the font-properties call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontHorizontalAlign {
    Left,
    Center,
    Normal,
}

/// Vertical alignment as accepted by the font-properties call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontVerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Partial style update sent to the editor. Only the set fields are applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// `#RRGGBBAA`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_rotation: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap_strategy: Option<WrapStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<FontHorizontalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<FontVerticalAlign>,
}

impl FontProperties {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &FontProperties::default()
    }
}

/// Which edge a border call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderType {
    Top,
    Bottom,
    Left,
    Right,
    /// Diagonal, top-left to bottom-right
    Tlbr,
    /// Diagonal, bottom-left to top-right
    Bltr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_terse_record() {
        let json = r##"{
            "ff": "Arial", "fs": 14, "bl": 1, "it": 0,
            "ul": {"s": 1}, "cl": {"rgb": "#FF0000"},
            "bd": {"t": {"s": 1, "cl": {"rgb": "#000000"}}},
            "ht": 2, "vt": 1, "tb": 3, "td": 2, "tr": {"a": 45},
            "n": {"pattern": "0.00"}, "ol": {"s": 1}, "pd": {"t": 2}
        }"##;
        let style: StyleData = serde_json::from_str(json).unwrap();

        assert_eq!(style.ff.as_deref(), Some("Arial"));
        assert_eq!(style.bl, Some(BooleanNumber::True));
        assert!(style.ul.as_ref().map_or(false, TextDecoration::is_set));
        assert_eq!(style.ht, Some(HorizontalAlign::Center));
        assert_eq!(style.vt, Some(VerticalAlign::Top));
        assert_eq!(style.tb, Some(WrapStrategy::Wrap));
        assert_eq!(style.td, Some(TextDirection::RightToLeft));
        assert_eq!(
            style.bd.and_then(|b| b.t).and_then(|t| t.s),
            Some(BorderStyleType::Thin)
        );
    }

    #[test]
    fn test_out_of_range_enum_is_rejected() {
        assert!(serde_json::from_str::<StyleData>(r#"{"ht": 9}"#).is_err());
    }

    #[test]
    fn test_font_properties_skip_unset() {
        let props = FontProperties {
            bold: Some(true),
            horizontal_align: Some(FontHorizontalAlign::Normal),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&props).unwrap(),
            r#"{"bold":true,"horizontalAlign":"normal"}"#
        );
        assert!(FontProperties::default().is_empty());
    }
}
