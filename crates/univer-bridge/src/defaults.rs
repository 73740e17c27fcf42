//! Default-value oracle for cell styles.
//!
//! A cell style attribute that equals the worksheet's default style is
//! "unset": it is never written across the boundary. Colors compare after
//! resolution against the workbook theme, so a theme color and the literal
//! color it resolves to are the same value.

use std::fmt;

use univer_bridge_core::style::{BorderEdge, Color, Style, Theme};

/// Every style attribute the oracle tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    FontName,
    FontSize,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    FontColor,
    HorizontalAlignment,
    VerticalAlignment,
    WrapText,
    TextRotation,
    ReadingOrder,
    BackgroundColor,
    NumberFormat,
    TopBorder,
    RightBorder,
    BottomBorder,
    LeftBorder,
    DiagonalBorder,
    DiagonalUp,
    DiagonalDown,
}

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 21] = [
        StyleAttribute::FontName,
        StyleAttribute::FontSize,
        StyleAttribute::Bold,
        StyleAttribute::Italic,
        StyleAttribute::Underline,
        StyleAttribute::Strikethrough,
        StyleAttribute::FontColor,
        StyleAttribute::HorizontalAlignment,
        StyleAttribute::VerticalAlignment,
        StyleAttribute::WrapText,
        StyleAttribute::TextRotation,
        StyleAttribute::ReadingOrder,
        StyleAttribute::BackgroundColor,
        StyleAttribute::NumberFormat,
        StyleAttribute::TopBorder,
        StyleAttribute::RightBorder,
        StyleAttribute::BottomBorder,
        StyleAttribute::LeftBorder,
        StyleAttribute::DiagonalBorder,
        StyleAttribute::DiagonalUp,
        StyleAttribute::DiagonalDown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleAttribute::FontName => "font-name",
            StyleAttribute::FontSize => "font-size",
            StyleAttribute::Bold => "bold",
            StyleAttribute::Italic => "italic",
            StyleAttribute::Underline => "underline",
            StyleAttribute::Strikethrough => "strikethrough",
            StyleAttribute::FontColor => "font-color",
            StyleAttribute::HorizontalAlignment => "horizontal-alignment",
            StyleAttribute::VerticalAlignment => "vertical-alignment",
            StyleAttribute::WrapText => "wrap-text",
            StyleAttribute::TextRotation => "text-rotation",
            StyleAttribute::ReadingOrder => "reading-order",
            StyleAttribute::BackgroundColor => "background-color",
            StyleAttribute::NumberFormat => "number-format",
            StyleAttribute::TopBorder => "top-border",
            StyleAttribute::RightBorder => "right-border",
            StyleAttribute::BottomBorder => "bottom-border",
            StyleAttribute::LeftBorder => "left-border",
            StyleAttribute::DiagonalBorder => "diagonal-border",
            StyleAttribute::DiagonalUp => "diagonal-up",
            StyleAttribute::DiagonalDown => "diagonal-down",
        }
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn same_color(a: &Color, b: &Color, theme: &Theme) -> bool {
    a.components(theme) == b.components(theme)
}

fn same_edge(a: &Option<BorderEdge>, b: &Option<BorderEdge>) -> bool {
    let kind = |edge: &Option<BorderEdge>| edge.as_ref().map(|e| e.style).unwrap_or_default();
    kind(a) == kind(b)
}

/// Whether one attribute of `style` equals the same attribute of `reference`.
///
/// Borders compare by line kind only, as colors of an absent border are
/// meaningless.
pub fn is_default_attribute(
    attribute: StyleAttribute,
    style: &Style,
    reference: &Style,
    theme: &Theme,
) -> bool {
    let (font, ref_font) = (&style.font, &reference.font);
    let (align, ref_align) = (&style.alignment, &reference.alignment);
    let (border, ref_border) = (&style.border, &reference.border);

    match attribute {
        StyleAttribute::FontName => font.name == ref_font.name,
        StyleAttribute::FontSize => font.size == ref_font.size,
        StyleAttribute::Bold => font.bold == ref_font.bold,
        StyleAttribute::Italic => font.italic == ref_font.italic,
        StyleAttribute::Underline => font.underline == ref_font.underline,
        StyleAttribute::Strikethrough => font.strikethrough == ref_font.strikethrough,
        StyleAttribute::FontColor => same_color(&font.color, &ref_font.color, theme),
        StyleAttribute::HorizontalAlignment => align.horizontal == ref_align.horizontal,
        StyleAttribute::VerticalAlignment => align.vertical == ref_align.vertical,
        StyleAttribute::WrapText => align.wrap_text == ref_align.wrap_text,
        StyleAttribute::TextRotation => align.rotation == ref_align.rotation,
        StyleAttribute::ReadingOrder => align.reading_order == ref_align.reading_order,
        StyleAttribute::BackgroundColor => same_color(
            &style.fill.background_color(),
            &reference.fill.background_color(),
            theme,
        ),
        StyleAttribute::NumberFormat => {
            style.number_format.format_code() == reference.number_format.format_code()
        }
        StyleAttribute::TopBorder => same_edge(&border.top, &ref_border.top),
        StyleAttribute::RightBorder => same_edge(&border.right, &ref_border.right),
        StyleAttribute::BottomBorder => same_edge(&border.bottom, &ref_border.bottom),
        StyleAttribute::LeftBorder => same_edge(&border.left, &ref_border.left),
        StyleAttribute::DiagonalBorder => same_edge(&border.diagonal, &ref_border.diagonal),
        StyleAttribute::DiagonalUp => border.diagonal_up == ref_border.diagonal_up,
        StyleAttribute::DiagonalDown => border.diagonal_down == ref_border.diagonal_down,
    }
}

/// True when every tracked attribute of `style` equals `reference`
pub fn is_default(style: &Style, reference: &Style, theme: &Theme) -> bool {
    StyleAttribute::ALL
        .iter()
        .all(|&attribute| is_default_attribute(attribute, style, reference, theme))
}

/// The attributes of `style` that differ from `reference`, in tracking order
pub fn differing_attributes(style: &Style, reference: &Style, theme: &Theme) -> Vec<StyleAttribute> {
    StyleAttribute::ALL
        .iter()
        .copied()
        .filter(|&attribute| !is_default_attribute(attribute, style, reference, theme))
        .collect()
}
