//! Cell style conversion.
//!
//! Univer style records are applied onto workbook styles attribute by
//! attribute. In the other direction only the attributes that differ from
//! the worksheet default are sent, as font properties plus one border call
//! per edge.

use univer_bridge_core::style::{
    BorderEdge, Color, FillStyle, NumberFormat, Style, Theme, Underline,
};
use univer_bridge_protocol::{
    BooleanNumber, BorderStyleData, BorderStyleType, BorderType, ColorStyle, FontProperties,
    HighlightStyle, HorizontalAlign, StyleData, TextDecoration, WrapStrategy,
};

use crate::color::{format_color, parse_color, parse_optional_color};
use crate::defaults::{is_default_attribute, StyleAttribute};
use crate::error::Result;
use crate::mapping;

/// One border call for the Univer side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderSetting {
    pub border: BorderType,
    pub style: BorderStyleType,
    /// `#RRGGBB`
    pub color: String,
}

fn border_edge(data: &BorderStyleData) -> Result<BorderEdge> {
    let kind = mapping::border_style_to_excel(data.s.unwrap_or(BorderStyleType::None));
    let color = parse_color(data.cl.value().unwrap_or("null"))?;
    Ok(BorderEdge::new(kind, color))
}

fn flag(value: Option<BooleanNumber>) -> bool {
    value.is_some_and(BooleanNumber::is_true)
}

fn decoration(value: &Option<TextDecoration>) -> bool {
    value.as_ref().is_some_and(TextDecoration::is_set)
}

/// Apply a Univer style record onto `style`.
///
/// Bold, italic, strikethrough, both alignments and wrapping are always
/// written; the remaining attributes only when the record carries them.
/// Overline, padding and subscript have no workbook counterpart.
pub fn apply_style_data(style: &mut Style, data: &StyleData) -> Result<()> {
    if let Some(bd) = &data.bd {
        let border = &mut style.border;
        if let Some(t) = &bd.t {
            border.top = Some(border_edge(t)?);
        }
        if let Some(r) = &bd.r {
            border.right = Some(border_edge(r)?);
        }
        if let Some(b) = &bd.b {
            border.bottom = Some(border_edge(b)?);
        }
        if let Some(l) = &bd.l {
            border.left = Some(border_edge(l)?);
        }
        if let Some(tl_br) = &bd.tl_br {
            border.diagonal = Some(border_edge(tl_br)?);
            border.diagonal_down = true;
        }
        if let Some(bl_tr) = &bd.bl_tr {
            border.diagonal = Some(border_edge(bl_tr)?);
            border.diagonal_up = true;
        }
    }

    let font = &mut style.font;
    font.bold = flag(data.bl);
    if let Some(size) = data.fs {
        font.size = size;
    }
    if let Some(family) = &data.ff {
        font.name = family.clone();
    }
    if let Some(color) = parse_optional_color(data.cl.as_ref().and_then(ColorStyle::value))? {
        font.color = color;
    }
    font.italic = flag(data.it);
    font.strikethrough = decoration(&data.st);
    if decoration(&data.ul) {
        font.underline = Underline::Single;
    }

    let alignment = &mut style.alignment;
    alignment.vertical = mapping::vertical_to_excel(data.vt);
    alignment.horizontal =
        mapping::horizontal_to_excel(data.ht.unwrap_or(HorizontalAlign::Unspecified));
    alignment.wrap_text = mapping::wrap_from_strategy(data.tb);
    if let Some(direction) = data.td {
        alignment.reading_order = mapping::reading_order_from_direction(direction);
    }
    if let Some(rotation) = &data.tr {
        let degrees = i16::try_from(rotation.a).unwrap_or(0);
        *alignment = alignment.clone().with_rotation(degrees);
    }

    if let Some(color) = parse_optional_color(data.bg.as_ref().and_then(ColorStyle::value))? {
        style.fill = FillStyle::solid(color);
    }

    if let Some(pattern) = &data.n {
        style.number_format = NumberFormat::from_code(&pattern.pattern);
    }

    Ok(())
}

/// Font properties for the attributes of `style` that differ from `reference`.
///
/// Reading order is not sent.
pub fn font_properties(style: &Style, reference: &Style, theme: &Theme) -> FontProperties {
    let differs = |attribute| !is_default_attribute(attribute, style, reference, theme);
    let mut props = FontProperties::default();

    if differs(StyleAttribute::FontName) {
        props.family = Some(style.font.name.clone());
    }
    if differs(StyleAttribute::Italic) {
        props.italic = Some(style.font.italic);
    }
    if differs(StyleAttribute::Bold) {
        props.bold = Some(style.font.bold);
    }
    if differs(StyleAttribute::FontSize) {
        props.size = Some(style.font.size);
    }
    if differs(StyleAttribute::Underline) {
        props.underline = Some(style.font.underline.is_set());
    }
    if differs(StyleAttribute::NumberFormat) {
        props.number_format = Some(style.number_format.format_code().to_string());
    }
    if differs(StyleAttribute::TextRotation) {
        props.text_rotation = Some(i32::from(style.alignment.rotation));
    }
    if differs(StyleAttribute::FontColor) {
        props.color = Some(format_color(&style.font.color, theme, false));
    }
    if differs(StyleAttribute::WrapText) {
        props.is_wrap = Some(true);
        props.wrap_strategy = Some(WrapStrategy::Wrap);
    }
    if differs(StyleAttribute::HorizontalAlignment) {
        props.horizontal_align = Some(mapping::horizontal_to_font(style.alignment.horizontal));
    }
    if differs(StyleAttribute::VerticalAlignment) {
        props.vertical_align = Some(mapping::vertical_to_font(style.alignment.vertical));
    }
    if differs(StyleAttribute::BackgroundColor) {
        props.background_color = Some(format_color(&style.fill.background_color(), theme, true));
    }
    if differs(StyleAttribute::Strikethrough) {
        props.strikethrough = Some(style.font.strikethrough);
    }

    props
}

/// Border calls for the edges of `style` that differ from `reference`.
///
/// The diagonal goes out as bottom-left to top-right when the up flag is
/// set, otherwise top-left to bottom-right.
pub fn border_settings(style: &Style, reference: &Style, theme: &Theme) -> Vec<BorderSetting> {
    let border = &style.border;
    let edges = [
        (StyleAttribute::BottomBorder, BorderType::Bottom, &border.bottom),
        (StyleAttribute::TopBorder, BorderType::Top, &border.top),
        (StyleAttribute::LeftBorder, BorderType::Left, &border.left),
        (StyleAttribute::RightBorder, BorderType::Right, &border.right),
        (
            StyleAttribute::DiagonalBorder,
            if border.diagonal_up {
                BorderType::Bltr
            } else {
                BorderType::Tlbr
            },
            &border.diagonal,
        ),
    ];

    edges
        .into_iter()
        .filter(|(attribute, _, _)| !is_default_attribute(*attribute, style, reference, theme))
        .map(|(_, border_type, edge)| {
            let (kind, color) = edge
                .as_ref()
                .map_or((Default::default(), Color::BLACK), |e| (e.style, e.color));
            BorderSetting {
                border: border_type,
                style: mapping::border_style_to_univer(kind),
                color: format_color(&color, theme, true),
            }
        })
        .collect()
}

/// Workbook style for a highlight rule's style
pub fn highlight_format(highlight: &HighlightStyle) -> Result<Style> {
    let mut style = Style::new();
    style.font.bold = flag(highlight.bl);
    style.font.italic = flag(highlight.it);
    if decoration(&highlight.ul) {
        style.font.underline = Underline::Single;
    }
    style.font.strikethrough = decoration(&highlight.st);
    if let Some(color) = parse_optional_color(highlight.cl.as_ref().and_then(ColorStyle::value))? {
        style.font.color = color;
    }
    if let Some(color) = parse_optional_color(highlight.bg.as_ref().and_then(ColorStyle::value))? {
        style.fill = FillStyle::solid(color);
    }
    Ok(style)
}

/// Highlight style for a conditional format's workbook style
pub fn highlight_style(format: &Style, theme: &Theme) -> HighlightStyle {
    HighlightStyle {
        bl: Some(format.font.bold.into()),
        it: Some(format.font.italic.into()),
        ul: Some(TextDecoration::on(format.font.underline.is_set())),
        st: Some(TextDecoration::on(format.font.strikethrough)),
        cl: Some(ColorStyle::rgb(format_color(&format.font.color, theme, false))),
        bg: Some(ColorStyle::rgb(format_color(
            &format.fill.background_color(),
            theme,
            false,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use univer_bridge_core::style::{
        BorderLineStyle, HorizontalAlignment, ReadingOrder, VerticalAlignment,
    };
    use univer_bridge_protocol::{
        BorderData, FontHorizontalAlign, NumberFormatPattern, TextDirection, TextRotation,
        VerticalAlign,
    };

    fn border(kind: BorderStyleType, color: &str) -> BorderStyleData {
        BorderStyleData {
            s: Some(kind),
            cl: ColorStyle::rgb(color),
        }
    }

    #[test]
    fn test_apply_full_record() {
        let data = StyleData {
            ff: Some("Georgia".into()),
            fs: Some(14.0),
            bl: Some(BooleanNumber::True),
            ul: Some(TextDecoration::on(true)),
            cl: Some(ColorStyle::rgb("#FF0000")),
            bg: Some(ColorStyle::rgb("rgb(255,255,0)")),
            bd: Some(BorderData {
                t: Some(border(BorderStyleType::Thick, "#0000FF")),
                tl_br: Some(border(BorderStyleType::Dashed, "null")),
                ..Default::default()
            }),
            ht: Some(HorizontalAlign::Both),
            vt: Some(VerticalAlign::Middle),
            tb: Some(WrapStrategy::Wrap),
            td: Some(TextDirection::RightToLeft),
            tr: Some(TextRotation { a: 45, v: None }),
            n: Some(NumberFormatPattern {
                pattern: "0.00%".into(),
            }),
            ..Default::default()
        };

        let mut style = Style::default();
        apply_style_data(&mut style, &data).unwrap();

        assert_eq!(style.font.name, "Georgia");
        assert_eq!(style.font.size, 14.0);
        assert!(style.font.bold);
        assert!(!style.font.italic);
        assert_eq!(style.font.underline, Underline::Single);
        assert_eq!(style.font.color, Color::RED);
        assert_eq!(style.fill, FillStyle::solid(Color::rgb(255, 255, 0)));
        assert_eq!(
            style.border.top,
            Some(BorderEdge::new(BorderLineStyle::Thick, Color::rgb(0, 0, 255)))
        );
        assert_eq!(
            style.border.diagonal,
            Some(BorderEdge::new(BorderLineStyle::Dashed, Color::BLACK))
        );
        assert!(style.border.diagonal_down);
        assert!(!style.border.diagonal_up);
        assert_eq!(style.alignment.horizontal, HorizontalAlignment::Fill);
        assert_eq!(style.alignment.vertical, VerticalAlignment::Center);
        assert!(style.alignment.wrap_text);
        assert_eq!(style.alignment.reading_order, ReadingOrder::RightToLeft);
        assert_eq!(style.alignment.rotation, 45);
        assert_eq!(style.number_format.format_code(), "0.00%");
    }

    #[test]
    fn test_empty_record_sets_fallback_alignment() {
        let mut style = Style::default();
        apply_style_data(&mut style, &StyleData::default()).unwrap();
        assert_eq!(style.alignment.vertical, VerticalAlignment::Bottom);
        assert_eq!(style.alignment.horizontal, HorizontalAlignment::General);
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let data = StyleData {
            cl: Some(ColorStyle::rgb("#12")),
            ..Default::default()
        };
        assert!(apply_style_data(&mut Style::default(), &data).is_err());
    }

    #[test]
    fn test_font_properties_only_carry_differences() {
        let theme = Theme::default();
        let reference = Style::default();
        assert!(font_properties(&reference, &reference, &theme).is_empty());

        let style = Style::new()
            .bold(true)
            .font_color(Color::theme(4, 0))
            .fill_color(Color::rgb(1, 2, 3))
            .horizontal_alignment(HorizontalAlignment::Right)
            .wrap_text(true);
        let props = font_properties(&style, &reference, &theme);
        assert_eq!(
            props,
            FontProperties {
                bold: Some(true),
                color: Some("#4472C4FF".into()),
                background_color: Some("#010203".into()),
                horizontal_align: Some(FontHorizontalAlign::Normal),
                is_wrap: Some(true),
                wrap_strategy: Some(WrapStrategy::Wrap),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_border_settings() {
        let theme = Theme::default();
        let mut style = Style::default();
        style.border.left = Some(BorderEdge::new(BorderLineStyle::Medium, Color::RED));
        style.border.diagonal = Some(BorderEdge::new(BorderLineStyle::Thin, Color::BLACK));
        style.border.diagonal_up = true;

        assert_eq!(
            border_settings(&style, &Style::default(), &theme),
            vec![
                BorderSetting {
                    border: BorderType::Left,
                    style: BorderStyleType::Medium,
                    color: "#FF0000".into(),
                },
                BorderSetting {
                    border: BorderType::Bltr,
                    style: BorderStyleType::Thin,
                    color: "#000000".into(),
                },
            ]
        );
    }

    #[test]
    fn test_highlight_styles() {
        let highlight = HighlightStyle {
            bl: Some(BooleanNumber::True),
            bg: Some(ColorStyle::rgb("#FFC7CE")),
            ..Default::default()
        };
        let format = highlight_format(&highlight).unwrap();
        assert!(format.font.bold);
        assert_eq!(format.fill, FillStyle::solid(Color::rgb(0xFF, 0xC7, 0xCE)));

        let back = highlight_style(&format, &Theme::default());
        assert_eq!(back.bl, Some(BooleanNumber::True));
        assert_eq!(back.bg.and_then(|c| c.rgb).as_deref(), Some("#FFC7CEFF"));
        assert_eq!(back.cl.and_then(|c| c.rgb).as_deref(), Some("#000000FF"));
    }
}
