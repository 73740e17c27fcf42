//! Enum translation tables between Univer and the workbook model.
//!
//! Every table is total: inputs without a counterpart fall to the arm
//! documented on each function. Alignment tables are intentionally not
//! inverses of each other.

use univer_bridge_core::style::{
    BorderLineStyle, HorizontalAlignment, ReadingOrder, VerticalAlignment,
};
use univer_bridge_core::{CfIconOperator, CfValueType, IconSetStyle, PictureFormat, TimePeriod};
use univer_bridge_protocol as univer;
use univer_bridge_protocol::{
    BorderStyleType, FontHorizontalAlign, FontVerticalAlign, HorizontalAlign, IconType,
    TextDirection, VerticalAlign, WrapStrategy,
};

use crate::error::{Error, Result};

pub fn border_style_to_excel(style: BorderStyleType) -> BorderLineStyle {
    match style {
        BorderStyleType::None => BorderLineStyle::None,
        BorderStyleType::Thin => BorderLineStyle::Thin,
        BorderStyleType::Hair => BorderLineStyle::Hair,
        BorderStyleType::Dotted => BorderLineStyle::Dotted,
        BorderStyleType::Dashed => BorderLineStyle::Dashed,
        BorderStyleType::DashDot => BorderLineStyle::DashDot,
        BorderStyleType::DashDotDot => BorderLineStyle::DashDotDot,
        BorderStyleType::Double => BorderLineStyle::Double,
        BorderStyleType::Medium => BorderLineStyle::Medium,
        BorderStyleType::MediumDashed => BorderLineStyle::MediumDashed,
        BorderStyleType::MediumDashDot => BorderLineStyle::MediumDashDot,
        BorderStyleType::MediumDashDotDot => BorderLineStyle::MediumDashDotDot,
        BorderStyleType::SlantDashDot => BorderLineStyle::SlantDashDot,
        BorderStyleType::Thick => BorderLineStyle::Thick,
    }
}

pub fn border_style_to_univer(style: BorderLineStyle) -> BorderStyleType {
    match style {
        BorderLineStyle::None => BorderStyleType::None,
        BorderLineStyle::Thin => BorderStyleType::Thin,
        BorderLineStyle::Hair => BorderStyleType::Hair,
        BorderLineStyle::Dotted => BorderStyleType::Dotted,
        BorderLineStyle::Dashed => BorderStyleType::Dashed,
        BorderLineStyle::DashDot => BorderStyleType::DashDot,
        BorderLineStyle::DashDotDot => BorderStyleType::DashDotDot,
        BorderLineStyle::Double => BorderStyleType::Double,
        BorderLineStyle::Medium => BorderStyleType::Medium,
        BorderLineStyle::MediumDashed => BorderStyleType::MediumDashed,
        BorderLineStyle::MediumDashDot => BorderStyleType::MediumDashDot,
        BorderLineStyle::MediumDashDotDot => BorderStyleType::MediumDashDotDot,
        BorderLineStyle::SlantDashDot => BorderStyleType::SlantDashDot,
        BorderLineStyle::Thick => BorderStyleType::Thick,
    }
}

/// Unspecified falls to `General`
pub fn horizontal_to_excel(align: HorizontalAlign) -> HorizontalAlignment {
    match align {
        HorizontalAlign::Left => HorizontalAlignment::Left,
        HorizontalAlign::Center => HorizontalAlignment::Center,
        HorizontalAlign::Right => HorizontalAlignment::Right,
        HorizontalAlign::Justified => HorizontalAlignment::Justify,
        HorizontalAlign::Both => HorizontalAlignment::Fill,
        HorizontalAlign::Distributed => HorizontalAlignment::Distributed,
        HorizontalAlign::Unspecified => HorizontalAlignment::General,
    }
}

/// Only center and left survive; everything else, right included, is `Normal`
pub fn horizontal_to_font(align: HorizontalAlignment) -> FontHorizontalAlign {
    match align {
        HorizontalAlignment::Center => FontHorizontalAlign::Center,
        HorizontalAlignment::Left => FontHorizontalAlign::Left,
        _ => FontHorizontalAlign::Normal,
    }
}

/// An absent alignment is `Bottom`, an explicit unspecified one is `Top`
pub fn vertical_to_excel(align: Option<VerticalAlign>) -> VerticalAlignment {
    match align {
        None => VerticalAlignment::Bottom,
        Some(VerticalAlign::Top) => VerticalAlignment::Top,
        Some(VerticalAlign::Middle) => VerticalAlignment::Center,
        Some(VerticalAlign::Bottom) => VerticalAlignment::Bottom,
        Some(VerticalAlign::Unspecified) => VerticalAlignment::Top,
    }
}

/// Anything but top and center is `Bottom`
pub fn vertical_to_font(align: VerticalAlignment) -> FontVerticalAlign {
    match align {
        VerticalAlignment::Top => FontVerticalAlign::Top,
        VerticalAlignment::Center => FontVerticalAlign::Middle,
        _ => FontVerticalAlign::Bottom,
    }
}

pub fn reading_order_from_direction(direction: TextDirection) -> ReadingOrder {
    match direction {
        TextDirection::LeftToRight => ReadingOrder::LeftToRight,
        TextDirection::RightToLeft => ReadingOrder::RightToLeft,
        TextDirection::Unspecified => ReadingOrder::ContextDependent,
    }
}

/// Any strategy other than unspecified wraps; strategies are not kept apart
pub fn wrap_from_strategy(strategy: Option<WrapStrategy>) -> bool {
    !matches!(strategy, None | Some(WrapStrategy::Unspecified))
}

/// `5Felling` and `5Boxes` become five arrows; `3Stars`, `3Triangles` and
/// absent become three arrows
pub fn icon_set_to_excel(icon: Option<IconType>) -> IconSetStyle {
    match icon {
        Some(IconType::ThreeArrowsGray) => IconSetStyle::ThreeArrowsGray,
        Some(IconType::FourArrows) => IconSetStyle::FourArrows,
        Some(IconType::FourArrowsGray) => IconSetStyle::FourArrowsGray,
        Some(IconType::FiveArrows) => IconSetStyle::FiveArrows,
        Some(IconType::FiveArrowsGray) => IconSetStyle::FiveArrowsGray,
        Some(IconType::ThreeTrafficLights1) => IconSetStyle::ThreeTrafficLights1,
        Some(IconType::ThreeTrafficLights2) => IconSetStyle::ThreeTrafficLights2,
        Some(IconType::ThreeSigns) => IconSetStyle::ThreeSigns,
        Some(IconType::ThreeSymbols) => IconSetStyle::ThreeSymbols,
        Some(IconType::ThreeSymbols2) => IconSetStyle::ThreeSymbols2,
        Some(IconType::ThreeFlags) => IconSetStyle::ThreeFlags,
        Some(IconType::FourRedToBlack) => IconSetStyle::FourRedToBlack,
        Some(IconType::FourRating) => IconSetStyle::FourRating,
        Some(IconType::FourTrafficLights) => IconSetStyle::FourTrafficLights,
        Some(IconType::FiveRating) => IconSetStyle::FiveRating,
        Some(IconType::FiveQuarters) => IconSetStyle::FiveQuarters,
        Some(IconType::FiveFelling) | Some(IconType::FiveBoxes) => IconSetStyle::FiveArrows,
        Some(IconType::ThreeStars)
        | Some(IconType::ThreeTriangles)
        | Some(IconType::ThreeArrows)
        | None => IconSetStyle::ThreeArrows,
    }
}

pub fn icon_set_to_univer(style: IconSetStyle) -> IconType {
    match style {
        IconSetStyle::ThreeArrows => IconType::ThreeArrows,
        IconSetStyle::ThreeArrowsGray => IconType::ThreeArrowsGray,
        IconSetStyle::ThreeFlags => IconType::ThreeFlags,
        IconSetStyle::ThreeTrafficLights1 => IconType::ThreeTrafficLights1,
        IconSetStyle::ThreeTrafficLights2 => IconType::ThreeTrafficLights2,
        IconSetStyle::ThreeSigns => IconType::ThreeSigns,
        IconSetStyle::ThreeSymbols => IconType::ThreeSymbols,
        IconSetStyle::ThreeSymbols2 => IconType::ThreeSymbols2,
        IconSetStyle::FourArrows => IconType::FourArrows,
        IconSetStyle::FourArrowsGray => IconType::FourArrowsGray,
        IconSetStyle::FourRedToBlack => IconType::FourRedToBlack,
        IconSetStyle::FourRating => IconType::FourRating,
        IconSetStyle::FourTrafficLights => IconType::FourTrafficLights,
        IconSetStyle::FiveArrows => IconType::FiveArrows,
        IconSetStyle::FiveArrowsGray => IconType::FiveArrowsGray,
        IconSetStyle::FiveRating => IconType::FiveRating,
        IconSetStyle::FiveQuarters => IconType::FiveQuarters,
    }
}

/// Only `greaterThanOrEqual` keeps its meaning; everything else is `>`
pub fn icon_operator_to_excel(operator: univer::CfOperator) -> CfIconOperator {
    match operator {
        univer::CfOperator::GreaterThanOrEqual => CfIconOperator::EqualOrGreaterThan,
        _ => CfIconOperator::GreaterThan,
    }
}

pub fn icon_operator_to_univer(operator: CfIconOperator) -> univer::CfOperator {
    match operator {
        CfIconOperator::EqualOrGreaterThan => univer::CfOperator::GreaterThanOrEqual,
        CfIconOperator::GreaterThan => univer::CfOperator::GreaterThan,
    }
}

/// An absent type reads as a plain number
pub fn value_type_to_excel(value_type: Option<univer::CfValueType>) -> CfValueType {
    match value_type {
        Some(univer::CfValueType::Min) => CfValueType::Min,
        Some(univer::CfValueType::Max) => CfValueType::Max,
        Some(univer::CfValueType::Percent) => CfValueType::Percent,
        Some(univer::CfValueType::Percentile) => CfValueType::Percentile,
        Some(univer::CfValueType::Formula) => CfValueType::Formula,
        Some(univer::CfValueType::Num) | None => CfValueType::Num,
    }
}

pub fn value_type_to_univer(value_type: CfValueType) -> univer::CfValueType {
    match value_type {
        CfValueType::Min => univer::CfValueType::Min,
        CfValueType::Max => univer::CfValueType::Max,
        CfValueType::Percent => univer::CfValueType::Percent,
        CfValueType::Percentile => univer::CfValueType::Percentile,
        CfValueType::Formula => univer::CfValueType::Formula,
        CfValueType::Num => univer::CfValueType::Num,
    }
}

/// Non-period operators fall to `Today`
pub fn time_period_to_excel(operator: univer::CfOperator) -> TimePeriod {
    match operator {
        univer::CfOperator::Yesterday => TimePeriod::Yesterday,
        univer::CfOperator::Tomorrow => TimePeriod::Tomorrow,
        univer::CfOperator::Last7Days => TimePeriod::Last7Days,
        univer::CfOperator::ThisWeek => TimePeriod::ThisWeek,
        univer::CfOperator::LastWeek => TimePeriod::LastWeek,
        univer::CfOperator::NextWeek => TimePeriod::NextWeek,
        univer::CfOperator::ThisMonth => TimePeriod::ThisMonth,
        univer::CfOperator::LastMonth => TimePeriod::LastMonth,
        univer::CfOperator::NextMonth => TimePeriod::NextMonth,
        _ => TimePeriod::Today,
    }
}

pub fn time_period_to_univer(period: TimePeriod) -> univer::CfOperator {
    match period {
        TimePeriod::Today => univer::CfOperator::Today,
        TimePeriod::Yesterday => univer::CfOperator::Yesterday,
        TimePeriod::Tomorrow => univer::CfOperator::Tomorrow,
        TimePeriod::Last7Days => univer::CfOperator::Last7Days,
        TimePeriod::ThisWeek => univer::CfOperator::ThisWeek,
        TimePeriod::LastWeek => univer::CfOperator::LastWeek,
        TimePeriod::NextWeek => univer::CfOperator::NextWeek,
        TimePeriod::ThisMonth => univer::CfOperator::ThisMonth,
        TimePeriod::LastMonth => univer::CfOperator::LastMonth,
        TimePeriod::NextMonth => univer::CfOperator::NextMonth,
    }
}

/// Unrecognised MIME types give `Unknown`
pub fn picture_format_from_mime(mime: &str) -> PictureFormat {
    match mime {
        "image/tiff" => PictureFormat::Tiff,
        "image/x-pcx" => PictureFormat::Pcx,
        "image/x-icon" => PictureFormat::Icon,
        "image/gif" => PictureFormat::Gif,
        "image/bmp" => PictureFormat::Bmp,
        "image/webp" => PictureFormat::Webp,
        "image/png" => PictureFormat::Png,
        "image/jpeg" => PictureFormat::Jpeg,
        _ => PictureFormat::Unknown,
    }
}

/// MIME type Univer accepts for a picture; vector and unknown formats fail
pub fn mime_type(format: PictureFormat) -> Result<&'static str> {
    match format {
        PictureFormat::Tiff => Ok("image/tiff"),
        PictureFormat::Pcx => Ok("image/x-pcx"),
        PictureFormat::Icon => Ok("image/x-icon"),
        PictureFormat::Gif => Ok("image/gif"),
        PictureFormat::Bmp => Ok("image/bmp"),
        PictureFormat::Webp => Ok("image/webp"),
        PictureFormat::Png => Ok("image/png"),
        PictureFormat::Jpeg => Ok("image/jpeg"),
        other => Err(Error::UnsupportedPictureFormat(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_styles_are_symmetric() {
        for raw in 0u8..=13 {
            let style = BorderStyleType::try_from(raw).unwrap();
            assert_eq!(border_style_to_univer(border_style_to_excel(style)), style);
        }
    }

    #[test]
    fn test_alignment_fallbacks_are_asymmetric() {
        assert_eq!(vertical_to_excel(None), VerticalAlignment::Bottom);
        assert_eq!(
            vertical_to_excel(Some(VerticalAlign::Unspecified)),
            VerticalAlignment::Top
        );
        assert_eq!(vertical_to_font(VerticalAlignment::Justify), FontVerticalAlign::Bottom);

        assert_eq!(
            horizontal_to_excel(HorizontalAlign::Both),
            HorizontalAlignment::Fill
        );
        assert_eq!(
            horizontal_to_font(HorizontalAlignment::Right),
            FontHorizontalAlign::Normal
        );
    }

    #[test]
    fn test_icon_sets() {
        assert_eq!(icon_set_to_excel(Some(IconType::FiveFelling)), IconSetStyle::FiveArrows);
        assert_eq!(icon_set_to_excel(Some(IconType::FiveBoxes)), IconSetStyle::FiveArrows);
        assert_eq!(icon_set_to_excel(Some(IconType::ThreeStars)), IconSetStyle::ThreeArrows);
        assert_eq!(icon_set_to_excel(None), IconSetStyle::ThreeArrows);
        assert_eq!(
            icon_set_to_excel(Some(icon_set_to_univer(IconSetStyle::FourRating))),
            IconSetStyle::FourRating
        );
    }

    #[test]
    fn test_operators_and_types() {
        assert_eq!(
            icon_operator_to_excel(univer::CfOperator::LessThan),
            CfIconOperator::GreaterThan
        );
        assert_eq!(value_type_to_excel(None), CfValueType::Num);
        assert_eq!(time_period_to_excel(univer::CfOperator::Equal), TimePeriod::Today);
        assert_eq!(
            time_period_to_excel(time_period_to_univer(TimePeriod::LastWeek)),
            TimePeriod::LastWeek
        );
    }

    #[test]
    fn test_wrap_and_direction() {
        assert!(!wrap_from_strategy(None));
        assert!(!wrap_from_strategy(Some(WrapStrategy::Unspecified)));
        assert!(wrap_from_strategy(Some(WrapStrategy::Clip)));
        assert_eq!(
            reading_order_from_direction(TextDirection::Unspecified),
            ReadingOrder::ContextDependent
        );
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type(PictureFormat::Png).unwrap(), "image/png");
        assert_eq!(picture_format_from_mime("image/jpeg"), PictureFormat::Jpeg);
        assert_eq!(picture_format_from_mime("image/svg+xml"), PictureFormat::Unknown);
        assert!(matches!(
            mime_type(PictureFormat::Emf),
            Err(Error::UnsupportedPictureFormat(PictureFormat::Emf))
        ));
    }
}
