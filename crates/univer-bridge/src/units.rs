//! Length conversions between the editor (pixels) and the workbook
//! (points for heights and offsets, character units for column widths)

use crate::error::{Error, Result};

/// Univer's default row height in pixels
pub const DEFAULT_ROW_HEIGHT_PX: f64 = 24.0;
/// Workbook default row height in points
pub const DEFAULT_ROW_HEIGHT_PT: f64 = 15.0;
/// Univer's default column width in pixels
pub const DEFAULT_COLUMN_WIDTH_PX: f64 = 88.0;
/// Workbook default column width in character units
pub const DEFAULT_COLUMN_WIDTH_CHARS: f64 = 8.43;

const PX_PER_PT: f64 = 1.33333333333;
const PT_PER_PX: f64 = 0.75;

/// Row height, pixels to points
pub fn row_px_to_pt(px: f64) -> f64 {
    if px == DEFAULT_ROW_HEIGHT_PX {
        DEFAULT_ROW_HEIGHT_PT
    } else {
        px * DEFAULT_ROW_HEIGHT_PT / DEFAULT_ROW_HEIGHT_PX
    }
}

/// Row height, points to pixels
pub fn row_pt_to_px(pt: f64) -> f64 {
    if pt == DEFAULT_ROW_HEIGHT_PT {
        DEFAULT_ROW_HEIGHT_PX
    } else {
        pt * DEFAULT_ROW_HEIGHT_PX / DEFAULT_ROW_HEIGHT_PT
    }
}

/// Column width, pixels to character units
pub fn column_px_to_chars(px: f64) -> f64 {
    if px == DEFAULT_COLUMN_WIDTH_PX {
        DEFAULT_COLUMN_WIDTH_CHARS
    } else {
        px * DEFAULT_COLUMN_WIDTH_CHARS / DEFAULT_COLUMN_WIDTH_PX
    }
}

/// Column width, character units to pixels
pub fn column_chars_to_px(chars: f64) -> f64 {
    if chars == DEFAULT_COLUMN_WIDTH_CHARS {
        DEFAULT_COLUMN_WIDTH_PX
    } else {
        chars * DEFAULT_COLUMN_WIDTH_PX / DEFAULT_COLUMN_WIDTH_CHARS
    }
}

pub fn points_to_pixels(pt: f64) -> f64 {
    pt * PX_PER_PT
}

pub fn pixels_to_points(px: f64) -> f64 {
    px * PT_PER_PX
}

/// Every index from `start` to `end`, inclusive
pub fn values_between(start: i32, end: i32) -> Result<Vec<i32>> {
    if start > end {
        return Err(Error::InvalidArgument(format!(
            "range start {start} is after its end {end}"
        )));
    }
    Ok((start..=end).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_defaults() {
        assert_eq!(row_px_to_pt(24.0), 15.0);
        assert_eq!(row_pt_to_px(15.0), 24.0);
        assert_eq!(column_px_to_chars(88.0), 8.43);
        assert_eq!(column_chars_to_px(8.43), 88.0);
    }

    #[test]
    fn test_scaled_values() {
        assert_eq!(row_px_to_pt(48.0), 30.0);
        assert_eq!(row_pt_to_px(30.0), 48.0);
        assert!((column_px_to_chars(176.0) - 16.86).abs() < 1e-9);
        assert_eq!(pixels_to_points(100.0), 75.0);
        assert!((points_to_pixels(75.0) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_values_between() {
        assert_eq!(values_between(2, 5).unwrap(), vec![2, 3, 4, 5]);
        assert_eq!(values_between(3, 3).unwrap(), vec![3]);
        assert!(values_between(4, 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_row_round_trip(px in 0.0f64..2000.0) {
            prop_assert!((row_pt_to_px(row_px_to_pt(px)) - px).abs() < 1e-9);
        }

        #[test]
        fn prop_column_round_trip(px in 0.0f64..2000.0) {
            prop_assert!((column_chars_to_px(column_px_to_chars(px)) - px).abs() < 1e-9);
        }

        #[test]
        fn prop_point_pixel_round_trip(pt in 0.0f64..2000.0) {
            prop_assert!((pixels_to_points(points_to_pixels(pt)) - pt).abs() < 1e-6);
        }
    }
}
