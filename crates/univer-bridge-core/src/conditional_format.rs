//! Conditional formatting
//!
//! Rules apply a differential [`Style`] (highlight rules) or a visualisation
//! (data bars, color scales, icon sets) to one or more ranges.
//!
//! ## Example
//!
//! ```rust
//! use univer_bridge_core::{CellRange, CfOperator, ConditionalFormatRule, Workbook};
//! use univer_bridge_core::style::{Color, Style};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet("Sales").unwrap();
//!
//! let rule = ConditionalFormatRule::cell_is(CfOperator::GreaterThan, "100", None)
//!     .with_range(CellRange::parse("A1:A10").unwrap())
//!     .with_format(Style::new().fill_color(Color::rgb(255, 199, 206)));
//!
//! sheet.add_conditional_format(rule);
//! assert_eq!(sheet.conditional_formats().len(), 1);
//! ```

use crate::cell::CellRange;
use crate::style::{Color, Style};

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalFormatRule {
    /// Rule type
    pub rule_type: CfRuleType,
    /// Cell ranges this rule applies to
    pub ranges: Vec<CellRange>,
    /// Stop processing further rules if this one matches
    #[cfg_attr(feature = "serde", serde(default))]
    pub stop_if_true: bool,
    /// Differential format applied by highlight rules
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub format: Option<Style>,
}

impl ConditionalFormatRule {
    /// Create a new conditional format rule
    pub fn new(rule_type: CfRuleType) -> Self {
        Self {
            rule_type,
            ranges: Vec::new(),
            stop_if_true: false,
            format: None,
        }
    }

    /// Cell value comparison
    pub fn cell_is(
        operator: CfOperator,
        formula1: impl Into<String>,
        formula2: Option<String>,
    ) -> Self {
        Self::new(CfRuleType::CellIs {
            operator,
            formula1: formula1.into(),
            formula2,
        })
    }

    /// Add a range this rule applies to
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Replace the ranges this rule applies to
    pub fn with_ranges(mut self, ranges: Vec<CellRange>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set the differential format
    pub fn with_format(mut self, style: Style) -> Self {
        self.format = Some(style);
        self
    }

    /// Set stop-if-true
    pub fn with_stop_if_true(mut self, stop: bool) -> Self {
        self.stop_if_true = stop;
        self
    }
}

/// Kinds of conditional format rule
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum CfRuleType {
    /// Cell value comparison (e.g., "greater than 100")
    CellIs {
        operator: CfOperator,
        formula1: String,
        formula2: Option<String>,
    },

    /// Formula evaluates to TRUE (stored without `=`)
    Expression { formula: String },

    /// Color scale with 2 or 3 points
    ColorScale { points: Vec<CfColorValue> },

    /// Data bar
    DataBar {
        min: CfValue,
        max: CfValue,
        color: Color,
        negative_color: Option<Color>,
        show_value: bool,
    },

    /// Icon set; `values` holds one threshold per icon
    IconSet {
        style: IconSetStyle,
        values: Vec<CfIconValue>,
        show_value: bool,
    },

    /// Top/bottom N values
    Top10 { rank: u32, percent: bool, bottom: bool },

    /// Above/below average
    AboveAverage { above: bool },

    /// Contains text
    ContainsText { text: String },

    /// Does not contain text
    NotContainsText { text: String },

    /// Begins with text
    BeginsWith { text: String },

    /// Ends with text
    EndsWith { text: String },

    /// Duplicate values
    DuplicateValues,

    /// Unique values
    UniqueValues,

    /// Blank cells
    ContainsBlanks,

    /// Non-blank cells
    NotContainsBlanks,

    /// Cells containing errors
    ContainsErrors,

    /// Cells not containing errors
    NotContainsErrors,

    /// Dates in a period relative to today
    TimePeriod { period: TimePeriod },
}

impl CfRuleType {
    /// Get the XLSX type string for this rule type
    pub fn xlsx_type(&self) -> &'static str {
        match self {
            CfRuleType::CellIs { .. } => "cellIs",
            CfRuleType::Expression { .. } => "expression",
            CfRuleType::ColorScale { .. } => "colorScale",
            CfRuleType::DataBar { .. } => "dataBar",
            CfRuleType::IconSet { .. } => "iconSet",
            CfRuleType::Top10 { .. } => "top10",
            CfRuleType::AboveAverage { .. } => "aboveAverage",
            CfRuleType::ContainsText { .. } => "containsText",
            CfRuleType::NotContainsText { .. } => "notContainsText",
            CfRuleType::BeginsWith { .. } => "beginsWith",
            CfRuleType::EndsWith { .. } => "endsWith",
            CfRuleType::DuplicateValues => "duplicateValues",
            CfRuleType::UniqueValues => "uniqueValues",
            CfRuleType::ContainsBlanks => "containsBlanks",
            CfRuleType::NotContainsBlanks => "notContainsBlanks",
            CfRuleType::ContainsErrors => "containsErrors",
            CfRuleType::NotContainsErrors => "notContainsErrors",
            CfRuleType::TimePeriod { .. } => "timePeriod",
        }
    }
}

/// Operators for CellIs rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CfOperator {
    /// Value is between formula1 and formula2
    #[default]
    Between,
    /// Value is NOT between formula1 and formula2
    NotBetween,
    /// Value equals formula1
    Equal,
    /// Value does NOT equal formula1
    NotEqual,
    /// Value is greater than formula1
    GreaterThan,
    /// Value is less than formula1
    LessThan,
    /// Value is greater than or equal to formula1
    GreaterThanOrEqual,
    /// Value is less than or equal to formula1
    LessThanOrEqual,
}

impl CfOperator {
    /// Get the XLSX operator string
    pub fn xlsx_operator(&self) -> &'static str {
        match self {
            CfOperator::Between => "between",
            CfOperator::NotBetween => "notBetween",
            CfOperator::Equal => "equal",
            CfOperator::NotEqual => "notEqual",
            CfOperator::GreaterThan => "greaterThan",
            CfOperator::LessThan => "lessThan",
            CfOperator::GreaterThanOrEqual => "greaterThanOrEqual",
            CfOperator::LessThanOrEqual => "lessThanOrEqual",
        }
    }
}

/// Threshold for data bars
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfValue {
    /// How to interpret the value
    pub value_type: CfValueType,
    /// The value (absent for min/max)
    pub value: Option<String>,
}

impl CfValue {
    /// Create a new threshold
    pub fn new(value_type: CfValueType, value: Option<String>) -> Self {
        Self { value_type, value }
    }

    /// Lowest value in the range
    pub fn min() -> Self {
        Self::new(CfValueType::Min, None)
    }

    /// Highest value in the range
    pub fn max() -> Self {
        Self::new(CfValueType::Max, None)
    }
}

/// Color with value threshold for color scales
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfColorValue {
    /// How to interpret the value
    pub value_type: CfValueType,
    /// The value (absent for min/max)
    pub value: Option<String>,
    /// Color at this threshold
    pub color: Color,
}

impl CfColorValue {
    /// Create a new color point
    pub fn new(value_type: CfValueType, value: Option<String>, color: Color) -> Self {
        Self {
            value_type,
            value,
            color,
        }
    }
}

/// Comparison used by an icon threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CfIconOperator {
    /// Value > threshold
    GreaterThan,
    /// Value >= threshold
    #[default]
    EqualOrGreaterThan,
}

/// One icon threshold of an icon set
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CfIconValue {
    /// Comparison against the threshold
    pub operator: CfIconOperator,
    /// How to interpret the value
    pub value_type: CfValueType,
    /// The threshold
    pub value: Option<String>,
}

impl CfIconValue {
    /// Create a new icon threshold
    pub fn new(operator: CfIconOperator, value_type: CfValueType, value: Option<String>) -> Self {
        Self {
            operator,
            value_type,
            value,
        }
    }
}

/// Value types for conditional format thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CfValueType {
    /// Minimum value in range
    Min,
    /// Maximum value in range
    Max,
    /// Specific number
    #[default]
    Num,
    /// Percentage (0-100)
    Percent,
    /// Percentile (0-100)
    Percentile,
    /// Formula result
    Formula,
}

/// Icon set styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IconSetStyle {
    /// 3 arrows (up, right, down)
    #[default]
    ThreeArrows,
    /// 3 gray arrows
    ThreeArrowsGray,
    /// 3 flags
    ThreeFlags,
    /// 3 traffic lights (unrimmed)
    ThreeTrafficLights1,
    /// 3 traffic lights (rimmed)
    ThreeTrafficLights2,
    /// 3 signs
    ThreeSigns,
    /// 3 symbols (circled)
    ThreeSymbols,
    /// 3 symbols (uncircled)
    ThreeSymbols2,
    /// 4 arrows
    FourArrows,
    /// 4 gray arrows
    FourArrowsGray,
    /// 4 circles (red to black)
    FourRedToBlack,
    /// 4 ratings
    FourRating,
    /// 4 traffic lights
    FourTrafficLights,
    /// 5 arrows
    FiveArrows,
    /// 5 gray arrows
    FiveArrowsGray,
    /// 5 ratings
    FiveRating,
    /// 5 quarters
    FiveQuarters,
}

/// Time periods for date-based rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TimePeriod {
    /// Today
    #[default]
    Today,
    /// Yesterday
    Yesterday,
    /// Tomorrow
    Tomorrow,
    /// Last 7 days
    Last7Days,
    /// This week
    ThisWeek,
    /// Last week
    LastWeek,
    /// Next week
    NextWeek,
    /// This month
    ThisMonth,
    /// Last month
    LastMonth,
    /// Next month
    NextMonth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_type_names() {
        let top = CfRuleType::Top10 {
            rank: 10,
            percent: false,
            bottom: true,
        };
        assert_eq!(top.xlsx_type(), "top10");
        assert_eq!(
            CfRuleType::NotContainsText { text: "x".into() }.xlsx_type(),
            "notContainsText"
        );
    }
}
