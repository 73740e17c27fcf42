//! Univer conditional formatting rules.
//!
//! A rule is one of four kinds, tagged by `type`. Highlight rules carry a
//! second tag, `subType`, selecting the predicate; the predicates are
//! mutually exclusive so they form their own closed enum.

use serde::{Deserialize, Serialize};

use crate::range::RangeSpec;
use crate::style::{BooleanNumber, ColorStyle, TextDecoration};

/// A conditional format applied to one or more ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatRule {
    pub cf_id: String,
    pub ranges: Vec<RangeSpec>,
    #[serde(default)]
    pub stop_if_true: bool,
    pub rule: CfRule,
}

/// The four rule kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum CfRule {
    DataBar {
        #[serde(default)]
        is_show_value: bool,
        config: DataBarConfig,
    },
    ColorScale {
        config: Vec<ColorScalePoint>,
    },
    IconSet {
        #[serde(default)]
        is_show_value: bool,
        config: Vec<IconSetConfig>,
    },
    HighlightCell(HighlightRule),
}

/// Predicate plus the style applied when it matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightRule {
    #[serde(flatten)]
    pub kind: HighlightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<HighlightStyle>,
}

/// Highlight predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "subType",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum HighlightKind {
    #[serde(rename = "uniqueValues")]
    Unique,
    #[serde(rename = "duplicateValues")]
    Duplicate,
    /// Top/bottom N items or percent
    Rank {
        #[serde(default)]
        is_bottom: bool,
        #[serde(default)]
        is_percent: bool,
        value: f64,
    },
    /// Custom formula, with its leading `=`
    Formula { value: String },
    Text {
        operator: CfOperator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    TimePeriod { operator: CfOperator },
    Number {
        operator: CfOperator,
        value: NumberOperand,
    },
    Average { operator: CfOperator },
}

/// A single threshold or a `[low, high]` pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOperand {
    Single(f64),
    Pair([f64; 2]),
}

impl NumberOperand {
    /// The first (or only) value
    pub fn first(&self) -> f64 {
        match self {
            NumberOperand::Single(v) => *v,
            NumberOperand::Pair([low, _]) => *low,
        }
    }

    /// Both bounds; a single value is used for both
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            NumberOperand::Single(v) => (*v, *v),
            NumberOperand::Pair([low, high]) => (*low, *high),
        }
    }
}

/// Style subset a highlight rule can apply
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl: Option<BooleanNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it: Option<BooleanNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ul: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub st: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<ColorStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<ColorStyle>,
}

/// Operators shared by highlight, icon-set and time-period rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CfOperator {
    BeginsWith,
    EndsWith,
    ContainsText,
    NotContainsText,
    Equal,
    NotEqual,
    ContainsBlanks,
    NotContainsBlanks,
    ContainsErrors,
    NotContainsErrors,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    NotBetween,
    Yesterday,
    Today,
    Tomorrow,
    #[serde(rename = "last7Days")]
    Last7Days,
    ThisWeek,
    LastWeek,
    NextWeek,
    ThisMonth,
    LastMonth,
    NextMonth,
}

/// How a threshold value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CfValueType {
    Num,
    Min,
    Max,
    Percent,
    Percentile,
    Formula,
}

/// A threshold value: numbers for most types, a string for formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CfScalar {
    Number(f64),
    Text(String),
}

/// Typed threshold
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CfValueConfig {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<CfValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<CfScalar>,
}

impl CfValueConfig {
    pub fn new(value_type: CfValueType, value: Option<CfScalar>) -> Self {
        Self {
            value_type: Some(value_type),
            value,
        }
    }

    pub fn number(value_type: CfValueType, value: f64) -> Self {
        Self::new(value_type, Some(CfScalar::Number(value)))
    }

    pub fn formula(text: impl Into<String>) -> Self {
        Self::new(CfValueType::Formula, Some(CfScalar::Text(text.into())))
    }

    /// Numeric reading of the value; numeric strings are accepted
    pub fn as_f64(&self) -> Option<f64> {
        match &self.value {
            Some(CfScalar::Number(v)) => Some(*v),
            Some(CfScalar::Text(s)) => s.trim().parse().ok(),
            None => None,
        }
    }

    /// Textual reading of the value
    pub fn as_text(&self) -> Option<String> {
        match &self.value {
            Some(CfScalar::Number(v)) => Some(v.to_string()),
            Some(CfScalar::Text(s)) => Some(s.clone()),
            None => None,
        }
    }
}

/// Data bar settings; colors are `#RRGGBBAA` strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBarConfig {
    pub min: CfValueConfig,
    pub max: CfValueConfig,
    #[serde(default)]
    pub is_gradient: bool,
    pub positive_color: String,
    pub native_color: String,
}

/// One stop of a color scale, ordered by `index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScalePoint {
    pub index: u32,
    pub color: String,
    pub value: CfValueConfig,
}

/// Icon families known to Univer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconType {
    #[serde(rename = "3Arrows")]
    ThreeArrows,
    #[serde(rename = "3ArrowsGray")]
    ThreeArrowsGray,
    #[serde(rename = "3Triangles")]
    ThreeTriangles,
    #[serde(rename = "3Stars")]
    ThreeStars,
    #[serde(rename = "3Flags")]
    ThreeFlags,
    #[serde(rename = "3TrafficLights1")]
    ThreeTrafficLights1,
    #[serde(rename = "3TrafficLights2")]
    ThreeTrafficLights2,
    #[serde(rename = "3Signs")]
    ThreeSigns,
    #[serde(rename = "3Symbols")]
    ThreeSymbols,
    #[serde(rename = "3Symbols2")]
    ThreeSymbols2,
    #[serde(rename = "4Arrows")]
    FourArrows,
    #[serde(rename = "4ArrowsGray")]
    FourArrowsGray,
    #[serde(rename = "4RedToBlack")]
    FourRedToBlack,
    #[serde(rename = "4Rating")]
    FourRating,
    #[serde(rename = "4TrafficLights")]
    FourTrafficLights,
    #[serde(rename = "5Arrows")]
    FiveArrows,
    #[serde(rename = "5ArrowsGray")]
    FiveArrowsGray,
    #[serde(rename = "5Rating")]
    FiveRating,
    #[serde(rename = "5Quarters")]
    FiveQuarters,
    #[serde(rename = "_5Felling")]
    FiveFelling,
    #[serde(rename = "5Boxes")]
    FiveBoxes,
}

/// One icon threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSetConfig {
    pub operator: CfOperator,
    pub value: CfValueConfig,
    pub icon_type: IconType,
    /// Position of the icon within its family, as a string
    pub icon_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_highlight_number_between() {
        let json = r##"{
            "cfId": "x1", "ranges": [{"startRow":0,"endRow":9,"startColumn":1,"endColumn":1}],
            "stopIfTrue": false,
            "rule": {
                "type": "highlightCell", "subType": "number", "operator": "between",
                "value": [1, 5], "style": {"bl": 1, "bg": {"rgb": "#FFFF00"}}
            }
        }"##;
        let rule: ConditionalFormatRule = serde_json::from_str(json).unwrap();
        let CfRule::HighlightCell(highlight) = rule.rule else {
            panic!("expected highlight rule");
        };
        assert_eq!(
            highlight.kind,
            HighlightKind::Number {
                operator: CfOperator::Between,
                value: NumberOperand::Pair([1.0, 5.0]),
            }
        );
        assert_eq!(highlight.style.and_then(|s| s.bl), Some(BooleanNumber::True));
    }

    #[test]
    fn test_decode_icon_set() {
        let json = r#"{
            "type": "iconSet", "isShowValue": true,
            "config": [
                {"operator": "greaterThanOrEqual", "value": {"type": "percent", "value": 67},
                 "iconType": "_5Felling", "iconId": "0"}
            ]
        }"#;
        let rule: CfRule = serde_json::from_str(json).unwrap();
        let CfRule::IconSet { config, .. } = rule else {
            panic!("expected icon set");
        };
        assert_eq!(config[0].icon_type, IconType::FiveFelling);
        assert_eq!(config[0].value.as_f64(), Some(67.0));
    }

    #[test]
    fn test_encode_rank_and_unique() {
        let rank = HighlightRule {
            kind: HighlightKind::Rank {
                is_bottom: true,
                is_percent: false,
                value: 3.0,
            },
            style: None,
        };
        let json = serde_json::to_value(CfRule::HighlightCell(rank)).unwrap();
        assert_eq!(json["type"], "highlightCell");
        assert_eq!(json["subType"], "rank");
        assert_eq!(json["isBottom"], true);

        let unique = serde_json::to_value(CfRule::HighlightCell(HighlightRule {
            kind: HighlightKind::Unique,
            style: None,
        }))
        .unwrap();
        assert_eq!(unique["subType"], "uniqueValues");
    }

    #[test]
    fn test_value_config_readings() {
        assert_eq!(CfValueConfig::formula("=A1").as_text().as_deref(), Some("=A1"));
        assert_eq!(CfValueConfig::formula("12.5").as_f64(), Some(12.5));
        assert_eq!(CfValueConfig::default().as_f64(), None);
    }
}
