//! Conditional format rule conversion.
//!
//! Both directions return `Ok(None)` for rule kinds the other side cannot
//! express; callers log and move on.

use univer_bridge_core as excel;
use univer_bridge_core::style::Theme;
use univer_bridge_core::{CfColorValue, CfIconValue, CfRuleType, CfValue};
use univer_bridge_protocol as univer;
use univer_bridge_protocol::{
    CfOperator, CfRule, CfScalar, CfValueConfig, ColorScalePoint, DataBarConfig, HighlightKind,
    HighlightRule, IconSetConfig, NumberOperand, RangeSpec,
};

use crate::color::{format_color, parse_color, parse_optional_color};
use crate::error::{Error, Result};
use crate::mapping;
use crate::style::{highlight_format, highlight_style};

/// Negative bar color used when a workbook data bar has none
pub const DEFAULT_NEGATIVE_BAR_COLOR: &str = "#FF0000FF";

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn unquote(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .map_or_else(|| text.to_string(), |t| t.replace("\"\"", "\""))
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse().ok()
}

/// Threshold value of a typed Univer slot
fn slot_value(config: &CfValueConfig) -> Option<String> {
    match config.value_type {
        Some(univer::CfValueType::Min) | Some(univer::CfValueType::Max) => None,
        Some(univer::CfValueType::Formula) => config.as_text(),
        _ => config
            .as_f64()
            .map(|v| v.to_string())
            .or_else(|| config.as_text()),
    }
}

fn cf_value(config: &CfValueConfig) -> CfValue {
    CfValue::new(mapping::value_type_to_excel(config.value_type), slot_value(config))
}

/// Typed Univer slot for a workbook threshold
fn value_config(value_type: excel::CfValueType, value: Option<&str>) -> CfValueConfig {
    let value = match value_type {
        excel::CfValueType::Min | excel::CfValueType::Max => None,
        excel::CfValueType::Formula => Some(CfScalar::Text(value.unwrap_or_default().to_string())),
        _ => Some(CfScalar::Number(value.and_then(parse_number).unwrap_or(0.0))),
    };
    CfValueConfig::new(mapping::value_type_to_univer(value_type), value)
}

/// Convert a Univer rule for the workbook.
///
/// A highlight rule without a style fails; average highlights and color
/// scales outside two or three points are skipped.
pub fn to_workbook_rule(
    rule: &univer::ConditionalFormatRule,
) -> Result<Option<excel::ConditionalFormatRule>> {
    let ranges = rule
        .ranges
        .iter()
        .map(RangeSpec::to_cell_range)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let converted = match &rule.rule {
        CfRule::DataBar {
            is_show_value,
            config,
        } => excel::ConditionalFormatRule::new(CfRuleType::DataBar {
            min: cf_value(&config.min),
            max: cf_value(&config.max),
            color: parse_color(&config.positive_color)?,
            negative_color: parse_optional_color(Some(config.native_color.as_str()))?,
            show_value: *is_show_value,
        }),

        CfRule::ColorScale { config } => {
            if !(2..=3).contains(&config.len()) {
                tracing::warn!(
                    "Skipping color scale {} with {} points",
                    rule.cf_id,
                    config.len()
                );
                return Ok(None);
            }
            let mut stops: Vec<&ColorScalePoint> = config.iter().collect();
            stops.sort_by_key(|p| p.index);
            let points = stops
                .into_iter()
                .map(|p| -> Result<CfColorValue> {
                    Ok(CfColorValue::new(
                        mapping::value_type_to_excel(p.value.value_type),
                        slot_value(&p.value),
                        parse_color(&p.color)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            excel::ConditionalFormatRule::new(CfRuleType::ColorScale { points })
        }

        CfRule::IconSet {
            is_show_value,
            config,
        } => {
            let Some(first) = config.first() else {
                tracing::warn!("Skipping icon set {} without icons", rule.cf_id);
                return Ok(None);
            };
            let values = config
                .iter()
                .map(|icon| {
                    CfIconValue::new(
                        mapping::icon_operator_to_excel(icon.operator),
                        mapping::value_type_to_excel(icon.value.value_type),
                        slot_value(&icon.value),
                    )
                })
                .collect();
            excel::ConditionalFormatRule::new(CfRuleType::IconSet {
                style: mapping::icon_set_to_excel(Some(first.icon_type)),
                values,
                show_value: *is_show_value,
            })
        }

        CfRule::HighlightCell(highlight) => {
            if matches!(highlight.kind, HighlightKind::Average { .. }) {
                tracing::debug!("Skipping average rule {}", rule.cf_id);
                return Ok(None);
            }
            let style = highlight
                .style
                .as_ref()
                .ok_or_else(|| Error::MissingHighlightStyle(rule.cf_id.clone()))?;
            let Some(rule_type) = highlight_rule_type(&highlight.kind) else {
                return Ok(None);
            };
            excel::ConditionalFormatRule::new(rule_type).with_format(highlight_format(style)?)
        }
    };

    Ok(Some(
        converted
            .with_ranges(ranges)
            .with_stop_if_true(rule.stop_if_true),
    ))
}

fn highlight_rule_type(kind: &HighlightKind) -> Option<CfRuleType> {
    let cell_is = |operator, formula1: String, formula2: Option<String>| CfRuleType::CellIs {
        operator,
        formula1,
        formula2,
    };

    let rule_type = match kind {
        HighlightKind::Unique => CfRuleType::UniqueValues,
        HighlightKind::Duplicate => CfRuleType::DuplicateValues,
        HighlightKind::Rank {
            is_bottom,
            is_percent,
            value,
        } => CfRuleType::Top10 {
            rank: value.max(0.0) as u32,
            percent: *is_percent,
            bottom: *is_bottom,
        },
        HighlightKind::Formula { value } => CfRuleType::Expression {
            formula: value.strip_prefix('=').unwrap_or(value).to_string(),
        },
        HighlightKind::Text { operator, value } => {
            let text = value.clone().unwrap_or_default();
            match operator {
                CfOperator::BeginsWith => CfRuleType::BeginsWith { text },
                CfOperator::EndsWith => CfRuleType::EndsWith { text },
                CfOperator::ContainsText => CfRuleType::ContainsText { text },
                CfOperator::NotContainsText => CfRuleType::NotContainsText { text },
                CfOperator::NotEqual => cell_is(excel::CfOperator::NotEqual, quote(&text), None),
                CfOperator::ContainsBlanks => CfRuleType::ContainsBlanks,
                CfOperator::NotContainsBlanks => CfRuleType::NotContainsBlanks,
                CfOperator::ContainsErrors => CfRuleType::ContainsErrors,
                CfOperator::NotContainsErrors => CfRuleType::NotContainsErrors,
                _ => cell_is(excel::CfOperator::Equal, quote(&text), None),
            }
        }
        HighlightKind::TimePeriod { operator } => CfRuleType::TimePeriod {
            period: mapping::time_period_to_excel(*operator),
        },
        HighlightKind::Number { operator, value } => {
            let (low, high) = value.bounds();
            match operator {
                CfOperator::Between => cell_is(
                    excel::CfOperator::Between,
                    low.to_string(),
                    Some(high.to_string()),
                ),
                CfOperator::NotBetween => cell_is(
                    excel::CfOperator::NotBetween,
                    low.to_string(),
                    Some(high.to_string()),
                ),
                other => {
                    let operator = match other {
                        CfOperator::NotEqual => excel::CfOperator::NotEqual,
                        CfOperator::GreaterThan => excel::CfOperator::GreaterThan,
                        CfOperator::GreaterThanOrEqual => excel::CfOperator::GreaterThanOrEqual,
                        CfOperator::LessThan => excel::CfOperator::LessThan,
                        CfOperator::LessThanOrEqual => excel::CfOperator::LessThanOrEqual,
                        _ => excel::CfOperator::Equal,
                    };
                    cell_is(operator, value.first().to_string(), None)
                }
            }
        }
        HighlightKind::Average { .. } => return None,
    };
    Some(rule_type)
}

/// Convert a workbook rule for Univer under the id `cf_id`.
///
/// Above-average and error rules are skipped, as are cell-is comparisons
/// that Univer can only express numerically when the operand is not a
/// number.
pub fn to_univer_rule(
    rule: &excel::ConditionalFormatRule,
    cf_id: String,
    theme: &Theme,
) -> Option<univer::ConditionalFormatRule> {
    let highlight = |kind: HighlightKind| {
        CfRule::HighlightCell(HighlightRule {
            kind,
            style: rule.format.as_ref().map(|f| highlight_style(f, theme)),
        })
    };

    let converted = match &rule.rule_type {
        CfRuleType::IconSet {
            style,
            values,
            show_value,
        } => CfRule::IconSet {
            is_show_value: *show_value,
            config: values
                .iter()
                .enumerate()
                .map(|(index, icon)| IconSetConfig {
                    operator: if index == 0 {
                        CfOperator::LessThanOrEqual
                    } else {
                        mapping::icon_operator_to_univer(icon.operator)
                    },
                    value: value_config(icon.value_type, icon.value.as_deref()),
                    icon_type: mapping::icon_set_to_univer(*style),
                    icon_id: index.to_string(),
                })
                .collect(),
        },

        CfRuleType::DataBar {
            min,
            max,
            color,
            negative_color,
            show_value,
        } => CfRule::DataBar {
            is_show_value: *show_value,
            config: DataBarConfig {
                min: value_config(min.value_type, min.value.as_deref()),
                max: value_config(max.value_type, max.value.as_deref()),
                is_gradient: true,
                positive_color: format_color(color, theme, false),
                native_color: negative_color.as_ref().map_or_else(
                    || DEFAULT_NEGATIVE_BAR_COLOR.to_string(),
                    |c| format_color(c, theme, false),
                ),
            },
        },

        CfRuleType::ColorScale { points } => CfRule::ColorScale {
            config: points
                .iter()
                .enumerate()
                .map(|(index, point)| ColorScalePoint {
                    index: index as u32,
                    color: format_color(&point.color, theme, false),
                    value: value_config(point.value_type, point.value.as_deref()),
                })
                .collect(),
        },

        CfRuleType::CellIs {
            operator,
            formula1,
            formula2,
        } => highlight(cell_is_kind(*operator, formula1, formula2.as_deref())?),

        CfRuleType::Expression { formula } => highlight(HighlightKind::Formula {
            value: format!("={formula}"),
        }),
        CfRuleType::Top10 {
            rank,
            percent,
            bottom,
        } => highlight(HighlightKind::Rank {
            is_bottom: *bottom,
            is_percent: *percent,
            value: f64::from(*rank),
        }),
        CfRuleType::ContainsText { text } => highlight(text_kind(CfOperator::ContainsText, text)),
        CfRuleType::NotContainsText { text } => {
            highlight(text_kind(CfOperator::NotContainsText, text))
        }
        CfRuleType::BeginsWith { text } => highlight(text_kind(CfOperator::BeginsWith, text)),
        CfRuleType::EndsWith { text } => highlight(text_kind(CfOperator::EndsWith, text)),
        CfRuleType::DuplicateValues => highlight(HighlightKind::Duplicate),
        CfRuleType::UniqueValues => highlight(HighlightKind::Unique),
        CfRuleType::ContainsBlanks => highlight(HighlightKind::Text {
            operator: CfOperator::ContainsBlanks,
            value: None,
        }),
        CfRuleType::NotContainsBlanks => highlight(HighlightKind::Text {
            operator: CfOperator::NotContainsBlanks,
            value: None,
        }),
        CfRuleType::TimePeriod { period } => highlight(HighlightKind::TimePeriod {
            operator: mapping::time_period_to_univer(*period),
        }),
        CfRuleType::AboveAverage { .. }
        | CfRuleType::ContainsErrors
        | CfRuleType::NotContainsErrors => {
            tracing::debug!("Skipping {} rule", rule.rule_type.xlsx_type());
            return None;
        }
    };

    Some(univer::ConditionalFormatRule {
        cf_id,
        ranges: rule.ranges.iter().copied().map(RangeSpec::from).collect(),
        stop_if_true: rule.stop_if_true,
        rule: converted,
    })
}

fn text_kind(operator: CfOperator, text: &str) -> HighlightKind {
    HighlightKind::Text {
        operator,
        value: Some(text.to_string()),
    }
}

fn cell_is_kind(
    operator: excel::CfOperator,
    formula1: &str,
    formula2: Option<&str>,
) -> Option<HighlightKind> {
    let first = parse_number(formula1);
    let number = |operator, value| Some(HighlightKind::Number { operator, value });

    let skip = |reason: &str| {
        tracing::warn!(
            "Skipping {} rule on '{}': {}",
            operator.xlsx_operator(),
            formula1,
            reason
        );
        None
    };

    match (operator, first) {
        (excel::CfOperator::Equal, Some(v)) => number(CfOperator::Equal, NumberOperand::Single(v)),
        (excel::CfOperator::Equal, None) => Some(HighlightKind::Text {
            operator: CfOperator::Equal,
            value: Some(unquote(formula1)),
        }),
        (excel::CfOperator::NotEqual, Some(v)) => {
            number(CfOperator::NotEqual, NumberOperand::Single(v))
        }
        (excel::CfOperator::GreaterThan, Some(v)) => {
            number(CfOperator::GreaterThan, NumberOperand::Single(v))
        }
        (excel::CfOperator::GreaterThanOrEqual, Some(v)) => {
            number(CfOperator::GreaterThanOrEqual, NumberOperand::Single(v))
        }
        (excel::CfOperator::LessThan, Some(v)) => {
            number(CfOperator::LessThan, NumberOperand::Single(v))
        }
        (excel::CfOperator::LessThanOrEqual, Some(v)) => {
            number(CfOperator::LessThanOrEqual, NumberOperand::Single(v))
        }
        (excel::CfOperator::Between | excel::CfOperator::NotBetween, Some(low)) => {
            let Some(high) = formula2.and_then(parse_number) else {
                return skip("upper bound is not a number");
            };
            let operator = if operator == excel::CfOperator::Between {
                CfOperator::Between
            } else {
                CfOperator::NotBetween
            };
            number(operator, NumberOperand::Pair([low, high]))
        }
        (_, None) => skip("operand is not a number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use univer_bridge_core::style::{Color, Style};
    use univer_bridge_core::{CellRange, IconSetStyle, TimePeriod};
    use univer_bridge_protocol::{BooleanNumber, ColorStyle, HighlightStyle, IconType};

    fn univer_rule(rule: CfRule) -> univer::ConditionalFormatRule {
        univer::ConditionalFormatRule {
            cf_id: "cf1".into(),
            ranges: vec![RangeSpec::new(0, 9, 1, 1)],
            stop_if_true: true,
            rule,
        }
    }

    fn styled(kind: HighlightKind) -> CfRule {
        CfRule::HighlightCell(HighlightRule {
            kind,
            style: Some(HighlightStyle {
                bl: Some(BooleanNumber::True),
                bg: Some(ColorStyle::rgb("#FFC7CE")),
                ..Default::default()
            }),
        })
    }

    #[test]
    fn test_number_between_to_workbook() {
        let rule = univer_rule(styled(HighlightKind::Number {
            operator: CfOperator::Between,
            value: NumberOperand::Pair([1.0, 5.5]),
        }));
        let converted = to_workbook_rule(&rule).unwrap().unwrap();
        assert_eq!(
            converted.rule_type,
            CfRuleType::CellIs {
                operator: excel::CfOperator::Between,
                formula1: "1".into(),
                formula2: Some("5.5".into()),
            }
        );
        assert_eq!(converted.ranges, vec![CellRange::parse("B1:B10").unwrap()]);
        assert!(converted.stop_if_true);
        assert!(converted.format.unwrap().font.bold);
    }

    #[test]
    fn test_text_equal_is_quoted() {
        let rule = univer_rule(styled(HighlightKind::Text {
            operator: CfOperator::Equal,
            value: Some("done".into()),
        }));
        let converted = to_workbook_rule(&rule).unwrap().unwrap();
        assert_eq!(
            converted.rule_type,
            CfRuleType::CellIs {
                operator: excel::CfOperator::Equal,
                formula1: "\"done\"".into(),
                formula2: None,
            }
        );
    }

    #[test]
    fn test_highlight_without_style_fails() {
        let rule = univer_rule(CfRule::HighlightCell(HighlightRule {
            kind: HighlightKind::Unique,
            style: None,
        }));
        assert!(matches!(
            to_workbook_rule(&rule),
            Err(Error::MissingHighlightStyle(id)) if id == "cf1"
        ));
    }

    #[test]
    fn test_unsupported_rules_are_skipped() {
        let average = univer_rule(styled(HighlightKind::Average {
            operator: CfOperator::GreaterThan,
        }));
        assert_eq!(to_workbook_rule(&average).unwrap(), None);

        let scale = univer_rule(CfRule::ColorScale {
            config: vec![ColorScalePoint {
                index: 0,
                color: "#FF0000".into(),
                value: CfValueConfig::new(univer::CfValueType::Min, None),
            }],
        });
        assert_eq!(to_workbook_rule(&scale).unwrap(), None);
    }

    #[test]
    fn test_data_bar_and_icon_set_to_workbook() {
        let bar = univer_rule(CfRule::DataBar {
            is_show_value: false,
            config: DataBarConfig {
                min: CfValueConfig::new(univer::CfValueType::Min, None),
                max: CfValueConfig::number(univer::CfValueType::Percent, 90.0),
                is_gradient: true,
                positive_color: "#638EC6".into(),
                native_color: String::new(),
            },
        });
        let converted = to_workbook_rule(&bar).unwrap().unwrap();
        assert_eq!(
            converted.rule_type,
            CfRuleType::DataBar {
                min: CfValue::min(),
                max: CfValue::new(excel::CfValueType::Percent, Some("90".into())),
                color: Color::rgb(0x63, 0x8E, 0xC6),
                negative_color: None,
                show_value: false,
            }
        );

        let icons = univer_rule(CfRule::IconSet {
            is_show_value: true,
            config: vec![IconSetConfig {
                operator: CfOperator::GreaterThanOrEqual,
                value: CfValueConfig::formula("=$A$1"),
                icon_type: IconType::FiveBoxes,
                icon_id: "0".into(),
            }],
        });
        let converted = to_workbook_rule(&icons).unwrap().unwrap();
        let CfRuleType::IconSet { style, values, .. } = converted.rule_type else {
            panic!("expected icon set");
        };
        assert_eq!(style, IconSetStyle::FiveArrows);
        assert_eq!(
            values,
            vec![CfIconValue::new(
                excel::CfIconOperator::EqualOrGreaterThan,
                excel::CfValueType::Formula,
                Some("=$A$1".into()),
            )]
        );
    }

    #[test]
    fn test_cell_is_to_univer() {
        let theme = Theme::default();
        let format = Style::new().bold(true);
        let rule = excel::ConditionalFormatRule::cell_is(excel::CfOperator::Equal, "\"yes\"", None)
            .with_range(CellRange::parse("A1:A5").unwrap())
            .with_format(format);
        let converted = to_univer_rule(&rule, "id1".into(), &theme).unwrap();
        assert_eq!(converted.ranges, vec![RangeSpec::new(0, 4, 0, 0)]);
        let CfRule::HighlightCell(highlight) = converted.rule else {
            panic!("expected highlight");
        };
        assert_eq!(
            highlight.kind,
            HighlightKind::Text {
                operator: CfOperator::Equal,
                value: Some("yes".into()),
            }
        );
        assert_eq!(highlight.style.and_then(|s| s.bl), Some(BooleanNumber::True));

        let between =
            excel::ConditionalFormatRule::cell_is(excel::CfOperator::Between, "1,5", Some("3".into()));
        let CfRule::HighlightCell(highlight) =
            to_univer_rule(&between, "id2".into(), &theme).unwrap().rule
        else {
            panic!("expected highlight");
        };
        assert_eq!(
            highlight.kind,
            HighlightKind::Number {
                operator: CfOperator::Between,
                value: NumberOperand::Pair([1.5, 3.0]),
            }
        );
    }

    #[test]
    fn test_text_not_equal_is_skipped_on_import() {
        let rule = excel::ConditionalFormatRule::cell_is(excel::CfOperator::NotEqual, "\"x\"", None);
        assert_eq!(to_univer_rule(&rule, "id".into(), &Theme::default()), None);

        let average = excel::ConditionalFormatRule::new(CfRuleType::AboveAverage { above: true });
        assert_eq!(to_univer_rule(&average, "id".into(), &Theme::default()), None);
    }

    #[test]
    fn test_icon_set_to_univer() {
        let rule = excel::ConditionalFormatRule::new(CfRuleType::IconSet {
            style: IconSetStyle::ThreeFlags,
            values: vec![
                CfIconValue::new(
                    excel::CfIconOperator::EqualOrGreaterThan,
                    excel::CfValueType::Percent,
                    Some("0".into()),
                ),
                CfIconValue::new(
                    excel::CfIconOperator::GreaterThan,
                    excel::CfValueType::Formula,
                    None,
                ),
            ],
            show_value: true,
        });
        let CfRule::IconSet { config, .. } =
            to_univer_rule(&rule, "id".into(), &Theme::default()).unwrap().rule
        else {
            panic!("expected icon set");
        };
        assert_eq!(config[0].operator, CfOperator::LessThanOrEqual);
        assert_eq!(config[0].value.as_f64(), Some(0.0));
        assert_eq!(config[1].operator, CfOperator::GreaterThan);
        assert_eq!(config[1].value, CfValueConfig::formula(""));
        assert_eq!(config[1].icon_type, IconType::ThreeFlags);
        assert_eq!(config[1].icon_id, "1");
    }

    #[test]
    fn test_data_bar_and_time_period_to_univer() {
        let theme = Theme::default();
        let bar = excel::ConditionalFormatRule::new(CfRuleType::DataBar {
            min: CfValue::min(),
            max: CfValue::max(),
            color: Color::rgb(0x63, 0x8E, 0xC6),
            negative_color: None,
            show_value: true,
        });
        let CfRule::DataBar { config, .. } = to_univer_rule(&bar, "b".into(), &theme).unwrap().rule
        else {
            panic!("expected data bar");
        };
        assert_eq!(config.positive_color, "#638EC6FF");
        assert_eq!(config.native_color, DEFAULT_NEGATIVE_BAR_COLOR);
        assert_eq!(config.min.value, None);

        let period = excel::ConditionalFormatRule::new(CfRuleType::TimePeriod {
            period: TimePeriod::LastMonth,
        });
        let CfRule::HighlightCell(highlight) =
            to_univer_rule(&period, "t".into(), &theme).unwrap().rule
        else {
            panic!("expected highlight");
        };
        assert_eq!(
            highlight.kind,
            HighlightKind::TimePeriod {
                operator: CfOperator::LastMonth
            }
        );
    }
}
