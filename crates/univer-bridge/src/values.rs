//! Cell value conversion in both directions.
//!
//! A formula always wins over a literal value: a cell carrying a formula is
//! written as the formula alone, on either side.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use univer_bridge_core::CellValue as WorkbookValue;
use univer_bridge_protocol::CellValue;

/// Date format used when sending dates to Univer
pub const DATE_FORMAT: &str = "%d/%m/%Y";
/// Time format used when sending times to Univer
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Timestamp format of Univer comments
pub const COMMENT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Read text as a date, with or without a time of day
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Read text as a time of day
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(text, fmt).ok())
}

/// The workbook value for a Univer cell, `None` when nothing is written.
///
/// A non-empty `formula` is returned as a formula value and the literal is
/// ignored. Text that reads as a date or a time becomes one.
pub fn to_workbook(value: &CellValue, formula: Option<&str>) -> Option<WorkbookValue> {
    if let Some(formula) = formula.filter(|f| !f.is_empty()) {
        return Some(WorkbookValue::formula(formula));
    }

    match value {
        CellValue::Absent => None,
        CellValue::Boolean(b) => Some(WorkbookValue::Boolean(*b)),
        CellValue::Number(n) => Some(WorkbookValue::Number(*n)),
        CellValue::Text(text) => Some(if let Some(dt) = parse_date_time(text) {
            WorkbookValue::DateTime(dt)
        } else if let Some(t) = parse_time(text) {
            WorkbookValue::Time(t)
        } else {
            WorkbookValue::Text(text.clone())
        }),
    }
}

/// The Univer value and formula for a workbook cell.
///
/// Formula cells return an absent value and `=` followed by the formula;
/// every other cell returns an empty formula.
pub fn to_univer(value: &WorkbookValue) -> (CellValue, String) {
    let value = match value {
        WorkbookValue::Formula { text, .. } => return (CellValue::Absent, format!("={text}")),
        WorkbookValue::Empty => CellValue::Absent,
        WorkbookValue::Boolean(b) => CellValue::Boolean(*b),
        WorkbookValue::Number(n) => CellValue::Number(*n),
        WorkbookValue::Text(s) => CellValue::Text(s.clone()),
        WorkbookValue::DateTime(dt) => CellValue::Text(dt.format(DATE_FORMAT).to_string()),
        WorkbookValue::Time(t) => CellValue::Text(t.format(TIME_FORMAT).to_string()),
        WorkbookValue::Error(e) => CellValue::Text(e.to_string()),
    };
    (value, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use univer_bridge_core::CellError;

    #[test]
    fn test_formula_suppresses_value() {
        let value = CellValue::Number(3.0);
        assert_eq!(
            to_workbook(&value, Some("=SUM(A1:A2)")),
            Some(WorkbookValue::formula("SUM(A1:A2)"))
        );
        assert_eq!(to_workbook(&value, Some("")), Some(WorkbookValue::Number(3.0)));

        let (value, formula) = to_univer(&WorkbookValue::formula("A1*2"));
        assert_eq!(value, CellValue::Absent);
        assert_eq!(formula, "=A1*2");
    }

    #[test]
    fn test_text_reads_as_dates_and_times() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            to_workbook(&CellValue::from("15/03/2024"), None),
            Some(WorkbookValue::DateTime(date.and_hms_opt(0, 0, 0).unwrap()))
        );
        assert_eq!(
            to_workbook(&CellValue::from("2024-03-15 10:30:00"), None),
            Some(WorkbookValue::DateTime(date.and_hms_opt(10, 30, 0).unwrap()))
        );
        assert_eq!(
            to_workbook(&CellValue::from("10:30:00"), None),
            Some(WorkbookValue::Time(NaiveTime::from_hms_opt(10, 30, 0).unwrap()))
        );
        assert_eq!(
            to_workbook(&CellValue::from("quarterly"), None),
            Some(WorkbookValue::text("quarterly"))
        );
    }

    #[test]
    fn test_absent_writes_nothing() {
        assert_eq!(to_workbook(&CellValue::Absent, None), None);
        assert_eq!(to_univer(&WorkbookValue::Empty), (CellValue::Absent, String::new()));
    }

    #[test]
    fn test_workbook_values_to_univer() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(to_univer(&WorkbookValue::DateTime(dt)).0, CellValue::from("01/12/2023"));
        assert_eq!(
            to_univer(&WorkbookValue::Time(NaiveTime::from_hms_opt(7, 5, 9).unwrap())).0,
            CellValue::from("07:05:09")
        );
        assert_eq!(
            to_univer(&WorkbookValue::Error(CellError::Div0)).0,
            CellValue::from("#DIV/0!")
        );
        assert_eq!(to_univer(&WorkbookValue::Boolean(true)).0, CellValue::Boolean(true));
    }
}
