use pretty_assertions::assert_eq;
use univer_bridge_protocol::{
    CellValue, CfRule, ConditionalFormatRule, Freeze, HighlightKind, RangeSpec, SheetInfo,
    StyleData, VerticalAlign,
};

#[test]
fn test_sheet_list_payload() {
    let json = r##"[
        {"id": "s1", "name": "Budget", "tabColor": "#00FF00",
         "maxUsed": {"startRow": 0, "endRow": 120, "startColumn": 0, "endColumn": 7}},
        {"id": "s2", "name": "Notes",
         "maxUsed": {"startRow": 0, "endRow": 0, "startColumn": 0, "endColumn": 0}}
    ]"##;
    let sheets: Vec<SheetInfo> = serde_json::from_str(json).unwrap();

    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].tab_color.as_deref(), Some("#00FF00"));
    assert_eq!(sheets[0].max_used, RangeSpec::new(0, 120, 0, 7));
    assert_eq!(sheets[1].tab_color, None);
}

#[test]
fn test_value_and_style_matrices() {
    let values: Vec<Vec<CellValue>> =
        serde_json::from_str(r#"[[42, null], ["2024-01-31", false]]"#).unwrap();
    assert_eq!(values[0][0], CellValue::Number(42.0));
    assert_eq!(values[1][1], CellValue::Boolean(false));

    let styles: Vec<Vec<Option<StyleData>>> =
        serde_json::from_str(r#"[[null, {"vt": 2}]]"#).unwrap();
    assert_eq!(styles[0][0], None);
    assert_eq!(
        styles[0][1].as_ref().and_then(|s| s.vt),
        Some(VerticalAlign::Middle)
    );
}

#[test]
fn test_freeze_payload() {
    let freeze: Freeze =
        serde_json::from_str(r#"{"startRow":-1,"startColumn":-1,"xSplit":0,"ySplit":0}"#)
            .unwrap();
    assert!(freeze.is_none());
}

#[test]
fn test_rule_round_trip_keeps_predicate() {
    let json = r##"{
        "cfId": "r1",
        "ranges": [{"startRow": 0, "endRow": 4, "startColumn": 0, "endColumn": 0}],
        "stopIfTrue": true,
        "rule": {"type": "highlightCell", "subType": "text", "operator": "beginsWith",
                 "value": "ab", "style": {"it": 1}}
    }"##;
    let rule: ConditionalFormatRule = serde_json::from_str(json).unwrap();
    let back: ConditionalFormatRule =
        serde_json::from_str(&serde_json::to_string(&rule).unwrap()).unwrap();

    assert_eq!(rule, back);
    assert!(back.stop_if_true);
    match back.rule {
        CfRule::HighlightCell(h) => assert!(matches!(h.kind, HighlightKind::Text { .. })),
        other => panic!("unexpected rule {other:?}"),
    }
}
