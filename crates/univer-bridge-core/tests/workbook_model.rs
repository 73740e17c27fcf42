use pretty_assertions::assert_eq;
use univer_bridge_core::style::{BorderLineStyle, BorderStyle, Color, Style};
use univer_bridge_core::{
    CellAddress, CellComment, CellRange, CellValue, CfOperator, ConditionalFormatRule, Picture,
    PictureFormat, Workbook,
};

fn sample_workbook() -> Workbook {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet("Report").unwrap();

    sheet.set_cell_value("A1", "Region").unwrap();
    sheet.set_cell_value("B1", 1250.5).unwrap();
    sheet.set_cell_formula_at(1, 1, "=SUM(B1:B1)").unwrap();
    sheet
        .set_cell_style(
            "A1",
            &Style::new()
                .bold(true)
                .fill_color(Color::rgb(0xDD, 0xEE, 0xFF))
                .border(BorderStyle::new().with_bottom(BorderLineStyle::Thin, Color::BLACK)),
        )
        .unwrap();
    sheet.merge_cells(&CellRange::parse("C1:D2").unwrap()).unwrap();
    sheet.set_auto_filter(Some(CellRange::parse("A1:B2").unwrap()));
    sheet.set_freeze_panes(1, 0);
    sheet
        .set_comment("B1", CellComment::new("Ada", "quarterly"))
        .unwrap();
    sheet.set_column_width(0, 20.0);
    sheet.add_picture(
        Picture::from_bytes(vec![0x89, b'P', b'N', b'G'], CellAddress::new(4, 1))
            .with_offset(3.0, 1.5)
            .with_size(64, 32),
    );
    sheet.add_conditional_format(
        ConditionalFormatRule::cell_is(CfOperator::LessThan, "0", None)
            .with_range(CellRange::parse("B1:B2").unwrap())
            .with_format(Style::new().font_color(Color::RED)),
    );

    workbook
}

#[test]
fn test_sheet_features_are_recorded() {
    let workbook = sample_workbook();
    let sheet = workbook.worksheet(0).unwrap();

    assert_eq!(sheet.used_range(), Some(CellRange::parse("A1:B2").unwrap()));
    assert_eq!(sheet.value_at(1, 1).formula_text(), Some("SUM(B1:B1)"));
    assert!(sheet.cell_style_at(0, 0).font.bold);
    assert!(!sheet.cell_style_at(0, 1).font.bold);
    assert_eq!(sheet.merged_regions().len(), 1);
    assert_eq!(sheet.auto_filter().map(|r| r.to_string()), Some("A1:B2".into()));
    assert_eq!(sheet.freeze_panes().map(|f| f.rows), Some(1));
    assert_eq!(sheet.comment("B1").unwrap().map(|c| c.text.as_str()), Some("quarterly"));
    assert_eq!(sheet.column_width(0), 20.0);
    assert_eq!(sheet.pictures()[0].format, PictureFormat::Png);
    assert_eq!(
        sheet.conditional_formats()[0].ranges,
        vec![CellRange::parse("B1:B2").unwrap()]
    );
}

#[test]
fn test_comment_does_not_disturb_value() {
    let workbook = sample_workbook();
    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.value_at(0, 1), &CellValue::Number(1250.5));
}

#[cfg(feature = "serde")]
#[test]
fn test_json_round_trip_keeps_model() {
    let workbook = sample_workbook();
    let json = serde_json::to_string(&workbook).unwrap();
    let back: Workbook = serde_json::from_str(&json).unwrap();
    let (a, b) = (workbook.worksheet(0).unwrap(), back.worksheet(0).unwrap());

    assert_eq!(a.cell_style_at(0, 0), b.cell_style_at(0, 0));
    assert_eq!(a.value_at(1, 1), b.value_at(1, 1));
    assert_eq!(a.pictures(), b.pictures());
    assert_eq!(a.conditional_formats(), b.conditional_formats());
}
