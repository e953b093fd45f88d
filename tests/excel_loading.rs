#![cfg(feature = "excel")]

use nik_reconcile::ingestion::excel::{list_sheets, parse_first_sheet, parse_sheet};
use nik_reconcile::ingestion::{LoadOptions, TableFormat, load};
use nik_reconcile::processing::{ColumnSelection, clean};
use nik_reconcile::types::Value;
use nik_reconcile::LoadError;

fn members_xlsx() -> Vec<u8> {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();

    // Sheet1: header + identifiers stored both as numbers and as text
    let ws1 = wb.add_worksheet();
    ws1.set_name("Members").unwrap();
    ws1.write_string(0, 0, "MemberNo").unwrap();
    ws1.write_string(0, 1, "Name").unwrap();
    ws1.write_number(1, 0, 3201234567890123_f64).unwrap();
    ws1.write_string(1, 1, "Ada").unwrap();
    ws1.write_string(2, 0, "3209999999999999").unwrap();
    ws1.write_string(2, 1, "Grace").unwrap();
    ws1.write_boolean(3, 0, true).unwrap();

    // Sheet2: a single identity row
    let ws2 = wb.add_worksheet();
    ws2.set_name("Census").unwrap();
    ws2.write_string(0, 0, "IdentityNo").unwrap();
    ws2.write_string(1, 0, "3208888888888888").unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn list_sheets_in_workbook_order() {
    let bytes = members_xlsx();
    assert_eq!(list_sheets(&bytes).unwrap(), vec!["Members", "Census"]);
}

#[test]
fn parse_sheet_with_header() {
    let bytes = members_xlsx();
    let table = parse_sheet(&bytes, "Members", true).unwrap();

    assert_eq!(table.columns, vec!["MemberNo", "Name"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0][0], Value::Float64(3201234567890123.0));
    assert_eq!(table.rows[1][0], Value::from("3209999999999999"));
    assert_eq!(table.rows[2], vec![Value::Bool(true), Value::Null]);
}

#[test]
fn numeric_identifier_cells_normalize() {
    let bytes = members_xlsx();
    let table = parse_sheet(&bytes, "Members", true).unwrap();
    let out = clean(&table, &ColumnSelection::member("MemberNo"), true).unwrap();

    let ids: Vec<&str> = out.table.identifiers().iter().map(|i| i.as_str()).collect();
    assert_eq!(ids, vec!["3201234567890123", "3209999999999999"]);
    assert_eq!(out.stats.invalid_rows, 1);
}

#[test]
fn parse_sheet_without_header_names_columns_positionally() {
    let bytes = members_xlsx();
    let table = parse_sheet(&bytes, "Census", false).unwrap();
    assert_eq!(table.columns, vec!["0"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows[0][0], Value::from("IdentityNo"));
}

#[test]
fn unknown_sheet_is_an_error() {
    let bytes = members_xlsx();
    let err = parse_sheet(&bytes, "Nope", true).unwrap_err();
    match err {
        LoadError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "Nope");
            assert_eq!(available, vec!["Members", "Census"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unified_load_defaults_to_first_sheet() {
    let bytes = members_xlsx();
    let first = parse_first_sheet(&bytes, true).unwrap();
    let table = load(&bytes, "members.xlsx", TableFormat::Spreadsheet, &LoadOptions::default()).unwrap();
    assert_eq!(table, first);

    let opts = LoadOptions {
        sheet: Some("Census".to_string()),
        ..Default::default()
    };
    let census = load(&bytes, "members.xlsx", TableFormat::Spreadsheet, &opts).unwrap();
    assert_eq!(census.columns, vec!["IdentityNo"]);
}

fn dated_xlsx() -> Vec<u8> {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    let date_fmt = Format::new().set_num_format("yyyy-mm-dd");
    let stamp_fmt = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let time_fmt = Format::new().set_num_format("hh:mm:ss");

    ws.write_string(0, 0, "MemberNo").unwrap();
    ws.write_string(0, 1, "Joined").unwrap();
    ws.write_string(0, 2, "Seen").unwrap();
    ws.write_string(0, 3, "Shift").unwrap();
    ws.write_number(1, 0, 3201234567890123_f64).unwrap();

    let joined = ExcelDateTime::from_ymd(2024, 1, 2).unwrap();
    ws.write_datetime_with_format(1, 1, &joined, &date_fmt).unwrap();
    let seen = ExcelDateTime::from_ymd(2024, 1, 2).unwrap().and_hms(13, 30, 0).unwrap();
    ws.write_datetime_with_format(1, 2, &seen, &stamp_fmt).unwrap();
    let shift = ExcelDateTime::from_hms(8, 15, 0).unwrap();
    ws.write_datetime_with_format(1, 3, &shift, &time_fmt).unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn date_cells_load_as_calendar_text() {
    let table = parse_sheet(&dated_xlsx(), "Sheet1", true).unwrap();
    assert_eq!(table.columns, vec!["MemberNo", "Joined", "Seen", "Shift"]);
    assert_eq!(
        table.rows[0],
        vec![
            Value::Float64(3201234567890123.0),
            Value::from("2024-01-02"),
            Value::from("2024-01-02 13:30:00"),
            Value::from("08:15:00"),
        ]
    );
}

#[test]
fn garbage_bytes_are_an_excel_error() {
    let err = list_sheets(b"definitely not a workbook").unwrap_err();
    assert!(err.to_string().contains("excel error"), "{err}");
}
