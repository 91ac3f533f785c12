//! Filling templates stored as CSV/TSV files

use gridplate::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;

const INVOICE: &str = "\
Invoice ${number},,
Item,Qty,Price
${},${},${}
Total,,${total}
";

#[test]
fn test_fill_invoice_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.csv");
    let output = dir.path().join("filled.csv");
    fs::write(&input, INVOICE).unwrap();

    let mut template = Template::open(&input);
    assert!(template.examine());

    let lines = Substitutions::from_rows([
        vec![CellValue::from("Tea"), CellValue::from(2), CellValue::from(3.5)],
        vec![CellValue::from("Jam"), CellValue::from(1), CellValue::from(4)],
    ]);
    assert_eq!(template.insert_row(2, 3, &lines).unwrap(), 2);
    assert_eq!(
        template
            .fill_variables([("number", "7"), ("total", "11")])
            .unwrap(),
        2
    );
    template.save(&output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "Invoice 7,,\r\nItem,Qty,Price\r\nTea,2,3.5\r\nJam,1,4\r\nTotal,,11\r\n"
    );
}

#[test]
fn test_workbook_open_names_sheet_after_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.tsv");
    fs::write(&input, "a\tb\n1\t2\n").unwrap();

    let workbook = Workbook::open(&input).unwrap();
    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.name(), "report");
    assert_eq!(sheet.get_value("B2").unwrap(), CellValue::Number(2.0));

    let copy = dir.path().join("copy.csv");
    workbook.save(&copy).unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), "a,b\r\n1,2\r\n");
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Workbook::open(dir.path().join("x.ods")).is_err());
    assert!(Workbook::new().save(dir.path().join("x.ods")).is_err());
}

#[test]
fn test_faulted_template_cannot_save() {
    let dir = tempfile::tempdir().unwrap();
    let template = Template::open(dir.path().join("missing.csv"));

    let err = template.save(dir.path().join("out.csv")).unwrap_err();
    assert!(matches!(err, TemplateError::Io(_)));
    assert!(!dir.path().join("out.csv").exists());
}
