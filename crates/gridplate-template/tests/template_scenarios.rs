//! End-to-end template scenarios on worksheets

use gridplate_core::{CellComment, CellRange, CellValue, GridAccessor, Style, Worksheet};
use gridplate_template::{GridEditor, Substitutions, Template};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn range(s: &str) -> CellRange {
    CellRange::parse(s).unwrap()
}

fn assert_no_overlaps(sheet: &Worksheet) {
    let regions = sheet.merged_regions();
    for (i, a) in regions.iter().enumerate() {
        for b in &regions[i + 1..] {
            assert!(!a.overlaps(b), "{a} overlaps {b}");
        }
    }
}

/// Template row 5 with a two-cell region, replicated 3 times at row 10
#[test]
fn test_row_template_with_merged_pair() {
    let mut sheet = Worksheet::new("Report");
    sheet.set_cell_value("A1", "Header").unwrap();
    sheet.set_cell_value("A5", "${}").unwrap();
    sheet.merge_cells(&range("A5:B5")).unwrap();
    sheet.set_cell_value("A10", "Footer").unwrap();

    let subs = Substitutions::from_rows([["1"], ["2"], ["3"]]);
    let inserted = GridEditor::new(&mut sheet)
        .insert_rows(4, 4, 9, &subs, true)
        .unwrap();

    assert_eq!(inserted, 3);
    assert_eq!(sheet.get_value("A9").unwrap().as_string(), Some("1"));
    assert_eq!(sheet.get_value("A10").unwrap().as_string(), Some("2"));
    assert_eq!(sheet.get_value("A11").unwrap().as_string(), Some("3"));
    assert_eq!(sheet.get_value("A12").unwrap().as_string(), Some("Footer"));
    assert_eq!(
        sheet.merged_regions(),
        &[range("A9:B9"), range("A10:B10"), range("A11:B11")]
    );
    // nothing of the template row is left
    assert!(sheet.row_cells(4).is_empty());
}

/// Opening two columns inside a region cuts it in two
#[test]
fn test_column_band_splits_region() {
    let mut sheet = Worksheet::new("S");
    sheet.merge_cells(&range("C1:F1")).unwrap();

    GridEditor::new(&mut sheet).open_column_band(3, 2).unwrap();

    assert_eq!(sheet.merged_regions(), &[range("F1:H1")]);

    let mut sheet = Worksheet::new("S");
    sheet.merge_cells(&range("C1:F2")).unwrap();

    GridEditor::new(&mut sheet).open_column_band(3, 2).unwrap();

    assert_eq!(sheet.merged_regions(), &[range("C1:C2"), range("F1:H2")]);
}

#[test]
fn test_invoice_session() {
    let mut workbook = gridplate_core::Workbook::new();
    let sheet = workbook.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Invoice ${number} for ${customer}").unwrap();
    sheet.set_cell_value("A3", "Item").unwrap();
    sheet.set_cell_value("B3", "Qty").unwrap();
    sheet.set_cell_value("A4", "${}").unwrap();
    sheet.set_cell_value("B4", "${}").unwrap();
    sheet.set_cell_style("B4", &Style::new().number_format("0")).unwrap();
    sheet.set_comment("B4", CellComment::text_only("units")).unwrap();
    sheet.set_cell_value("A5", "Thanks, ${customer}").unwrap();

    let subs: Substitutions = vec![
        ("tea", vec![CellValue::from("Tea"), CellValue::from(2)]),
        ("cake", vec![CellValue::from("Cake"), CellValue::from(1)]),
        ("jam", vec![CellValue::from("Jam")]),
    ]
    .into_iter()
    .collect();

    let mut template = Template::new(workbook);
    assert!(template.examine());
    assert_eq!(template.insert_row(3, 4, &subs).unwrap(), 3);
    assert_eq!(
        template
            .fill_variables([("number", "42"), ("customer", "ACME"), ("number", "99")])
            .unwrap(),
        2
    );

    let sheet = template.worksheet().unwrap();
    assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("Invoice 42 for ACME"));
    let items: Vec<_> = (3..6)
        .map(|row| (sheet.display_value_at(row, 0), sheet.display_value_at(row, 1)))
        .collect();
    assert_eq!(
        items,
        vec![
            ("Tea".to_string(), "2".to_string()),
            ("Cake".to_string(), "1".to_string()),
            ("Jam".to_string(), String::new()),
        ]
    );
    assert_eq!(sheet.comment_count(), 3);
    // the closing line only holds a name that was already placed
    assert_eq!(sheet.get_value("A7").unwrap().as_string(), Some("Thanks, ${customer}"));
}

#[test]
fn test_insert_next_to_existing_regions() {
    let mut sheet = Worksheet::new("S");
    sheet.set_cell_value("A1", "${}").unwrap();
    sheet.merge_cells(&range("A1:A3")).unwrap();
    sheet.merge_cells(&range("C4:D6")).unwrap();
    sheet.set_cell_value("A6", "end").unwrap();

    let subs = Substitutions::from_rows([["a"], ["b"]]);
    GridEditor::new(&mut sheet)
        .insert_rows(0, 0, 3, &subs, false)
        .unwrap();

    // copies are three rows tall; the second overlaps the first and only a
    // single free cell is left of it
    assert_eq!(
        sheet.merged_regions(),
        &[range("A1:A3"), range("C6:D8"), range("A4:A6")]
    );
    assert_no_overlaps(&sheet);
}

fn arb_sheet() -> impl Strategy<Value = Worksheet> {
    let cells = prop::collection::vec((0u32..10, 0u16..6, 0i32..100), 1..20);
    let regions = prop::collection::vec((0u32..10, 0u16..6, 0u32..3, 0u16..3), 0..6);
    let comments = prop::collection::vec((0u32..10, 0u16..6), 0..4);
    (cells, regions, comments).prop_map(|(cells, regions, comments)| {
        let mut sheet = Worksheet::new("P");
        for (row, col, n) in cells {
            sheet.set_cell_value_at(row, col, n).unwrap();
        }
        let mut editor = GridEditor::new(&mut sheet);
        for (row, col, h, w) in regions {
            editor
                .register_region(CellRange::from_indices(row, col, row + h, col + w))
                .unwrap();
        }
        for (row, col) in comments {
            sheet.set_comment_at(row, col, Some(CellComment::text_only(format!("{row}:{col}"))));
        }
        sheet
    })
}

proptest! {
    #[test]
    fn prop_open_then_close_restores_content(sheet in arb_sheet(), start in 0u32..12, count in 1u32..5) {
        let straddled = sheet
            .merged_regions()
            .iter()
            .any(|r| r.first_row() < start && start <= r.last_row());
        prop_assume!(!straddled);

        let mut edited = sheet.clone();
        let mut editor = GridEditor::new(&mut edited);
        editor.open_row_band(start, count).unwrap();
        editor.close_row_band(start, start + count - 1).unwrap();

        prop_assert_eq!(edited.row_indices(), sheet.row_indices());
        for row in sheet.row_indices() {
            prop_assert_eq!(edited.row_cells(row), sheet.row_cells(row));
        }
        prop_assert_eq!(edited.comments(), sheet.comments());
        prop_assert_eq!(edited.merged_regions(), sheet.merged_regions());
    }

    #[test]
    fn prop_template_insertion_keeps_regions_disjoint(
        sheet in arb_sheet(),
        from in 0u32..5,
        height in 0u32..3,
        at in 0u32..10,
        groups in 1usize..4,
        delete in any::<bool>(),
    ) {
        let mut sheet = sheet;
        let subs = Substitutions::from_rows((0..groups).map(|g| vec![g as i32]));
        let expected_rows = (height + 1) * groups as u32;

        let inserted = GridEditor::new(&mut sheet)
            .insert_rows(from, from + height, at, &subs, delete)
            .unwrap();

        prop_assert!(inserted == 0 || inserted == expected_rows);
        assert_no_overlaps(&sheet);
        for region in sheet.merged_regions() {
            prop_assert!(!region.is_single_cell());
        }
    }
}
