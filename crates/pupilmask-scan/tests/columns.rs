use pupilmask_core::Record;
use pupilmask_scan::{ScanError, detect_name_column, headers_of};
use serde_json::json;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn rows(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn exact_header_match_ignores_case_and_padding() {
    let found = detect_name_column(&headers(&["Class", " PUPIL ", "Notes"]), &[]).unwrap();
    assert_eq!(found, " PUPIL ");
}

#[test]
fn candidates_are_tried_in_priority_order() {
    let found = detect_name_column(&headers(&["Child", "Student", "Name"]), &[]).unwrap();
    assert_eq!(found, "Name");

    let found = detect_name_column(&headers(&["Full Name", "Pupil Name"]), &[]).unwrap();
    assert_eq!(found, "Pupil Name");
}

#[test]
fn falls_back_to_a_header_containing_name() {
    let found = detect_name_column(&headers(&["Year", "Surname", "Forename"]), &[]).unwrap();
    assert_eq!(found, "Surname");
}

#[test]
fn falls_back_to_cell_contents() {
    let rows = rows(json!([
        { "Col A": "Year 3", "Col B": "Oliver Brown" },
        { "Col A": "Year 3", "Col B": "Amelia Khan" },
        { "Col A": "Year 4", "Col B": "Zed Quill" },
    ]));
    let found = detect_name_column(&headers(&["Col A", "Col B"]), &rows).unwrap();
    assert_eq!(found, "Col B");
}

#[test]
fn no_name_column_is_an_error() {
    let rows = rows(json!([
        { "Class": "3B", "Score": "12" },
    ]));
    let err = detect_name_column(&headers(&["Class", "Score"]), &rows).unwrap_err();
    assert!(matches!(err, ScanError::MissingNameColumn));

    let err = detect_name_column(&[], &[]).unwrap_err();
    assert!(matches!(err, ScanError::MissingNameColumn));
}

#[test]
fn headers_in_first_seen_order() {
    let rows = rows(json!([
        { "Name": "A", "Notes": "" },
        { "Name": "B", "Extra": "", "Notes": "" },
    ]));
    assert_eq!(headers_of(&rows), headers(&["Name", "Notes", "Extra"]));
    assert!(headers_of(&[]).is_empty());
}
