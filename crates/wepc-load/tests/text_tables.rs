use wepc_core::WepcError;
use wepc_load::parse_table;

#[test]
fn comments_and_blank_lines_are_skipped() {
    let table = parse_table("# header\n1.0 2.0\n\n  3.5\t-4e-1  # trailing\n").unwrap();
    assert_eq!(table.shape(), (2, 2));
    assert_eq!(table.as_slice(), &[1.0, 2.0, 3.5, -0.4]);
}

#[test]
fn special_values_parse() {
    let table = parse_table("inf -inf nan\n").unwrap();
    assert_eq!(table.get(0, 0), Some(f32::INFINITY));
    assert_eq!(table.get(0, 1), Some(f32::NEG_INFINITY));
    assert!(table.get(0, 2).unwrap().is_nan());
}

#[test]
fn ragged_rows_are_shape_errors() {
    let err = parse_table("1 2\n3\n").unwrap_err();
    assert!(matches!(err, WepcError::Shape(_)));
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("2"));
}

#[test]
fn bad_tokens_report_their_line() {
    let err = parse_table("1 2\n3 x4\n").unwrap_err();
    assert!(matches!(err, WepcError::Parse(_)));
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("2"));
}

#[test]
fn empty_input_is_an_empty_table() {
    assert_eq!(parse_table("\n# nothing\n").unwrap().shape(), (0, 0));
}
