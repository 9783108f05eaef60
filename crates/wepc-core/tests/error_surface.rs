use wepc_core::errors::{ErrorInfo, WepcError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("path", "seg.dat")
        .with_context("line", "3")
}

#[test]
fn parse_error_surface() {
    let err = WepcError::Parse(sample_info("P001", "bad token"));
    assert_eq!(err.info().code, "P001");
    assert!(err.info().context.contains_key("line"));
}

#[test]
fn shape_mismatch_records_extents() {
    let err = WepcError::shape_mismatch("S001", "frame count", 6, 5);
    assert!(matches!(err, WepcError::Shape(_)));
    assert_eq!(err.info().context.get("expected").map(String::as_str), Some("6"));
    assert_eq!(err.info().context.get("found").map(String::as_str), Some("5"));
    assert!(err.to_string().contains("expected 6, found 5"));
}

#[test]
fn display_includes_hint() {
    let err = WepcError::Config(ErrorInfo::new("C001", "bad bounds").with_hint("sort them"));
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: bad bounds (code: C001)"));
    assert!(rendered.ends_with("| hint: sort them"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = WepcError::State(sample_info("ST001", "missing label"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "State");
    assert_eq!(json["detail"]["code"], "ST001");
    let decoded: WepcError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
