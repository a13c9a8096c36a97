use super::*;

#[test]
fn test_format_message_replaces_placeholders() {
    let text = format_message("Generic type '{0}' requires {1} type argument(s).", &["Box", "1"]);
    assert_eq!(text, "Generic type 'Box' requires 1 type argument(s).");
}

#[test]
fn test_from_code_uses_registered_template() {
    let diag = Diagnostic::from_code(
        "a.ts".to_string(),
        4,
        3,
        diagnostic_codes::GENERIC_TYPE_REFERENCES_ITSELF_WITH_WRAPPED_TYPE_PARAMETER,
        &["X<T[]>"],
    );
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.code, 2312);
    assert!(diag.message_text.contains("'X<T[]>'"));
    assert_eq!((diag.start, diag.length), (4, 3));
}

#[test]
fn test_from_code_unknown_code_joins_args() {
    let diag = Diagnostic::from_code(String::new(), 0, 0, 9999, &["a", "b"]);
    assert_eq!(diag.message_text, "a b");
}

#[test]
fn test_vec_sink_collects() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    sink.post(Diagnostic::error("a.ts".to_string(), 0, 1, "boom".to_string(), 1));
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_related_information_is_serialized() {
    let diag = Diagnostic::error("a.ts".to_string(), 0, 1, "m".to_string(), 1).with_related(
        "b.ts".to_string(),
        2,
        3,
        "declared here".to_string(),
    );
    let json = serde_json::to_string(&diag).expect("serializes");
    assert!(json.contains("related_information"));

    let bare = Diagnostic::error("a.ts".to_string(), 0, 1, "m".to_string(), 1);
    let json = serde_json::to_string(&bare).expect("serializes");
    assert!(!json.contains("related_information"));
}
