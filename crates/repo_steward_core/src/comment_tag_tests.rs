use super::*;

#[test]
fn test_format_tag() {
    assert_eq!(format_tag("needs-info"), "[//]: # (needs-info)");
}

#[test]
fn test_with_tag_appends_marker() {
    let body = with_tag("Please add tests.\n", "check-unit-test");

    assert_eq!(body, "Please add tests.\n\n[//]: # (check-unit-test)");
    assert_eq!(extract_tag(&body), Some("check-unit-test"));
}

#[test]
fn test_extract_tag_returns_first_occurrence() {
    let body = "text\n[//]: # (first)\nmore\n[//]: # (second)";

    assert_eq!(extract_tag(body), Some("first"));
}

#[test]
fn test_extract_tag_without_marker() {
    assert_eq!(extract_tag("a plain comment"), None);
    assert_eq!(extract_tag("[//]: # no parentheses"), None);
}

#[test]
fn test_has_tag() {
    let body = "Linked.\n\n[//]: # (issue-pr-link-42)";

    assert!(has_tag(body, "issue-pr-link-42"));
    assert!(!has_tag(body, "issue-pr-link-4"));
}
