use super::*;
use serde_json::json;

#[test]
fn test_pull_request_deserialization() {
    let pr: PullRequest = serde_json::from_value(json!({
        "number": 7,
        "title": "WIP: new parser",
        "state": "open",
        "html_url": "https://github.com/octo-org/widgets/pull/7",
        "user": { "login": "contributor" },
        "labels": [{ "name": "do not merge" }],
        "head": { "sha": "abc123", "ref": "feature/parser" }
    }))
    .expect("valid pull request");

    assert_eq!(pr.head.sha, "abc123");
    assert_eq!(pr.head.ref_name, "feature/parser");
    assert!(pr.has_label("do not merge"));
    assert!(!pr.draft);
}

#[test]
fn test_review_state_deserialization() {
    let review: Review = serde_json::from_value(json!({
        "id": 1,
        "user": { "login": "maintainer" },
        "state": "CHANGES_REQUESTED",
        "submitted_at": "2024-01-02T03:04:05Z"
    }))
    .unwrap();

    assert_eq!(review.state, ReviewState::ChangesRequested);
    assert!(review.submitted_at.is_some());
}

#[test]
fn test_review_state_unknown_values_are_tolerated() {
    let review: Review = serde_json::from_value(json!({
        "id": 2,
        "state": "SOMETHING_NEW"
    }))
    .unwrap();

    assert_eq!(review.state, ReviewState::Unknown);
    assert!(review.user.is_none());
}

#[test]
fn test_commit_message_accessor() {
    let commit: Commit = serde_json::from_value(json!({
        "sha": "deadbeef",
        "commit": { "message": "Fix: handle empty input\n\nLonger body" }
    }))
    .unwrap();

    assert_eq!(commit.message(), "Fix: handle empty input\n\nLonger body");
}

#[test]
fn test_review_state_accepts_webhook_spelling() {
    let review: Review = serde_json::from_value(json!({
        "id": 3,
        "user": { "login": "maintainer" },
        "state": "approved"
    }))
    .unwrap();

    assert_eq!(review.state, ReviewState::Approved);
}
