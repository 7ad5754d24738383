use super::*;
use crate::test_support::{issue_fixture, issues_event, settings, Call, MockGitHub};

async fn run(body: Option<&str>) -> Vec<Call> {
    let mut issue = issue_fixture(8, "Add option", &[]);
    issue.body = body.map(str::to_string);
    let github = MockGitHub::new();
    let event = issues_event("opened", &issue, None);
    let settings = settings();

    AutoAssignPlugin
        .handle(&EventContext::new(&event, &github, &settings))
        .await
        .unwrap();

    github.calls()
}

#[tokio::test]
async fn test_checked_box_assigns_author() {
    let calls = run(Some(
        "**Are you willing to submit a pull request?**\n\n- [X] I am willing to submit a pull request to implement this change.",
    ))
    .await;

    assert_eq!(
        calls,
        vec![Call::AddAssignees {
            issue: 8,
            assignees: vec!["reporter".to_string()]
        }]
    );
}

#[tokio::test]
async fn test_unchecked_box_does_nothing() {
    let calls = run(Some("- [ ] I am willing to submit a pull request")).await;

    assert!(calls.is_empty());
}

#[tokio::test]
async fn test_missing_body_does_nothing() {
    assert!(run(None).await.is_empty());
    assert!(run(Some("")).await.is_empty());
}
