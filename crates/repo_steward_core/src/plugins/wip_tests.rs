use super::*;
use crate::test_support::{pull_request_event, pull_request_fixture, settings, Call, MockGitHub};

async fn run(github: &MockGitHub, pr: &PullRequest) {
    let event = pull_request_event("edited", pr);
    let settings = settings();

    WipPlugin
        .handle(&EventContext::new(&event, github, &settings))
        .await
        .unwrap();
}

fn status_state(call: &Call) -> StatusState {
    match call {
        Call::CreateCommitStatus {
            state, context, sha, ..
        } => {
            assert_eq!(context, "wip");
            assert_eq!(sha, "head-sha");
            *state
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn test_is_work_in_progress() {
    assert!(is_work_in_progress(&pull_request_fixture(1, "WIP: foo", "s", &[])));
    assert!(is_work_in_progress(&pull_request_fixture(1, "wip: foo", "s", &[])));
    assert!(is_work_in_progress(&pull_request_fixture(1, "foo (WIP)", "s", &[])));
    assert!(is_work_in_progress(&pull_request_fixture(1, "foo", "s", &["do not merge"])));
    assert!(!is_work_in_progress(&pull_request_fixture(1, "foo WIP", "s", &[])));
    assert!(!is_work_in_progress(&pull_request_fixture(1, "Fix: WIP: foo", "s", &[])));
}

#[tokio::test]
async fn test_wip_title_sets_pending_status() {
    for title in ["WIP: foo", "foo (WIP)"] {
        let github = MockGitHub::new();

        run(&github, &pull_request_fixture(2, title, "head-sha", &[])).await;

        let calls = github.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(status_state(&calls[0]), StatusState::Pending);
    }
}

#[tokio::test]
async fn test_do_not_merge_label_sets_pending_status() {
    let github = MockGitHub::new();

    run(
        &github,
        &pull_request_fixture(2, "Fix: thing", "head-sha", &["do not merge"]),
    )
    .await;

    assert_eq!(status_state(&github.calls()[0]), StatusState::Pending);
}

#[tokio::test]
async fn test_clean_pr_without_prior_status_writes_nothing() {
    let github = MockGitHub::new().with_combined_status("head-sha", StatusState::Success, &["ci"]);

    run(&github, &pull_request_fixture(2, "Fix: thing", "head-sha", &[])).await;

    assert!(github.calls().is_empty());
}

#[tokio::test]
async fn test_clean_pr_with_prior_status_clears_it() {
    let github = MockGitHub::new().with_combined_status("head-sha", StatusState::Pending, &["wip"]);

    run(&github, &pull_request_fixture(2, "Fix: thing", "head-sha", &[])).await;

    let calls = github.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(status_state(&calls[0]), StatusState::Success);
}
