//! The built-in plugins.
//!
//! Each module exposes its plugin type and a `registration()` that pairs it
//! with the events it handles. [`registrations`] is the full static list, in
//! dispatch order.

use crate::Registration;

pub mod auto_assign;
pub mod auto_closer;
pub mod check_unit_test;
pub mod commit_message;
pub mod duplicate_comments;
pub mod issue_archiver;
pub mod issue_pr_link;
pub mod needs_info;
pub mod ready_to_merge;
pub mod recurring_issues;
pub mod release_monitor;
mod sweep;
pub mod triage;
pub mod wip;

/// Every built-in plugin with its event patterns.
pub fn registrations() -> Vec<Registration> {
    vec![
        triage::registration(),
        needs_info::registration(),
        auto_assign::registration(),
        commit_message::registration(),
        check_unit_test::registration(),
        duplicate_comments::registration(),
        wip::registration(),
        ready_to_merge::registration(),
        recurring_issues::registration(),
        release_monitor::registration(),
        auto_closer::registration(),
        issue_archiver::registration(),
        issue_pr_link::registration(),
    ]
}
