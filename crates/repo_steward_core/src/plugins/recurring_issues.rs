//! Opens the next release or TSC meeting issue when the current one is closed.
//!
//! Both kinds of issue carry their date in the title. Closing one for the
//! first time creates the issue for two weeks later; reopening and closing
//! again does not create another.

use async_trait::async_trait;
use chrono::{Datelike, Duration, Month, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use github_client::{Issue, NewIssue};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument, warn};

use crate::settings::TscMeetingSettings;
use crate::{
    EventContext, EventName, EventPattern, IssuesEvent, Plugin, Registration, StewardResult,
};

#[cfg(test)]
#[path = "recurring_issues_tests.rs"]
mod tests;

pub const RELEASE_LABEL: &str = "release";

pub const TSC_MEETING_LABEL: &str = "tsc meeting";

/// Days between two occurrences.
const RECURRENCE_DAYS: i64 = 14;

static RELEASE_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Scheduled release for ([A-Za-z]+) (\d{1,2})(?:st|nd|rd|th), (\d{4})$")
        .expect("release title pattern is a valid regex")
});

static TSC_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^TSC meeting (\d{1,2})-([A-Za-z]+)-(\d{4})$")
        .expect("meeting title pattern is a valid regex")
});

/// Kind of recurring issue, identified by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringKind {
    Release,
    TscMeeting,
}

impl RecurringKind {
    pub fn of(issue: &Issue) -> Option<Self> {
        if issue.has_label(RELEASE_LABEL) {
            Some(Self::Release)
        } else if issue.has_label(TSC_MEETING_LABEL) {
            Some(Self::TscMeeting)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Release => RELEASE_LABEL,
            Self::TscMeeting => TSC_MEETING_LABEL,
        }
    }

    /// Reads the date out of an issue title.
    pub fn parse_title(&self, title: &str) -> Option<NaiveDate> {
        match self {
            Self::Release => {
                let captures = RELEASE_TITLE.captures(title.trim())?;
                date_from_parts(&captures[1], &captures[2], &captures[3])
            }
            Self::TscMeeting => {
                let captures = TSC_TITLE.captures(title.trim())?;
                date_from_parts(&captures[2], &captures[1], &captures[3])
            }
        }
    }

    pub fn format_title(&self, date: NaiveDate) -> String {
        match self {
            Self::Release => format!(
                "Scheduled release for {} {}, {}",
                date.format("%B"),
                ordinal(date.day()),
                date.format("%Y")
            ),
            Self::TscMeeting => format!("TSC meeting {}", date.format("%d-%B-%Y")),
        }
    }
}

fn date_from_parts(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    let month: Month = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.number_from_month(), day.parse().ok()?)
}

/// Formats a day of the month as "1st", "2nd", "11th", "23rd".
pub fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}

fn release_body(date: NaiveDate) -> String {
    format!(
        "The next scheduled release will occur on {}.\n\n\
         ## Release checklist\n\n\
         - [ ] Check for pull requests that should land before the release\n\
         - [ ] Publish the release\n\
         - [ ] Verify the published packages\n\
         - [ ] Post the release announcement\n\
         - [ ] Add the `patch release pending` label if a patch release may follow\n\n\
         When a release is pending, only semver-patch changes should be merged.",
        date.format("%A, %B %-d, %Y")
    )
}

fn tsc_meeting_body(date: NaiveDate, tsc: &TscMeetingSettings, invitees: &[String]) -> Option<String> {
    let time = match NaiveTime::parse_from_str(&tsc.time_utc, "%H:%M") {
        Ok(time) => time,
        Err(e) => {
            warn!(time_utc = %tsc.time_utc, error = %e, "Invalid TSC meeting time");
            return None;
        }
    };
    let start = Utc.from_utc_datetime(&date.and_time(time));

    let mut times = vec![format!("- UTC: {}", start.format("%a %-d-%b-%Y %H:%M"))];
    for zone in &tsc.time_zones {
        match zone.parse::<Tz>() {
            Ok(tz) => times.push(format!(
                "- {}: {}",
                zone,
                start.with_timezone(&tz).format("%a %-d-%b-%Y %H:%M (%Z)")
            )),
            Err(_) => warn!(zone = %zone, "Unknown time zone in TSC meeting settings"),
        }
    }

    let invited = if invitees.is_empty() {
        "The TSC members".to_string()
    } else {
        invitees
            .iter()
            .map(|login| format!("- @{}", login))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Some(format!(
        "# Time\n\n{}\n\n\
         # Location\n\n{}\n\n\
         # Agenda\n\n\
         Issues and pull requests labeled `tsc agenda` are discussed.\n\n\
         # Invitees\n\n{}\n\n\
         # Public participation\n\n\
         Anyone is welcome to attend the meeting as an observer.",
        times.join("\n"),
        tsc.location,
        invited
    ))
}

pub struct RecurringIssuesPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::Issues, "closed")],
        Arc::new(RecurringIssuesPlugin),
    )
}

impl RecurringIssuesPlugin {
    async fn invitees(&self, ctx: &EventContext<'_>) -> StewardResult<Vec<String>> {
        let Some((org, team)) = ctx.settings.tsc_meeting.team_parts() else {
            return Ok(Vec::new());
        };
        let members = ctx.github.list_team_members(org, team).await?;
        Ok(members.into_iter().map(|m| m.login).collect())
    }
}

#[async_trait]
impl Plugin for RecurringIssuesPlugin {
    fn name(&self) -> &'static str {
        "recurring-issues"
    }

    #[instrument(skip_all, fields(plugin = "recurring-issues"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: IssuesEvent = ctx.event.parse()?;
        let Some(kind) = RecurringKind::of(&payload.issue) else {
            return Ok(());
        };
        let Some(date) = kind.parse_title(&payload.issue.title) else {
            debug!(title = %payload.issue.title, "Title does not carry a date");
            return Ok(());
        };

        let repo = payload.repository.repo_ref();
        let events = ctx
            .github
            .list_issue_events(&repo.issue(payload.issue.number))
            .await?;
        let closed_count = events.iter().filter(|e| e.event == "closed").count();
        if closed_count != 1 {
            debug!(closed_count, "Issue was closed before, not creating a successor");
            return Ok(());
        }

        let next = date + Duration::days(RECURRENCE_DAYS);
        let body = match kind {
            RecurringKind::Release => release_body(next),
            RecurringKind::TscMeeting => {
                let invitees = self.invitees(ctx).await?;
                let Some(body) = tsc_meeting_body(next, &ctx.settings.tsc_meeting, &invitees)
                else {
                    return Ok(());
                };
                body
            }
        };

        let new_issue = NewIssue {
            title: kind.format_title(next),
            body,
            labels: vec![kind.label().to_string()],
        };
        let created = ctx.github.create_issue(&repo, &new_issue).await?;

        info!(
            number = created.number,
            title = %new_issue.title,
            "Created next recurring issue"
        );
        Ok(())
    }
}
