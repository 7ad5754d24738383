//! Commit message conventions.
//!
//! Two tag grammars are supported. The legacy one uses capitalized tags such
//! as `Fix:` and `New:`; the conventional one uses `fix:`, `feat(scope):` and
//! friends. Only the first line of a message is ever checked.

use github_client::Commit;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[cfg(test)]
#[path = "conventions_tests.rs"]
mod tests;

/// Maximum length of the first line of a commit message.
pub const MAX_FIRST_LINE_LENGTH: usize = 72;

const LEGACY_TAGS: &[&str] = &[
    "Breaking", "Build", "Chore", "Docs", "Fix", "New", "Update", "Upgrade",
];

const CONVENTIONAL_TAGS: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

static CONVENTIONAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<tag>[A-Za-z]+)(?:\([^()]*\))?!?$").expect("prefix pattern is a valid regex")
});

static LEGACY_PATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Build|Chore|Docs|Fix|Upgrade): ").expect("patch pattern is a valid regex")
});

static CONVENTIONAL_PATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:build|chore|docs|fix|ci|test|refactor|perf|style)(\(.*\))?: ")
        .expect("patch pattern is a valid regex")
});

static LEGACY_CHORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Build|Chore|Docs|Upgrade):").expect("chore pattern is a valid regex")
});

static CONVENTIONAL_CHORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:build|chore|docs|ci)(\(.*\))?!?:").expect("chore pattern is a valid regex")
});

/// Tag grammar a repository follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitConvention {
    /// `Tag: Summary` with capitalized tags
    #[default]
    Legacy,
    /// `tag(scope)!: summary` with lowercase tags
    Conventional,
}

/// A rule a commit message failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageCheck {
    SpaceAfterColon,
    LowercaseTag,
    RecognizedTag,
    Length,
}

impl MessageCheck {
    pub fn description(&self) -> &'static str {
        match self {
            Self::SpaceAfterColon => "missing space after the tag colon",
            Self::LowercaseTag => "tag must start with a lowercase letter",
            Self::RecognizedTag => "tag not recognized",
            Self::Length => "first line longer than 72 characters",
        }
    }
}

impl fmt::Display for MessageCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

enum TagMatch {
    Exact,
    WrongCase,
    Unrecognized,
}

impl CommitConvention {
    fn classify_tag(&self, prefix: &str) -> TagMatch {
        match self {
            Self::Legacy => {
                if LEGACY_TAGS.contains(&prefix) {
                    TagMatch::Exact
                } else {
                    TagMatch::Unrecognized
                }
            }
            Self::Conventional => {
                let Some(tag) = CONVENTIONAL_PREFIX
                    .captures(prefix)
                    .and_then(|c| c.name("tag"))
                    .map(|m| m.as_str())
                else {
                    return TagMatch::Unrecognized;
                };

                if CONVENTIONAL_TAGS.contains(&tag) {
                    TagMatch::Exact
                } else if CONVENTIONAL_TAGS.contains(&tag.to_lowercase().as_str())
                    && tag.starts_with(|c: char| c.is_ascii_uppercase())
                {
                    TagMatch::WrongCase
                } else {
                    TagMatch::Unrecognized
                }
            }
        }
    }
}

/// Returns the first line of a message without trailing whitespace.
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default().trim_end()
}

/// Checks the first line of a message and returns every rule it breaks.
///
/// An empty result means the message follows the convention.
pub fn check_message(message: &str, convention: CommitConvention) -> Vec<MessageCheck> {
    let line = first_line(message);
    let mut failures = Vec::new();

    match line.split_once(':') {
        Some((prefix, rest)) => match convention.classify_tag(prefix) {
            TagMatch::Exact => {
                if !rest.starts_with(' ') {
                    failures.push(MessageCheck::SpaceAfterColon);
                }
            }
            TagMatch::WrongCase => {
                failures.push(MessageCheck::LowercaseTag);
                if !rest.starts_with(' ') {
                    failures.push(MessageCheck::SpaceAfterColon);
                }
            }
            TagMatch::Unrecognized => failures.push(MessageCheck::RecognizedTag),
        },
        None => failures.push(MessageCheck::RecognizedTag),
    }

    if line.chars().count() > MAX_FIRST_LINE_LENGTH {
        failures.push(MessageCheck::Length);
    }

    failures
}

/// Returns true if the message describes a change that may ship in a patch release.
pub fn is_patch_message(message: &str, convention: CommitConvention) -> bool {
    let line = first_line(message);
    match convention {
        CommitConvention::Legacy => LEGACY_PATCH.is_match(line),
        CommitConvention::Conventional => CONVENTIONAL_PATCH.is_match(line),
    }
}

/// Returns true if a pull request title announces a change that needs no tests.
pub fn is_chore_title(title: &str, convention: CommitConvention) -> bool {
    match convention {
        CommitConvention::Legacy => LEGACY_CHORE.is_match(title),
        CommitConvention::Conventional => CONVENTIONAL_CHORE.is_match(title),
    }
}

/// The message that describes a pull request: the sole commit's message, or
/// the title when the pull request has several commits.
pub fn effective_message<'a>(commits: &'a [Commit], title: &'a str) -> &'a str {
    match commits {
        [only] => only.message(),
        _ => title,
    }
}
