//! Label domain types.
//!
//! This module contains types representing GitHub issue and pull request labels.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// Represents a label on a pull request or issue.
///
/// Label membership is always checked by exact name match.
///
/// # Examples
///
/// ```
/// use github_client::Label;
///
/// let label = Label::new("needs info");
/// assert_eq!(label.name, "needs info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

impl Label {
    /// Creates a label with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Returns true if any label in `labels` is named exactly `name`.
pub fn has_label(labels: &[Label], name: &str) -> bool {
    labels.iter().any(|label| label.name == name)
}
