//! Structured result of a reconciliation run

use serde::Serialize;
use std::fmt;

use crate::types::{Action, Definition, ReconcileOutcome};

/// User-facing status label, one per action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Created,
    Modified,
    Deleted,
    Unchanged,
}

impl From<Action> for Status {
    fn from(action: Action) -> Self {
        match action {
            Action::Create => Self::Created,
            Action::Modify => Self::Modified,
            Action::Delete => Self::Deleted,
            Action::NoOp => Self::Unchanged,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "CREATED",
            Self::Modified => "MODIFIED",
            Self::Deleted => "DELETED",
            Self::Unchanged => "UNCHANGED",
        })
    }
}

/// Reconciliation outcome packaged for output: what changed, plus before and
/// after snapshots.
///
/// `current_definition` is present only when the post-action intent is
/// presence; after a delete there is nothing current to report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub changed: bool,
    pub message: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_definition: Option<Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_definition: Option<Definition>,
}

impl Report {
    /// Package an outcome with the post-apply definition returned by the
    /// store (or the dry-run preview)
    pub fn new(outcome: &ReconcileOutcome, current: Option<Definition>) -> Self {
        Self {
            changed: outcome.changed,
            message: Status::from(outcome.action),
            previous_definition: outcome.previous.clone(),
            current_definition: current,
        }
    }
}
