//! Workflow trigger model
//!
//! Field names are internal; serde renames produce the GitHub `on:` keys
//! (`workflow_dispatch`, `schedule`).

use serde::{Deserialize, Serialize};

use crate::types::CronExpr;

/// Branch filter attached to a push or pull_request event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branches {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

impl Branches {
    pub fn new<I, S>(branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Branches {
            branches: branches.into_iter().map(Into::into).collect(),
        }
    }
}

/// Marker for manual dispatch; renders as an empty `workflow_dispatch:` mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualDispatch {}

/// One scheduled trigger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub cron: CronExpr,
}

/// Events that start the workflow
///
/// Unset events are omitted from output entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<Branches>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Branches>,
    #[serde(
        rename = "workflow_dispatch",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub manual: Option<ManualDispatch>,
    #[serde(rename = "schedule", default, skip_serializing_if = "Vec::is_empty")]
    pub scheduled: Vec<ScheduleEntry>,
}

impl Trigger {
    /// True when no event would ever start the workflow
    pub fn is_empty(&self) -> bool {
        self.push.is_none()
            && self.pull_request.is_none()
            && self.manual.is_none()
            && self.scheduled.is_empty()
    }
}
