//! Top-level workflow model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::job::Job;
use crate::trigger::Trigger;
use crate::types::{JobId, WorkflowName};

/// A complete workflow: name, triggers, and an insertion-ordered job map
///
/// Job ids are unique by construction (map keys). The builder API refuses
/// to overwrite an existing id; see [`crate::builders::WorkflowBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: WorkflowName,
    #[serde(rename = "on")]
    pub trigger: Trigger,
    pub jobs: IndexMap<JobId, Job>,
}

impl Workflow {
    pub fn job_ids(&self) -> impl Iterator<Item = &JobId> {
        self.jobs.keys()
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn step_count(&self) -> usize {
        self.jobs.values().map(|job| job.steps.len()).sum()
    }
}
