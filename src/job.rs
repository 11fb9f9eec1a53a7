//! Job model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::step::Step;
use crate::types::JobId;

/// A named job: a runner, optional dependencies and environment, and an
/// ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "runs-on")]
    pub runs_on: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<JobId>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, String>,
    pub steps: Vec<Step>,
}
