//! Build step model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::ActionRef;

/// A single step inside a job
///
/// A step's primary action is either a reusable action reference (`uses`)
/// or an inline script body (`run`). The model tolerates both being set so
/// foreign input can be parsed and reported on; validation treats it as an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub if_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<ActionRef>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub with: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
}

impl Step {
    /// Number of primary actions set (0, 1 or 2)
    pub fn primary_action_count(&self) -> usize {
        usize::from(self.uses.is_some()) + usize::from(self.run.is_some())
    }

    pub fn has_primary_action(&self) -> bool {
        self.primary_action_count() > 0
    }
}
