//! NewType wrappers for type safety
//!
//! Provides zero-cost abstractions for the identity-bearing strings of a
//! workflow, preventing type confusion and validating at construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

// ============================================================================
// JOB ID
// ============================================================================

static JOB_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// Strongly-typed job identifier
///
/// Guarantees:
/// - Non-empty
/// - Starts with a letter or underscore
/// - Alphanumeric, dash and underscore only
/// - Maximum 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct JobId(String);

impl JobId {
    /// Maximum allowed length
    pub const MAX_LENGTH: usize = 100;

    /// Create a new JobId with validation
    pub fn new(id: impl AsRef<str>) -> Result<Self, JobIdError> {
        let id = id.as_ref();

        if id.is_empty() {
            return Err(JobIdError::Empty);
        }
        if id.len() > Self::MAX_LENGTH {
            return Err(JobIdError::TooLong(id.len()));
        }
        if !JOB_ID_RE.is_match(id) {
            return Err(JobIdError::InvalidFormat(id.to_string()));
        }

        Ok(JobId(id.to_string()))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for JobId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = JobIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobId::new(s)
    }
}

impl TryFrom<String> for JobId {
    type Error = JobIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        JobId::new(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobIdError {
    #[error("Job ID cannot be empty")]
    Empty,
    #[error("Job ID too long ({0} > {})", JobId::MAX_LENGTH)]
    TooLong(usize),
    #[error("Job ID must start with a letter or underscore and contain only alphanumeric characters, hyphens, or underscores: '{0}'")]
    InvalidFormat(String),
}

// ============================================================================
// WORKFLOW NAME
// ============================================================================

/// Strongly-typed workflow name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct WorkflowName(String);

impl WorkflowName {
    /// Maximum allowed length
    pub const MAX_LENGTH: usize = 128;

    /// Create new workflow name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, WorkflowNameError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(WorkflowNameError::Empty);
        }
        if name.len() > Self::MAX_LENGTH {
            return Err(WorkflowNameError::TooLong(name.len()));
        }

        Ok(WorkflowName(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WorkflowName {
    type Error = WorkflowNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WorkflowName::new(value)
    }
}

impl TryFrom<&str> for WorkflowName {
    type Error = WorkflowNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        WorkflowName::new(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowNameError {
    #[error("Workflow name cannot be empty")]
    Empty,
    #[error("Workflow name too long ({0} > {})", WorkflowName::MAX_LENGTH)]
    TooLong(usize),
}

// ============================================================================
// ACTION REFERENCE
// ============================================================================

static ACTION_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+(/[A-Za-z0-9_./-]+)?@[^\s@]+$").unwrap()
});

/// Strongly-typed reusable action reference
///
/// Accepts `owner/repo@ref`, `owner/repo/path@ref`, a local `./path`,
/// or a `docker://image` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ActionRef(String);

impl ActionRef {
    /// Create a new action reference with validation
    pub fn new(reference: impl Into<String>) -> Result<Self, ActionRefError> {
        let reference = reference.into();

        if reference.is_empty() {
            return Err(ActionRefError::Empty);
        }
        if reference.chars().any(char::is_whitespace) {
            return Err(ActionRefError::ContainsWhitespace(reference));
        }

        let is_local = reference.starts_with("./");
        let is_docker = reference.starts_with("docker://");
        if !is_local && !is_docker && !ACTION_REF_RE.is_match(&reference) {
            return Err(ActionRefError::InvalidFormat(reference));
        }

        Ok(ActionRef(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ActionRef {
    type Error = ActionRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ActionRef::new(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ActionRefError {
    #[error("Action reference cannot be empty")]
    Empty,
    #[error("Action reference cannot contain whitespace: '{0}'")]
    ContainsWhitespace(String),
    #[error("Action reference must be 'owner/repo@ref', './path', or 'docker://image': '{0}'")]
    InvalidFormat(String),
}

// ============================================================================
// CRON EXPRESSION
// ============================================================================

static CRON_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z*,/-]+$").unwrap());

/// Strongly-typed cron expression for scheduled triggers
///
/// Validates shape only: five whitespace-separated fields of cron
/// characters. Range semantics are left to the consuming engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CronExpr(String);

impl CronExpr {
    /// Create a new cron expression with validation
    pub fn new(expr: impl Into<String>) -> Result<Self, CronExprError> {
        let expr = expr.into();

        if expr.trim().is_empty() {
            return Err(CronExprError::Empty);
        }

        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CronExprError::WrongFieldCount(fields.len()));
        }
        for field in &fields {
            if !CRON_FIELD_RE.is_match(field) {
                return Err(CronExprError::InvalidField(field.to_string()));
            }
        }

        Ok(CronExpr(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CronExpr {
    type Error = CronExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CronExpr::new(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CronExprError {
    #[error("Cron expression cannot be empty")]
    Empty,
    #[error("Cron expression must have 5 fields, got {0}")]
    WrongFieldCount(usize),
    #[error("Cron field contains invalid characters: '{0}'")]
    InvalidField(String),
}

// ============================================================================
// TESTS
// ============================================================================
