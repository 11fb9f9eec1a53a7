//! Validation error types
//!
//! Structured errors for each validation layer, designed for helpful
//! error messages with suggestions.

use thiserror::Error;

/// Validation layer (1-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLayer {
    Workflow = 1,
    Jobs = 2,
    Dependencies = 3,
    Steps = 4,
}

impl std::fmt::Display for ValidationLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationLayer::Workflow => write!(f, "Workflow"),
            ValidationLayer::Jobs => write!(f, "Jobs"),
            ValidationLayer::Dependencies => write!(f, "Dependencies"),
            ValidationLayer::Steps => write!(f, "Steps"),
        }
    }
}

/// Severity of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation error with context
#[derive(Debug, Error)]
pub enum ValidationError {
    // Layer 1: Workflow errors
    #[error("Workflow has no trigger events; it would never run")]
    EmptyTrigger { layer: ValidationLayer },

    #[error("Trigger event '{event}' has an empty branch name")]
    EmptyBranchName { layer: ValidationLayer, event: String },

    // Layer 2: Job errors
    #[error("Job '{job_id}' has an empty runner label")]
    EmptyRunner { layer: ValidationLayer, job_id: String },

    #[error("Job '{job_id}' has no steps")]
    NoSteps { layer: ValidationLayer, job_id: String },

    // Layer 3: Dependency errors
    #[error("Job '{job_id}' needs '{needed}', which does not exist")]
    NeedsUnknownJob {
        layer: ValidationLayer,
        job_id: String,
        needed: String,
        available_jobs: Vec<String>,
    },

    #[error("Job '{job_id}' needs itself")]
    SelfDependency { layer: ValidationLayer, job_id: String },

    #[error("Dependency cycle detected: {cycle_path}")]
    DependencyCycle {
        layer: ValidationLayer,
        cycle_path: String,
    },

    // Layer 4: Step errors
    #[error("Step {step_index} of job '{job_id}' has both an action reference and a script body")]
    BothUsesAndRun {
        layer: ValidationLayer,
        job_id: String,
        step_index: usize,
    },

    #[error("Step {step_index} of job '{job_id}' has neither an action reference nor a script body")]
    NoPrimaryAction {
        layer: ValidationLayer,
        job_id: String,
        step_index: usize,
    },

    #[error("Step {step_index} of job '{job_id}' has action inputs but no action reference")]
    InputsWithoutAction {
        layer: ValidationLayer,
        job_id: String,
        step_index: usize,
    },

    #[error("Step {step_index} of job '{job_id}' sets a shell but has no script body")]
    ShellWithoutRun {
        layer: ValidationLayer,
        job_id: String,
        step_index: usize,
        severity: Severity,
    },
}

impl ValidationError {
    /// Get the validation layer for this error
    pub fn layer(&self) -> ValidationLayer {
        match self {
            ValidationError::EmptyTrigger { layer, .. } => *layer,
            ValidationError::EmptyBranchName { layer, .. } => *layer,
            ValidationError::EmptyRunner { layer, .. } => *layer,
            ValidationError::NoSteps { layer, .. } => *layer,
            ValidationError::NeedsUnknownJob { layer, .. } => *layer,
            ValidationError::SelfDependency { layer, .. } => *layer,
            ValidationError::DependencyCycle { layer, .. } => *layer,
            ValidationError::BothUsesAndRun { layer, .. } => *layer,
            ValidationError::NoPrimaryAction { layer, .. } => *layer,
            ValidationError::InputsWithoutAction { layer, .. } => *layer,
            ValidationError::ShellWithoutRun { layer, .. } => *layer,
        }
    }

    /// Get severity (error vs warning)
    pub fn severity(&self) -> Severity {
        match self {
            ValidationError::ShellWithoutRun { severity, .. } => *severity,
            _ => Severity::Error,
        }
    }

    /// Get suggestion for fixing this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ValidationError::EmptyTrigger { .. } => {
                Some("Enable push, pull_request, manual, or a schedule".to_string())
            }
            ValidationError::EmptyBranchName { .. } => {
                Some("Remove the empty entry or name a branch".to_string())
            }
            ValidationError::EmptyRunner { .. } => {
                Some("Set a runner label such as ubuntu-latest".to_string())
            }
            ValidationError::NoSteps { .. } => {
                Some("Add at least one step to the job".to_string())
            }
            ValidationError::NeedsUnknownJob { available_jobs, .. } => {
                if available_jobs.is_empty() {
                    Some("No other jobs available in workflow".to_string())
                } else if available_jobs.len() <= 5 {
                    Some(format!("Available jobs: {}", available_jobs.join(", ")))
                } else {
                    Some(format!(
                        "Available jobs: {} (and {} more)",
                        available_jobs[..3].join(", "),
                        available_jobs.len() - 3
                    ))
                }
            }
            ValidationError::SelfDependency { .. } => {
                Some("Remove the job from its own needs list".to_string())
            }
            ValidationError::DependencyCycle { .. } => {
                Some("Break the cycle - needs must form a DAG".to_string())
            }
            ValidationError::BothUsesAndRun { .. } => {
                Some("Split into two steps: one uses, one run".to_string())
            }
            ValidationError::NoPrimaryAction { .. } => {
                Some("Set either uses or run on the step".to_string())
            }
            ValidationError::InputsWithoutAction { .. } => {
                Some("with: inputs only apply to uses: steps".to_string())
            }
            ValidationError::ShellWithoutRun { .. } => {
                Some("shell: only applies to run: steps".to_string())
            }
        }
    }
}

/// Result of validating a workflow
#[derive(Debug)]
pub struct ValidationResult {
    pub source: String,
    pub job_count: usize,
    pub step_count: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            job_count: 0,
            step_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        if error.severity() == Severity::Warning {
            self.warnings.push(error);
        } else {
            self.errors.push(error);
        }
    }
}
