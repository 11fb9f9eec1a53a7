//! Builder patterns for ergonomic workflow construction
//!
//! Provides fluent APIs for building workflows programmatically. The
//! builders are where the construction-time invariants live: duplicate job
//! ids and step primary-action conflicts are rejected here, never at
//! render time.

use indexmap::IndexMap;

use crate::job::Job;
use crate::step::Step;
use crate::trigger::{Branches, ManualDispatch, ScheduleEntry, Trigger};
use crate::types::{ActionRef, CronExpr, JobId, WorkflowName};
use crate::workflow::Workflow;

// ============================================================================
// WORKFLOW BUILDER
// ============================================================================

/// Fluent builder for constructing workflows
pub struct WorkflowBuilder {
    name: Option<WorkflowName>,
    trigger: Trigger,
    jobs: IndexMap<JobId, Job>,
}

impl WorkflowBuilder {
    /// Create a new workflow builder
    pub fn new() -> Self {
        Self {
            name: None,
            trigger: Trigger::default(),
            jobs: IndexMap::new(),
        }
    }

    /// Set workflow name
    pub fn name(mut self, name: impl TryInto<WorkflowName>) -> Result<Self, BuilderError> {
        self.name = Some(
            name.try_into()
                .map_err(|_| BuilderError::InvalidName("Invalid workflow name".into()))?,
        );
        Ok(self)
    }

    /// Trigger on pushes to the given branches
    pub fn on_push<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger.push = Some(Branches::new(branches));
        self
    }

    /// Trigger on pull requests targeting the given branches
    pub fn on_pull_request<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger.pull_request = Some(Branches::new(branches));
        self
    }

    /// Allow manual dispatch
    pub fn on_manual(mut self) -> Self {
        self.trigger.manual = Some(ManualDispatch {});
        self
    }

    /// Trigger on a cron schedule
    pub fn on_schedule(mut self, cron: &str) -> Result<Self, BuilderError> {
        let cron = CronExpr::new(cron).map_err(|e| BuilderError::InvalidCron(e.to_string()))?;
        self.trigger.scheduled.push(ScheduleEntry { cron });
        Ok(self)
    }

    /// Add a job under the given id
    ///
    /// Fails if the id is invalid or already taken.
    pub fn job(mut self, id: &str, job: Job) -> Result<Self, BuilderError> {
        let id = JobId::new(id).map_err(|e| BuilderError::InvalidJobId(e.to_string()))?;
        if self.jobs.contains_key(&id) {
            return Err(BuilderError::DuplicateJobId(id.to_string()));
        }
        self.jobs.insert(id, job);
        Ok(self)
    }

    /// Add a job using JobBuilder
    pub fn with_job<F>(self, id: &str, f: F) -> Result<Self, BuilderError>
    where
        F: FnOnce(JobBuilder) -> Result<JobBuilder, BuilderError>,
    {
        let builder = f(JobBuilder::new())?;
        self.job(id, builder.build()?)
    }

    /// Build the workflow
    pub fn build(self) -> Result<Workflow, BuilderError> {
        let name = self.name.ok_or(BuilderError::MissingName)?;

        if self.jobs.is_empty() {
            return Err(BuilderError::NoJobs);
        }

        Ok(Workflow {
            name,
            trigger: self.trigger,
            jobs: self.jobs,
        })
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// JOB BUILDER
// ============================================================================

/// Builder for individual jobs
pub struct JobBuilder {
    runs_on: Option<String>,
    needs: Vec<JobId>,
    env: IndexMap<String, String>,
    steps: Vec<Step>,
}

impl JobBuilder {
    pub fn new() -> Self {
        Self {
            runs_on: None,
            needs: Vec::new(),
            env: IndexMap::new(),
            steps: Vec::new(),
        }
    }

    /// Set the runner label
    pub fn runs_on(mut self, label: impl Into<String>) -> Self {
        self.runs_on = Some(label.into());
        self
    }

    /// Declare a dependency on another job
    pub fn needs(mut self, id: &str) -> Result<Self, BuilderError> {
        let id = JobId::new(id).map_err(|e| BuilderError::InvalidJobId(e.to_string()))?;
        self.needs.push(id);
        Ok(self)
    }

    /// Add a job-level environment variable
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add a step
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Add a step using StepBuilder
    pub fn with_step<F>(mut self, f: F) -> Result<Self, BuilderError>
    where
        F: FnOnce(StepBuilder) -> Result<StepBuilder, BuilderError>,
    {
        let builder = f(StepBuilder::new())?;
        self.steps.push(builder.build()?);
        Ok(self)
    }

    /// Build the job
    pub fn build(self) -> Result<Job, BuilderError> {
        let runs_on = self.runs_on.ok_or(BuilderError::MissingRunner)?;

        if self.steps.is_empty() {
            return Err(BuilderError::NoSteps);
        }

        Ok(Job {
            runs_on,
            needs: self.needs,
            env: self.env,
            steps: self.steps,
        })
    }
}

impl Default for JobBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// STEP BUILDER
// ============================================================================

/// Builder for individual steps
///
/// A built step carries exactly one primary action: `uses` or `run`.
pub struct StepBuilder {
    name: Option<String>,
    if_condition: Option<String>,
    uses: Option<ActionRef>,
    with: IndexMap<String, String>,
    shell: Option<String>,
    run: Option<String>,
}

impl StepBuilder {
    pub fn new() -> Self {
        Self {
            name: None,
            if_condition: None,
            uses: None,
            with: IndexMap::new(),
            shell: None,
            run: None,
        }
    }

    /// Set the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Guard the step with a conditional expression
    pub fn condition(mut self, expr: impl Into<String>) -> Self {
        self.if_condition = Some(expr.into());
        self
    }

    /// Set as a reusable-action step
    pub fn uses(mut self, reference: &str) -> Result<Self, BuilderError> {
        let reference =
            ActionRef::new(reference).map_err(|e| BuilderError::InvalidActionRef(e.to_string()))?;
        self.uses = Some(reference);
        Ok(self)
    }

    /// Add a named input for the action
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }

    /// Set the shell for a script step
    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = Some(shell.into());
        self
    }

    /// Set as an inline script step
    pub fn run(mut self, script: impl Into<String>) -> Self {
        self.run = Some(script.into());
        self
    }

    /// Build the step
    pub fn build(self) -> Result<Step, BuilderError> {
        match (self.uses.is_some(), self.run.is_some()) {
            (false, false) => return Err(BuilderError::NoPrimaryAction),
            (true, true) => return Err(BuilderError::MultiplePrimaryActions),
            _ => {}
        }

        if !self.with.is_empty() && self.uses.is_none() {
            return Err(BuilderError::InputsWithoutAction);
        }

        Ok(Step {
            name: self.name,
            if_condition: self.if_condition,
            uses: self.uses,
            with: self.with,
            shell: self.shell,
            run: self.run,
        })
    }
}

impl Default for StepBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("Invalid workflow name: {0}")]
    InvalidName(String),
    #[error("Invalid job ID: {0}")]
    InvalidJobId(String),
    #[error("Invalid action reference: {0}")]
    InvalidActionRef(String),
    #[error("Invalid cron expression: {0}")]
    InvalidCron(String),
    #[error("Duplicate job ID: '{0}'")]
    DuplicateJobId(String),
    #[error("Missing workflow name")]
    MissingName,
    #[error("Missing runner label")]
    MissingRunner,
    #[error("No jobs defined")]
    NoJobs,
    #[error("Job has no steps")]
    NoSteps,
    #[error("Step has neither an action reference nor a script body")]
    NoPrimaryAction,
    #[error("Step has both an action reference and a script body")]
    MultiplePrimaryActions,
    #[error("Step has action inputs but no action reference")]
    InputsWithoutAction,
}

// ============================================================================
// TESTS
// ============================================================================
