//! Validation layer implementations
//!
//! Each layer validates a specific aspect of the workflow:
//! - Layer 1: Workflow - triggers
//! - Layer 2: Jobs - runner and step presence
//! - Layer 3: Dependencies - needs resolution and cycles
//! - Layer 4: Steps - primary action rules

use std::collections::HashSet;

use crate::dep_graph::DependencyGraph;
use crate::errors::{Severity, ValidationError, ValidationLayer, ValidationResult};
use crate::workflow::Workflow;

/// Layer 1: Validate triggers
pub fn validate_trigger(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if workflow.trigger.is_empty() {
        errors.push(ValidationError::EmptyTrigger {
            layer: ValidationLayer::Workflow,
        });
    }

    let branch_events = [
        ("push", workflow.trigger.push.as_ref()),
        ("pull_request", workflow.trigger.pull_request.as_ref()),
    ];
    for (event, branches) in branch_events {
        let Some(branches) = branches else { continue };
        if branches.branches.iter().any(|b| b.trim().is_empty()) {
            errors.push(ValidationError::EmptyBranchName {
                layer: ValidationLayer::Workflow,
                event: event.to_string(),
            });
        }
    }

    errors
}

/// Layer 2: Validate job definitions
pub fn validate_jobs(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, job) in &workflow.jobs {
        if job.runs_on.trim().is_empty() {
            errors.push(ValidationError::EmptyRunner {
                layer: ValidationLayer::Jobs,
                job_id: id.to_string(),
            });
        }
        if job.steps.is_empty() {
            errors.push(ValidationError::NoSteps {
                layer: ValidationLayer::Jobs,
                job_id: id.to_string(),
            });
        }
    }

    errors
}

/// Layer 3: Validate needs references and cycles
pub fn validate_dependencies(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let job_ids: HashSet<&str> = workflow.job_ids().map(|id| id.as_str()).collect();

    for (id, job) in &workflow.jobs {
        for needed in &job.needs {
            if needed.as_str() == id.as_str() {
                errors.push(ValidationError::SelfDependency {
                    layer: ValidationLayer::Dependencies,
                    job_id: id.to_string(),
                });
                continue;
            }
            if !job_ids.contains(needed.as_str()) {
                errors.push(ValidationError::NeedsUnknownJob {
                    layer: ValidationLayer::Dependencies,
                    job_id: id.to_string(),
                    needed: needed.to_string(),
                    available_jobs: workflow
                        .job_ids()
                        .filter(|other| other.as_str() != id.as_str())
                        .map(|other| other.to_string())
                        .collect(),
                });
            }
        }
    }

    // Cycle detection only makes sense once references resolve
    if errors.is_empty() {
        let graph = DependencyGraph::from_workflow(workflow);
        if let Some(cycle) = graph.find_cycle() {
            errors.push(ValidationError::DependencyCycle {
                layer: ValidationLayer::Dependencies,
                cycle_path: cycle.join(" -> "),
            });
        }
    }

    errors
}

/// Layer 4: Validate step primary actions
pub fn validate_steps(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, job) in &workflow.jobs {
        for (index, step) in job.steps.iter().enumerate() {
            match (step.uses.is_some(), step.run.is_some()) {
                (true, true) => errors.push(ValidationError::BothUsesAndRun {
                    layer: ValidationLayer::Steps,
                    job_id: id.to_string(),
                    step_index: index,
                }),
                (false, false) => errors.push(ValidationError::NoPrimaryAction {
                    layer: ValidationLayer::Steps,
                    job_id: id.to_string(),
                    step_index: index,
                }),
                _ => {}
            }

            if !step.with.is_empty() && step.uses.is_none() {
                errors.push(ValidationError::InputsWithoutAction {
                    layer: ValidationLayer::Steps,
                    job_id: id.to_string(),
                    step_index: index,
                });
            }
            if step.shell.is_some() && step.run.is_none() {
                errors.push(ValidationError::ShellWithoutRun {
                    layer: ValidationLayer::Steps,
                    job_id: id.to_string(),
                    step_index: index,
                    severity: Severity::Warning,
                });
            }
        }
    }

    errors
}

/// Run all layers and aggregate into a result
pub fn validate(workflow: &Workflow, source: &str) -> ValidationResult {
    tracing::debug!(source, "validating workflow");

    let mut result = ValidationResult::new(source);
    result.job_count = workflow.job_count();
    result.step_count = workflow.step_count();

    for error in validate_trigger(workflow)
        .into_iter()
        .chain(validate_jobs(workflow))
        .chain(validate_dependencies(workflow))
        .chain(validate_steps(workflow))
    {
        result.add_error(error);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::WorkflowBuilder;
    use crate::job::Job;
    use crate::step::Step;
    use crate::types::{ActionRef, JobId, WorkflowName};
    use indexmap::IndexMap;

    fn valid_workflow() -> Workflow {
        WorkflowBuilder::new()
            .name("Unity CI")
            .unwrap()
            .on_push(["main"])
            .with_job("build", |job| {
                job.runs_on("ubuntu-latest")
                    .with_step(|step| step.name("Checkout").uses("actions/checkout@v4"))
            })
            .unwrap()
            .build()
            .unwrap()
    }

    fn raw_job(steps: Vec<Step>) -> Job {
        Job {
            runs_on: "ubuntu-latest".to_string(),
            needs: Vec::new(),
            env: IndexMap::new(),
            steps,
        }
    }

    #[test]
    fn test_valid_workflow_passes() {
        let result = validate(&valid_workflow(), "test");
        assert!(result.is_valid());
        assert!(!result.has_warnings());
        assert_eq!(result.job_count, 1);
        assert_eq!(result.step_count, 1);
    }

    #[test]
    fn test_empty_trigger_reported() {
        let mut workflow = valid_workflow();
        workflow.trigger = Default::default();

        let errors = validate_trigger(&workflow);
        assert!(matches!(errors[0], ValidationError::EmptyTrigger { .. }));
    }

    #[test]
    fn test_unknown_needs_reported_with_suggestion() {
        let mut workflow = valid_workflow();
        let mut job = raw_job(vec![Step {
            run: Some("echo".to_string()),
            ..Step::default()
        }]);
        job.needs.push(JobId::new("deploy").unwrap());
        workflow.jobs.insert(JobId::new("notify").unwrap(), job);

        let errors = validate_dependencies(&workflow);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::NeedsUnknownJob { needed, available_jobs, .. } => {
                assert_eq!(needed, "deploy");
                assert_eq!(available_jobs, &["build".to_string()]);
            }
            other => panic!("Expected NeedsUnknownJob, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_reported() {
        let mut workflow = valid_workflow();
        let build = JobId::new("build").unwrap();
        workflow.jobs.get_mut(&build).unwrap().needs.push(build.clone());

        let errors = validate_dependencies(&workflow);
        assert!(matches!(errors[0], ValidationError::SelfDependency { .. }));
    }

    #[test]
    fn test_cycle_reported_with_path() {
        let mut workflow = valid_workflow();
        let mut package = raw_job(vec![Step {
            run: Some("echo".to_string()),
            ..Step::default()
        }]);
        package.needs.push(JobId::new("build").unwrap());
        workflow.jobs.insert(JobId::new("package").unwrap(), package);
        workflow
            .jobs
            .get_mut(&JobId::new("build").unwrap())
            .unwrap()
            .needs
            .push(JobId::new("package").unwrap());

        let errors = validate_dependencies(&workflow);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ValidationError::DependencyCycle { cycle_path, .. } => {
                assert!(cycle_path.contains("build"));
                assert!(cycle_path.contains("package"));
            }
            other => panic!("Expected DependencyCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_step_rules() {
        let both = Step {
            uses: Some(ActionRef::new("actions/checkout@v4").unwrap()),
            run: Some("echo".to_string()),
            ..Step::default()
        };
        let neither = Step::default();
        let shell_only = Step {
            uses: Some(ActionRef::new("actions/checkout@v4").unwrap()),
            shell: Some("bash".to_string()),
            ..Step::default()
        };

        let mut workflow = valid_workflow();
        workflow.jobs.insert(
            JobId::new("weird").unwrap(),
            raw_job(vec![both, neither, shell_only]),
        );

        let result = validate(&workflow, "test");
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.warnings[0],
            ValidationError::ShellWithoutRun { .. }
        ));
    }

    #[test]
    fn test_empty_runner_reported() {
        let mut jobs = IndexMap::new();
        let mut job = raw_job(vec![Step {
            run: Some("echo".to_string()),
            ..Step::default()
        }]);
        job.runs_on = String::new();
        jobs.insert(JobId::new("build").unwrap(), job);

        let workflow = Workflow {
            name: WorkflowName::new("Unity CI").unwrap(),
            trigger: Default::default(),
            jobs,
        };

        let errors = validate_jobs(&workflow);
        assert!(matches!(errors[0], ValidationError::EmptyRunner { .. }));
    }
}
