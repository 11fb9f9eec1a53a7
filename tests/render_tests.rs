//! Rendering contract tests
//!
//! Exercises the library API end to end: rendered output must be valid
//! YAML that parses back into the same model, with aliased key names,
//! literal block scalars for multiline strings, and no anchors.

use qualitybuddy::{render, StepBuilder, Workflow, WorkflowBuilder};

fn full_workflow() -> Workflow {
    WorkflowBuilder::new()
        .name("Unity CI")
        .unwrap()
        .on_push(["main", "develop"])
        .on_pull_request(["main"])
        .on_manual()
        .on_schedule("0 2 * * *")
        .unwrap()
        .with_job("build-windows", |job| {
            job.runs_on("ubuntu-latest")
                .env("UNITY_LICENSE", "${{ secrets.UNITY_LICENSE }}")
                .with_step(|step| {
                    step.name("Checkout repository")
                        .uses("actions/checkout@v4")
                        .map(|s| s.with("lfs", "true"))
                })?
                .with_step(|step| {
                    Ok(step
                        .name("Stage build")
                        .run("echo \"staging\"\nls -alh Builds/StandaloneWindows64"))
                })
        })
        .unwrap()
        .with_job("notify", |job| {
            job.runs_on("ubuntu-latest")
                .needs("build-windows")?
                .with_step(|step| {
                    Ok(step
                        .name("Report")
                        .condition("success()")
                        .run("echo done"))
                })
        })
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_round_trip_preserves_structure() {
    let workflow = full_workflow();
    let yaml = render(&workflow).unwrap();

    let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();

    // Multiline scalars come back normalized with a trailing newline;
    // everything else must be identical.
    assert_eq!(parsed.name, workflow.name);
    assert_eq!(parsed.trigger.push, workflow.trigger.push);
    assert_eq!(parsed.trigger.pull_request, workflow.trigger.pull_request);
    assert_eq!(parsed.trigger.scheduled, workflow.trigger.scheduled);
    assert_eq!(
        parsed.job_ids().collect::<Vec<_>>(),
        workflow.job_ids().collect::<Vec<_>>()
    );
    assert_eq!(parsed.jobs[1], workflow.jobs[1]);

    let original_script = workflow.jobs[0].steps[1].run.as_deref().unwrap();
    let parsed_script = parsed.jobs[0].steps[1].run.as_deref().unwrap();
    assert_eq!(parsed_script, format!("{original_script}\n"));
}

#[test]
fn test_rendering_is_deterministic() {
    let workflow = full_workflow();
    assert_eq!(render(&workflow).unwrap(), render(&workflow).unwrap());
}

#[test]
fn test_alias_table_applied() {
    let yaml = render(&full_workflow()).unwrap();

    assert!(yaml.contains("\non:\n"));
    assert!(yaml.contains("runs-on: ubuntu-latest"));
    assert!(yaml.contains("if: success()"));
    assert!(yaml.contains("workflow_dispatch:"));
    assert!(yaml.contains("schedule:"));

    assert!(!yaml.contains("trigger"));
    assert!(!yaml.contains("runs_on"));
    assert!(!yaml.contains("if_condition"));
    assert!(!yaml.contains("manual"));
    assert!(!yaml.contains("scheduled"));
}

#[test]
fn test_unset_optionals_never_rendered() {
    let workflow = WorkflowBuilder::new()
        .name("Minimal")
        .unwrap()
        .on_push(["main"])
        .with_job("build", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.run("echo build")))
        })
        .unwrap()
        .build()
        .unwrap();

    let yaml = render(&workflow).unwrap();
    assert!(!yaml.contains("null"));
    assert!(!yaml.contains("~"));
    assert!(!yaml.contains("needs"));
    assert!(!yaml.contains("env"));
    assert!(!yaml.contains("with"));
    assert!(!yaml.contains("name: null"));
    assert!(!yaml.contains("if"));
    assert!(!yaml.contains("uses"));
    assert!(!yaml.contains("shell"));
}

#[test]
fn test_omission_is_idempotent() {
    let workflow = WorkflowBuilder::new()
        .name("Minimal")
        .unwrap()
        .on_push(["main"])
        .with_job("build", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.run("echo build")))
        })
        .unwrap()
        .build()
        .unwrap();

    let first = render(&workflow).unwrap();
    let reparsed: Workflow = serde_yaml::from_str(&first).unwrap();
    let second = render(&reparsed).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_repeated_substructures_are_inlined_without_anchors() {
    let checkout = |step: StepBuilder| {
        step.name("Checkout repository")
            .uses("actions/checkout@v4")
            .map(|s| s.with("lfs", "true"))
    };

    let workflow = WorkflowBuilder::new()
        .name("Twin jobs")
        .unwrap()
        .on_push(["main"])
        .with_job("a", |job| job.runs_on("ubuntu-latest").with_step(checkout))
        .unwrap()
        .with_job("b", |job| job.runs_on("ubuntu-latest").with_step(checkout))
        .unwrap()
        .build()
        .unwrap();

    let yaml = render(&workflow).unwrap();
    assert!(!yaml.contains('&'));
    assert!(!yaml.contains('*'));
    assert_eq!(yaml.matches("actions/checkout@v4").count(), 2);
}

#[test]
fn test_job_key_order_is_insertion_order() {
    let workflow = WorkflowBuilder::new()
        .name("Ordered")
        .unwrap()
        .on_push(["main"])
        .with_job("zeta", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.run("echo z")))
        })
        .unwrap()
        .with_job("alpha", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.run("echo a")))
        })
        .unwrap()
        .build()
        .unwrap();

    let yaml = render(&workflow).unwrap();
    let zeta = yaml.find("zeta:").unwrap();
    let alpha = yaml.find("alpha:").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_literal_block_reproduces_script() {
    let script = "#!/usr/bin/env bash\nset -euo pipefail\n\necho \"multi line\"\nls -alh Builds/\n";

    let workflow = WorkflowBuilder::new()
        .name("Script")
        .unwrap()
        .on_push(["main"])
        .with_job("build", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.name("Run script").run(script)))
        })
        .unwrap()
        .build()
        .unwrap();

    let yaml = render(&workflow).unwrap();
    assert!(yaml.contains("run: |\n"));

    let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.jobs[0].steps[0].run.as_deref(), Some(script));
}

#[test]
fn test_crlf_scripts_normalized() {
    let workflow = WorkflowBuilder::new()
        .name("CRLF")
        .unwrap()
        .on_push(["main"])
        .with_job("build", |job| {
            job.runs_on("ubuntu-latest")
                .with_step(|step| Ok(step.run("echo one\r\necho two")))
        })
        .unwrap()
        .build()
        .unwrap();

    let yaml = render(&workflow).unwrap();
    let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(
        parsed.jobs[0].steps[0].run.as_deref(),
        Some("echo one\necho two\n")
    );
}
