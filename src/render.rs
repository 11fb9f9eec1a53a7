//! Workflow-to-YAML emission
//!
//! Rendering is a pure function over the model. Serde attributes handle
//! the key renames and optional-field omission; this module handles the
//! one thing attributes cannot: scalar style. Every string value that
//! contains a line break is normalized before emission so the emitter
//! produces a plain `|` literal block:
//!
//! - line endings are normalized to `\n`
//! - leading whitespace is trimmed, so no explicit indentation indicator
//!   (like `|2-`) is ever needed
//! - a trailing newline is guaranteed, so the style is `|` rather than `|-`
//!
//! Anchors and aliases are never emitted; repeated substructures are fully
//! inlined.

use serde_yaml::Value;

use crate::workflow::Workflow;

/// Render a workflow to GitHub Actions YAML
pub fn render(workflow: &Workflow) -> Result<String, serde_yaml::Error> {
    let mut value = serde_yaml::to_value(workflow)?;
    normalize_scalars(&mut value);
    serde_yaml::to_string(&value)
}

/// Walk the value tree and normalize every multiline string scalar
fn normalize_scalars(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains('\n') || s.contains('\r') {
                *s = normalize_multiline(s);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                normalize_scalars(item);
            }
        }
        Value::Mapping(map) => {
            for (_, entry) in map.iter_mut() {
                normalize_scalars(entry);
            }
        }
        _ => {}
    }
}

fn normalize_multiline(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified.trim_start();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut normalized = trimmed.to_string();
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{StepBuilder, WorkflowBuilder};

    fn script_workflow(script: &str) -> Workflow {
        WorkflowBuilder::new()
            .name("Unity CI")
            .unwrap()
            .on_push(["main"])
            .with_job("build", |job| {
                job.runs_on("ubuntu-latest").with_step(|step| {
                    Ok(step.name("Build project").run(script))
                })
            })
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_normalize_multiline() {
        assert_eq!(normalize_multiline("  echo a\necho b"), "echo a\necho b\n");
        assert_eq!(normalize_multiline("echo a\r\necho b\r\n"), "echo a\necho b\n");
        assert_eq!(normalize_multiline("\n\t echo a\n"), "echo a\n");
        assert_eq!(normalize_multiline(" \n \t\n"), "");
    }

    #[test]
    fn test_multiline_run_renders_as_literal_block() {
        let workflow = script_workflow("echo one\necho two");
        let yaml = render(&workflow).unwrap();

        assert!(yaml.contains("run: |\n"), "expected literal block in:\n{yaml}");
        assert!(yaml.contains("echo one"));
        assert!(yaml.contains("echo two"));
        assert!(!yaml.contains("|-"));
        assert!(!yaml.contains("|2"));
    }

    #[test]
    fn test_single_line_run_stays_plain() {
        let workflow = script_workflow("echo hello");
        let yaml = render(&workflow).unwrap();
        assert!(yaml.contains("run: echo hello"));
        assert!(!yaml.contains('|'));
    }

    #[test]
    fn test_step_builder_output_parses_back() {
        let workflow = script_workflow("echo one\necho two");
        let yaml = render(&workflow).unwrap();

        let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();
        let job = &parsed.jobs[0];
        assert_eq!(job.steps[0].run.as_deref(), Some("echo one\necho two\n"));
    }

    #[test]
    fn test_multiline_with_value_is_normalized_too() {
        let step = StepBuilder::new()
            .name("Upload build")
            .uses("actions/upload-artifact@v4")
            .unwrap()
            .with("name", "player")
            .with("path", "Builds/Windows/\nBuilds/Linux/")
            .build()
            .unwrap();

        let workflow = WorkflowBuilder::new()
            .name("Unity CI")
            .unwrap()
            .on_push(["main"])
            .with_job("upload", |job| Ok(job.runs_on("ubuntu-latest").step(step)))
            .unwrap()
            .build()
            .unwrap();

        let yaml = render(&workflow).unwrap();
        assert!(yaml.contains("path: |\n"), "expected literal block in:\n{yaml}");

        let parsed: Workflow = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.jobs[0].steps[0].with["path"],
            "Builds/Windows/\nBuilds/Linux/\n"
        );
    }
}
