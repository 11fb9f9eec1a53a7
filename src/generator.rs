//! Workflow generation for Unity builds
//!
//! Turns a [`BuildConfig`] into a complete workflow: one job per platform,
//! running the game-ci builder inside a container runner, with the Unity
//! license credentials taken from repository secrets.

use crate::builders::{BuilderError, JobBuilder, StepBuilder, WorkflowBuilder};
use crate::config::{BuildConfig, PlatformConfig};
use crate::error::QualityBuddyError;
use crate::job::Job;
use crate::step::Step;
use crate::workflow::Workflow;

pub const CHECKOUT_ACTION: &str = "actions/checkout@v4";
pub const CACHE_ACTION: &str = "actions/cache@v4";
pub const UNITY_BUILDER_ACTION: &str = "game-ci/unity-builder@v4";
pub const UPLOAD_ARTIFACT_ACTION: &str = "actions/upload-artifact@v4";

/// The game-ci builder is container-based, so every platform job runs on
/// the same Linux runner; the player target selects the platform.
const RUNNER_LABEL: &str = "ubuntu-latest";

/// Directory the builder writes players into
const BUILDS_PATH: &str = "Builds";

/// Generate a workflow from a validated build configuration
pub fn generate(config: &BuildConfig) -> Result<Workflow, QualityBuddyError> {
    config.validate()?;

    tracing::debug!(
        platforms = config.platforms.len(),
        unity_version = %config.unity_version,
        "generating workflow"
    );

    let mut builder = WorkflowBuilder::new().name(config.name.as_str())?;

    if config.on.is_empty() {
        // Same default the original tool hardcoded
        builder = builder.on_push(["main"]);
    } else {
        if !config.on.push.is_empty() {
            builder = builder.on_push(config.on.push.iter().cloned());
        }
        if !config.on.pull_request.is_empty() {
            builder = builder.on_pull_request(config.on.pull_request.iter().cloned());
        }
        if config.on.manual {
            builder = builder.on_manual();
        }
        for cron in &config.on.schedule {
            builder = builder.on_schedule(cron)?;
        }
    }

    for entry in &config.platforms {
        let id = format!("build-{}", entry.platform.slug());
        builder = builder.job(&id, platform_job(config, entry)?)?;
    }

    Ok(builder.build()?)
}

fn platform_job(config: &BuildConfig, entry: &PlatformConfig) -> Result<Job, BuilderError> {
    let mut job = JobBuilder::new()
        .runs_on(RUNNER_LABEL)
        .env("UNITY_LICENSE", "${{ secrets.UNITY_LICENSE }}")
        .env("UNITY_EMAIL", "${{ secrets.UNITY_EMAIL }}")
        .env("UNITY_PASSWORD", "${{ secrets.UNITY_PASSWORD }}")
        .step(checkout_step()?)
        .step(cache_step(config, entry)?)
        .step(build_step(config, entry)?)
        .step(stage_step(entry)?);

    if let Some(upload) = &entry.upload {
        let paths = if upload.paths.is_empty() {
            entry.platform.default_build_path()
        } else {
            upload.paths.join("\n")
        };
        job = job.step(upload_step(&upload.artifact_name, &paths)?);
    }

    job.build()
}

fn checkout_step() -> Result<Step, BuilderError> {
    StepBuilder::new()
        .name("Checkout repository")
        .uses(CHECKOUT_ACTION)?
        .with("lfs", "true")
        .build()
}

fn cache_step(config: &BuildConfig, entry: &PlatformConfig) -> Result<Step, BuilderError> {
    StepBuilder::new()
        .name("Cache Library")
        .uses(CACHE_ACTION)?
        .with("path", format!("{}/Library", config.project_path))
        .with("key", format!("Library-{}", entry.platform))
        .with("restore-keys", "Library-")
        .build()
}

fn build_step(config: &BuildConfig, entry: &PlatformConfig) -> Result<Step, BuilderError> {
    StepBuilder::new()
        .name(format!("Build for {}", entry.platform))
        .uses(UNITY_BUILDER_ACTION)?
        .with("projectPath", config.project_path.clone())
        .with("unityVersion", config.unity_version.clone())
        .with("targetPlatform", entry.platform.target_platform())
        .with("buildName", entry.output_name.clone())
        .with("buildsPath", BUILDS_PATH)
        .build()
}

/// Multiline script staging the build output for inspection and upload
fn stage_step(entry: &PlatformConfig) -> Result<Step, BuilderError> {
    let target_dir = format!("{}/{}", BUILDS_PATH, entry.platform.target_platform());
    let script = format!(
        "echo \"Staging {platform} build output\"\n\
         chmod -R a+rX \"{dir}\"\n\
         ls -alh \"{dir}\"",
        platform = entry.platform,
        dir = target_dir,
    );

    StepBuilder::new()
        .name(format!("Stage {} build", entry.platform))
        .shell("bash")
        .run(script)
        .build()
}

fn upload_step(artifact_name: &str, paths: &str) -> Result<Step, BuilderError> {
    StepBuilder::new()
        .name(format!("Upload {artifact_name}"))
        .condition("success()")
        .uses(UPLOAD_ARTIFACT_ACTION)?
        .with("name", artifact_name)
        .with("path", paths)
        .build()
}
