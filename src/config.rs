//! Build configuration parsed from a qualitybuddy.yaml file
//!
//! This is the input side of the tool: which Unity project to build, for
//! which platforms, and when. Gating rules match what the original editor
//! window enforced before enabling its generate button.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::{CronExpr, CronExprError};

/// Unity editor versions the generated steps are known to work with
pub const SUPPORTED_UNITY_VERSIONS: &[&str] = &["2022.3.61f1", "2023.2.20f1", "6000.0.44f1"];

/// Build target platform
///
/// Only Windows and Linux are buildable; the other targets the original
/// tool displayed are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Linux,
}

impl Platform {
    /// The Unity player target passed to the build action
    pub fn target_platform(&self) -> &'static str {
        match self {
            Platform::Windows => "StandaloneWindows64",
            Platform::Linux => "StandaloneLinux64",
        }
    }

    /// Default location of build output, relative to the repository root
    pub fn default_build_path(&self) -> String {
        format!("Builds/{self}/")
    }

    /// Job id fragment ("windows", "linux")
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
        }
    }
}

/// Trigger section of the config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Branches that trigger a build on push
    #[serde(default)]
    pub push: Vec<String>,
    /// Branches that trigger a build on pull request
    #[serde(default)]
    pub pull_request: Vec<String>,
    /// Allow starting the workflow by hand
    #[serde(default)]
    pub manual: bool,
    /// Cron expressions for scheduled builds
    #[serde(default)]
    pub schedule: Vec<String>,
}

impl TriggerConfig {
    pub fn is_empty(&self) -> bool {
        self.push.is_empty()
            && self.pull_request.is_empty()
            && !self.manual
            && self.schedule.is_empty()
    }
}

/// Artifact upload settings for one platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Name of the uploaded artifact
    pub artifact_name: String,
    /// Paths to file(s) to upload; defaults to the platform build directory
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Per-platform build settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platform: Platform,
    /// Name of the built player
    pub output_name: String,
    #[serde(default)]
    pub upload: Option<UploadConfig>,
}

/// Top-level build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Workflow display name
    #[serde(default = "default_name")]
    pub name: String,
    /// Unity project path, relative to the repository root
    #[serde(default = "default_project_path")]
    pub project_path: String,
    /// Unity editor version to build with
    pub unity_version: String,
    /// When to run; defaults to push on main
    #[serde(default)]
    pub on: TriggerConfig,
    /// Platforms to build for
    pub platforms: Vec<PlatformConfig>,
}

fn default_name() -> String {
    "Unity CI".to_string()
}

fn default_project_path() -> String {
    ".".to_string()
}

impl BuildConfig {
    /// Check a version string against the supported list
    ///
    /// Matches on the major.minor prefix, so patch revisions of a
    /// supported editor line pass.
    pub fn is_version_supported(version: &str) -> bool {
        SUPPORTED_UNITY_VERSIONS
            .iter()
            .any(|supported| version.starts_with(&supported[..6]))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Self::is_version_supported(&self.unity_version) {
            return Err(ConfigError::UnsupportedUnityVersion {
                version: self.unity_version.clone(),
            });
        }

        if self.platforms.is_empty() {
            return Err(ConfigError::NoPlatforms);
        }

        let mut seen = Vec::new();
        for entry in &self.platforms {
            if seen.contains(&entry.platform) {
                return Err(ConfigError::DuplicatePlatform {
                    platform: entry.platform,
                });
            }
            seen.push(entry.platform);

            if entry.output_name.trim().is_empty() {
                return Err(ConfigError::MissingOutputName {
                    platform: entry.platform,
                });
            }

            if let Some(upload) = &entry.upload {
                if upload.artifact_name.trim().is_empty() {
                    return Err(ConfigError::MissingArtifactName {
                        platform: entry.platform,
                    });
                }
                if upload.paths.iter().any(|p| p.trim().is_empty()) {
                    return Err(ConfigError::EmptyUploadPath {
                        platform: entry.platform,
                    });
                }
            }
        }

        for expr in &self.on.schedule {
            CronExpr::new(expr).map_err(|source| ConfigError::InvalidCron {
                expr: expr.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("QB-101: Unity version '{version}' is not supported (supported: {})", SUPPORTED_UNITY_VERSIONS.join(", "))]
    UnsupportedUnityVersion { version: String },

    #[error("QB-102: No platforms selected")]
    NoPlatforms,

    #[error("QB-103: Platform '{platform}' is listed more than once")]
    DuplicatePlatform { platform: Platform },

    #[error("QB-104: output_name is required for platform '{platform}'")]
    MissingOutputName { platform: Platform },

    #[error("QB-105: artifact_name is required when upload is enabled for platform '{platform}'")]
    MissingArtifactName { platform: Platform },

    #[error("QB-106: Upload paths must not be empty for platform '{platform}'")]
    EmptyUploadPath { platform: Platform },

    #[error("QB-107: Invalid schedule entry '{expr}': {source}")]
    InvalidCron {
        expr: String,
        source: CronExprError,
    },
}
