//! Error types with fix suggestions

use thiserror::Error;

use crate::builders::BuilderError;
use crate::config::ConfigError;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum QualityBuddyError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON report error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Workflow construction failed: {0}")]
    Build(#[from] BuilderError),

    #[error("Workflow validation failed with {errors} error(s)")]
    Validation { errors: usize },
}

impl FixSuggestion for QualityBuddyError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            QualityBuddyError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            QualityBuddyError::Io(_) => Some("Check file path and permissions"),
            QualityBuddyError::Json(_) => None,
            QualityBuddyError::Config(error) => Some(match error {
                ConfigError::UnsupportedUnityVersion { .. } => {
                    "Pick a supported Unity editor version"
                }
                ConfigError::NoPlatforms => "Add a platforms: entry (windows, linux)",
                ConfigError::DuplicatePlatform { .. } => "List each platform at most once",
                ConfigError::MissingOutputName { .. } => {
                    "Set output_name to the built player's name"
                }
                ConfigError::MissingArtifactName { .. } => {
                    "Set upload.artifact_name, or remove the upload section"
                }
                ConfigError::EmptyUploadPath { .. } => {
                    "Remove empty entries from upload.paths"
                }
                ConfigError::InvalidCron { .. } => {
                    "Use a 5-field cron expression like '0 2 * * *'"
                }
            }),
            QualityBuddyError::Build(_) => {
                Some("Fix the build configuration and regenerate")
            }
            QualityBuddyError::Validation { .. } => {
                Some("Run the validate subcommand for the full report")
            }
        }
    }
}
