//! QualityBuddy - GitHub Actions workflow generator for Unity projects

pub mod builders;
pub mod config;
pub mod dep_graph;
pub mod error;
pub mod errors;
pub mod generator;
pub mod job;
pub mod render;
pub mod step;
pub mod trigger;
pub mod types;
pub mod validator;
pub mod workflow;

pub use builders::{BuilderError, JobBuilder, StepBuilder, WorkflowBuilder};
pub use config::{BuildConfig, ConfigError, Platform, PlatformConfig, TriggerConfig, UploadConfig};
pub use dep_graph::DependencyGraph;
pub use error::{FixSuggestion, QualityBuddyError};
pub use errors::{Severity, ValidationError, ValidationLayer, ValidationResult};
pub use generator::generate;
pub use job::Job;
pub use render::render;
pub use step::Step;
pub use trigger::{Branches, ManualDispatch, ScheduleEntry, Trigger};
pub use types::{ActionRef, CronExpr, JobId, WorkflowName};
pub use validator::validate;
pub use workflow::Workflow;
