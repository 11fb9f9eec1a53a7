//! QualityBuddy CLI - GitHub Actions workflow generator for Unity projects

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use qualitybuddy::{
    generate, render, validate, BuildConfig, FixSuggestion, QualityBuddyError, ValidationResult,
};

#[derive(Parser)]
#[command(name = "qualitybuddy")]
#[command(about = "QualityBuddy - CI job generator for Unity projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workflow file from a build config
    Generate {
        /// Path to the qualitybuddy.yaml build config
        config: PathBuf,

        /// Where to write the workflow file
        #[arg(short, long, default_value = ".github/workflows/unity-ci.yml")]
        output: PathBuf,

        /// Print the workflow to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Validate a build config and the workflow it would generate
    Validate {
        /// Path to the qualitybuddy.yaml build config
        config: PathBuf,

        /// Report format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            stdout,
        } => generate_workflow(&config, &output, stdout),
        Commands::Validate { config, format } => validate_config(&config, &format),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn load_workflow(
    config_path: &Path,
) -> Result<(qualitybuddy::Workflow, ValidationResult), QualityBuddyError> {
    let raw = fs::read_to_string(config_path)?;
    let config: BuildConfig = serde_yaml::from_str(&raw)?;
    let workflow = generate(&config)?;
    let result = validate(&workflow, &config_path.display().to_string());
    Ok((workflow, result))
}

fn generate_workflow(
    config_path: &Path,
    output: &Path,
    to_stdout: bool,
) -> Result<(), QualityBuddyError> {
    let (workflow, result) = load_workflow(config_path)?;

    if !result.is_valid() {
        print_text_report(&result);
        return Err(QualityBuddyError::Validation {
            errors: result.errors.len(),
        });
    }

    let yaml = render(&workflow)?;

    if to_stdout {
        print!("{yaml}");
    } else {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output, yaml)?;
        println!(
            "{} GitHub Actions workflow written to {}",
            "✓".green(),
            output.display()
        );
    }

    Ok(())
}

fn validate_config(config_path: &Path, format: &str) -> Result<(), QualityBuddyError> {
    let (_, result) = load_workflow(config_path)?;

    match format {
        "json" => print_json_report(&result)?,
        _ => {
            print_text_report(&result);
            if result.is_valid() {
                println!(
                    "{} Config '{}' is valid",
                    "✓".green(),
                    config_path.display()
                );
                println!("  Jobs: {}", result.job_count);
                println!("  Steps: {}", result.step_count);
            }
        }
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(QualityBuddyError::Validation {
            errors: result.errors.len(),
        })
    }
}

fn print_text_report(result: &ValidationResult) {
    for error in &result.errors {
        println!("{} [{}] {}", "✗".red(), error.layer(), error);
        if let Some(suggestion) = error.suggestion() {
            println!("  {} {}", "Fix:".yellow(), suggestion);
        }
    }
    for warning in &result.warnings {
        println!("{} [{}] {}", "!".yellow(), warning.layer(), warning);
        if let Some(suggestion) = warning.suggestion() {
            println!("  {} {}", "Fix:".yellow(), suggestion);
        }
    }
}

fn print_json_report(result: &ValidationResult) -> Result<(), QualityBuddyError> {
    let report = serde_json::json!({
        "source": result.source,
        "valid": result.is_valid(),
        "jobs": result.job_count,
        "steps": result.step_count,
        "errors": result
            .errors
            .iter()
            .map(|e| serde_json::json!({
                "layer": e.layer().to_string(),
                "message": e.to_string(),
                "suggestion": e.suggestion(),
            }))
            .collect::<Vec<_>>(),
        "warnings": result
            .warnings
            .iter()
            .map(|w| serde_json::json!({
                "layer": w.layer().to_string(),
                "message": w.to_string(),
                "suggestion": w.suggestion(),
            }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
