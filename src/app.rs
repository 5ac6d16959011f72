//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging for the chosen mode
//! - loads the model registry
//! - runs the TUI or one of the scripting commands

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FieldsArgs, ModelArgs, PredictArgs, TuiArgs};
use crate::error::AppError;
use crate::features::FormValues;
use crate::models::{ModelPaths, ModelRegistry};

pub mod pipeline;

pub const MODEL_DIR_ENV: &str = "HG_MODEL_DIR";
pub const LOG_FILE_ENV: &str = "HG_LOG_FILE";
pub const DEFAULT_LOG_FILE: &str = "health-guard.log";

/// Entry point for the `hg` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // `hg` and `hg --model-dir X` behave like `hg tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Models(args) => handle_models(args),
        Command::Fields(args) => handle_fields(args),
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let log_file = args
        .log_file
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    crate::logging::init_file_logger(&log_file)?;

    let registry = load_registry(&args.models);
    crate::tui::run(registry)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    crate::logging::init_cli_logger(args.verbose);

    let mut values = FormValues::defaults(args.domain);
    for assignment in &args.assignments {
        values.apply_assignment(assignment)?;
    }

    let registry = load_registry(&args.models);
    let run = pipeline::run_prediction(&registry, &values)?;
    print!("{}", crate::report::format_prediction(&values, &run));
    Ok(())
}

fn handle_models(args: ModelArgs) -> Result<(), AppError> {
    crate::logging::init_cli_logger(false);

    let registry = load_registry(&args);
    print!("{}", crate::report::format_registry_report(&registry.report()));
    Ok(())
}

fn handle_fields(args: FieldsArgs) -> Result<(), AppError> {
    print!("{}", crate::report::format_field_table(args.domain));
    Ok(())
}

/// Flag, then `HG_MODEL_DIR`, then the working directory.
pub fn model_paths(args: &ModelArgs) -> ModelPaths {
    let root = args
        .model_dir
        .clone()
        .or_else(|| std::env::var_os(MODEL_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    ModelPaths::new(root)
}

fn load_registry(args: &ModelArgs) -> ModelRegistry {
    let paths = model_paths(args);
    info!(root = %paths.root().display(), "loading models");
    ModelRegistry::load(&paths)
}

/// Rewrite argv so `hg` defaults to `hg tui`.
///
/// Rules:
/// - `hg`                      -> `hg tui`
/// - `hg --model-dir m ...`    -> `hg tui --model-dir m ...`
/// - `hg --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "models" | "fields");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["hg"])), argv(&["hg", "tui"]));
    }

    #[test]
    fn leading_flags_belong_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["hg", "--model-dir", "m"])),
            argv(&["hg", "tui", "--model-dir", "m"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        for args in [
            &["hg", "--help"][..],
            &["hg", "-V"][..],
            &["hg", "predict", "heart"][..],
            &["hg", "models"][..],
            &["hg", "fields", "autism"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn explicit_model_dir_wins() {
        let args = ModelArgs {
            model_dir: Some(PathBuf::from("/opt/models")),
        };
        assert_eq!(model_paths(&args).root(), std::path::Path::new("/opt/models"));
    }
}
