//! Command-line parsing for the health-prediction front end.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! feature mapping and model code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Domain;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hg",
    version,
    about = "ProActive Health Guard: health-risk screening with pre-trained models"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (the default when no subcommand is given).
    Tui(TuiArgs),
    /// Run one prediction from `--set key=value` pairs and print the result.
    Predict(PredictArgs),
    /// Load every model artifact and report which ones are usable.
    Models(ModelArgs),
    /// List the input fields of a prediction form, in model order.
    Fields(FieldsArgs),
}

/// Where to look for model artifacts.
#[derive(Debug, Parser, Clone, Default)]
pub struct ModelArgs {
    /// Directory containing the `Diseases/...` artifact tree.
    /// Falls back to `HG_MODEL_DIR`, then the current directory.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub models: ModelArgs,

    /// Append logs here while the TUI owns the terminal.
    /// Falls back to `HG_LOG_FILE`, then `health-guard.log`.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// Which form to fill in.
    #[arg(value_enum)]
    pub domain: Domain,

    /// Override a field, e.g. `--set glucose=148`. Unset fields keep their defaults.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    #[command(flatten)]
    pub models: ModelArgs,

    /// Log debug events to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct FieldsArgs {
    #[arg(value_enum)]
    pub domain: Domain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_collects_repeated_assignments() {
        let cli = Cli::parse_from([
            "hg",
            "predict",
            "diabetes",
            "--set",
            "glucose=148",
            "--set",
            "bmi=33.6",
            "--model-dir",
            "/srv/models",
        ]);
        match cli.command {
            Command::Predict(args) => {
                assert_eq!(args.domain, Domain::Diabetes);
                assert_eq!(args.assignments, vec!["glucose=148", "bmi=33.6"]);
                assert_eq!(args.models.model_dir, Some(PathBuf::from("/srv/models")));
                assert!(!args.verbose);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tui_flags_are_optional() {
        let cli = Cli::parse_from(["hg", "tui"]);
        match cli.command {
            Command::Tui(args) => {
                assert!(args.log_file.is_none());
                assert!(args.models.model_dir.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_domain_is_a_parse_error() {
        assert!(Cli::try_parse_from(["hg", "fields", "kidney"]).is_err());
    }
}
