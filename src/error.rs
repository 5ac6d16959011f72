//! Error types.
//!
//! `AppError` is what reaches `main`: a message plus the process exit code.
//! The library layers use typed `thiserror` enums so callers (and tests) can
//! match on the failure kind; they convert into `AppError` at the boundary.

use std::path::PathBuf;

use crate::domain::Domain;

/// Usage, configuration, or input errors.
pub const EXIT_USAGE: u8 = 2;
/// A submission reached the model but no label came back.
pub const EXIT_PREDICTION: u8 = 3;
/// Terminal or log-file I/O.
pub const EXIT_IO: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure to turn a model artifact on disk into a usable classifier.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot read model artifact '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model artifact '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed model: {0}")]
    Malformed(String),
}

/// Failure of a single `predict` call. Terminal to that submission only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("{} model is not available ({reason})", domain.display_name())]
    Unavailable { domain: Domain, reason: String },

    #[error("model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("feature {index} is not a finite number")]
    NonFinite { index: usize },
}

/// Raw widget or command-line value that cannot be mapped onto a field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown field '{key}' for {domain} (see `hg fields {domain}`)")]
    UnknownField { domain: &'static str, key: String },

    #[error("{field}: '{raw}' is not a valid number")]
    BadNumber { field: &'static str, raw: String },

    #[error("{field}: '{raw}' is not one of {options}")]
    BadChoice {
        field: &'static str,
        raw: String,
        options: String,
    },

    #[error("expected KEY=VALUE, got '{0}'")]
    BadAssignment(String),

    #[error("{field}: value has the wrong type for this field")]
    TypeMismatch { field: &'static str },
}

/// The upload control refused a file before any analysis ran.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported file type '{ext}': choose a jpg, jpeg or png image")]
    UnsupportedType { ext: String },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("expected a file, got a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("cannot read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },
}

/// Anything that can go wrong between "submit" and "label".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}

impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError::new(EXIT_USAGE, err.to_string())
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Field(e) => e.into(),
            SubmitError::Predict(e) => AppError::new(EXIT_PREDICTION, format!("Prediction error: {e}")),
        }
    }
}
