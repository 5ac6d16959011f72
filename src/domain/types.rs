//! Shared domain types.
//!
//! These are the nouns every other module talks in: which clinical domain a
//! form belongs to, which page the navigation shell shows, and what a
//! submission turned into.

use std::borrow::Cow;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One health-condition prediction workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Autism,
    Diabetes,
    Heart,
    Parkinsons,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Autism,
        Domain::Diabetes,
        Domain::Heart,
        Domain::Parkinsons,
    ];

    /// Stable lowercase key, as accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Domain::Autism => "autism",
            Domain::Diabetes => "diabetes",
            Domain::Heart => "heart",
            Domain::Parkinsons => "parkinsons",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Domain::Autism => "Autism",
            Domain::Diabetes => "Diabetes",
            Domain::Heart => "Heart Disease",
            Domain::Parkinsons => "Parkinson's",
        }
    }

    /// Page heading shown above the form.
    pub fn heading(self) -> &'static str {
        match self {
            Domain::Autism => "Autism Prediction",
            Domain::Diabetes => "Diabetes Prediction",
            Domain::Heart => "Heart Disease Prediction",
            Domain::Parkinsons => "Parkinson's Disease Prediction",
        }
    }

    /// Caption of the form's submit control.
    pub fn submit_caption(self) -> &'static str {
        match self {
            Domain::Autism => "Predict Autism",
            Domain::Diabetes => "Diabetes Test Result",
            Domain::Heart => "Heart Disease Test Result",
            Domain::Parkinsons => "Parkinson's Test Result",
        }
    }

    /// Artifact location relative to the model directory.
    pub fn artifact_path(self) -> &'static str {
        match self {
            Domain::Autism => "Diseases/Autism-EDA/autism.json",
            Domain::Diabetes => "Diseases/Diabetes-Prediction-EDA/diabetes.json",
            Domain::Heart => "Diseases/Heart-Disease-Prediction/heart.json",
            Domain::Parkinsons => "Diseases/Parkinson-Disease-EDA-and-Prediction/Parkinsons.json",
        }
    }

    /// The canned message for a label.
    pub fn message(self, label: Label) -> &'static str {
        match (self, label) {
            (Domain::Autism, Label::Positive) => "Result: Autistic - Please consult a specialist",
            (Domain::Autism, Label::Negative) => "Result: Not Autistic",
            (Domain::Diabetes, Label::Positive) => "Result: Diabetic - Please consult a doctor",
            (Domain::Diabetes, Label::Negative) => "Result: Not Diabetic",
            (Domain::Heart, Label::Positive) => {
                "Result: Heart Disease Detected - Please consult a cardiologist"
            }
            (Domain::Heart, Label::Negative) => "Result: No Heart Disease Detected",
            (Domain::Parkinsons, Label::Positive) => {
                "Result: Parkinson's Detected - Please consult a neurologist"
            }
            (Domain::Parkinsons, Label::Negative) => "Result: No Parkinson's Detected",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Binary classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Class `1` is the positive finding; every other class reads as negative.
    pub fn from_class(class: u8) -> Self {
        if class == 1 {
            Label::Positive
        } else {
            Label::Negative
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

/// Every page the navigation shell can show. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Welcome,
    Prediction(Domain),
    Posture,
    Review,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 7] = [
        Page::Welcome,
        Page::Prediction(Domain::Autism),
        Page::Prediction(Domain::Diabetes),
        Page::Prediction(Domain::Heart),
        Page::Prediction(Domain::Parkinsons),
        Page::Posture,
        Page::Review,
    ];

    /// Sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Page::Welcome => "Welcome",
            Page::Prediction(Domain::Autism) => "Autism",
            Page::Prediction(Domain::Diabetes) => "Diabetes Prediction",
            Page::Prediction(Domain::Heart) => "Heart Disease Prediction",
            Page::Prediction(Domain::Parkinsons) => "Parkinsons Prediction",
            Page::Posture => "Yoga Posture Detection",
            Page::Review => "Review",
        }
    }

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let n = Page::ALL.len();
        Page::ALL[(self.index() + n - 1) % n]
    }
}

/// How a result block is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// What one submission of a prediction form produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Predicted { domain: Domain, label: Label },
    Failed(String),
}

impl Outcome {
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Outcome::Predicted { domain, label } => Cow::Borrowed(domain.message(*label)),
            Outcome::Failed(reason) => Cow::Owned(format!("Prediction error: {reason}")),
        }
    }

    /// Positive findings are flagged like errors; negatives read as success.
    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Predicted {
                label: Label::Negative,
                ..
            } => Severity::Success,
            Outcome::Predicted {
                label: Label::Positive,
                ..
            }
            | Outcome::Failed(_) => Severity::Error,
        }
    }
}
