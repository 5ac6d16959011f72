//! Per-page form state, independent of any terminal.
//!
//! Every page that takes input follows the same two-state shape: `Idle` while
//! values are being entered, `Submitted` after one explicit submit. Changing a
//! value drops the page back to `Idle`.

use crate::domain::Page;
use crate::posture::discover_image_files;

pub mod prediction;
pub mod review;
pub mod upload;

pub use prediction::PredictionForm;
pub use review::{ReviewForm, ReviewReceipt, ReviewRow};
pub use upload::{UploadForm, UploadPhase};

#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase<T> {
    Idle,
    Submitted(T),
}

impl<T> FormPhase<T> {
    pub fn submitted(&self) -> Option<&T> {
        match self {
            FormPhase::Idle => None,
            FormPhase::Submitted(v) => Some(v),
        }
    }
}

/// State of whichever page is active. Built fresh on every page switch.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Welcome,
    Prediction(PredictionForm),
    Posture(UploadForm),
    Review(ReviewForm),
}

impl PageState {
    pub fn for_page(page: Page) -> Self {
        match page {
            Page::Welcome => PageState::Welcome,
            Page::Prediction(domain) => PageState::Prediction(PredictionForm::new(domain)),
            Page::Posture => PageState::Posture(UploadForm::new(discover_image_files())),
            Page::Review => PageState::Review(ReviewForm::default()),
        }
    }

    /// True while keystrokes should go into a text buffer.
    pub fn is_editing(&self) -> bool {
        match self {
            PageState::Welcome => false,
            PageState::Prediction(form) => form.editing().is_some(),
            PageState::Posture(form) => form.is_editing(),
            PageState::Review(form) => form.is_editing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn fresh_state_matches_page_kind() {
        assert_eq!(PageState::for_page(Page::Welcome), PageState::Welcome);
        match PageState::for_page(Page::Prediction(Domain::Heart)) {
            PageState::Prediction(form) => assert_eq!(form.domain(), Domain::Heart),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(PageState::for_page(Page::Review), PageState::Review(_)));
        assert!(!PageState::for_page(Page::Review).is_editing());
    }
}
