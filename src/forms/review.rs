//! User review & feedback. Echoed back, never stored.

use chrono::{DateTime, Local};
use tracing::info;

use crate::forms::FormPhase;

pub const ACKNOWLEDGMENT: &str = "Thank you for your feedback!";
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 10;
pub const RATING_DEFAULT: u8 = 8;

/// Rows of the review form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewRow {
    Name,
    Email,
    Feedback,
    Rating,
    Submit,
}

impl ReviewRow {
    pub const ALL: [ReviewRow; 5] = [
        ReviewRow::Name,
        ReviewRow::Email,
        ReviewRow::Feedback,
        ReviewRow::Rating,
        ReviewRow::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewRow::Name => "Name (optional)",
            ReviewRow::Email => "Email (optional)",
            ReviewRow::Feedback => "Your feedback or suggestions",
            ReviewRow::Rating => "Rating (1-10)",
            ReviewRow::Submit => "Submit Review",
        }
    }

    fn is_text(self) -> bool {
        matches!(self, ReviewRow::Name | ReviewRow::Email | ReviewRow::Feedback)
    }
}

/// What the user sent, as shown back to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReceipt {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub rating: u8,
    pub received_at: DateTime<Local>,
}

impl ReviewReceipt {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Anonymous" } else { &self.name }
    }

    pub fn echo_lines(&self) -> Vec<String> {
        vec![
            format!("Received feedback from: {}", self.display_name()),
            format!("Rating: {}/10", self.rating),
            format!("Feedback: {}", self.feedback),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    name: String,
    email: String,
    feedback: String,
    rating: u8,
    selected: usize,
    editing: bool,
    phase: FormPhase<ReviewReceipt>,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            feedback: String::new(),
            rating: RATING_DEFAULT,
            selected: 0,
            editing: false,
            phase: FormPhase::Idle,
        }
    }
}

impl ReviewForm {
    pub fn selected_row(&self) -> ReviewRow {
        ReviewRow::ALL[self.selected.min(ReviewRow::ALL.len() - 1)]
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn phase(&self) -> &FormPhase<ReviewReceipt> {
        &self.phase
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn text(&self, row: ReviewRow) -> &str {
        match row {
            ReviewRow::Name => &self.name,
            ReviewRow::Email => &self.email,
            ReviewRow::Feedback => &self.feedback,
            ReviewRow::Rating | ReviewRow::Submit => "",
        }
    }

    fn text_mut(&mut self, row: ReviewRow) -> Option<&mut String> {
        match row {
            ReviewRow::Name => Some(&mut self.name),
            ReviewRow::Email => Some(&mut self.email),
            ReviewRow::Feedback => Some(&mut self.feedback),
            ReviewRow::Rating | ReviewRow::Submit => None,
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(ReviewRow::ALL.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the rating slider.
    pub fn adjust(&mut self, delta: i32) {
        if self.selected_row() == ReviewRow::Rating {
            let next = (i32::from(self.rating) + delta).clamp(i32::from(RATING_MIN), i32::from(RATING_MAX));
            self.rating = next as u8;
            self.phase = FormPhase::Idle;
        }
    }

    /// Start typing into the selected text field.
    pub fn begin_edit(&mut self) {
        if self.selected_row().is_text() {
            self.editing = true;
        }
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    pub fn edit_push(&mut self, c: char) {
        if !self.editing || c.is_control() {
            return;
        }
        let row = self.selected_row();
        if let Some(text) = self.text_mut(row) {
            text.push(c);
            self.phase = FormPhase::Idle;
        }
    }

    pub fn edit_pop(&mut self) {
        if !self.editing {
            return;
        }
        let row = self.selected_row();
        if let Some(text) = self.text_mut(row) {
            text.pop();
            self.phase = FormPhase::Idle;
        }
    }

    pub fn submit(&mut self) -> ReviewReceipt {
        self.editing = false;
        info!(
            rating = self.rating,
            anonymous = self.name.is_empty(),
            chars = self.feedback.chars().count(),
            "feedback received"
        );
        let receipt = ReviewReceipt {
            name: self.name.clone(),
            email: self.email.clone(),
            feedback: self.feedback.clone(),
            rating: self.rating,
            received_at: Local::now(),
        };
        self.phase = FormPhase::Submitted(receipt.clone());
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut ReviewForm, text: &str) {
        form.begin_edit();
        for c in text.chars() {
            form.edit_push(c);
        }
        form.end_edit();
    }

    #[test]
    fn empty_name_reads_as_anonymous_and_text_is_verbatim() {
        let mut form = ReviewForm::default();
        form.select_next();
        form.select_next(); // feedback
        type_into(&mut form, "  Loved the heart form!  ");
        form.select_next(); // rating
        form.adjust(1);

        let receipt = form.submit();
        assert_eq!(receipt.display_name(), "Anonymous");
        assert_eq!(
            receipt.echo_lines(),
            vec![
                "Received feedback from: Anonymous".to_string(),
                "Rating: 9/10".to_string(),
                "Feedback:   Loved the heart form!  ".to_string(),
            ]
        );
    }

    #[test]
    fn named_feedback_keeps_the_name() {
        let mut form = ReviewForm::default();
        type_into(&mut form, "Asha");
        let receipt = form.submit();
        assert_eq!(receipt.display_name(), "Asha");
        assert_eq!(receipt.rating, RATING_DEFAULT);
    }

    #[test]
    fn rating_is_clamped_to_the_slider() {
        let mut form = ReviewForm::default();
        for _ in 0..3 {
            form.select_next();
        }
        assert_eq!(form.selected_row(), ReviewRow::Rating);
        form.adjust(50);
        assert_eq!(form.rating(), 10);
        form.adjust(-50);
        assert_eq!(form.rating(), 1);
    }

    #[test]
    fn typing_outside_edit_mode_is_ignored() {
        let mut form = ReviewForm::default();
        form.edit_push('x');
        assert_eq!(form.text(ReviewRow::Name), "");
        // Rating and submit rows have no text buffer.
        for _ in 0..3 {
            form.select_next();
        }
        form.begin_edit();
        assert!(!form.is_editing());
    }

    #[test]
    fn editing_after_submit_clears_the_echo() {
        let mut form = ReviewForm::default();
        form.submit();
        assert!(form.phase().submitted().is_some());
        type_into(&mut form, "x");
        assert_eq!(form.phase(), &FormPhase::Idle);
    }
}
