//! Form controller for the four prediction pages.

use crate::app::pipeline;
use crate::domain::{Domain, Outcome};
use crate::error::FieldError;
use crate::features::{FieldSpec, FormValues};
use crate::forms::FormPhase;
use crate::models::ModelRegistry;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    values: FormValues,
    /// Field index, or `values.len()` for the submit control.
    selected: usize,
    /// Typed text for the selected numeric field, while editing.
    editing: Option<String>,
    phase: FormPhase<Outcome>,
}

impl PredictionForm {
    pub fn new(domain: Domain) -> Self {
        Self {
            values: FormValues::defaults(domain),
            selected: 0,
            editing: None,
            phase: FormPhase::Idle,
        }
    }

    pub fn domain(&self) -> Domain {
        self.values.domain()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn phase(&self) -> &FormPhase<Outcome> {
        &self.phase
    }

    pub fn on_submit_row(&self) -> bool {
        self.selected == self.values.len()
    }

    pub fn selected_spec(&self) -> Option<&'static FieldSpec> {
        self.values.specs().get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.values.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Nudge the selected field by `delta` widget steps.
    pub fn adjust(&mut self, delta: i32) {
        if !self.on_submit_row() {
            self.values.step(self.selected, delta);
            self.phase = FormPhase::Idle;
        }
    }

    /// Start typing into the selected field. Choice fields cycle instead.
    pub fn begin_edit(&mut self) {
        match self.selected_spec() {
            Some(spec) if spec.is_choice() => self.adjust(1),
            Some(_) => self.editing = Some(String::new()),
            None => {}
        }
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(buf) = &mut self.editing {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                buf.push(c);
            }
        }
    }

    pub fn edit_pop(&mut self) {
        if let Some(buf) = &mut self.editing {
            buf.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Apply the typed text. An empty buffer leaves the value unchanged; an
    /// unparsable one is reported and the value is kept.
    pub fn commit_edit(&mut self) -> Result<(), FieldError> {
        let Some(buf) = self.editing.take() else {
            return Ok(());
        };
        if buf.trim().is_empty() {
            return Ok(());
        }
        self.values.set_text(self.selected, &buf)?;
        self.phase = FormPhase::Idle;
        Ok(())
    }

    /// Collect every field, predict, and remember the outcome.
    pub fn submit(&mut self, registry: &ModelRegistry) -> Outcome {
        self.editing = None;
        let outcome = pipeline::submit(registry, &self.values);
        self.phase = FormPhase::Submitted(outcome.clone());
        outcome
    }
}
