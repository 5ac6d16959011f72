//! Upload control for the posture page.
//!
//! Row 0 is a path entry; rows 1.. are images discovered on disk. Whatever is
//! chosen goes through `ImageUpload::open`, so only accepted image types reach
//! the analysis stub.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::posture::{self, ImageUpload, PostureReport};

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Idle,
    Rejected(String),
    Analyzed(PostureReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    path_input: String,
    editing: bool,
    candidates: Vec<PathBuf>,
    selected: usize,
    phase: UploadPhase,
}

impl UploadForm {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            path_input: String::new(),
            editing: false,
            candidates,
            selected: 0,
            phase: UploadPhase::Idle,
        }
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(self.candidates.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Enter: edit the path row, or upload the highlighted candidate.
    pub fn activate(&mut self) {
        if self.selected == 0 {
            self.editing = true;
            return;
        }
        if let Some(path) = self.candidates.get(self.selected - 1).cloned() {
            self.upload(&path);
        }
    }

    pub fn edit_push(&mut self, c: char) {
        if self.editing && !c.is_control() {
            self.path_input.push(c);
        }
    }

    pub fn edit_pop(&mut self) {
        if self.editing {
            self.path_input.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
    }

    /// Finish typing and upload the typed path.
    pub fn commit_edit(&mut self) {
        self.editing = false;
        let typed = self.path_input.trim().to_string();
        if typed.is_empty() {
            return;
        }
        self.upload(Path::new(&typed));
    }

    pub fn upload(&mut self, path: &Path) {
        self.phase = match ImageUpload::open(path) {
            Ok(upload) => {
                info!(file = %path.display(), "image uploaded");
                UploadPhase::Analyzed(posture::analyze(&upload))
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "upload rejected");
                UploadPhase::Rejected(err.to_string())
            }
        };
    }
}
