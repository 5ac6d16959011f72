//! Ratatui-based terminal UI.
//!
//! A sidebar selects one page at a time; the active page owns a fresh form
//! state. All key handling goes through [`App::handle_key`] so it can be driven
//! without a terminal.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::domain::Page;
use crate::error::{AppError, EXIT_IO};
use crate::forms::{PageState, ReviewRow};
use crate::models::ModelRegistry;

mod render;

/// Start the TUI.
pub fn run(registry: ModelRegistry) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(registry);
    info!("tui started");
    let result = app.event_loop(&mut terminal);
    info!("tui stopped");
    result
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_IO, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_IO, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub struct App {
    registry: ModelRegistry,
    page: Page,
    state: PageState,
    status: String,
}

impl App {
    pub fn new(registry: ModelRegistry) -> Self {
        let failed = registry.failed_domains();
        let status = if failed.is_empty() {
            "All models loaded.".to_string()
        } else {
            let names: Vec<&str> = failed.iter().map(|d| d.display_name()).collect();
            format!("Model load failed: {} (see Welcome)", names.join(", "))
        };
        Self {
            registry,
            page: Page::Welcome,
            state: PageState::Welcome,
            status,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Switch pages. Unsubmitted input on the old page is dropped.
    pub fn navigate(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        debug!(from = self.page.title(), to = page.title(), "navigate");
        self.page = page;
        self.state = PageState::for_page(page);
        self.status = page.title().to_string();
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| render::draw(f, self))
                    .map_err(|e| AppError::new(EXIT_IO, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_IO, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_IO, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.state.is_editing() {
            self.handle_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.navigate(self.page.next()),
            KeyCode::BackTab => self.navigate(self.page.prev()),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.navigate(Page::ALL[index]);
            }
            KeyCode::Up => self.select(-1),
            KeyCode::Down => self.select(1),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('s') => self.submit(),
            _ => {}
        }
        false
    }

    fn select(&mut self, delta: i32) {
        match &mut self.state {
            PageState::Welcome => {}
            PageState::Prediction(form) => {
                if delta < 0 { form.select_prev() } else { form.select_next() }
            }
            PageState::Posture(form) => {
                if delta < 0 { form.select_prev() } else { form.select_next() }
            }
            PageState::Review(form) => {
                if delta < 0 { form.select_prev() } else { form.select_next() }
            }
        }
    }

    fn adjust(&mut self, delta: i32) {
        match &mut self.state {
            PageState::Prediction(form) => form.adjust(delta),
            PageState::Review(form) => form.adjust(delta),
            PageState::Welcome | PageState::Posture(_) => {}
        }
    }

    fn activate(&mut self) {
        let on_submit = match &self.state {
            PageState::Prediction(form) => form.on_submit_row(),
            PageState::Review(form) => form.selected_row() == ReviewRow::Submit,
            PageState::Welcome | PageState::Posture(_) => false,
        };
        if on_submit {
            self.submit();
            return;
        }

        match &mut self.state {
            PageState::Welcome => {}
            PageState::Prediction(form) => {
                form.begin_edit();
                if form.editing().is_some() {
                    self.status = "Type a value. Enter to apply, Esc to cancel.".to_string();
                }
            }
            PageState::Posture(form) => {
                form.activate();
                if form.is_editing() {
                    self.status = "Type an image path. Enter to upload, Esc to cancel.".to_string();
                } else {
                    self.status = "Upload processed.".to_string();
                }
            }
            PageState::Review(form) => {
                form.begin_edit();
                if form.is_editing() {
                    self.status = "Typing. Enter or Esc to finish.".to_string();
                }
            }
        }
    }

    fn submit(&mut self) {
        match &mut self.state {
            PageState::Prediction(form) => {
                let outcome = form.submit(&self.registry);
                self.status = outcome.message().into_owned();
            }
            PageState::Review(form) => {
                form.submit();
                self.status = crate::forms::review::ACKNOWLEDGMENT.to_string();
            }
            PageState::Welcome | PageState::Posture(_) => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        match &mut self.state {
            PageState::Welcome => {}
            PageState::Prediction(form) => match code {
                KeyCode::Esc => {
                    form.cancel_edit();
                    self.status = "Edit canceled.".to_string();
                }
                KeyCode::Enter => {
                    self.status = match form.commit_edit() {
                        Ok(()) => "Value applied.".to_string(),
                        Err(err) => err.to_string(),
                    };
                }
                KeyCode::Backspace => form.edit_pop(),
                KeyCode::Char(c) => form.edit_push(c),
                _ => {}
            },
            PageState::Posture(form) => match code {
                KeyCode::Esc => {
                    form.cancel_edit();
                    self.status = "Upload canceled.".to_string();
                }
                KeyCode::Enter => {
                    form.commit_edit();
                    self.status = "Upload processed.".to_string();
                }
                KeyCode::Backspace => form.edit_pop(),
                KeyCode::Char(c) => form.edit_push(c),
                _ => {}
            },
            PageState::Review(form) => match code {
                KeyCode::Esc | KeyCode::Enter => form.end_edit(),
                KeyCode::Backspace => form.edit_pop(),
                KeyCode::Char(c) => form.edit_push(c),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, Outcome};
    use crate::forms::FormPhase;

    fn app() -> App {
        App::new(ModelRegistry::from_classifiers(Vec::new()))
    }

    #[test]
    fn starts_on_welcome_and_reports_missing_models() {
        let app = app();
        assert_eq!(app.page(), Page::Welcome);
        assert!(app.status().starts_with("Model load failed: Autism, Diabetes"));
    }

    #[test]
    fn tab_cycles_and_digits_jump() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.page(), Page::Prediction(Domain::Autism));
        app.handle_key(KeyCode::BackTab);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.page(), Page::Review);
        app.handle_key(KeyCode::Char('4'));
        assert_eq!(app.page(), Page::Prediction(Domain::Heart));
    }

    #[test]
    fn submitting_without_a_model_shows_inline_error() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));
        assert!(!app.handle_key(KeyCode::Char('s')));
        match app.state() {
            PageState::Prediction(form) => match form.phase() {
                FormPhase::Submitted(Outcome::Failed(reason)) => {
                    assert!(reason.contains("Diabetes model is not available"));
                }
                other => panic!("unexpected phase {other:?}"),
            },
            other => panic!("unexpected state {other:?}"),
        }
        assert!(app.status().starts_with("Prediction error:"));
    }

    #[test]
    fn q_types_into_an_edit_instead_of_quitting() {
        let mut app = app();
        app.handle_key(KeyCode::Char('7'));
        app.handle_key(KeyCode::Enter);
        assert!(app.state().is_editing());
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Enter);
        match app.state() {
            PageState::Review(form) => assert_eq!(form.text(ReviewRow::Name), "q"),
            other => panic!("unexpected state {other:?}"),
        }
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
