//! Screen state for the funnel.

use std::time::Instant;

use crate::data;
use crate::models::{Question, Session, TestKind};

/// The screen currently presented to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Home,
    Landing,
    Quiz,
    Preview,
    Payment,
    Result,
}

/// Everything behind the funnel screens: the session, the cached questions
/// and the cursors the renderer reads.
///
/// Owned by the step controller; spawned tasks reach it only through the
/// shared lock the controller hands out.
pub struct FunnelApp {
    pub step: Step,
    pub session: Session,
    questions: Vec<Question>,
    questions_kind: Option<TestKind>,
    /// True while a start-test call is in flight.
    pub loading: bool,
    /// True while a scoring call is in flight.
    pub submitting: bool,
    /// Single user-facing error slot, dismissible.
    pub error: Option<String>,
    /// Outcome note of the latest manual unlock check.
    pub payment_note: Option<String>,
    /// When the payment screen was entered; drives the code countdown.
    pub payment_entered_at: Option<Instant>,
    current_index: usize,
    selected_option: usize,
    pub home_selected: usize,
    pub result_scroll: usize,
    pub should_quit: bool,
}

impl FunnelApp {
    pub fn new(session: Session) -> Self {
        Self {
            step: Step::Home,
            session,
            questions: Vec::new(),
            questions_kind: None,
            loading: false,
            submitting: false,
            error: None,
            payment_note: None,
            payment_entered_at: None,
            current_index: 0,
            selected_option: 0,
            home_selected: 0,
            result_scroll: 0,
            should_quit: false,
        }
    }

    /// Seed the question cache for `kind` and rewind the quiz cursor.
    pub fn set_questions(&mut self, kind: TestKind, questions: Vec<Question>) {
        self.questions = questions;
        self.questions_kind = Some(kind);
        self.reset_quiz_cursor();
    }

    pub fn clear_questions(&mut self) {
        self.questions.clear();
        self.questions_kind = None;
    }

    /// True when the cache holds a non-empty question list for `kind`.
    /// Stale caches from another test never count.
    pub fn has_questions_for(&self, kind: TestKind) -> bool {
        self.questions_kind == Some(kind) && !self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    /// The (question id, option code) pair the cursor points at.
    pub fn current_selection(&self) -> Option<(u32, String)> {
        let question = self.current_question()?;
        let option = question.options.get(self.selected_option)?;
        Some((question.id, option.value.clone()))
    }

    pub fn select_next_option(&mut self) {
        if let Some(question) = self.current_question() {
            let count = question.options.len();
            if count > 0 {
                self.selected_option = (self.selected_option + 1) % count;
            }
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(question) = self.current_question() {
            let count = question.options.len();
            if count > 0 {
                self.selected_option = (self.selected_option + count - 1) % count;
            }
        }
    }

    /// Move to the next question. Returns false once the quiz is exhausted.
    pub fn advance_question(&mut self) -> bool {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected_option = 0;
            true
        } else {
            false
        }
    }

    /// Step back to revisit an earlier question; the recorded answer stays
    /// and can be overwritten.
    pub fn previous_question(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            self.selected_option = 0;
            true
        } else {
            false
        }
    }

    pub fn reset_quiz_cursor(&mut self) {
        self.current_index = 0;
        self.selected_option = 0;
    }

    pub fn home_next(&mut self) {
        self.home_selected = (self.home_selected + 1) % data::CATALOG.len();
    }

    pub fn home_previous(&mut self) {
        let count = data::CATALOG.len();
        self.home_selected = (self.home_selected + count - 1) % count;
    }

    pub fn scroll_result_down(&mut self) {
        let max = self
            .session
            .result
            .as_ref()
            .and_then(|r| r.texto.as_ref())
            .map(|texto| texto.lines().count().saturating_sub(1))
            .unwrap_or(0);
        self.result_scroll = (self.result_scroll + 1).min(max);
    }

    pub fn scroll_result_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
