// src/quiz/session.rs

//! One student's run through the quiz, independent of any UI.
//!
//! `Idle → Running → Submitted → Idle`. The countdown is driven by calling
//! [`QuizSession::tick`] once per second; when it reaches zero the buffered
//! answers are submitted automatically.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{
    config::{PAGE_SIZE, QUIZ_SECONDS},
    models::{
        result::Submission,
        task::{TaskKey, TaskSet},
    },
    quiz::scoring::Scorecard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a student to be selected.
    Idle,
    /// Timer running, answers being buffered.
    Running,
    /// Answers sent; waiting for or showing the outcome.
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Active,
    Complete,
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The operation is not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    UnknownTask(TaskKey),
    PageOutOfRange(usize),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::WrongPhase { expected, actual } => {
                write!(f, "expected phase {:?}, session is {:?}", expected, actual)
            }
            SessionError::UnknownTask(key) => write!(f, "unknown task {}", key),
            SessionError::PageOutOfRange(page) => write!(f, "page {} out of range", page),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone)]
pub struct QuizSession {
    tasks: Arc<TaskSet>,
    total_seconds: u32,
    page_size: usize,
    phase: Phase,
    student_id: Option<String>,
    time_left: u32,
    current_page: usize,
    answers: BTreeMap<TaskKey, String>,
    outcome: Option<Scorecard>,
}

impl QuizSession {
    /// A session with the default ten minutes and twenty tasks per page.
    pub fn new(tasks: Arc<TaskSet>) -> Self {
        Self::with_limits(tasks, QUIZ_SECONDS, PAGE_SIZE)
    }

    pub fn with_limits(tasks: Arc<TaskSet>, total_seconds: u32, page_size: usize) -> Self {
        Self {
            tasks,
            total_seconds,
            page_size: page_size.max(1),
            phase: Phase::Idle,
            student_id: None,
            time_left: total_seconds,
            current_page: 0,
            answers: BTreeMap::new(),
            outcome: None,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase != expected {
            return Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn student_id(&self) -> Option<&str> {
        self.student_id.as_deref()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds - self.time_left
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn outcome(&self) -> Option<&Scorecard> {
        self.outcome.as_ref()
    }

    /// Starts the countdown for `student_id`.
    pub fn start(&mut self, student_id: impl Into<String>) -> Result<(), SessionError> {
        self.expect_phase(Phase::Idle)?;

        self.student_id = Some(student_id.into());
        self.time_left = self.total_seconds;
        self.current_page = 0;
        self.answers.clear();
        self.outcome = None;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Buffers an answer; an empty value clears it.
    pub fn record_answer(&mut self, key: TaskKey, value: &str) -> Result<(), SessionError> {
        self.expect_phase(Phase::Running)?;
        if !self.tasks.contains(&key) {
            return Err(SessionError::UnknownTask(key));
        }

        if value.is_empty() {
            self.answers.remove(&key);
        } else {
            self.answers.insert(key, value.to_string());
        }
        Ok(())
    }

    pub fn answer(&self, key: &TaskKey) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the forced submission when time runs out; otherwise `None`.
    /// Ticks outside `Running` do nothing.
    pub fn tick(&mut self) -> Option<Submission> {
        if self.phase != Phase::Running {
            return None;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            return self.submit().ok();
        }
        None
    }

    /// Stops the countdown and returns the buffered answers as a submission.
    pub fn submit(&mut self) -> Result<Submission, SessionError> {
        self.expect_phase(Phase::Running)?;

        self.phase = Phase::Submitted;
        Ok(Submission {
            student_id: self.student_id.clone().unwrap_or_default(),
            answers: self.answers.clone(),
            time_left: Some(i64::from(self.time_left)),
        })
    }

    /// Stores the server's scoring of the submitted answers.
    pub fn finish(&mut self, scorecard: Scorecard) -> Result<(), SessionError> {
        self.expect_phase(Phase::Submitted)?;
        self.outcome = Some(scorecard);
        Ok(())
    }

    /// Returns to student selection, dropping answers and outcome.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Submitted)?;

        self.phase = Phase::Idle;
        self.student_id = None;
        self.time_left = self.total_seconds;
        self.current_page = 0;
        self.answers.clear();
        self.outcome = None;
        Ok(())
    }

    // --- Pagination ---

    pub fn page_count(&self) -> usize {
        self.tasks.len().div_ceil(self.page_size)
    }

    /// Task keys shown on `page` (zero-based).
    pub fn page_keys(&self, page: usize) -> Vec<TaskKey> {
        self.tasks
            .keys()
            .skip(page * self.page_size)
            .take(self.page_size)
            .copied()
            .collect()
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<(), SessionError> {
        if page >= self.page_count() {
            return Err(SessionError::PageOutOfRange(page));
        }
        self.current_page = page;
        Ok(())
    }

    /// The current page is `Active`; other pages are `Complete` when every
    /// task on them has an answer.
    pub fn page_status(&self, page: usize) -> PageStatus {
        if page == self.current_page {
            return PageStatus::Active;
        }

        let all_answered = self
            .page_keys(page)
            .iter()
            .all(|key| self.answers.contains_key(key));

        if all_answered {
            PageStatus::Complete
        } else {
            PageStatus::Incomplete
        }
    }
}

/// Formats seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
