//! Quiz-taking state machine.
//!
//! ```text
//! Idle -> Loading -> Error
//!                 -> Ready -> InProgress -> Completed
//!                                 ^             |
//!                                 +-- restart --+
//! ```
//!
//! Loads are tagged with an epoch. `reset` bumps the epoch and hands out a
//! [`LoadTicket`]; `complete_load` only applies results whose ticket carries
//! the current epoch, so a slow fetch for a topic the viewer already left can
//! never overwrite the newer session.

use crate::domain::{QuizError, QuizRequest, QuizSet};

use super::session::{AnswerOutcome, QuizSession};
use super::summary::{Summary, summarize};

/// Observable phase of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Loading,
  Error,
  /// Questions loaded, nothing answered yet
  Ready,
  InProgress,
  Completed,
}

impl Phase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Idle => "idle",
      Self::Loading => "loading",
      Self::Error => "error",
      Self::Ready => "ready",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
    }
  }
}

/// Proof that a load was started; must be handed back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
  epoch: u64,
  request: QuizRequest,
}

impl LoadTicket {
  pub fn request(&self) -> &QuizRequest {
    &self.request
  }
}

/// Why an answer or restart was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
  /// Nothing is loaded (idle, loading or failed)
  NoActiveQuiz,
  /// Every question has already been answered
  AlreadyCompleted,
  /// Restart is only offered once every question has been answered
  NotCompleted,
}

impl std::fmt::Display for SubmitError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NoActiveQuiz => write!(f, "no quiz is in progress"),
      Self::AlreadyCompleted => write!(f, "quiz is already completed"),
      Self::NotCompleted => write!(f, "quiz is not completed yet"),
    }
  }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone)]
enum State {
  Idle,
  Loading,
  Failed(QuizError),
  Active(QuizSession),
}

#[derive(Debug, Clone)]
pub struct QuizMachine {
  epoch: u64,
  request: Option<QuizRequest>,
  state: State,
}

impl Default for QuizMachine {
  fn default() -> Self {
    Self::new()
  }
}

impl QuizMachine {
  pub fn new() -> Self {
    Self {
      epoch: 0,
      request: None,
      state: State::Idle,
    }
  }

  pub fn phase(&self) -> Phase {
    match &self.state {
      State::Idle => Phase::Idle,
      State::Loading => Phase::Loading,
      State::Failed(_) => Phase::Error,
      State::Active(session) if session.is_completed() => Phase::Completed,
      State::Active(session) if session.current_index() == 0 => Phase::Ready,
      State::Active(_) => Phase::InProgress,
    }
  }

  /// Request the machine currently holds or is loading
  pub fn request(&self) -> Option<&QuizRequest> {
    self.request.as_ref()
  }

  pub fn error(&self) -> Option<&QuizError> {
    match &self.state {
      State::Failed(err) => Some(err),
      _ => None,
    }
  }

  pub fn session(&self) -> Option<&QuizSession> {
    match &self.state {
      State::Active(session) => Some(session),
      _ => None,
    }
  }

  /// Discard any session or error and start loading `request`.
  pub fn reset(&mut self, request: QuizRequest) -> LoadTicket {
    self.epoch += 1;
    self.request = Some(request.clone());
    self.state = State::Loading;
    tracing::debug!(
      "Quiz reset to {}/{} (epoch {})",
      request.class_id(),
      request.topic_id(),
      self.epoch
    );
    LoadTicket {
      epoch: self.epoch,
      request,
    }
  }

  /// Start a load unless this exact request is already loading or loaded.
  ///
  /// A request that previously failed is loaded again.
  pub fn mount(&mut self, request: QuizRequest) -> Option<LoadTicket> {
    let same_request = self.request.as_ref() == Some(&request);
    match &self.state {
      State::Loading | State::Active(_) if same_request => None,
      _ => Some(self.reset(request)),
    }
  }

  /// Apply a gateway result. Returns false when the ticket is stale.
  pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<QuizSet, QuizError>) -> bool {
    if ticket.epoch != self.epoch || !matches!(self.state, State::Loading) {
      tracing::warn!(
        "Discarding stale quiz load for {}/{} (epoch {}, current {})",
        ticket.request.class_id(),
        ticket.request.topic_id(),
        ticket.epoch,
        self.epoch
      );
      return false;
    }

    self.state = match result {
      Ok(questions) => {
        tracing::debug!("Quiz ready with {} questions", questions.len());
        State::Active(QuizSession::new(questions))
      }
      Err(err) => {
        tracing::debug!("Quiz load failed: {}", err);
        State::Failed(err)
      }
    };
    true
  }

  /// Score `selected` against the current question and advance.
  ///
  /// Rejected submissions leave the machine unchanged.
  pub fn submit_answer(&mut self, selected: &str) -> Result<AnswerOutcome, SubmitError> {
    let session = match &mut self.state {
      State::Active(session) => session,
      _ => {
        tracing::warn!("Ignoring answer with no active quiz");
        return Err(SubmitError::NoActiveQuiz);
      }
    };

    match session.submit_answer(selected) {
      Some(outcome) => Ok(outcome),
      None => {
        tracing::warn!("Ignoring answer for a completed quiz");
        Err(SubmitError::AlreadyCompleted)
      }
    }
  }

  /// Rewind a completed session to its first question without re-fetching.
  ///
  /// A session still being answered is left untouched.
  pub fn restart(&mut self) -> Result<(), SubmitError> {
    match &mut self.state {
      State::Active(session) if session.is_completed() => {
        session.restart();
        tracing::debug!("Quiz restarted with {} questions", session.total());
        Ok(())
      }
      State::Active(session) => {
        tracing::warn!(
          "Ignoring restart at question {} of {}",
          session.current_index() + 1,
          session.total()
        );
        Err(SubmitError::NotCompleted)
      }
      _ => {
        tracing::warn!("Ignoring restart with no active quiz");
        Err(SubmitError::NoActiveQuiz)
      }
    }
  }

  pub fn summary(&self) -> Option<Summary> {
    self.session().and_then(summarize)
  }
}
