//! One attempt at a fixed question set.

use crate::domain::{Question, QuizSet};

/// Result of a single answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
  pub correct: bool,
  /// True when this answer finished the quiz
  pub completed: bool,
}

/// In-progress attempt at a question set.
///
/// Invariants: `current_index <= questions.len()` and `score <= current_index`.
/// The session is completed exactly when every question has been answered.
#[derive(Debug, Clone)]
pub struct QuizSession {
  questions: QuizSet,
  current_index: usize,
  score: usize,
}

impl QuizSession {
  pub fn new(questions: QuizSet) -> Self {
    debug_assert!(!questions.is_empty());
    Self {
      questions,
      current_index: 0,
      score: 0,
    }
  }

  pub fn current_index(&self) -> usize {
    self.current_index
  }

  pub fn score(&self) -> usize {
    self.score
  }

  pub fn total(&self) -> usize {
    self.questions.len()
  }

  pub fn is_completed(&self) -> bool {
    self.current_index == self.questions.len()
  }

  /// Question awaiting an answer, `None` once completed
  pub fn current_question(&self) -> Option<&Question> {
    self.questions.get(self.current_index)
  }

  /// Score the selected option against the current question and advance.
  ///
  /// Returns `None` without touching state when the session is already completed.
  pub fn submit_answer(&mut self, selected: &str) -> Option<AnswerOutcome> {
    let correct = self.current_question()?.is_correct(selected);
    if correct {
      self.score += 1;
    }
    self.current_index += 1;

    Some(AnswerOutcome {
      correct,
      completed: self.is_completed(),
    })
  }

  /// Rewind to the first question, keeping the fetched questions
  pub fn restart(&mut self) {
    self.current_index = 0;
    self.score = 0;
  }
}

#[cfg(test)]
impl QuizSession {
  pub(crate) fn questions(&self) -> &QuizSet {
    &self.questions
  }
}
