use super::QuizSession;

/// Final tally of a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  pub score: usize,
  pub total: usize,
  pub passed: bool,
}

impl Summary {
  /// Strict majority passes; a tie does not.
  pub fn from_counts(score: usize, total: usize) -> Self {
    Self {
      score,
      total,
      passed: score * 2 > total,
    }
  }

  pub fn percentage(&self) -> usize {
    if self.total == 0 {
      0
    } else {
      self.score * 100 / self.total
    }
  }
}

/// Summary of a session, only once every question has been answered.
pub fn summarize(session: &QuizSession) -> Option<Summary> {
  session
    .is_completed()
    .then(|| Summary::from_counts(session.score(), session.total()))
}
