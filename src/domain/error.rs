/// Why a quiz could not be loaded.
///
/// Every variant is terminal for the fetch attempt that produced it. The view
/// shows [`QuizError::user_message`] with a retry link; nothing is retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
  /// Transport failure, timeout, non-2xx status or an unreadable body
  Connection,
  /// Backend answered, but without a usable question list
  NoQuestions,
  /// A request or question record broke the quiz contract
  Validation(String),
}

impl QuizError {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Connection => "connection",
      Self::NoQuestions => "no_questions",
      Self::Validation(_) => "validation",
    }
  }

  /// Short message shown to the student.
  pub fn user_message(&self) -> String {
    match self {
      Self::Connection => {
        "Connection failed! Make sure the quiz service is running.".to_string()
      }
      Self::NoQuestions => "No questions found for this topic.".to_string(),
      Self::Validation(detail) => format!("This quiz could not be loaded: {}", detail),
    }
  }
}

impl std::fmt::Display for QuizError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Connection => write!(f, "connection to quiz service failed"),
      Self::NoQuestions => write!(f, "no questions found"),
      Self::Validation(detail) => write!(f, "invalid quiz data: {}", detail),
    }
  }
}

impl std::error::Error for QuizError {}
