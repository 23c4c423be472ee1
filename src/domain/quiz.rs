use std::collections::HashSet;
use std::sync::Arc;

use super::QuizError;
use crate::wire::{QuizRequestBody, WireQuestion};

/// Identifies which question set to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuizRequest {
  class_id: String,
  topic_id: i64,
}

impl QuizRequest {
  pub fn new(class_id: impl Into<String>, topic_id: i64) -> Result<Self, QuizError> {
    let class_id = class_id.into();
    if class_id.trim().is_empty() {
      return Err(QuizError::Validation("class id is empty".to_string()));
    }
    if topic_id <= 0 {
      return Err(QuizError::Validation(format!(
        "topic id must be a positive integer, got {}",
        topic_id
      )));
    }
    Ok(Self { class_id, topic_id })
  }

  /// Build a request from route parameters, coercing the topic id to an integer.
  pub fn parse(class_id: &str, topic_id: &str) -> Result<Self, QuizError> {
    let topic = topic_id.trim().parse::<i64>().map_err(|_| {
      QuizError::Validation(format!("topic id must be a positive integer, got {:?}", topic_id))
    })?;
    Self::new(class_id, topic)
  }

  pub fn class_id(&self) -> &str {
    &self.class_id
  }

  pub fn topic_id(&self) -> i64 {
    self.topic_id
  }

  pub fn to_body(&self) -> QuizRequestBody {
    QuizRequestBody {
      class_id: self.class_id.clone(),
      topic_id: self.topic_id,
    }
  }
}

/// A validated multiple choice question.
///
/// Invariants: at least two options, no duplicate options, and the correct
/// option is one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
  text: String,
  options: Vec<String>,
  correct_option: String,
}

impl Question {
  pub fn new(
    text: impl Into<String>,
    options: Vec<String>,
    correct_option: impl Into<String>,
  ) -> Result<Self, QuizError> {
    let text = text.into();
    let correct_option = correct_option.into();

    if options.len() < 2 {
      return Err(QuizError::Validation(format!(
        "question {:?} needs at least 2 options, has {}",
        text,
        options.len()
      )));
    }

    let mut seen = HashSet::with_capacity(options.len());
    if let Some(dup) = options.iter().find(|o| !seen.insert(o.as_str())) {
      return Err(QuizError::Validation(format!(
        "question {:?} lists option {:?} more than once",
        text, dup
      )));
    }

    if !options.contains(&correct_option) {
      return Err(QuizError::Validation(format!(
        "question {:?} has answer {:?} which is not one of its options",
        text, correct_option
      )));
    }

    Ok(Self {
      text,
      options,
      correct_option,
    })
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn options(&self) -> &[String] {
    &self.options
  }

  /// Exact value equality, not index: two identically labelled options
  /// would be indistinguishable, which validation rules out.
  pub fn is_correct(&self, selected: &str) -> bool {
    self.correct_option == selected
  }
}

impl TryFrom<WireQuestion> for Question {
  type Error = QuizError;

  fn try_from(wire: WireQuestion) -> Result<Self, Self::Error> {
    Question::new(wire.question, wire.options, wire.answer)
  }
}

/// A non-empty, ordered question set.
///
/// Cheap to clone; restarting a quiz shares the same questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSet {
  questions: Arc<[Question]>,
}

impl QuizSet {
  pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
    if questions.is_empty() {
      return Err(QuizError::NoQuestions);
    }
    Ok(Self {
      questions: questions.into(),
    })
  }

  pub fn len(&self) -> usize {
    self.questions.len()
  }

  /// Always false for a constructed set
  pub fn is_empty(&self) -> bool {
    self.questions.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Question> {
    self.questions.get(index)
  }

}

#[cfg(test)]
impl QuizSet {
  /// True when both sets share the same allocation.
  pub(crate) fn ptr_eq(&self, other: &QuizSet) -> bool {
    Arc::ptr_eq(&self.questions, &other.questions)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn opts(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_request_rejects_empty_class() {
    assert!(QuizRequest::new("  ", 1).is_err());
  }

  #[test]
  fn test_request_rejects_non_positive_topic() {
    assert!(QuizRequest::new("class_7", 0).is_err());
    assert!(QuizRequest::new("class_7", -4).is_err());
  }

  #[test]
  fn test_request_parse_coerces_topic() {
    let req = QuizRequest::parse("class_7", "12").unwrap();
    assert_eq!(req.class_id(), "class_7");
    assert_eq!(req.topic_id(), 12);
    assert_eq!(req.to_body().topic_id, 12);
  }

  #[test]
  fn test_request_parse_rejects_garbage_topic() {
    let err = QuizRequest::parse("class_7", "abc").unwrap_err();
    assert_eq!(err.as_str(), "validation");
  }

  #[test]
  fn test_question_valid() {
    let q = Question::new("2 + 2?", opts(&["3", "4", "5"]), "4").unwrap();
    assert_eq!(q.text(), "2 + 2?");
    assert_eq!(q.options().len(), 3);
    assert!(q.is_correct("4"));
    assert!(!q.is_correct("3"));
    assert!(!q.is_correct("4 "));
  }

  #[test]
  fn test_question_needs_two_options() {
    assert!(Question::new("Only one?", opts(&["yes"]), "yes").is_err());
  }

  #[test]
  fn test_question_rejects_duplicate_options() {
    let err = Question::new("Pick", opts(&["a", "b", "a"]), "a").unwrap_err();
    assert!(err.to_string().contains("more than once"));
  }

  #[test]
  fn test_question_answer_must_be_an_option() {
    assert!(Question::new("Pick", opts(&["a", "b"]), "c").is_err());
  }

  #[test]
  fn test_question_from_wire() {
    let wire = WireQuestion {
      question: "Capital of France?".to_string(),
      options: opts(&["Paris", "Rome"]),
      answer: "Paris".to_string(),
    };
    let q = Question::try_from(wire).unwrap();
    assert_eq!(q.correct_option, "Paris");
  }

  #[test]
  fn test_quiz_set_rejects_empty() {
    assert_eq!(QuizSet::new(vec![]).unwrap_err(), QuizError::NoQuestions);
  }

  #[test]
  fn test_quiz_set_clone_shares_questions() {
    let set = QuizSet::new(vec![Question::new("q", opts(&["a", "b"]), "a").unwrap()]).unwrap();
    let copy = set.clone();
    assert!(set.ptr_eq(&copy));
    assert_eq!(copy.len(), 1);
    assert!(!copy.is_empty());
  }
}
