pub mod error;
pub mod quiz;

pub use error::QuizError;
pub use quiz::{Question, QuizRequest, QuizSet};
