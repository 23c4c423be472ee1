pub mod machine;
pub mod session;
pub mod summary;

pub use machine::{LoadTicket, Phase, QuizMachine, SubmitError};
pub use session::{AnswerOutcome, QuizSession};
pub use summary::{Summary, summarize};
