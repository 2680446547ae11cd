pub mod feedback;
pub mod paper;

pub use feedback::{FeedbackRequest, FeedbackResponse, RenderedPrompt};
pub use paper::{Paper, QuestionType, ALL_PAPERS};
