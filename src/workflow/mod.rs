pub mod feedback_flow;

pub use feedback_flow::FeedbackFlow;
