pub mod clarify_flow;
pub mod projection;

pub use clarify_flow::ClarifyFlow;
pub use projection::{record_answer, to_question_list};
