pub mod llm_service;
pub mod prompt_builder;
pub mod report_writer;
pub mod segment_parser;

pub use llm_service::{Generator, LlmService};
pub use prompt_builder::{build_detection_prompt, build_detection_prompt_for, build_question_prompt};
pub use report_writer::ReportWriter;
pub use segment_parser::{is_sentinel, parse_segments};
