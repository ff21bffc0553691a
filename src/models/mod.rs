pub mod defect;
pub mod finding;

pub use defect::{definition_for, DefectType, DEFINITION_NOT_AVAILABLE};
pub use finding::{Finding, QuestionRecord, ResultTable};
