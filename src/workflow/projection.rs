//! 结果投影
//!
//! 从结果表派生问题列表，并按位置写回用户回答。只按索引寻址，
//! 问题文本不保证唯一，不能用来定位 Finding。

use crate::error::{AppError, AppResult};
use crate::models::{QuestionRecord, ResultTable};

/// 按表内顺序生成问题列表
pub fn to_question_list(table: &ResultTable) -> Vec<QuestionRecord> {
    table
        .iter()
        .enumerate()
        .map(|(row_index, finding)| QuestionRecord {
            row_index,
            question: finding.question.clone(),
            segment: finding.segment.clone(),
            defect_type: finding.defect_type,
        })
        .collect()
}

/// 写入第 `index` 条 Finding 的回答
///
/// 索引无效时返回 `IndexOutOfRange`，结果表不变。
pub fn record_answer(
    table: &mut ResultTable,
    index: usize,
    answer: impl Into<String>,
) -> AppResult<()> {
    let len = table.len();
    let finding = table
        .get_mut(index)
        .ok_or(AppError::IndexOutOfRange { index, len })?;
    finding.answer = Some(answer.into());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DefectType, Finding};

    fn finding(segment: &str, defect_type: DefectType, question: &str) -> Finding {
        Finding {
            original_request: "Make the dashboard fast".to_string(),
            original_title: None,
            detect_prompt: "detect".to_string(),
            segment: segment.to_string(),
            defect_type,
            question_prompt: "ask".to_string(),
            question: question.to_string(),
            answer: None,
        }
    }

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new();
        table.extend([
            finding("dashboard", DefectType::LexicalAmbiguity, "Which dashboard?"),
            finding("fast", DefectType::Vagueness, "How fast?"),
            // 问题文本重复：按索引寻址仍然无歧义
            finding("fast", DefectType::PragmaticAmbiguity, "How fast?"),
        ]);
        table
    }

    #[test]
    fn test_question_list_follows_table_order() {
        let table = sample_table();
        let records = to_question_list(&table);

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].row_index, 1);
        assert_eq!(records[1].question, "How fast?");
        assert_eq!(records[1].segment, "fast");
        assert_eq!(records[1].defect_type, DefectType::Vagueness);
    }

    #[test]
    fn test_question_list_is_idempotent() {
        let table = sample_table();
        assert_eq!(to_question_list(&table), to_question_list(&table));
    }

    #[test]
    fn test_record_answer_only_changes_answer() {
        let mut table = sample_table();
        let before = to_question_list(&table);

        record_answer(&mut table, 2, "under 200ms").unwrap();

        assert_eq!(to_question_list(&table), before);
        assert_eq!(table.get(2).unwrap().answer.as_deref(), Some("under 200ms"));
        assert!(table.get(1).unwrap().answer.is_none());
    }

    #[test]
    fn test_record_answer_out_of_range() {
        let mut table = sample_table();
        let before = table.clone();

        let err = record_answer(&mut table, 3, "x").unwrap_err();

        assert!(matches!(err, AppError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(table, before);
    }

    #[test]
    fn test_empty_table() {
        let mut table = ResultTable::new();
        assert!(to_question_list(&table).is_empty());
        assert!(record_answer(&mut table, 0, "x").is_err());
    }
}
