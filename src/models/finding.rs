use serde::{Deserialize, Serialize};

use crate::models::defect::DefectType;

/// 一条检测结果：一个片段 + 缺陷类型 + 澄清问题 + 用户回答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub original_request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    pub detect_prompt: String,
    pub segment: String,
    pub defect_type: DefectType,
    pub question_prompt: String,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
}

/// 一次请求的结果表
///
/// 只在流水线运行时追加，之后只允许修改 `answer` 字段，位置索引保持稳定。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    findings: Vec<Finding>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Finding> {
        self.findings.get_mut(index)
    }

    pub fn get(&self, index: usize) -> Option<&Finding> {
        self.findings.get(index)
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// 已回答的条数
    pub fn answered_count(&self) -> usize {
        self.findings.iter().filter(|f| f.answer.is_some()).count()
    }

    /// 原始需求（所有 Finding 共享同一个请求）
    pub fn original_request(&self) -> Option<&str> {
        self.findings.first().map(|f| f.original_request.as_str())
    }

    pub fn original_title(&self) -> Option<&str> {
        self.findings
            .first()
            .and_then(|f| f.original_title.as_deref())
    }
}

/// 驱动问答循环用的精简视图，不暴露提示词
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// 在结果表中的位置
    pub row_index: usize,
    pub question: String,
    pub segment: String,
    pub defect_type: DefectType,
}
