//! 报告写入服务 - 业务能力层
//!
//! 只负责"把澄清结果写成 JSON 文件"能力，不关心流程

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{DefectType, ResultTable};

/// 报告中的一条记录（不含提示词）
#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub segment: &'a str,
    pub defect_type: DefectType,
    pub question: &'a str,
    pub answer: Option<&'a str>,
}

/// 澄清报告
#[derive(Debug, Serialize)]
pub struct ClarificationReport<'a> {
    pub generated_at: String,
    pub original_request: Option<&'a str>,
    pub original_title: Option<&'a str>,
    pub findings: Vec<ReportEntry<'a>>,
}

impl<'a> ClarificationReport<'a> {
    pub fn from_table(table: &'a ResultTable) -> Self {
        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            original_request: table.original_request(),
            original_title: table.original_title(),
            findings: table
                .iter()
                .map(|f| ReportEntry {
                    segment: &f.segment,
                    defect_type: f.defect_type,
                    question: &f.question,
                    answer: f.answer.as_deref(),
                })
                .collect(),
        }
    }
}

/// 报告写入服务
pub struct ReportWriter {
    report_path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.report_path
    }

    /// 写入报告（覆盖已有文件），返回写入的路径
    pub async fn write(&self, table: &ResultTable) -> AppResult<PathBuf> {
        let report = ClarificationReport::from_table(table);
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            AppError::file_write_failed(self.display_path(), std::io::Error::other(e))
        })?;

        debug!(
            "写入报告: {} | 共 {} 条",
            self.report_path.display(),
            report.findings.len()
        );

        tokio::fs::write(&self.report_path, json)
            .await
            .map_err(|e| AppError::file_write_failed(self.display_path(), e))?;

        Ok(self.report_path.clone())
    }

    fn display_path(&self) -> String {
        self.report_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Finding;

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new();
        table.extend([Finding {
            original_request: "Add export".to_string(),
            original_title: Some("Export".to_string()),
            detect_prompt: "detect".to_string(),
            segment: "export".to_string(),
            defect_type: DefectType::Incompleteness,
            question_prompt: "ask".to_string(),
            question: "Which formats?".to_string(),
            answer: Some("CSV".to_string()),
        }]);
        table
    }

    #[tokio::test]
    async fn test_write_report() {
        let path = std::env::temp_dir().join(format!("clarifier_report_{}.json", std::process::id()));
        let writer = ReportWriter::new(&path);

        let written = writer.write(&sample_table()).await.unwrap();
        let content = std::fs::read_to_string(&written).unwrap();
        std::fs::remove_file(&written).ok();

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["original_request"], "Add export");
        assert_eq!(value["original_title"], "Export");
        assert_eq!(value["findings"][0]["defect_type"], "incompleteness");
        assert_eq!(value["findings"][0]["answer"], "CSV");
        assert!(value["findings"][0].get("question_prompt").is_none());
    }

    #[tokio::test]
    async fn test_write_to_missing_directory_fails() {
        let writer = ReportWriter::new("/definitely/not/here/report.json");
        let err = writer.write(&sample_table()).await.unwrap_err();
        assert!(matches!(err, AppError::File(_)));
    }
}
