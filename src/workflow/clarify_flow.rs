//! 检测与提问流程 - 流程层
//!
//! 核心职责：定义"一条需求"的完整处理流程
//!
//! 流程顺序（严格串行）：
//! 1. 按目录顺序遍历六种缺陷类型
//! 2. 每种类型：检测提示词 → 生成 → 拆分片段
//! 3. 每个片段：提问提示词 → 生成 → 追加 Finding

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::{DefectType, Finding, ResultTable};
use crate::services::{build_detection_prompt, build_question_prompt, parse_segments, Generator};
use crate::utils::logging::truncate_text;

/// 检测与提问流程
///
/// - 不持有结果表，结果表归调用方所有
/// - 只依赖文本生成能力
/// - 生成失败直接向上传播，不重试
pub struct ClarifyFlow<G> {
    generator: G,
}

impl<G: Generator> ClarifyFlow<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// 对一条需求运行完整流程
    ///
    /// 调用方负责保证 `request_body` 非空。任何一次生成失败都会中止整个流程，
    /// 已经得到的部分结果随之丢弃。
    pub async fn detect_and_question(
        &self,
        request_body: &str,
        request_title: Option<&str>,
    ) -> AppResult<ResultTable> {
        info!("🔍 开始检测需求: {}", truncate_text(request_body, 80));

        let mut table = ResultTable::new();
        for defect_type in DefectType::ALL {
            let findings = self
                .detect_defect(defect_type, request_body, request_title)
                .await?;
            table.extend(findings);
        }

        info!("✓ 检测完成，共生成 {} 个澄清问题", table.len());
        Ok(table)
    }

    /// 只检测一种缺陷类型，返回该类型的所有 Finding
    pub async fn detect_defect(
        &self,
        defect_type: DefectType,
        request_body: &str,
        request_title: Option<&str>,
    ) -> AppResult<Vec<Finding>> {
        let detect_prompt = build_detection_prompt(defect_type, request_body, request_title);
        let generation = self.generator.generate(&detect_prompt).await?;
        debug!("{} 检测结果:\n{}", defect_type, generation);

        let segments = parse_segments(&generation);
        if segments.is_empty() {
            info!("  {}: 未发现缺陷", defect_type.label());
            return Ok(Vec::new());
        }
        info!("  {}: 发现 {} 个片段", defect_type.label(), segments.len());

        let mut findings = Vec::with_capacity(segments.len());
        for segment in segments {
            let question_prompt = build_question_prompt(&segment, defect_type, request_body);
            let question = self.generator.generate(&question_prompt).await?;
            debug!("片段 '{}' ({}) 的问题: {}", segment, defect_type, question);

            findings.push(Finding {
                original_request: request_body.to_string(),
                original_title: request_title.map(str::to_string),
                detect_prompt: detect_prompt.clone(),
                segment,
                defect_type,
                question_prompt,
                question,
                answer: None,
            });
        }

        Ok(findings)
    }
}
