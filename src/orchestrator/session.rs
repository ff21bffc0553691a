//! 澄清会话
//!
//! 由调用方持有的会话对象，记录当前阶段、结果表和问题进度。
//! 阶段流转：Input → Questions → Done，`reset()` 回到 Input。

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{DefectType, QuestionRecord, ResultTable};
use crate::services::Generator;
use crate::workflow::{record_answer, to_question_list, ClarifyFlow};

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    /// 等待输入需求
    #[default]
    Input,
    /// 逐个回答澄清问题
    Questions,
    /// 全部问题已回答
    Done,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Questions => "questions",
            Stage::Done => "done",
        }
    }
}

/// 提交需求的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 没有发现任何缺陷，会话仍停留在 Input
    NoFindings,
    /// 生成了 n 个澄清问题
    Questions(usize),
}

/// "为什么问这个问题"的解释
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub segment: String,
    pub defect_type: DefectType,
    pub definition: &'static str,
}

/// 澄清会话
#[derive(Debug, Default)]
pub struct ClarifySession {
    stage: Stage,
    table: Option<ResultTable>,
    questions: Vec<QuestionRecord>,
    question_index: usize,
}

impl ClarifySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn table(&self) -> Option<&ResultTable> {
        self.table.as_ref()
    }

    /// 提交需求并运行检测流程
    ///
    /// 正文为空时不调用任何生成服务。生成失败时会话保持在 Input，
    /// 用户可以重新提交。
    pub async fn submit_request<G: Generator>(
        &mut self,
        flow: &ClarifyFlow<G>,
        body: &str,
        title: Option<&str>,
    ) -> AppResult<SubmitOutcome> {
        self.expect_stage(Stage::Input)?;

        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::EmptyRequest);
        }
        let title = title.map(str::trim).filter(|t| !t.is_empty());

        let table = flow.detect_and_question(body, title).await.map_err(|e| {
            warn!("❌ 需求处理失败: {}", e);
            e
        })?;

        if table.is_empty() {
            info!("未发现任何歧义或不完整之处");
            return Ok(SubmitOutcome::NoFindings);
        }

        let total = table.len();
        self.questions = to_question_list(&table);
        self.table = Some(table);
        self.question_index = 0;
        self.stage = Stage::Questions;

        Ok(SubmitOutcome::Questions(total))
    }

    /// 当前待回答的问题
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match self.stage {
            Stage::Questions => self.questions.get(self.question_index),
            _ => None,
        }
    }

    /// 剩余问题数（含当前问题）
    pub fn remaining(&self) -> usize {
        self.questions.len() - self.question_index
    }

    /// (已回答, 总数)
    pub fn progress(&self) -> (usize, usize) {
        (self.question_index, self.questions.len())
    }

    /// 回答当前问题并前进到下一题
    ///
    /// 空回答返回 `EmptyAnswer`，不修改任何状态。
    pub fn answer_current(&mut self, answer: &str) -> AppResult<Stage> {
        self.expect_stage(Stage::Questions)?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AppError::EmptyAnswer);
        }

        let row_index = self.questions[self.question_index].row_index;
        let table = self.table.as_mut().ok_or(AppError::WrongStage {
            expected: Stage::Questions.name(),
            actual: Stage::Input.name(),
        })?;
        record_answer(table, row_index, answer)?;

        self.question_index += 1;
        if self.question_index >= self.questions.len() {
            info!("✅ 全部 {} 个问题已回答", self.questions.len());
            self.stage = Stage::Done;
        }

        Ok(self.stage)
    }

    /// 解释当前问题针对的片段和缺陷类型
    pub fn explain_current(&self) -> Option<Explanation> {
        self.current_question().map(|record| Explanation {
            segment: record.segment.clone(),
            defect_type: record.defect_type,
            definition: record.defect_type.definition(),
        })
    }

    /// 丢弃全部状态，回到 Input
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn expect_stage(&self, expected: Stage) -> AppResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(AppError::WrongStage {
                expected: expected.name(),
                actual: self.stage.name(),
            })
        }
    }
}
