//! # Feature Request Clarifier
//!
//! 检测功能需求描述中的歧义与不完整之处，并生成澄清问题供提出者回答
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据模型（Models）
//! - `models/defect` - 六种缺陷类型及定义目录
//! - `models/finding` - `Finding` / `ResultTable` / `QuestionRecord`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `prompt_builder` - 构建检测和提问提示词
//! - `segment_parser` - 拆分检测结果、识别哨兵
//! - `LlmService` - 文本生成能力（`Generator`）
//! - `ReportWriter` - 导出澄清报告
//!
//! ### ③ 流程层（Workflow）
//! - `ClarifyFlow` - 一条需求的检测与提问流程
//! - `projection` - 问题列表与回答写回
//!
//! ### ④ 编排层（Orchestration）
//! - `ClarifySession` - 调用方持有的会话状态
//! - `App` - 终端交互程序
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod testing;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{definition_for, DefectType, Finding, QuestionRecord, ResultTable};
pub use orchestrator::{App, ClarifySession, Stage, SubmitOutcome};
pub use services::{Generator, LlmService};
pub use workflow::{record_answer, to_question_list, ClarifyFlow};
