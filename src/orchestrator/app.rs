//! 终端交互程序 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：检查配置、创建 LLM 服务和检测流程
//! 2. **交互循环**：读入需求 → 逐题提问 → 收集回答
//! 3. **结果输出**：打印澄清结果并导出报告
//!
//! ## 交互命令
//!
//! - `?`：解释当前问题针对的片段和缺陷类型
//! - `:restart`：放弃当前会话，重新输入需求
//! - `:quit`：退出

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::orchestrator::session::{ClarifySession, Stage, SubmitOutcome};
use crate::services::{Generator, LlmService, ReportWriter};
use crate::utils::logging::log_startup;
use crate::workflow::ClarifyFlow;

const CMD_WHY: &str = "?";
const CMD_RESTART: &str = ":restart";
const CMD_QUIT: &str = ":quit";

/// 应用主结构
pub struct App<G = LlmService> {
    flow: ClarifyFlow<G>,
    session: ClarifySession,
    report_writer: ReportWriter,
}

impl App<LlmService> {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        if config.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                key_file: config.api_key_file.clone(),
            }
            .into());
        }

        Ok(Self::with_generator(
            LlmService::new(&config),
            &config.report_file,
        ))
    }

    /// 在标准输入输出上运行
    pub async fn run(&mut self) -> AppResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run_io(stdin, stdout).await
    }
}

impl<G: Generator> App<G> {
    /// 使用任意生成器创建应用
    pub fn with_generator(generator: G, report_file: impl Into<PathBuf>) -> Self {
        Self {
            flow: ClarifyFlow::new(generator),
            session: ClarifySession::new(),
            report_writer: ReportWriter::new(report_file),
        }
    }

    pub fn session(&self) -> &ClarifySession {
        &self.session
    }

    /// 运行交互循环，读到 EOF 或 `:quit` 时结束
    pub async fn run_io<R, W>(&mut self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        say(&mut writer, "=== Feature Request Clarifier ===").await?;
        say(
            &mut writer,
            "命令: `?` 解释当前问题, `:restart` 重新开始, `:quit` 退出",
        )
        .await?;

        'session: loop {
            match self.session.stage() {
                Stage::Input => {
                    say(&mut writer, "\n请输入需求内容 (Write your feature request):").await?;
                    let Some(body) = next_line(&mut lines).await? else {
                        break 'session;
                    };
                    if body.trim() == CMD_QUIT {
                        break 'session;
                    }

                    say(&mut writer, "需求标题 (Request Title, 可留空):").await?;
                    let Some(title) = next_line(&mut lines).await? else {
                        break 'session;
                    };

                    self.submit(&mut writer, &body, &title).await?;
                }

                Stage::Questions => {
                    self.show_current_question(&mut writer).await?;
                    let Some(line) = next_line(&mut lines).await? else {
                        break 'session;
                    };

                    match line.trim() {
                        CMD_QUIT => break 'session,
                        CMD_RESTART => {
                            self.session.reset();
                            say(&mut writer, "↺ 已重新开始").await?;
                        }
                        CMD_WHY => self.show_explanation(&mut writer).await?,
                        answer => match self.session.answer_current(answer) {
                            Ok(_) => {}
                            Err(AppError::EmptyAnswer) => {
                                say(&mut writer, "⚠️ 请提供回答。").await?;
                            }
                            Err(e) => return Err(e),
                        },
                    }
                }

                Stage::Done => {
                    self.finish(&mut writer).await?;

                    loop {
                        say(&mut writer, "输入 `:restart` 处理新的需求, `:quit` 退出").await?;
                        let Some(line) = next_line(&mut lines).await? else {
                            break 'session;
                        };
                        match line.trim() {
                            CMD_RESTART => {
                                self.session.reset();
                                continue 'session;
                            }
                            CMD_QUIT => break 'session,
                            _ => {}
                        }
                    }
                }
            }
        }

        writer.flush().await?;
        Ok(())
    }

    async fn submit<W: AsyncWrite + Unpin>(
        &mut self,
        writer: &mut W,
        body: &str,
        title: &str,
    ) -> AppResult<()> {
        say(writer, "🚀 正在分析需求，请稍候...").await?;

        match self.session.submit_request(&self.flow, body, Some(title)).await {
            Ok(SubmitOutcome::NoFindings) => {
                say(writer, "✓ 未发现歧义或不完整的片段 (No ambiguous segments found).").await?;
            }
            Ok(SubmitOutcome::Questions(total)) => {
                say(writer, &format!("📋 共生成 {} 个澄清问题", total)).await?;
                if let Some(request) = self.session.table().and_then(|t| t.original_request()) {
                    say(writer, "\n### 📝 Your original request").await?;
                    say(writer, request).await?;
                }
            }
            Err(AppError::EmptyRequest) => {
                say(writer, "⚠️ 请输入需求内容 (Please enter a feature request).").await?;
            }
            Err(e) => {
                error!("需求处理失败: {}", e);
                say(writer, &format!("❌ 处理失败: {}，请重新提交。", e)).await?;
            }
        }
        Ok(())
    }

    async fn show_current_question<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> AppResult<()> {
        if let Some(record) = self.session.current_question() {
            say(writer, "\n### ❓ Clarifying question").await?;
            say(writer, &record.question).await?;
            say(
                writer,
                &format!("📌 剩余 {} 个问题 | 你的回答:", self.session.remaining()),
            )
            .await?;
        }
        Ok(())
    }

    async fn show_explanation<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> AppResult<()> {
        if let Some(explanation) = self.session.explain_current() {
            say(writer, "🔍 Explanation").await?;
            say(writer, &format!("- Segment: `{}`", explanation.segment)).await?;
            say(writer, &format!("- Defect Type: `{}`", explanation.defect_type)).await?;
            say(writer, &format!("- Definition: {}", explanation.definition)).await?;
        }
        Ok(())
    }

    /// 打印结果并导出报告；报告写入失败不影响会话
    async fn finish<W: AsyncWrite + Unpin>(&self, writer: &mut W) -> AppResult<()> {
        let Some(table) = self.session.table() else {
            return Ok(());
        };

        say(writer, "\n✅ 需求已澄清，谢谢！(Your request has been refined)").await?;
        for (idx, finding) in table.iter().enumerate() {
            say(
                writer,
                &format!(
                    "{}. [{}] \"{}\"\n   Q: {}\n   A: {}",
                    idx + 1,
                    finding.defect_type.label(),
                    finding.segment,
                    finding.question,
                    finding.answer.as_deref().unwrap_or("-")
                ),
            )
            .await?;
        }

        match self.report_writer.write(table).await {
            Ok(path) => {
                info!("报告已保存至: {}", path.display());
                say(writer, &format!("📄 报告已保存至: {}", path.display())).await?;
            }
            Err(e) => {
                error!("报告写入失败: {}", e);
                say(writer, &format!("⚠️ 报告写入失败: {}", e)).await?;
            }
        }
        Ok(())
    }
}

async fn next_line<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) -> AppResult<Option<String>> {
    Ok(lines.next_line().await?)
}

async fn say<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> AppResult<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
