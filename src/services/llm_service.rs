//! LLM 服务 - 业务能力层
//!
//! 只负责"给一段提示词，拿回一段文本"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use std::future::Future;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::ExponentialBackoffBuilder;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::utils::logging::truncate_text;

/// 文本生成能力
///
/// 一个提示词进，一段文本出。任何失败都归为 `GenerationFailure`，不做重试。
pub trait Generator {
    fn generate(&self, prompt: &str) -> impl Future<Output = AppResult<String>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 调用 OpenAI 兼容的对话补全接口
/// - 每次调用只发送一条用户消息
/// - 不关心提示词内容和流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        // 关闭客户端自带的 429/5xx 重试：失败直接交给调用方
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(openai_config).with_backoff(no_retry);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            timeout: config.llm_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送一条用户消息，返回模型的回复（已去除首尾空白）
    pub async fn send_to_llm(&self, user_message: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.failure(e))?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)]);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            args.max_tokens(max_tokens);
        }
        let request = args.build().map_err(|e| self.failure(e))?;

        // 调用 API
        let chat = self.client.chat();
        let call = chat.create(request);
        let response = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| self.failure(format!("请求超时 ({:?})", limit)))?,
            None => call.await,
        }
        .map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.failure(e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| self.failure("LLM 返回内容为空"))?;

        debug!("LLM 响应: {}", truncate_text(&content, 200));

        Ok(content.trim().to_string())
    }

    fn failure(&self, message: impl std::fmt::Display) -> AppError {
        AppError::generation_failed(&self.model_name, message)
    }
}

impl Generator for LlmService {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.send_to_llm(prompt).await
    }
}
