//! 单元测试共用的生成器替身

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::AppResult;
use crate::services::Generator;

/// 按顺序返回预设结果的生成器，同时记录收到的提示词
///
/// 预设结果用完之后一律返回 "No Defect Found"。
pub(crate) struct ScriptedGenerator {
    replies: Mutex<VecDeque<AppResult<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(crate) fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn ok(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("No Defect Found".to_string()))
    }
}
