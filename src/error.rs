//! 错误类型
//!
//! 整个 crate 只有一个顶层错误 [`AppError`]，配置和文件相关的错误
//! 分组在子枚举里。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 缺陷类型不在目录中（上游编程错误）
    #[error("无效的缺陷类型: {value}")]
    InvalidDefectType { value: String },

    /// 文本生成失败（网络、鉴权、限流、响应格式等一律归为此类）
    #[error("文本生成失败 (模型: {model}): {message}")]
    GenerationFailure { model: String, message: String },

    /// 索引不对应任何 Finding
    #[error("索引 {index} 超出范围 (共 {len} 条)")]
    IndexOutOfRange { index: usize, len: usize },

    /// 需求正文为空
    #[error("需求内容不能为空")]
    EmptyRequest,

    /// 回答为空
    #[error("回答不能为空")]
    EmptyAnswer,

    /// 会话阶段不允许该操作
    #[error("会话阶段错误: 需要 {expected}, 当前 {actual}")]
    WrongStage {
        expected: &'static str,
        actual: &'static str,
    },

    /// 终端读写失败
    #[error("终端读写失败: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    File(#[from] FileError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 既没有环境变量也没有密钥文件
    #[error("未找到 API 密钥 (请设置 LLM_API_KEY 或提供密钥文件 {key_file})")]
    MissingApiKey { key_file: String },

    /// 配置文件或密钥文件解析失败
    #[error("配置解析失败 ({path}): {message}")]
    ParseFailed { path: String, message: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文本生成失败错误
    pub fn generation_failed(model: impl Into<String>, message: impl std::fmt::Display) -> Self {
        AppError::GenerationFailure {
            model: model.into(),
            message: message.to_string(),
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
