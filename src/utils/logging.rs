//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::config::Config;

/// 日志级别句柄
///
/// 配置加载完成后用它切换详细模式。设置了 `RUST_LOG`
/// 或订阅者已被别处安装时，切换不生效。
pub struct LogHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

impl LogHandle {
    /// 按配置切换详细模式
    pub fn set_verbose(&self, verbose: bool) {
        if let Some(handle) = &self.reload {
            let _ = handle.reload(EnvFilter::new(default_level(verbose)));
        }
    }
}

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// 从环境变量读取 `VERBOSE_LOGGING`，用于加载配置之前的日志初始化
///
/// 无法解析的值视为未开启，交给后续配置加载报告。
pub fn verbose_from_env(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("VERBOSE_LOGGING")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(false)
}

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，详细模式下为 `debug`。
/// 重复调用不会报错。
pub fn init(verbose: bool) -> LogHandle {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some();
    let filter = from_env.unwrap_or_else(|| EnvFilter::new(default_level(verbose)));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok();

    LogHandle {
        reload: (installed && !pinned).then_some(handle),
    }
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 需求澄清助手");
    info!("🤖 模型: {} ({})", config.llm_model_name, config.llm_api_base_url);
    if let Some(secs) = config.llm_timeout_secs {
        info!("⏱️ 单次调用超时: {} 秒", secs);
    }
    info!("📄 报告文件: {}", config.report_file);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("需求澄清助手", 2), "需求...");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let first = init(false);
        first.set_verbose(true);
        let second = init(true);
        assert!(second.reload.is_none());
        second.set_verbose(false);
    }

    #[test]
    fn test_verbose_from_env() {
        assert!(verbose_from_env(|_| Some("true".to_string())));
        assert!(verbose_from_env(|_| Some(" true ".to_string())));
        assert!(!verbose_from_env(|_| Some("yes please".to_string())));
        assert!(!verbose_from_env(|_| None));
    }
}
