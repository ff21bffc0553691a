use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, ConfigError};

/// 程序配置文件
///
/// 加载顺序：默认值 → TOML 配置文件（可选） → 环境变量 → 密钥文件（仅补全 API 密钥）
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度，不设置时使用服务端默认值
    pub llm_temperature: Option<f32>,
    pub llm_max_tokens: Option<u32>,
    /// 单次生成调用的超时时间（秒），不设置则不限时
    pub llm_timeout_secs: Option<u64>,
    /// JSON 格式的密钥文件：{"api_key": "..."}
    pub api_key_file: String,
    /// 会话结束后导出的报告文件
    pub report_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
            llm_temperature: None,
            llm_max_tokens: None,
            llm_timeout_secs: None,
            api_key_file: "openai_key.json".to_string(),
            report_file: "clarification_report.json".to_string(),
            verbose_logging: false,
        }
    }
}

#[derive(Deserialize)]
struct KeyFile {
    api_key: String,
}

impl Config {
    /// 默认值 + 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// 完整加载流程，`path` 为可选的 TOML 配置文件
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };

        let mut config = base.with_env_overrides(|name| std::env::var(name).ok());
        config.resolve_api_key()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!("已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 用环境变量覆盖配置
    ///
    /// `lookup` 通常是 `std::env::var`，测试时可以传入固定的映射。
    /// 无法解析的值会被忽略并保留原值。
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("LLM_API_KEY") {
            self.llm_api_key = v;
        }
        if let Some(v) = lookup("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        if let Some(v) = lookup("LLM_API_KEY_FILE") {
            self.api_key_file = v;
        }
        if let Some(v) = lookup("REPORT_FILE") {
            self.report_file = v;
        }
        if let Some(v) = parse_env(&lookup, "LLM_TEMPERATURE") {
            self.llm_temperature = Some(v);
        }
        if let Some(v) = parse_env(&lookup, "LLM_MAX_TOKENS") {
            self.llm_max_tokens = Some(v);
        }
        if let Some(v) = parse_env(&lookup, "LLM_TIMEOUT_SECS") {
            self.llm_timeout_secs = Some(v);
        }
        if let Some(v) = parse_env(&lookup, "VERBOSE_LOGGING") {
            self.verbose_logging = v;
        }
        self
    }

    /// 确保 API 密钥可用
    ///
    /// 已有密钥时直接返回；否则尝试读取 `api_key_file`。
    pub fn resolve_api_key(&mut self) -> AppResult<()> {
        if !self.llm_api_key.trim().is_empty() {
            return Ok(());
        }

        let path = Path::new(&self.api_key_file);
        if !path.exists() {
            return Err(ConfigError::MissingApiKey {
                key_file: self.api_key_file.clone(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(self.api_key_file.clone(), e))?;
        let key_file: KeyFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: self.api_key_file.clone(),
                message: e.to_string(),
            })?;

        if key_file.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                key_file: self.api_key_file.clone(),
            }
            .into());
        }

        debug!("已从密钥文件读取 API 密钥: {}", self.api_key_file);
        self.llm_api_key = key_file.api_key;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
) -> Option<T> {
    let raw = lookup(var_name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("环境变量 {} 解析失败: 值 '{}'，保留原配置", var_name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("clarifier_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm_model_name, "gpt-4o");
        assert_eq!(config.api_key_file, "openai_key.json");
        assert!(config.llm_api_key.is_empty());
        assert!(config.llm_timeout_secs.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LLM_API_KEY", "sk-test"),
            ("LLM_MODEL_NAME", "gpt-4o-mini"),
            ("LLM_TIMEOUT_SECS", "30"),
            ("VERBOSE_LOGGING", "true"),
        ]);

        let config =
            Config::default().with_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.llm_api_key, "sk-test");
        assert_eq!(config.llm_model_name, "gpt-4o-mini");
        assert_eq!(config.llm_timeout_secs, Some(30));
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_env_override_ignores_unparsable_values() {
        let config = Config::default().with_env_overrides(|name| match name {
            "LLM_MAX_TOKENS" => Some("lots".to_string()),
            _ => None,
        });

        assert!(config.llm_max_tokens.is_none());
    }

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let path = temp_path("config.toml");
        std::fs::write(&path, "llm_model_name = \"gpt-4.1\"\nllm_temperature = 0.2\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.llm_model_name, "gpt-4.1");
        assert_eq!(config.llm_temperature, Some(0.2));
        assert_eq!(config.llm_api_base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_from_toml_file_rejects_bad_toml() {
        let path = temp_path("bad.toml");
        std::fs::write(&path, "llm_model_name = [").unwrap();

        let result = Config::from_toml_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::ParseFailed { .. }))
        ));
    }

    #[test]
    fn test_resolve_api_key_from_key_file() {
        let path = temp_path("openai_key.json");
        std::fs::write(&path, r#"{"api_key": "sk-from-file"}"#).unwrap();

        let mut config = Config {
            api_key_file: path.display().to_string(),
            ..Config::default()
        };
        let result = config.resolve_api_key();
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok());
        assert_eq!(config.llm_api_key, "sk-from-file");
    }

    #[test]
    fn test_resolve_api_key_prefers_existing_key() {
        let mut config = Config {
            llm_api_key: "sk-env".to_string(),
            api_key_file: "/definitely/not/here.json".to_string(),
            ..Config::default()
        };

        assert!(config.resolve_api_key().is_ok());
        assert_eq!(config.llm_api_key, "sk-env");
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let mut config = Config {
            api_key_file: "/definitely/not/here.json".to_string(),
            ..Config::default()
        };

        assert!(matches!(
            config.resolve_api_key(),
            Err(AppError::Config(ConfigError::MissingApiKey { .. }))
        ));
    }
}
