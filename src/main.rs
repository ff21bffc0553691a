use std::path::PathBuf;

use anyhow::Result;
use feature_request_clarifier::utils::logging;
use feature_request_clarifier::{App, Config};

/// 未指定 CLARIFIER_CONFIG 时尝试读取的配置文件
const DEFAULT_CONFIG_FILE: &str = "clarifier.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 先初始化日志，配置加载过程中的警告才有去处
    let log = logging::init(logging::verbose_from_env(|key| std::env::var(key).ok()));

    // 加载配置
    let config_path = std::env::var("CLARIFIER_CONFIG")
        .map(PathBuf::from)
        .ok()
        .or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        });
    let config = Config::load(config_path.as_deref())?;

    // 配置文件也可能开启详细模式
    log.set_verbose(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
