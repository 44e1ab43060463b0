//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（flowtts.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::FlowTtsConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["flowtts", "flowtts.local"];

/// 加载客户端配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `FLOWTTS_`，层级分隔符 `__`）
/// 2. 配置文件（flowtts.toml 或 flowtts.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `FLOWTTS_CREDENTIALS__SECRET_ID=AKID...`
/// - `FLOWTTS_CREDENTIALS__SDK_APP_ID=1400000000`
/// - `FLOWTTS_ENDPOINT__REGION=ap-guangzhou`
/// - `FLOWTTS_VOICES__DATA_DIR=/etc/flowtts/voices`
pub fn load_config() -> Result<FlowTtsConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<FlowTtsConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("credentials.secret_id", "")?
        .set_default("credentials.secret_key", "")?
        .set_default("credentials.sdk_app_id", 0)?
        .set_default("endpoint.host", "trtc.ai.tencentcloudapi.com")?
        .set_default("endpoint.region", "ap-beijing")?
        .set_default("endpoint.scheme", "https")?
        .set_default("http.connect_timeout_secs", 30)?
        .set_default("http.read_timeout_secs", 60)?
        .set_default("http.write_timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("FLOWTTS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let flow_config: FlowTtsConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&flow_config)?;

    Ok(flow_config)
}

/// 验证配置有效性
fn validate_config(config: &FlowTtsConfig) -> Result<(), ConfigError> {
    config
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))
}

/// 打印配置信息（不含密钥）
pub fn print_config(config: &FlowTtsConfig) {
    tracing::info!("=== Flow TTS Configuration ===");
    tracing::info!("Endpoint: {}", config.endpoint.url());
    tracing::info!("Region: {}", config.endpoint.region);
    tracing::info!("SdkAppId: {}", config.credentials.sdk_app_id);
    tracing::info!("SecretId: {}", mask(&config.credentials.secret_id));
    tracing::info!(
        "Timeouts: connect {}s, read {}s, write {}s",
        config.http.connect_timeout_secs,
        config.http.read_timeout_secs,
        config.http.write_timeout_secs
    );
    match &config.voices.data_dir {
        Some(dir) => tracing::info!("Voice Directory: {:?}", dir),
        None => tracing::info!("Voice Directory: <embedded>"),
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("==============================");
}

fn mask(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    format!("{}****", prefix)
}
