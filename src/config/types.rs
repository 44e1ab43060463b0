//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::error::TtsError;

/// 客户端主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlowTtsConfig {
    /// 云 API 凭证
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// 接入点配置
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// HTTP 超时配置
    #[serde(default)]
    pub http: HttpConfig,

    /// 音色目录配置
    #[serde(default)]
    pub voices: VoicesConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl FlowTtsConfig {
    /// 只指定凭证，其余取默认值
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        sdk_app_id: u64,
    ) -> Self {
        Self {
            credentials: CredentialsConfig {
                secret_id: secret_id.into(),
                secret_key: secret_key.into(),
                sdk_app_id,
            },
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.endpoint.region = region.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.endpoint.host = host.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.endpoint.scheme = scheme.into();
        self
    }

    pub fn with_voice_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.voices.data_dir = Some(dir.into());
        self
    }

    /// 构建客户端前的校验，任何 I/O 之前完成
    pub fn validate(&self) -> Result<(), TtsError> {
        if self.credentials.secret_id.trim().is_empty() {
            return Err(TtsError::invalid_argument("secret_id is required"));
        }
        if self.credentials.secret_key.trim().is_empty() {
            return Err(TtsError::invalid_argument("secret_key is required"));
        }
        if self.credentials.sdk_app_id == 0 {
            return Err(TtsError::invalid_argument("sdk_app_id must be positive"));
        }
        if self.endpoint.host.trim().is_empty() {
            return Err(TtsError::invalid_argument("endpoint host cannot be empty"));
        }
        if self.endpoint.region.trim().is_empty() {
            return Err(TtsError::invalid_argument("region cannot be empty"));
        }
        if !matches!(self.endpoint.scheme.as_str(), "http" | "https") {
            return Err(TtsError::invalid_argument(format!(
                "unsupported scheme: {}",
                self.endpoint.scheme
            )));
        }
        if self.http.connect_timeout_secs == 0 || self.http.read_timeout_secs == 0 {
            return Err(TtsError::invalid_argument("timeouts must be positive"));
        }
        Ok(())
    }
}

/// 云 API 凭证
///
/// Debug 输出不包含 secret_key。
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub secret_id: String,

    #[serde(default)]
    pub secret_key: String,

    /// TRTC 应用 ID
    #[serde(default)]
    pub sdk_app_id: u64,
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"***")
            .field("sdk_app_id", &self.sdk_app_id)
            .finish()
    }
}

/// 接入点配置
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// 域名，同时作为签名中的 Host
    #[serde(default = "default_host")]
    pub host: String,

    /// 地域
    #[serde(default = "default_region")]
    pub region: String,

    /// `https`，本地调试可用 `http`
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

fn default_host() -> String {
    "trtc.ai.tencentcloudapi.com".to_string()
}

fn default_region() -> String {
    "ap-beijing".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            region: default_region(),
            scheme: default_scheme(),
        }
    }
}

impl EndpointConfig {
    /// 请求 URL
    pub fn url(&self) -> String {
        format!("{}://{}/", self.scheme, self.host)
    }
}

/// HTTP 超时配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// 连接超时（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// 读超时（秒）
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// 写超时（秒），计入同步请求的总时限
    #[serde(default = "default_write_timeout")]
    pub write_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_read_timeout() -> u64 {
    60
}

fn default_write_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            write_timeout_secs: default_write_timeout(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// 同步请求总时限：连接 + 读 + 写
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs + self.read_timeout_secs + self.write_timeout_secs,
        )
    }
}

/// 音色目录配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoicesConfig {
    /// 音色 JSON 所在目录；未设置时使用内置目录
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FlowTtsConfig {
        FlowTtsConfig::new("id", "key", 1400000000)
    }

    #[test]
    fn test_default_config() {
        let config = FlowTtsConfig::default();
        assert_eq!(config.endpoint.host, "trtc.ai.tencentcloudapi.com");
        assert_eq!(config.endpoint.region, "ap-beijing");
        assert_eq!(config.endpoint.url(), "https://trtc.ai.tencentcloudapi.com/");
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(30));
        assert_eq!(config.http.read_timeout(), Duration::from_secs(60));
        assert_eq!(config.http.request_timeout(), Duration::from_secs(120));
        assert!(config.voices.data_dir.is_none());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid().validate().is_ok());
        assert!(valid().with_scheme("http").validate().is_ok());
    }

    #[test]
    fn test_validate_missing_credentials() {
        let cases = [
            FlowTtsConfig::new("", "key", 1),
            FlowTtsConfig::new("id", " ", 1),
            FlowTtsConfig::new("id", "key", 0),
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(TtsError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_validate_endpoint() {
        assert!(valid().with_host("").validate().is_err());
        assert!(valid().with_region("").validate().is_err());
        assert!(valid().with_scheme("ftp").validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret_key() {
        let config = FlowTtsConfig::new("AKIDexample", "super-secret", 1);
        let debug = format!("{:?}", config);
        assert!(debug.contains("AKIDexample"));
        assert!(!debug.contains("super-secret"));
    }
}
