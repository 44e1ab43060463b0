//! 应用层错误定义
//!
//! 统一的合成错误类型：同步调用直接返回，流式调用经由 sink 的错误通道送达。

use thiserror::Error;

/// 被包装的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    /// 配置或请求参数无效，在任何 I/O 之前检测
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 传输层失败：连接、超时、响应体或事件帧格式错误
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// 服务端明确拒绝了请求
    #[error("Provider error [{code}]: {message}{}", request_id_suffix(.request_id))]
    Provider {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// 非 2xx 且没有可解析的服务端错误信封
    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    request_id
        .as_deref()
        .map(|id| format!(" (RequestId: {})", id))
        .unwrap_or_default()
}

impl TtsError {
    /// 创建参数错误
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// 创建不带底层原因的网络错误
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// 创建包装底层原因的网络错误
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建服务端错误
    pub fn provider(
        code: impl Into<String>,
        message: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::Provider {
            code: code.into(),
            message: message.into(),
            request_id,
        }
    }

    /// 服务端错误码
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Provider { code, .. } => Some(code),
            _ => None,
        }
    }

    /// 服务端 RequestId（用于工单排查）
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Provider { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timeout".to_string()
        } else if err.is_connect() {
            format!("Cannot connect to TTS service: {}", err)
        } else {
            err.to_string()
        };
        Self::network_with_source(message, err)
    }
}
