//! Voice Context - Errors

use thiserror::Error;

/// 音色目录加载错误
///
/// 不向调用方传播：目录加载失败只降级功能（解析直通、列表为空）。
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("voice data for model {0} not found")]
    NotFound(String),

    #[error("failed to read voice data for model {model}: {reason}")]
    Io { model: String, reason: String },

    #[error("corrupt voice data for model {model}: {reason}")]
    Corrupt { model: String, reason: String },
}
