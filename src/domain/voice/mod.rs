//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 音色元数据
//! - 模型名称（用户形式 / 线上形式）
//! - OpenAI 风格的可移植别名

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::Voice;
pub use errors::CatalogError;
pub use value_objects::{lookup_alias, ModelName, PORTABLE_ALIASES};
