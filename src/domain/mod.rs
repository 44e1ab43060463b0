//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: 音色目录与别名
//! - Synthesis Context: 合成参数、请求与音频结果

pub mod synthesis;
pub mod voice;
