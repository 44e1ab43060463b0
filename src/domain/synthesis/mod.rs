//! Synthesis Context - 语音合成限界上下文
//!
//! 职责:
//! - 合成参数与校验
//! - 发往服务端的合成请求
//! - 同步结果与流式音频分片

mod entities;
mod language;
mod value_objects;

pub use entities::{AudioChunk, SynthesisResult};
pub use language::detect_language;
pub use value_objects::{AudioCodec, SynthesisOptions, SynthesisRequest};
