//! Flow TTS - 腾讯云 TRTC AI 语音合成客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Synthesis Context: 合成参数、请求、结果、语言检测
//! - Voice Context: 音色、模型名、可移植别名
//!
//! 应用层 (application/):
//! - Ports: TtsEngine, VoiceDirectory, VoiceSource, 流式事件通道
//! - Commands: 同步 / 流式合成
//! - Queries: 音色列表、详情、搜索、校验
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: TC3 签名、HTTP / SSE 客户端、音色目录来源
//! - Memory: 懒加载音色目录与解析器
//!
//! ```no_run
//! # async fn demo() -> Result<(), flow_tts::TtsError> {
//! use flow_tts::{FlowTts, FlowTtsConfig, SynthesisOptions};
//!
//! let client = FlowTts::new(FlowTtsConfig::new("AKID...", "secret", 1400000000))?;
//! let result = client.synthesize(SynthesisOptions::new("你好，世界")).await?;
//! std::fs::write("hello.wav", &result.audio).ok();
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{AudioStream, StreamEvent, StreamHandle, StreamSink, TtsError, VoiceResponse};
pub use client::FlowTts;
pub use config::{load_config, FlowTtsConfig};
pub use domain::synthesis::{AudioChunk, AudioCodec, SynthesisOptions, SynthesisResult};
pub use domain::voice::ModelName;
