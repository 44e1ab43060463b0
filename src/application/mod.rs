//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、VoiceDirectory、VoiceSource）
//! - commands: 合成命令及处理器
//! - queries: 音色查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::{
    handlers::{SynthesizeHandler, SynthesizeStreamHandler},
    Synthesize, SynthesizeStream,
};

pub use error::TtsError;

pub use ports::{
    AudioStream, ChannelSink, StreamEvent, StreamHandle, StreamSink, TtsEnginePort,
    VoiceDirectoryPort, VoiceSourcePort,
};

pub use queries::{
    handlers::{VoiceQueryHandler, VoiceResponse},
    GetVoice, IsValidVoice, ListVoices, SearchVoices,
};
