//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_stream;
mod tts_engine;
mod voice_directory;
mod voice_source;

pub use audio_stream::{AudioStream, ChannelSink, StreamEvent, StreamHandle};
pub use tts_engine::{StreamSink, TtsEnginePort};
pub use voice_directory::VoiceDirectoryPort;
pub use voice_source::VoiceSourcePort;
