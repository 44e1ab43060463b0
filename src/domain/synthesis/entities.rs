//! Synthesis Context - Entities

use serde::Serialize;

use super::AudioCodec;

/// 流式音频分片
///
/// 按线上到达顺序产生。`request_id` 在首次出现后保持不变，
/// `session_id` 由客户端生成，整次调用内恒定。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioChunk {
    /// 原始音频（可能为空）
    pub audio: Vec<u8>,
    /// 服务端 RequestId
    pub request_id: Option<String>,
    /// 客户端会话 ID
    pub session_id: String,
    /// 字幕序号
    pub subtitle_seq: i64,
    /// 是否为最后一个分片
    pub is_final: bool,
}

impl AudioChunk {
    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty()
    }
}

/// 同步合成结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisResult {
    /// 完整音频
    pub audio: Vec<u8>,
    /// 服务端 RequestId
    pub request_id: Option<String>,
    /// 客户端会话 ID
    pub session_id: String,
    /// 音频编码
    pub codec: AudioCodec,
    /// 自动检测的语言（调用方未指定语言时）
    pub detected_language: Option<String>,
}
