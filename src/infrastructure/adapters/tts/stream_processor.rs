//! 流式合成状态机
//!
//! `Connecting → Streaming → (Completed | Failed)`。进入终止状态后，
//! 任何后续输入都被丢弃，sink 不会再收到回调。

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::dto::StreamEventBody;
use super::sse::SseDecoder;
use crate::application::error::TtsError;
use crate::application::ports::StreamSink;
use crate::domain::synthesis::AudioChunk;

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Connecting,
    Streaming,
    Completed,
    Failed,
}

impl StreamState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

pub struct StreamProcessor {
    state: StreamState,
    session_id: String,
    request_id: Option<String>,
    last_seq: Option<i64>,
    chunks: usize,
    audio_bytes: usize,
    decoder: SseDecoder,
    sink: Box<dyn StreamSink>,
}

impl StreamProcessor {
    pub fn new(session_id: String, sink: Box<dyn StreamSink>) -> Self {
        Self {
            state: StreamState::Connecting,
            session_id,
            request_id: None,
            last_seq: None,
            chunks: 0,
            audio_bytes: 0,
            decoder: SseDecoder::new(),
            sink,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// 收到 2xx 响应头
    pub fn on_connected(&mut self) {
        if self.state == StreamState::Connecting {
            self.state = StreamState::Streaming;
            tracing::debug!(session_id = %self.session_id, "Stream connected");
        }
    }

    /// 处理一段响应体字节，返回是否已进入终止状态
    pub fn on_bytes(&mut self, bytes: &[u8]) -> bool {
        if self.is_terminal() {
            return true;
        }
        self.on_connected();

        match self.decoder.feed(bytes) {
            Ok(events) => {
                for data in events {
                    self.handle_event(&data);
                    if self.is_terminal() {
                        break;
                    }
                }
            }
            Err(e) => self.fail(e),
        }
        self.is_terminal()
    }

    /// 连接或读取失败
    pub fn on_transport_error(&mut self, error: TtsError) {
        self.fail(error);
    }

    /// 响应体结束
    pub fn on_end(&mut self) {
        if self.is_terminal() {
            return;
        }
        if let Some(data) = self.decoder.finish() {
            self.handle_event(&data);
        }
        if !self.is_terminal() {
            self.fail(TtsError::network("stream ended before completion"));
        }
    }

    fn handle_event(&mut self, data: &str) {
        let data = data.trim();
        if data.is_empty() {
            return;
        }
        if data == DONE_MARKER {
            self.complete();
            return;
        }

        let mut event: StreamEventBody = match serde_json::from_str(data) {
            Ok(event) => event,
            Err(e) => {
                self.fail(TtsError::network_with_source("Malformed stream event", e));
                return;
            }
        };

        if let Some(error) = event.take_provider_error() {
            self.fail(error);
            return;
        }

        let audio = match event.audio.as_deref().filter(|s| !s.is_empty()) {
            Some(encoded) => match BASE64.decode(encoded) {
                Ok(audio) => audio,
                Err(e) => {
                    self.fail(TtsError::network_with_source("Malformed audio payload", e));
                    return;
                }
            },
            None => Vec::new(),
        };

        if self.request_id.is_none() {
            self.request_id = event.request_id.take().filter(|id| !id.is_empty());
        }

        let is_final = event.is_final();
        let subtitle_seq = event.subtitle_seq.unwrap_or(0);
        if let Some(last) = self.last_seq {
            if subtitle_seq < last {
                tracing::warn!(
                    session_id = %self.session_id,
                    last,
                    subtitle_seq,
                    "Subtitle sequence went backwards"
                );
            }
        }
        self.last_seq = Some(subtitle_seq);

        self.chunks += 1;
        self.audio_bytes += audio.len();
        self.sink.on_chunk(AudioChunk {
            audio,
            request_id: self.request_id.clone(),
            session_id: self.session_id.clone(),
            subtitle_seq,
            is_final,
        });

        if is_final {
            self.complete();
        }
    }

    fn complete(&mut self) {
        if self.is_terminal() {
            return;
        }
        self.state = StreamState::Completed;
        tracing::info!(
            session_id = %self.session_id,
            request_id = ?self.request_id,
            chunks = self.chunks,
            audio_bytes = self.audio_bytes,
            "Stream synthesis completed"
        );
        self.sink.on_complete();
    }

    fn fail(&mut self, error: TtsError) {
        if self.is_terminal() {
            return;
        }
        self.state = StreamState::Failed;
        tracing::warn!(
            session_id = %self.session_id,
            request_id = ?self.request_id,
            chunks = self.chunks,
            error = %error,
            "Stream synthesis failed"
        );
        self.sink.on_error(error);
    }
}
