//! Fake TTS Client - 用于测试的 TTS 引擎
//!
//! 不发起网络请求：同步调用返回所有分片的拼接，流式调用按顺序推送分片。

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::application::error::TtsError;
use crate::application::ports::{StreamHandle, StreamSink, TtsEnginePort};
use crate::domain::synthesis::{AudioChunk, SynthesisRequest, SynthesisResult};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 依次返回的音频分片
    pub chunks: Vec<Vec<u8>>,
    /// 设置后，同步调用返回该错误，流式调用在所有分片之后以该错误结束
    pub failure: Option<(String, String)>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            chunks: vec![vec![1, 2, 3], vec![4, 5]],
            failure: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    pub fn failing(code: &str, message: &str) -> Self {
        Self::new(FakeTtsClientConfig {
            chunks: Vec::new(),
            failure: Some((code.to_string(), message.to_string())),
        })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 收到的请求（按调用顺序）
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: SynthesisRequest) {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request);
    }

    fn failure(&self) -> Option<TtsError> {
        self.config
            .failure
            .as_ref()
            .map(|(code, message)| TtsError::provider(code, message, Some("fake-request".into())))
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        session_id: &str,
    ) -> Result<SynthesisResult, TtsError> {
        tracing::debug!(
            session_id = %session_id,
            voice_id = %request.voice_id(),
            "FakeTtsClient: returning fixed audio"
        );
        let codec = request.codec().clone();
        self.record(request);

        if let Some(error) = self.failure() {
            return Err(error);
        }

        Ok(SynthesisResult {
            audio: self.config.chunks.concat(),
            request_id: Some("fake-request".to_string()),
            session_id: session_id.to_string(),
            codec,
            detected_language: None,
        })
    }

    fn open_stream(
        &self,
        request: SynthesisRequest,
        session_id: String,
        mut sink: Box<dyn StreamSink>,
    ) -> Result<StreamHandle, TtsError> {
        self.record(request);

        let chunks = self.config.chunks.clone();
        let failure = self.failure();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let sid = session_id.clone();

        let task = tokio::spawn(async move {
            let last = chunks.len().saturating_sub(1);
            for (seq, audio) in chunks.into_iter().enumerate() {
                tokio::task::yield_now().await;
                if token.is_cancelled() {
                    return;
                }
                sink.on_chunk(AudioChunk {
                    audio,
                    request_id: Some("fake-request".to_string()),
                    session_id: sid.clone(),
                    subtitle_seq: seq as i64,
                    is_final: failure.is_none() && seq == last,
                });
            }
            if token.is_cancelled() {
                return;
            }
            match failure {
                Some(error) => sink.on_error(error),
                None => sink.on_complete(),
            }
        });

        Ok(StreamHandle::new(session_id, cancel, task))
    }
}
