//! HTTP TTS Client - 调用 TRTC AI 语音合成服务
//!
//! 实现 TtsEnginePort trait，同步与流式两条路径共享同一个连接池。
//!
//! 外部 API:
//! POST https://trtc.ai.tencentcloudapi.com/
//! - X-TC-Action: TextToSpeech    → JSON 信封，音频为 base64
//! - X-TC-Action: TextToSpeechSSE → text/event-stream，逐段 PCM

use async_trait::async_trait;
use std::sync::Arc;

use super::stream_client::StreamingSynthesisClient;
use super::sync_client::SyncSynthesisClient;
use super::transport::HttpTransport;
use crate::application::error::TtsError;
use crate::application::ports::{StreamHandle, StreamSink, TtsEnginePort};
use crate::config::FlowTtsConfig;
use crate::domain::synthesis::{SynthesisRequest, SynthesisResult};

/// HTTP TTS 客户端
pub struct HttpTtsClient {
    sync: SyncSynthesisClient,
    stream: StreamingSynthesisClient,
}

impl HttpTtsClient {
    /// 创建新的 HTTP TTS 客户端
    pub fn new(config: &FlowTtsConfig) -> Result<Self, TtsError> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(config)?);

        tracing::info!(
            url = %transport.url(),
            region = %transport.region(),
            "HttpTtsClient initialized"
        );

        Ok(Self {
            sync: SyncSynthesisClient::new(transport.clone()),
            stream: StreamingSynthesisClient::new(transport),
        })
    }

    pub fn arc(config: &FlowTtsConfig) -> Result<Arc<Self>, TtsError> {
        Self::new(config).map(Arc::new)
    }
}

#[async_trait]
impl TtsEnginePort for HttpTtsClient {
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        session_id: &str,
    ) -> Result<SynthesisResult, TtsError> {
        self.sync.synthesize(&request, session_id).await
    }

    fn open_stream(
        &self,
        request: SynthesisRequest,
        session_id: String,
        sink: Box<dyn StreamSink>,
    ) -> Result<StreamHandle, TtsError> {
        self.stream.open(&request, session_id, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_config() {
        let config = FlowTtsConfig::new("", "key", 1);
        assert!(matches!(
            HttpTtsClient::new(&config),
            Err(TtsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_accepts_valid_config() {
        let config = FlowTtsConfig::new("id", "key", 1400000000);
        assert!(HttpTtsClient::new(&config).is_ok());
    }
}
