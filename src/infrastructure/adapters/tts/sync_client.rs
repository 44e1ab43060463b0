//! 同步合成：一次请求，一次完整响应

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::Arc;

use super::dto::ResponseEnvelope;
use super::request_builder::build_request_body;
use super::transport::{HttpTransport, ACTION_SYNC};
use crate::application::error::TtsError;
use crate::domain::synthesis::{AudioCodec, SynthesisRequest, SynthesisResult};

pub struct SyncSynthesisClient {
    transport: Arc<HttpTransport>,
}

impl SyncSynthesisClient {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
        session_id: &str,
    ) -> Result<SynthesisResult, TtsError> {
        let body = build_request_body(self.transport.sdk_app_id(), request, false)?;

        tracing::debug!(
            session_id = %session_id,
            url = %self.transport.url(),
            model = %request.model(),
            voice_id = %request.voice_id(),
            text_len = request.text().len(),
            "Sending TTS request"
        );

        let response = self
            .transport
            .signed_post(ACTION_SYNC, body, &[])?
            .timeout(self.transport.request_timeout())
            .send()
            .await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TtsError::network_with_source("Failed to read response body", e))?;

        if !status.is_success() {
            tracing::warn!(
                session_id = %session_id,
                status = status.as_u16(),
                "TTS request rejected"
            );
            return Err(TtsError::Transport {
                status: status.as_u16(),
                body: text,
            });
        }

        let result = parse_sync_response(&text, request.codec().clone(), session_id)?;

        tracing::info!(
            session_id = %session_id,
            request_id = ?result.request_id,
            audio_size = result.audio.len(),
            "TTS synthesis completed"
        );

        Ok(result)
    }
}

/// 解析 `{"Response": {...}}` 信封
pub(crate) fn parse_sync_response(
    body: &str,
    codec: AudioCodec,
    session_id: &str,
) -> Result<SynthesisResult, TtsError> {
    let envelope: ResponseEnvelope = serde_json::from_str(body)
        .map_err(|e| TtsError::network_with_source("Malformed response body", e))?;
    let mut response = envelope.response;

    if let Some(error) = response.error.take() {
        return Err(error.into_error(response.request_id));
    }

    let audio = match response.audio.as_deref().filter(|s| !s.is_empty()) {
        Some(encoded) => BASE64
            .decode(encoded)
            .map_err(|e| TtsError::network_with_source("Malformed audio payload", e))?,
        None => Vec::new(),
    };

    Ok(SynthesisResult {
        audio,
        request_id: response.request_id,
        session_id: session_id.to_string(),
        codec,
        detected_language: None,
    })
}
