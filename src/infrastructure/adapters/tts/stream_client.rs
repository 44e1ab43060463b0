//! 流式合成：SSE 响应体在独立任务上消费

use futures_util::StreamExt;
use reqwest::RequestBuilder;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::request_builder::build_request_body;
use super::stream_processor::StreamProcessor;
use super::transport::{HttpTransport, ACTION_STREAM};
use crate::application::error::TtsError;
use crate::application::ports::{StreamHandle, StreamSink};
use crate::domain::synthesis::SynthesisRequest;

pub struct StreamingSynthesisClient {
    transport: Arc<HttpTransport>,
}

impl StreamingSynthesisClient {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// 打开流式调用
    ///
    /// 请求构建失败时同步返回；之后的所有结果都经由 `sink` 送达。
    /// 必须在 tokio 运行时内调用。
    pub fn open(
        &self,
        request: &SynthesisRequest,
        session_id: String,
        sink: Box<dyn StreamSink>,
    ) -> Result<StreamHandle, TtsError> {
        let body = build_request_body(self.transport.sdk_app_id(), request, true)?;

        tracing::debug!(
            session_id = %session_id,
            url = %self.transport.url(),
            model = %request.model(),
            voice_id = %request.voice_id(),
            text_len = request.text().len(),
            "Opening TTS stream"
        );

        let builder = self.transport.signed_post(
            ACTION_STREAM,
            body,
            &[("Accept", "text/event-stream")],
        )?;

        let cancel = CancellationToken::new();
        let processor = StreamProcessor::new(session_id.clone(), sink);
        let task = tokio::spawn(run_stream(builder, processor, cancel.clone(), session_id.clone()));

        Ok(StreamHandle::new(session_id, cancel, task))
    }
}

async fn run_stream(
    builder: RequestBuilder,
    mut processor: StreamProcessor,
    cancel: CancellationToken,
    session_id: String,
) {
    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(session_id = %session_id, "Stream cancelled before response");
            return;
        }
        result = builder.send() => result,
    };

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            processor.on_transport_error(TtsError::from(e));
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        if !cancel.is_cancelled() {
            processor.on_transport_error(TtsError::network(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }
        return;
    }

    processor.on_connected();
    let mut body = response.bytes_stream();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(session_id = %session_id, "Stream cancelled by caller");
                break;
            }
            next = body.next() => match next {
                Some(Ok(bytes)) => {
                    if processor.on_bytes(&bytes) {
                        break;
                    }
                }
                Some(Err(e)) => {
                    processor.on_transport_error(TtsError::network_with_source(
                        "Failed to read stream body",
                        e,
                    ));
                    break;
                }
                None => {
                    processor.on_end();
                    break;
                }
            }
        }
    }
}
