//! Synthesis Command Handlers

use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::application::commands::{Synthesize, SynthesizeStream};
use crate::application::error::TtsError;
use crate::application::ports::{
    AudioStream, ChannelSink, StreamHandle, StreamSink, TtsEnginePort, VoiceDirectoryPort,
};
use crate::domain::synthesis::{detect_language, SynthesisOptions, SynthesisRequest, SynthesisResult};
use crate::domain::voice::ModelName;

/// 未指定语言且无法判定时的默认语言
const DEFAULT_LANGUAGE: &str = "zh";

/// 校验参数并解析音色
fn prepare_request(
    options: &SynthesisOptions,
    voices: &dyn VoiceDirectoryPort,
) -> Result<SynthesisRequest, TtsError> {
    options.validate().map_err(TtsError::invalid_argument)?;

    let model = ModelName::new(&options.model);
    let voice_id = voices.resolve(&options.voice, &model);
    Ok(SynthesisRequest::new(options, voice_id))
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Synthesize Handler - 同步合成
pub struct SynthesizeHandler {
    engine: Arc<dyn TtsEnginePort>,
    voices: Arc<dyn VoiceDirectoryPort>,
}

impl SynthesizeHandler {
    pub fn new(engine: Arc<dyn TtsEnginePort>, voices: Arc<dyn VoiceDirectoryPort>) -> Self {
        Self { engine, voices }
    }

    pub async fn handle(&self, cmd: Synthesize) -> Result<SynthesisResult, TtsError> {
        let request = prepare_request(&cmd.options, self.voices.as_ref())?;
        let session_id = new_session_id();

        tracing::info!(
            session_id = %session_id,
            model = %request.model(),
            voice_id = %request.voice_id(),
            codec = %request.codec(),
            "Synthesizing"
        );

        let mut result = self.engine.synthesize(request, &session_id).await?;
        if cmd.options.language.is_none() {
            result.detected_language =
                Some(detect_language(&cmd.options.text, DEFAULT_LANGUAGE).to_string());
        }
        Ok(result)
    }
}

/// SynthesizeStream Handler - 流式合成
pub struct SynthesizeStreamHandler {
    engine: Arc<dyn TtsEnginePort>,
    voices: Arc<dyn VoiceDirectoryPort>,
}

impl SynthesizeStreamHandler {
    pub fn new(engine: Arc<dyn TtsEnginePort>, voices: Arc<dyn VoiceDirectoryPort>) -> Self {
        Self { engine, voices }
    }

    /// 以通道形式返回事件
    pub fn handle(&self, cmd: SynthesizeStream) -> Result<AudioStream, TtsError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = self.handle_with_sink(cmd, ChannelSink::new(sender))?;
        Ok(AudioStream::new(receiver, handle))
    }

    /// 事件推送给调用方提供的 sink
    pub fn handle_with_sink(
        &self,
        cmd: SynthesizeStream,
        sink: impl StreamSink,
    ) -> Result<StreamHandle, TtsError> {
        let request = prepare_request(&cmd.options, self.voices.as_ref())?;
        let session_id = new_session_id();

        tracing::info!(
            session_id = %session_id,
            model = %request.model(),
            voice_id = %request.voice_id(),
            "Starting stream synthesis"
        );

        self.engine
            .open_stream(request, session_id, Box::new(sink))
    }
}
