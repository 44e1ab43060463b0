//! Flow TTS 客户端入口
//!
//! 组装引擎、音色目录和各个 Handler，对外提供合成与音色查询。

use std::sync::Arc;

use crate::application::commands::handlers::{SynthesizeHandler, SynthesizeStreamHandler};
use crate::application::commands::{Synthesize, SynthesizeStream};
use crate::application::error::TtsError;
use crate::application::ports::{
    AudioStream, StreamHandle, StreamSink, TtsEnginePort, VoiceDirectoryPort, VoiceSourcePort,
};
use crate::application::queries::handlers::{VoiceQueryHandler, VoiceResponse};
use crate::application::queries::{GetVoice, IsValidVoice, ListVoices, SearchVoices};
use crate::config::FlowTtsConfig;
use crate::domain::synthesis::{SynthesisOptions, SynthesisResult};
use crate::domain::voice::ModelName;
use crate::infrastructure::adapters::tts::HttpTtsClient;
use crate::infrastructure::adapters::voices::{EmbeddedVoiceSource, FileVoiceSource};
use crate::infrastructure::memory::{VoiceCatalog, VoiceResolver};

/// Flow TTS 客户端
///
/// 可跨任务共享；各次调用相互独立，唯一的共享状态是懒加载的音色目录。
pub struct FlowTts {
    voices: Arc<dyn VoiceDirectoryPort>,
    synthesize: SynthesizeHandler,
    synthesize_stream: SynthesizeStreamHandler,
    voice_queries: VoiceQueryHandler,
}

impl FlowTts {
    /// 按配置创建客户端
    ///
    /// 配置无效时返回 `InvalidArgument`，不发生任何网络 I/O。
    pub fn new(config: FlowTtsConfig) -> Result<Self, TtsError> {
        let engine = HttpTtsClient::arc(&config)?;
        match &config.voices.data_dir {
            Some(dir) => {
                // 文件读取是阻塞的，在构造时完成，避免落在合成调用的异步任务里
                let catalog = VoiceCatalog::new(Arc::new(FileVoiceSource::new(dir))).arc();
                catalog.preload();
                Ok(Self::with_catalog(engine, catalog))
            }
            None => Ok(Self::with_parts(engine, Arc::new(EmbeddedVoiceSource::new()))),
        }
    }

    /// 使用自定义引擎和音色来源；目录在首次访问时加载
    pub fn with_parts(engine: Arc<dyn TtsEnginePort>, source: Arc<dyn VoiceSourcePort>) -> Self {
        Self::with_catalog(engine, VoiceCatalog::new(source).arc())
    }

    fn with_catalog(engine: Arc<dyn TtsEnginePort>, catalog: Arc<VoiceCatalog>) -> Self {
        let voices: Arc<dyn VoiceDirectoryPort> = VoiceResolver::new(catalog).arc();

        Self {
            synthesize: SynthesizeHandler::new(engine.clone(), voices.clone()),
            synthesize_stream: SynthesizeStreamHandler::new(engine, voices.clone()),
            voice_queries: VoiceQueryHandler::new(voices.clone()),
            voices,
        }
    }

    /// 同步合成，返回完整音频
    pub async fn synthesize(&self, options: SynthesisOptions) -> Result<SynthesisResult, TtsError> {
        self.synthesize.handle(Synthesize::new(options)).await
    }

    /// 流式合成，返回事件流；丢弃即取消
    ///
    /// 必须在 tokio 运行时内调用。
    pub fn synthesize_stream(&self, options: SynthesisOptions) -> Result<AudioStream, TtsError> {
        self.synthesize_stream.handle(SynthesizeStream::new(options))
    }

    /// 流式合成，事件推送给 `sink`
    pub fn synthesize_stream_to(
        &self,
        options: SynthesisOptions,
        sink: impl StreamSink,
    ) -> Result<StreamHandle, TtsError> {
        self.synthesize_stream
            .handle_with_sink(SynthesizeStream::new(options), sink)
    }

    pub fn list_voices(&self, model: &str) -> Vec<VoiceResponse> {
        self.voice_queries.list(ListVoices {
            model: model.to_string(),
        })
    }

    pub fn get_voice(&self, voice_id: &str, model: &str) -> Option<VoiceResponse> {
        self.voice_queries.get(GetVoice {
            voice_id: voice_id.to_string(),
            model: model.to_string(),
        })
    }

    pub fn search_voices(&self, query: &str, model: Option<&str>) -> Vec<VoiceResponse> {
        self.voice_queries.search(SearchVoices {
            query: query.to_string(),
            model: model.map(str::to_string),
        })
    }

    pub fn is_valid_voice(&self, name: &str, model: &str) -> bool {
        self.voice_queries.is_valid(IsValidVoice {
            name: name.to_string(),
            model: model.to_string(),
        })
    }

    /// 音色名 → 服务端音色 ID
    pub fn resolve_voice(&self, name: &str, model: &str) -> String {
        self.voices.resolve(name, &ModelName::new(model))
    }
}
