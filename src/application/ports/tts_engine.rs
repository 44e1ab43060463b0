//! TTS Engine Port - 合成引擎抽象
//!
//! 定义合成调用的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;

use super::StreamHandle;
use crate::application::error::TtsError;
use crate::domain::synthesis::{AudioChunk, SynthesisRequest, SynthesisResult};

/// 流式结果接收方
///
/// 收到有序的分片，随后恰好一次 `on_complete` 或 `on_error`，二者不会同时出现，
/// 终止信号之后不再有分片。回调在传输任务上执行，不能长时间阻塞。
pub trait StreamSink: Send + 'static {
    fn on_chunk(&mut self, chunk: AudioChunk);

    fn on_complete(&mut self);

    fn on_error(&mut self, error: TtsError);
}

/// TTS Engine Port
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 同步合成：一次请求，返回完整音频
    async fn synthesize(
        &self,
        request: SynthesisRequest,
        session_id: &str,
    ) -> Result<SynthesisResult, TtsError>;

    /// 打开流式合成
    ///
    /// 请求构建失败时直接返回错误；连接及之后的失败通过 `sink` 送达。
    fn open_stream(
        &self,
        request: SynthesisRequest,
        session_id: String,
        sink: Box<dyn StreamSink>,
    ) -> Result<StreamHandle, TtsError>;
}
