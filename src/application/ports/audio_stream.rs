//! 流式合成的异步消费接口
//!
//! `AudioStream` 是一个可取消的事件通道：若干 `Chunk`，随后恰好一个
//! `Completed` 或 `Failed`。

use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::StreamSink;
use crate::application::error::TtsError;
use crate::domain::synthesis::AudioChunk;

/// 流式事件
#[derive(Debug)]
pub enum StreamEvent {
    Chunk(AudioChunk),
    Completed,
    Failed(TtsError),
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Chunk(_))
    }
}

/// 把 sink 回调转成通道事件
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<StreamEvent>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::UnboundedSender<StreamEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: StreamEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Stream receiver dropped, discarding event");
        }
    }
}

impl StreamSink for ChannelSink {
    fn on_chunk(&mut self, chunk: AudioChunk) {
        self.send(StreamEvent::Chunk(chunk));
    }

    fn on_complete(&mut self) {
        self.send(StreamEvent::Completed);
    }

    fn on_error(&mut self, error: TtsError) {
        self.send(StreamEvent::Failed(error));
    }
}

/// 进行中的流式调用句柄
///
/// 取消会关闭底层连接，之后不再向 sink 投递任何事件。
/// 丢弃句柄不会取消调用。
#[derive(Debug)]
pub struct StreamHandle {
    session_id: String,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl StreamHandle {
    pub fn new(session_id: String, cancel: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            session_id,
            cancel,
            task,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 等待传输任务结束
    pub async fn wait(self) {
        if let Err(e) = self.task.await {
            tracing::warn!(session_id = %self.session_id, error = %e, "Stream task aborted");
        }
    }
}

/// 流式合成结果
///
/// 同时实现了 `futures::Stream<Item = StreamEvent>`。丢弃即取消。
pub struct AudioStream {
    receiver: mpsc::UnboundedReceiver<StreamEvent>,
    handle: StreamHandle,
}

impl AudioStream {
    pub fn new(receiver: mpsc::UnboundedReceiver<StreamEvent>, handle: StreamHandle) -> Self {
        Self { receiver, handle }
    }

    pub fn session_id(&self) -> &str {
        self.handle.session_id()
    }

    /// 下一个事件；终止事件之后返回 `None`
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// 拼接所有分片音频直到完成
    pub async fn collect_audio(mut self) -> Result<Vec<u8>, TtsError> {
        let mut audio = Vec::new();
        while let Some(event) = self.next_event().await {
            match event {
                StreamEvent::Chunk(chunk) => audio.extend_from_slice(&chunk.audio),
                StreamEvent::Completed => return Ok(audio),
                StreamEvent::Failed(e) => return Err(e),
            }
        }
        Err(TtsError::network("stream closed before completion"))
    }
}

impl Stream for AudioStream {
    type Item = StreamEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for AudioStream {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn chunk(audio: &[u8], is_final: bool) -> AudioChunk {
        AudioChunk {
            audio: audio.to_vec(),
            request_id: Some("req-1".to_string()),
            session_id: "session-1".to_string(),
            subtitle_seq: 0,
            is_final,
        }
    }

    fn stream_with(events: Vec<StreamEvent>) -> AudioStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);
        for event in events {
            match event {
                StreamEvent::Chunk(c) => sink.on_chunk(c),
                StreamEvent::Completed => sink.on_complete(),
                StreamEvent::Failed(e) => sink.on_error(e),
            }
        }
        let handle = StreamHandle::new(
            "session-1".to_string(),
            CancellationToken::new(),
            tokio::spawn(async {}),
        );
        AudioStream::new(rx, handle)
    }

    #[tokio::test]
    async fn test_collect_audio_concatenates() {
        let stream = stream_with(vec![
            StreamEvent::Chunk(chunk(&[1, 2], false)),
            StreamEvent::Chunk(chunk(&[3], true)),
            StreamEvent::Completed,
        ]);
        assert_eq!(stream.collect_audio().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_collect_audio_surfaces_error() {
        let stream = stream_with(vec![
            StreamEvent::Chunk(chunk(&[1], false)),
            StreamEvent::Failed(TtsError::provider("Err", "boom", None)),
        ]);
        let err = stream.collect_audio().await.unwrap_err();
        assert_eq!(err.code(), Some("Err"));
    }

    #[tokio::test]
    async fn test_stream_trait_yields_events_in_order() {
        let stream = stream_with(vec![
            StreamEvent::Chunk(chunk(&[1], false)),
            StreamEvent::Completed,
        ]);
        let events: Vec<StreamEvent> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(!events[0].is_terminal());
        assert!(events[1].is_terminal());
    }

    #[tokio::test]
    async fn test_drop_cancels() {
        let token = CancellationToken::new();
        let (_tx, rx) = mpsc::unbounded_channel();
        let handle = StreamHandle::new("s".to_string(), token.clone(), tokio::spawn(async {}));
        drop(AudioStream::new(rx, handle));
        assert!(token.is_cancelled());
    }
}
