//! TTS Adapter - TRTC AI 语音合成客户端实现

mod dto;
mod fake_tts_client;
mod http_tts_client;
mod request_builder;
mod signer;
mod sse;
mod stream_client;
mod stream_processor;
mod sync_client;
mod transport;

pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
pub use http_tts_client::HttpTtsClient;
pub use request_builder::{build_request_body, STREAM_FORMAT};
pub use signer::{sign, SignedHeaders, SigningError, API_VERSION, CONTENT_TYPE};
pub use stream_processor::{StreamProcessor, StreamState};
pub use transport::{ACTION_STREAM, ACTION_SYNC};
