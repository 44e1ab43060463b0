//! 共享的 HTTP 传输：连接池、超时、签名头

use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use super::signer;
use crate::application::error::TtsError;
use crate::config::{CredentialsConfig, EndpointConfig, FlowTtsConfig};

/// 同步合成接口
pub const ACTION_SYNC: &str = "TextToSpeech";
/// 流式合成接口
pub const ACTION_STREAM: &str = "TextToSpeechSSE";

pub struct HttpTransport {
    client: Client,
    credentials: CredentialsConfig,
    endpoint: EndpointConfig,
    request_timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &FlowTtsConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .connect_timeout(config.http.connect_timeout())
            .read_timeout(config.http.read_timeout())
            .build()
            .map_err(|e| TtsError::network_with_source("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            credentials: config.credentials.clone(),
            endpoint: config.endpoint.clone(),
            request_timeout: config.http.request_timeout(),
        })
    }

    pub fn sdk_app_id(&self) -> u64 {
        self.credentials.sdk_app_id
    }

    pub fn region(&self) -> &str {
        &self.endpoint.region
    }

    /// 同步请求的总时限
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn url(&self) -> String {
        self.endpoint.url()
    }

    /// 以当前时间签名并构建 POST 请求
    ///
    /// `body` 原样发送，保证与签名时的字节一致。
    pub fn signed_post(
        &self,
        action: &str,
        body: String,
        extra_headers: &[(&str, &str)],
    ) -> Result<RequestBuilder, TtsError> {
        let timestamp = Utc::now().timestamp();
        let headers = signer::sign(
            &self.credentials.secret_id,
            &self.credentials.secret_key,
            &self.endpoint.host,
            action,
            &body,
            timestamp,
        )?;

        let mut builder = self.client.post(self.url());
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }
        builder = builder.header("X-TC-Region", self.endpoint.region.as_str());
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        Ok(builder.body(body))
    }
}
