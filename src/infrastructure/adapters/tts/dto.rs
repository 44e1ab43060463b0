//! 线上数据结构
//!
//! 字段名采用服务端的 PascalCase。

use serde::{Deserialize, Serialize};

use crate::application::error::TtsError;

/// 合成请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TtsRequestBody<'a> {
    pub sdk_app_id: u64,
    pub text: &'a str,
    pub model: String,
    pub voice: VoiceBody<'a>,
    pub audio_format: AudioFormatBody<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoiceBody<'a> {
    pub voice_id: &'a str,
    pub speed: f64,
    pub volume: f64,
    pub pitch: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AudioFormatBody<'a> {
    pub format: &'a str,
    pub sample_rate: u32,
}

/// 同步响应外层信封 `{"Response": {...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseEnvelope {
    pub response: ResponseBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseBody {
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

/// 服务端错误 `{"Code": "...", "Message": "..."}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderErrorBody {
    #[serde(default = "default_error_code")]
    pub code: String,
    #[serde(default = "default_error_message")]
    pub message: String,
}

fn default_error_code() -> String {
    "Unknown".to_string()
}

fn default_error_message() -> String {
    "Unknown error".to_string()
}

impl ProviderErrorBody {
    pub fn into_error(self, request_id: Option<String>) -> TtsError {
        TtsError::provider(self.code, self.message, request_id)
    }
}

/// 流式事件的 data 负载
///
/// 错误可能嵌在 `Response.Error` 中，也可能直接出现在顶层 `Error`。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamEventBody {
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default, rename = "Final")]
    pub is_final: Option<serde_json::Value>,
    #[serde(default)]
    pub subtitle_seq: Option<i64>,
    #[serde(default)]
    pub response: Option<ResponseBody>,
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

impl StreamEventBody {
    /// `Final` 接受 `true` 或 `1`
    pub fn is_final(&self) -> bool {
        match &self.is_final {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
            _ => false,
        }
    }

    /// 取出嵌入的服务端错误（若有）
    pub fn take_provider_error(&mut self) -> Option<TtsError> {
        if let Some(response) = self.response.as_mut() {
            if let Some(error) = response.error.take() {
                let request_id = response.request_id.take().or_else(|| self.request_id.clone());
                return Some(error.into_error(request_id));
            }
        }
        self.error
            .take()
            .map(|error| error.into_error(self.request_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_flag_forms() {
        let parse = |s: &str| serde_json::from_str::<StreamEventBody>(s).unwrap().is_final();
        assert!(parse(r#"{"Final":1}"#));
        assert!(parse(r#"{"Final":true}"#));
        assert!(!parse(r#"{"Final":0}"#));
        assert!(!parse(r#"{"Final":false}"#));
        assert!(!parse(r#"{"Audio":"AQID"}"#));
    }

    #[test]
    fn test_nested_error_prefers_inner_request_id() {
        let mut event: StreamEventBody = serde_json::from_str(
            r#"{"RequestId":"outer","Response":{"RequestId":"inner","Error":{"Code":"AuthFailure","Message":"bad"}}}"#,
        )
        .unwrap();
        let err = event.take_provider_error().unwrap();
        assert_eq!(err.code(), Some("AuthFailure"));
        assert_eq!(err.request_id(), Some("inner"));
    }

    #[test]
    fn test_top_level_error() {
        let mut event: StreamEventBody =
            serde_json::from_str(r#"{"RequestId":"r-9","Error":{"Message":"quota"}}"#).unwrap();
        let err = event.take_provider_error().unwrap();
        assert_eq!(err.code(), Some("Unknown"));
        assert_eq!(err.request_id(), Some("r-9"));
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_no_error() {
        let mut event: StreamEventBody =
            serde_json::from_str(r#"{"Audio":"AQID","RequestId":"r","SubtitleSeq":3}"#).unwrap();
        assert!(event.take_provider_error().is_none());
        assert_eq!(event.subtitle_seq, Some(3));
    }
}
