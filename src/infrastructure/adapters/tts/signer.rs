//! TC3-HMAC-SHA256 请求签名
//!
//! 纯函数：相同输入得到相同的 Authorization，无任何 I/O。

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::application::error::TtsError;

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const SERVICE: &str = "trtc";
pub const API_VERSION: &str = "2019-07-22";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

const SIGNED_HEADERS: &str = "content-type;host";
const REQUEST_TYPE: &str = "tc3_request";

/// 签名错误
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("timestamp {0} is out of range")]
    InvalidTimestamp(i64),

    #[error("HMAC initialization failed: {0}")]
    Hmac(String),
}

impl From<SigningError> for TtsError {
    fn from(err: SigningError) -> Self {
        TtsError::InvalidArgument(err.to_string())
    }
}

/// 签名后的请求头（按名称排序，名称唯一）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders(BTreeMap<String, String>);

impl SignedHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn authorization(&self) -> &str {
        self.get("Authorization").unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 规范请求串
///
/// 方法固定 POST，URI 固定 `/`，查询串为空；头部块之后的空行不可省略。
pub fn canonical_request(host: &str, payload: &str) -> String {
    format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        host,
        SIGNED_HEADERS,
        sha256_hex(payload)
    )
}

/// 凭证范围：`<date>/trtc/tc3_request`
pub fn credential_scope(date: &str) -> String {
    format!("{}/{}/{}", date, SERVICE, REQUEST_TYPE)
}

/// 待签名串
pub fn string_to_sign(timestamp: i64, scope: &str, canonical_request: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        scope,
        sha256_hex(canonical_request)
    )
}

/// 计算请求头
///
/// # 参数
/// - `secret_id` / `secret_key` - 云 API 密钥
/// - `host` - 请求域名（同时作为 Host 头参与签名）
/// - `action` - 接口名（`TextToSpeech` / `TextToSpeechSSE`）
/// - `payload` - 序列化后的请求体，必须与实际发送的字节一致
/// - `timestamp` - Unix 秒
pub fn sign(
    secret_id: &str,
    secret_key: &str,
    host: &str,
    action: &str,
    payload: &str,
    timestamp: i64,
) -> Result<SignedHeaders, SigningError> {
    let date = chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or(SigningError::InvalidTimestamp(timestamp))?
        .format("%Y-%m-%d")
        .to_string();

    let canonical = canonical_request(host, payload);
    let scope = credential_scope(&date);
    let to_sign = string_to_sign(timestamp, &scope, &canonical);

    let secret_date = hmac_sha256(format!("TC3{}", secret_key).as_bytes(), &date)?;
    let secret_service = hmac_sha256(&secret_date, SERVICE)?;
    let secret_signing = hmac_sha256(&secret_service, REQUEST_TYPE)?;
    let signature = hex::encode(hmac_sha256(&secret_signing, &to_sign)?);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, secret_id, scope, SIGNED_HEADERS, signature
    );

    let mut headers = BTreeMap::new();
    headers.insert("Authorization".to_string(), authorization);
    headers.insert("Content-Type".to_string(), CONTENT_TYPE.to_string());
    headers.insert("Host".to_string(), host.to_string());
    headers.insert("X-TC-Action".to_string(), action.to_string());
    headers.insert("X-TC-Timestamp".to_string(), timestamp.to_string());
    headers.insert("X-TC-Version".to_string(), API_VERSION.to_string());

    Ok(SignedHeaders(headers))
}

fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

fn hmac_sha256(key: &[u8], data: &str) -> Result<Vec<u8>, SigningError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SigningError::Hmac(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_ID: &str = "test-secret-id-for-unit-test";
    const SECRET_KEY: &str = "test-secret-key-for-unit-test";
    const HOST: &str = "trtc.ai.tencentcloudapi.com";
    const PAYLOAD: &str = r#"{"Text":"Hello"}"#;
    const TIMESTAMP: i64 = 1704067200;

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            sha256_hex("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_canonical_request_layout() {
        let canonical = canonical_request(HOST, PAYLOAD);
        assert_eq!(
            canonical,
            "POST\n/\n\ncontent-type:application/json; charset=utf-8\nhost:trtc.ai.tencentcloudapi.com\n\ncontent-type;host\n083286b058473119e787594eb8adfc9af8ccfb6514f679671aa47b23372beb4f"
        );
        assert_eq!(
            sha256_hex(&canonical),
            "976909715713a05f6db406ec6a4e57f8042027cc972556f45eecfbf0dc2552af"
        );
    }

    #[test]
    fn test_golden_signature() {
        let headers = sign(SECRET_ID, SECRET_KEY, HOST, "TextToSpeech", PAYLOAD, TIMESTAMP).unwrap();
        assert_eq!(
            headers.authorization(),
            "TC3-HMAC-SHA256 Credential=test-secret-id-for-unit-test/2024-01-01/trtc/tc3_request, \
             SignedHeaders=content-type;host, \
             Signature=3a183cf7df53855671b0ad52f100cdbbb6e431cba9d3ae01cc6e23542bfa6446"
        );
    }

    #[test]
    fn test_header_set() {
        let headers = sign(SECRET_ID, SECRET_KEY, HOST, "TextToSpeech", PAYLOAD, TIMESTAMP).unwrap();
        let keys: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Authorization",
                "Content-Type",
                "Host",
                "X-TC-Action",
                "X-TC-Timestamp",
                "X-TC-Version"
            ]
        );
        assert_eq!(headers.get("Content-Type"), Some("application/json; charset=utf-8"));
        assert_eq!(headers.get("Host"), Some(HOST));
        assert_eq!(headers.get("X-TC-Action"), Some("TextToSpeech"));
        assert_eq!(headers.get("X-TC-Timestamp"), Some("1704067200"));
        assert_eq!(headers.get("X-TC-Version"), Some("2019-07-22"));
    }

    #[test]
    fn test_deterministic() {
        let a = sign("id", "key", HOST, "TextToSpeech", r#"{"key":"value"}"#, TIMESTAMP).unwrap();
        let b = sign("id", "key", HOST, "TextToSpeech", r#"{"key":"value"}"#, TIMESTAMP).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_timestamp_freshness() {
        let a = sign("id", "key", HOST, "TextToSpeech", r#"{"key":"value"}"#, TIMESTAMP).unwrap();
        let b = sign("id", "key", HOST, "TextToSpeech", r#"{"key":"value"}"#, TIMESTAMP + 1).unwrap();
        assert_ne!(a.authorization(), b.authorization());
    }

    #[test]
    fn test_stream_action_not_signed() {
        // action 只出现在请求头中，不参与签名
        let sync = sign("id", "key", HOST, "TextToSpeech", "{}", TIMESTAMP).unwrap();
        let stream = sign("id", "key", HOST, "TextToSpeechSSE", "{}", TIMESTAMP).unwrap();
        assert_eq!(stream.get("X-TC-Action"), Some("TextToSpeechSSE"));
        assert_eq!(sync.authorization(), stream.authorization());
    }

    #[test]
    fn test_date_boundary_uses_utc() {
        // 2023-12-31T23:59:59Z
        let headers = sign("id", "key", HOST, "TextToSpeech", "{}", TIMESTAMP - 1).unwrap();
        assert!(headers.authorization().contains("/2023-12-31/trtc/tc3_request"));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let err = sign("id", "key", HOST, "TextToSpeech", "{}", i64::MAX).unwrap_err();
        assert!(matches!(err, SigningError::InvalidTimestamp(_)));
    }
}
