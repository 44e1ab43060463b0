//! 合成请求体构建

use super::dto::{AudioFormatBody, TtsRequestBody, VoiceBody};
use crate::application::error::TtsError;
use crate::domain::synthesis::SynthesisRequest;

/// 流式合成的音频格式
pub const STREAM_FORMAT: &str = "pcm";

/// 构建 JSON 请求体
///
/// 流式请求的音频格式固定为 PCM，同步请求原样使用调用方的编码。
/// 返回的字符串即签名和发送的字节。
pub fn build_request_body(
    sdk_app_id: u64,
    request: &SynthesisRequest,
    streaming: bool,
) -> Result<String, TtsError> {
    if request.text().trim().is_empty() {
        return Err(TtsError::invalid_argument("text cannot be empty"));
    }

    let format = if streaming {
        STREAM_FORMAT
    } else {
        request.codec().as_str()
    };

    let body = TtsRequestBody {
        sdk_app_id,
        text: request.text(),
        model: request.model().wire_name(),
        voice: VoiceBody {
            voice_id: request.voice_id(),
            speed: request.speed(),
            volume: request.volume(),
            pitch: request.pitch(),
        },
        audio_format: AudioFormatBody {
            format,
            sample_rate: request.sample_rate(),
        },
    };

    serde_json::to_string(&body)
        .map_err(|e| TtsError::invalid_argument(format!("Failed to serialize request: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::{AudioCodec, SynthesisOptions};
    use serde_json::Value;

    fn request(text: &str, codec: AudioCodec) -> SynthesisRequest {
        let options = SynthesisOptions::new(text).with_codec(codec);
        SynthesisRequest::new(&options, "v-female-R2s4N9qJ")
    }

    #[test]
    fn test_body_shape() {
        let body = build_request_body(1400000000, &request("你好", AudioCodec::Mp3), false).unwrap();
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["SdkAppId"], 1400000000u64);
        assert_eq!(json["Text"], "你好");
        assert_eq!(json["Model"], "flow_01_turbo");
        assert_eq!(json["Voice"]["VoiceId"], "v-female-R2s4N9qJ");
        assert_eq!(json["Voice"]["Speed"], 1.0);
        assert_eq!(json["Voice"]["Volume"], 1.0);
        assert_eq!(json["Voice"]["Pitch"], 0);
        assert_eq!(json["AudioFormat"]["Format"], "mp3");
        assert_eq!(json["AudioFormat"]["SampleRate"], 24000);
    }

    #[test]
    fn test_streaming_forces_pcm() {
        let body = build_request_body(1, &request("hi", AudioCodec::Wav), true).unwrap();
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["AudioFormat"]["Format"], "pcm");
    }

    #[test]
    fn test_custom_codec_verbatim() {
        let body =
            build_request_body(1, &request("hi", AudioCodec::Other("aac".into())), false).unwrap();
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["AudioFormat"]["Format"], "aac");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = build_request_body(1, &request("   ", AudioCodec::Wav), false).unwrap_err();
        assert!(matches!(err, TtsError::InvalidArgument(_)));
    }
}
