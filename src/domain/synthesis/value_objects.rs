//! Synthesis Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::voice::ModelName;

/// 音频编码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    Wav,
    Mp3,
    Pcm,
    OggOpus,
    Flac,
    /// 未内置的编码，原样透传给服务端
    #[serde(untagged)]
    Other(String),
}

impl AudioCodec {
    pub fn parse(codec: &str) -> Self {
        match codec.to_lowercase().as_str() {
            "wav" => Self::Wav,
            "mp3" => Self::Mp3,
            "pcm" => Self::Pcm,
            "ogg_opus" | "opus" => Self::OggOpus,
            "flac" => Self::Flac,
            _ => Self::Other(codec.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
            Self::OggOpus => "ogg_opus",
            Self::Flac => "flac",
            Self::Other(codec) => codec,
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            Self::OggOpus => "ogg",
            other => other.as_str(),
        }
    }
}

impl Default for AudioCodec {
    fn default() -> Self {
        Self::Wav
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 合成参数
///
/// 默认值:
/// - voice: `alloy`
/// - model: `flow-01-turbo`
/// - codec: `wav`（流式合成固定为 `pcm`）
/// - sample_rate: 24000
/// - speed / volume: 1.0（0.5 - 2.0）
/// - pitch: 0（-12 - 12 半音）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisOptions {
    pub text: String,
    pub voice: String,
    pub model: String,
    pub codec: AudioCodec,
    pub sample_rate: u32,
    pub speed: f64,
    pub volume: f64,
    pub pitch: i32,
    /// 语言；为空时根据文本自动检测（仅用于结果标注）
    pub language: Option<String>,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: "alloy".to_string(),
            model: ModelName::TURBO.to_string(),
            codec: AudioCodec::Wav,
            sample_rate: 24000,
            speed: 1.0,
            volume: 1.0,
            pitch: 0,
            language: None,
        }
    }
}

impl SynthesisOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_codec(mut self, codec: AudioCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.text.trim().is_empty() {
            return Err("text cannot be empty");
        }
        if self.voice.trim().is_empty() {
            return Err("voice cannot be empty");
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty");
        }
        if self.sample_rate == 0 {
            return Err("sample_rate must be positive");
        }
        if !(0.5..=2.0).contains(&self.speed) {
            return Err("speed must be between 0.5 and 2.0");
        }
        if !(0.5..=2.0).contains(&self.volume) {
            return Err("volume must be between 0.5 and 2.0");
        }
        if !(-12..=12).contains(&self.pitch) {
            return Err("pitch must be between -12 and 12 semitones");
        }
        Ok(())
    }
}

/// 合成请求
///
/// 每次调用构建一次，音色 ID 已解析为服务端 ID，构建后不可变。
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    text: String,
    voice_id: String,
    model: ModelName,
    codec: AudioCodec,
    sample_rate: u32,
    speed: f64,
    volume: f64,
    pitch: i32,
}

impl SynthesisRequest {
    pub fn new(options: &SynthesisOptions, voice_id: impl Into<String>) -> Self {
        Self {
            text: options.text.clone(),
            voice_id: voice_id.into(),
            model: ModelName::new(&options.model),
            codec: options.codec.clone(),
            sample_rate: options.sample_rate,
            speed: options.speed,
            volume: options.volume,
            pitch: options.pitch,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }

    pub fn codec(&self) -> &AudioCodec {
        &self.codec
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn pitch(&self) -> i32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SynthesisOptions::new("你好");
        assert_eq!(options.voice, "alloy");
        assert_eq!(options.model, "flow-01-turbo");
        assert_eq!(options.codec, AudioCodec::Wav);
        assert_eq!(options.sample_rate, 24000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(SynthesisOptions::new("").validate().is_err());
        assert!(SynthesisOptions::new("   ").validate().is_err());
    }

    #[test]
    fn test_out_of_range_params_rejected() {
        let mut options = SynthesisOptions::new("hi");
        options.speed = 3.0;
        assert!(options.validate().is_err());

        let mut options = SynthesisOptions::new("hi");
        options.volume = 0.1;
        assert!(options.validate().is_err());

        let mut options = SynthesisOptions::new("hi");
        options.pitch = 13;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_codec_parse() {
        assert_eq!(AudioCodec::parse("MP3"), AudioCodec::Mp3);
        assert_eq!(AudioCodec::parse("opus"), AudioCodec::OggOpus);
        assert_eq!(AudioCodec::parse("aac").as_str(), "aac");
        assert_eq!(AudioCodec::OggOpus.extension(), "ogg");
    }

    #[test]
    fn test_request_normalizes_model() {
        let options = SynthesisOptions::new("hi").with_model("flow_01_ex");
        let request = SynthesisRequest::new(&options, "v-male-Bk7vD3xP");
        assert_eq!(request.model().as_str(), "flow-01-ex");
        assert_eq!(request.voice_id(), "v-male-Bk7vD3xP");
    }
}
