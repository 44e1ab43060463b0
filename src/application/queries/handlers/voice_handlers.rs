//! Voice Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::ports::VoiceDirectoryPort;
use crate::application::queries::{GetVoice, IsValidVoice, ListVoices, SearchVoices};
use crate::domain::voice::{ModelName, Voice};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音色详情响应
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceResponse {
    pub id: String,
    pub name: String,
    pub language: String,
    pub description: Option<String>,
    pub sample_text: Option<String>,
}

impl From<Voice> for VoiceResponse {
    fn from(voice: Voice) -> Self {
        Self {
            id: voice.id().to_string(),
            name: voice.name().to_string(),
            language: voice.language().to_string(),
            description: voice.description().map(str::to_string),
            sample_text: voice.sample_text().map(str::to_string),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 音色查询 Handler
///
/// 目录只读，所有查询都是同步的。
pub struct VoiceQueryHandler {
    voices: Arc<dyn VoiceDirectoryPort>,
}

impl VoiceQueryHandler {
    pub fn new(voices: Arc<dyn VoiceDirectoryPort>) -> Self {
        Self { voices }
    }

    pub fn list(&self, query: ListVoices) -> Vec<VoiceResponse> {
        self.voices
            .list_voices(&ModelName::new(&query.model))
            .into_iter()
            .map(VoiceResponse::from)
            .collect()
    }

    pub fn get(&self, query: GetVoice) -> Option<VoiceResponse> {
        self.voices
            .get_voice(&query.voice_id, &ModelName::new(&query.model))
            .map(VoiceResponse::from)
    }

    pub fn search(&self, query: SearchVoices) -> Vec<VoiceResponse> {
        let model = query.model.as_deref().map(ModelName::new);
        self.voices
            .search_voices(&query.query, model.as_ref())
            .into_iter()
            .map(VoiceResponse::from)
            .collect()
    }

    pub fn is_valid(&self, query: IsValidVoice) -> bool {
        self.voices
            .is_valid(&query.name, &ModelName::new(&query.model))
    }
}
