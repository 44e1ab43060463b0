//! Embedded Voice Source - 随 crate 一起发布的音色目录

use crate::application::ports::VoiceSourcePort;
use crate::domain::voice::{CatalogError, ModelName, Voice};

use super::parse_voice_document;

const TURBO_VOICES: &str = include_str!("../../../../data/voices-flow_01_turbo.json");
const EX_VOICES: &str = include_str!("../../../../data/voices-flow_01_ex.json");

/// 内置音色目录
#[derive(Debug, Default, Clone)]
pub struct EmbeddedVoiceSource;

impl EmbeddedVoiceSource {
    pub fn new() -> Self {
        Self
    }
}

impl VoiceSourcePort for EmbeddedVoiceSource {
    fn models(&self) -> Vec<ModelName> {
        ModelName::builtin()
    }

    fn load(&self, model: &ModelName) -> Result<Vec<Voice>, CatalogError> {
        let json = match model.as_str() {
            ModelName::TURBO => TURBO_VOICES,
            ModelName::EX => EX_VOICES,
            _ => return Err(CatalogError::NotFound(model.to_string())),
        };
        parse_voice_document(model, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalogs_parse() {
        let source = EmbeddedVoiceSource::new();
        for model in source.models() {
            let voices = source.load(&model).unwrap();
            assert!(!voices.is_empty(), "{} has no voices", model);
        }
    }

    #[test]
    fn test_turbo_contains_alias_targets() {
        let voices = EmbeddedVoiceSource::new().load(&ModelName::turbo()).unwrap();
        assert!(voices.iter().any(|v| v.id() == "v-female-R2s4N9qJ"));
        assert!(voices.iter().any(|v| v.id() == "v-male-Bk7vD3xP"));
    }

    #[test]
    fn test_unknown_model() {
        let err = EmbeddedVoiceSource::new()
            .load(&ModelName::new("flow-02"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
