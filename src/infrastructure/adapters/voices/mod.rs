//! Voice Source Adapters - 音色目录数据来源实现

mod embedded_source;
mod file_source;

pub use embedded_source::EmbeddedVoiceSource;
pub use file_source::FileVoiceSource;

use serde::Deserialize;

use crate::domain::voice::{CatalogError, ModelName, Voice};

/// 目录文件的两种形式：裸数组，或 `{"voices": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
enum VoiceDocument {
    List(Vec<Voice>),
    Wrapped { voices: Vec<Voice> },
}

/// 目录文件名：`voices-<线上模型名>.json`
pub fn catalog_file_name(model: &ModelName) -> String {
    format!("voices-{}.json", model.wire_name())
}

/// 解析某个模型的目录 JSON
pub fn parse_voice_document(model: &ModelName, json: &str) -> Result<Vec<Voice>, CatalogError> {
    let document: VoiceDocument =
        serde_json::from_str(json).map_err(|e| CatalogError::Corrupt {
            model: model.to_string(),
            reason: e.to_string(),
        })?;

    Ok(match document {
        VoiceDocument::List(voices) => voices,
        VoiceDocument::Wrapped { voices } => voices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let json = r#"[{"id":"v1","name":"A","language":"zh"}]"#;
        let voices = parse_voice_document(&ModelName::turbo(), json).unwrap();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].id(), "v1");
    }

    #[test]
    fn test_parse_wrapped() {
        let json = r#"{"voices":[{"id":"v1","name":"A"},{"id":"v2","name":"B"}]}"#;
        let voices = parse_voice_document(&ModelName::ex(), json).unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].id(), "v2");
    }

    #[test]
    fn test_parse_corrupt() {
        let err = parse_voice_document(&ModelName::turbo(), "{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));
    }

    #[test]
    fn test_catalog_file_name() {
        assert_eq!(catalog_file_name(&ModelName::turbo()), "voices-flow_01_turbo.json");
    }
}
