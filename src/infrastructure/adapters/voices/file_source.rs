//! File Voice Source - 从目录读取音色目录文件

use std::path::{Path, PathBuf};

use crate::application::ports::VoiceSourcePort;
use crate::domain::voice::{CatalogError, ModelName, Voice};

use super::{catalog_file_name, parse_voice_document};

/// 文件系统音色目录
///
/// 每个模型一个文件：`<dir>/voices-<线上模型名>.json`
///
/// `load` 使用阻塞文件 I/O；`FlowTts::new` 会在构造时预加载。
pub struct FileVoiceSource {
    /// 目录文件所在目录
    dir: PathBuf,
    models: Vec<ModelName>,
}

impl FileVoiceSource {
    /// 使用内置模型列表
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_models(dir, ModelName::builtin())
    }

    pub fn with_models(dir: impl AsRef<Path>, models: Vec<ModelName>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            models,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl VoiceSourcePort for FileVoiceSource {
    fn models(&self) -> Vec<ModelName> {
        self.models.clone()
    }

    fn load(&self, model: &ModelName) -> Result<Vec<Voice>, CatalogError> {
        let path = self.dir.join(catalog_file_name(model));

        let json = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound(model.to_string())
            } else {
                CatalogError::Io {
                    model: model.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        tracing::debug!(model = %model, path = %path.display(), "Loading voice catalog file");
        parse_voice_document(model, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flowtts-voices-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_from_dir() {
        let dir = temp_dir();
        std::fs::write(
            dir.join("voices-flow_01_turbo.json"),
            r#"[{"id":"custom-1","name":"Custom","language":"en"}]"#,
        )
        .unwrap();

        let source = FileVoiceSource::new(&dir);
        let voices = source.load(&ModelName::turbo()).unwrap();
        assert_eq!(voices[0].id(), "custom-1");

        let missing = source.load(&ModelName::ex()).unwrap_err();
        assert!(matches!(missing, CatalogError::NotFound(_)));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_file() {
        let dir = temp_dir();
        std::fs::write(dir.join("voices-flow_01_ex.json"), "[{]").unwrap();

        let err = FileVoiceSource::new(&dir).load(&ModelName::ex()).unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt { .. }));

        std::fs::remove_dir_all(dir).ok();
    }
}
