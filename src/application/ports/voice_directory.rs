//! Voice Directory Port - 音色解析与查询

use crate::domain::voice::{ModelName, Voice};

/// 音色目录
///
/// 解析调用方给出的音色名，以及列出、查询、搜索音色。
pub trait VoiceDirectoryPort: Send + Sync {
    /// 音色名 → 服务端音色 ID；无法识别时原样返回
    fn resolve(&self, name: &str, model: &ModelName) -> String;

    fn is_valid(&self, name: &str, model: &ModelName) -> bool;

    fn list_voices(&self, model: &ModelName) -> Vec<Voice>;

    fn get_voice(&self, voice_id: &str, model: &ModelName) -> Option<Voice>;

    /// `model` 为 None 时搜索所有模型
    fn search_voices(&self, query: &str, model: Option<&ModelName>) -> Vec<Voice>;
}
