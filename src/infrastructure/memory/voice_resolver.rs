//! Voice Resolver - 音色名称解析
//!
//! 解析顺序:
//! 1. 可移植别名（大小写不敏感，不加载目录）
//! 2. 目录中该模型的音色 ID（原样返回）
//! 3. 原样直通

use std::sync::Arc;

use super::VoiceCatalog;
use crate::application::ports::VoiceDirectoryPort;
use crate::domain::voice::{lookup_alias, ModelName, Voice};

/// 音色解析器
pub struct VoiceResolver {
    catalog: Arc<VoiceCatalog>,
}

impl VoiceResolver {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn catalog(&self) -> &Arc<VoiceCatalog> {
        &self.catalog
    }

    /// 把音色名解析为服务端音色 ID
    ///
    /// 无法识别的名称原样返回，不报错。
    pub fn resolve(&self, name: &str, model: &ModelName) -> String {
        if let Some(voice_id) = lookup_alias(name) {
            return voice_id.to_string();
        }

        if self.catalog.contains(model, name) {
            return name.to_string();
        }

        // 未识别的名称直接交给服务端校验
        tracing::debug!(voice = %name, model = %model, "Voice not recognized, passing through");
        name.to_string()
    }

    /// 别名或该模型目录中的音色 ID
    pub fn is_valid(&self, name: &str, model: &ModelName) -> bool {
        lookup_alias(name).is_some() || self.catalog.contains(model, name)
    }

    pub fn list_voices(&self, model: &ModelName) -> Vec<Voice> {
        self.catalog.voices(model)
    }

    pub fn get_voice(&self, voice_id: &str, model: &ModelName) -> Option<Voice> {
        self.catalog.get(model, voice_id)
    }

    pub fn search_voices(&self, query: &str, model: Option<&ModelName>) -> Vec<Voice> {
        self.catalog.search(query, model)
    }
}

impl VoiceDirectoryPort for VoiceResolver {
    fn resolve(&self, name: &str, model: &ModelName) -> String {
        VoiceResolver::resolve(self, name, model)
    }

    fn is_valid(&self, name: &str, model: &ModelName) -> bool {
        VoiceResolver::is_valid(self, name, model)
    }

    fn list_voices(&self, model: &ModelName) -> Vec<Voice> {
        VoiceResolver::list_voices(self, model)
    }

    fn get_voice(&self, voice_id: &str, model: &ModelName) -> Option<Voice> {
        VoiceResolver::get_voice(self, voice_id, model)
    }

    fn search_voices(&self, query: &str, model: Option<&ModelName>) -> Vec<Voice> {
        VoiceResolver::search_voices(self, query, model)
    }
}
