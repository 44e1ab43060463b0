//! Voice Context - Aggregate Root

use serde::{Deserialize, Serialize};

/// 音色元数据
///
/// 从音色目录 JSON 加载，加载后只读。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    id: String,
    name: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    sample_text: Option<String>,
}

impl Voice {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language: language.into(),
            description: None,
            sample_text: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sample_text(mut self, sample_text: impl Into<String>) -> Self {
        self.sample_text = Some(sample_text.into());
        self
    }

    /// 名称、语言、描述中任一包含 `needle`（调用方负责转小写）
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.language.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    // Getters
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn sample_text(&self) -> Option<&str> {
        self.sample_text.as_deref()
    }
}
