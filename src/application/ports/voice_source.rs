//! Voice Source Port - 音色目录数据来源

use crate::domain::voice::{CatalogError, ModelName, Voice};

/// 音色目录数据来源
///
/// 实现方负责读取并解析某个模型的音色列表；失败只影响该模型。
pub trait VoiceSourcePort: Send + Sync {
    /// 该来源提供的模型
    fn models(&self) -> Vec<ModelName>;

    /// 加载某个模型的音色（保持文件中的顺序）
    fn load(&self, model: &ModelName) -> Result<Vec<Voice>, CatalogError>;
}
