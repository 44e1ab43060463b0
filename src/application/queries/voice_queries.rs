//! Voice Queries - 音色查询

/// 列出某模型的音色
#[derive(Debug, Clone)]
pub struct ListVoices {
    pub model: String,
}

/// 获取音色详情
#[derive(Debug, Clone)]
pub struct GetVoice {
    pub voice_id: String,
    pub model: String,
}

/// 搜索音色；`model` 为空时搜索所有模型
#[derive(Debug, Clone)]
pub struct SearchVoices {
    pub query: String,
    pub model: Option<String>,
}

/// 判断音色名是否可用
#[derive(Debug, Clone)]
pub struct IsValidVoice {
    pub name: String,
    pub model: String,
}
