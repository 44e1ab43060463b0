//! Voice Context - Value Objects

use std::fmt;

/// OpenAI 风格音色名 -> 腾讯云音色 ID
///
/// 大小写不敏感，查表不需要加载音色目录。
pub const PORTABLE_ALIASES: &[(&str, &str)] = &[
    ("alloy", "v-male-W1tH9jVc"),
    ("echo", "v-male-Bk7vD3xP"),
    ("fable", "v-male-s5NqE0rZ"),
    ("onyx", "v-male-Bk7vD3xP"),
    ("nova", "v-female-R2s4N9qJ"),
    ("shimmer", "v-female-m1KpW7zE"),
];

/// 按别名查找音色 ID
pub fn lookup_alias(name: &str) -> Option<&'static str> {
    PORTABLE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, id)| *id)
}

/// 模型名称
///
/// 用户形式为 `flow-01-turbo`，线上形式为 `flow_01_turbo`，两种写法视为同一模型。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

impl ModelName {
    pub const TURBO: &'static str = "flow-01-turbo";
    pub const EX: &'static str = "flow-01-ex";

    pub fn new(name: &str) -> Self {
        Self(name.trim().replace('_', "-"))
    }

    pub fn turbo() -> Self {
        Self(Self::TURBO.to_string())
    }

    pub fn ex() -> Self {
        Self(Self::EX.to_string())
    }

    /// 内置的全部模型
    pub fn builtin() -> Vec<Self> {
        vec![Self::turbo(), Self::ex()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 请求体中使用的形式（连字符转下划线）
    pub fn wire_name(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl Default for ModelName {
    fn default() -> Self {
        Self::turbo()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_case_insensitive() {
        assert_eq!(lookup_alias("ALLOY"), Some("v-male-W1tH9jVc"));
        assert_eq!(lookup_alias("alloy"), Some("v-male-W1tH9jVc"));
        assert_eq!(lookup_alias("Shimmer"), Some("v-female-m1KpW7zE"));
        assert_eq!(lookup_alias("v-male-W1tH9jVc"), None);
    }

    #[test]
    fn test_model_name_forms() {
        let user = ModelName::new("flow-01-turbo");
        let wire = ModelName::new("flow_01_turbo");

        assert_eq!(user, wire);
        assert_eq!(user.as_str(), "flow-01-turbo");
        assert_eq!(wire.wire_name(), "flow_01_turbo");
    }
}
