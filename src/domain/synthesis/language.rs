//! 基于 Unicode 区段的语言检测

/// 某一文字占比超过该阈值即判定为该语言
const SCRIPT_THRESHOLD: f64 = 0.3;

/// 检测文本语言，返回 ISO 639-1 代码（zh / ja / ko / en）
///
/// 空文本或无法判定时返回 `default_lang`。
/// 日文假名优先于汉字判定，因为日文文本通常混有汉字。
pub fn detect_language<'a>(text: &str, default_lang: &'a str) -> &'a str {
    let text = text.trim();
    if text.is_empty() {
        return default_lang;
    }

    let mut total = 0usize;
    let mut chinese = 0usize;
    let mut japanese = 0usize;
    let mut korean = 0usize;
    let mut latin = 0usize;

    for c in text.chars() {
        total += 1;
        match c as u32 {
            0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0xF900..=0xFAFF => chinese += 1,
            0x3040..=0x309F | 0x30A0..=0x30FF => japanese += 1,
            0xAC00..=0xD7AF => korean += 1,
            _ if c.is_ascii_alphabetic() => latin += 1,
            _ => {}
        }
    }

    let ratio = |count: usize| count as f64 / total as f64;

    if ratio(japanese) > SCRIPT_THRESHOLD {
        "ja"
    } else if ratio(korean) > SCRIPT_THRESHOLD {
        "ko"
    } else if ratio(chinese) > SCRIPT_THRESHOLD {
        "zh"
    } else if ratio(latin) > SCRIPT_THRESHOLD {
        "en"
    } else {
        default_lang
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_chinese() {
        assert_eq!(detect_language("你好，世界", "en"), "zh");
    }

    #[test]
    fn test_detect_english() {
        assert_eq!(detect_language("Hello world", "zh"), "en");
    }

    #[test]
    fn test_detect_japanese_over_kanji() {
        assert_eq!(detect_language("こんにちは世界", "zh"), "ja");
    }

    #[test]
    fn test_detect_korean() {
        assert_eq!(detect_language("안녕하세요", "zh"), "ko");
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(detect_language("   ", "zh"), "zh");
        assert_eq!(detect_language("12345 !!!", "zh"), "zh");
    }
}
