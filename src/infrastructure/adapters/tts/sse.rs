//! Server-Sent Events 增量解码
//!
//! 只关心 `data` 字段：注释行和其他字段被忽略，多行 data 以 `\n` 拼接，
//! 空行结束一个事件。兼容 CRLF。

use crate::application::error::TtsError;

/// 单行上限，超出视为帧错误
const MAX_LINE_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送入一段字节，返回其中已完整的事件负载
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<String>, TtsError> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]);
            self.process_line(line.strip_suffix('\r').unwrap_or(&line), &mut events);
        }

        if self.buffer.len() > MAX_LINE_SIZE {
            self.buffer.clear();
            return Err(TtsError::network(format!(
                "SSE line exceeds {} bytes",
                MAX_LINE_SIZE
            )));
        }

        Ok(events)
    }

    /// 连接结束时调用：未以空行结束的事件也会返回
    pub fn finish(&mut self) -> Option<String> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest);
            let mut events = Vec::new();
            self.process_line(line.strip_suffix('\r').unwrap_or(&line), &mut events);
            if let Some(event) = events.pop() {
                return Some(event);
            }
        }
        self.take_event()
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<String>) {
        if line.is_empty() {
            if let Some(event) = self.take_event() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data_lines.push(value.to_string());
        }
    }

    fn take_event(&mut self) -> Option<String> {
        if self.data_lines.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.data_lines).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"a\":1}\n\n").unwrap();
        assert_eq!(events, vec![r#"{"a":1}"#]);
    }

    #[test]
    fn test_split_across_feeds() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: hel").unwrap().is_empty());
        assert!(decoder.feed(b"lo\n").unwrap().is_empty());
        assert_eq!(decoder.feed(b"\n").unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_multibyte_split() {
        let bytes = "data: 你好\n\n".as_bytes();
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(&bytes[..8]).unwrap().is_empty());
        assert_eq!(decoder.feed(&bytes[8..]).unwrap(), vec!["你好"]);
    }

    #[test]
    fn test_comments_and_other_fields_ignored() {
        let mut decoder = SseDecoder::new();
        let events = decoder
            .feed(b": keep-alive\nevent: audio\nid: 7\ndata: x\n\n")
            .unwrap();
        assert_eq!(events, vec!["x"]);
    }

    #[test]
    fn test_multiline_data_and_crlf() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: a\r\ndata:b\r\n\r\ndata: [DONE]\r\n\r\n").unwrap();
        assert_eq!(events, vec!["a\nb", "[DONE]"]);
    }

    #[test]
    fn test_blank_lines_without_data() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"\n\n: ping\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_finish_flushes_pending() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: tail").unwrap().is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);

        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: x\n").unwrap().is_empty());
        assert_eq!(decoder.finish(), Some("x".to_string()));
    }
}
