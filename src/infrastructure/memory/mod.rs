//! In-Memory Structures
//!
//! 进程内共享的只读音色目录及解析器

mod voice_catalog;
mod voice_resolver;

pub use voice_catalog::VoiceCatalog;
pub use voice_resolver::VoiceResolver;
