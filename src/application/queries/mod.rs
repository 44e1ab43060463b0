//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音色目录的只读查询

mod voice_queries;

pub mod handlers;

pub use voice_queries::*;
