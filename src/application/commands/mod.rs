//! 应用层 - 命令
//!
//! CQRS 命令侧：发起合成调用

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
