//! 基础设施模块
//!
//! 封装外部依赖（命令执行、运行时输出通道）

pub mod command;
pub mod runtime;

pub use command::CommandRunner;
pub use runtime::{CollectorSink, ConsoleSink, RuntimeSink};
