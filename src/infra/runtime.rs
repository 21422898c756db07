//! 运行时输出通道
//!
//! 一次操作期间的日志、错误与退出信号出口：
//! CLI 使用控制台实现，聊天路径使用内存收集实现。
//! `exit` 只记录退出请求，是否终止进程由调用方决定

use crate::domain::deploy::LogLine;

/// 运行时输出能力
pub trait RuntimeSink {
    /// 输出一行普通日志
    fn log(&mut self, message: &str);

    /// 输出一行错误
    fn error(&mut self, message: &str);

    /// 请求以指定退出码停止后续处理
    fn exit(&mut self, code: i32);
}

/// 控制台输出通道
///
/// 日志写 stdout、错误写 stderr；退出请求记录首个退出码，
/// 由进程入口在操作结束后统一处理
#[derive(Debug, Default)]
pub struct ConsoleSink {
    exit_request: Option<i32>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 首个被请求的退出码
    pub fn exit_request(&self) -> Option<i32> {
        self.exit_request
    }
}

impl RuntimeSink for ConsoleSink {
    fn log(&mut self, message: &str) {
        println!("{}", message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn exit(&mut self, code: i32) {
        if self.exit_request.is_none() {
            self.exit_request = Some(code);
        }
    }
}

/// 内存收集通道（聊天路径）
///
/// 收集全部输出行，失败时从中提取面向用户的文案
#[derive(Debug, Default)]
pub struct CollectorSink {
    lines: Vec<LogLine>,
    exit_request: Option<i32>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 收集到的全部输出行
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// 首个被请求的退出码
    pub fn exit_request(&self) -> Option<i32> {
        self.exit_request
    }

    /// 第一条错误内容
    pub fn first_error(&self) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.stream == "stderr")
            .map(|line| line.content.as_str())
    }

    /// 面向用户的失败文案：第一条错误，否则带退出码的通用消息
    pub fn failure_message(&self) -> String {
        match self.first_error() {
            Some(error) => error.to_string(),
            None => format!("Deploy failed (exit {})", self.exit_request.unwrap_or(1)),
        }
    }
}

impl RuntimeSink for CollectorSink {
    fn log(&mut self, message: &str) {
        self.lines.push(LogLine::stdout(message));
    }

    fn error(&mut self, message: &str) {
        self.lines.push(LogLine::stderr(message));
    }

    fn exit(&mut self, code: i32) {
        if self.exit_request.is_none() {
            self.exit_request = Some(code);
        }
    }
}
