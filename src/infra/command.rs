//! 命令执行器
//!
//! 提供部署所需的外部命令执行接口：
//! - 捕获 stdout/stderr 输出
//! - 非零退出码视为错误
//! - 按序尝试候选可执行文件，首个成功即停止

use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use tracing::debug;

/// 命令执行错误
#[derive(Debug)]
pub enum CommandError {
    /// 命令启动失败
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },
    /// 命令以非零退出码结束
    ExitFailure {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    /// 没有可尝试的候选命令
    NoCandidates,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::SpawnFailed { program, source } => {
                write!(f, "Failed to spawn {}: {}", program, source)
            }
            CommandError::ExitFailure {
                program,
                code,
                stderr,
            } => {
                match code {
                    Some(code) => write!(f, "{} exited with code {}", program, code)?,
                    None => write!(f, "{} was terminated by a signal", program)?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            CommandError::NoCandidates => write!(f, "No command candidates to run"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::SpawnFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 命令执行器
pub struct CommandRunner;

impl CommandRunner {
    /// 执行命令并捕获输出，非零退出码视为错误
    pub async fn run_checked(
        program: &str,
        args: &[String],
        work_dir: &Path,
    ) -> Result<Output, CommandError> {
        let output = Command::new(program)
            .args(args)
            .current_dir(work_dir)
            .output()
            .await
            .map_err(|source| CommandError::SpawnFailed {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(CommandError::ExitFailure {
                program: program.to_string(),
                code: output.status.code(),
                stderr: stderr_excerpt(&output.stderr),
            })
        }
    }

    /// 按序尝试候选可执行文件，返回首个成功的输出
    ///
    /// 任一候选启动失败或非零退出都转入下一个候选；
    /// 全部失败时返回最后一次的错误
    pub async fn run_first_success(
        candidates: &[String],
        args: &[String],
        work_dir: &Path,
    ) -> Result<Output, CommandError> {
        let mut last_error = None;

        for candidate in candidates {
            debug!(program = %candidate, "Attempting command candidate");
            match Self::run_checked(candidate, args, work_dir).await {
                Ok(output) => return Ok(output),
                Err(e) => {
                    debug!(program = %candidate, error = %e, "Command candidate failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CommandError::NoCandidates))
    }
}

/// 取 stderr 最后一行非空内容作为错误摘要
fn stderr_excerpt(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}
