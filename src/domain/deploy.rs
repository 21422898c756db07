//! 部署相关领域模型

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::env::constants;

/// 环境层级
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentTier {
    Standard,
    Production,
}

impl EnvironmentTier {
    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentTier::Standard => "standard",
            EnvironmentTier::Production => "production",
        }
    }

    /// 该层级对应的 compose 文件名
    pub fn compose_file_name(&self) -> &'static str {
        match self {
            EnvironmentTier::Standard => constants::DEFAULT_COMPOSE_FILE,
            EnvironmentTier::Production => constants::PROD_COMPOSE_FILE,
        }
    }
}

/// 解析后的项目位置
///
/// 每次操作解析一次，不跨操作共享
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectLocation {
    /// 项目根目录（绝对路径）
    pub root_dir: PathBuf,
    /// compose 文件（绝对路径）
    pub compose_file: PathBuf,
}

impl ProjectLocation {
    /// 从基础目录与可选参数解析项目位置
    ///
    /// 根目录优先级：显式 dir > base/name > base；
    /// 相对的 dir 按 base 解析，相对的 compose 文件按根目录解析
    pub fn resolve(
        base: &Path,
        dir: Option<&Path>,
        name: Option<&str>,
        compose_file: Option<&Path>,
    ) -> Self {
        let root_dir = match (dir, name) {
            (Some(dir), _) => absolutize(base, dir),
            (None, Some(name)) => base.join(name),
            (None, None) => base.to_path_buf(),
        };

        let compose_file = match compose_file {
            Some(file) => absolutize(&root_dir, file),
            None => root_dir.join(constants::DEFAULT_COMPOSE_FILE),
        };

        Self {
            root_dir,
            compose_file,
        }
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// 一次部署尝试的最终结果
///
/// 每次编排恰好产生一个；生成后不再修改，只用于渲染
#[derive(Clone, Debug, Serialize)]
pub struct DeployOutcome {
    pub succeeded: bool,
    pub message: String,
    pub exit_hint: i32,
}

impl DeployOutcome {
    /// 成功结果
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
            exit_hint: 0,
        }
    }

    /// 失败结果
    pub fn failure(message: impl Into<String>, exit_hint: i32) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
            exit_hint,
        }
    }
}

/// 日志行
#[derive(Clone, Debug, Serialize)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub stream: String, // stdout | stderr
    pub content: String,
}

impl LogLine {
    /// 创建新日志行
    pub fn new(stream: &str, content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            stream: stream.to_string(),
            content: content.into(),
        }
    }

    /// 创建 stdout 日志行
    pub fn stdout(content: impl Into<String>) -> Self {
        Self::new("stdout", content)
    }

    /// 创建 stderr 日志行
    pub fn stderr(content: impl Into<String>) -> Self {
        Self::new("stderr", content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_compose_file_name() {
        assert_eq!(
            EnvironmentTier::Standard.compose_file_name(),
            "docker-compose.yml"
        );
        assert_eq!(
            EnvironmentTier::Production.compose_file_name(),
            "docker-compose.prod.yml"
        );
    }

    #[test]
    fn test_resolve_explicit_dir_wins() {
        let location = ProjectLocation::resolve(
            Path::new("/work"),
            Some(Path::new("/srv/app")),
            Some("ignored"),
            None,
        );
        assert_eq!(location.root_dir, PathBuf::from("/srv/app"));
        assert_eq!(
            location.compose_file,
            PathBuf::from("/srv/app/docker-compose.yml")
        );
    }

    #[test]
    fn test_resolve_relative_dir_joins_base() {
        let location =
            ProjectLocation::resolve(Path::new("/work"), Some(Path::new("app")), None, None);
        assert_eq!(location.root_dir, PathBuf::from("/work/app"));
    }

    #[test]
    fn test_resolve_name_under_base() {
        let location = ProjectLocation::resolve(Path::new("/work"), None, Some("demo"), None);
        assert_eq!(location.root_dir, PathBuf::from("/work/demo"));
        assert_eq!(
            location.compose_file,
            PathBuf::from("/work/demo/docker-compose.yml")
        );
    }

    #[test]
    fn test_resolve_defaults_to_base() {
        let location = ProjectLocation::resolve(Path::new("/work"), None, None, None);
        assert_eq!(location.root_dir, PathBuf::from("/work"));
    }

    #[test]
    fn test_resolve_compose_file_override() {
        let relative = ProjectLocation::resolve(
            Path::new("/work"),
            None,
            Some("demo"),
            Some(Path::new("docker-compose.prod.yml")),
        );
        assert_eq!(
            relative.compose_file,
            PathBuf::from("/work/demo/docker-compose.prod.yml")
        );

        let absolute = ProjectLocation::resolve(
            Path::new("/work"),
            None,
            Some("demo"),
            Some(Path::new("/etc/compose/stack.yml")),
        );
        assert_eq!(absolute.compose_file, PathBuf::from("/etc/compose/stack.yml"));
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = DeployOutcome::success("Deploy completed.");
        assert!(ok.succeeded);
        assert_eq!(ok.exit_hint, 0);

        let failed = DeployOutcome::failure("Deploy failed: boom", 1);
        assert!(!failed.succeeded);
        assert_eq!(failed.exit_hint, 1);
        assert_eq!(failed.message, "Deploy failed: boom");
    }

    #[test]
    fn test_log_line_creation() {
        let line = LogLine::stdout("Hello");
        assert_eq!(line.stream, "stdout");
        assert_eq!(line.content, "Hello");

        let line = LogLine::stderr("Error");
        assert_eq!(line.stream, "stderr");
        assert_eq!(line.content, "Error");
    }
}
