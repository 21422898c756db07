//! 环境变量配置加载

use std::env;

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// docker 可执行文件主路径（优先尝试，失败后回退到 PATH 解析）
    pub docker_path: String,
    /// 聊天部署使用的工作区根目录
    pub workspace: Option<String>,
    /// 是否允许自由文本聊天命令
    pub allow_text_commands: bool,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let docker_path = env::var("DEPLOYBOT_DOCKER_PATH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| constants::DEFAULT_DOCKER_PATH.to_string());

        let workspace = env::var("DEPLOYBOT_WORKSPACE")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let allow_text_commands = env::var("DEPLOYBOT_TEXT_COMMANDS")
            .ok()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Self {
            docker_path,
            workspace,
            allow_text_commands,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            docker_path: constants::DEFAULT_DOCKER_PATH.to_string(),
            workspace: None,
            allow_text_commands: true,
        }
    }
}

/// 常量
pub mod constants {
    /// 默认 docker 可执行文件路径
    pub const DEFAULT_DOCKER_PATH: &str = "/usr/bin/docker";

    /// docker 回退命令名（依赖 PATH 解析）
    pub const DOCKER_FALLBACK: &str = "docker";

    /// 默认 compose 文件名
    pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

    /// 生产环境 compose 文件名
    pub const PROD_COMPOSE_FILE: &str = "docker-compose.prod.yml";

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EnvConfig::default();
        assert_eq!(cfg.docker_path, constants::DEFAULT_DOCKER_PATH);
        assert!(cfg.workspace.is_none());
        assert!(cfg.allow_text_commands);
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("DEPLOYBOT_DOCKER_PATH", "/opt/bin/docker");
        env::set_var("DEPLOYBOT_WORKSPACE", "  /srv/workspace  ");
        env::set_var("DEPLOYBOT_TEXT_COMMANDS", "false");

        let cfg = EnvConfig::from_env();
        assert_eq!(cfg.docker_path, "/opt/bin/docker");
        assert_eq!(cfg.workspace.as_deref(), Some("/srv/workspace"));
        assert!(!cfg.allow_text_commands);

        env::remove_var("DEPLOYBOT_DOCKER_PATH");
        env::remove_var("DEPLOYBOT_WORKSPACE");
        env::remove_var("DEPLOYBOT_TEXT_COMMANDS");

        let cfg = EnvConfig::from_env();
        assert_eq!(cfg.docker_path, constants::DEFAULT_DOCKER_PATH);
        assert!(cfg.workspace.is_none());
        assert!(cfg.allow_text_commands);
    }
}
