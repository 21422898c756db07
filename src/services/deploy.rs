//! 部署编排
//!
//! 解析项目位置、检查 compose 文件、调用容器编排命令并归类结果。
//! 可执行文件按候选列表顺序尝试：配置的主路径失败后回退到裸命令名，
//! 主路径本身就是裸命令名时不再回退

use std::env;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::env::{constants, EnvConfig};
use crate::domain::deploy::{DeployOutcome, ProjectLocation};
use crate::domain::intent::DeployIntent;
use crate::infra::command::CommandRunner;
use crate::infra::runtime::RuntimeSink;

/// 部署选项（CLI 参数解析结果）
#[derive(Clone, Debug)]
pub struct DeployOptions {
    /// 项目目录（默认当前目录）
    pub dir: Option<PathBuf>,
    /// compose 文件路径（默认 docker-compose.yml）
    pub compose_file: Option<PathBuf>,
    /// 是否附加 --build
    pub build: bool,
    /// 是否附加 -d
    pub detach: bool,
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            dir: None,
            compose_file: None,
            build: true,
            detach: true,
        }
    }
}

/// 候选可执行文件列表
///
/// 配置的主路径在前；仅当主路径不是裸命令名时追加 PATH 回退
pub fn docker_candidates(cfg: &EnvConfig) -> Vec<String> {
    let mut candidates = vec![cfg.docker_path.clone()];
    if cfg.docker_path != constants::DOCKER_FALLBACK {
        candidates.push(constants::DOCKER_FALLBACK.to_string());
    }
    candidates
}

/// compose up 参数列表
fn compose_args(compose_file: &Path, build: bool, detach: bool) -> Vec<String> {
    let mut args = vec![
        "compose".to_string(),
        "-f".to_string(),
        compose_file.display().to_string(),
        "up".to_string(),
    ];
    if detach {
        args.push("-d".to_string());
    }
    if build {
        args.push("--build".to_string());
    }
    args
}

/// 对解析好的项目位置执行一次部署
pub async fn deploy(
    cfg: &EnvConfig,
    location: &ProjectLocation,
    build: bool,
    detach: bool,
    sink: &mut dyn RuntimeSink,
) -> DeployOutcome {
    if !location.compose_file.exists() {
        let message = format!("Missing compose file: {}", location.compose_file.display());
        sink.error(&message);
        sink.exit(1);
        return DeployOutcome::failure(message, 1);
    }

    let candidates = docker_candidates(cfg);
    let args = compose_args(&location.compose_file, build, detach);
    debug!(
        root_dir = %location.root_dir.display(),
        compose_file = %location.compose_file.display(),
        "Starting compose deploy"
    );

    match CommandRunner::run_first_success(&candidates, &args, &location.root_dir).await {
        Ok(_) => {
            sink.log("Deploy completed.");
            info!(
                compose_file = %location.compose_file.display(),
                "Compose deploy finished"
            );
            DeployOutcome::success("Deploy completed.")
        }
        Err(e) => {
            let message = format!("Deploy failed: {}", e);
            sink.error(&message);
            sink.exit(1);
            warn!(error = %e, "Compose deploy failed");
            DeployOutcome::failure(message, 1)
        }
    }
}

/// 按 CLI 选项部署项目
pub async fn deploy_project(
    cfg: &EnvConfig,
    opts: &DeployOptions,
    sink: &mut dyn RuntimeSink,
) -> DeployOutcome {
    let base = current_dir();
    let location = ProjectLocation::resolve(
        &base,
        opts.dir.as_deref(),
        None,
        opts.compose_file.as_deref(),
    );
    deploy(cfg, &location, opts.build, opts.detach, sink).await
}

/// 按已确认的意图部署项目
///
/// 工作区根目录：配置的 workspace > 调用方提供的目录 > 当前目录；
/// compose 文件名由环境层级决定，build 与 detach 恒为开启
pub async fn deploy_by_intent(
    cfg: &EnvConfig,
    intent: &DeployIntent,
    workspace_dir: Option<&Path>,
    sink: &mut dyn RuntimeSink,
) -> DeployOutcome {
    let Some(project_name) = intent.project_name.as_deref() else {
        // 调用方应在解析出项目后才触发部署
        let message = "No project resolved for deploy intent".to_string();
        sink.error(&message);
        sink.exit(1);
        return DeployOutcome::failure(message, 1);
    };

    let root = cfg
        .workspace
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| workspace_dir.map(Path::to_path_buf))
        .unwrap_or_else(current_dir);

    let location = ProjectLocation::resolve(
        &root,
        None,
        Some(project_name),
        Some(Path::new(intent.tier.compose_file_name())),
    );
    deploy(cfg, &location, true, true, sink).await
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
