//! 项目脚手架
//!
//! 将固定模板目录写入目标目录：已存在的文件默认跳过，
//! `force` 时全部重写。文件按目录顺序串行写入，
//! 单个文件的写入对调用方原子可见（临时文件 + rename）

pub mod templates;

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use self::templates::TemplateFile;
use crate::domain::deploy::ProjectLocation;
use crate::infra::runtime::RuntimeSink;

/// 脚手架错误
#[derive(Debug)]
pub enum ScaffoldError {
    /// 目录创建失败
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 文件写入失败
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaffoldError::CreateDir { path, source } => {
                write!(f, "Failed to create directory {}: {}", path.display(), source)
            }
            ScaffoldError::WriteFile { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::CreateDir { source, .. } | ScaffoldError::WriteFile { source, .. } => {
                Some(source)
            }
        }
    }
}

/// 创建选项（CLI 参数解析结果）
#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    /// 目标目录（默认当前目录或 --name）
    pub dir: Option<PathBuf>,
    /// 在当前目录下新建的文件夹名
    pub name: Option<String>,
    /// 覆盖已存在的文件
    pub force: bool,
}

/// 一次写入的结果（按目录顺序）
#[derive(Debug, Default)]
pub struct ProvisionReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// 将模板目录写入 root_dir
///
/// 跨文件不具事务性：中途失败保留已写入的文件并中止后续写入，
/// 带 `force` 重跑即可收敛状态
pub async fn provision(
    root_dir: &Path,
    templates: &[TemplateFile],
    force: bool,
) -> Result<ProvisionReport, ScaffoldError> {
    fs::create_dir_all(root_dir)
        .await
        .map_err(|source| ScaffoldError::CreateDir {
            path: root_dir.to_path_buf(),
            source,
        })?;

    let mut report = ProvisionReport::default();
    for template in templates {
        let target = root_dir.join(template.rel_path);
        if !force && target.exists() {
            report.skipped.push(target);
            continue;
        }
        write_template(&target, template).await?;
        report.written.push(target);
    }
    Ok(report)
}

/// 写入单个模板文件：先写同目录临时文件再 rename，
/// 可执行位在 rename 之前设置
async fn write_template(target: &Path, template: &TemplateFile) -> Result<(), ScaffoldError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| ScaffoldError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let staging = staging_path(target);
    if let Err(source) = fs::write(&staging, template.content).await {
        return Err(ScaffoldError::WriteFile {
            path: target.to_path_buf(),
            source,
        });
    }

    #[cfg(unix)]
    if let Some(mode) = template.mode {
        use std::os::unix::fs::PermissionsExt;
        if let Err(source) =
            fs::set_permissions(&staging, std::fs::Permissions::from_mode(mode)).await
        {
            let _ = fs::remove_file(&staging).await;
            return Err(ScaffoldError::WriteFile {
                path: target.to_path_buf(),
                source,
            });
        }
    }

    if let Err(source) = fs::rename(&staging, target).await {
        let _ = fs::remove_file(&staging).await;
        return Err(ScaffoldError::WriteFile {
            path: target.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// 同目录临时文件路径，保证 rename 不跨文件系统
fn staging_path(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.tmp", file_name))
}

/// 创建项目脚手架（CLI 层）
///
/// 解析目标目录、写入模板目录并通过 sink 汇报结果
pub async fn create_project(
    opts: &CreateOptions,
    sink: &mut dyn RuntimeSink,
) -> Result<(), ScaffoldError> {
    let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let root_dir = ProjectLocation::resolve(
        &base,
        opts.dir.as_deref(),
        opts.name.as_deref(),
        None,
    )
    .root_dir;

    let report = provision(&root_dir, templates::catalog(), opts.force).await?;

    if report.written.is_empty() {
        sink.log("Project template already exists. Use --force to overwrite.");
    } else {
        sink.log(&format!(
            "Project template created in: {}",
            root_dir.display()
        ));
    }
    if !report.skipped.is_empty() {
        let listed: Vec<String> = report
            .skipped
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        sink.log(&format!("Skipped existing files:\n- {}", listed.join("\n- ")));
    }

    debug!(
        root_dir = %root_dir.display(),
        written = report.written.len(),
        skipped = report.skipped.len(),
        "Scaffold provision finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::runtime::CollectorSink;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_provision_writes_full_catalog() {
        let temp = TempDir::new().unwrap();

        let report = provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();

        assert_eq!(report.written.len(), 6);
        assert!(report.skipped.is_empty());
        for rel_path in [
            "Dockerfile",
            "docker-compose.yml",
            "Makefile",
            ".env.example",
            "scripts/setup.sh",
            "scripts/start.sh",
        ] {
            assert!(temp.path().join(rel_path).exists(), "{} missing", rel_path);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_provision_marks_scripts_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();

        for script in ["scripts/setup.sh", "scripts/start.sh"] {
            let mode = std::fs::metadata(temp.path().join(script))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o111, 0o111, "{} should be executable", script);
        }

        let mode = std::fs::metadata(temp.path().join("Dockerfile"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0, "Dockerfile should not be executable");
    }

    #[tokio::test]
    async fn test_provision_is_idempotent_without_force() {
        let temp = TempDir::new().unwrap();

        let first = provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();
        assert_eq!(first.written.len(), 6);

        // 修改一个文件，验证第二次运行不会碰它
        let marker = temp.path().join("Makefile");
        std::fs::write(&marker, "custom content").unwrap();

        let second = provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 6);
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "custom content");
    }

    #[tokio::test]
    async fn test_provision_force_rewrites_everything() {
        let temp = TempDir::new().unwrap();
        provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();

        let marker = temp.path().join("Makefile");
        std::fs::write(&marker, "custom content").unwrap();

        let report = provision(temp.path(), templates::catalog(), true)
            .await
            .unwrap();
        assert_eq!(report.written.len(), 6);
        assert!(report.skipped.is_empty());
        assert_ne!(std::fs::read_to_string(&marker).unwrap(), "custom content");
    }

    #[tokio::test]
    async fn test_provision_leaves_no_staging_files() {
        let temp = TempDir::new().unwrap();
        provision(temp.path(), templates::catalog(), false)
            .await
            .unwrap();

        for entry in std::fs::read_dir(temp.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(
                !name.to_string_lossy().ends_with(".tmp"),
                "staging file {} left behind",
                name.to_string_lossy()
            );
        }
    }

    #[tokio::test]
    async fn test_create_project_reports_through_sink() {
        let temp = TempDir::new().unwrap();
        let opts = CreateOptions {
            dir: Some(temp.path().to_path_buf()),
            name: None,
            force: false,
        };

        let mut sink = CollectorSink::new();
        create_project(&opts, &mut sink).await.unwrap();
        assert!(sink.lines()[0]
            .content
            .contains("Project template created in:"));

        // 第二次运行：全部跳过
        let mut sink = CollectorSink::new();
        create_project(&opts, &mut sink).await.unwrap();
        assert!(sink.lines()[0]
            .content
            .contains("already exists. Use --force to overwrite."));
        assert!(sink.lines()[1].content.contains("Skipped existing files:"));
        assert!(sink.lines()[1].content.contains("scripts/start.sh"));
    }

    #[tokio::test]
    async fn test_create_project_into_new_subdirectory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("demo");
        let opts = CreateOptions {
            dir: Some(target.clone()),
            name: None,
            force: false,
        };

        let mut sink = CollectorSink::new();
        create_project(&opts, &mut sink).await.unwrap();
        assert!(target.join("Dockerfile").exists());
        assert!(target.join("scripts/setup.sh").exists());
    }
}
