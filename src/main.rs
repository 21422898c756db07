//! Deploybot - 项目脚手架与 compose 部署 CLI
//!
//! Usage:
//! - `deploybot project create --name demo`        # 生成可部署的项目脚手架
//! - `deploybot project create --dir ./app --force`
//! - `deploybot project deploy --dir ./app`        # docker compose up -d --build
//! - `deploybot project deploy --no-detach`        # 前台运行

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deploybot::config::env::{constants, EnvConfig};
use deploybot::infra::runtime::{ConsoleSink, RuntimeSink};
use deploybot::services::deploy::{self, DeployOptions};
use deploybot::services::scaffold::{self, CreateOptions};

#[derive(Parser)]
#[command(name = "deploybot")]
#[command(version = constants::VERSION)]
#[command(about = "Project scaffolding and docker compose deployment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or deploy standalone projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a deployable project scaffold
    Create {
        /// Target directory (default: cwd or --name)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Create a new folder under cwd
        #[arg(long)]
        name: Option<String>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Deploy a project via docker compose
    Deploy {
        /// Project directory (default: cwd)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Path to docker-compose.yml
        #[arg(long)]
        compose_file: Option<PathBuf>,

        /// Skip docker build
        #[arg(long)]
        no_build: bool,

        /// Run in foreground
        #[arg(long)]
        no_detach: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deploybot=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let cfg = EnvConfig::from_env();
    let mut sink = ConsoleSink::new();

    match cli.command {
        Commands::Project { command } => match command {
            ProjectCommands::Create { dir, name, force } => {
                let opts = CreateOptions { dir, name, force };
                if let Err(e) = scaffold::create_project(&opts, &mut sink).await {
                    sink.error(&format!("Create failed: {}", e));
                    sink.exit(1);
                }
            }
            ProjectCommands::Deploy {
                dir,
                compose_file,
                no_build,
                no_detach,
            } => {
                let opts = DeployOptions {
                    dir,
                    compose_file,
                    build: !no_build,
                    detach: !no_detach,
                };
                deploy::deploy_project(&cfg, &opts, &mut sink).await;
            }
        },
    }

    if let Some(code) = sink.exit_request() {
        std::process::exit(code);
    }
}
