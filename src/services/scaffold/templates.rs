//! 脚手架模板目录
//!
//! 固定的模板文件集合，内容不随运行时变化

/// 单个模板文件
#[derive(Clone, Copy, Debug)]
pub struct TemplateFile {
    /// 相对于项目根目录的路径
    pub rel_path: &'static str,
    /// 文件内容
    pub content: &'static str,
    /// unix 权限位（可执行脚本使用）
    pub mode: Option<u32>,
}

/// 模板目录（按写入顺序）
pub fn catalog() -> &'static [TemplateFile] {
    CATALOG
}

const CATALOG: &[TemplateFile] = &[
    TemplateFile {
        rel_path: "Dockerfile",
        content: DOCKERFILE,
        mode: None,
    },
    TemplateFile {
        rel_path: "docker-compose.yml",
        content: DOCKER_COMPOSE,
        mode: None,
    },
    TemplateFile {
        rel_path: "Makefile",
        content: MAKEFILE,
        mode: None,
    },
    TemplateFile {
        rel_path: ".env.example",
        content: ENV_EXAMPLE,
        mode: None,
    },
    TemplateFile {
        rel_path: "scripts/setup.sh",
        content: SETUP_SH,
        mode: Some(0o755),
    },
    TemplateFile {
        rel_path: "scripts/start.sh",
        content: START_SH,
        mode: Some(0o755),
    },
];

const DOCKERFILE: &str = r#"FROM node:22-bookworm
WORKDIR /app
COPY . .
RUN corepack enable
ENV PORT=8080
CMD ["bash", "-lc", "./scripts/start.sh"]
"#;

const DOCKER_COMPOSE: &str = r#"services:
  app:
    build: .
    ports:
      - "${PORT:-8080}:8080"
    env_file:
      - .env
    restart: unless-stopped
"#;

const MAKEFILE: &str = r#"install:
	@echo "Install deps in your app as needed"

run:
	@./scripts/start.sh

docker-build:
	docker build -t app:local .

docker-up:
	docker compose up -d --build

deploy: docker-up
"#;

const ENV_EXAMPLE: &str = "PORT=8080\n";

const SETUP_SH: &str = r#"#!/usr/bin/env bash
set -euo pipefail

if [ ! -f .env ]; then
  cp .env.example .env
  echo "Created .env from .env.example"
fi
"#;

const START_SH: &str = r#"#!/usr/bin/env bash
set -euo pipefail

if [ -f package.json ]; then
  if [ -f pnpm-lock.yaml ]; then
    corepack enable
    pnpm install --frozen-lockfile || pnpm install
    pnpm run start
  else
    npm install
    npm run start
  fi
  exit 0
fi

if [ -f requirements.txt ]; then
  python -m pip install -r requirements.txt
  if [ -f main.py ]; then
    python main.py
    exit 0
  fi
fi

echo "No known entrypoint found. Please edit scripts/start.sh"
exit 1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 6);

        let executables: Vec<&str> = catalog
            .iter()
            .filter(|t| t.mode.is_some())
            .map(|t| t.rel_path)
            .collect();
        assert_eq!(executables, vec!["scripts/setup.sh", "scripts/start.sh"]);

        for template in catalog {
            assert!(!template.content.is_empty(), "{} is empty", template.rel_path);
            assert!(
                template.content.ends_with('\n'),
                "{} should end with a newline",
                template.rel_path
            );
        }
    }

    #[test]
    fn test_scripts_have_shebang() {
        for template in catalog().iter().filter(|t| t.mode.is_some()) {
            assert!(
                template.content.starts_with("#!/usr/bin/env bash"),
                "{} missing shebang",
                template.rel_path
            );
        }
    }
}
