//! 聊天部署命令处理
//!
//! 两步协议：识别出项目后先给出确认提示，收到确认关键词才触发部署。
//! 返回 `None` 表示不是部署消息，交由后续处理链

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::env::EnvConfig;
use crate::infra::runtime::CollectorSink;
use crate::services::{deploy, intent};

/// 聊天回复
#[derive(Clone, Debug, Serialize)]
pub struct ChatReply {
    /// 回复正文
    pub text: String,
    /// 是否继续交给后续处理链
    pub should_continue: bool,
}

impl ChatReply {
    /// 终结处理链的回复
    fn terminal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            should_continue: false,
        }
    }
}

/// 处理一条候选部署消息
///
/// 部署失败时面向用户只给一行文案，详细原因走 debug 日志
pub async fn handle_deploy_message(
    cfg: &EnvConfig,
    text: &str,
    is_authorized_sender: bool,
    workspace_dir: Option<&Path>,
) -> Option<ChatReply> {
    let intent = intent::classify(text, is_authorized_sender, cfg.allow_text_commands)?;

    let Some(project_name) = intent.project_name.clone() else {
        return Some(ChatReply::terminal(
            "⚠️ 未识别项目名称。请用：部署 ai-account-automation（或 /deploy ai-account-automation）。",
        ));
    };

    if !intent.confirmed {
        return Some(ChatReply::terminal(format!(
            "准备部署 {}。请回复：确认 部署 {}",
            project_name, project_name
        )));
    }

    let compose_file_name = intent.tier.compose_file_name();
    let mut sink = CollectorSink::new();
    let outcome = deploy::deploy_by_intent(cfg, &intent, workspace_dir, &mut sink).await;

    if outcome.succeeded {
        Some(ChatReply::terminal(format!(
            "✅ 已触发部署：{}（{}）",
            project_name, compose_file_name
        )))
    } else {
        let failure = sink.failure_message();
        debug!(project = %project_name, error = %failure, "Chat deploy failed");
        Some(ChatReply::terminal(format!("⚠️ 部署失败：{}", failure)))
    }
}
