//! 部署意图识别
//!
//! 将自由文本消息解析为结构化部署意图。
//! 纯函数、无 I/O、必然终止，便于对短语到意图的映射做穷举测试

use crate::domain::deploy::EnvironmentTier;
use crate::domain::intent::DeployIntent;

/// 触发部署的关键词
const DEPLOY_KEYWORDS: &[&str] = &["deploy", "部署", "上线", "发布"];

/// 确认关键词
const CONFIRM_KEYWORDS: &[&str] = &["确认", "confirm"];

/// 生产环境关键词
const PRODUCTION_KEYWORDS: &[&str] = &["prod", "生产"];

/// 项目别名表
///
/// 显式有序列表，首个匹配生效；别名一律小写
const PROJECT_ALIASES: &[(&str, &str)] = &[
    ("ai-account-automation", "ai-account-automation"),
    ("ai account automation", "ai-account-automation"),
    ("ai账户自动化", "ai-account-automation"),
    ("账号自动化", "ai-account-automation"),
];

/// 规范化消息正文：去首尾空白并转小写
fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn contains_any(body: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| body.contains(keyword))
}

/// 按别名表解析规范项目名
fn resolve_project_name(body: &str) -> Option<String> {
    PROJECT_ALIASES
        .iter()
        .find(|(alias, _)| body.contains(alias))
        .map(|(_, name)| (*name).to_string())
}

/// 将自由文本解析为部署意图
///
/// 返回 `None` 表示"不是部署命令，交给后续处理"，不是错误：
/// 文本命令被禁用、发送者未授权、或正文不含任何部署关键词
pub fn classify(
    raw_text: &str,
    is_authorized_sender: bool,
    allow_text_commands: bool,
) -> Option<DeployIntent> {
    if !allow_text_commands || !is_authorized_sender {
        return None;
    }

    let body = normalize(raw_text);
    if !contains_any(&body, DEPLOY_KEYWORDS) {
        return None;
    }

    let tier = if contains_any(&body, PRODUCTION_KEYWORDS) {
        EnvironmentTier::Production
    } else {
        EnvironmentTier::Standard
    };

    Some(DeployIntent {
        project_name: resolve_project_name(&body),
        confirmed: contains_any(&body, CONFIRM_KEYWORDS),
        tier,
    })
}
