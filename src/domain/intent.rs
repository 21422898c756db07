//! 部署意图

use serde::Serialize;

use super::deploy::EnvironmentTier;

/// 自由文本消息解析出的部署意图
///
/// 按消息派生，不持久化；`confirmed` 仅在 `project_name`
/// 存在时才有意义，调用方先检查项目再检查确认
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DeployIntent {
    /// 规范化项目标识（别名表未命中时为 None）
    pub project_name: Option<String>,
    /// 是否包含确认关键词
    pub confirmed: bool,
    /// 目标环境层级
    pub tier: EnvironmentTier,
}
