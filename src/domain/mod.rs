//! 领域模型模块
//!
//! 纯数据结构，不依赖 tokio

pub mod deploy;
pub mod intent;

// Re-exports for convenience
pub use deploy::{DeployOutcome, EnvironmentTier, LogLine, ProjectLocation};
pub use intent::DeployIntent;
