//! 服务层模块
//!
//! 包含核心业务逻辑：意图识别、部署编排、脚手架生成

pub mod deploy;
pub mod intent;
pub mod scaffold;
