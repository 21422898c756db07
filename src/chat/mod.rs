//! 聊天命令适配
//!
//! 面向聊天接入层的薄适配：接入层负责发送者鉴权与消息规范化，
//! 这里只消费"是否授权"与正文文本

pub mod deploy;

pub use deploy::{handle_deploy_message, ChatReply};
