//! Deploybot - 聊天驱动的项目脚手架与 compose 部署
//!
//! 库入口：CLI 与聊天接入层共用同一套核心
//! （意图识别、部署编排、脚手架生成）

pub mod config;
pub mod domain;
pub mod infra;
pub mod services;
pub mod chat;
