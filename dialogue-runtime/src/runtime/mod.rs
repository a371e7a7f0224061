//! # Runtime 模块
//!
//! 对话执行核心，负责条目分发和状态机编排。
//!
//! ## 模块结构
//!
//! - [`engine`]：执行状态机
//! - [`dispatch`]：编译条目到 Command 与控制流的转换

pub mod dispatch;
pub mod engine;

pub use engine::{DEFAULT_START_LABEL, DialogueEngine};
