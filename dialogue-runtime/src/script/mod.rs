//! # Script 模块
//!
//! 脚本数据模型与加载期处理。
//!
//! ## 模块结构
//!
//! - [`data`]：线上形状（serde wire types）
//! - [`ast`]：编译条目与标签表
//! - [`parse`]：原始条目到编译条目的一次性分类
//! - [`tags`]：内联标签解析

pub mod ast;
pub mod data;
pub mod parse;
pub mod tags;

pub use ast::{CompiledScript, Entry};
pub use data::{Character, DialogueData, DialogueSettings, RawEntry};
pub use parse::compile;
pub use tags::{ParsedLine, parse_inline};
