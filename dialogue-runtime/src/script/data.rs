//! # Data 模块
//!
//! 脚本数据的线上形状（wire shape）。
//!
//! 引擎接受已在内存中的脚本数据，不负责文件加载。
//! 结构与原始 JSON 形状一一对应：
//!
//! ```json
//! {
//!   "settings": { "characters": { "y": { "name": "Yui", "color": "#00bfff" } } },
//!   "script": {
//!     "Start": [
//!       "y Hello!",
//!       { "Choice": { "问天气": "weather", "问心情": "feelings" } }
//!     ]
//!   }
//! }
//! ```
//!
//! 选择节点使用 [`IndexMap`] 保持书写顺序（map 键天然唯一）。
//! 标签表的顺序无意义，使用普通 HashMap。

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 角色表条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// 显示名称
    pub name: String,
    /// 显示颜色（如 `#00bfff`）
    pub color: String,
}

/// 脚本设置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DialogueSettings {
    /// 角色表：角色 id → 显示名称 + 颜色
    #[serde(default)]
    pub characters: HashMap<String, Character>,
}

/// 原始脚本条目
///
/// 标签序列中的一个单元：文本行或选择节点。
/// 文本行的指令前缀（jump/end/show/hide）在加载时统一分类，
/// 见 `script::parse`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// 文本行（可能是指令，也可能是对话）
    Line(String),

    /// 选择节点：显示文本 → 目标标签（保持书写顺序）
    Choice {
        /// 选项映射
        #[serde(rename = "Choice")]
        choice: IndexMap<String, String>,
    },
}

/// 完整脚本数据
///
/// `load()` 的输入。加载时被编译为 `CompiledScript`，之后引擎
/// 只操作编译形式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueData {
    /// 脚本设置（角色表）
    #[serde(default)]
    pub settings: DialogueSettings,
    /// 标签 → 条目序列
    pub script: HashMap<String, Vec<RawEntry>>,
}
