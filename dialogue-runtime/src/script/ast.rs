//! # AST 模块
//!
//! 定义脚本的编译形式。
//!
//! ## 设计说明
//!
//! 原始条目（`RawEntry`）的指令前缀在加载时一次性分类为带标签的
//! [`Entry`] 变体，执行引擎只操作结构化数据，不在每次分发时重新
//! 匹配字符串前缀。分类逻辑见 [`parse`](crate::script::parse)。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::command::Choice;
use crate::script::data::Character;

/// 脚本条目（编译级别）
///
/// 表示标签序列中的一个执行单元。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    /// 无条件跳转
    ///
    /// 对应 `jump <label>` 行
    Jump {
        /// 跳转目标标签
        target_label: String,
    },

    /// 立即结束对话
    ///
    /// 对应单独的 `end` 行
    End,

    /// 显示角色
    ///
    /// 对应 `show <id> [emotion]` 行
    Show {
        /// 角色 id
        id: String,
        /// 情绪标识（未指定时为空字符串）
        emotion: String,
    },

    /// 隐藏角色
    ///
    /// 对应 `hide <id>` 行
    Hide {
        /// 角色 id
        id: String,
    },

    /// 对话行
    ///
    /// 首个空白分隔 token 匹配已知角色 id 时归属该角色，
    /// 否则整行作为旁白。`text` 仍含内联标签，
    /// 标签在分发时由 tags 模块剥离。
    Dialogue {
        /// 说话者角色 id（None 表示旁白）
        speaker: Option<String>,
        /// 行文本（含内联标签）
        text: String,
    },

    /// 选择分支
    ///
    /// 对应 `{"Choice": {...}}` 节点，保持书写顺序。
    Choice {
        /// 选项列表
        options: Vec<Choice>,
    },
}

/// 编译后的脚本
///
/// 标签 → 分类后的条目序列，外加角色表。
/// `load()` 时由 [`parse::compile`](crate::script::parse::compile) 构建。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledScript {
    /// 标签表
    labels: HashMap<String, Vec<Entry>>,
    /// 角色表：角色 id → 显示名称 + 颜色
    characters: HashMap<String, Character>,
}

impl CompiledScript {
    /// 创建编译脚本
    pub fn new(
        labels: HashMap<String, Vec<Entry>>,
        characters: HashMap<String, Character>,
    ) -> Self {
        Self { labels, characters }
    }

    /// 标签是否存在
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    /// 获取标签下的条目序列
    pub fn entries(&self, label: &str) -> Option<&[Entry]> {
        self.labels.get(label).map(Vec::as_slice)
    }

    /// 查找角色
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    /// 标签数量
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }
}
