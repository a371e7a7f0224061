//! # Command 模块
//!
//! 定义引擎向 Host 发出的所有指令。
//! Command 是引擎与 Host 之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **引擎无关**：不包含任何渲染框架或音频后端的类型
//!
//! 对话框几何、按钮交互、音频播放全部由 Host 层实现，
//! 引擎只负责在正确的时机发出正确的 Command。

use serde::{Deserialize, Serialize};

use crate::config::TextStyle;

/// 选择项
///
/// 呈现给玩家的单个分支选项：显示文本 + 跳转目标标签。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// 选项显示文本
    pub text: String,
    /// 跳转目标标签
    pub target_label: String,
}

impl Choice {
    /// 创建选择项
    pub fn new(text: impl Into<String>, target_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_label: target_label.into(),
        }
    }
}

/// 引擎向 Host 发出的指令
///
/// Host 接收 Command 后，将其转换为实际的渲染、音频等操作。
/// 每个入站操作（`start` / `next_line` / `tick` / …）返回本次调用
/// 产生的全部 Command，Host 按顺序执行即可。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 设置对话框文本
    ///
    /// 逐字揭示期间每个 tick 发出一次，`text` 为已揭示的前缀；
    /// 跳过揭示时发出完整文本。`style` 作用于整行（非逐字符片段）。
    SetText {
        /// 要显示的文本（完整或前缀）
        text: String,
        /// 整行样式（None 表示默认样式）
        style: Option<TextStyle>,
    },

    /// 设置名牌（说话者名称 + 颜色）
    SetNameplate {
        /// 显示名称
        name: String,
        /// 显示颜色（如 `#00bfff`）
        color: String,
    },

    /// 隐藏名牌（旁白行没有说话者）
    HideNameplate,

    /// 显示角色
    ShowCharacter {
        /// 角色 id
        id: String,
        /// 情绪标识（未指定时为空字符串）
        emotion: String,
    },

    /// 隐藏角色
    HideCharacter {
        /// 角色 id
        id: String,
    },

    /// 呈现选择分支
    ///
    /// 引擎随即挂起，等待 Host 通过 `select_choice` 回传唯一一次选择。
    PresentChoices {
        /// 选项列表（保持脚本书写顺序）
        choices: Vec<Choice>,
    },

    /// 播放音频 cue
    ///
    /// `cue` 是注册表解析后的 cue 标识，播放由 Host 负责。
    PlayAudio {
        /// cue 标识
        cue: String,
    },

    /// 对话行已分发
    ///
    /// 每个对话行分发时发出一次，早于（且独立于）逐字揭示完成。
    LineDispatched {
        /// 净化后的行文本（已剥离内联标签）
        text: String,
    },

    /// 选择已确定
    ///
    /// 在执行跳转之前发出。
    ChoiceTaken {
        /// 跳转目标标签
        target_label: String,
        /// 被选中的显示文本
        text: String,
    },

    /// 对话到达终态
    DialogueEnded,

    /// 清理对话框内容
    TextBoxClear,

    /// 显示对话框
    TextBoxShow,

    /// 隐藏对话框
    TextBoxHide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_new() {
        let c = Choice::new("问天气", "weather");
        assert_eq!(c.text, "问天气");
        assert_eq!(c.target_label, "weather");
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::SetNameplate {
            name: "Yui".to_string(),
            color: "#00bfff".to_string(),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }

    #[test]
    fn test_command_set_text_with_style() {
        let cmd = Command::SetText {
            text: "你好".to_string(),
            style: Some(TextStyle {
                italic: Some(true),
                ..TextStyle::default()
            }),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
