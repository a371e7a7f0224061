//! # State 模块
//!
//! 定义引擎的执行状态。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，不允许隐式全局状态
//! - 所有状态必须**可序列化**
//! - 执行状态是单实例，只由状态机及其委托组件修改
//!
//! ## 不变量
//!
//! - `current_label` 为 Some 时必须是已加载脚本的键（由状态机在
//!   每次设置前检查）
//! - `line_index` 位于 `[0, 当前标签条目数]`，到达条目数触发对话结束
//! - 挂起中的选择与进行中的逐字揭示不会同时存在：呈现选择前
//!   状态机先取消揭示
//! - 加载新脚本数据将状态重置为初始（非活动）形式

use serde::{Deserialize, Serialize};

use crate::command::Choice;

/// 执行状态
///
/// 状态机拥有的唯一可变状态。逐字揭示的进度在
/// [`Typewriter`](crate::typewriter::Typewriter) 中，二者由引擎
/// 共同维护上述不变量。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecState {
    /// 当前标签（None 表示未运行）
    pub current_label: Option<String>,

    /// 当前行索引（从 0 开始，标签内单调递增，跳转/启动时归零）
    pub line_index: usize,

    /// 对话是否活动
    pub active: bool,

    /// 对话是否暂停
    pub paused: bool,

    /// 挂起中的选择分支（Some 表示等待外部选择）
    pub pending_choices: Option<Vec<Choice>>,
}

impl ExecState {
    /// 创建初始（非活动）状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 在指定标签处开始运行
    pub fn begin_at(&mut self, label: impl Into<String>) {
        self.current_label = Some(label.into());
        self.line_index = 0;
        self.active = true;
        self.paused = false;
        self.pending_choices = None;
    }

    /// 跳转到指定标签（行索引归零，清除挂起的选择）
    pub fn jump_to(&mut self, label: impl Into<String>) {
        self.current_label = Some(label.into());
        self.line_index = 0;
        self.pending_choices = None;
    }

    /// 前进到下一行
    pub fn advance(&mut self) {
        self.line_index += 1;
    }

    /// 重置为初始（非活动）形式
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 挂起执行，等待外部选择
    pub fn suspend_on_choices(&mut self, options: Vec<Choice>) {
        self.pending_choices = Some(options);
    }

    /// 选择是否挂起中
    pub fn is_choices_active(&self) -> bool {
        self.pending_choices.is_some()
    }

    /// 取走挂起的选择（清除挂起标志）
    pub fn take_choices(&mut self) -> Option<Vec<Choice>> {
        self.pending_choices.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_inactive() {
        let state = ExecState::new();
        assert!(state.current_label.is_none());
        assert_eq!(state.line_index, 0);
        assert!(!state.active);
        assert!(!state.paused);
        assert!(!state.is_choices_active());
    }

    #[test]
    fn test_begin_at() {
        let mut state = ExecState::new();
        state.paused = true;
        state.begin_at("Start");

        assert_eq!(state.current_label.as_deref(), Some("Start"));
        assert_eq!(state.line_index, 0);
        assert!(state.active);
        assert!(!state.paused);
    }

    #[test]
    fn test_advance_and_jump() {
        let mut state = ExecState::new();
        state.begin_at("Start");
        state.advance();
        state.advance();
        assert_eq!(state.line_index, 2);

        state.jump_to("End");
        assert_eq!(state.current_label.as_deref(), Some("End"));
        assert_eq!(state.line_index, 0);
    }

    #[test]
    fn test_choices_suspension() {
        let mut state = ExecState::new();
        state.begin_at("Start");
        state.suspend_on_choices(vec![Choice::new("A", "labelA")]);
        assert!(state.is_choices_active());

        let options = state.take_choices().unwrap();
        assert_eq!(options.len(), 1);
        assert!(!state.is_choices_active());
        assert!(state.take_choices().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = ExecState::new();
        state.begin_at("Start");
        state.advance();
        state.suspend_on_choices(vec![Choice::new("A", "labelA")]);

        state.reset();
        assert_eq!(state, ExecState::new());
    }

    #[test]
    fn test_state_serialization() {
        let mut state = ExecState::new();
        state.begin_at("Start");
        state.advance();

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: ExecState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
