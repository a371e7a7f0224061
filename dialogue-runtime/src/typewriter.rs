//! # Typewriter 模块
//!
//! 逐字揭示控制器：把一行净化文本按固定节奏逐字符显示。
//!
//! ## 设计说明
//!
//! 建模为显式的可恢复任务，状态为 {Idle, Revealing, Done} 外加取消
//! 操作，不绑定任何具体调度器：Host 以 [`DialogueConfig::tick_interval`]
//! 的周期驱动 [`DialogueEngine::tick`]，每次 tick 多揭示一个字符。
//! `is_active()` 为 false 时 Host 停止调度——自然完成、跳过、取消、
//! 换行替换每条退出路径都会离开 Revealing 状态，不会留下悬空的
//! tick 回调目标。
//!
//! 样式是整行属性：每个 tick 都对已揭示的**完整前缀**重新应用活动
//! 样式，而不是只对新增字符。
//!
//! [`DialogueConfig::tick_interval`]: crate::config::DialogueConfig::tick_interval
//! [`DialogueEngine::tick`]: crate::runtime::DialogueEngine::tick

use serde::{Deserialize, Serialize};

use crate::config::TextStyle;

/// 揭示任务阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// 空闲（无任务或已取消）
    #[default]
    Idle,
    /// 揭示进行中
    Revealing,
    /// 揭示完成（自然完成或跳过）
    Done,
}

/// 单步揭示结果
///
/// `tick` / `skip` 的输出，Host 将其渲染为一次完整的文本设置。
#[derive(Debug, Clone, PartialEq)]
pub struct RevealStep {
    /// 已揭示的前缀（跳过时为完整文本）
    pub text: String,
    /// 整行活动样式
    pub style: Option<TextStyle>,
    /// 揭示是否已完成
    pub done: bool,
}

/// 逐字揭示控制器
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Typewriter {
    phase: Phase,
    /// 目标文本（按字符拆分，前缀切片不会落在 UTF-8 边界中间）
    chars: Vec<char>,
    /// 已揭示字符数
    revealed: usize,
    style: Option<TextStyle>,
}

impl Typewriter {
    /// 创建空闲控制器
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始揭示新文本
    ///
    /// 替换任何进行中的任务——前一行的揭示被直接丢弃。
    pub fn start(&mut self, text: &str, style: Option<TextStyle>) {
        self.phase = Phase::Revealing;
        self.chars = text.chars().collect();
        self.revealed = 0;
        self.style = style;
    }

    /// 推进一个字符
    ///
    /// 返回本步的揭示前缀；前缀达到完整文本时标记 `done` 并转入
    /// Done 状态。空文本在第一个 tick 即完成。非 Revealing 状态下
    /// 返回 None。
    pub fn tick(&mut self) -> Option<RevealStep> {
        if self.phase != Phase::Revealing {
            return None;
        }

        if self.revealed < self.chars.len() {
            self.revealed += 1;
        }
        let done = self.revealed >= self.chars.len();
        if done {
            self.phase = Phase::Done;
        }

        Some(RevealStep {
            text: self.prefix(),
            style: self.style.clone(),
            done,
        })
    }

    /// 立即完成揭示
    ///
    /// 无任务进行中时是无操作。
    pub fn skip(&mut self) -> Option<RevealStep> {
        if self.phase != Phase::Revealing {
            return None;
        }

        self.revealed = self.chars.len();
        self.phase = Phase::Done;

        Some(RevealStep {
            text: self.prefix(),
            style: self.style.clone(),
            done: true,
        })
    }

    /// 取消进行中的揭示，不补全文本
    ///
    /// 用于提前离开当前行（跳转、重新加载、结束对话）。幂等。
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.chars.clear();
        self.revealed = 0;
        self.style = None;
    }

    /// 是否有揭示进行中
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Revealing
    }

    /// 当前阶段
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 已揭示的前缀
    fn prefix(&self) -> String {
        self.chars[..self.revealed].iter().collect()
    }
}
