//! # Engine 模块
//!
//! 对话执行状态机。
//!
//! ## 执行模型
//!
//! ```text
//! 入站操作（start / next_line / select_choice / tick / …）
//!     -> 同步状态转换
//!     -> Vec<Command>（本次调用产生的全部指令）
//! ```
//!
//! 1. 每个入站操作在调用内同步完成全部状态转换
//! 2. 执行只在两处跨调用挂起：逐字揭示（每 tick 一个字符）与
//!    选择分支（等待恰好一次外部选择）
//! 3. jump / show / hide / end 在同一调用内重入处理，不挂起
//! 4. 失败（未加载数据、未知标签）记录日志并保持状态不变，
//!    从不向 Host 抛出错误

use std::time::Duration;

use crate::command::Command;
use crate::config::DialogueConfig;
use crate::error::{EngineError, EngineResult};
use crate::runtime::dispatch::{Flow, dispatch};
use crate::script::ast::CompiledScript;
use crate::script::data::DialogueData;
use crate::script::parse::compile;
use crate::state::ExecState;
use crate::typewriter::Typewriter;

/// `start()` 的默认入口标签
pub const DEFAULT_START_LABEL: &str = "Start";

/// 对话执行引擎
///
/// 这是 dialogue-runtime 的核心类型，拥有脚本数据、执行状态与
/// 逐字揭示控制器，并保证三者的不变量。
///
/// # 使用示例
///
/// ```ignore
/// let mut engine = DialogueEngine::new(config);
/// engine.load(&data);
///
/// for cmd in engine.start(DEFAULT_START_LABEL) {
///     host.execute(cmd);
/// }
///
/// // Host 按 engine.tick_interval() 周期驱动揭示
/// while engine.is_typewriter_active() {
///     for cmd in engine.tick() {
///         host.execute(cmd);
///     }
/// }
/// ```
///
/// # 并发模型
///
/// 单线程、协作式：所有状态转换相对触发它的调用同步完成，
/// 引擎内部允许同步重入（jump 指令在处理当前行的调用内继续执行），
/// 但假设宿主事件循环不会让两个调用栈同时进入引擎。
pub struct DialogueEngine {
    /// 引擎配置（构造时提供一次，只读）
    config: DialogueConfig,
    /// 编译后的脚本（`load` 安装）
    script: Option<CompiledScript>,
    /// 执行状态
    state: ExecState,
    /// 逐字揭示控制器
    typewriter: Typewriter,
}

impl DialogueEngine {
    /// 创建引擎实例
    pub fn new(config: DialogueConfig) -> Self {
        if config.debug {
            tracing::debug!(?config, "引擎已初始化");
        }
        Self {
            config,
            script: None,
            state: ExecState::new(),
            typewriter: Typewriter::new(),
        }
    }

    /// 安装脚本数据
    ///
    /// 原始条目被一次性编译分类；全部执行状态重置为初始形式，
    /// 进行中的逐字揭示被取消。
    pub fn load(&mut self, data: &DialogueData) {
        self.typewriter.stop();
        self.state.reset();
        let script = compile(data);
        if self.config.debug {
            tracing::debug!(labels = script.label_count(), "脚本数据已加载");
        }
        self.script = Some(script);
    }

    /// 在指定标签处开始对话
    ///
    /// 失败（未加载数据 / 标签缺失）记录日志，状态不变，返回空指令。
    pub fn start(&mut self, label: &str) -> Vec<Command> {
        match self.try_start(label) {
            Ok(()) => {
                if self.config.debug {
                    tracing::debug!(label, "对话开始");
                }
                self.run()
            }
            Err(err) => {
                tracing::error!(error = %err, label, "start 失败");
                Vec::new()
            }
        }
    }

    /// 在默认标签 [`DEFAULT_START_LABEL`] 处开始对话
    pub fn start_default(&mut self) -> Vec<Command> {
        self.start(DEFAULT_START_LABEL)
    }

    /// 跳转到指定标签
    ///
    /// 暂停中的对话恢复运行。失败策略同 [`start`](Self::start)。
    pub fn jump_to(&mut self, label: &str) -> Vec<Command> {
        match self.try_jump(label) {
            Ok(()) => {
                if self.config.debug {
                    tracing::debug!(label, "跳转到标签");
                }
                self.run()
            }
            Err(err) => {
                tracing::error!(error = %err, label, "jump_to 失败");
                Vec::new()
            }
        }
    }

    /// 暂停对话
    ///
    /// 只拦截行推进；进行中的逐字揭示照常被 tick 驱动。
    pub fn pause(&mut self) {
        self.state.paused = true;
        if self.config.debug {
            tracing::debug!("对话暂停");
        }
    }

    /// 恢复对话并立即尝试处理下一行
    pub fn resume(&mut self) -> Vec<Command> {
        self.state.paused = false;
        if self.config.debug {
            tracing::debug!("对话恢复");
        }
        if !self.state.active || self.typewriter.is_active() || self.state.is_choices_active() {
            return Vec::new();
        }
        self.run()
    }

    /// 外部推进请求（手动按键或自动推进定时器）
    ///
    /// - 揭示进行中：改为跳过揭示（跳过后等待下一次请求）
    /// - 选择挂起中：无操作（选择必须经由 [`select_choice`](Self::select_choice)）
    /// - 其余情况：处理下一行
    pub fn next_line(&mut self) -> Vec<Command> {
        if !self.state.active {
            return Vec::new();
        }
        if self.state.is_choices_active() {
            return Vec::new();
        }
        if self.typewriter.is_active() {
            return self.skip_typewriter();
        }
        if self.state.paused {
            return Vec::new();
        }
        self.run()
    }

    /// 跳过进行中的逐字揭示，立即显示完整文本
    ///
    /// 无揭示进行中时是无操作。
    pub fn skip_typewriter(&mut self) -> Vec<Command> {
        match self.typewriter.skip() {
            Some(step) => vec![Command::SetText {
                text: step.text,
                style: step.style,
            }],
            None => Vec::new(),
        }
    }

    /// 揭示节拍
    ///
    /// Host 以 [`tick_interval`](Self::tick_interval) 的周期调用；
    /// 每次多揭示一个字符，整行样式重新作用于完整前缀。
    /// 无揭示进行中时返回空指令。
    pub fn tick(&mut self) -> Vec<Command> {
        match self.typewriter.tick() {
            Some(step) => vec![Command::SetText {
                text: step.text,
                style: step.style,
            }],
            None => Vec::new(),
        }
    }

    /// 回传外部选择
    ///
    /// 查找目标标签，发出选择事件，清除挂起标志并执行跳转。
    /// 选择文本不在当前分支中时记录日志并保持挂起（选择界面
    /// 按构造只提供合法键，此分支是防御性的）。
    pub fn select_choice(&mut self, text: &str) -> Vec<Command> {
        let Some(options) = self.state.take_choices() else {
            tracing::warn!(text, "当前没有挂起的选择分支");
            return Vec::new();
        };

        let Some(choice) = options.iter().find(|c| c.text == text) else {
            tracing::warn!(text, "选择文本不在当前分支中");
            self.state.suspend_on_choices(options);
            return Vec::new();
        };
        let target = choice.target_label.clone();

        // 选择事件先于跳转发出
        let mut commands = vec![Command::ChoiceTaken {
            target_label: target.clone(),
            text: text.to_string(),
        }];

        match self.try_jump(&target) {
            Ok(()) => commands.extend(self.run()),
            Err(err) => {
                tracing::error!(error = %err, "选择目标标签无效，结束对话");
                self.finish(&mut commands);
            }
        }
        commands
    }

    /// 请求显示对话框
    pub fn show_box(&self) -> Vec<Command> {
        vec![Command::TextBoxShow]
    }

    /// 请求隐藏对话框
    pub fn hide_box(&self) -> Vec<Command> {
        vec![Command::TextBoxHide]
    }

    /// 逐字揭示是否进行中
    ///
    /// Host 输入层据此决定推进键应当跳过、推进还是忽略。
    pub fn is_typewriter_active(&self) -> bool {
        self.typewriter.is_active()
    }

    /// 选择分支是否挂起中
    pub fn is_choices_active(&self) -> bool {
        self.state.is_choices_active()
    }

    /// 对话是否活动
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// 对话是否暂停
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// 当前标签
    pub fn current_label(&self) -> Option<&str> {
        self.state.current_label.as_deref()
    }

    /// 引擎配置（含表现层透传字段）
    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// 执行状态快照
    pub fn state(&self) -> &ExecState {
        &self.state
    }

    /// 逐字揭示的 tick 间隔
    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }

    /// 校验并设置启动位置
    fn try_start(&mut self, label: &str) -> EngineResult<()> {
        self.ensure_label(label)?;
        self.typewriter.stop();
        self.state.begin_at(label);
        Ok(())
    }

    /// 校验并设置跳转位置（恢复运行）
    fn try_jump(&mut self, label: &str) -> EngineResult<()> {
        self.ensure_label(label)?;
        self.typewriter.stop();
        self.state.jump_to(label);
        self.state.active = true;
        self.state.paused = false;
        Ok(())
    }

    /// 校验标签存在于已加载脚本中
    fn ensure_label(&self, label: &str) -> EngineResult<()> {
        let script = self.script.as_ref().ok_or(EngineError::NoDataLoaded)?;
        if !script.has_label(label) {
            return Err(EngineError::LabelNotFound {
                label: label.to_string(),
            });
        }
        Ok(())
    }

    /// 主执行循环
    ///
    /// 从当前位置顺序处理条目，直到遇到挂起点（对话行揭示、选择
    /// 分支）、暂停或对话结束。jump 在循环内重入，被放弃标签的
    /// 后续行不会再被处理。
    fn run(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();

        loop {
            if !self.state.active || self.state.paused {
                break;
            }
            let Some(label) = self.state.current_label.clone() else {
                break;
            };

            // 取当前条目并分发（对脚本的单次只读借用）
            let step = {
                let Some(script) = self.script.as_ref() else {
                    break;
                };
                script.entries(&label).and_then(|entries| {
                    entries
                        .get(self.state.line_index)
                        .map(|entry| dispatch(entry, script, &self.config))
                })
            };

            let Some(step) = step else {
                // 索引越过标签末尾：隐式结束，等价于显式 end
                self.finish(&mut commands);
                break;
            };

            self.state.advance();
            if self.config.debug {
                tracing::debug!(label = %label, index = self.state.line_index, "处理脚本条目");
            }

            match step {
                Ok(result) => {
                    commands.extend(result.commands);
                    match result.flow {
                        Flow::Continue => {}

                        Flow::Jump(target) => {
                            // 同调用重入：立即改写位置并继续循环
                            self.typewriter.stop();
                            self.state.jump_to(target);
                        }

                        Flow::Reveal { text, style } => {
                            self.typewriter.start(&text, style);
                            if !self.config.auto_forward {
                                break;
                            }
                            // 自动推进不等待揭示完成，立即处理下一行；
                            // 这是被保留的既有行为，不是缺陷
                        }

                        Flow::Choices(options) => {
                            self.typewriter.stop();
                            self.state.suspend_on_choices(options);
                            break;
                        }

                        Flow::End => {
                            self.finish(&mut commands);
                            break;
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(error = %err, label = %label, "条目分发失败，结束对话");
                    self.finish(&mut commands);
                    break;
                }
            }
        }

        commands
    }

    /// 进入终态：取消揭示、重置状态、发出结束事件
    fn finish(&mut self, commands: &mut Vec<Command>) {
        self.typewriter.stop();
        self.state.reset();
        commands.push(Command::DialogueEnded);
        if self.config.debug {
            tracing::debug!("对话结束");
        }
    }
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(DialogueConfig::default())
    }
}
