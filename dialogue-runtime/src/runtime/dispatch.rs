//! # Dispatch 模块
//!
//! 将编译条目转换为 Command 与控制流决策。
//!
//! ## 职责
//!
//! - 读取 [`Entry`]
//! - 产生对应的 Command（名牌、音频、行分发事件等）
//! - 决定执行如何继续：顺序继续、等待揭示、等待选择、跳转、结束
//!
//! 分发本身不改动执行位置——位置推进与挂起由引擎统一处理。

use crate::command::{Choice, Command};
use crate::config::{DialogueConfig, TextStyle};
use crate::error::{EngineError, EngineResult};
use crate::script::ast::{CompiledScript, Entry};
use crate::script::tags::parse_inline;

/// 分发后的控制流
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// 继续处理下一条目（show/hide 指令不暂停）
    Continue,

    /// 对话行已分发：启动逐字揭示，等待外部推进
    Reveal {
        /// 净化后的行文本
        text: String,
        /// 整行活动样式
        style: Option<TextStyle>,
    },

    /// 呈现了选择分支：挂起，等待外部选择
    Choices(Vec<Choice>),

    /// 跳转到目标标签（同调用内重入，不挂起）
    Jump(String),

    /// 结束对话
    End,
}

/// 分发结果
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// 产生的命令
    pub commands: Vec<Command>,
    /// 控制流决策
    pub flow: Flow,
}

impl DispatchResult {
    fn new(commands: Vec<Command>, flow: Flow) -> Self {
        Self { commands, flow }
    }
}

/// 分发单个编译条目
///
/// # 错误
///
/// - [`EngineError::LabelNotFound`]：jump 目标标签缺失
/// - [`EngineError::EmptyChoice`]：选择分支为空（创作错误）
///
/// 两者都由引擎降级为日志 + 结束对话。
pub fn dispatch(
    entry: &Entry,
    script: &CompiledScript,
    config: &DialogueConfig,
) -> EngineResult<DispatchResult> {
    match entry {
        Entry::Jump { target_label } => {
            if !script.has_label(target_label) {
                return Err(EngineError::LabelNotFound {
                    label: target_label.clone(),
                });
            }
            Ok(DispatchResult::new(
                Vec::new(),
                Flow::Jump(target_label.clone()),
            ))
        }

        Entry::End => Ok(DispatchResult::new(Vec::new(), Flow::End)),

        Entry::Show { id, emotion } => {
            // 空 id 不发出命令，但照常继续
            let commands = if id.is_empty() {
                Vec::new()
            } else {
                vec![Command::ShowCharacter {
                    id: id.clone(),
                    emotion: emotion.clone(),
                }]
            };
            Ok(DispatchResult::new(commands, Flow::Continue))
        }

        Entry::Hide { id } => {
            let commands = if id.is_empty() {
                Vec::new()
            } else {
                vec![Command::HideCharacter { id: id.clone() }]
            };
            Ok(DispatchResult::new(commands, Flow::Continue))
        }

        Entry::Dialogue { speaker, text } => {
            let parsed = parse_inline(text, config);

            let mut commands = vec![Command::TextBoxClear];

            // 名牌：已知说话者显示名称+颜色，旁白隐藏
            match speaker.as_deref().and_then(|id| script.character(id)) {
                Some(character) => commands.push(Command::SetNameplate {
                    name: character.name.clone(),
                    color: character.color.clone(),
                }),
                None => commands.push(Command::HideNameplate),
            }

            // 音频 cue 在解析时立即播放，不等待揭示
            for cue in parsed.cues {
                commands.push(Command::PlayAudio { cue });
            }

            commands.push(Command::LineDispatched {
                text: parsed.clean_text.clone(),
            });

            Ok(DispatchResult::new(
                commands,
                Flow::Reveal {
                    text: parsed.clean_text,
                    style: parsed.style,
                },
            ))
        }

        Entry::Choice { options } => {
            if options.is_empty() {
                return Err(EngineError::EmptyChoice);
            }
            let commands = vec![
                Command::TextBoxClear,
                Command::PresentChoices {
                    choices: options.clone(),
                },
            ];
            Ok(DispatchResult::new(commands, Flow::Choices(options.clone())))
        }
    }
}
