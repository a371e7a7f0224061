//! # Dialogue Runtime
//!
//! 分支对话脚本解释器的核心运行时库。
//!
//! ## 架构概述
//!
//! `dialogue-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host                              Engine
//!   │                                  │
//!   │── start / next_line / tick ────►│
//!   │                                  │ 同步状态转换
//!   │◄──────── Vec<Command> ──────────│
//!   │                                  │
//! ```
//!
//! 每个入站操作返回本次调用产生的全部 [`Command`]，Host 将其转换
//! 为实际的渲染与音频操作。执行只在两处跨调用挂起：逐字揭示
//! （Host 按 [`DialogueConfig::tick_interval`] 周期驱动
//! [`DialogueEngine::tick`]）与选择分支（等待一次
//! [`DialogueEngine::select_choice`] 回传）。
//!
//! ## 核心类型
//!
//! - [`DialogueEngine`]：执行状态机
//! - [`Command`]：引擎向 Host 发出的指令
//! - [`DialogueData`]：脚本数据的线上形状
//! - [`DialogueConfig`]：引擎配置（速度、注册表、表现层透传字段）
//!
//! ## 使用示例
//!
//! ```ignore
//! use dialogue_runtime::{DialogueConfig, DialogueData, DialogueEngine};
//!
//! let data: DialogueData = serde_json::from_str(json)?;
//! let mut engine = DialogueEngine::new(DialogueConfig::default());
//! engine.load(&data);
//!
//! for cmd in engine.start_default() {
//!     host.execute(cmd);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`config`]：配置与样式/音频注册表
//! - [`state`]：执行状态定义
//! - [`typewriter`]：逐字揭示控制器
//! - [`error`]：错误类型定义
//! - [`script`]：脚本数据模型、加载期分类、内联标签解析
//! - [`runtime`]：执行引擎

pub mod command;
pub mod config;
pub mod error;
pub mod runtime;
pub mod script;
pub mod state;
pub mod typewriter;

// 重导出核心类型
pub use command::{Choice, Command};
pub use config::{BoxPosition, DialogueConfig, MIN_TYPE_SPEED, TextStyle};
pub use error::{EngineError, EngineResult};
pub use runtime::{DEFAULT_START_LABEL, DialogueEngine};
pub use script::{
    Character, CompiledScript, DialogueData, DialogueSettings, Entry, ParsedLine, RawEntry,
    compile, parse_inline,
};
pub use state::ExecState;
pub use typewriter::{Phase, RevealStep, Typewriter};
