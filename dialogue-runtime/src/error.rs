//! # Error 模块
//!
//! 定义 dialogue-runtime 中使用的错误类型。
//!
//! 引擎的公开操作从不向 Host 抛出错误：内部可失败路径返回
//! [`EngineError`]，操作边界将其降级为日志 + 安全的无操作或结束对话
//! （见 `runtime::engine`）。

use thiserror::Error;

/// 引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 尚未加载脚本数据
    #[error("尚未加载脚本数据，请先调用 load()")]
    NoDataLoaded,

    /// 标签未找到
    #[error("标签 '{label}' 未找到")]
    LabelNotFound {
        /// 缺失的标签名
        label: String,
    },

    /// 空的选择分支
    #[error("选择分支为空，视为对话结束")]
    EmptyChoice,
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
