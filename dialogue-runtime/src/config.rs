//! # Config 模块
//!
//! 引擎配置：逐字速度、自动推进、样式/音频注册表，以及一组
//! 只透传给 Host 的表现层字段（字体、对话框样式/位置/动画速度）。
//!
//! 配置在构造引擎时提供一次，之后只读。
//! 字段名与原始 JSON 形状保持 camelCase 兼容。

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 逐字速度下限（字符/秒）
///
/// `type_speed` 为 0 时按此值计算 tick 间隔，保证揭示在有限步内完成。
pub const MIN_TYPE_SPEED: u32 = 1;

/// 文本样式描述符
///
/// 样式注册表的值类型，由内联 `{style=name}` 标签引用。
/// 所有字段可选，缺省字段由 Host 按默认样式补齐。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// 文本颜色（如 `#ff3333`）
    pub color: Option<String>,
    /// 粗体
    pub bold: Option<bool>,
    /// 斜体
    pub italic: Option<bool>,
    /// 字号
    pub font_size: Option<u32>,
}

/// 对话框位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxPosition {
    /// 底部
    #[default]
    Bottom,
    /// 顶部
    Top,
    /// 居中
    Center,
}

/// 引擎配置
///
/// # 字段分类
///
/// - 引擎语义：`type_speed`、`auto_forward`、`styles`、`audio`、`debug`
/// - 表现层透传：`font_family`、`box_style`、`box_position`、
///   `box_animation_speed`（引擎不解释，Host 通过 [`DialogueEngine::config`]
///   读取）
///
/// [`DialogueEngine::config`]: crate::runtime::DialogueEngine::config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogueConfig {
    /// 字体族（表现层透传）
    pub font_family: String,

    /// 逐字揭示速度（字符/秒）
    ///
    /// 0 按 [`MIN_TYPE_SPEED`] 处理，不会除零。
    pub type_speed: u32,

    /// 对话框样式名（表现层透传）
    pub box_style: String,

    /// 对话框位置（表现层透传）
    pub box_position: BoxPosition,

    /// 对话框出入动画时长（毫秒，表现层透传）
    pub box_animation_speed: u64,

    /// 自动推进
    ///
    /// 对话行分发后立即请求下一行，不等待外部输入。
    /// 注意：也不等待逐字揭示完成，这是被保留的既有行为。
    pub auto_forward: bool,

    /// 样式注册表：样式名 → 样式描述符
    pub styles: HashMap<String, TextStyle>,

    /// 音频注册表：cue 名 → cue 标识
    pub audio: HashMap<String, String>,

    /// 调试模式：开启逐行执行的详细追踪
    pub debug: bool,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            type_speed: 30,
            box_style: "default".to_string(),
            box_position: BoxPosition::Bottom,
            box_animation_speed: 0,
            auto_forward: false,
            styles: HashMap::new(),
            audio: HashMap::new(),
            debug: false,
        }
    }
}

impl DialogueConfig {
    /// 逐字揭示的 tick 间隔
    ///
    /// 每 tick 揭示一个字符，间隔 = 1000 / type_speed 毫秒。
    /// Host 用此间隔调度 [`DialogueEngine::tick`]。
    ///
    /// [`DialogueEngine::tick`]: crate::runtime::DialogueEngine::tick
    pub fn tick_interval(&self) -> Duration {
        let speed = self.type_speed.max(MIN_TYPE_SPEED);
        Duration::from_millis(1000 / speed as u64)
    }

    /// 查找样式描述符
    pub fn style(&self, name: &str) -> Option<&TextStyle> {
        self.styles.get(name)
    }

    /// 解析音频 cue 名为 cue 标识
    pub fn audio_cue(&self, name: &str) -> Option<&str> {
        self.audio.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DialogueConfig::default();
        assert_eq!(config.font_family, "Arial");
        assert_eq!(config.type_speed, 30);
        assert_eq!(config.box_position, BoxPosition::Bottom);
        assert!(!config.auto_forward);
        assert!(!config.debug);
        assert!(config.styles.is_empty());
        assert!(config.audio.is_empty());
    }

    #[test]
    fn test_tick_interval() {
        let config = DialogueConfig {
            type_speed: 40,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(25));
    }

    #[test]
    fn test_tick_interval_zero_speed_clamped() {
        // type_speed = 0 不允许除零，按下限处理
        let config = DialogueConfig {
            type_speed: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_config_from_camel_case_json() {
        // 与原始配置的 JSON 形状兼容
        let json = r##"{
            "fontFamily": "Arial",
            "typeSpeed": 40,
            "boxStyle": "default",
            "autoForward": false,
            "boxAnimationSpeed": 200,
            "boxPosition": "bottom",
            "debug": true,
            "styles": {
                "whisper": { "color": "#888888", "italic": true },
                "shout": { "color": "#ffff00", "bold": true }
            },
            "audio": {
                "surprise": "surprise",
                "hello": "hello"
            }
        }"##;

        let config: DialogueConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.type_speed, 40);
        assert_eq!(config.box_animation_speed, 200);
        assert!(config.debug);
        assert_eq!(
            config.style("whisper"),
            Some(&TextStyle {
                color: Some("#888888".to_string()),
                italic: Some(true),
                ..TextStyle::default()
            })
        );
        assert_eq!(config.audio_cue("hello"), Some("hello"));
        assert_eq!(config.audio_cue("unknown"), None);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: DialogueConfig = serde_json::from_str(r#"{ "typeSpeed": 10 }"#).unwrap();
        assert_eq!(config.type_speed, 10);
        assert_eq!(config.font_family, "Arial");
        assert_eq!(config.box_style, "default");
    }
}
