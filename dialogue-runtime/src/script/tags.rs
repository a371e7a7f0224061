//! # Tags 模块
//!
//! 内联标签解析：从行文本中剥离 `{style=...}...{/style}` 与
//! `{audio=...}{/audio}` 标注，返回净化文本和样式/音频副作用。
//!
//! ## 解析策略
//!
//! - 单遍文本替换，标签不嵌套
//! - 样式标签可多次出现，内容保留、标签剥离；整行的活动样式取
//!   **第一个**在注册表中命中的样式——一行内多个不同样式的片段
//!   不做独立着色，这是有意保留的简化，不是缺陷
//! - 音频标签内容恒空，每次命中在解析时（而非揭示时）排入播放队列
//! - 未知样式/音频名按无操作处理：标签剥离、不记录效果、不报错
//! - 残缺/未闭合的标签不被正则命中，按字面文本原样通过——
//!   宽容策略，不是致命错误

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{DialogueConfig, TextStyle};

/// 样式标签：`{style=<name>}<content>{/style}`，内容非贪婪
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{style=([^}]+)\}(.*?)\{/style\}").unwrap());

/// 音频标签：`{audio=<name>}{/audio}`，内容恒空
static AUDIO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{audio=([^}]+)\}\{/audio\}").unwrap());

/// 内联标签解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// 净化文本（标签剥离、内容保留）
    pub clean_text: String,
    /// 整行活动样式（第一个命中注册表的样式标签）
    pub style: Option<TextStyle>,
    /// 待播放的 cue 标识（已经过音频注册表解析）
    pub cues: Vec<String>,
}

/// 解析行文本中的内联标签
pub fn parse_inline(raw: &str, config: &DialogueConfig) -> ParsedLine {
    // 先剥离音频标签并解析 cue
    let mut cues = Vec::new();
    for caps in AUDIO_RE.captures_iter(raw) {
        let name = &caps[1];
        match config.audio_cue(name) {
            Some(cue) => cues.push(cue.to_string()),
            None => {
                tracing::debug!(name, "未知音频 cue 名，标签剥离但不播放");
            }
        }
    }
    let without_audio = AUDIO_RE.replace_all(raw, "");

    // 再剥离样式标签，记录第一个命中的样式
    let mut style: Option<TextStyle> = None;
    for caps in STYLE_RE.captures_iter(&without_audio) {
        let name = &caps[1];
        match config.style(name) {
            Some(found) => {
                if style.is_none() {
                    style = Some(found.clone());
                }
            }
            None => {
                tracing::debug!(name, "未知样式名，标签剥离但不生效");
            }
        }
    }
    let clean_text = STYLE_RE.replace_all(&without_audio, "$2").into_owned();

    ParsedLine {
        clean_text,
        style,
        cues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config() -> DialogueConfig {
        let mut styles = HashMap::new();
        styles.insert(
            "whisper".to_string(),
            TextStyle {
                italic: Some(true),
                ..TextStyle::default()
            },
        );
        styles.insert(
            "shout".to_string(),
            TextStyle {
                color: Some("#ffff00".to_string()),
                bold: Some(true),
                ..TextStyle::default()
            },
        );
        let mut audio = HashMap::new();
        audio.insert("ding".to_string(), "dingCue".to_string());
        DialogueConfig {
            styles,
            audio,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_text_passes_through() {
        let parsed = parse_inline("Hello, world!", &config());
        assert_eq!(parsed.clean_text, "Hello, world!");
        assert!(parsed.style.is_none());
        assert!(parsed.cues.is_empty());
    }

    #[test]
    fn test_style_and_audio_round_trip() {
        // 样式与音频标签混合出现在同一行
        let parsed = parse_inline(
            "hello {style=whisper}world{/style} {audio=ding}{/audio}!",
            &config(),
        );
        assert_eq!(parsed.clean_text, "hello world !");
        assert_eq!(
            parsed.style,
            Some(TextStyle {
                italic: Some(true),
                ..TextStyle::default()
            })
        );
        assert_eq!(parsed.cues, vec!["dingCue".to_string()]);
    }

    #[test]
    fn test_first_known_style_wins() {
        let parsed = parse_inline(
            "{style=whisper}a{/style} {style=shout}b{/style}",
            &config(),
        );
        assert_eq!(parsed.clean_text, "a b");
        // 整行样式取第一个命中的标签
        assert_eq!(parsed.style.unwrap().italic, Some(true));
    }

    #[test]
    fn test_unknown_style_stripped_without_effect() {
        let parsed = parse_inline("{style=nope}text{/style}", &config());
        assert_eq!(parsed.clean_text, "text");
        assert!(parsed.style.is_none());
    }

    #[test]
    fn test_unknown_style_then_known_style() {
        // 未知样式不占据"第一个"名额
        let parsed = parse_inline(
            "{style=nope}a{/style} {style=shout}b{/style}",
            &config(),
        );
        assert_eq!(parsed.clean_text, "a b");
        assert_eq!(parsed.style.unwrap().bold, Some(true));
    }

    #[test]
    fn test_unknown_audio_stripped_without_cue() {
        let parsed = parse_inline("{audio=nope}{/audio}hi", &config());
        assert_eq!(parsed.clean_text, "hi");
        assert!(parsed.cues.is_empty());
    }

    #[test]
    fn test_multiple_audio_cues_in_order() {
        let parsed = parse_inline(
            "{audio=ding}{/audio}a{audio=ding}{/audio}b",
            &config(),
        );
        assert_eq!(parsed.clean_text, "ab");
        assert_eq!(parsed.cues.len(), 2);
    }

    #[test]
    fn test_unterminated_tag_left_literal() {
        // 未闭合标签不被命中，按字面通过
        let parsed = parse_inline("{style=whisper}oops", &config());
        assert_eq!(parsed.clean_text, "{style=whisper}oops");
        assert!(parsed.style.is_none());

        let parsed = parse_inline("{audio=ding}oops", &config());
        assert_eq!(parsed.clean_text, "{audio=ding}oops");
        assert!(parsed.cues.is_empty());
    }

    #[test]
    fn test_audio_tag_with_content_not_matched() {
        // 音频标签内容恒空，夹带内容的写法不是合法标签
        let parsed = parse_inline("{audio=ding}x{/audio}", &config());
        assert_eq!(parsed.clean_text, "{audio=ding}x{/audio}");
        assert!(parsed.cues.is_empty());
    }

    #[test]
    fn test_style_content_preserved_non_greedy() {
        let parsed = parse_inline(
            "{style=shout}A{/style} mid {style=shout}B{/style}",
            &config(),
        );
        // 非贪婪匹配：两个标签各自剥离，中间文本保留
        assert_eq!(parsed.clean_text, "A mid B");
    }
}
