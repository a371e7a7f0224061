//! # Parse 模块
//!
//! 将原始脚本条目一次性分类为编译条目。
//!
//! ## 分类规则
//!
//! 文本行按字面前缀分类，依次尝试：
//!
//! 1. `jump <label>` → [`Entry::Jump`]（目标为空时等价于 `end`）
//! 2. 恰好 `end` → [`Entry::End`]
//! 3. `show <id> [emotion]` → [`Entry::Show`]
//! 4. `hide <id>` → [`Entry::Hide`]
//! 5. 其余 → [`Entry::Dialogue`]，首个空格分隔 token 匹配已知角色 id
//!    时归属该角色，否则整行作为旁白
//!
//! 分类发生在 `load()` 时，执行引擎不再做字符串前缀匹配。
//! 这里不校验跳转目标是否存在——标签存在性在执行时检查，
//! 与未知标签的软失败策略保持一致。

use std::collections::HashMap;

use crate::command::Choice;
use crate::script::ast::{CompiledScript, Entry};
use crate::script::data::{Character, DialogueData, RawEntry};

/// 编译完整脚本数据
///
/// 对每个标签的条目序列做分类，角色表原样并入编译结果。
pub fn compile(data: &DialogueData) -> CompiledScript {
    let characters = &data.settings.characters;
    let labels: HashMap<String, Vec<Entry>> = data
        .script
        .iter()
        .map(|(label, entries)| {
            let compiled = entries
                .iter()
                .map(|entry| classify(entry, characters))
                .collect();
            (label.clone(), compiled)
        })
        .collect();

    CompiledScript::new(labels, characters.clone())
}

/// 分类单个原始条目
pub fn classify(entry: &RawEntry, characters: &HashMap<String, Character>) -> Entry {
    match entry {
        RawEntry::Line(line) => classify_line(line, characters),
        RawEntry::Choice { choice } => Entry::Choice {
            options: choice
                .iter()
                .map(|(text, target)| Choice::new(text.clone(), target.clone()))
                .collect(),
        },
    }
}

/// 分类单个文本行
fn classify_line(line: &str, characters: &HashMap<String, Character>) -> Entry {
    if let Some(rest) = line.strip_prefix("jump ") {
        let target = rest.trim();
        if target.is_empty() {
            // 空目标的 jump 等价于 end
            return Entry::End;
        }
        return Entry::Jump {
            target_label: target.to_string(),
        };
    }

    if line == "end" {
        return Entry::End;
    }

    if let Some(rest) = line.strip_prefix("show ") {
        let mut parts = rest.trim().split_whitespace();
        let id = parts.next().unwrap_or_default().to_string();
        let emotion = parts.next().unwrap_or_default().to_string();
        return Entry::Show { id, emotion };
    }

    if let Some(rest) = line.strip_prefix("hide ") {
        return Entry::Hide {
            id: rest.trim().to_string(),
        };
    }

    // 对话行：首 token 匹配已知角色 id 时拆分出说话者
    if let Some((first, rest)) = line.split_once(' ')
        && characters.contains_key(first)
    {
        return Entry::Dialogue {
            speaker: Some(first.to_string()),
            text: rest.to_string(),
        };
    }

    Entry::Dialogue {
        speaker: None,
        text: line.to_string(),
    }
}
