//! # Narrative 模块
//!
//! 叙事来源（故事解释器）的抽象。
//!
//! ## 设计说明
//!
//! - 剧情界面只通过 [`Narrative`] 读取当前台词与选项、推进剧情
//! - 历史记录由叙事来源维护，界面只负责显示与滚动
//! - 所有数据可序列化，便于宿主层记录与回放

use serde::{Deserialize, Serialize};

use crate::assets::CharacterSprite;

/// 一句台词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// 说话者（None 表示旁白）
    pub speaker: Option<String>,
    /// 台词内容
    pub text: String,
    /// 显示的立绘
    pub sprite: Option<CharacterSprite>,
}

impl DialogueLine {
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
            sprite: None,
        }
    }

    pub fn spoken(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: text.into(),
            sprite: None,
        }
    }

    /// 带说话者前缀的显示文本
    pub fn display_text(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("{speaker}: {}", self.text),
            None => self.text.clone(),
        }
    }
}

/// 历史记录条目
///
/// 做出的选择记录为 `speaker = None`、`text = "> 选项"`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: Option<String>,
    pub text: String,
}

impl HistoryEntry {
    pub fn from_line(line: &DialogueLine) -> Self {
        Self {
            speaker: line.speaker.clone(),
            text: line.text.clone(),
        }
    }

    pub fn choice(text: &str) -> Self {
        Self {
            speaker: None,
            text: format!("> {text}"),
        }
    }

    /// 历史面板中的显示文本
    pub fn display_text(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("{speaker}: {}", self.text),
            None => self.text.clone(),
        }
    }
}

/// 叙事来源
pub trait Narrative {
    /// 当前台词（剧情结束或等待选择时可能为 None）
    fn current_line(&self) -> Option<&DialogueLine>;

    /// 推进到下一句，返回是否推进成功
    ///
    /// 有未决选项时不推进。
    fn advance(&mut self) -> bool;

    /// 当前可选项（无选项时为空）
    fn choices(&self) -> &[String];

    /// 选择第 `index` 个选项，越界返回 false
    fn choose(&mut self, index: usize) -> bool;

    /// 历史记录（按时间顺序）
    fn history(&self) -> &[HistoryEntry];

    fn is_finished(&self) -> bool;
}
