//! # 脚本化叙事来源
//!
//! ink 解释器之外的简易叙事来源：从一个小型 JSON 脚本读取剧情节拍。
//!
//! ```json
//! {
//!   "beats": [
//!     { "id": "start", "speaker": "Mia", "text": "...", "sprite": "Girl1Standing", "next": "gate" },
//!     { "id": "gate", "text": "...", "choices": [{ "text": "Go in", "goto": "inside" }] }
//!   ]
//! }
//! ```
//!
//! - `id` 可省略，省略时无法被跳转引用
//! - `next` 省略时顺序进入下一个节拍
//! - 所有 `next` / `goto` 引用在构造时检查

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vn_surface::{CharacterSprite, DialogueLine, HistoryEntry, Narrative, ResourceError, StoryDocument};

/// 选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatChoice {
    pub text: String,
    /// 目标节拍 id
    pub goto: String,
}

/// 剧情节拍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
    #[serde(default)]
    pub sprite: Option<CharacterSprite>,
    #[serde(default)]
    pub choices: Vec<BeatChoice>,
    #[serde(default)]
    pub next: Option<String>,
}

impl Beat {
    fn line(&self) -> DialogueLine {
        let line = match &self.speaker {
            Some(speaker) => DialogueLine::spoken(speaker, &self.text),
            None => DialogueLine::narration(&self.text),
        };
        DialogueLine {
            sprite: self.sprite,
            ..line
        }
    }
}

#[derive(Debug, Deserialize)]
struct Script {
    beats: Vec<Beat>,
}

/// 脚本化叙事来源
#[derive(Debug, Clone)]
pub struct ScriptedNarrative {
    beats: Vec<Beat>,
    /// id → 下标
    labels: HashMap<String, usize>,
    /// 当前节拍（None 表示剧情结束）
    cursor: Option<usize>,
    current: Option<DialogueLine>,
    choices: Vec<String>,
    history: Vec<HistoryEntry>,
}

impl ScriptedNarrative {
    /// 由节拍列表构造，检查跳转引用
    pub fn new(source: &str, beats: Vec<Beat>) -> Result<Self, ResourceError> {
        let invalid = |message: String| ResourceError::InvalidFormat {
            path: source.to_string(),
            message,
        };

        if beats.is_empty() {
            return Err(invalid("脚本没有任何节拍".to_string()));
        }

        let narrative = Self::build(beats);
        for beat in &narrative.beats {
            let targets = beat
                .next
                .iter()
                .chain(beat.choices.iter().map(|choice| &choice.goto));
            for target in targets {
                if !narrative.labels.contains_key(target) {
                    return Err(invalid(format!("引用了不存在的节拍 '{target}'")));
                }
            }
        }
        Ok(narrative)
    }

    /// 从故事文档读取
    ///
    /// 文档不是 `{ "beats": [...] }` 形状时返回 `InvalidFormat`。
    pub fn from_document(document: &StoryDocument) -> Result<Self, ResourceError> {
        let script: Script =
            serde_json::from_value(document.root().clone()).map_err(|e| {
                ResourceError::InvalidFormat {
                    path: document.source().to_string(),
                    message: e.to_string(),
                }
            })?;
        Self::new(document.source(), script.beats)
    }

    pub fn beat_count(&self) -> usize {
        self.beats.len()
    }

    /// 内置的最小剧情（故事文件无法被读取时使用）
    pub fn fallback() -> Self {
        let beat = |id: &str, speaker: Option<&str>, text: &str| Beat {
            id: Some(id.to_string()),
            speaker: speaker.map(str::to_string),
            text: text.to_string(),
            sprite: None,
            choices: Vec::new(),
            next: None,
        };

        let mut beats = vec![
            beat("dusk", None, "The sun sinks behind the abandoned amusement park."),
            beat("gate", Some("Mia"), "The gate is open. Should we go in?"),
            beat("inside", Some("Mia"), "Stay close. It is darker than I thought."),
            beat("home", Some("Mia"), "Maybe another night, then."),
        ];
        beats[1].sprite = Some(CharacterSprite::Girl1Standing);
        beats[1].choices = vec![
            BeatChoice {
                text: "Walk through the gate".to_string(),
                goto: "inside".to_string(),
            },
            BeatChoice {
                text: "Head back home".to_string(),
                goto: "home".to_string(),
            },
        ];
        beats[2].sprite = Some(CharacterSprite::Girl1StandingLeft);
        beats[2].next = Some("end".to_string());
        beats.push(beat("end", None, "The night goes quiet."));

        Self::build(beats)
    }

    fn build(beats: Vec<Beat>) -> Self {
        let labels = beats
            .iter()
            .enumerate()
            .filter_map(|(index, beat)| beat.id.clone().map(|id| (id, index)))
            .collect();
        let mut narrative = Self {
            beats,
            labels,
            cursor: None,
            current: None,
            choices: Vec::new(),
            history: Vec::new(),
        };
        narrative.enter(Some(0));
        narrative
    }

    fn enter(&mut self, index: Option<usize>) {
        self.cursor = index.filter(|&i| i < self.beats.len());
        match self.cursor.map(|i| &self.beats[i]) {
            Some(beat) => {
                let line = beat.line();
                self.choices = beat.choices.iter().map(|c| c.text.clone()).collect();
                self.history.push(HistoryEntry::from_line(&line));
                self.current = Some(line);
            }
            None => {
                self.current = None;
                self.choices.clear();
            }
        }
    }

    fn label(&self, id: &str) -> Option<usize> {
        self.labels.get(id).copied()
    }
}

impl Narrative for ScriptedNarrative {
    fn current_line(&self) -> Option<&DialogueLine> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> bool {
        let Some(index) = self.cursor else {
            return false;
        };
        if !self.choices.is_empty() {
            return false;
        }
        let next = match &self.beats[index].next {
            Some(id) => self.label(id),
            None => Some(index + 1),
        };
        self.enter(next);
        true
    }

    fn choices(&self) -> &[String] {
        &self.choices
    }

    fn choose(&mut self, index: usize) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        let Some(choice) = self.beats[cursor].choices.get(index) else {
            return false;
        };
        debug!(choice = %choice.text, "选择选项");
        let entry = HistoryEntry::choice(&choice.text);
        let target = self.label(&choice.goto);
        self.history.push(entry);
        self.enter(target);
        true
    }

    fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn is_finished(&self) -> bool {
        self.cursor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> StoryDocument {
        StoryDocument::parse("story.json", json).unwrap()
    }

    #[test]
    fn test_linear_script() {
        let doc = document(
            r#"{"beats": [
                {"speaker": "Mia", "text": "Hello"},
                {"text": "Night falls.", "sprite": "Boy1Standing"}
            ]}"#,
        );
        let mut narrative = ScriptedNarrative::from_document(&doc).unwrap();
        assert_eq!(narrative.current_line().unwrap().display_text(), "Mia: Hello");

        assert!(narrative.advance());
        let line = narrative.current_line().unwrap();
        assert_eq!(line.text, "Night falls.");
        assert_eq!(line.sprite, Some(CharacterSprite::Boy1Standing));

        assert!(narrative.advance());
        assert!(narrative.is_finished());
        assert!(narrative.current_line().is_none());
        assert!(!narrative.advance());
        assert_eq!(narrative.history().len(), 2);
    }

    #[test]
    fn test_choices_block_advance() {
        let mut narrative = ScriptedNarrative::fallback();
        assert!(narrative.advance());
        assert_eq!(narrative.choices().len(), 2);
        assert!(!narrative.advance());
        assert!(!narrative.choose(5));

        assert!(narrative.choose(1));
        assert_eq!(
            narrative.current_line().unwrap().text,
            "Maybe another night, then."
        );
        let history: Vec<String> = narrative
            .history()
            .iter()
            .map(HistoryEntry::display_text)
            .collect();
        assert_eq!(history[2], "> Head back home");
    }

    #[test]
    fn test_fallback_references_resolve() {
        let fallback = ScriptedNarrative::fallback();
        assert_eq!(fallback.beat_count(), 5);
        assert!(ScriptedNarrative::new("fallback", fallback.beats.clone()).is_ok());
    }

    #[test]
    fn test_ink_export_is_invalid_format() {
        let doc = document(r#"{"inkVersion": 21, "root": []}"#);
        let err = ScriptedNarrative::from_document(&doc).unwrap_err();
        assert!(matches!(err, ResourceError::InvalidFormat { .. }));
    }

    #[test]
    fn test_dangling_goto_rejected() {
        let doc = document(
            r#"{"beats": [{"text": "?", "choices": [{"text": "a", "goto": "missing"}]}]}"#,
        );
        let err = ScriptedNarrative::from_document(&doc).unwrap_err();
        assert!(matches!(err, ResourceError::InvalidFormat { .. }));
    }

    #[test]
    fn test_empty_script_rejected() {
        let doc = document(r#"{"beats": []}"#);
        assert!(ScriptedNarrative::from_document(&doc).is_err());
    }
}
