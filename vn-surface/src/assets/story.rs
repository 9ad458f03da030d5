//! # 故事文档
//!
//! 故事文件在启动时加载一次，核心层不解释其格式，
//! 只把它交给叙事解释器（见 [`crate::narrative`]）。

use std::io;
use std::path::Path;

use serde_json::Value;

use crate::error::ResourceError;

/// 已加载的故事文档（不透明 JSON）
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDocument {
    /// 来源路径（用于日志）
    source: String,
    root: Value,
}

impl StoryDocument {
    pub fn new(source: impl Into<String>, root: Value) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// 空文档
    pub fn empty() -> Self {
        Self::new("<empty>", Value::Null)
    }

    /// 从 JSON 文本解析
    ///
    /// 导出工具常在文件头写入 BOM，解析前先去掉。
    pub fn parse(source: impl Into<String>, text: &str) -> Result<Self, ResourceError> {
        let source = source.into();
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let root = serde_json::from_str(text).map_err(|e| ResourceError::InvalidFormat {
            path: source.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::new(source, root))
    }

    /// 从文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ResourceError::NotFound {
                path: display.clone(),
            },
            _ => ResourceError::LoadFailed {
                path: display.clone(),
                kind: "story".to_string(),
                message: e.to_string(),
            },
        })?;
        Self::parse(display, &text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 文档根节点
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_null()
    }
}
