//! # Headless 模式
//!
//! 不打开窗口、不播放声音，按回放文件逐帧驱动 [`App`]，
//! 绘制调用记录在 [`CommandRecorder`] 中。
//!
//! 回放文件格式：
//!
//! ```json
//! { "frames": [[{"PointerDown": {"pos": {"x": 1.0, "y": 2.0}, "button": "Left"}}], []] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use vn_surface::{CommandRecorder, InputEvent, SurfaceResult};

use crate::app::App;

/// 回放文件错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayError {
    #[error("读取回放文件失败: {path} - {message}")]
    Io { path: String, message: String },

    #[error("回放文件格式错误: {path} - {message}")]
    Parse { path: String, message: String },
}

/// 输入回放：每帧一组事件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    #[serde(default)]
    pub frames: Vec<Vec<InputEvent>>,
}

impl Replay {
    pub fn parse(source: &str, text: &str) -> Result<Self, ReplayError> {
        serde_json::from_str(text).map_err(|e| ReplayError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::parse(&display, &text)
    }

    /// 第 `index` 帧的事件（超出回放长度时为空）
    pub fn events(&self, index: usize) -> &[InputEvent] {
        self.frames.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// 实际运行的帧数
    pub frames: usize,
    /// 是否因退出请求而结束
    pub quit: bool,
    /// 结束时的激活界面
    pub final_surface: Option<String>,
    /// 最后一帧的绘制调用数
    pub draw_commands: usize,
}

/// Headless 帧驱动
pub struct HeadlessDriver {
    recorder: CommandRecorder,
    /// 固定帧间隔（秒）
    dt: f32,
    /// 最大帧数
    max_frames: usize,
}

impl HeadlessDriver {
    pub fn new(screen_size: (f32, f32), dt: f32, max_frames: usize) -> Self {
        Self {
            recorder: CommandRecorder::new(screen_size.0, screen_size.1),
            dt,
            max_frames,
        }
    }

    /// 运行直到有界面请求退出或达到帧数上限
    pub fn run(&mut self, app: &mut App, replay: &Replay) -> SurfaceResult<RunSummary> {
        let mut frames = 0;
        while frames < self.max_frames && !app.should_quit() {
            let events = replay.events(frames);
            self.recorder.clear();
            app.frame(events, self.dt, &mut self.recorder)?;
            debug!(
                frame = frames,
                events = events.len(),
                surface = app.active_surface().unwrap_or("<none>"),
                "帧完成"
            );
            frames += 1;
        }

        let summary = RunSummary {
            frames,
            quit: app.should_quit(),
            final_surface: app.active_surface().map(str::to_string),
            draw_commands: self.recorder.commands().len(),
        };
        info!(
            frames = summary.frames,
            quit = summary.quit,
            surface = summary.final_surface.as_deref().unwrap_or("<none>"),
            "headless 运行结束"
        );
        Ok(summary)
    }

    /// 最后一帧的绘制记录
    pub fn recorder(&self) -> &CommandRecorder {
        &self.recorder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vn_surface::KeyCode;

    #[test]
    fn test_parse_replay() {
        let replay = Replay::parse(
            "replay.json",
            r#"{"frames": [[{"KeyDown": {"key": "Escape"}}], []]}"#,
        )
        .unwrap();
        assert_eq!(replay.events(0), &[InputEvent::key(KeyCode::Escape)]);
        assert!(replay.events(1).is_empty());
        assert!(replay.events(99).is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Replay::parse("replay.json", "[1, 2"),
            Err(ReplayError::Parse { .. })
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Replay::load(dir.path().join("missing.json")),
            Err(ReplayError::Io { .. })
        ));
    }
}
