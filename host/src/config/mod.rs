//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 资源根目录
    #[serde(default = "default_assets_root")]
    pub assets_root: PathBuf,

    /// 故事文件路径（相对于 assets_root）
    #[serde(default = "default_story_path")]
    pub story_path: String,

    /// 启动后激活的界面
    #[serde(default = "default_start_surface")]
    pub start_surface: String,

    /// 用户设置文件路径
    #[serde(default = "default_user_settings_path")]
    pub user_settings_path: PathBuf,

    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,
}

/// 窗口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,

    /// 是否全屏
    #[serde(default = "default_fullscreen")]
    pub fullscreen: bool,
}

/// 音频配置（用户设置缺失时的初始值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// SFX 音量 (0.0 - 1.0)
    #[serde(default = "default_sfx_volume")]
    pub sfx_volume: f32,

    /// 背景音乐音量 (0.0 - 1.0)
    #[serde(default = "default_music_volume")]
    pub music_volume: f32,

    /// 是否静音
    #[serde(default)]
    pub muted: bool,
}

// 默认值函数
fn default_assets_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_story_path() -> String {
    "story/json/story.ink.json".to_string()
}

fn default_start_surface() -> String {
    "root".to_string()
}

fn default_user_settings_path() -> PathBuf {
    PathBuf::from("user_settings.json")
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_window_title() -> String {
    "Moonlit".to_string()
}

fn default_fullscreen() -> bool {
    true
}

fn default_sfx_volume() -> f32 {
    1.0
}

fn default_music_volume() -> f32 {
    0.8
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_root: default_assets_root(),
            story_path: default_story_path(),
            start_surface: default_start_surface(),
            user_settings_path: default_user_settings_path(),
            window: WindowConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
            fullscreen: default_fullscreen(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sfx_volume: default_sfx_volume(),
            music_volume: default_music_volume(),
            muted: false,
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 故事文件完整路径
    pub fn story_full_path(&self) -> PathBuf {
        self.assets_root.join(&self.story_path)
    }

    /// 屏幕尺寸（宽, 高）
    pub fn screen_size(&self) -> (f32, f32) {
        (self.window.width as f32, self.window.height as f32)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_surface.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "必须配置 start_surface（启动界面）".to_string(),
            ));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationFailed(format!(
                "窗口尺寸无效: {}x{}",
                self.window.width, self.window.height
            )));
        }

        if !(0.0..=1.0).contains(&self.audio.sfx_volume) {
            return Err(ConfigError::ValidationFailed(
                "SFX 音量必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.audio.music_volume) {
            return Err(ConfigError::ValidationFailed(
                "音乐音量必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
