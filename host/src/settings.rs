//! # 用户设置
//!
//! 玩家偏好（独立于 config.json 持久化），退出时保存滑块留下的音量。

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{AudioConfig, ConfigError};

/// 用户设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// SFX 音量 (0.0 - 1.0)
    pub sfx_volume: f32,
    /// 背景音乐音量 (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self::from_audio(&AudioConfig::default())
    }
}

impl UserSettings {
    /// 以配置文件中的音频设置为初始值
    pub fn from_audio(audio: &AudioConfig) -> Self {
        if audio.muted {
            return Self {
                sfx_volume: 0.0,
                music_volume: 0.0,
            };
        }
        Self {
            sfx_volume: audio.sfx_volume,
            music_volume: audio.music_volume,
        }
    }

    /// 从文件加载设置，失败时使用 `fallback`
    pub fn load(path: impl AsRef<Path>, fallback: &AudioConfig) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str::<Self>(&content)
                .map(Self::clamped)
                .unwrap_or_else(|e| {
                    warn!(error = %e, "解析用户设置失败，使用默认值");
                    Self::from_audio(fallback)
                }),
            Err(_) => {
                warn!(path = %path.display(), "用户设置文件不存在，使用默认值");
                Self::from_audio(fallback)
            }
        }
    }

    /// 保存设置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;
        info!(path = %path.display(), "用户设置已保存");
        Ok(())
    }

    fn clamped(self) -> Self {
        Self {
            sfx_volume: clamp_volume(self.sfx_volume),
            music_volume: clamp_volume(self.music_volume),
        }
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
