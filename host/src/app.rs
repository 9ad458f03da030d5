//! # App 模块
//!
//! 游戏主体：持有界面管理器，按固定顺序驱动每一帧。
//!
//! ## 帧顺序
//!
//! 1. 每个待处理事件调用一次 `dispatch_event`
//! 2. `dispatch_update(dt)` 一次
//! 3. `dispatch_draw` 一次
//!
//! 任何一步返回错误都会立即中止本帧并向上传递。

use tracing::info;
use vn_surface::{
    AssetCatalog, AudioMixer, DrawTarget, InputEvent, Narrative, SurfaceManager, SurfaceResult,
};

use crate::config::AppConfig;
use crate::screens;
use crate::settings::UserSettings;

/// 游戏主体
pub struct App {
    manager: SurfaceManager,
    /// 已完成的帧数
    frames: u64,
}

impl App {
    /// 构造所有界面并激活启动界面
    pub fn new(
        config: &AppConfig,
        settings: &UserSettings,
        catalog: &AssetCatalog,
        narrative: Box<dyn Narrative>,
        mut mixer: AudioMixer,
    ) -> SurfaceResult<Self> {
        mixer.set_global_sfx_volume(settings.sfx_volume);
        mixer.set_music_volume(settings.music_volume);

        let mut manager = SurfaceManager::new(mixer);
        screens::build(catalog, &mut manager, narrative, config.screen_size())?;
        info!(
            surfaces = ?manager.surface_names(),
            start = %config.start_surface,
            "界面注册完成"
        );
        manager.set_active_surface(&config.start_surface)?;

        Ok(Self { manager, frames: 0 })
    }

    /// 运行一帧
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        dt: f32,
        target: &mut dyn DrawTarget,
    ) -> SurfaceResult<()> {
        for event in events {
            self.manager.dispatch_event(event)?;
        }
        self.manager.dispatch_update(dt)?;
        self.manager.dispatch_draw(target);
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn should_quit(&self) -> bool {
        self.manager.should_quit()
    }

    pub fn active_surface(&self) -> Option<&str> {
        self.manager.active_surface()
    }

    pub fn manager(&self) -> &SurfaceManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut SurfaceManager {
        &mut self.manager
    }

    /// 当前音量对应的用户设置（退出时保存）
    pub fn user_settings(&self) -> UserSettings {
        UserSettings {
            sfx_volume: self.manager.global_sfx_volume(),
            music_volume: self.manager.mixer().music_volume(),
        }
    }
}
