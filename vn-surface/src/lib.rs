//! # VN Surface
//!
//! 视觉小说的界面框架核心库。
//!
//! ## 架构概述
//!
//! `vn-surface` 不依赖任何窗口、渲染或音频后端。
//! 宿主层（Host）每帧按固定顺序驱动 [`SurfaceManager`]：
//!
//! ```text
//! Host                              SurfaceManager
//!   │                                    │
//!   │──── dispatch_event(&event) ×N ────►│ 激活界面 on_event
//!   │──── dispatch_update(dt) ──────────►│ 激活界面 update
//!   │──── dispatch_draw(&mut target) ───►│ 激活界面 draw
//!   │                                    │
//! ```
//!
//! 界面通过 [`SurfaceContext`] 请求跳转、调整全局音效音量；
//! 跳转在当前处理函数返回后执行。
//!
//! ## 核心类型
//!
//! - [`Surface`]：具名界面的生命周期
//! - [`SurfaceManager`]：界面注册表与单一激活界面状态机
//! - [`AssetCatalog`]：类型化资源目录
//! - [`AudioMixer`]：全局音效音量与背景音乐
//! - [`Slider`] / [`Button`] / [`Text`] / [`Banner`]：控件
//! - [`Narrative`]：叙事来源抽象
//!
//! ## 使用示例
//!
//! ```ignore
//! use vn_surface::{AudioMixer, MemoryMusic, SurfaceManager};
//!
//! let mut manager = SurfaceManager::new(AudioMixer::new(Box::new(MemoryMusic::new())));
//! manager.register("root", Box::new(TitleScreen::new(&catalog)))?;
//! manager.set_active_surface("root")?;
//!
//! loop {
//!     for event in poll_events() {
//!         manager.dispatch_event(&event)?;
//!     }
//!     manager.dispatch_update(dt)?;
//!     manager.dispatch_draw(&mut target);
//! }
//! ```

pub mod assets;
pub mod audio;
pub mod error;
pub mod geometry;
pub mod input;
pub mod manager;
pub mod narrative;
pub mod render;
pub mod surface;
pub mod transition;
pub mod ui;

// 重导出核心类型
pub use assets::{
    AssetCatalog, Background, ButtonIcon, ButtonImages, CharacterSprite, FontFace, FontRef,
    ImageRef, Music, Sfx, SoundRef, StoryDocument,
};
pub use audio::{AudioMixer, MemoryMusic, MemorySound, MusicPlayer, SoundEffect};
pub use error::{ConfigurationError, NavigationError, ResourceError, SurfaceError, SurfaceResult};
pub use geometry::{Color, Point, Rect};
pub use input::{InputEvent, KeyCode, MouseButton};
pub use manager::{MAX_REDIRECTS, SurfaceManager};
pub use narrative::{DialogueLine, HistoryEntry, Narrative};
pub use render::{CommandRecorder, DrawCommand, DrawTarget};
pub use surface::{FrameRequests, Surface, SurfaceContext};
pub use transition::FadeTransition;
pub use ui::{Banner, Button, ButtonState, Slider, SliderStyle, Text};
