//! # Host 层
//!
//! Moonlit 视觉小说的宿主层实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置与用户设置的加载、保存
//! - 构造具体界面（标题、设置、剧情场景、暂停菜单）并注册到界面管理器
//! - 提供叙事来源
//! - 驱动帧循环（headless 模式下由回放文件提供输入）
//!
//! 界面状态机、控件与资源目录在 `vn-surface` 中实现。

pub mod app;
pub mod config;
pub mod headless;
pub mod narrative;
pub mod screens;
pub mod settings;

pub use app::App;
pub use config::{AppConfig, AudioConfig, ConfigError, WindowConfig};
pub use headless::{HeadlessDriver, Replay, ReplayError, RunSummary};
pub use narrative::{Beat, BeatChoice, ScriptedNarrative};
pub use settings::UserSettings;
