//! # Surface 模块
//!
//! 界面（Surface）是一个具名的屏幕/场景，拥有统一的生命周期：
//! 激活、处理输入、逐帧更新、绘制。
//!
//! ## 设计说明
//!
//! - 具体界面是 [`Surface`] 的不同实现，统一由 [`crate::SurfaceManager`] 持有
//! - 界面不直接引用管理器，而是通过 [`SurfaceContext`] 提出请求：
//!   跳转请求在当前处理函数返回后才由管理器执行，
//!   因此在事件处理中途跳转不会破坏管理器的状态
//! - 资源目录在构造界面时以引用传入，不存在全局单例

use std::rc::Rc;

use crate::audio::{AudioMixer, SoundEffect};
use crate::input::InputEvent;
use crate::render::DrawTarget;

/// 界面在一次处理函数中提出的请求
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameRequests {
    /// 跳转目标（多次请求时以最后一次为准）
    navigate: Option<String>,
    /// 是否请求退出
    quit: bool,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// 跳转目标
    pub fn navigation(&self) -> Option<&str> {
        self.navigate.as_deref()
    }

    /// 取出跳转目标
    pub fn take_navigation(&mut self) -> Option<String> {
        self.navigate.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// 界面处理函数可以访问的全局状态
pub struct SurfaceContext<'a> {
    mixer: &'a mut AudioMixer,
    requests: &'a mut FrameRequests,
}

impl<'a> SurfaceContext<'a> {
    pub fn new(mixer: &'a mut AudioMixer, requests: &'a mut FrameRequests) -> Self {
        Self { mixer, requests }
    }

    /// 请求切换到指定界面
    ///
    /// 请求在当前处理函数返回后执行；目标不存在时由分发调用返回错误。
    pub fn set_active_surface_by_name(&mut self, name: impl Into<String>) {
        self.requests.navigate = Some(name.into());
    }

    /// 请求退出游戏
    pub fn request_quit(&mut self) {
        self.requests.quit = true;
    }

    /// 设置全局音效音量，返回钳制后的实际音量
    pub fn set_global_sfx_volume(&mut self, volume: f32) -> f32 {
        self.mixer.set_global_sfx_volume(volume)
    }

    /// 登记音效句柄，使其跟随全局音效音量
    pub fn register_sfx(&mut self, handle: Rc<dyn SoundEffect>) {
        self.mixer.register_sfx(handle);
    }

    pub fn audio(&self) -> &AudioMixer {
        &*self.mixer
    }

    pub fn audio_mut(&mut self) -> &mut AudioMixer {
        &mut *self.mixer
    }

    /// 本次处理中已提出的请求
    pub fn requests(&self) -> &FrameRequests {
        &*self.requests
    }
}

/// 界面
///
/// - `on_event`：对单个事件的反应，不得自行运行事件循环
/// - `update`：每帧调用一次，`dt` 为帧间隔（秒），与事件数量无关
/// - `draw`：只读，除了向绘制目标输出像素外没有副作用
/// - `hook`：首次激活时调用一次（一次性场景准备）
/// - `on_enter`：每次激活时调用（重置滚动位置、重新开始淡入等）
/// - `on_leave`：每次被停用时调用（清除按钮悬停、按下与拖动状态）
///
/// 未激活的界面不会收到任何调用，由管理器在槽位层面保证。
pub trait Surface {
    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>);

    fn update(&mut self, dt: f32, ctx: &mut SurfaceContext<'_>);

    fn draw(&self, target: &mut dyn DrawTarget);

    fn hook(&mut self, _ctx: &mut SurfaceContext<'_>) {}

    fn on_enter(&mut self, _ctx: &mut SurfaceContext<'_>) {}

    fn on_leave(&mut self) {}
}
