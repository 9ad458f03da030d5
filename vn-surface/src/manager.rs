//! # Manager 模块
//!
//! 界面注册表与单一激活界面的状态机。
//!
//! ## 设计说明
//!
//! - 每个界面存放在一个槽位中，槽位带有 `active` 标志；
//!   所有处理函数都经由槽位调用，未激活时不做任何事
//! - 任一时刻至多一个槽位处于激活状态，且等于最后一次成功请求的名称
//! - 处理函数中提出的跳转请求在该函数返回后、同一次分发内执行；
//!   目标不存在时由分发调用返回错误
//! - 停用时调用 `on_leave`，界面在此丢弃悬停、按下等指针状态
//! - `hook`/`on_enter` 中提出的跳转会继续跟随，超过
//!   [`MAX_REDIRECTS`] 次视为配置错误（互相跳转的死循环）

use tracing::{debug, info};

use crate::audio::AudioMixer;
use crate::error::{ConfigurationError, NavigationError, SurfaceResult};
use crate::input::InputEvent;
use crate::render::DrawTarget;
use crate::surface::{FrameRequests, Surface, SurfaceContext};

/// 激活期间允许的最大连续跳转次数
pub const MAX_REDIRECTS: usize = 8;

/// 界面槽位
struct SurfaceSlot {
    surface: Box<dyn Surface>,
    active: bool,
    /// `hook` 是否已经执行过
    hooked: bool,
}

impl SurfaceSlot {
    fn new(surface: Box<dyn Surface>) -> Self {
        Self {
            surface,
            active: false,
            hooked: false,
        }
    }

    fn activate(&mut self, ctx: &mut SurfaceContext<'_>) {
        self.active = true;
        if !self.hooked {
            self.hooked = true;
            self.surface.hook(ctx);
        }
        self.surface.on_enter(ctx);
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.surface.on_leave();
    }

    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) {
        if self.active {
            self.surface.on_event(event, ctx);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut SurfaceContext<'_>) {
        if self.active {
            self.surface.update(dt, ctx);
        }
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        if self.active {
            self.surface.draw(target);
        }
    }
}

/// 界面管理器
pub struct SurfaceManager {
    /// 按注册顺序排列的界面
    slots: Vec<(String, SurfaceSlot)>,
    /// 当前激活槽位的下标
    active: Option<usize>,
    mixer: AudioMixer,
    quit: bool,
}

impl SurfaceManager {
    pub fn new(mixer: AudioMixer) -> Self {
        Self {
            slots: Vec::new(),
            active: None,
            mixer,
            quit: false,
        }
    }

    /// 注册界面，名称重复时报错
    pub fn register(
        &mut self,
        name: impl Into<String>,
        surface: Box<dyn Surface>,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        if self.index_of(&name).is_some() {
            return Err(ConfigurationError::DuplicateSurface { name });
        }
        debug!(name = %name, "注册界面");
        self.slots.push((name, SurfaceSlot::new(surface)));
        Ok(())
    }

    /// 切换激活界面
    ///
    /// - 名称不存在：返回 `SurfaceNotFound`，当前激活界面不变
    /// - 名称与当前激活界面相同：不做任何事
    /// - 否则：停用旧界面，激活新界面（首次激活时先执行 `hook`，每次都执行 `on_enter`）
    pub fn set_active_surface(&mut self, name: &str) -> SurfaceResult<()> {
        let mut target = name.to_string();
        for _ in 0..=MAX_REDIRECTS {
            match self.activate(&target)? {
                Some(next) => target = next,
                None => return Ok(()),
            }
        }
        Err(ConfigurationError::RedirectLoop {
            limit: MAX_REDIRECTS,
            last: target,
        }
        .into())
    }

    /// 按名称切换激活界面（与 [`Self::set_active_surface`] 相同）
    ///
    /// 界面处理函数内部应使用 [`SurfaceContext::set_active_surface_by_name`]。
    pub fn set_active_surface_by_name(&mut self, name: &str) -> SurfaceResult<()> {
        self.set_active_surface(name)
    }

    /// 激活一个界面，返回激活过程中提出的跳转请求
    fn activate(&mut self, name: &str) -> Result<Option<String>, NavigationError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| NavigationError::SurfaceNotFound {
                name: name.to_string(),
            })?;
        if self.active == Some(index) {
            return Ok(None);
        }

        if let Some(previous) = self.active {
            self.slots[previous].1.deactivate();
        }
        debug!(
            from = self.active_surface().unwrap_or("<none>"),
            to = name,
            "切换界面"
        );
        self.active = Some(index);

        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut self.mixer, &mut requests);
        self.slots[index].1.activate(&mut ctx);

        self.quit |= requests.quit_requested();
        Ok(requests.take_navigation())
    }

    /// 将一个输入事件分发给激活界面
    pub fn dispatch_event(&mut self, event: &InputEvent) -> SurfaceResult<()> {
        let Some(index) = self.active else {
            return Ok(());
        };
        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut self.mixer, &mut requests);
        self.slots[index].1.on_event(event, &mut ctx);
        self.apply(requests)
    }

    /// 每帧调用一次激活界面的 `update`
    pub fn dispatch_update(&mut self, dt: f32) -> SurfaceResult<()> {
        let Some(index) = self.active else {
            return Ok(());
        };
        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut self.mixer, &mut requests);
        self.slots[index].1.update(dt, &mut ctx);
        self.apply(requests)
    }

    /// 绘制激活界面
    pub fn dispatch_draw(&self, target: &mut dyn DrawTarget) {
        if let Some(index) = self.active {
            self.slots[index].1.draw(target);
        }
    }

    /// 执行处理函数返回后留下的请求
    fn apply(&mut self, mut requests: FrameRequests) -> SurfaceResult<()> {
        if requests.quit_requested() && !self.quit {
            info!("收到退出请求");
            self.quit = true;
        }
        match requests.take_navigation() {
            Some(name) => self.set_active_surface(&name),
            None => Ok(()),
        }
    }

    /// 设置全局音效音量，返回钳制后的实际音量
    pub fn set_global_sfx_volume(&mut self, volume: f32) -> f32 {
        self.mixer.set_global_sfx_volume(volume)
    }

    pub fn global_sfx_volume(&self) -> f32 {
        self.mixer.global_sfx_volume()
    }

    /// 当前激活界面的名称
    pub fn active_surface(&self) -> Option<&str> {
        self.active.map(|index| self.slots[index].0.as_str())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_surface() == Some(name)
    }

    /// 已注册的界面名称（按注册顺序）
    pub fn surface_names(&self) -> Vec<&str> {
        self.slots.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 是否有界面请求了退出
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn mixer(&self) -> &AudioMixer {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut AudioMixer {
        &mut self.mixer
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|(n, _)| n == name)
    }
}
