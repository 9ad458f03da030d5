//! # 按钮组件

use std::rc::Rc;

use tracing::debug;

use crate::assets::{ButtonImages, ImageRef};
use crate::audio::SoundEffect;
use crate::geometry::{Point, Rect};
use crate::input::{InputEvent, MouseButton};
use crate::render::DrawTarget;
use crate::surface::SurfaceContext;

/// 按钮外观状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    Hover,
    Active,
}

/// 点击回调
pub type ClickCallback = Box<dyn FnMut(&mut SurfaceContext<'_>)>;

/// 图片按钮
///
/// 左键在按钮内按下后进入“按住”状态；只有在按钮内松开才算一次点击，
/// 在按钮外松开则取消。按住期间移出按钮显示 Normal，移回显示 Active。
pub struct Button {
    images: ButtonImages,
    rect: Rect,
    state: ButtonState,
    /// 左键在按钮内按下且尚未松开
    armed: bool,
    on_click: ClickCallback,
    click_sound: Option<Rc<dyn SoundEffect>>,
}

impl Button {
    pub fn new(
        images: ButtonImages,
        rect: Rect,
        on_click: impl FnMut(&mut SurfaceContext<'_>) + 'static,
    ) -> Self {
        Self {
            images,
            rect,
            state: ButtonState::Normal,
            armed: false,
            on_click: Box::new(on_click),
            click_sound: None,
        }
    }

    /// 点击时播放的音效
    pub fn with_click_sound(mut self, sound: Rc<dyn SoundEffect>) -> Self {
        self.click_sound = Some(sound);
        self
    }

    /// 处理输入事件，返回是否完成了一次点击
    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) -> bool {
        match event {
            InputEvent::PointerMove { pos } => {
                self.track_pointer(*pos);
                false
            }
            InputEvent::PointerDown { pos, button } => {
                if *button == MouseButton::Left && self.rect.contains(*pos) {
                    self.armed = true;
                    self.state = ButtonState::Active;
                } else {
                    if !self.rect.contains(*pos) {
                        self.armed = false;
                    }
                    self.track_pointer(*pos);
                }
                false
            }
            InputEvent::PointerUp {
                pos,
                button: MouseButton::Left,
            } => {
                let inside = self.rect.contains(*pos);
                let clicked = self.armed && inside;
                self.armed = false;
                self.state = if inside {
                    ButtonState::Hover
                } else {
                    ButtonState::Normal
                };
                if clicked {
                    self.click(ctx);
                }
                clicked
            }
            _ => false,
        }
    }

    /// 回到初始状态（所属界面被停用时调用）
    pub fn reset(&mut self) {
        self.armed = false;
        self.state = ButtonState::Normal;
    }

    fn track_pointer(&mut self, pos: Point) {
        let inside = self.rect.contains(pos);
        self.state = match (self.armed, inside) {
            (true, true) => ButtonState::Active,
            (false, true) => ButtonState::Hover,
            (_, false) => ButtonState::Normal,
        };
    }

    fn click(&mut self, ctx: &mut SurfaceContext<'_>) {
        debug!(image = %self.images.normal.path(), "按钮点击");
        if let Some(sound) = &self.click_sound {
            sound.play();
        }
        (self.on_click)(ctx);
    }

    /// 当前状态对应的图片
    pub fn image(&self) -> &ImageRef {
        match self.state {
            ButtonState::Normal => &self.images.normal,
            ButtonState::Hover => &self.images.hover,
            ButtonState::Active => &self.images.active,
        }
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(self.image(), self.rect);
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
