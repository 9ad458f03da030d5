//! # 滑块组件
//!
//! 两个状态：空闲 / 拖动中。
//!
//! - 空闲 → 拖动：左键在手柄矩形内按下
//! - 拖动 → 空闲：任意指针抬起（与位置无关）
//! - 拖动中移动：手柄 x 钳制到 `[track.x, track.right - handle.w]`，
//!   取值按指针在整条轨道上的位置线性插值，并同步调用回调

use crate::error::ConfigurationError;
use crate::geometry::{Color, Rect};
use crate::input::InputEvent;
use crate::render::DrawTarget;
use crate::surface::SurfaceContext;

/// 手柄宽度
pub const HANDLE_WIDTH: f32 = 20.0;

/// 取值变化回调
pub type ChangeCallback = Box<dyn FnMut(f32, &mut SurfaceContext<'_>)>;

/// 滑块配色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    /// 轨道背景
    pub track: Color,
    /// 已填充部分
    pub fill: Color,
    /// 手柄
    pub handle: Color,
    /// 圆角半径
    pub radius: f32,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            track: Color::rgb(41, 78, 103),
            fill: Color::rgb(70, 130, 180),
            handle: Color::rgb(208, 239, 243),
            radius: 2.0,
        }
    }
}

/// 滑块
pub struct Slider {
    /// 轨道矩形
    track: Rect,
    min: f32,
    max: f32,
    /// 当前取值，始终在 [min, max] 内
    value: f32,
    /// 手柄矩形（由取值推导）
    handle: Rect,
    dragging: bool,
    on_change: ChangeCallback,
    style: SliderStyle,
}

impl Slider {
    /// 创建滑块
    ///
    /// - 轨道宽度必须大于 0
    /// - `min` 必须小于 `max`
    /// - 初始值超出范围时钳制，不报错
    pub fn new(
        track: Rect,
        min: f32,
        max: f32,
        start: f32,
        on_change: impl FnMut(f32, &mut SurfaceContext<'_>) + 'static,
    ) -> Result<Self, ConfigurationError> {
        if !(track.w > 0.0) || !track.w.is_finite() {
            return Err(ConfigurationError::ZeroWidthTrack);
        }
        if !(min < max) || !min.is_finite() || !max.is_finite() {
            return Err(ConfigurationError::InvalidRange { min, max });
        }

        let handle = Rect::new(track.x, track.y, HANDLE_WIDTH.min(track.w), track.h);
        let mut slider = Self {
            track,
            min,
            max,
            value: min,
            handle,
            dragging: false,
            on_change: Box::new(on_change),
            style: SliderStyle::default(),
        };
        slider.set_value(start);
        Ok(slider)
    }

    /// 设置配色
    pub fn with_style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    /// 结束拖动（所属界面被停用时调用）
    pub fn reset(&mut self) {
        self.dragging = false;
    }

    /// 以编程方式设置取值（钳制，不触发回调）
    pub fn set_value(&mut self, value: f32) {
        self.value = self.clamp_value(value);
        self.handle.x = self.clamp_handle_x(self.position_for(self.value));
    }

    /// 取值在轨道上对应的 x 坐标
    pub fn position_for(&self, value: f32) -> f32 {
        let t = (self.clamp_value(value) - self.min) / (self.max - self.min);
        self.track.x + self.track.w * t
    }

    /// 轨道上某个 x 坐标对应的取值
    pub fn value_at(&self, x: f32) -> f32 {
        let x = x.max(self.track.x).min(self.track.right());
        let t = (x - self.track.x) / self.track.w;
        self.clamp_value(self.min + (self.max - self.min) * t)
    }

    /// 处理输入事件，返回取值是否变化
    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) -> bool {
        match event {
            InputEvent::PointerDown { pos, .. } => {
                self.dragging = event.is_left_down() && self.handle.contains(*pos);
                false
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = false;
                false
            }
            InputEvent::PointerMove { pos } if self.dragging => {
                self.handle.x = self.clamp_handle_x(pos.x);
                self.value = self.value_at(pos.x);
                (self.on_change)(self.value, ctx);
                true
            }
            _ => false,
        }
    }

    /// 绘制：轨道背景、已填充部分、手柄
    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let style = &self.style;
        target.fill_rect(self.track, style.track, style.radius);

        let fill_width = (self.value - self.min) / (self.max - self.min) * self.track.w;
        let filled = Rect::new(self.track.x, self.track.y, fill_width, self.track.h);
        target.fill_rect(filled, style.fill, style.radius);

        target.fill_rect(self.handle, style.handle, style.radius);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn track(&self) -> Rect {
        self.track
    }

    pub fn handle(&self) -> Rect {
        self.handle
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn clamp_value(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// 手柄 x 钳制到轨道内（手柄宽度不超过轨道宽度，区间非空）
    fn clamp_handle_x(&self, x: f32) -> f32 {
        x.max(self.track.x).min(self.track.right() - self.handle.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioMixer, MemoryMusic};
    use crate::surface::FrameRequests;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn mixer() -> AudioMixer {
        AudioMixer::new(Box::new(MemoryMusic::new()))
    }

    fn drag(slider: &mut Slider, mixer: &mut AudioMixer, events: &[InputEvent]) {
        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(mixer, &mut requests);
        for event in events {
            slider.handle_event(event, &mut ctx);
        }
    }

    fn slider_with_log(track: Rect, start: f32) -> (Slider, Rc<RefCell<Vec<f32>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let slider = Slider::new(track, 0.0, 1.0, start, move |value, _ctx| {
            sink.borrow_mut().push(value);
        })
        .unwrap();
        (slider, log)
    }

    #[test]
    fn test_drag_scenario() {
        let mut mixer = mixer();
        let (mut slider, log) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.5);
        assert_eq!(slider.handle().x, 200.0);
        assert_eq!(slider.value(), 0.5);

        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(205.0, 10.0),
                InputEvent::pointer_move(100.0, 10.0),
            ],
        );
        assert!(slider.is_dragging());
        assert_eq!(slider.value(), 0.0);
        assert_eq!(slider.handle().x, 100.0);

        drag(&mut slider, &mut mixer, &[InputEvent::pointer_move(320.0, 10.0)]);
        assert_eq!(slider.handle().x, 280.0);
        assert_eq!(slider.value(), 1.0);
        assert_eq!(*log.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_press_outside_handle_does_not_drag() {
        let mut mixer = mixer();
        let (mut slider, log) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.5);
        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(120.0, 10.0),
                InputEvent::pointer_move(150.0, 10.0),
            ],
        );
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 0.5);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_release_anywhere_stops_drag() {
        let mut mixer = mixer();
        let (mut slider, log) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.0);
        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(105.0, 5.0),
                InputEvent::left_up(900.0, 900.0),
                InputEvent::pointer_move(250.0, 5.0),
            ],
        );
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 0.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_reset_and_fresh_press_end_stale_drag() {
        let mut mixer = mixer();
        let (mut slider, log) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.0);
        drag(&mut slider, &mut mixer, &[InputEvent::left_down(105.0, 5.0)]);
        slider.reset();
        drag(&mut slider, &mut mixer, &[InputEvent::pointer_move(250.0, 5.0)]);
        assert!(!slider.is_dragging());

        drag(&mut slider, &mut mixer, &[InputEvent::left_down(105.0, 5.0)]);
        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(250.0, 50.0),
                InputEvent::pointer_move(250.0, 5.0),
            ],
        );
        assert!(!slider.is_dragging());
        assert_eq!(slider.value(), 0.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_zero_width_track_rejected() {
        let result = Slider::new(Rect::new(0.0, 0.0, 0.0, 20.0), 0.0, 1.0, 0.5, |_, _| {});
        assert!(matches!(result, Err(ConfigurationError::ZeroWidthTrack)));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let result = Slider::new(Rect::new(0.0, 0.0, 100.0, 20.0), 1.0, 1.0, 0.5, |_, _| {});
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_start_value_clamped() {
        let (slider, _) = slider_with_log(Rect::new(0.0, 0.0, 100.0, 20.0), -0.1);
        assert_eq!(slider.value(), 0.0);
        assert_eq!(slider.handle().x, 0.0);

        let (slider, _) = slider_with_log(Rect::new(0.0, 0.0, 100.0, 20.0), 1.7);
        assert_eq!(slider.value(), 1.0);
        assert_eq!(slider.handle().x, 80.0);
    }

    #[test]
    fn test_value_position_inverse() {
        let slider = Slider::new(Rect::new(37.0, 0.0, 480.0, 30.0), -5.0, 20.0, 0.0, |_, _| {})
            .unwrap();
        for i in 0..=50 {
            let v = -5.0 + 25.0 * (i as f32 / 50.0);
            let back = slider.value_at(slider.position_for(v));
            assert!((back - v).abs() < 1e-4, "v = {v}, back = {back}");
        }
    }

    #[test]
    fn test_dragging_to_value_position_reproduces_value() {
        let mut mixer = mixer();
        let (mut slider, _) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.0);
        let target = slider.position_for(0.35);
        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(101.0, 1.0),
                InputEvent::pointer_move(target, 1.0),
            ],
        );
        assert!((slider.value() - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_bounds_hold_after_arbitrary_drags() {
        let mut mixer = mixer();
        let track = Rect::new(50.0, 10.0, 300.0, 30.0);
        let mut slider = Slider::new(track, 2.0, 8.0, 4.0, |_, _| {}).unwrap();

        // 线性同余序列，覆盖轨道内外的位置
        let mut seed: u32 = 12345;
        let mut next = || {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (seed >> 8) as f32 / (1u32 << 24) as f32 * 600.0 - 100.0
        };

        for _ in 0..200 {
            let handle = slider.handle();
            let x = next();
            drag(
                &mut slider,
                &mut mixer,
                &[
                    InputEvent::left_down(handle.x + 1.0, handle.y + 1.0),
                    InputEvent::pointer_move(x, 0.0),
                    InputEvent::pointer_move(next(), 0.0),
                    InputEvent::left_up(x, 0.0),
                ],
            );
            let value = slider.value();
            let handle = slider.handle();
            assert!((2.0..=8.0).contains(&value));
            assert!(handle.x >= track.x && handle.x <= track.right() - handle.w);
        }
    }

    #[test]
    fn test_callback_reaches_mixer() {
        let mut mixer = mixer();
        let mut slider = Slider::new(
            Rect::new(0.0, 0.0, 100.0, 10.0),
            0.0,
            1.0,
            1.0,
            |value, ctx| {
                ctx.set_global_sfx_volume(value);
            },
        )
        .unwrap();
        drag(
            &mut slider,
            &mut mixer,
            &[
                InputEvent::left_down(85.0, 5.0),
                InputEvent::pointer_move(25.0, 5.0),
            ],
        );
        assert!((mixer.global_sfx_volume() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_draw_layers() {
        let (slider, _) = slider_with_log(Rect::new(100.0, 0.0, 200.0, 20.0), 0.5);
        let mut recorder = crate::render::CommandRecorder::new(400.0, 100.0);
        slider.draw(&mut recorder);
        insta::assert_snapshot!(recorder.summary(), @r"
        rect 100,0 200x20 #294e67ff
        rect 100,0 100x20 #4682b4ff
        rect 200,0 20x20 #d0eff3ff
        ");
    }
}
