//! # Transition 模块
//!
//! 全屏纯色淡入淡出。
//!
//! ## 设计说明
//!
//! - 过渡是界面持有的计时状态，在 `update(dt)` 中推进、在 `draw` 中绘制，
//!   不会阻塞帧循环，过渡期间输入照常分发
//! - `fade_in`：遮罩从不透明到透明（画面逐渐显现）
//! - `fade_out`：遮罩从透明到不透明

use crate::geometry::Color;
use crate::render::DrawTarget;

/// 淡入淡出状态
#[derive(Debug, Clone, PartialEq)]
pub struct FadeTransition {
    /// 遮罩颜色（alpha 由过渡决定）
    color: Color,
    from_alpha: u8,
    to_alpha: u8,
    /// 总时长（秒）
    duration: f32,
    /// 已经过时间（秒）
    elapsed: f32,
}

impl FadeTransition {
    pub fn new(color: Color, from_alpha: u8, to_alpha: u8, duration: f32) -> Self {
        Self {
            color,
            from_alpha,
            to_alpha,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// 遮罩 255 → 0
    pub fn fade_in(color: Color, duration: f32) -> Self {
        Self::new(color, 255, 0, duration)
    }

    /// 遮罩 0 → 255
    pub fn fade_out(color: Color, duration: f32) -> Self {
        Self::new(color, 0, 255, duration)
    }

    /// 推进时间（秒）
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// 进度 (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// 当前遮罩透明度（线性插值）
    pub fn alpha(&self) -> u8 {
        let from = f32::from(self.from_alpha);
        let to = f32::from(self.to_alpha);
        (from + (to - from) * self.progress()).round() as u8
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        let alpha = self.alpha();
        if alpha > 0 {
            target.fill_screen(self.color.with_alpha(alpha));
        }
    }
}
