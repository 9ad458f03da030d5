//! # 横幅组件
//!
//! 带背景图的文本框，用于对白框和选项框。文本按单词折行，
//! 超出横幅高度的行不绘制。

use crate::assets::{FontRef, ImageRef};
use crate::geometry::{Color, Point, Rect};
use crate::input::InputEvent;
use crate::render::DrawTarget;

/// 文本与横幅边缘的间距
const PADDING: f32 = 24.0;

/// 行距系数
const LINE_SPACING: f32 = 1.2;

pub struct Banner {
    image: ImageRef,
    rect: Rect,
    text: String,
    font: FontRef,
}

impl Banner {
    pub fn new(image: ImageRef, rect: Rect, text: impl Into<String>, font: FontRef) -> Self {
        Self {
            image,
            rect,
            text: text.into(),
            font,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn contains(&self, point: Point) -> bool {
        self.rect.contains(point)
    }

    /// 左键在横幅内按下时返回 true
    pub fn on_event(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { pos, .. } => event.is_left_down() && self.contains(*pos),
            _ => false,
        }
    }

    /// 按可用宽度折行
    pub fn wrap_lines(&self, target: &dyn DrawTarget) -> Vec<String> {
        let max_width = (self.rect.w - PADDING * 2.0).max(0.0);
        let mut lines = Vec::new();

        for paragraph in self.text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{line} {word}")
                };
                if line.is_empty() || target.measure_text(&candidate, &self.font).0 <= max_width {
                    line = candidate;
                } else {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                }
            }
            lines.push(line);
        }
        lines
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(&self.image, self.rect);

        let line_height = self.font.size() as f32 * LINE_SPACING;
        let mut y = self.rect.y + PADDING;
        for line in self.wrap_lines(target) {
            if y + line_height > self.rect.bottom() {
                break;
            }
            if !line.is_empty() {
                target.draw_text(&line, &self.font, Point::new(self.rect.x + PADDING, y), Color::WHITE);
            }
            y += line_height;
        }
    }
}
