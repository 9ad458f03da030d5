//! # 文本组件

use crate::assets::FontRef;
use crate::geometry::{Color, Point};
use crate::render::DrawTarget;

/// 静态文本
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    font: FontRef,
    pos: Point,
    color: Color,
}

impl Text {
    pub fn new(content: impl Into<String>, font: FontRef, pos: Point) -> Self {
        Self {
            content: content.into(),
            font,
            pos,
            color: Color::WHITE,
        }
    }

    /// 设置颜色
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    pub fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_text(&self.content, &self.font, self.pos, self.color);
    }
}
