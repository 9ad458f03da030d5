//! # Render 模块
//!
//! 绘制目标抽象。
//!
//! 界面与控件只通过 [`DrawTarget`] 输出像素，不依赖具体的渲染后端。
//! [`CommandRecorder`] 把绘制调用记录为 [`DrawCommand`] 列表，
//! 供测试与 headless 模式使用。

use std::fmt;

use crate::assets::{FontRef, ImageRef};
use crate::geometry::{Color, Point, Rect};

/// 文本宽度估算系数（每个字符约 font_size * 0.55）
const TEXT_WIDTH_FACTOR: f32 = 0.55;

/// 可变的像素绘制目标
pub trait DrawTarget {
    /// 目标尺寸（宽, 高）
    fn size(&self) -> (f32, f32);

    /// 填充矩形（`radius` 为圆角半径）
    fn fill_rect(&mut self, rect: Rect, color: Color, radius: f32);

    /// 将图片缩放绘制到 `dest`
    fn draw_image(&mut self, image: &ImageRef, dest: Rect);

    /// 绘制文本，`pos` 为左上角
    fn draw_text(&mut self, text: &str, font: &FontRef, pos: Point, color: Color);

    /// 测量文本尺寸
    ///
    /// 默认实现按字符数估算，后端可以给出精确值。
    fn measure_text(&self, text: &str, font: &FontRef) -> (f32, f32) {
        let size = font.size() as f32;
        (text.chars().count() as f32 * size * TEXT_WIDTH_FACTOR, size)
    }

    /// 用颜色覆盖整个目标（支持半透明）
    fn fill_screen(&mut self, color: Color) {
        let (w, h) = self.size();
        self.fill_rect(Rect::new(0.0, 0.0, w, h), color, 0.0);
    }
}

/// 一次绘制调用
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Image {
        path: String,
        dest: Rect,
    },
    Text {
        text: String,
        font: FontRef,
        pos: Point,
        color: Color,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::FillRect { rect, color, .. } => write!(
                f,
                "rect {},{} {}x{} #{:02x}{:02x}{:02x}{:02x}",
                rect.x, rect.y, rect.w, rect.h, color.r, color.g, color.b, color.a
            ),
            DrawCommand::Image { path, dest } => write!(
                f,
                "image {} @ {},{} {}x{}",
                path, dest.x, dest.y, dest.w, dest.h
            ),
            DrawCommand::Text { text, pos, .. } => {
                write!(f, "text {:?} @ {},{}", text, pos.x, pos.y)
            }
        }
    }
}

/// 记录绘制调用的绘制目标
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// 已记录的绘制调用
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// 清空记录（每帧开始时调用）
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// 所有绘制调用的文本摘要，每行一条
    pub fn summary(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 已绘制的所有文本
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 已绘制的所有图片路径
    pub fn images(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for CommandRecorder {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            radius,
        });
    }

    fn draw_image(&mut self, image: &ImageRef, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            path: image.path().to_string(),
            dest,
        });
    }

    fn draw_text(&mut self, text: &str, font: &FontRef, pos: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            font: font.clone(),
            pos,
            color,
        });
    }
}
