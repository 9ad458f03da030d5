//! # Input 模块
//!
//! 定义宿主事件循环传递给界面的离散输入事件。
//!
//! ## 设计说明
//!
//! - 宿主层负责从窗口系统采集原始输入，并转换为 `InputEvent`
//! - 每个待处理事件调用一次 `SurfaceManager::dispatch_event`
//! - 事件可序列化，便于 headless 模式从回放文件读取

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// 鼠标按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// 键盘按键
///
/// 只列出界面实际关心的按键，其余统一为 `Other`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Up,
    Down,
    H,
    /// 主键盘数字键 0-9
    Digit(u8),
    /// 小键盘数字键 0-9
    Numpad(u8),
    /// 其他按键（原始键码）
    Other(u32),
}

impl KeyCode {
    /// 数字键 1-9（主键盘或小键盘）映射为选项索引 0-8
    pub fn choice_index(&self) -> Option<usize> {
        match *self {
            KeyCode::Digit(n) | KeyCode::Numpad(n) if (1..=9).contains(&n) => {
                Some(usize::from(n - 1))
            }
            _ => None,
        }
    }
}

/// 输入事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// 指针按下
    PointerDown { pos: Point, button: MouseButton },
    /// 指针抬起
    PointerUp { pos: Point, button: MouseButton },
    /// 指针移动
    PointerMove { pos: Point },
    /// 按键按下
    KeyDown { key: KeyCode },
}

impl InputEvent {
    /// 左键按下
    pub fn left_down(x: f32, y: f32) -> Self {
        Self::PointerDown {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// 左键抬起
    pub fn left_up(x: f32, y: f32) -> Self {
        Self::PointerUp {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// 指针移动
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove {
            pos: Point::new(x, y),
        }
    }

    /// 按键按下
    pub fn key(key: KeyCode) -> Self {
        Self::KeyDown { key }
    }

    /// 事件携带的指针位置（键盘事件返回 None）
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { pos, .. }
            | InputEvent::PointerUp { pos, .. }
            | InputEvent::PointerMove { pos } => Some(*pos),
            InputEvent::KeyDown { .. } => None,
        }
    }

    /// 是否为左键按下
    pub fn is_left_down(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown {
                button: MouseButton::Left,
                ..
            }
        )
    }
}
