//! # UI 模块
//!
//! 界面使用的控件：滑块、图片按钮、文本、横幅。
//!
//! 控件本身不是界面，由所属界面在 `on_event` 中转发事件、在 `draw` 中绘制。
//! 回调通过 [`crate::SurfaceContext`] 修改全局状态。

mod banner;
mod button;
mod slider;
mod text;

pub use banner::Banner;
pub use button::{Button, ButtonState, ClickCallback};
pub use slider::{ChangeCallback, HANDLE_WIDTH, Slider, SliderStyle};
pub use text::Text;
