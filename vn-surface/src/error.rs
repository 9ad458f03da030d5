//! # Error 模块
//!
//! 定义 vn-surface 中使用的错误类型。
//!
//! - 配置错误与资源错误在启动阶段出现，属于致命错误
//! - 导航错误在游戏过程中出现，说明场景图本身有问题，应立即上报

use thiserror::Error;

/// 构造参数错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// 同名界面重复注册
    #[error("界面 '{name}' 已注册")]
    DuplicateSurface { name: String },

    /// 滑块轨道宽度为 0
    #[error("滑块轨道宽度必须大于 0")]
    ZeroWidthTrack,

    /// 取值范围无效（min 必须小于 max）
    #[error("无效的取值范围：min = {min}，max = {max}")]
    InvalidRange { min: f32, max: f32 },

    /// hook / on_enter 中的跳转请求形成了循环
    #[error("界面跳转超过 {limit} 次，疑似循环跳转（最后目标 '{last}'）")]
    RedirectLoop { limit: usize, last: String },
}

/// 导航错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// 目标界面未注册
    #[error("界面 '{name}' 未注册")]
    SurfaceNotFound { name: String },
}

/// 资源错误
///
/// 由渲染/音频后端或故事文件读取抛出，不做恢复。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// 资源加载失败
    #[error("加载 {kind} 资源失败: {path} - {message}")]
    LoadFailed {
        /// 资源路径
        path: String,
        /// 资源类型（story, texture, sound 等）
        kind: String,
        /// 错误消息
        message: String,
    },

    /// 资源未找到
    #[error("资源未找到: {path}")]
    NotFound { path: String },

    /// 无效的资源格式
    #[error("无效的资源格式: {path} - {message}")]
    InvalidFormat { path: String, message: String },
}

/// vn-surface 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Configuration(#[from] ConfigurationError),

    /// 导航错误
    #[error("导航错误: {0}")]
    Navigation(#[from] NavigationError),

    /// 资源错误
    #[error("资源错误: {0}")]
    Resource(#[from] ResourceError),
}

/// Result 类型别名
pub type SurfaceResult<T> = Result<T, SurfaceError>;
