//! # 逻辑路径
//!
//! 资源在程序内部统一使用**相对于 assets_root 的逻辑路径**：
//! `/` 分隔、不含 `assets/` 前缀、不含 `.` / `..` 组件。

/// 规范化逻辑路径
///
/// - 统一使用 `/` 分隔符
/// - 丢弃空组件与 `.`
/// - `..` 弹出上一级（越过根时忽略）
/// - 移除开头的 `assets/`
pub fn normalize_logical_path(path: &str) -> String {
    let unified = path.replace('\\', "/");

    let mut components: Vec<&str> = Vec::new();
    for component in unified.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                components.pop();
            }
            other => components.push(other),
        }
    }

    if components.first() == Some(&"assets") {
        components.remove(0);
    }

    components.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(
            normalize_logical_path("images/ui/button_cog.png"),
            "images/ui/button_cog.png"
        );
        assert_eq!(
            normalize_logical_path("./images//ui/button_cog.png"),
            "images/ui/button_cog.png"
        );
        assert_eq!(
            normalize_logical_path("images\\ui\\button_cog.png"),
            "images/ui/button_cog.png"
        );
    }

    #[test]
    fn test_normalize_with_dotdot() {
        assert_eq!(
            normalize_logical_path("sounds/music/../sfx/button_click_1.mp3"),
            "sounds/sfx/button_click_1.mp3"
        );
        assert_eq!(normalize_logical_path("../fonts/a.ttf"), "fonts/a.ttf");
    }

    #[test]
    fn test_normalize_removes_assets_prefix() {
        assert_eq!(
            normalize_logical_path("assets/images/backgrounds/moon_sky.png"),
            "images/backgrounds/moon_sky.png"
        );
    }
}
