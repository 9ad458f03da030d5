//! # 历史回看面板
//!
//! 覆盖在剧情场景上的历史记录列表，可上下滚动。
//! 打开时滚动到底部（最新的台词），关闭时滚动位置归零。

use vn_surface::{
    AssetCatalog, Color, DrawTarget, FontFace, FontRef, HistoryEntry, Point, Rect,
};

/// 每次按键滚动的像素
pub const SCROLL_SPEED: f32 = 40.0;

/// 面板内边距
const PADDING: f32 = 30.0;

const LINE_SPACING: f32 = 1.2;

/// 历史回看面板
#[derive(Debug, Clone)]
pub struct HistoryPanel {
    visible: bool,
    /// 滚动位置（像素，0 为顶部）
    scroll: f32,
    rect: Rect,
    font: FontRef,
}

impl HistoryPanel {
    pub fn new(catalog: &AssetCatalog, screen_size: (f32, f32)) -> Self {
        let (width, height) = screen_size;
        Self {
            visible: false,
            scroll: 0.0,
            rect: Rect::new(width * 0.1, height * 0.1, width * 0.8, height * 0.8),
            font: catalog.font(FontFace::MonogramExtended, 30),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// 切换显示状态
    pub fn toggle(&mut self, entries: usize) {
        self.visible = !self.visible;
        if self.visible {
            self.scroll = self.max_scroll(entries);
        } else {
            self.scroll = 0.0;
        }
    }

    /// 滚动 `delta` 像素（负数向上）
    pub fn scroll_by(&mut self, delta: f32, entries: usize) {
        self.scroll = (self.scroll + delta).max(0.0).min(self.max_scroll(entries));
    }

    fn line_height(&self) -> f32 {
        self.font.size() as f32 * LINE_SPACING
    }

    fn viewport_height(&self) -> f32 {
        (self.rect.h - PADDING * 2.0).max(0.0)
    }

    /// 最大滚动位置：内容高度超出可视区域的部分
    pub fn max_scroll(&self, entries: usize) -> f32 {
        (entries as f32 * self.line_height() - self.viewport_height()).max(0.0)
    }

    pub fn draw(&self, target: &mut dyn DrawTarget, entries: &[HistoryEntry]) {
        if !self.visible {
            return;
        }
        target.fill_rect(self.rect, Color::BLACK.with_alpha(200), 8.0);

        let top = self.rect.y + PADDING;
        let bottom = top + self.viewport_height();
        let line_height = self.line_height();
        for (i, entry) in entries.iter().enumerate() {
            let y = top + i as f32 * line_height - self.scroll;
            if y < top || y + line_height > bottom {
                continue;
            }
            target.draw_text(
                &entry.display_text(),
                &self.font,
                Point::new(self.rect.x + PADDING, y),
                Color::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vn_surface::CommandRecorder;

    fn panel() -> HistoryPanel {
        // 可视高度 800 - 60 = 740，行高 36
        HistoryPanel::new(&AssetCatalog::without_story("assets"), (1000.0, 1000.0))
    }

    fn entries(n: usize) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| HistoryEntry {
                speaker: None,
                text: format!("line {i}"),
            })
            .collect()
    }

    #[test]
    fn test_open_scrolls_to_bottom_close_resets() {
        let mut panel = panel();
        panel.toggle(30);
        assert!(panel.is_visible());
        assert_eq!(panel.scroll(), 30.0 * 36.0 - 740.0);

        panel.toggle(30);
        assert!(!panel.is_visible());
        assert_eq!(panel.scroll(), 0.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut panel = panel();
        panel.toggle(30);
        panel.scroll_by(SCROLL_SPEED, 30);
        assert_eq!(panel.scroll(), panel.max_scroll(30));

        for _ in 0..100 {
            panel.scroll_by(-SCROLL_SPEED, 30);
        }
        assert_eq!(panel.scroll(), 0.0);
    }

    #[test]
    fn test_short_history_does_not_scroll() {
        let mut panel = panel();
        panel.toggle(3);
        assert_eq!(panel.scroll(), 0.0);
        panel.scroll_by(SCROLL_SPEED, 3);
        assert_eq!(panel.scroll(), 0.0);
    }

    #[test]
    fn test_draw_only_visible_lines() {
        let mut panel = panel();
        let entries = entries(30);
        let mut recorder = CommandRecorder::new(1000.0, 1000.0);
        panel.draw(&mut recorder, &entries);
        assert!(recorder.commands().is_empty());

        panel.toggle(entries.len());
        panel.draw(&mut recorder, &entries);
        let texts = recorder.texts();
        // 740 / 36 = 20 行完整可见
        assert_eq!(texts.len(), 20);
        assert_eq!(texts.last(), Some(&"line 29"));
    }
}
