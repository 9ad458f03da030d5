//! # Assets 模块
//!
//! 类型化的资源目录：把符号化的资源键解析为具体的资源句柄。
//!
//! ## 设计说明
//!
//! - 资源目录构造后不可变，以 `&AssetCatalog` 的形式只读共享给所有界面
//! - 句柄只携带逻辑路径（和字号等参数），真正的解码由渲染/音频后端完成
//! - 故事文档是唯一在构造时就读取的资源，读取失败属于启动期致命错误

mod keys;
pub mod path;
mod story;

pub use keys::{Background, Banner, ButtonIcon, CharacterSprite, FontFace, Music, Sfx};
pub use path::normalize_logical_path;
pub use story::StoryDocument;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ResourceError;

/// 字体句柄（字体文件 + 字号）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    path: String,
    size: u32,
}

impl FontRef {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// 图片句柄
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    path: String,
}

impl ImageRef {
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_logical_path(path),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// 音频句柄（音乐或音效）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundRef {
    path: String,
}

impl SoundRef {
    pub fn new(path: &str) -> Self {
        Self {
            path: normalize_logical_path(path),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// 按钮三态图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonImages {
    pub normal: ImageRef,
    pub hover: ImageRef,
    pub active: ImageRef,
}

/// 资源目录
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    /// 资源根目录
    assets_root: PathBuf,
    /// 故事文档
    story: StoryDocument,
}

impl AssetCatalog {
    pub fn new(assets_root: impl Into<PathBuf>, story: StoryDocument) -> Self {
        Self {
            assets_root: assets_root.into(),
            story,
        }
    }

    /// 不带故事文档的资源目录（工具与测试使用）
    pub fn without_story(assets_root: impl Into<PathBuf>) -> Self {
        Self::new(assets_root, StoryDocument::empty())
    }

    /// 加载资源目录
    ///
    /// 读取故事文件，失败时直接返回错误，不做部分构造。
    pub fn load(
        assets_root: impl Into<PathBuf>,
        story_path: impl AsRef<Path>,
    ) -> Result<Self, ResourceError> {
        let story = StoryDocument::load(story_path)?;
        info!(source = %story.source(), "故事文档加载成功");
        Ok(Self::new(assets_root, story))
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// 逻辑路径 → 文件系统路径
    pub fn resolve(&self, logical: &str) -> PathBuf {
        self.assets_root.join(normalize_logical_path(logical))
    }

    pub fn font(&self, face: FontFace, size: u32) -> FontRef {
        FontRef {
            path: face.path().to_string(),
            size,
        }
    }

    pub fn background(&self, background: Background) -> ImageRef {
        ImageRef::new(background.path())
    }

    pub fn button(&self, icon: ButtonIcon) -> ButtonImages {
        ButtonImages {
            normal: ImageRef::new(icon.path()),
            hover: ImageRef::new(&icon.hover_path()),
            active: ImageRef::new(&icon.active_path()),
        }
    }

    pub fn banner(&self, banner: Banner) -> ImageRef {
        ImageRef::new(banner.path())
    }

    pub fn character(&self, sprite: CharacterSprite) -> ImageRef {
        ImageRef::new(sprite.path())
    }

    pub fn music(&self, music: Music) -> SoundRef {
        SoundRef::new(music.path())
    }

    pub fn sfx(&self, sfx: Sfx) -> SoundRef {
        SoundRef::new(sfx.path())
    }

    pub fn story(&self) -> &StoryDocument {
        &self.story
    }

    /// 资源目录可能给出的全部逻辑路径
    pub fn entries() -> Vec<String> {
        let mut entries: Vec<String> = Vec::new();
        entries.extend(FontFace::ALL.iter().map(|k| k.path().to_string()));
        entries.extend(Background::ALL.iter().map(|k| k.path().to_string()));
        for icon in ButtonIcon::ALL {
            entries.push(icon.path().to_string());
            entries.push(icon.hover_path());
            entries.push(icon.active_path());
        }
        entries.extend(Banner::ALL.iter().map(|k| k.path().to_string()));
        entries.extend(CharacterSprite::ALL.iter().map(|k| k.path().to_string()));
        entries.extend(Music::ALL.iter().map(|k| k.path().to_string()));
        entries.extend(Sfx::ALL.iter().map(|k| k.path().to_string()));
        entries
    }

    /// 资源根目录下缺失的条目
    pub fn missing_files(&self) -> Vec<String> {
        Self::entries()
            .into_iter()
            .filter(|entry| !self.resolve(entry).is_file())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_carry_logical_paths() {
        let catalog = AssetCatalog::without_story("assets");
        assert_eq!(
            catalog.background(Background::MoonSky).path(),
            "images/backgrounds/moon_sky.png"
        );
        let font = catalog.font(FontFace::MonogramExtended, 80);
        assert_eq!(font.size(), 80);
        assert_eq!(font.path(), "fonts/truetype/monogram_extended.ttf");
        assert_eq!(
            catalog.sfx(Sfx::ButtonClick1).path(),
            "sounds/sfx/button_click_1.mp3"
        );
    }

    #[test]
    fn test_button_images() {
        let catalog = AssetCatalog::without_story("assets");
        let images = catalog.button(ButtonIcon::Play);
        assert_eq!(images.normal.path(), "images/ui/button_play.png");
        assert_eq!(images.hover.path(), "images/ui/button_play_hover.png");
        assert_eq!(images.active.path(), "images/ui/button_play_active.png");
    }

    #[test]
    fn test_resolve_joins_root() {
        let catalog = AssetCatalog::without_story("game/assets");
        assert_eq!(
            catalog.resolve("assets/images/ui/button_cog.png"),
            PathBuf::from("game/assets").join("images/ui/button_cog.png")
        );
    }

    #[test]
    fn test_entries_are_unique() {
        let entries = AssetCatalog::entries();
        let mut sorted = entries.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), entries.len());
        // 2 字体 + 3 背景 + 6×3 按钮 + 2 横幅 + 30 立绘 + 2 音乐 + 1 音效
        assert_eq!(entries.len(), 58);
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::without_story(dir.path());
        assert_eq!(catalog.missing_files().len(), AssetCatalog::entries().len());

        let moon = catalog.resolve(Background::MoonSky.path());
        std::fs::create_dir_all(moon.parent().unwrap()).unwrap();
        std::fs::write(&moon, b"png").unwrap();
        let missing = catalog.missing_files();
        assert!(!missing.contains(&Background::MoonSky.path().to_string()));
        assert_eq!(missing.len(), AssetCatalog::entries().len() - 1);
    }

    #[test]
    fn test_load_propagates_story_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetCatalog::load(dir.path(), dir.path().join("story.ink.json")).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
    }
}
