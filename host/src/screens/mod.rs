//! # 界面模块
//!
//! 游戏的各个界面：标题、设置、剧情场景、暂停菜单。
//!
//! 所有界面在启动时由 [`build`] 一次性构造并注册到 [`SurfaceManager`]，
//! 之后只通过名称互相跳转。

pub mod dialogue;
pub mod history;
pub mod pause;
pub mod settings;
pub mod title;

pub use dialogue::DialogueScreen;
pub use history::HistoryPanel;
pub use pause::PauseScreen;
pub use settings::SettingsScreen;
pub use title::TitleScreen;

use std::rc::Rc;

use vn_surface::{
    AssetCatalog, MemorySound, Narrative, Rect, Sfx, SoundEffect, SurfaceManager, SurfaceResult,
};

/// 标题界面
pub const ROOT: &str = "root";
/// 设置界面
pub const SETTINGS: &str = "settings";
/// 剧情场景
pub const WALK_TO_GATE: &str = "walk_to_gate";
/// 暂停菜单
pub const PAUSE: &str = "pause";

/// 图标按钮边长
pub(crate) const ICON_SIZE: f32 = 100.0;

/// 整屏矩形
pub(crate) fn full_screen(screen_size: (f32, f32)) -> Rect {
    Rect::new(0.0, 0.0, screen_size.0, screen_size.1)
}

/// 新建一个点击音效句柄
fn click_sound(catalog: &AssetCatalog) -> Rc<dyn SoundEffect> {
    MemorySound::shared(catalog.sfx(Sfx::ButtonClick1))
}

/// 构造并注册所有界面
///
/// 标题、设置、暂停界面的点击音效在此登记到混音器；
/// 剧情场景在首次激活的 `hook` 中自行登记。
pub fn build(
    catalog: &AssetCatalog,
    manager: &mut SurfaceManager,
    narrative: Box<dyn Narrative>,
    screen_size: (f32, f32),
) -> SurfaceResult<()> {
    let sound = click_sound(catalog);
    manager.mixer_mut().register_sfx(sound.clone());
    manager.register(ROOT, Box::new(TitleScreen::new(catalog, screen_size, sound)))?;

    let sound = click_sound(catalog);
    manager.mixer_mut().register_sfx(sound.clone());
    let settings = SettingsScreen::new(
        catalog,
        screen_size,
        sound,
        manager.global_sfx_volume(),
        manager.mixer().music_volume(),
    )?;
    manager.register(SETTINGS, Box::new(settings))?;

    let scene = DialogueScreen::new(catalog, screen_size, narrative, click_sound(catalog));
    manager.register(WALK_TO_GATE, Box::new(scene))?;

    let sound = click_sound(catalog);
    manager.mixer_mut().register_sfx(sound.clone());
    manager.register(PAUSE, Box::new(PauseScreen::new(catalog, screen_size, sound)))?;

    Ok(())
}
