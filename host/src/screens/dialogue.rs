//! # 剧情场景界面
//!
//! 显示叙事来源给出的台词、立绘与选项，并提供历史回看。
//!
//! ## 输入
//!
//! - 左键 / 空格：推进台词（有未决选项时无效）
//! - 数字键 1-9（主键盘或小键盘）或点击选项横幅：选择
//! - `H`：打开/关闭历史面板；面板打开时 ↑/↓ 滚动
//! - `Esc`：暂停菜单

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;
use vn_surface::assets::Banner as BannerImage;
use vn_surface::{
    AssetCatalog, Background, Banner, CharacterSprite, Color, DrawTarget, FadeTransition,
    FontFace, FontRef, ImageRef, InputEvent, KeyCode, Music, Narrative, Rect, SoundEffect,
    SoundRef, Surface, SurfaceContext,
};

use super::history::{HistoryPanel, SCROLL_SPEED};
use super::{PAUSE, full_screen};

/// 进入场景时的淡入时长（秒）
const FADE_IN_SECONDS: f32 = 1.0;

/// 选项横幅高度与间距
const CHOICE_HEIGHT: f32 = 80.0;
const CHOICE_GAP: f32 = 20.0;

/// 剧情场景界面
pub struct DialogueScreen {
    background: ImageRef,
    screen: Rect,
    narrative: Box<dyn Narrative>,

    dialogue: Banner,
    choice_image: ImageRef,
    choice_font: FontRef,
    choices: Vec<Banner>,

    sprites: HashMap<CharacterSprite, ImageRef>,
    /// 当前立绘
    sprite: Option<ImageRef>,
    sprite_rect: Rect,

    history: HistoryPanel,
    fade: Option<FadeTransition>,
    click: Rc<dyn SoundEffect>,
    music: SoundRef,
}

impl DialogueScreen {
    pub fn new(
        catalog: &AssetCatalog,
        screen_size: (f32, f32),
        narrative: Box<dyn Narrative>,
        click: Rc<dyn SoundEffect>,
    ) -> Self {
        let (width, height) = screen_size;
        let sprites = CharacterSprite::ALL
            .iter()
            .map(|&sprite| (sprite, catalog.character(sprite)))
            .collect();

        let mut screen = Self {
            background: catalog.background(Background::AbandonedAmusementPark),
            screen: full_screen(screen_size),
            narrative,
            dialogue: Banner::new(
                catalog.banner(BannerImage::DialogueWood),
                Rect::new(width * 0.2, height * 0.7, width * 0.75, height * 0.25),
                "",
                catalog.font(FontFace::MonogramExtended, 40),
            ),
            choice_image: catalog.banner(BannerImage::ChoiceWood),
            choice_font: catalog.font(FontFace::MonogramExtended, 30),
            choices: Vec::new(),
            sprites,
            sprite: None,
            sprite_rect: Rect::new(width * 0.05, height * 0.58, height * 0.3, height * 0.42),
            history: HistoryPanel::new(catalog, screen_size),
            fade: None,
            click,
            music: catalog.music(Music::AmbientEvening),
        };
        screen.refresh();
        screen
    }

    pub fn narrative(&self) -> &dyn Narrative {
        self.narrative.as_ref()
    }

    pub fn history_panel(&self) -> &HistoryPanel {
        &self.history
    }

    pub fn fade(&self) -> Option<&FadeTransition> {
        self.fade.as_ref()
    }

    pub fn choice_banners(&self) -> &[Banner] {
        &self.choices
    }

    fn choice_rect(&self, index: usize) -> Rect {
        let (width, height) = (self.screen.w, self.screen.h);
        Rect::new(
            width * 0.25,
            height * 0.15 + index as f32 * (CHOICE_HEIGHT + CHOICE_GAP),
            width * 0.5,
            CHOICE_HEIGHT,
        )
    }

    /// 根据叙事来源的当前状态重建台词、立绘与选项
    fn refresh(&mut self) {
        let line = self.narrative.current_line();
        self.dialogue
            .set_text(line.map(|l| l.display_text()).unwrap_or_default());
        self.sprite = line
            .and_then(|l| l.sprite)
            .and_then(|sprite| self.sprites.get(&sprite).cloned());

        let choices: Vec<Banner> = self
            .narrative
            .choices()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                Banner::new(
                    self.choice_image.clone(),
                    self.choice_rect(i),
                    format!("{}. {}", i + 1, text),
                    self.choice_font.clone(),
                )
            })
            .collect();
        self.choices = choices;
    }

    fn advance(&mut self) {
        if self.narrative.advance() {
            self.refresh();
        }
    }

    fn choose(&mut self, index: usize) {
        if self.narrative.choose(index) {
            debug!(index = index, "剧情选项");
            self.click.play();
            self.refresh();
        }
    }

    fn on_key(&mut self, key: KeyCode, ctx: &mut SurfaceContext<'_>) {
        match key {
            KeyCode::Space => self.advance(),
            KeyCode::H => self.history.toggle(self.narrative.history().len()),
            KeyCode::Escape => ctx.set_active_surface_by_name(PAUSE),
            other => {
                if let Some(index) = other.choice_index()
                    && index < self.choices.len()
                {
                    self.choose(index);
                }
            }
        }
    }
}

impl Surface for DialogueScreen {
    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) {
        if self.history.is_visible()
            && let InputEvent::KeyDown { key } = event
        {
            let entries = self.narrative.history().len();
            match key {
                KeyCode::Up => return self.history.scroll_by(-SCROLL_SPEED, entries),
                KeyCode::Down => return self.history.scroll_by(SCROLL_SPEED, entries),
                _ => {}
            }
        }

        match event {
            InputEvent::KeyDown { key } => self.on_key(*key, ctx),
            InputEvent::PointerDown { .. } if event.is_left_down() => {
                match self.choices.iter().position(|banner| banner.on_event(event)) {
                    Some(index) => self.choose(index),
                    None => self.advance(),
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut SurfaceContext<'_>) {
        if let Some(fade) = &mut self.fade {
            fade.advance(dt);
            if fade.is_finished() {
                self.fade = None;
            }
        }
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(&self.background, self.screen);

        if self.narrative.current_line().is_some() {
            self.dialogue.draw(target);
        }
        if let Some(sprite) = &self.sprite {
            target.draw_image(sprite, self.sprite_rect);
        }
        for banner in &self.choices {
            banner.draw(target);
        }

        self.history.draw(target, self.narrative.history());

        if let Some(fade) = &self.fade {
            fade.draw(target);
        }
    }

    fn hook(&mut self, ctx: &mut SurfaceContext<'_>) {
        ctx.register_sfx(self.click.clone());
    }

    fn on_enter(&mut self, ctx: &mut SurfaceContext<'_>) {
        self.fade = Some(FadeTransition::fade_in(Color::BLACK, FADE_IN_SECONDS));
        ctx.audio_mut().restart_music(&self.music);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::ScriptedNarrative;
    use vn_surface::{AudioMixer, CommandRecorder, FrameRequests, MemoryMusic, MemorySound, Sfx};

    struct Fixture {
        screen: DialogueScreen,
        mixer: AudioMixer,
        click: Rc<MemorySound>,
    }

    fn fixture() -> Fixture {
        let catalog = AssetCatalog::without_story("assets");
        let click = MemorySound::shared(catalog.sfx(Sfx::ButtonClick1));
        let screen = DialogueScreen::new(
            &catalog,
            (1000.0, 1000.0),
            Box::new(ScriptedNarrative::fallback()),
            click.clone(),
        );
        Fixture {
            screen,
            mixer: AudioMixer::new(Box::new(MemoryMusic::new())),
            click,
        }
    }

    impl Fixture {
        fn send(&mut self, event: InputEvent) -> FrameRequests {
            let mut requests = FrameRequests::new();
            let mut ctx = SurfaceContext::new(&mut self.mixer, &mut requests);
            self.screen.on_event(&event, &mut ctx);
            requests
        }

        fn enter(&mut self) {
            let mut requests = FrameRequests::new();
            let mut ctx = SurfaceContext::new(&mut self.mixer, &mut requests);
            self.screen.hook(&mut ctx);
            self.screen.on_enter(&mut ctx);
        }

        fn line(&self) -> String {
            self.screen
                .narrative()
                .current_line()
                .map(|l| l.text.clone())
                .unwrap_or_default()
        }
    }

    #[test]
    fn test_click_and_space_advance() {
        let mut f = fixture();
        assert!(f.line().starts_with("The sun sinks"));
        f.send(InputEvent::left_down(10.0, 10.0));
        assert_eq!(f.line(), "The gate is open. Should we go in?");
        assert_eq!(f.screen.choice_banners().len(), 2);

        // 有选项时空格不推进
        f.send(InputEvent::key(KeyCode::Space));
        assert_eq!(f.line(), "The gate is open. Should we go in?");
    }

    #[test]
    fn test_digit_and_keypad_choose() {
        let mut f = fixture();
        f.send(InputEvent::key(KeyCode::Space));
        // 超出选项数量的数字键无效
        f.send(InputEvent::key(KeyCode::Digit(3)));
        assert_eq!(f.screen.choice_banners().len(), 2);

        f.send(InputEvent::key(KeyCode::Numpad(2)));
        assert_eq!(f.line(), "Maybe another night, then.");
        assert!(f.screen.choice_banners().is_empty());
        assert_eq!(f.click.play_count(), 1);
    }

    #[test]
    fn test_click_on_choice_banner() {
        let mut f = fixture();
        f.send(InputEvent::key(KeyCode::Space));
        let first = f.screen.choice_banners()[0].rect();
        f.send(InputEvent::left_down(first.x + 5.0, first.y + 5.0));
        assert_eq!(f.line(), "Stay close. It is darker than I thought.");
    }

    #[test]
    fn test_history_toggle_and_scroll() {
        let mut f = fixture();
        f.send(InputEvent::key(KeyCode::H));
        assert!(f.screen.history_panel().is_visible());
        // 历史很短，不需要滚动
        f.send(InputEvent::key(KeyCode::Down));
        assert_eq!(f.screen.history_panel().scroll(), 0.0);
        f.send(InputEvent::key(KeyCode::H));
        assert!(!f.screen.history_panel().is_visible());
    }

    #[test]
    fn test_escape_requests_pause() {
        let mut f = fixture();
        let requests = f.send(InputEvent::key(KeyCode::Escape));
        assert_eq!(requests.navigation(), Some(PAUSE));
    }

    #[test]
    fn test_enter_starts_fade_and_music() {
        let mut f = fixture();
        f.enter();
        assert_eq!(f.mixer.sfx_count(), 1);
        assert!(f.mixer.music().current().is_some());
        assert_eq!(f.screen.fade().map(FadeTransition::alpha), Some(255));

        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut f.mixer, &mut requests);
        f.screen.update(0.5, &mut ctx);
        assert_eq!(f.screen.fade().map(FadeTransition::alpha), Some(128));
        // 淡入期间输入照常处理
        f.screen.on_event(&InputEvent::key(KeyCode::Space), &mut ctx);
        f.screen.update(0.5, &mut ctx);
        assert!(f.screen.fade().is_none());
        assert_eq!(f.line(), "The gate is open. Should we go in?");
    }

    /// 记录每次开始播放的曲目
    struct StartLog {
        current: Option<SoundRef>,
        starts: Rc<std::cell::RefCell<Vec<String>>>,
    }

    impl vn_surface::MusicPlayer for StartLog {
        fn play_looped(&mut self, music: &SoundRef) {
            self.starts.borrow_mut().push(music.path().to_string());
            self.current = Some(music.clone());
        }

        fn stop(&mut self) {
            self.current = None;
        }

        fn set_volume(&mut self, _volume: f32) {}

        fn volume(&self) -> f32 {
            1.0
        }

        fn current(&self) -> Option<&SoundRef> {
            self.current.as_ref()
        }
    }

    #[test]
    fn test_enter_restarts_music_already_playing() {
        let mut f = fixture();
        let starts = Rc::new(std::cell::RefCell::new(Vec::new()));
        f.mixer = AudioMixer::new(Box::new(StartLog {
            current: None,
            starts: starts.clone(),
        }));
        // 标题界面已在播放同一首
        let evening = AssetCatalog::without_story("assets").music(Music::AmbientEvening);
        f.mixer.play_music(&evening);

        f.enter();
        assert_eq!(
            *starts.borrow(),
            vec!["sounds/music/ambient_evening.mp3"; 2]
        );
        assert_eq!(f.mixer.music().current(), Some(&evening));
    }

    #[test]
    fn test_draw_order() {
        let mut f = fixture();
        f.send(InputEvent::key(KeyCode::Space));
        let mut recorder = CommandRecorder::new(1000.0, 1000.0);
        f.screen.draw(&mut recorder);
        assert_eq!(
            recorder.images(),
            vec![
                "images/backgrounds/abandoned_amusement_park.png",
                "images/ui/banner_dialogue_wood.png",
                "images/characters/girl_1_standing.png",
                "images/ui/banner_choice_wood.png",
                "images/ui/banner_choice_wood.png",
            ]
        );
        assert!(recorder.texts().contains(&"1. Walk through the gate"));
    }
}
