//! # 主标题界面

use std::rc::Rc;

use vn_surface::{
    AssetCatalog, Background, Button, ButtonIcon, Color, DrawTarget, FontFace, ImageRef,
    InputEvent, Music, Point, Rect, SoundEffect, SoundRef, Surface, SurfaceContext, Text,
};

use super::{ICON_SIZE, SETTINGS, WALK_TO_GATE, full_screen};

/// 按钮间距
const BUTTON_GAP: f32 = 20.0;

/// 主标题界面
pub struct TitleScreen {
    background: ImageRef,
    screen: Rect,
    heading: Text,
    /// 开始、设置、退出
    buttons: Vec<Button>,
    music: SoundRef,
}

impl TitleScreen {
    pub fn new(
        catalog: &AssetCatalog,
        screen_size: (f32, f32),
        click: Rc<dyn SoundEffect>,
    ) -> Self {
        let (width, height) = screen_size;
        let row_width = ICON_SIZE * 3.0 + BUTTON_GAP * 2.0;
        let x = (width - row_width) / 2.0;
        let y = height * 0.55;
        let slot = |i: f32| Rect::new(x + (ICON_SIZE + BUTTON_GAP) * i, y, ICON_SIZE, ICON_SIZE);

        let buttons = vec![
            Button::new(catalog.button(ButtonIcon::Play), slot(0.0), |ctx| {
                ctx.set_active_surface_by_name(WALK_TO_GATE)
            })
            .with_click_sound(click.clone()),
            Button::new(catalog.button(ButtonIcon::Cog), slot(1.0), |ctx| {
                ctx.set_active_surface_by_name(SETTINGS)
            })
            .with_click_sound(click.clone()),
            Button::new(catalog.button(ButtonIcon::Quit), slot(2.0), |ctx| {
                ctx.request_quit()
            })
            .with_click_sound(click),
        ];

        Self {
            background: catalog.background(Background::MoonSky),
            screen: full_screen(screen_size),
            heading: Text::new(
                "Moonlit",
                catalog.font(FontFace::MonogramExtended, 120),
                Point::new(width * 0.1, height * 0.15),
            )
            .with_color(Color::WHITE),
            buttons,
            music: catalog.music(Music::AmbientEvening),
        }
    }
}

impl Surface for TitleScreen {
    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) {
        for button in &mut self.buttons {
            button.handle_event(event, ctx);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SurfaceContext<'_>) {}

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(&self.background, self.screen);
        self.heading.draw(target);
        for button in &self.buttons {
            button.draw(target);
        }
    }

    fn on_enter(&mut self, ctx: &mut SurfaceContext<'_>) {
        ctx.audio_mut().play_music(&self.music);
    }

    fn on_leave(&mut self) {
        for button in &mut self.buttons {
            button.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vn_surface::{AudioMixer, CommandRecorder, FrameRequests, MemoryMusic, MemorySound, Sfx};

    fn screen() -> TitleScreen {
        let catalog = AssetCatalog::without_story("assets");
        TitleScreen::new(
            &catalog,
            (1920.0, 1080.0),
            MemorySound::shared(catalog.sfx(Sfx::ButtonClick1)),
        )
    }

    fn click_at(screen: &mut TitleScreen, x: f32, y: f32) -> FrameRequests {
        let mut mixer = AudioMixer::new(Box::new(MemoryMusic::new()));
        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut mixer, &mut requests);
        screen.on_event(&InputEvent::left_down(x, y), &mut ctx);
        screen.on_event(&InputEvent::left_up(x, y), &mut ctx);
        requests
    }

    #[test]
    fn test_buttons_navigate() {
        let mut screen = screen();
        // 按钮行起点 (1920 - 340) / 2 = 790，y = 594
        assert_eq!(
            click_at(&mut screen, 800.0, 600.0).navigation(),
            Some(WALK_TO_GATE)
        );
        assert_eq!(
            click_at(&mut screen, 920.0, 600.0).navigation(),
            Some(SETTINGS)
        );
        let quit = click_at(&mut screen, 1040.0, 600.0);
        assert!(quit.quit_requested());
        assert_eq!(quit.navigation(), None);
    }

    #[test]
    fn test_draw_layout() {
        let screen = screen();
        let mut recorder = CommandRecorder::new(1920.0, 1080.0);
        screen.draw(&mut recorder);
        insta::assert_snapshot!(recorder.summary(), @r#"
        image images/backgrounds/moon_sky.png @ 0,0 1920x1080
        text "Moonlit" @ 192,162
        image images/ui/button_play.png @ 790,594 100x100
        image images/ui/button_cog.png @ 910,594 100x100
        image images/ui/button_quit.png @ 1030,594 100x100
        "#);
    }
}
