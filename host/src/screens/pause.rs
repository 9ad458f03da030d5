//! # 暂停菜单

use std::rc::Rc;

use vn_surface::{
    AssetCatalog, Background, Button, ButtonIcon, Color, DrawTarget, FontFace, ImageRef,
    InputEvent, KeyCode, Point, Rect, SoundEffect, Surface, SurfaceContext, Text,
};

use super::{ICON_SIZE, ROOT, WALK_TO_GATE, full_screen};

/// 暗化遮罩透明度
const DIM_ALPHA: u8 = 160;

/// 暂停菜单
pub struct PauseScreen {
    background: ImageRef,
    screen: Rect,
    heading: Text,
    /// 继续、回到标题
    buttons: Vec<Button>,
}

impl PauseScreen {
    pub fn new(
        catalog: &AssetCatalog,
        screen_size: (f32, f32),
        click: Rc<dyn SoundEffect>,
    ) -> Self {
        let (width, height) = screen_size;
        let y = height / 2.0 - ICON_SIZE / 2.0;

        let buttons = vec![
            Button::new(
                catalog.button(ButtonIcon::Play),
                Rect::new(width / 2.0 - ICON_SIZE - 20.0, y, ICON_SIZE, ICON_SIZE),
                |ctx| ctx.set_active_surface_by_name(WALK_TO_GATE),
            )
            .with_click_sound(click.clone()),
            Button::new(
                catalog.button(ButtonIcon::Home),
                Rect::new(width / 2.0 + 20.0, y, ICON_SIZE, ICON_SIZE),
                |ctx| ctx.set_active_surface_by_name(ROOT),
            )
            .with_click_sound(click),
        ];

        Self {
            background: catalog.background(Background::AbandonedAmusementPark),
            screen: full_screen(screen_size),
            heading: Text::new(
                "Paused",
                catalog.font(FontFace::MonogramExtended, 80),
                Point::new(width / 2.0 - 120.0, y - 160.0),
            ),
            buttons,
        }
    }
}

impl Surface for PauseScreen {
    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) {
        if let InputEvent::KeyDown {
            key: KeyCode::Escape,
        } = event
        {
            ctx.set_active_surface_by_name(WALK_TO_GATE);
            return;
        }
        for button in &mut self.buttons {
            button.handle_event(event, ctx);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SurfaceContext<'_>) {}

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(&self.background, self.screen);
        target.fill_screen(Color::BLACK.with_alpha(DIM_ALPHA));
        self.heading.draw(target);
        for button in &self.buttons {
            button.draw(target);
        }
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

    fn screen() -> PauseScreen {
        let catalog = AssetCatalog::without_story("assets");
        PauseScreen::new(
            &catalog,
            (1000.0, 800.0),
            MemorySound::shared(catalog.sfx(Sfx::ButtonClick1)),
        )
    }

    fn send(screen: &mut PauseScreen, events: &[InputEvent]) -> FrameRequests {
        let mut mixer = AudioMixer::new(Box::new(MemoryMusic::new()));
        let mut requests = FrameRequests::new();
        let mut ctx = SurfaceContext::new(&mut mixer, &mut requests);
        for event in events {
            screen.on_event(event, &mut ctx);
        }
        requests
    }

    #[test]
    fn test_escape_resumes() {
        let mut screen = screen();
        let requests = send(&mut screen, &[InputEvent::key(KeyCode::Escape)]);
        assert_eq!(requests.navigation(), Some(WALK_TO_GATE));
    }

    #[test]
    fn test_home_button() {
        let mut screen = screen();
        // Home 按钮位于 (520, 350)
        let requests = send(
            &mut screen,
            &[
                InputEvent::left_down(530.0, 360.0),
                InputEvent::left_up(530.0, 360.0),
            ],
        );
        assert_eq!(requests.navigation(), Some(ROOT));
    }

    #[test]
    fn test_leave_drops_pending_press() {
        let mut screen = screen();
        send(&mut screen, &[InputEvent::left_down(530.0, 360.0)]);
        screen.on_leave();

        let requests = send(
            &mut screen,
            &[
                InputEvent::left_down(10.0, 10.0),
                InputEvent::pointer_move(530.0, 360.0),
                InputEvent::left_up(530.0, 360.0),
            ],
        );
        assert_eq!(requests.navigation(), None);
    }

    #[test]
    fn test_draw_dims_scene() {
        let screen = screen();
        let mut recorder = CommandRecorder::new(1000.0, 800.0);
        screen.draw(&mut recorder);
        insta::assert_snapshot!(recorder.summary(), @r#"
        image images/backgrounds/abandoned_amusement_park.png @ 0,0 1000x800
        rect 0,0 1000x800 #000000a0
        text "Paused" @ 380,190
        image images/ui/button_play.png @ 380,350 100x100
        image images/ui/button_home.png @ 520,350 100x100
        "#);
    }
}
