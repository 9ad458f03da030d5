//! # 设置界面
//!
//! 两个滑块：音效音量（经由全局音效音量扇出）与背景音乐音量。

use std::rc::Rc;

use vn_surface::{
    AssetCatalog, Background, Button, ButtonIcon, Color, ConfigurationError, DrawTarget,
    FontFace, FontRef, ImageRef, InputEvent, Point, Rect, Slider, SoundEffect, Surface, SurfaceContext, Text,
};

use super::{ICON_SIZE, ROOT, full_screen};

/// 滑块尺寸
const SLIDER_WIDTH: f32 = 480.0;
const SLIDER_HEIGHT: f32 = 30.0;
/// 两个滑块的垂直间距
const ROW_GAP: f32 = 120.0;

/// 设置界面
pub struct SettingsScreen {
    background: ImageRef,
    screen: Rect,
    heading: Text,
    back_button: Button,
    sfx_label: Text,
    sfx_slider: Slider,
    music_label: Text,
    music_slider: Slider,
    /// 滑块两端 "0" / "100" 的字体
    number_font: FontRef,
}

impl SettingsScreen {
    pub fn new(
        catalog: &AssetCatalog,
        screen_size: (f32, f32),
        click: Rc<dyn SoundEffect>,
        sfx_volume: f32,
        music_volume: f32,
    ) -> Result<Self, ConfigurationError> {
        let (width, height) = screen_size;
        let label_font = catalog.font(FontFace::MonogramExtended, 50);

        let slider_x = (width / 2.0).floor();
        let slider_y = (height / 2.0).floor() - (height / 3.83).floor();
        let label_x = (width / 2.0).floor() - (width / 9.0).floor() - 55.0;
        let label_y = (height / 2.0).floor() - (height / 4.0).floor();

        let sfx_slider = Slider::new(
            Rect::new(slider_x, slider_y, SLIDER_WIDTH, SLIDER_HEIGHT),
            0.0,
            1.0,
            sfx_volume,
            |volume, ctx| {
                ctx.set_global_sfx_volume(volume);
            },
        )?;
        let music_slider = Slider::new(
            Rect::new(slider_x, slider_y + ROW_GAP, SLIDER_WIDTH, SLIDER_HEIGHT),
            0.0,
            1.0,
            music_volume,
            |volume, ctx| {
                ctx.audio_mut().set_music_volume(volume);
            },
        )?;

        let back_button = Button::new(
            catalog.button(ButtonIcon::ArrowLeft),
            Rect::new(90.0, 90.0, ICON_SIZE, ICON_SIZE),
            |ctx| ctx.set_active_surface_by_name(ROOT),
        )
        .with_click_sound(click);

        Ok(Self {
            background: catalog.background(Background::MoonSky),
            screen: full_screen(screen_size),
            heading: Text::new(
                "Settings",
                catalog.font(FontFace::MonogramExtended, 80),
                Point::new(300.0, 85.0),
            ),
            back_button,
            sfx_label: Text::new("SFX", label_font.clone(), Point::new(label_x, label_y)),
            sfx_slider,
            music_label: Text::new(
                "Background Music",
                label_font,
                Point::new(label_x, label_y + ROW_GAP),
            ),
            music_slider,
            number_font: catalog.font(FontFace::MonogramExtended, 30),
        })
    }

    pub fn sfx_slider(&self) -> &Slider {
        &self.sfx_slider
    }

    pub fn music_slider(&self) -> &Slider {
        &self.music_slider
    }

    /// 在滑块两端绘制 "0" 和 "100"
    fn draw_slider_numbers(&self, slider: &Slider, target: &mut dyn DrawTarget) {
        let track = slider.track();
        let (zero_w, zero_h) = target.measure_text("0", &self.number_font);
        let y = track.y + 5.0 - zero_h / 8.0;
        let color = Color::WHITE;

        target.draw_text(
            "0",
            &self.number_font,
            Point::new(track.x - zero_w * 2.0, y),
            color,
        );
        target.draw_text(
            "100",
            &self.number_font,
            Point::new(track.right() + zero_w / 1.1, y),
            color,
        );
    }
}

impl Surface for SettingsScreen {
    fn on_event(&mut self, event: &InputEvent, ctx: &mut SurfaceContext<'_>) {
        self.back_button.handle_event(event, ctx);
        self.sfx_slider.handle_event(event, ctx);
        self.music_slider.handle_event(event, ctx);
    }

    fn update(&mut self, _dt: f32, _ctx: &mut SurfaceContext<'_>) {}

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.draw_image(&self.background, self.screen);
        self.heading.draw(target);
        self.back_button.draw(target);

        self.sfx_label.draw(target);
        self.sfx_slider.draw(target);
        self.music_label.draw(target);
        self.music_slider.draw(target);

        self.draw_slider_numbers(&self.sfx_slider, target);
        self.draw_slider_numbers(&self.music_slider, target);
    }

    /// 每次进入时与混音器的实际音量同步
    fn on_enter(&mut self, ctx: &mut SurfaceContext<'_>) {
        self.sfx_slider.set_value(ctx.audio().global_sfx_volume());
        self.music_slider.set_value(ctx.audio().music_volume());
    }

    fn on_leave(&mut self) {
        self.back_button.reset();
        self.sfx_slider.reset();
        self.music_slider.reset();
    }
}
