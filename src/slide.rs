use std::path::{Path, PathBuf};

use raylib::prelude::*;
use tracing::debug;

use crate::caption::caption_for;
use crate::constants::*;
use crate::error::Error;
use crate::font::CaptionFont;
use crate::texture_loader::{
    fit_size, load_image_with_exif_rotation, prepare_background, prepare_foreground,
};

/// Appearance settings shared by every slide.
#[derive(Debug, Clone, Copy)]
pub struct SlideStyle {
    /// Size images are prepared for, normally the monitor resolution.
    pub target: (i32, i32),
    pub blur_radius: i32,
}

pub struct Slide {
    path: PathBuf,
    caption: Option<String>,
    foreground: Texture2D,
    background: Texture2D,
}

impl Slide {
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        path: &Path,
        style: &SlideStyle,
    ) -> Result<Self, Error> {
        let image = load_image_with_exif_rotation(path)?;
        let foreground = prepare_foreground(&image, style.target);
        let background = prepare_background(&image, style.target, style.blur_radius);
        drop(image);

        let foreground = rl
            .load_texture_from_image(thread, &foreground)
            .map_err(|e| Error::load(path, e))?;
        let background = rl
            .load_texture_from_image(thread, &background)
            .map_err(|e| Error::load(path, e))?;
        foreground.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_BILINEAR);
        background.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_BILINEAR);

        let caption = caption_for(path);
        debug!(
            path = %path.display(),
            width = foreground.width(),
            height = foreground.height(),
            caption = ?caption,
            "loaded slide"
        );

        Ok(Self {
            path: path.to_path_buf(),
            caption,
            foreground,
            background,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Draw the slide covering a `width`x`height` target.
    pub fn draw<D: RaylibDraw>(
        &self,
        d: &mut D,
        width: i32,
        height: i32,
        font: &CaptionFont,
        font_size: i32,
    ) {
        let screen = Rectangle::new(0.0, 0.0, width as f32, height as f32);

        // Blurred backdrop stretched to the whole target, then dimmed
        d.draw_texture_pro(
            &self.background,
            Rectangle::new(0.0, 0.0, self.background.width() as f32, self.background.height() as f32),
            screen,
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
        d.draw_rectangle_rec(screen, Color::new(0, 0, 0, (BACKGROUND_DIM * 255.0) as u8));

        // Fitted image, centered
        let tex_width = self.foreground.width();
        let tex_height = self.foreground.height();
        d.draw_texture_pro(
            &self.foreground,
            Rectangle::new(0.0, 0.0, tex_width as f32, tex_height as f32),
            fit_rect(tex_width, tex_height, width, height),
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );

        if let Some(text) = &self.caption {
            let text_size = font.measure(text, font_size as f32, CAPTION_SPACING);
            let (bar, text_pos) = caption_layout(text_size, width, height);

            d.draw_rectangle_rec(bar, Color::new(40, 28, 16, 160));
            d.draw_rectangle_rec(Rectangle::new(bar.x, bar.y, bar.width, 1.0), Color::new(255, 255, 255, 30));
            d.draw_text_ex(
                font,
                text,
                Vector2::new(text_pos.x + 1.0, text_pos.y + 1.0),
                font_size as f32,
                CAPTION_SPACING,
                Color::new(0, 0, 0, 90),
            );
            d.draw_text_ex(
                font,
                text,
                text_pos,
                font_size as f32,
                CAPTION_SPACING,
                Color::new(255, 255, 255, 245),
            );
        }
    }
}

/// Centered destination rectangle for a texture fitted into the target.
pub fn fit_rect(tex_width: i32, tex_height: i32, width: i32, height: i32) -> Rectangle {
    let (w, h) = fit_size(tex_width, tex_height, width, height);
    Rectangle::new(
        ((width - w) / 2) as f32,
        ((height - h) / 2) as f32,
        w as f32,
        h as f32,
    )
}

/// Caption bar flush with the bottom edge, and where its text starts.
pub fn caption_layout(text_size: Vector2, width: i32, height: i32) -> (Rectangle, Vector2) {
    let bar_height = text_size.y + CAPTION_PAD_Y * 2.0;
    let bar = Rectangle::new(0.0, height as f32 - bar_height, width as f32, bar_height);
    let text_pos = Vector2::new(
        ((width as f32 - text_size.x) / 2.0).floor(),
        bar.y + CAPTION_PAD_Y,
    );
    (bar, text_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(r: Rectangle) -> (f32, f32, f32, f32) {
        (r.x, r.y, r.width, r.height)
    }

    #[test]
    fn wide_image_is_letterboxed() {
        assert_eq!(rect(fit_rect(1920, 480, 1920, 1080)), (0.0, 300.0, 1920.0, 480.0));
    }

    #[test]
    fn tall_image_is_pillarboxed() {
        assert_eq!(rect(fit_rect(540, 1080, 1280, 720)), (460.0, 0.0, 360.0, 720.0));
    }

    #[test]
    fn caption_bar_sits_on_the_bottom_edge() {
        let (bar, text) = caption_layout(Vector2::new(400.0, 64.0), 1920, 1080);
        assert_eq!(rect(bar), (0.0, 1080.0 - 100.0, 1920.0, 100.0));
        assert_eq!((text.x, text.y), (760.0, 998.0));
    }

    #[test]
    fn caption_wider_than_screen_starts_left_of_it() {
        let (_, text) = caption_layout(Vector2::new(2000.0, 64.0), 1000, 800);
        assert_eq!(text.x, -500.0);
    }
}
