use raylib::prelude::*;
use tracing::debug;

use crate::deck::Deck;
use crate::error::Error;
use crate::font::CaptionFont;
use crate::source::ImageSource;
use crate::state::{Slideshow, SlideshowState};

/// Off-screen layers used to crossfade two whole slides.
///
/// Each slide is drawn opaque into its own layer, then the layers are blended
/// onto the screen, so a slide's backdrop never shows through its own image.
pub struct Compositor {
    outgoing: RenderTexture2D,
    incoming: RenderTexture2D,
    caption_font_size: i32,
    placeholder: String,
}

impl Compositor {
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        caption_font_size: i32,
        placeholder: String,
    ) -> Result<Self, Error> {
        let (width, height) = layer_size(rl);
        Ok(Self {
            outgoing: load_layer(rl, thread, width, height)?,
            incoming: load_layer(rl, thread, width, height)?,
            caption_font_size,
            placeholder,
        })
    }

    /// Reallocate the layers when the window size changed.
    fn fit_window(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<(), Error> {
        let (width, height) = layer_size(rl);
        if self.outgoing.width() as u32 == width && self.outgoing.height() as u32 == height {
            return Ok(());
        }
        debug!(width, height, "resizing crossfade layers");
        self.outgoing = load_layer(rl, thread, width, height)?;
        self.incoming = load_layer(rl, thread, width, height)?;
        Ok(())
    }

    pub fn draw_frame(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        show: &Slideshow,
        deck: &Deck,
        source: &ImageSource,
        font: &CaptionFont,
    ) -> Result<(), Error> {
        self.fit_window(rl, thread)?;
        let font_size = self.caption_font_size;

        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        let sw = d.get_screen_width();
        let sh = d.get_screen_height();

        match show.state() {
            SlideshowState::Empty => {
                let placeholder = self.placeholder.as_str();
                let size = font.measure(placeholder, font_size as f32, 1.0);
                d.draw_text_ex(
                    font,
                    placeholder,
                    centered(size, sw, sh),
                    font_size as f32,
                    1.0,
                    Color::GRAY,
                );
            }
            SlideshowState::Idle { index } | SlideshowState::Paused { index } => {
                if let Some(slide) = deck.at(source, index) {
                    slide.draw(&mut d, sw, sh, font, font_size);
                }
            }
            SlideshowState::Transitioning { from, to, .. } => {
                for (layer, index) in [(&mut self.outgoing, from), (&mut self.incoming, to)] {
                    let (lw, lh) = (layer.width(), layer.height());
                    let mut t = d.begin_texture_mode(thread, layer);
                    t.clear_background(Color::BLACK);
                    if let Some(slide) = deck.at(source, index) {
                        slide.draw(&mut t, lw, lh, font, font_size);
                    }
                }
                let (outgoing, incoming) = layer_opacities(show.blend());
                draw_layer(&mut d, &self.outgoing, outgoing, sw, sh);
                draw_layer(&mut d, &self.incoming, incoming, sw, sh);
            }
        }
        Ok(())
    }
}

fn layer_size(rl: &RaylibHandle) -> (u32, u32) {
    (
        rl.get_screen_width().max(1) as u32,
        rl.get_screen_height().max(1) as u32,
    )
}

fn load_layer(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    width: u32,
    height: u32,
) -> Result<RenderTexture2D, Error> {
    rl.load_render_texture(thread, width, height)
        .map_err(|e| Error::Render(format!("failed to create {width}x{height} render texture: {e}")))
}

/// Blit a layer over the whole screen with the given opacity.
fn draw_layer(d: &mut RaylibDrawHandle, layer: &RenderTexture2D, opacity: f32, sw: i32, sh: i32) {
    // Render textures are stored upside down
    d.draw_texture_pro(
        layer,
        Rectangle::new(0.0, 0.0, layer.width() as f32, -(layer.height() as f32)),
        Rectangle::new(0.0, 0.0, sw as f32, sh as f32),
        Vector2::zero(),
        0.0,
        Color::new(255, 255, 255, opacity_byte(opacity)),
    );
}

/// Opacities of the outgoing and incoming layers for an eased blend.
pub fn layer_opacities(blend: f32) -> (f32, f32) {
    (1.0 - blend, blend)
}

/// Top-left corner that centers a box of `size` on the screen.
pub fn centered(size: Vector2, sw: i32, sh: i32) -> Vector2 {
    Vector2::new((sw as f32 - size.x) / 2.0, (sh as f32 - size.y) / 2.0)
}

/// Opacity in `[0, 1]` as a color alpha.
pub fn opacity_byte(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}
