use std::env;
use std::path::PathBuf;

use raylib::prelude::*;
use tracing::{debug, info};

use crate::constants::FONT_CANDIDATES;

/// Font used for captions: the first candidate that loads, else raylib's own.
pub enum CaptionFont {
    Loaded(Font),
    Builtin(WeakFont),
}

impl AsRef<raylib::ffi::Font> for CaptionFont {
    fn as_ref(&self) -> &raylib::ffi::Font {
        match self {
            CaptionFont::Loaded(font) => font.as_ref(),
            CaptionFont::Builtin(font) => font.as_ref(),
        }
    }
}

impl CaptionFont {
    /// Size of `text` drawn with this font.
    pub fn measure(&self, text: &str, size: f32, spacing: f32) -> Vector2 {
        match self {
            CaptionFont::Loaded(font) => font.measure_text(text, size, spacing),
            CaptionFont::Builtin(font) => font.measure_text(text, size, spacing),
        }
    }
}

/// Places to look for the caption font, most specific first.
pub fn font_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(PathBuf::from)) {
        candidates.push(dir.join("fonts").join(FONT_CANDIDATES[0]));
    }
    candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));
    candidates
}

pub fn load_caption_font(rl: &mut RaylibHandle, thread: &RaylibThread, size: i32) -> CaptionFont {
    for candidate in font_candidates() {
        if !candidate.is_file() {
            continue;
        }
        let Some(name) = candidate.to_str() else {
            continue;
        };
        match rl.load_font_ex(thread, name, size, None) {
            Ok(font) => {
                info!(font = %candidate.display(), size, "loaded caption font");
                return CaptionFont::Loaded(font);
            }
            Err(e) => debug!(font = %candidate.display(), error = %e, "font candidate rejected"),
        }
    }
    info!("no caption font found, using raylib default");
    CaptionFont::Builtin(rl.get_font_default())
}
