use std::path::Path;

use crate::constants::CAPTION_MARKER;

/// Caption for an image file, derived from its name.
///
/// Only names starting with the caption marker get one: the stem with the
/// leading markers stripped, `_` and `-` shown as spaces. Everything else
/// (including a name that is nothing but markers) has no caption.
pub fn caption_for(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    if !name.starts_with(CAPTION_MARKER) {
        return None;
    }

    let stem = path.file_stem()?.to_string_lossy();
    let text = stem
        .trim_start_matches(CAPTION_MARKER)
        .replace(['_', '-'], " ");
    let text = text.trim();

    if text.is_empty() { None } else { Some(text.to_string()) }
}
