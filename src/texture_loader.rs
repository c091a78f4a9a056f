use std::fs;
use std::io::Cursor;
use std::path::Path;
use raylib::prelude::*;
use exif::{In, Reader, Tag};
use tracing::debug;

use crate::constants::*;
use crate::error::Error;

/// Pixel operation needed to display an image upright.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OrientationFix {
    FlipHorizontal,
    FlipVertical,
    RotateCw,
    RotateCcw,
}

/// Operations, in order, that undo an EXIF orientation value.
pub fn orientation_fixes(orientation: u32) -> &'static [OrientationFix] {
    use OrientationFix::*;
    match orientation {
        2 => &[FlipHorizontal],
        3 => &[RotateCw, RotateCw],
        4 => &[FlipVertical],
        5 => &[RotateCw, FlipHorizontal],  // transpose
        6 => &[RotateCw],
        7 => &[RotateCcw, FlipHorizontal], // transverse
        8 => &[RotateCcw],
        _ => &[],
    }
}

/// EXIF orientation of an encoded image, 1 (upright) when absent.
pub fn read_orientation(bytes: &[u8]) -> u32 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1),
        Err(e) => {
            debug!(error = %e, "no EXIF data, assuming upright");
            1
        }
    }
}

/// Largest size with the aspect ratio of `width`x`height` that fits in the target.
pub fn fit_size(width: i32, height: i32, target_width: i32, target_height: i32) -> (i32, i32) {
    if width <= 0 || height <= 0 || target_width <= 0 || target_height <= 0 {
        return (0, 0);
    }
    let scale = (target_width as f32 / width as f32).min(target_height as f32 / height as f32);
    (
        ((width as f32 * scale).round() as i32).max(1),
        ((height as f32 * scale).round() as i32).max(1),
    )
}

// --- Load Image, Apply EXIF Orientation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> Result<Image, Error> {
    let file_bytes = fs::read(image_path).map_err(|e| Error::load(image_path, e))?;

    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    // raylib picks the decoder from the extension hint
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| Error::load(image_path, e))?;
    if image.width() <= 0 || image.height() <= 0 {
        return Err(Error::load(image_path, "decoded to an empty image"));
    }

    let orientation = read_orientation(&file_bytes);
    for fix in orientation_fixes(orientation) {
        match fix {
            OrientationFix::FlipHorizontal => image.flip_horizontal(),
            OrientationFix::FlipVertical => image.flip_vertical(),
            OrientationFix::RotateCw => image.rotate_cw(),
            OrientationFix::RotateCcw => image.rotate_ccw(),
        }
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF orientation");
    }

    Ok(image)
}

/// Copy of `image` scaled to fit the target, aspect ratio preserved.
pub fn prepare_foreground(image: &Image, target: (i32, i32)) -> Image {
    let (w, h) = fit_size(image.width(), image.height(), target.0, target.1);
    let mut fitted = image.clone();
    if (w, h) != (image.width(), image.height()) && w > 0 && h > 0 {
        fitted.resize(w, h);
    }
    fitted
}

/// Blurred copy of `image` stretched to the target's aspect ratio.
///
/// The blur runs on a copy reduced by `BACKGROUND_DOWNSCALE`, so the radius
/// is scaled down with it; the texture is stretched back up when drawn.
pub fn prepare_background(image: &Image, target: (i32, i32), blur_radius: i32) -> Image {
    let w = (target.0 / BACKGROUND_DOWNSCALE).max(1);
    let h = (target.1 / BACKGROUND_DOWNSCALE).max(1);
    let mut background = image.clone();
    background.resize(w, h);
    let radius = blur_radius / BACKGROUND_DOWNSCALE;
    if radius > 0 {
        background.blur_gaussian(radius);
    }
    background
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrientationFix::*;

    #[test]
    fn upright_and_unknown_need_nothing() {
        assert!(orientation_fixes(1).is_empty());
        assert!(orientation_fixes(0).is_empty());
        assert!(orientation_fixes(42).is_empty());
    }

    #[test]
    fn rotations() {
        assert_eq!(orientation_fixes(3), &[RotateCw, RotateCw]);
        assert_eq!(orientation_fixes(6), &[RotateCw]);
        assert_eq!(orientation_fixes(8), &[RotateCcw]);
    }

    #[test]
    fn mirrored_orientations() {
        assert_eq!(orientation_fixes(2), &[FlipHorizontal]);
        assert_eq!(orientation_fixes(4), &[FlipVertical]);
        assert_eq!(orientation_fixes(5), &[RotateCw, FlipHorizontal]);
        assert_eq!(orientation_fixes(7), &[RotateCcw, FlipHorizontal]);
    }

    #[test]
    fn garbage_bytes_read_as_upright() {
        assert_eq!(read_orientation(b"definitely not an image"), 1);
    }

    #[test]
    fn fit_letterboxes_wide_images() {
        assert_eq!(fit_size(4000, 1000, 1920, 1080), (1920, 480));
    }

    #[test]
    fn fit_pillarboxes_tall_images() {
        assert_eq!(fit_size(1000, 2000, 1920, 1080), (540, 1080));
    }

    #[test]
    fn fit_scales_small_images_up() {
        assert_eq!(fit_size(320, 180, 1920, 1080), (1920, 1080));
    }

    #[test]
    fn fit_degenerate_sizes() {
        assert_eq!(fit_size(0, 100, 1920, 1080), (0, 0));
        assert_eq!(fit_size(100, 100, 0, 0), (0, 0));
        assert_eq!(fit_size(100_000, 1, 1920, 1080), (1920, 1));
    }
}
