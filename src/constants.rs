use std::time::Duration;

pub const WINDOW_TITLE: &str = "Slideshow";
pub const WINDOWED_WIDTH: i32 = 1280;         // Window size when leaving fullscreen
pub const WINDOWED_HEIGHT: i32 = 720;
pub const FPS: u32 = 60;                      // Target frames per second
pub const MAX_FRAME_TIME: f32 = 0.1;          // Longest step fed to the slide timers (seconds)

pub const DEFAULT_PHOTOS_DIR: &str = "photos";
pub const DEFAULT_ROTATION: Duration = Duration::from_secs(10);      // Time each slide is shown
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(800); // Crossfade duration
pub const DEFAULT_CAPTION_FONT_SIZE: i32 = 64;
pub const DEFAULT_BLUR_RADIUS: i32 = 30;
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

pub const CAPTION_MARKER: char = '$';
pub const CAPTION_PAD_Y: f32 = 18.0;
pub const CAPTION_SPACING: f32 = 1.0;

pub const BACKGROUND_DOWNSCALE: i32 = 8;      // Blur is done on a reduced copy
pub const BACKGROUND_DIM: f32 = 0.45;         // Black overlay strength over the blurred background

pub const FONT_CANDIDATES: &[&str] = &[
    "IBMPlexSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
];
