use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod caption;
mod config;
mod constants;
mod deck;
mod error;
mod font;
mod input;
mod render;
mod slide;
mod source;
mod state;
mod texture_loader;

use crate::config::{Cli, Config};
use crate::constants::*;
use crate::deck::Deck;
use crate::font::load_caption_font;
use crate::input::{Command, poll_commands};
use crate::render::Compositor;
use crate::slide::SlideStyle;
use crate::source::ImageSource;
use crate::state::Slideshow;

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::from_default_env().add_directive(format!("slideshow={level}").parse()?);
    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

/// Fullscreen at monitor resolution with the cursor hidden, or a resizable
/// window with the cursor shown.
struct Display {
    monitor: (i32, i32),
    fullscreen: bool,
}

impl Display {
    fn apply(&self, rl: &mut RaylibHandle) {
        if self.fullscreen {
            if !rl.is_window_fullscreen() {
                rl.set_window_size(self.monitor.0, self.monitor.1);
                rl.toggle_fullscreen();
            }
            rl.hide_cursor();
        } else {
            if rl.is_window_fullscreen() {
                rl.toggle_fullscreen();
            }
            rl.set_window_size(WINDOWED_WIDTH, WINDOWED_HEIGHT);
            rl.show_cursor();
        }
    }

    fn toggle(&mut self, rl: &mut RaylibHandle) {
        self.fullscreen = !self.fullscreen;
        self.apply(rl);
        info!(fullscreen = self.fullscreen, "display mode changed");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = Config::load(&cli)?;
    let mut source = ImageSource::open(&cfg.photos_dir, &cfg.source_options())
        .with_context(|| format!("scanning {}", cfg.photos_dir.display()))?;
    if source.is_empty() {
        warn!(dir = %cfg.photos_dir.display(), "no supported images found");
    }

    // A zero size opens the window at monitor resolution
    let (mut rl, thread) = raylib::init()
        .size(0, 0)
        .title(WINDOW_TITLE)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(cfg.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    rl.set_exit_key(None);

    let monitor = (rl.get_screen_width(), rl.get_screen_height());
    let mut display = Display { monitor, fullscreen: cfg.fullscreen };
    display.apply(&mut rl);
    info!(width = monitor.0, height = monitor.1, fullscreen = cfg.fullscreen, "window ready");

    let font = load_caption_font(&mut rl, &thread, cfg.caption_font_size);
    let placeholder = format!("No images in {}", cfg.photos_dir.display());
    let mut compositor = Compositor::new(&mut rl, &thread, cfg.caption_font_size, placeholder)?;
    let mut deck = Deck::new(SlideStyle {
        target: monitor,
        blur_radius: cfg.background_blur_radius,
    });
    let mut show = Slideshow::new(source.len(), cfg.timing());
    info!(
        images = show.len(),
        rotation = ?cfg.rotation,
        transition = ?cfg.transition,
        "starting slideshow"
    );

    deck.sync(&mut rl, &thread, &mut source, &mut show);

    // --- Main Loop ---
    'main: while !rl.window_should_close() {
        // A slow synchronous load must not swallow a whole crossfade
        let dt = rl.get_frame_time().min(MAX_FRAME_TIME);

        for command in poll_commands(&mut rl) {
            match command {
                Command::Quit => break 'main,
                Command::Next => show.next(),
                Command::Previous => show.previous(),
                Command::TogglePause => {
                    show.toggle_pause();
                    info!(paused = show.is_paused(), "pause toggled");
                }
                Command::ToggleFullscreen => display.toggle(&mut rl),
            }
        }

        show.update(dt);
        deck.sync(&mut rl, &thread, &mut source, &mut show);
        compositor.draw_frame(&mut rl, &thread, &show, &deck, &source, &font)?;
    }

    info!("slideshow closed");
    Ok(())
}
