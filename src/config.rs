//! Command line and YAML configuration.
//!
//! Defaults come from [`Config::default`]; a YAML file replaces any keys it
//! names, and command line flags win over both.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{ArgAction, Parser};
use serde::Deserialize;

use crate::constants::*;
use crate::error::Error;
use crate::source::SourceOptions;
use crate::state::Timing;

#[derive(Debug, Parser)]
#[command(name = "slideshow", about = "Fullscreen photo slideshow with crossfades")]
pub struct Cli {
    /// Directory containing the images
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Time each image stays on screen (seconds, or e.g. "1m30s")
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    pub rotation: Option<Duration>,

    /// Crossfade duration (seconds, or e.g. "800ms")
    #[arg(short, long, value_name = "DURATION", value_parser = parse_duration)]
    pub transition: Option<Duration>,

    /// Keep the directory order instead of shuffling
    #[arg(long)]
    pub no_shuffle: bool,

    /// Do not sort images by file name
    #[arg(long)]
    pub no_sort: bool,

    /// Start in a window instead of fullscreen
    #[arg(short, long)]
    pub windowed: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    pub photos_dir: PathBuf,
    #[serde(with = "humantime_serde")]
    pub rotation: Duration,
    #[serde(with = "humantime_serde")]
    pub transition: Duration,
    pub shuffle: bool,
    pub sort: bool,
    pub caption_font_size: i32,
    pub background_blur_radius: i32,
    pub extensions: Vec<String>,
    pub fullscreen: bool,
    pub fps: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photos_dir: PathBuf::from(DEFAULT_PHOTOS_DIR),
            rotation: DEFAULT_ROTATION,
            transition: DEFAULT_TRANSITION,
            shuffle: true,
            sort: true,
            caption_font_size: DEFAULT_CAPTION_FONT_SIZE,
            background_blur_radius: DEFAULT_BLUR_RADIUS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            fullscreen: true,
            fps: FPS,
        }
    }
}

impl Config {
    /// Build the effective configuration for a command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => from_yaml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };
        cfg.apply_cli(cli);
        cfg.validate().context("validating configuration")?;
        Ok(cfg)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.dir {
            self.photos_dir = dir.clone();
        }
        if let Some(rotation) = cli.rotation {
            self.rotation = rotation;
        }
        if let Some(transition) = cli.transition {
            self.transition = transition;
        }
        if cli.no_shuffle {
            self.shuffle = false;
        }
        if cli.no_sort {
            self.sort = false;
        }
        if cli.windowed {
            self.fullscreen = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.rotation.is_zero(), "rotation must be greater than zero");
        ensure!(!self.transition.is_zero(), "transition must be greater than zero");
        ensure!(self.caption_font_size > 0, "caption-font-size must be positive");
        ensure!(self.background_blur_radius >= 0, "background-blur-radius must not be negative");
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(
            self.source_options().extensions.iter().any(|e| !e.is_empty()),
            "extensions must name at least one file type"
        );
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        Timing {
            rotation: self.rotation.as_secs_f32(),
            transition: self.transition.as_secs_f32(),
        }
    }

    /// Scan options, with extensions lowercased and stripped of any dot.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            sort: self.sort,
            shuffle: self.shuffle,
        }
    }
}

pub fn from_yaml_str(yaml: &str) -> Result<Config, Error> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn from_yaml_file(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path)?;
    from_yaml_str(&text)
}

/// Plain numbers are seconds; anything else goes through humantime.
fn parse_duration(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<f64>() {
        Ok(secs) => Duration::try_from_secs_f64(secs).map_err(|e| e.to_string()),
        Err(_) => humantime::parse_duration(raw.trim()).map_err(|e| e.to_string()),
    }
}
