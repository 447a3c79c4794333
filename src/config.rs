use std::time::Duration;

use anyhow::{Context as _, anyhow};
use clap::{Parser, ValueEnum};

pub const DEFAULT_WIDTH: u16 = 1280;
pub const DEFAULT_HEIGHT: u16 = 720;
pub const DEFAULT_CYCLES: u32 = 6;
pub const DEFAULT_STEP: f32 = 0.016;
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
pub const DEFAULT_SAMPLES: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Mali fbdev native window on the default EGL display.
    Fbdev,
    /// Desktop window (Wayland or X11).
    Window,
    /// Off-screen pbuffer surface on the default EGL display.
    Pbuffer,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Where to render.
    #[arg(long, value_enum, default_value_t = Platform::Fbdev)]
    pub platform: Platform,

    /// Native window width in pixels.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u16,

    /// Native window height in pixels.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u16,

    /// Number of fade-in/fade-out cycles to render before exiting.
    #[arg(long, default_value_t = DEFAULT_CYCLES)]
    pub cycles: u32,

    /// Intensity change per frame.
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: f32,

    /// Pause after every presented frame.
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    pub frame_interval_ms: u64,

    /// Multisample count requested from EGL.
    #[arg(long, default_value_t = DEFAULT_SAMPLES)]
    pub samples: i32,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub platform: Platform,
    pub width: u16,
    pub height: u16,
    pub cycles: u32,
    pub step: f32,
    pub frame_interval: Duration,
    pub samples: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: Platform::Fbdev,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cycles: DEFAULT_CYCLES,
            step: DEFAULT_STEP,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
            samples: DEFAULT_SAMPLES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "window size must be non-zero (got {}x{})",
                self.width,
                self.height
            ));
        }
        if self.cycles == 0 {
            return Err(anyhow!("cycles must be at least 1"));
        }
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(anyhow!("step must be in (0, 1] (got {})", self.step));
        }
        if self.samples < 0 {
            return Err(anyhow!("samples must not be negative (got {})", self.samples));
        }
        Ok(())
    }
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = Self {
            platform: args.platform,
            width: args.width,
            height: args.height,
            cycles: args.cycles,
            step: args.step,
            frame_interval: Duration::from_millis(args.frame_interval_ms),
            samples: args.samples,
        };
        config.validate().context("invalid arguments")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let args = Args::try_parse_from(std::iter::once("trifade").chain(args.iter().copied()))?;
        Config::try_from(args)
    }

    #[test]
    fn defaults_match_default_config() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--platform",
            "pbuffer",
            "--width",
            "640",
            "--height",
            "480",
            "--cycles",
            "2",
            "--step",
            "0.25",
            "--frame-interval-ms",
            "0",
            "--samples",
            "0",
        ])
        .unwrap();
        assert_eq!(
            config,
            Config {
                platform: Platform::Pbuffer,
                width: 640,
                height: 480,
                cycles: 2,
                step: 0.25,
                frame_interval: Duration::ZERO,
                samples: 0,
            }
        );
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(parse(&["--cycles", "0"]).is_err());
        assert!(parse(&["--step", "0"]).is_err());
        assert!(parse(&["--step", "1.5"]).is_err());
        assert!(parse(&["--step", "NaN"]).is_err());
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--samples", "-1"]).is_err());
        assert!(parse(&["--platform", "x11"]).is_err());
    }

    #[test]
    fn verbosity() {
        let level = |args: &[&str]| {
            Args::try_parse_from(std::iter::once("trifade").chain(args.iter().copied()))
                .unwrap()
                .log_level()
        };
        assert_eq!(level(&[]), log::LevelFilter::Info);
        assert_eq!(level(&["-v"]), log::LevelFilter::Debug);
        assert_eq!(level(&["-vvv"]), log::LevelFilter::Trace);
    }
}
