//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::components::DEFAULT_NAME;
use crate::error::{Error, Result};
use crate::pipeline::RenderMode;

/// Render mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Alternate screen, differential rendering
    #[default]
    Fullscreen,
    /// Below the cursor on the normal screen
    Inline,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fullscreen => RenderMode::Fullscreen,
            ModeArg::Inline => RenderMode::Inline,
        }
    }
}

/// Greeting and counter demo on a reactive terminal UI
#[derive(Debug, Clone, Parser)]
#[command(name = "spark-hello", version, about)]
pub struct Cli {
    /// Where to draw the UI
    #[arg(short, long, value_enum, default_value_t = ModeArg::Fullscreen)]
    pub mode: ModeArg,

    /// Print one frame as plain text and exit
    #[arg(long)]
    pub once: bool,

    /// Name to greet
    #[arg(short, long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Terminal width override
    #[arg(long, requires = "height")]
    pub width: Option<u16>,

    /// Terminal height override
    #[arg(long, requires = "width")]
    pub height: Option<u16>,

    /// Write logs to this file (discarded otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: RenderMode,
    pub once: bool,
    pub name: String,
    pub size: Option<(u16, u16)>,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    /// Reject sizes that cannot hold a frame.
    pub fn validate(&self) -> Result<()> {
        match self.size {
            Some((width, height)) if width == 0 || height == 0 => Err(Error::InvalidSize { width, height }),
            _ => Ok(()),
        }
    }

    /// Level used when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            once: false,
            name: DEFAULT_NAME.to_string(),
            size: None,
            log_file: None,
            verbose: false,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            mode: cli.mode.into(),
            once: cli.once,
            name: cli.name,
            size: cli.width.zip(cli.height),
            log_file: cli.log_file,
            verbose: cli.verbose,
        }
    }
}
