//! Session configuration
//!
//! ```toml
//! variant = "mini-mk3"
//! step_delay_ms = 60
//! draw_colour = "green"
//! programmer_mode = true
//! reset_on_connect = true
//! ```

use core::fmt;

use embassy_time::Duration;
use heapless::String;

use crate::colour::ColourRequest;
use crate::variants::Variant;

/// Maximum length of the configured draw colour
pub const MAX_COLOUR_LEN: usize = 16;

pub const DEFAULT_STEP_DELAY_MS: u64 = 100;

pub const DEFAULT_DRAW_COLOUR: &str = "red";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid TOML or schema violation at a 1-based position
    Parse { line: usize, column: usize },
    /// Draw colour longer than [`MAX_COLOUR_LEN`]
    ColourTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { line, column } => {
                write!(f, "invalid configuration at line {line}, column {column}")
            }
            ConfigError::ColourTooLong => {
                write!(f, "draw colour exceeds {MAX_COLOUR_LEN} characters")
            }
        }
    }
}

/// Per-connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct GridConfig {
    /// Board to drive
    pub variant: Variant,
    /// Pause between animation steps
    #[cfg_attr(feature = "serde", serde(default = "default_step_delay_ms"))]
    pub step_delay_ms: u64,
    /// Colour for bitmap drawing: a palette name or index
    #[cfg_attr(feature = "serde", serde(default = "default_draw_colour"))]
    pub draw_colour: String<MAX_COLOUR_LEN>,
    /// Send the programmer-mode switch on connect
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub programmer_mode: bool,
    /// Turn every LED off on connect
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub reset_on_connect: bool,
}

impl GridConfig {
    /// Defaults for a board
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            step_delay_ms: default_step_delay_ms(),
            draw_colour: default_draw_colour(),
            programmer_mode: true,
            reset_on_connect: true,
        }
    }

    /// Replace the draw colour
    pub fn with_draw_colour(mut self, colour: &str) -> Result<Self, ConfigError> {
        self.draw_colour = String::try_from(colour).map_err(|_| ConfigError::ColourTooLong)?;
        Ok(self)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn draw_colour(&self) -> ColourRequest<'_> {
        ColourRequest::parse(&self.draw_colour)
    }
}

fn default_step_delay_ms() -> u64 {
    DEFAULT_STEP_DELAY_MS
}

fn default_draw_colour() -> String<MAX_COLOUR_LEN> {
    let mut colour = String::new();
    // the default fits the capacity
    let _ = colour.push_str(DEFAULT_DRAW_COLOUR);
    colour
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

/// Parse a TOML configuration
#[cfg(feature = "serde")]
pub fn parse_config(input: &str) -> Result<GridConfig, ConfigError> {
    toml::from_str(input).map_err(|err| {
        log::warn!("configuration rejected: {err}");
        let offset = err.span().map_or(0, |span| span.start);
        let (line, column) = position(input, offset);
        ConfigError::Parse { line, column }
    })
}

/// 1-based line and column of a byte offset
#[cfg(feature = "serde")]
fn position(input: &str, offset: usize) -> (usize, usize) {
    let before = input.get(..offset).unwrap_or(input);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
    (line, column)
}
