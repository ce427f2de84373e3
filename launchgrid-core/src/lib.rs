//! Launchpad grid core
//!
//! Drives Launchpad-style LED button grids over an abstract message link.
//! Callers work in grid coordinates and colour requests; the active
//! [`Variant`] translates them into each board's address space and
//! framing.
//!
//! ```text
//!  caller ──▶ GridSession ──▶ Variant ──▶ MessageEncoder ──▶ Transport
//!               │  ▲            (AddressMapper, ColorModel)       │
//!               │  └──── ButtonEvents ◀── decode ◀── handler ◀────┘
//!               ▼
//!         Scroller / Flythrough / VerticalScroll
//! ```
//!
//! This crate is `no_std` with `alloc`. The default `std` feature wires up
//! the host time driver and critical-section implementation.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod colour;
pub mod config;
pub mod encoder;
pub mod frame;
pub mod glyph;
pub mod grid;
pub mod input;
pub mod loopback;
pub mod painter;
pub mod pattern;
pub mod picture;
pub mod scroll;
pub mod session;
pub mod traits;
pub mod variants;

pub use colour::{
    ColorModel, Colour, ColourDepth, ColourRequest, Palette, PaletteIndex, Rgb, FALLBACK_COLOUR,
};
#[cfg(feature = "serde")]
pub use config::parse_config;
pub use config::{ConfigError, GridConfig};
pub use encoder::{MessageEncoder, Messages};
pub use frame::{Frame, FrameRow, FRAME_SIZE};
pub use glyph::{Glyph, GlyphSource, GlyphTable};
pub use grid::{Address, AddressError, AddressFamily, Bounds, Coordinate, UnknownAddress};
pub use input::{decode, ButtonEvent, ButtonEvents, Ignored, EVENT_QUEUE_DEPTH};
pub use loopback::{LoopbackError, LoopbackTransport};
pub use painter::{Painter, Stroke};
pub use pattern::{parse_pattern, PatternError, PatternFrame};
pub use picture::{Picture, PictureError};
pub use scroll::{Direction, Flythrough, HorizontalEntry, Scroller, VerticalEntry, VerticalScroll};
pub use session::GridSession;
pub use traits::{BlockingPacer, InboundHandler, NoDelay, Pacer, Transport};
pub use variants::{AddressMapper, GridProfile, Variant, VariantConfig};
