//! Glyph bitmaps and glyph sources
//!
//! Glyph tables themselves (fonts, sprites) are supplied from outside;
//! this module only defines their shape.

use alloc::collections::BTreeMap;

use crate::frame::{column_mask, Frame, FrameRow, FRAME_SIZE};

/// An immutable 8-row bitmap with a column width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    frame: Frame,
    width: u8,
}

impl Glyph {
    pub const BLANK: Self = Self {
        frame: Frame::BLANK,
        width: FRAME_SIZE as u8,
    };

    /// Full-width glyph from exactly eight rows
    ///
    /// # Panics
    ///
    /// If `rows` does not hold exactly eight entries.
    pub fn from_slice(rows: &[FrameRow]) -> Self {
        Self::with_width(rows, FRAME_SIZE as u8)
    }

    /// Glyph of `width` columns; bits right of the width are dropped
    ///
    /// # Panics
    ///
    /// If `rows` does not hold exactly eight entries, or `width` is not
    /// in 1..=8.
    pub fn with_width(rows: &[FrameRow], width: u8) -> Self {
        assert!(
            rows.len() == FRAME_SIZE,
            "malformed glyph: {} rows instead of {FRAME_SIZE}",
            rows.len()
        );
        assert!(
            (1..=FRAME_SIZE as u8).contains(&width),
            "malformed glyph: width {width}"
        );
        let keep = width_mask(width);
        let mut frame = [0; FRAME_SIZE];
        for (dst, src) in frame.iter_mut().zip(rows) {
            *dst = src & keep;
        }
        Self {
            frame: Frame::new(frame),
            width,
        }
    }

    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    pub const fn rows(&self) -> &[FrameRow; FRAME_SIZE] {
        self.frame.rows()
    }

    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Rotate a quarter turn clockwise
    ///
    /// The result is always full width.
    pub fn rotate_cw(&self) -> Self {
        let mut out = Frame::BLANK;
        for (x, y, lit) in self.frame.pixels() {
            if lit {
                out.set(FRAME_SIZE as u8 - 1 - y, x, true);
            }
        }
        Self {
            frame: out,
            width: FRAME_SIZE as u8,
        }
    }

    /// Rotate clockwise by `turns` quarter turns
    pub fn rotate(&self, turns: u8) -> Self {
        (0..turns % 4).fold(*self, |glyph, _| glyph.rotate_cw())
    }
}

impl From<Frame> for Glyph {
    fn from(frame: Frame) -> Self {
        Self {
            frame,
            width: FRAME_SIZE as u8,
        }
    }
}

/// Bits belonging to the leftmost `width` columns
fn width_mask(width: u8) -> FrameRow {
    (0..width).fold(0, |mask, x| mask | column_mask(x))
}

/// Lookup from symbol id to eight row bytes
pub trait GlyphSource {
    /// Raw rows for a symbol, most-significant bit = leftmost column
    fn rows(&self, id: char) -> Option<&[FrameRow]>;

    /// Glyph for a symbol
    ///
    /// # Panics
    ///
    /// If the source returns anything other than eight rows.
    fn glyph(&self, id: char) -> Option<Glyph> {
        self.rows(id).map(Glyph::from_slice)
    }
}

/// An owned in-memory glyph source
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a full-width glyph
    ///
    /// # Panics
    ///
    /// If `rows` does not hold exactly eight entries.
    pub fn insert(&mut self, id: char, rows: &[FrameRow]) {
        self.glyphs.insert(id, Glyph::from_slice(rows));
    }

    pub fn insert_glyph(&mut self, id: char, glyph: Glyph) {
        self.glyphs.insert(id, glyph);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for GlyphTable {
    fn rows(&self, id: char) -> Option<&[FrameRow]> {
        self.glyphs.get(&id).map(|glyph| &glyph.rows()[..])
    }

    fn glyph(&self, id: char) -> Option<Glyph> {
        self.glyphs.get(&id).copied()
    }
}

impl FromIterator<(char, Glyph)> for GlyphTable {
    fn from_iter<I: IntoIterator<Item = (char, Glyph)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().collect(),
        }
    }
}
