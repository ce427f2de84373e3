//! 8x8 bitmaps
//!
//! A row is one byte; column `c` is bit `7 - c`, so `0b1000_0000` lights
//! the leftmost pad. Shifts that push bits past either edge drop them.

use core::fmt;

/// Rows and columns in a frame
pub const FRAME_SIZE: usize = 8;

/// One 8-bit row bitmap
pub type FrameRow = u8;

/// The bit for column `x` within a row
pub const fn column_mask(x: u8) -> FrameRow {
    0x80 >> x
}

/// Eight rows of on/off pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    rows: [FrameRow; FRAME_SIZE],
}

impl Frame {
    pub const BLANK: Self = Self::new([0; FRAME_SIZE]);

    pub const fn new(rows: [FrameRow; FRAME_SIZE]) -> Self {
        Self { rows }
    }

    pub const fn rows(&self) -> &[FrameRow; FRAME_SIZE] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [FrameRow; FRAME_SIZE] {
        &mut self.rows
    }

    /// Check if the pixel at (x, y) is lit
    ///
    /// Anything outside 8x8 reads as unlit.
    pub fn is_lit(&self, x: u8, y: u8) -> bool {
        usize::from(x) < FRAME_SIZE
            && self
                .rows
                .get(usize::from(y))
                .is_some_and(|row| row & column_mask(x) != 0)
    }

    /// Set or clear one pixel; out-of-frame positions are ignored
    pub fn set(&mut self, x: u8, y: u8, lit: bool) {
        if usize::from(x) >= FRAME_SIZE {
            return;
        }
        if let Some(row) = self.rows.get_mut(usize::from(y)) {
            if lit {
                *row |= column_mask(x);
            } else {
                *row &= !column_mask(x);
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    pub fn clear(&mut self) {
        self.rows = [0; FRAME_SIZE];
    }

    /// Every pixel as `(x, y, lit)`, row-major
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, bool)> + '_ {
        (0..FRAME_SIZE as u8)
            .flat_map(move |y| (0..FRAME_SIZE as u8).map(move |x| (x, y, self.is_lit(x, y))))
    }

    /// Move the whole image sideways; positive offsets move it right
    pub fn shifted(&self, offset: i8) -> Self {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            *row = shift_row(*row, offset);
        }
        Self { rows }
    }
}

impl From<[FrameRow; FRAME_SIZE]> for Frame {
    fn from(rows: [FrameRow; FRAME_SIZE]) -> Self {
        Self::new(rows)
    }
}

/// Shift a row toward the right edge (positive) or left edge (negative)
pub fn shift_row(row: FrameRow, offset: i8) -> FrameRow {
    let amount = u32::from(offset.unsigned_abs());
    if offset >= 0 {
        row.checked_shr(amount).unwrap_or(0)
    } else {
        row.checked_shl(amount).unwrap_or(0)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row:08b}")?;
        }
        Ok(())
    }
}
