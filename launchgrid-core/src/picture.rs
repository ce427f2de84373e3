//! Packed-RGB pictures
//!
//! Text format: one grid row per line, top to bottom, each cell a decimal
//! `r << 16 | g << 8 | b` integer, cells separated by commas.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use crate::colour::Rgb;
use crate::grid::{Bounds, Coordinate};
use crate::variants::{GridProfile, Variant};

/// Largest valid packed value
pub const PACKED_MAX: u32 = 0x00FF_FFFF;

/// Picture parse failures, positions are 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PictureError {
    /// No rows at all
    Empty,
    /// A cell is not a packed RGB integer
    InvalidValue { line: usize, column: usize },
    /// A row has a different cell count than the first
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for PictureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PictureError::Empty => f.write_str("picture has no rows"),
            PictureError::InvalidValue { line, column } => {
                write!(f, "invalid packed colour at line {line}, column {column}")
            }
            PictureError::RaggedRow {
                line,
                expected,
                found,
            } => write!(f, "line {line} has {found} cells, expected {expected}"),
        }
    }
}

/// Parse one comma-separated row of packed values
///
/// On failure returns the 1-based column of the bad cell.
pub(crate) fn parse_packed_row(line: &str) -> Result<Vec<u32>, usize> {
    line.split(',')
        .enumerate()
        .map(|(i, cell)| {
            cell.trim()
                .parse::<u32>()
                .ok()
                .filter(|&value| value <= PACKED_MAX)
                .ok_or(i + 1)
        })
        .collect()
}

/// A rectangular grid of colours, one per button position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Picture {
    /// All-black picture covering `bounds`
    pub fn new(bounds: Bounds) -> Self {
        Self {
            width: bounds.width(),
            height: bounds.height(),
            pixels: alloc::vec![0; bounds.width() * bounds.height()],
        }
    }

    /// All-black picture sized for a variant's full grid
    pub fn for_variant(variant: Variant) -> Self {
        Self::new(variant.config().bounds)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        let (x, y) = (usize::from(coord.x), usize::from(coord.y));
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    pub fn get(&self, coord: Coordinate) -> Option<Rgb> {
        self.index(coord).map(|i| Rgb::unpack(self.pixels[i]))
    }

    /// Store a colour; positions outside the picture are ignored
    pub fn set(&mut self, coord: Coordinate, rgb: Rgb) {
        if let Some(i) = self.index(coord) {
            self.pixels[i] = rgb.pack();
        }
    }

    /// Every cell with its coordinate, row-major
    pub fn pixels(&self) -> impl Iterator<Item = (Coordinate, Rgb)> + '_ {
        self.pixels.iter().enumerate().map(move |(i, &packed)| {
            let coord = Coordinate::new((i % self.width) as u8, (i / self.width) as u8);
            (coord, Rgb::unpack(packed))
        })
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Render in the packed text format
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in self.pixels.chunks(self.width) {
            for (i, packed) in row.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // writing to a String cannot fail
                let _ = write!(out, "{packed}");
            }
            out.push('\n');
        }
        out
    }

    /// Parse the packed text format
    ///
    /// Blank lines are skipped. Every row must have the same cell count.
    pub fn from_csv(text: &str) -> Result<Self, PictureError> {
        let mut width = 0;
        let mut height = 0;
        let mut pixels = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = n + 1;
            let row = parse_packed_row(line).map_err(|column| PictureError::InvalidValue {
                line: line_no,
                column,
            })?;
            if height == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(PictureError::RaggedRow {
                    line: line_no,
                    expected: width,
                    found: row.len(),
                });
            }
            pixels.extend(row);
            height += 1;
        }
        if height == 0 {
            return Err(PictureError::Empty);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}
