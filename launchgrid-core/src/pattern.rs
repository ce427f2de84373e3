//! Animation pattern files
//!
//! A pattern is a run of 8-row blocks. Each row holds eight packed RGB
//! values in the picture format; every block is one frame.

use alloc::vec::Vec;
use core::fmt;

use crate::colour::Rgb;
use crate::frame::FRAME_SIZE;
use crate::picture::parse_packed_row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternError {
    /// A cell is not a packed RGB integer
    InvalidValue { line: usize, column: usize },
    /// A row does not hold exactly eight cells
    RowLength { line: usize, found: usize },
    /// The file ended part way through a frame
    IncompleteFrame { rows: usize },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::InvalidValue { line, column } => {
                write!(f, "invalid packed colour at line {line}, column {column}")
            }
            PatternError::RowLength { line, found } => {
                write!(f, "line {line} has {found} cells, expected {FRAME_SIZE}")
            }
            PatternError::IncompleteFrame { rows } => {
                write!(f, "last frame has {rows} of {FRAME_SIZE} rows")
            }
        }
    }
}

/// One 8x8 frame of colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternFrame {
    rows: [[Rgb; FRAME_SIZE]; FRAME_SIZE],
}

impl PatternFrame {
    pub const fn new(rows: [[Rgb; FRAME_SIZE]; FRAME_SIZE]) -> Self {
        Self { rows }
    }

    pub fn get(&self, x: u8, y: u8) -> Option<Rgb> {
        self.rows.get(usize::from(y))?.get(usize::from(x)).copied()
    }

    /// Every cell as `(x, y, colour)`, row-major
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, Rgb)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &rgb)| (x as u8, y as u8, rgb))
        })
    }
}

/// Parse a whole pattern file
pub fn parse_pattern(text: &str) -> Result<Vec<PatternFrame>, PatternError> {
    let mut frames = Vec::new();
    let mut current = PatternFrame::default();
    let mut filled = 0;

    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = n + 1;
        let row = parse_packed_row(line).map_err(|column| PatternError::InvalidValue {
            line: line_no,
            column,
        })?;
        if row.len() != FRAME_SIZE {
            return Err(PatternError::RowLength {
                line: line_no,
                found: row.len(),
            });
        }
        for (cell, packed) in current.rows[filled].iter_mut().zip(row) {
            *cell = Rgb::unpack(packed);
        }
        filled += 1;
        if filled == FRAME_SIZE {
            frames.push(current);
            current = PatternFrame::default();
            filled = 0;
        }
    }

    if filled != 0 {
        return Err(PatternError::IncompleteFrame { rows: filled });
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(value: u32) -> String {
        let row = vec![value.to_string(); 8].join(",");
        (0..8).map(|_| format!("{row}\n")).collect()
    }

    #[test]
    fn test_two_frames_with_blank_lines() {
        let text = format!("{}\n\n{}", block(0x010203), block(0));
        let frames = parse_pattern(&text).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].get(7, 7), Some(Rgb::new(1, 2, 3)));
        assert!(frames[1].cells().all(|(_, _, rgb)| rgb.is_black()));
    }

    #[test]
    fn test_incomplete_frame() {
        let mut text = block(1);
        text.push_str("1,1,1,1,1,1,1,1\n");
        assert_eq!(
            parse_pattern(&text),
            Err(PatternError::IncompleteFrame { rows: 1 })
        );
    }

    #[test]
    fn test_bad_rows() {
        assert_eq!(
            parse_pattern("1,2,3\n"),
            Err(PatternError::RowLength { line: 1, found: 3 })
        );
        assert_eq!(
            parse_pattern("\n1,2,3,4,5,6,7,red\n"),
            Err(PatternError::InvalidValue { line: 2, column: 8 })
        );
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(parse_pattern(""), Ok(Vec::new()));
    }
}
