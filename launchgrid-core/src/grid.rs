//! Grid coordinates and protocol addresses
//!
//! (0, 0) is the top-left button: the first button of the top control row.
//! X grows to the right, Y grows downwards.

use core::fmt;

pub use launchgrid_protocol::AddressFamily;

/// A button position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate, returning None on underflow/overflow
    pub fn offset(self, dx: i16, dy: i16) -> Option<Self> {
        let x = i16::from(self.x) + dx;
        let y = i16::from(self.y) + dy;
        Some(Self {
            x: u8::try_from(x).ok()?,
            y: u8::try_from(y).ok()?,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive grid bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub max_x: u8,
    pub max_y: u8,
}

impl Bounds {
    pub const fn new(max_x: u8, max_y: u8) -> Self {
        Self { max_x, max_y }
    }

    /// Check if a coordinate lies inside the bounds
    pub const fn contains(&self, coord: Coordinate) -> bool {
        coord.x <= self.max_x && coord.y <= self.max_y
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.max_x as usize + 1
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.max_y as usize + 1
    }

    /// All coordinates inside the bounds, row-major from the top
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> {
        let max_x = self.max_x;
        (0..=self.max_y).flat_map(move |y| (0..=max_x).map(move |x| Coordinate::new(x, y)))
    }
}

/// A protocol address: message family plus number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address {
    pub family: AddressFamily,
    pub number: u8,
}

impl Address {
    pub const fn note(number: u8) -> Self {
        Self {
            family: AddressFamily::Note,
            number,
        }
    }

    pub const fn control(number: u8) -> Self {
        Self {
            family: AddressFamily::Control,
            number,
        }
    }
}

/// Why a coordinate has no address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Outside the variant's grid bounds
    OutOfRange,
    /// Inside the bounds, but no button is fitted there
    NoPhysicalButton,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::OutOfRange => f.write_str("coordinate out of range"),
            AddressError::NoPhysicalButton => f.write_str("no physical button at coordinate"),
        }
    }
}

/// An address that does not belong to any button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownAddress(pub Address);

impl fmt::Display for UnknownAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown address {:?} {}", self.0.family, self.0.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(8, 8);
        assert!(bounds.contains(Coordinate::new(0, 0)));
        assert!(bounds.contains(Coordinate::new(8, 8)));
        assert!(!bounds.contains(Coordinate::new(9, 0)));
        assert!(!bounds.contains(Coordinate::new(0, 9)));
    }

    #[test]
    fn test_bounds_iter_row_major() {
        let bounds = Bounds::new(1, 1);
        let all: std::vec::Vec<_> = bounds.iter().collect();
        assert_eq!(
            all,
            [
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 1)
            ]
        );
        assert_eq!(Bounds::new(9, 9).iter().count(), 100);
    }

    #[test]
    fn test_offset() {
        let c = Coordinate::new(2, 3);
        assert_eq!(c.offset(1, -1), Some(Coordinate::new(3, 2)));
        assert_eq!(c.offset(-3, 0), None);
    }
}
