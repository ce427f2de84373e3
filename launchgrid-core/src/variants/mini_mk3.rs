//! Launchpad Mini MK3
//!
//! Every button uses `10 * (9 - y) + x + 1`. Numbers from 90 upward (the
//! top row and the logo LED at 99) are control-change, the rest are notes.

use super::{AddressMapper, VariantConfig};
use crate::colour::{ColorModel, ColourDepth, RGB_PALETTE};
use crate::grid::{Address, Bounds, Coordinate};

/// Numbers at or above this are control-change
pub const CONTROL_BASE: u8 = 90;

pub static CONFIG: VariantConfig = VariantConfig {
    name: "Launchpad Mini MK3",
    bounds: Bounds::new(8, 8),
    interior_origin: Coordinate::new(0, 1),
    excluded: &[],
    colours: ColorModel::new(&RGB_PALETTE, ColourDepth::RGB_63),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MiniMk3;

impl AddressMapper for MiniMk3 {
    fn config(&self) -> &'static VariantConfig {
        &CONFIG
    }

    fn map(&self, coord: Coordinate) -> Address {
        let number = 10 * (9 - coord.y) + coord.x + 1;
        if number < CONTROL_BASE {
            Address::note(number)
        } else {
            Address::control(number)
        }
    }

    // The device reports either family for the same number
    fn unmap(&self, address: Address) -> Option<Coordinate> {
        let tens = address.number / 10;
        let ones = address.number % 10;
        ((1..=9).contains(&tens) && ones >= 1).then(|| Coordinate::new(ones - 1, 9 - tens))
    }
}
