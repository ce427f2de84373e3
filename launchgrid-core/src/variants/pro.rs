//! Launchpad Pro
//!
//! A 10x10 layout whose four corners are unpopulated. Every LED is
//! addressed as note `10 * (9 - y) + x`, so the bottom-left interior pad
//! is 11 and the top row runs 91..=98.

use super::{AddressMapper, VariantConfig};
use crate::colour::{ColorModel, ColourDepth, RGB_PALETTE};
use crate::grid::{Address, Bounds, Coordinate};

const EXCLUDED: [Coordinate; 4] = [
    Coordinate::new(0, 0),
    Coordinate::new(9, 0),
    Coordinate::new(0, 9),
    Coordinate::new(9, 9),
];

pub static CONFIG: VariantConfig = VariantConfig {
    name: "Launchpad Pro",
    bounds: Bounds::new(9, 9),
    interior_origin: Coordinate::new(1, 1),
    excluded: &EXCLUDED,
    colours: ColorModel::new(&RGB_PALETTE, ColourDepth::RGB_63),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Pro;

impl AddressMapper for Pro {
    fn config(&self) -> &'static VariantConfig {
        &CONFIG
    }

    fn map(&self, coord: Coordinate) -> Address {
        Address::note(10 * (9 - coord.y) + coord.x)
    }

    // Side buttons arrive as control-change, pads as notes
    fn unmap(&self, address: Address) -> Option<Coordinate> {
        let tens = address.number / 10;
        let ones = address.number % 10;
        (tens <= 9).then(|| Coordinate::new(ones, 9 - tens))
    }
}
