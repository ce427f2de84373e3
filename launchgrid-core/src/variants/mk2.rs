//! Launchpad MK2
//!
//! Top row: control-change 104..=111. Everything below: note
//! `10 * (9 - y) + x + 1`, so the bottom-left pad is 11 and the top of
//! the right-hand column is 89.

use super::{AddressMapper, VariantConfig};
use crate::colour::{ColorModel, ColourDepth, RGB_PALETTE};
use crate::grid::{Address, AddressFamily, Bounds, Coordinate};

/// First control number of the top row
pub const TOP_ROW_BASE: u8 = 104;

const EXCLUDED: [Coordinate; 1] = [Coordinate::new(8, 0)];

pub static CONFIG: VariantConfig = VariantConfig {
    name: "Launchpad MK2",
    bounds: Bounds::new(8, 8),
    interior_origin: Coordinate::new(0, 1),
    excluded: &EXCLUDED,
    colours: ColorModel::new(&RGB_PALETTE, ColourDepth::RGB_63),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Mk2;

impl AddressMapper for Mk2 {
    fn config(&self) -> &'static VariantConfig {
        &CONFIG
    }

    fn map(&self, coord: Coordinate) -> Address {
        if coord.y == 0 {
            Address::control(TOP_ROW_BASE + coord.x)
        } else {
            Address::note(10 * (9 - coord.y) + coord.x + 1)
        }
    }

    fn unmap(&self, address: Address) -> Option<Coordinate> {
        match address.family {
            AddressFamily::Control => {
                let x = address.number.checked_sub(TOP_ROW_BASE)?;
                (x <= 7).then_some(Coordinate::new(x, 0))
            }
            AddressFamily::Note => {
                let tens = address.number / 10;
                let ones = address.number % 10;
                ((1..=8).contains(&tens) && ones >= 1)
                    .then(|| Coordinate::new(ones - 1, 9 - tens))
            }
        }
    }
}
