//! Original Launchpad Mini
//!
//! Top row: control-change 104..=111. Grid and the right-hand column:
//! note `(row << 4) | column`, with `row` counted from the first grid row.
//! The top-right corner has no button.

use super::{AddressMapper, VariantConfig};
use crate::colour::{ColorModel, ColourDepth, RED_GREEN_PALETTE};
use crate::grid::{Address, AddressFamily, Bounds, Coordinate};

/// First control number of the top row
pub const TOP_ROW_BASE: u8 = 104;

const EXCLUDED: [Coordinate; 1] = [Coordinate::new(8, 0)];

pub static CONFIG: VariantConfig = VariantConfig {
    name: "Launchpad Mini",
    bounds: Bounds::new(8, 8),
    interior_origin: Coordinate::new(0, 1),
    excluded: &EXCLUDED,
    colours: ColorModel::new(&RED_GREEN_PALETTE, ColourDepth::RED_GREEN_3),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Mini;

impl AddressMapper for Mini {
    fn config(&self) -> &'static VariantConfig {
        &CONFIG
    }

    fn map(&self, coord: Coordinate) -> Address {
        if coord.y == 0 {
            Address::control(TOP_ROW_BASE + coord.x)
        } else {
            Address::note(((coord.y - 1) << 4) | coord.x)
        }
    }

    fn unmap(&self, address: Address) -> Option<Coordinate> {
        match address.family {
            AddressFamily::Control => {
                let x = address.number.checked_sub(TOP_ROW_BASE)?;
                (x <= 7).then_some(Coordinate::new(x, 0))
            }
            AddressFamily::Note => {
                let x = address.number & 0x0F;
                let y = 1 + (address.number >> 4);
                Some(Coordinate::new(x, y))
            }
        }
    }
}
