//! Hardware variants
//!
//! The supported boards form a closed set. Each board module provides its
//! address mapping and static configuration; [`Variant`] ties them together
//! with the colour model and the message encoder behind [`GridProfile`].
//!
//! ```text
//!        Coordinate / ColourRequest
//!                    │
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │ Variant (GridProfile)            │
//!   │  ├─ AddressMapper  (per board)   │
//!   │  ├─ ColorModel     (per board)   │
//!   │  └─ MessageEncoder (framing)     │
//!   └──────────────────────────────────┘
//!                    │
//!                    ▼
//!              wire messages
//! ```

pub mod mini;
pub mod mini_mk3;
pub mod mk2;
pub mod pro;

use crate::colour::{ColorModel, Colour, ColourRequest};
use crate::encoder::{EncodeResult, MessageEncoder, Messages};
use crate::grid::{Address, AddressError, Bounds, Coordinate, UnknownAddress};
use launchgrid_protocol::Message;

pub use mini::Mini;
pub use mini_mk3::MiniMk3;
pub use mk2::Mk2;
pub use pro::Pro;

/// Immutable per-board description
#[derive(Debug)]
pub struct VariantConfig {
    /// Human-readable board name
    pub name: &'static str,
    /// Inclusive coordinate bounds (auxiliary rows included)
    pub bounds: Bounds,
    /// Top-left pad of the 8x8 interior grid
    pub interior_origin: Coordinate,
    /// Positions inside the bounds with no button fitted
    pub excluded: &'static [Coordinate],
    /// Palette and channel depth
    pub colours: ColorModel,
}

impl VariantConfig {
    /// Check if a button exists at the coordinate
    pub fn is_physical(&self, coord: Coordinate) -> bool {
        self.bounds.contains(coord) && !self.excluded.contains(&coord)
    }

    /// All physically fitted buttons, row-major from the top
    pub fn buttons(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.bounds.iter().filter(move |&c| self.is_physical(c))
    }
}

/// Coordinate to address bijection for one board
///
/// Implementors supply the raw formulas; the provided methods apply bounds
/// and exclusion checks so formulas never see invalid input.
pub trait AddressMapper {
    /// Static description of the board
    fn config(&self) -> &'static VariantConfig;

    /// Raw mapping, only called for physical coordinates
    fn map(&self, coord: Coordinate) -> Address;

    /// Raw inverse mapping
    ///
    /// May return coordinates of excluded buttons; those are filtered
    /// by [`AddressMapper::from_address`].
    fn unmap(&self, address: Address) -> Option<Coordinate>;

    /// Map a coordinate to its protocol address
    fn to_address(&self, coord: Coordinate) -> Result<Address, AddressError> {
        let config = self.config();
        if !config.bounds.contains(coord) {
            return Err(AddressError::OutOfRange);
        }
        if config.excluded.contains(&coord) {
            return Err(AddressError::NoPhysicalButton);
        }
        Ok(self.map(coord))
    }

    /// Map a protocol address back to its coordinate
    fn from_address(&self, address: Address) -> Result<Coordinate, UnknownAddress> {
        self.unmap(address)
            .filter(|&coord| self.config().is_physical(coord))
            .ok_or(UnknownAddress(address))
    }
}

/// The capability set every board offers
pub trait GridProfile {
    /// Static description of the board
    fn config(&self) -> &'static VariantConfig;

    /// Map a coordinate to its protocol address
    fn to_address(&self, coord: Coordinate) -> Result<Address, AddressError>;

    /// Map a protocol address back to its coordinate
    fn from_address(&self, address: Address) -> Result<Coordinate, UnknownAddress>;

    /// Resolve a colour request through the board's palette and depth
    fn resolve_colour(&self, request: ColourRequest<'_>) -> Colour;

    /// Encode a single-LED update
    fn encode_set(&self, address: Address, colour: Colour) -> EncodeResult<Message>;

    /// Encode a turn-everything-off
    fn encode_reset(&self) -> EncodeResult<Messages>;
}

/// Supported boards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Variant {
    /// Original Launchpad Mini (red/green LEDs)
    Mini,
    /// Launchpad MK2 (RGB)
    Mk2,
    /// Launchpad Mini MK3 (RGB)
    MiniMk3,
    /// Launchpad Pro (RGB, 10x10 with corner gaps)
    Pro,
}

impl Variant {
    pub const ALL: [Variant; 4] = [Variant::Mini, Variant::Mk2, Variant::MiniMk3, Variant::Pro];

    /// Pick the variant from a transport port name
    ///
    /// Port discovery belongs to the transport; this only interprets the
    /// name it reports. Checks run most-specific first because "Mini"
    /// appears in both Mini names.
    pub fn from_port_name(name: &str) -> Option<Self> {
        if name.contains("MiniMK3") || name.contains("Launchpad MK3") {
            Some(Variant::MiniMk3)
        } else if name.contains("Launchpad Pro") {
            Some(Variant::Pro)
        } else if name.contains("MK2") {
            Some(Variant::Mk2)
        } else if name.contains("Launchpad Mini") {
            Some(Variant::Mini)
        } else {
            None
        }
    }

    fn mapper(&self) -> &'static dyn AddressMapper {
        match self {
            Variant::Mini => &Mini,
            Variant::Mk2 => &Mk2,
            Variant::MiniMk3 => &MiniMk3,
            Variant::Pro => &Pro,
        }
    }

    /// Framing for this board
    pub const fn encoder(&self) -> MessageEncoder {
        MessageEncoder::new(*self)
    }

    /// Colour model for this board
    pub fn colours(&self) -> &'static ColorModel {
        &self.config().colours
    }

    /// Encode a whole-grid fill
    pub fn encode_fill(&self, colour: Colour) -> EncodeResult<Messages> {
        self.encoder().fill(colour)
    }

    /// Encode the switch into programmer (raw addressing) mode, if the
    /// board needs one
    pub fn encode_programmer_mode(&self) -> Option<Message> {
        self.encoder().programmer_mode()
    }
}

impl GridProfile for Variant {
    fn config(&self) -> &'static VariantConfig {
        self.mapper().config()
    }

    fn to_address(&self, coord: Coordinate) -> Result<Address, AddressError> {
        self.mapper().to_address(coord)
    }

    fn from_address(&self, address: Address) -> Result<Coordinate, UnknownAddress> {
        self.mapper().from_address(address)
    }

    fn resolve_colour(&self, request: ColourRequest<'_>) -> Colour {
        self.colours().resolve(request)
    }

    fn encode_set(&self, address: Address, colour: Colour) -> EncodeResult<Message> {
        self.encoder().set(address, colour)
    }

    fn encode_reset(&self) -> EncodeResult<Messages> {
        self.encoder().reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_port_name() {
        assert_eq!(
            Variant::from_port_name("Launchpad Mini MK3 LPMiniMK3 MIDI"),
            Some(Variant::MiniMk3)
        );
        assert_eq!(
            Variant::from_port_name("LPMiniMK3 MIDI 1"),
            Some(Variant::MiniMk3)
        );
        assert_eq!(Variant::from_port_name("Launchpad MK2 0"), Some(Variant::Mk2));
        assert_eq!(Variant::from_port_name("Launchpad Pro 1"), Some(Variant::Pro));
        assert_eq!(Variant::from_port_name("Launchpad Mini 0"), Some(Variant::Mini));
        assert_eq!(Variant::from_port_name("Midi Through"), None);
    }

    #[test]
    fn test_button_counts() {
        assert_eq!(Variant::Mini.config().buttons().count(), 80);
        assert_eq!(Variant::Mk2.config().buttons().count(), 80);
        assert_eq!(Variant::MiniMk3.config().buttons().count(), 81);
        assert_eq!(Variant::Pro.config().buttons().count(), 96);
    }

    #[test]
    fn test_addresses_are_unique() {
        for variant in Variant::ALL {
            let mut seen = std::collections::HashSet::new();
            for coord in variant.config().buttons() {
                let address = variant.to_address(coord).unwrap();
                assert!(seen.insert(address), "{variant:?} reuses {address:?}");
            }
        }
    }

    #[test]
    fn test_out_of_range_and_gaps_differ() {
        assert_eq!(
            Variant::Mk2.to_address(Coordinate::new(9, 1)),
            Err(AddressError::OutOfRange)
        );
        assert_eq!(
            Variant::Pro.to_address(Coordinate::new(9, 9)),
            Err(AddressError::NoPhysicalButton)
        );
        assert_eq!(
            Variant::Pro.to_address(Coordinate::new(10, 9)),
            Err(AddressError::OutOfRange)
        );
    }

    fn any_variant() -> impl Strategy<Value = Variant> {
        prop::sample::select(Variant::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_address_roundtrip(variant in any_variant(), x in 0u8..=9, y in 0u8..=9) {
            let coord = Coordinate::new(x, y);
            if variant.config().is_physical(coord) {
                let address = variant.to_address(coord).unwrap();
                prop_assert_eq!(variant.from_address(address), Ok(coord));
            }
        }

        #[test]
        fn test_outside_bounds_is_out_of_range(variant in any_variant(), x in 0u8..=255, y in 0u8..=255) {
            let coord = Coordinate::new(x, y);
            if !variant.config().bounds.contains(coord) {
                prop_assert_eq!(variant.to_address(coord), Err(AddressError::OutOfRange));
            }
        }
    }
}
