//! Message encoding
//!
//! All per-board framing lives here. Callers hand over an already mapped
//! [`Address`] and a resolved [`Colour`]; this module decides which bytes
//! the board needs to show it.

use alloc::vec::Vec;

use launchgrid_protocol::{Message, MessageError, SysexBuilder, STATUS_CONTROL_CHANGE};

use crate::colour::{Colour, PaletteIndex, Rgb};
use crate::grid::Address;
use crate::variants::{GridProfile, Variant};

/// Messages produced by one bulk operation, in send order
pub type Messages = Vec<Message>;

pub type EncodeResult<T> = Result<T, MessageError>;

/// SysEx device bytes
pub mod device {
    pub const MK2: u8 = 0x18;
    pub const MINI_MK3: u8 = 0x0D;
    pub const PRO: u8 = 0x10;
}

/// SysEx command bytes
pub mod command {
    /// MK2 / Pro: set LEDs by RGB, `(led, r, g, b)` per entry
    pub const LED_RGB: u8 = 0x0B;
    /// MK2 / Pro: set every LED to one palette entry
    pub const ALL_PALETTE: u8 = 0x0E;
    /// Pro: set the whole 10x10 frame by RGB
    pub const GRID_RGB: u8 = 0x0F;
    /// MK2: select layout
    pub const LAYOUT: u8 = 0x22;
    /// Mini MK3: LED lighting with a per-entry colour spec
    pub const LIGHTING: u8 = 0x03;
    /// Mini MK3: select programmer or live mode
    pub const MODE: u8 = 0x0E;
}

/// Mini MK3 lighting colour specs
mod lighting {
    pub const STATIC: u8 = 0x00;
    pub const RGB: u8 = 0x03;
}

/// MK2 accepts at most this many LEDs per RGB message
pub const MK2_LEDS_PER_MESSAGE: usize = 80;

/// The Pro grid-RGB frame always carries the full 10x10 layout
pub const PRO_FRAME_LEDS: usize = 100;

/// Mini rapid-update fills two LEDs per message
pub const MINI_RAPID_UPDATES: usize = 40;

const MINI_RAPID_STATUS: u8 = 0x92;

/// Encodes colour updates for one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageEncoder {
    variant: Variant,
}

impl MessageEncoder {
    pub const fn new(variant: Variant) -> Self {
        Self { variant }
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Encode a single-LED update
    ///
    /// RGB values are clamped to the board's depth first, so a colour
    /// resolved for another board still encodes to valid data bytes.
    pub fn set(&self, address: Address, colour: Colour) -> EncodeResult<Message> {
        match self.variant.colours().clamp(colour) {
            Colour::Palette(index) => Ok(Message::family(address.family, address.number, index.value())),
            Colour::Rgb(rgb) => self.set_rgb(address, rgb),
        }
    }

    fn set_rgb(&self, address: Address, rgb: Rgb) -> EncodeResult<Message> {
        match self.variant {
            Variant::Mini => Ok(Message::family(
                address.family,
                address.number,
                mini_code(rgb),
            )),
            Variant::Mk2 => led_rgb(device::MK2, address, rgb),
            Variant::Pro => led_rgb(device::PRO, address, rgb),
            Variant::MiniMk3 => {
                let mut frame = SysexBuilder::novation(device::MINI_MK3, command::LIGHTING);
                frame.extend_from_slice(&[
                    lighting::RGB,
                    address.number,
                    rgb.red,
                    rgb.green,
                    rgb.blue,
                ])?;
                Ok(frame.finish())
            }
        }
    }

    /// Encode a whole-grid fill
    pub fn fill(&self, colour: Colour) -> EncodeResult<Messages> {
        match (self.variant, self.variant.colours().clamp(colour)) {
            (Variant::Mini, Colour::Palette(index)) => Ok(mini_rapid_fill(index.value())),
            (Variant::Mini, Colour::Rgb(rgb)) => Ok(mini_rapid_fill(mini_code(rgb))),
            (Variant::Mk2, Colour::Palette(index)) => {
                Ok(alloc::vec![all_palette(device::MK2, index)?])
            }
            (Variant::Pro, Colour::Palette(index)) => {
                Ok(alloc::vec![all_palette(device::PRO, index)?])
            }
            (Variant::Mk2, Colour::Rgb(rgb)) => self.mk2_rgb_fill(rgb),
            (Variant::Pro, Colour::Rgb(rgb)) => {
                let mut frame = SysexBuilder::novation(device::PRO, command::GRID_RGB);
                frame.push(0)?;
                for _ in 0..PRO_FRAME_LEDS {
                    frame.extend_from_slice(&[rgb.red, rgb.green, rgb.blue])?;
                }
                Ok(alloc::vec![frame.finish()])
            }
            (Variant::MiniMk3, Colour::Palette(index)) => {
                let mut frame = SysexBuilder::novation(device::MINI_MK3, command::LIGHTING);
                for address in self.addresses() {
                    frame.extend_from_slice(&[lighting::STATIC, address.number, index.value()])?;
                }
                Ok(alloc::vec![frame.finish()])
            }
            (Variant::MiniMk3, Colour::Rgb(rgb)) => {
                let mut frame = SysexBuilder::novation(device::MINI_MK3, command::LIGHTING);
                for address in self.addresses() {
                    frame.extend_from_slice(&[
                        lighting::RGB,
                        address.number,
                        rgb.red,
                        rgb.green,
                        rgb.blue,
                    ])?;
                }
                Ok(alloc::vec![frame.finish()])
            }
        }
    }

    /// Encode turning every LED off
    pub fn reset(&self) -> EncodeResult<Messages> {
        match self.variant {
            Variant::Mini => Ok(alloc::vec![Message::simple(STATUS_CONTROL_CHANGE, 0, 0)]),
            Variant::Mk2 => Ok(alloc::vec![all_palette(device::MK2, PaletteIndex::OFF)?]),
            Variant::Pro => Ok(alloc::vec![all_palette(device::PRO, PaletteIndex::OFF)?]),
            // no all-off command on this board
            Variant::MiniMk3 => self.fill(Colour::Rgb(Rgb::BLACK)),
        }
    }

    /// Encode the switch into programmer mode
    ///
    /// Returns `None` for boards that accept raw addressing at power-up.
    pub fn programmer_mode(&self) -> Option<Message> {
        let (device, command, value) = match self.variant {
            Variant::Mk2 => (device::MK2, command::LAYOUT, 0x00),
            Variant::MiniMk3 => (device::MINI_MK3, command::MODE, 0x01),
            Variant::Mini | Variant::Pro => return None,
        };
        let mut frame = SysexBuilder::novation(device, command);
        frame.push(value).ok()?;
        Some(frame.finish())
    }

    fn mk2_rgb_fill(&self, rgb: Rgb) -> EncodeResult<Messages> {
        let addresses: Vec<Address> = self.addresses().collect();
        let mut messages = Vec::new();
        for chunk in addresses.chunks(MK2_LEDS_PER_MESSAGE) {
            let mut frame = SysexBuilder::novation(device::MK2, command::LED_RGB);
            for address in chunk {
                frame.extend_from_slice(&[address.number, rgb.red, rgb.green, rgb.blue])?;
            }
            messages.push(frame.finish());
        }
        Ok(messages)
    }

    fn addresses(&self) -> impl Iterator<Item = Address> {
        let variant = self.variant;
        variant
            .config()
            .buttons()
            .filter_map(move |coord| variant.to_address(coord).ok())
    }
}

/// MK2 / Pro single-LED RGB update
fn led_rgb(device: u8, address: Address, rgb: Rgb) -> EncodeResult<Message> {
    let mut frame = SysexBuilder::novation(device, command::LED_RGB);
    frame.extend_from_slice(&[address.number, rgb.red, rgb.green, rgb.blue])?;
    Ok(frame.finish())
}

fn all_palette(device: u8, index: PaletteIndex) -> EncodeResult<Message> {
    let mut frame = SysexBuilder::novation(device, command::ALL_PALETTE);
    frame.push(index.value())?;
    Ok(frame.finish())
}

/// Red/green code for the original Mini: red in the low bits, green
/// from bit 4
fn mini_code(rgb: Rgb) -> u8 {
    (rgb.red & 0x03) | ((rgb.green & 0x03) << 4)
}

fn mini_rapid_fill(code: u8) -> Messages {
    // Layout select rewinds the rapid-update cursor to the first LED
    let mut messages = alloc::vec![Message::simple(STATUS_CONTROL_CHANGE, 0x00, 0x01)];
    messages.extend((0..MINI_RAPID_UPDATES).map(|_| Message::simple(MINI_RAPID_STATUS, code, code)));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use proptest::prelude::*;

    #[test]
    fn test_simple_palette_set() {
        let enc = Variant::Mk2.encoder();
        let msg = enc
            .set(Address::note(81), Colour::Palette(PaletteIndex::new(5)))
            .unwrap();
        assert_eq!(msg.as_bytes(), &[0x90, 81, 5]);

        let msg = enc
            .set(Address::control(104), Colour::Palette(PaletteIndex::new(5)))
            .unwrap();
        assert_eq!(msg.as_bytes(), &[0xB0, 104, 5]);
    }

    #[test]
    fn test_mk2_rgb_set() {
        let msg = Variant::Mk2
            .encoder()
            .set(Address::note(11), Colour::Rgb(Rgb::new(63, 10, 0)))
            .unwrap();
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x18, 0x0B, 11, 63, 10, 0, 0xF7]
        );
    }

    #[test]
    fn test_mini_mk3_rgb_set() {
        let msg = Variant::MiniMk3
            .encoder()
            .set(Address::note(11), Colour::Rgb(Rgb::new(1, 2, 3)))
            .unwrap();
        assert_eq!(
            msg.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x03, 0x03, 11, 1, 2, 3, 0xF7]
        );
    }

    #[test]
    fn test_mini_rgb_degrades_to_code() {
        let msg = Variant::Mini
            .encoder()
            .set(Address::note(0), Colour::Rgb(Rgb::new(63, 2, 63)))
            .unwrap();
        assert_eq!(msg.as_bytes(), &[0x90, 0, 0x23]);
    }

    #[test]
    fn test_rgb_from_other_board_is_clamped() {
        // 63 is valid on the MK2 but not in the Mini's 2-bit depth
        let colour = Variant::Mk2.colours().resolve(crate::ColourRequest::Rgb(63, 63, 63));
        let msg = Variant::Mini.encoder().set(Address::note(0), colour).unwrap();
        assert_eq!(msg.as_bytes(), &[0x90, 0, 0x33]);
    }

    #[test]
    fn test_mini_fill_and_reset() {
        let enc = Variant::Mini.encoder();
        let fill = enc.fill(Colour::Palette(PaletteIndex::new(3))).unwrap();
        assert_eq!(fill.len(), 41);
        assert_eq!(fill[0].as_bytes(), &[0xB0, 0x00, 0x01]);
        assert!(fill[1..].iter().all(|m| m.as_bytes() == [0x92, 3, 3]));

        let reset = enc.reset().unwrap();
        assert_eq!(reset.len(), 1);
        assert_eq!(reset[0].as_bytes(), &[0xB0, 0x00, 0x00]);
    }

    #[test]
    fn test_mk2_fill() {
        let enc = Variant::Mk2.encoder();
        let fill = enc.fill(Colour::Palette(PaletteIndex::new(5))).unwrap();
        assert_eq!(fill.len(), 1);
        assert_eq!(
            fill[0].as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x18, 0x0E, 5, 0xF7]
        );

        let fill = enc.fill(Colour::Rgb(Rgb::new(1, 2, 3))).unwrap();
        let entries: usize = fill.iter().map(|m| (m.len() - 8) / 4).sum();
        assert_eq!(entries, 80);
        assert!(fill.iter().all(|m| m.len() <= launchgrid_protocol::MAX_MESSAGE_SIZE));
    }

    #[test]
    fn test_pro_rgb_fill() {
        let fill = Variant::Pro
            .encoder()
            .fill(Colour::Rgb(Rgb::new(7, 8, 9)))
            .unwrap();
        assert_eq!(fill.len(), 1);
        let bytes = fill[0].as_bytes();
        assert_eq!(&bytes[..8], &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x10, 0x0F, 0x00]);
        assert_eq!(bytes.len(), 8 + 3 * PRO_FRAME_LEDS + 1);
        assert_eq!(&bytes[8..11], &[7, 8, 9]);
    }

    #[test]
    fn test_mini_mk3_reset_covers_all_buttons() {
        let reset = Variant::MiniMk3.encoder().reset().unwrap();
        assert_eq!(reset.len(), 1);
        let bytes = reset[0].as_bytes();
        let data = &bytes[7..bytes.len() - 1];
        assert_eq!(data.len(), 81 * 5);
        let logo = Variant::MiniMk3.to_address(Coordinate::new(8, 0)).unwrap();
        assert!(data
            .chunks(5)
            .any(|entry| entry == [lighting::RGB, logo.number, 0, 0, 0]));
    }

    #[test]
    fn test_sysex_carries_board_device() {
        let colours = [
            Colour::Palette(PaletteIndex::new(5)),
            Colour::Rgb(Rgb::new(10, 20, 30)),
        ];
        for variant in Variant::ALL {
            let enc = variant.encoder();
            let address = variant.to_address(Coordinate::new(1, 1)).unwrap();
            let mut messages = enc.reset().unwrap();
            for colour in colours {
                messages.push(enc.set(address, colour).unwrap());
                messages.extend(enc.fill(colour).unwrap());
            }
            messages.extend(enc.programmer_mode());

            let expected = match variant {
                Variant::Mini => None,
                Variant::Mk2 => Some(device::MK2),
                Variant::MiniMk3 => Some(device::MINI_MK3),
                Variant::Pro => Some(device::PRO),
            };
            for message in messages.iter().filter(|m| m.is_sysex()) {
                assert_eq!(Some(message.as_bytes()[5]), expected, "{variant:?}");
            }
        }
    }

    #[test]
    fn test_programmer_mode() {
        assert_eq!(
            Variant::Mk2.encode_programmer_mode().unwrap().as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x18, 0x22, 0x00, 0xF7]
        );
        assert_eq!(
            Variant::MiniMk3.encode_programmer_mode().unwrap().as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0D, 0x0E, 0x01, 0xF7]
        );
        assert!(Variant::Mini.encode_programmer_mode().is_none());
        assert!(Variant::Pro.encode_programmer_mode().is_none());
    }

    fn any_variant() -> impl Strategy<Value = Variant> {
        prop::sample::select(Variant::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_data_bytes_are_seven_bit(
            variant in any_variant(),
            r in -500i32..500,
            g in -500i32..500,
            b in -500i32..500,
        ) {
            let colour = variant.resolve_colour(crate::ColourRequest::Rgb(r, g, b));
            for coord in variant.config().buttons() {
                let address = variant.to_address(coord).unwrap();
                let msg = variant.encode_set(address, colour).unwrap();
                let bytes = msg.as_bytes();
                let data = if msg.is_sysex() { &bytes[1..bytes.len() - 1] } else { &bytes[1..] };
                prop_assert!(data.iter().all(|&byte| byte <= 0x7F));
            }
            for msg in variant.encode_fill(colour).unwrap() {
                prop_assert!(msg.len() <= launchgrid_protocol::MAX_MESSAGE_SIZE);
            }
        }
    }
}
