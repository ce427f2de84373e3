//! Inbound message classification
//!
//! Buttons report through simple-family messages. Anything else the device
//! emits (aftertouch, SysEx replies, truncated packets) is housekeeping and
//! classified as ignorable rather than treated as an error.

use crate::message::{AddressFamily, STATUS_CONTROL_CHANGE, STATUS_NOTE_OFF, STATUS_NOTE_ON};
use crate::sysex::SYSEX_START;

/// Minimum length of a button message (status + address + velocity)
pub const MIN_INBOUND_LEN: usize = 3;

/// Why an inbound message carries no button information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// Shorter than [`MIN_INBOUND_LEN`]
    TooShort,
    /// A SysEx frame (device replies, echoes)
    Sysex,
    /// A status outside the button families
    UnsupportedStatus(u8),
}

/// Classified inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// A button state change at a raw address
    Button {
        family: AddressFamily,
        number: u8,
        velocity: u8,
    },
    /// Nothing for the caller
    Ignored(IgnoreReason),
}

/// Classify raw bytes received from the transport
///
/// The channel nibble is not inspected. Note-off is reported as a Note
/// message with zero velocity.
pub fn classify(bytes: &[u8]) -> Inbound {
    if bytes.first() == Some(&SYSEX_START) {
        return Inbound::Ignored(IgnoreReason::Sysex);
    }
    if bytes.len() < MIN_INBOUND_LEN {
        return Inbound::Ignored(IgnoreReason::TooShort);
    }

    let status = bytes[0];
    let number = bytes[1];
    let velocity = bytes[2];

    match status & 0xF0 {
        STATUS_NOTE_ON => Inbound::Button {
            family: AddressFamily::Note,
            number,
            velocity,
        },
        STATUS_NOTE_OFF => Inbound::Button {
            family: AddressFamily::Note,
            number,
            velocity: 0,
        },
        STATUS_CONTROL_CHANGE => Inbound::Button {
            family: AddressFamily::Control,
            number,
            velocity,
        },
        _ => Inbound::Ignored(IgnoreReason::UnsupportedStatus(status)),
    }
}
