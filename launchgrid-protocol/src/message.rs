//! Outbound wire messages
//!
//! A [`Message`] is one complete unit handed to the transport: either a
//! 3-byte simple message or a complete SysEx frame built with
//! [`crate::SysexBuilder`].

use core::fmt;

use heapless::Vec;

/// Note-off status (channel 1)
pub const STATUS_NOTE_OFF: u8 = 0x80;

/// Note-on status (channel 1)
pub const STATUS_NOTE_ON: u8 = 0x90;

/// Control change status (channel 1)
pub const STATUS_CONTROL_CHANGE: u8 = 0xB0;

/// Largest message any supported device accepts in one frame
///
/// The biggest real frame is the Mini MK3 bulk RGB fill (413 bytes).
pub const MAX_MESSAGE_SIZE: usize = 512;

/// Length of a simple-family message
pub const SIMPLE_MESSAGE_LEN: usize = 3;

/// Highest value a MIDI data byte may carry
pub const DATA_MAX: u8 = 0x7F;

/// Errors that can occur while building a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Message would exceed [`MAX_MESSAGE_SIZE`]
    TooLong,
    /// A data byte had its high bit set
    InvalidDataByte(u8),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::TooLong => write!(f, "message exceeds {MAX_MESSAGE_SIZE} bytes"),
            MessageError::InvalidDataByte(b) => write!(f, "invalid data byte 0x{b:02X}"),
        }
    }
}

/// Which simple-message family an address belongs to
///
/// Interior pads usually answer to note messages, auxiliary rows to
/// control changes. The number spaces overlap, so the family is part of
/// the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressFamily {
    /// Note-on / note-off messages
    Note,
    /// Control change messages
    Control,
}

impl AddressFamily {
    /// Status byte used when sending to this family
    pub const fn status(self) -> u8 {
        match self {
            AddressFamily::Note => STATUS_NOTE_ON,
            AddressFamily::Control => STATUS_CONTROL_CHANGE,
        }
    }
}

/// A complete outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Vec<u8, MAX_MESSAGE_SIZE>,
}

impl Message {
    /// Build a simple 3-byte message
    ///
    /// Data bytes are masked to 7 bits.
    pub fn simple(status: u8, data1: u8, data2: u8) -> Self {
        let mut bytes = Vec::new();
        // Capacity is far above 3 bytes
        let _ = bytes.extend_from_slice(&[status, data1 & DATA_MAX, data2 & DATA_MAX]);
        Self { bytes }
    }

    /// Simple message addressed through an [`AddressFamily`]
    pub fn family(family: AddressFamily, number: u8, value: u8) -> Self {
        Self::simple(family.status(), number, value)
    }

    /// Wrap already-framed bytes
    pub(crate) fn from_vec(bytes: Vec<u8, MAX_MESSAGE_SIZE>) -> Self {
        Self { bytes }
    }

    /// Raw bytes to hand to the transport
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Message length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the message has no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if this is an extended (SysEx) frame
    pub fn is_sysex(&self) -> bool {
        self.bytes.first() == Some(&crate::SYSEX_START)
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Message {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Message({=[u8]:x})", self.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_message_layout() {
        let msg = Message::simple(STATUS_NOTE_ON, 11, 5);
        assert_eq!(msg.as_bytes(), &[0x90, 11, 5]);
        assert_eq!(msg.len(), SIMPLE_MESSAGE_LEN);
        assert!(!msg.is_sysex());
    }

    #[test]
    fn test_simple_message_masks_data() {
        let msg = Message::simple(STATUS_CONTROL_CHANGE, 0xE8, 0xFF);
        assert_eq!(msg.as_bytes(), &[0xB0, 0x68, 0x7F]);
    }

    #[test]
    fn test_family_status() {
        assert_eq!(
            Message::family(AddressFamily::Control, 104, 3).as_bytes(),
            &[0xB0, 104, 3]
        );
        assert_eq!(
            Message::family(AddressFamily::Note, 81, 17).as_bytes(),
            &[0x90, 81, 17]
        );
    }
}
