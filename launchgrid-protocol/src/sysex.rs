//! Novation SysEx framing
//!
//! Frame format:
//! - START (1 byte): 0xF0
//! - MANUFACTURER (3 bytes): 00 20 29 (Focusrite/Novation)
//! - PRODUCT TYPE (1 byte): 0x02
//! - DEVICE (1 byte): device model identifier
//! - COMMAND (1 byte): device-specific command
//! - DATA (N bytes): 7-bit data bytes
//! - END (1 byte): 0xF7

use heapless::Vec;

use crate::message::{Message, MessageError, DATA_MAX, MAX_MESSAGE_SIZE};

/// SysEx start byte
pub const SYSEX_START: u8 = 0xF0;

/// SysEx end byte
pub const SYSEX_END: u8 = 0xF7;

/// Focusrite/Novation manufacturer identifier
pub const NOVATION_ID: [u8; 3] = [0x00, 0x20, 0x29];

/// Product type byte shared by all Launchpads
pub const LAUNCHPAD_PRODUCT: u8 = 0x02;

/// Number of header bytes before the data section (START..=COMMAND)
pub const HEADER_LEN: usize = 7;

/// Incremental builder for a Novation SysEx frame
///
/// The end marker is reserved up front, so [`SysexBuilder::remaining`]
/// always reports how many data bytes still fit in one frame.
#[derive(Debug, Clone)]
pub struct SysexBuilder {
    bytes: Vec<u8, MAX_MESSAGE_SIZE>,
}

impl SysexBuilder {
    /// Start a frame for the given device and command
    pub fn novation(device: u8, command: u8) -> Self {
        let mut bytes = Vec::new();
        let _ = bytes.push(SYSEX_START);
        let _ = bytes.extend_from_slice(&NOVATION_ID);
        let _ = bytes.push(LAUNCHPAD_PRODUCT);
        let _ = bytes.push(device & DATA_MAX);
        let _ = bytes.push(command & DATA_MAX);
        Self { bytes }
    }

    /// Append one data byte
    pub fn push(&mut self, byte: u8) -> Result<(), MessageError> {
        if byte > DATA_MAX {
            return Err(MessageError::InvalidDataByte(byte));
        }
        if self.remaining() == 0 {
            return Err(MessageError::TooLong);
        }
        self.bytes.push(byte).map_err(|_| MessageError::TooLong)
    }

    /// Append a run of data bytes
    pub fn extend_from_slice(&mut self, data: &[u8]) -> Result<(), MessageError> {
        if let Some(&bad) = data.iter().find(|&&b| b > DATA_MAX) {
            return Err(MessageError::InvalidDataByte(bad));
        }
        if data.len() > self.remaining() {
            return Err(MessageError::TooLong);
        }
        self.bytes
            .extend_from_slice(data)
            .map_err(|_| MessageError::TooLong)
    }

    /// Number of data bytes written so far
    pub fn data_len(&self) -> usize {
        self.bytes.len() - HEADER_LEN
    }

    /// Data bytes that still fit before the end marker
    pub fn remaining(&self) -> usize {
        MAX_MESSAGE_SIZE - 1 - self.bytes.len()
    }

    /// Close the frame
    pub fn finish(mut self) -> Message {
        // One byte is always held back for the end marker
        let _ = self.bytes.push(SYSEX_END);
        Message::from_vec(self.bytes)
    }
}
