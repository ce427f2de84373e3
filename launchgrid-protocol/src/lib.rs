//! Launchpad MIDI framing
//!
//! This crate defines the byte-level message formats used to drive
//! Launchpad-style LED grids. Only the framing of MIDI is reused; nothing
//! here is concerned with musical use of the protocol.
//!
//! # Message families
//!
//! Two outbound families exist:
//! ```text
//! Simple (3 bytes):
//! ┌────────┬─────────┬───────┐
//! │ STATUS │ ADDRESS │ VALUE │
//! │ 9n/Bn  │ 0–127   │ 0–127 │
//! └────────┴─────────┴───────┘
//!
//! Extended (Novation SysEx):
//! ┌──────┬──────────┬────────┬────────┬─────────┬─────────────┬──────┐
//! │ F0   │ 00 20 29 │ 02     │ DEVICE │ COMMAND │ DATA…       │ F7   │
//! │ 1B   │ 3B       │ 1B     │ 1B     │ 1B      │ 7-bit bytes │ 1B   │
//! └──────┴──────────┴────────┴────────┴─────────┴─────────────┴──────┘
//! ```
//!
//! Inbound button traffic is always simple-family; everything else the
//! device sends is classified as ignorable housekeeping.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod inbound;
pub mod message;
pub mod sysex;

pub use inbound::{classify, IgnoreReason, Inbound, MIN_INBOUND_LEN};
pub use message::{
    AddressFamily, Message, MessageError, MAX_MESSAGE_SIZE, STATUS_CONTROL_CHANGE,
    STATUS_NOTE_OFF, STATUS_NOTE_ON,
};
pub use sysex::{SysexBuilder, SYSEX_END, SYSEX_START};
