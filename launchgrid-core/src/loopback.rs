//! In-memory transport
//!
//! Records everything sent and lets tests or simulations inject inbound
//! traffic, either through the registered handler or into the poll queue.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use crate::traits::{InboundHandler, Transport};

/// Loopback link failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopbackError {
    /// The link was disconnected with [`LoopbackTransport::disconnect`]
    Disconnected,
}

impl fmt::Display for LoopbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopbackError::Disconnected => f.write_str("loopback disconnected"),
        }
    }
}

/// Transport that never leaves the process
pub struct LoopbackTransport {
    sent: Vec<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
    handler: Option<InboundHandler>,
    connected: bool,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            inbound: VecDeque::new(),
            handler: None,
            connected: true,
        }
    }

    /// Every message sent so far, oldest first
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Drain the sent log
    pub fn take_sent(&mut self) -> Vec<Vec<u8>> {
        core::mem::take(&mut self.sent)
    }

    /// Deliver an inbound message
    ///
    /// Goes to the handler when one is registered, otherwise waits in the
    /// poll queue.
    pub fn inject(&mut self, bytes: &[u8]) {
        match self.handler.as_mut() {
            Some(handler) => handler(bytes),
            None => self.inbound.push_back(bytes.to_vec()),
        }
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Number of inbound messages waiting to be polled
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// Make every later send fail
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoopbackTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopbackTransport")
            .field("sent", &self.sent.len())
            .field("inbound", &self.inbound.len())
            .field("handler", &self.handler.is_some())
            .field("connected", &self.connected)
            .finish()
    }
}

impl Transport for LoopbackTransport {
    type Error = LoopbackError;

    fn send(&mut self, bytes: &[u8]) -> Result<(), LoopbackError> {
        if !self.connected {
            return Err(LoopbackError::Disconnected);
        }
        log::trace!("loopback send {bytes:02X?}");
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn poll_receive(&mut self) -> Option<Vec<u8>> {
        self.inbound.pop_front()
    }

    fn set_handler(&mut self, handler: InboundHandler) {
        self.handler = Some(handler);
    }

    fn clear_handler(&mut self) {
        self.handler = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_send_is_recorded() {
        let mut link = LoopbackTransport::new();
        link.send(&[0x90, 1, 2]).unwrap();
        assert_eq!(link.sent(), &[vec![0x90, 1, 2]]);
        assert_eq!(link.take_sent().len(), 1);
        assert!(link.sent().is_empty());
    }

    #[test]
    fn test_disconnected_send_fails() {
        let mut link = LoopbackTransport::new();
        link.disconnect();
        assert_eq!(link.send(&[0x90, 1, 2]), Err(LoopbackError::Disconnected));
    }

    #[test]
    fn test_inject_without_handler_queues() {
        let mut link = LoopbackTransport::new();
        link.inject(&[0x90, 11, 127]);
        assert_eq!(link.pending(), 1);
        assert_eq!(link.poll_receive(), Some(vec![0x90, 11, 127]));
        assert_eq!(link.poll_receive(), None);
    }

    #[test]
    fn test_handler_replaces_and_clears() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut link = LoopbackTransport::new();

        let counter = first.clone();
        link.set_handler(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = second.clone();
        link.set_handler(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        link.inject(&[0x90, 11, 127]);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        link.clear_handler();
        link.clear_handler();
        assert!(!link.has_handler());
        link.inject(&[0x90, 11, 0]);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(link.pending(), 1);
    }
}
