//! Message link to a device

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Callback for inbound messages in push mode
///
/// May be invoked from a thread other than the session's.
pub type InboundHandler = Box<dyn FnMut(&[u8]) + Send>;

/// An open, bidirectional message link
///
/// Opening, discovering and closing the link are the implementor's
/// concern; the core only uses an already open one.
pub trait Transport {
    /// Link failure, passed to callers as is
    type Error;

    /// Send one complete message
    ///
    /// Blocks until the link accepts it. No timeout applies.
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Take the next pending inbound message, if any, without blocking
    fn poll_receive(&mut self) -> Option<Vec<u8>>;

    /// Register the push-mode handler, replacing any previous one
    fn set_handler(&mut self, handler: InboundHandler);

    /// Remove the push-mode handler
    ///
    /// Calling this with no handler registered does nothing.
    fn clear_handler(&mut self);
}
