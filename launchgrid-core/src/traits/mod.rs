//! Collaborator traits
//!
//! These traits define the seams between the grid core and the outside
//! world: the message link to the device and the pacing of animations.

pub mod pacer;
pub mod transport;

pub use pacer::{BlockingPacer, NoDelay, Pacer};
pub use transport::{InboundHandler, Transport};
