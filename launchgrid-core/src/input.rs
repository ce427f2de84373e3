//! Button input
//!
//! Raw inbound messages are classified by the protocol crate, then mapped
//! back to grid coordinates through the active variant. Decoded events
//! reach the caller either through [`ButtonEvents`] (push mode, filled by
//! a transport handler) or by polling the transport directly.

use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration, Instant};
use launchgrid_protocol::{classify, IgnoreReason, Inbound};

use crate::grid::{Address, Coordinate, UnknownAddress};
use crate::variants::GridProfile;

/// Capacity of the push-mode event queue
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// A button press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub coord: Coordinate,
    pub pressed: bool,
    /// Raw velocity as reported by the device
    pub velocity: u8,
}

/// Why an inbound message produced no event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ignored {
    /// Not a button message at all
    Message(IgnoreReason),
    /// A button message for an address the variant does not have
    Address(UnknownAddress),
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::Message(reason) => write!(f, "ignored message: {reason:?}"),
            Ignored::Address(unknown) => write!(f, "ignored {unknown}"),
        }
    }
}

/// Decode one raw inbound message
pub fn decode<P: GridProfile + ?Sized>(profile: &P, bytes: &[u8]) -> Result<ButtonEvent, Ignored> {
    let result = match classify(bytes) {
        Inbound::Button {
            family,
            number,
            velocity,
        } => profile
            .from_address(Address { family, number })
            .map(|coord| ButtonEvent {
                coord,
                pressed: velocity > 0,
                velocity,
            })
            .map_err(Ignored::Address),
        Inbound::Ignored(reason) => Err(Ignored::Message(reason)),
    };
    if let Err(ignored) = &result {
        log::trace!("{ignored}");
    }
    result
}

/// Bounded push-mode event queue
///
/// Shared between the transport handler (producer) and the session
/// (consumer). When full, new events are dropped.
pub struct ButtonEvents {
    channel: Channel<CriticalSectionRawMutex, ButtonEvent, EVENT_QUEUE_DEPTH>,
}

impl ButtonEvents {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue an event, returning false if it was dropped
    pub fn publish(&self, event: ButtonEvent) -> bool {
        if self.channel.try_send(event).is_err() {
            log::warn!("button queue full, dropping event at {}", event.coord);
            return false;
        }
        true
    }

    /// Take the oldest event without waiting
    pub fn try_next(&self) -> Option<ButtonEvent> {
        self.channel.try_receive().ok()
    }

    /// Wait up to `timeout` for an event
    ///
    /// A timeout past the end of the clock waits without a deadline.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ButtonEvent> {
        if Instant::now().checked_add(timeout).is_none() {
            return Some(embassy_futures::block_on(self.channel.receive()));
        }
        embassy_futures::block_on(with_timeout(timeout, self.channel.receive())).ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Drop all queued events
    pub fn clear(&self) {
        self.channel.clear();
    }
}

impl Default for ButtonEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ButtonEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonEvents")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::Variant;
    use proptest::prelude::*;

    #[test]
    fn test_decode_press_and_release() {
        let press = decode(&Variant::Mk2, &[0x90, 81, 127]).unwrap();
        assert_eq!(press.coord, Coordinate::new(0, 1));
        assert!(press.pressed);

        let release = decode(&Variant::Mk2, &[0x90, 81, 0]).unwrap();
        assert!(!release.pressed);

        let note_off = decode(&Variant::Mk2, &[0x80, 81, 64]).unwrap();
        assert!(!note_off.pressed);
    }

    #[test]
    fn test_decode_top_row_control() {
        let event = decode(&Variant::Mini, &[0xB0, 106, 127]).unwrap();
        assert_eq!(event.coord, Coordinate::new(2, 0));
    }

    #[test]
    fn test_decode_ignores_housekeeping() {
        assert_eq!(
            decode(&Variant::Mk2, &[0x90, 81]),
            Err(Ignored::Message(IgnoreReason::TooShort))
        );
        assert_eq!(
            decode(&Variant::Mk2, &[0xF0, 0x00, 0x20, 0x29, 0xF7]),
            Err(Ignored::Message(IgnoreReason::Sysex))
        );
        assert_eq!(
            decode(&Variant::Mk2, &[0xA0, 81, 10]),
            Err(Ignored::Message(IgnoreReason::UnsupportedStatus(0xA0)))
        );
        assert!(matches!(
            decode(&Variant::Pro, &[0x90, 99, 127]),
            Err(Ignored::Address(_))
        ));
    }

    #[test]
    fn test_queue_drops_newest_when_full() {
        let events = ButtonEvents::new();
        for x in 0..EVENT_QUEUE_DEPTH as u8 {
            assert!(events.publish(ButtonEvent {
                coord: Coordinate::new(x % 9, 1),
                pressed: true,
                velocity: x,
            }));
        }
        let overflow = ButtonEvent {
            coord: Coordinate::new(0, 0),
            pressed: true,
            velocity: 99,
        };
        assert!(!events.publish(overflow));
        assert_eq!(events.len(), EVENT_QUEUE_DEPTH);
        assert_eq!(events.try_next().map(|e| e.velocity), Some(0));
        events.clear();
        assert!(events.is_empty());
    }

    #[test]
    fn test_next_timeout_empty() {
        let events = ButtonEvents::new();
        assert_eq!(events.next_timeout(Duration::from_millis(5)), None);
    }

    #[test]
    fn test_next_timeout_past_end_of_clock() {
        let events = ButtonEvents::new();
        let event = ButtonEvent {
            coord: Coordinate::new(1, 2),
            pressed: false,
            velocity: 0,
        };
        events.publish(event);
        assert_eq!(events.next_timeout(Duration::MAX), Some(event));
    }

    #[test]
    fn test_next_timeout_from_other_thread() {
        let events = std::sync::Arc::new(ButtonEvents::new());
        let producer = events.clone();
        let handle = std::thread::spawn(move || {
            producer.publish(ButtonEvent {
                coord: Coordinate::new(3, 3),
                pressed: true,
                velocity: 127,
            });
        });
        let received = events.next_timeout(Duration::from_secs(2));
        handle.join().unwrap();
        assert_eq!(received.map(|e| e.coord), Some(Coordinate::new(3, 3)));
    }

    proptest! {
        #[test]
        fn test_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..8)) {
            for variant in Variant::ALL {
                let _ = decode(&variant, &bytes);
            }
        }
    }
}
