//! Animation pacing

use embassy_time::Duration;

/// Waits between animation steps
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Busy-waits on the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingPacer;

impl Pacer for BlockingPacer {
    fn pause(&mut self, delay: Duration) {
        if delay.as_ticks() > 0 {
            embassy_time::block_for(delay);
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _delay: Duration) {}
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_pacer_zero_returns() {
        BlockingPacer.pause(Duration::from_ticks(0));
    }

    #[test]
    fn test_blocking_pacer_waits() {
        let start = embassy_time::Instant::now();
        BlockingPacer.pause(Duration::from_millis(2));
        assert!(start.elapsed() >= Duration::from_millis(2));
    }
}
