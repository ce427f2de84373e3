//! Painter mode
//!
//! The top row becomes a palette of swatches. Pressing a swatch picks its
//! colour; pressing any other button paints it. The last button of the
//! grid (bottom-right, or the nearest fitted one) ends painting.

use embassy_time::Duration;

use crate::colour::Rgb;
use crate::grid::Coordinate;
use crate::input::ButtonEvent;
use crate::picture::Picture;
use crate::session::GridSession;
use crate::traits::{Pacer, Transport};
use crate::variants::{GridProfile, Variant};

/// Swatches laid out along the top row
pub const SWATCHES: [Rgb; 8] = [
    Rgb::new(55, 55, 55),
    Rgb::new(55, 0, 0),
    Rgb::new(0, 55, 0),
    Rgb::new(0, 0, 55),
    Rgb::new(55, 55, 0),
    Rgb::new(0, 55, 55),
    Rgb::new(44, 33, 12),
    Rgb::BLACK,
];

/// What a press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stroke {
    /// A swatch was picked
    Picked(Rgb),
    /// A button was painted in the current colour
    Painted(Coordinate),
    /// The exit button was pressed
    Finished,
    /// A release, or a press outside the grid
    Ignored,
}

/// Interactive painting state
#[derive(Debug, Clone)]
pub struct Painter {
    variant: Variant,
    current: Rgb,
    exit: Coordinate,
    picture: Picture,
}

impl Painter {
    pub fn new(variant: Variant) -> Self {
        let config = variant.config();
        // last fitted button in row-major order
        let exit = config
            .buttons()
            .last()
            .unwrap_or(Coordinate::new(config.bounds.max_x, config.bounds.max_y));
        Self {
            variant,
            current: SWATCHES[0],
            exit,
            picture: Picture::for_variant(variant),
        }
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn exit_button(&self) -> Coordinate {
        self.exit
    }

    /// Painted cells so far
    pub fn picture(&self) -> &Picture {
        &self.picture
    }

    pub fn into_picture(self) -> Picture {
        self.picture
    }

    /// Position of swatch `index` on the top row
    pub fn swatch_position(&self, index: usize) -> Option<Coordinate> {
        let x = self.variant.config().interior_origin.x as usize + index;
        (index < SWATCHES.len()).then(|| Coordinate::new(x as u8, 0))
    }

    fn swatch_at(&self, coord: Coordinate) -> Option<Rgb> {
        if coord.y != 0 {
            return None;
        }
        let origin = self.variant.config().interior_origin.x;
        let index = usize::from(coord.x.checked_sub(origin)?);
        SWATCHES.get(index).copied()
    }

    /// Clear the grid and draw the swatches
    pub fn setup<T: Transport, P: Pacer>(&self, session: &mut GridSession<T, P>) -> Result<(), T::Error> {
        session.reset()?;
        for (i, swatch) in SWATCHES.iter().enumerate() {
            if let Some(coord) = self.swatch_position(i) {
                session.set_rgb(coord, swatch.red.into(), swatch.green.into(), swatch.blue.into())?;
            }
        }
        Ok(())
    }

    /// Apply one button event
    pub fn handle<T: Transport, P: Pacer>(
        &mut self,
        session: &mut GridSession<T, P>,
        event: ButtonEvent,
    ) -> Result<Stroke, T::Error> {
        if !event.pressed {
            return Ok(Stroke::Ignored);
        }
        if event.coord == self.exit {
            return Ok(Stroke::Finished);
        }
        if let Some(swatch) = self.swatch_at(event.coord) {
            self.current = swatch;
            return Ok(Stroke::Picked(swatch));
        }
        if event.coord.y == 0 || !self.variant.config().is_physical(event.coord) {
            return Ok(Stroke::Ignored);
        }
        let rgb = self.current;
        session.set_rgb(event.coord, rgb.red.into(), rgb.green.into(), rgb.blue.into())?;
        self.picture.set(event.coord, rgb);
        Ok(Stroke::Painted(event.coord))
    }

    /// Paint until the exit button is pressed or no event arrives within
    /// `idle`
    pub fn run<T: Transport, P: Pacer>(
        &mut self,
        session: &mut GridSession<T, P>,
        idle: Duration,
    ) -> Result<&Picture, T::Error> {
        self.setup(session)?;
        while let Some(event) = session.wait_event(idle) {
            if self.handle(session, event)? == Stroke::Finished {
                log::debug!("painting finished");
                break;
            }
        }
        Ok(&self.picture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loopback::LoopbackTransport;
    use crate::traits::NoDelay;

    fn press(x: u8, y: u8) -> ButtonEvent {
        ButtonEvent {
            coord: Coordinate::new(x, y),
            pressed: true,
            velocity: 127,
        }
    }

    #[test]
    fn test_exit_button() {
        assert_eq!(Painter::new(Variant::Mk2).exit_button(), Coordinate::new(8, 8));
        assert_eq!(Painter::new(Variant::Pro).exit_button(), Coordinate::new(8, 9));
    }

    #[test]
    fn test_swatches_follow_interior() {
        assert_eq!(Painter::new(Variant::Mk2).swatch_position(0), Some(Coordinate::new(0, 0)));
        assert_eq!(Painter::new(Variant::Pro).swatch_position(0), Some(Coordinate::new(1, 0)));
        assert_eq!(Painter::new(Variant::Pro).swatch_position(8), None);
    }

    #[test]
    fn test_pick_and_paint() {
        let mut session = GridSession::with_pacer(Variant::Mk2, LoopbackTransport::new(), NoDelay);
        let mut painter = Painter::new(Variant::Mk2);
        painter.setup(&mut session).unwrap();
        session.transport_mut().take_sent();

        assert_eq!(
            painter.handle(&mut session, press(2, 0)).unwrap(),
            Stroke::Picked(Rgb::new(0, 55, 0))
        );
        assert_eq!(
            painter.handle(&mut session, press(4, 4)).unwrap(),
            Stroke::Painted(Coordinate::new(4, 4))
        );
        assert_eq!(session.transport().sent().len(), 1);
        assert_eq!(
            painter.picture().get(Coordinate::new(4, 4)),
            Some(Rgb::new(0, 55, 0))
        );
        // swatches are not part of the painting
        assert_eq!(painter.picture().get(Coordinate::new(2, 0)), Some(Rgb::BLACK));
    }

    #[test]
    fn test_run_until_exit() {
        let mut session = GridSession::with_pacer(Variant::MiniMk3, LoopbackTransport::new(), NoDelay);
        session.listen();
        // swatch 1 (red) then paint (3, 5), then exit at (8, 8)
        session.transport_mut().inject(&[0xB0, 92, 127]);
        session.transport_mut().inject(&[0x90, 44, 127]);
        session.transport_mut().inject(&[0x90, 44, 0]);
        session.transport_mut().inject(&[0x90, 19, 127]);
        session.transport_mut().inject(&[0x90, 55, 127]);

        let mut painter = Painter::new(Variant::MiniMk3);
        let picture = painter.run(&mut session, Duration::from_millis(20)).unwrap().clone();
        assert_eq!(picture.get(Coordinate::new(3, 5)), Some(Rgb::new(55, 0, 0)));
        // the press after the exit button stays queued
        assert_eq!(session.next_event().map(|e| e.coord), Some(Coordinate::new(4, 4)));
    }
}
