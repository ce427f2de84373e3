//! Grid session
//!
//! A [`GridSession`] owns the transport and every piece of per-connection
//! state: the variant, the bitmap draw colour, the step delay, the last
//! pressed button and a canvas of RGB content sent so far. Create one per
//! connection and drop it on disconnect.
//!
//! Draws to coordinates with no button are skipped silently. Transport
//! errors are returned unchanged.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use embassy_time::{Duration, Instant};
use launchgrid_protocol::Message;

use crate::colour::{Colour, ColourRequest, Rgb};
use crate::config::{GridConfig, DEFAULT_DRAW_COLOUR};
use crate::encoder::EncodeResult;
use crate::frame::{column_mask, Frame, FrameRow, FRAME_SIZE};
use crate::glyph::{Glyph, GlyphSource};
use crate::grid::Coordinate;
use crate::input::{decode, ButtonEvent, ButtonEvents};
use crate::pattern::PatternFrame;
use crate::picture::Picture;
use crate::scroll::{Direction, Flythrough, HorizontalEntry, Scroller, VerticalEntry, VerticalScroll};
use crate::traits::{BlockingPacer, Pacer, Transport};
use crate::variants::{GridProfile, Variant};

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);

/// Poll interval while waiting for input without a handler
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// An open connection to one grid
pub struct GridSession<T: Transport, P: Pacer = BlockingPacer> {
    variant: Variant,
    transport: T,
    pacer: P,
    draw_colour: Colour,
    step_delay: Duration,
    last_pressed: Option<Coordinate>,
    canvas: Picture,
    events: Arc<ButtonEvents>,
    listening: bool,
}

impl<T: Transport> GridSession<T, BlockingPacer> {
    /// Session that paces animations on the embassy time driver
    pub fn new(variant: Variant, transport: T) -> Self {
        Self::with_pacer(variant, transport, BlockingPacer)
    }
}

impl<T: Transport, P: Pacer> GridSession<T, P> {
    pub fn with_pacer(variant: Variant, transport: T, pacer: P) -> Self {
        Self {
            variant,
            transport,
            pacer,
            draw_colour: variant.resolve_colour(ColourRequest::Named(DEFAULT_DRAW_COLOUR)),
            step_delay: DEFAULT_STEP_DELAY,
            last_pressed: None,
            canvas: Picture::for_variant(variant),
            events: Arc::new(ButtonEvents::new()),
            listening: false,
        }
    }

    /// Open a session from configuration
    ///
    /// Sends the programmer-mode switch and the reset if configured.
    pub fn connect(config: &GridConfig, transport: T, pacer: P) -> Result<Self, T::Error> {
        let mut session = Self::with_pacer(config.variant, transport, pacer);
        session.set_draw_colour(config.draw_colour());
        session.set_step_delay(config.step_delay());
        log::debug!("connected to {}", config.variant.config().name);
        if config.programmer_mode {
            session.enter_programmer_mode()?;
        }
        if config.reset_on_connect {
            session.reset()?;
        }
        Ok(session)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// End the session and hand back the transport
    pub fn into_transport(mut self) -> T {
        self.stop_listening();
        self.transport
    }

    /// Colour used for lit bitmap pixels
    pub fn draw_colour(&self) -> Colour {
        self.draw_colour
    }

    pub fn set_draw_colour<'a>(&mut self, request: impl Into<ColourRequest<'a>>) {
        self.draw_colour = self.variant.resolve_colour(request.into());
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = delay;
    }

    /// Most recent press consumed through [`GridSession::next_event`]
    pub fn last_pressed(&self) -> Option<Coordinate> {
        self.last_pressed
    }

    /// RGB content sent so far; palette draws read back as black
    pub fn canvas(&self) -> &Picture {
        &self.canvas
    }

    fn send(&mut self, message: &Message) -> Result<(), T::Error> {
        self.transport.send(message.as_bytes())
    }

    fn send_all(&mut self, messages: EncodeResult<Vec<Message>>) -> Result<(), T::Error> {
        match messages {
            Ok(messages) => messages.iter().try_for_each(|m| self.send(m)),
            Err(err) => {
                log::error!("encoding failed: {err}");
                Ok(())
            }
        }
    }

    /// Light one button from a name, index or RGB request
    pub fn set_colour<'a>(
        &mut self,
        coord: Coordinate,
        request: impl Into<ColourRequest<'a>>,
    ) -> Result<(), T::Error> {
        let colour = self.variant.resolve_colour(request.into());
        self.set_resolved(coord, colour)
    }

    /// Light one button by RGB, clamped to the board's depth
    pub fn set_rgb(
        &mut self,
        coord: Coordinate,
        red: i32,
        green: i32,
        blue: i32,
    ) -> Result<(), T::Error> {
        self.set_colour(coord, ColourRequest::Rgb(red, green, blue))
    }

    fn set_resolved(&mut self, coord: Coordinate, colour: Colour) -> Result<(), T::Error> {
        let address = match self.variant.to_address(coord) {
            Ok(address) => address,
            Err(err) => {
                log::trace!("skipping draw at {coord}: {err}");
                return Ok(());
            }
        };
        match self.variant.encode_set(address, colour) {
            Ok(message) => self.send(&message)?,
            Err(err) => {
                log::error!("encoding failed at {coord}: {err}");
                return Ok(());
            }
        }
        self.canvas.set(coord, canvas_value(colour));
        Ok(())
    }

    /// Set every LED to one colour
    pub fn fill<'a>(&mut self, request: impl Into<ColourRequest<'a>>) -> Result<(), T::Error> {
        let colour = self.variant.resolve_colour(request.into());
        self.send_all(self.variant.encode_fill(colour))?;
        let value = canvas_value(colour);
        for coord in self.variant.config().buttons() {
            self.canvas.set(coord, value);
        }
        Ok(())
    }

    /// Turn every LED off
    pub fn reset(&mut self) -> Result<(), T::Error> {
        log::debug!("reset {}", self.variant.config().name);
        self.send_all(self.variant.encode_reset())?;
        self.canvas.clear();
        Ok(())
    }

    /// Switch the board to programmer mode; a no-op where none exists
    pub fn enter_programmer_mode(&mut self) -> Result<(), T::Error> {
        match self.variant.encode_programmer_mode() {
            Some(message) => self.send(&message),
            None => Ok(()),
        }
    }

    fn interior(&self, x: u8, y: u8) -> Option<Coordinate> {
        self.variant
            .config()
            .interior_origin
            .offset(i16::from(x), i16::from(y))
    }

    /// Redraw the 8x8 interior: lit pixels in the draw colour, the rest off
    pub fn draw_frame(&mut self, frame: &Frame) -> Result<(), T::Error> {
        let lit = self.draw_colour;
        for (x, y, on) in frame.pixels() {
            if let Some(coord) = self.interior(x, y) {
                self.set_resolved(coord, if on { lit } else { Colour::OFF })?;
            }
        }
        Ok(())
    }

    /// Redraw the interior with a glyph moved `x_offset` columns right
    pub fn draw_glyph_at(&mut self, glyph: &Glyph, x_offset: i8) -> Result<(), T::Error> {
        self.draw_frame(&glyph.frame().shifted(x_offset))
    }

    /// Light the set bits of one interior row; clear bits are left alone
    pub fn draw_row(&mut self, y: u8, row: FrameRow) -> Result<(), T::Error> {
        if usize::from(y) >= FRAME_SIZE {
            log::trace!("skipping row {y}");
            return Ok(());
        }
        let lit = self.draw_colour;
        for x in 0..FRAME_SIZE as u8 {
            if row & column_mask(x) != 0 {
                if let Some(coord) = self.interior(x, y) {
                    self.set_resolved(coord, lit)?;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<(), T::Error> {
        self.draw_frame(frame)?;
        self.pacer.pause(self.step_delay);
        Ok(())
    }

    /// Scroll a glyph in from one side and back out
    pub fn scroll_glyph(&mut self, glyph: &Glyph, entry: HorizontalEntry) -> Result<(), T::Error> {
        let mut scroller = Scroller::new(entry);
        for frame in scroller.scroll_in(glyph) {
            self.render(&frame)?;
        }
        for frame in scroller.scroll_out() {
            self.render(&frame)?;
        }
        Ok(())
    }

    /// Scroll a string through the grid
    ///
    /// Symbols missing from `glyphs` are skipped with a warning.
    pub fn scroll_text<G: GlyphSource + ?Sized>(
        &mut self,
        text: &str,
        direction: Direction,
        glyphs: &G,
    ) -> Result<(), T::Error> {
        let symbols: Vec<Glyph> = text
            .chars()
            .filter_map(|id| {
                let glyph = glyphs.glyph(id);
                if glyph.is_none() {
                    log::warn!("no glyph for {id:?}");
                }
                glyph
            })
            .collect();

        match HorizontalEntry::try_from(direction) {
            Ok(entry) => {
                let mut scroller = Scroller::new(entry);
                // each glyph pushes the previous one away from its entry
                // edge, so left entry feeds the text last symbol first
                let ordered: Vec<&Glyph> = match entry {
                    HorizontalEntry::Right => symbols.iter().collect(),
                    HorizontalEntry::Left => symbols.iter().rev().collect(),
                };
                for glyph in ordered {
                    for frame in scroller.scroll_in(glyph) {
                        self.render(&frame)?;
                    }
                }
                for frame in scroller.scroll_out() {
                    self.render(&frame)?;
                }
                Ok(())
            }
            Err(entry) => self.scroll_vertical(&symbols, entry),
        }
    }

    /// Sweep an animated sprite across the grid
    pub fn flythrough(&mut self, frames: &[Glyph], entry: HorizontalEntry) -> Result<(), T::Error> {
        for frame in Flythrough::new(frames, entry) {
            self.render(&frame)?;
        }
        Ok(())
    }

    /// Scroll stacked glyphs vertically
    pub fn scroll_vertical(&mut self, glyphs: &[Glyph], entry: VerticalEntry) -> Result<(), T::Error> {
        for frame in VerticalScroll::new(glyphs, entry) {
            self.render(&frame)?;
        }
        Ok(())
    }

    /// Redraw every cell of a picture by RGB
    pub fn load_picture(&mut self, picture: &Picture) -> Result<(), T::Error> {
        for (coord, rgb) in picture.pixels() {
            self.set_rgb(coord, rgb.red.into(), rgb.green.into(), rgb.blue.into())?;
        }
        Ok(())
    }

    /// Redraw the interior from a pattern frame
    pub fn show_pattern_frame(&mut self, frame: &PatternFrame) -> Result<(), T::Error> {
        for (x, y, rgb) in frame.cells() {
            if let Some(coord) = self.interior(x, y) {
                self.set_rgb(coord, rgb.red.into(), rgb.green.into(), rgb.blue.into())?;
            }
        }
        Ok(())
    }

    /// Show pattern frames in order, one step delay apart
    pub fn play_pattern(&mut self, frames: &[PatternFrame]) -> Result<(), T::Error> {
        for frame in frames {
            self.show_pattern_frame(frame)?;
            self.pacer.pause(self.step_delay);
        }
        Ok(())
    }

    /// Switch to push delivery
    ///
    /// Replaces any handler already on the transport. Events queue in
    /// [`ButtonEvents`] until read.
    pub fn listen(&mut self) {
        let events = Arc::clone(&self.events);
        let variant = self.variant;
        self.transport.set_handler(Box::new(move |bytes: &[u8]| {
            if let Ok(event) = decode(&variant, bytes) {
                events.publish(event);
            }
        }));
        self.listening = true;
        log::debug!("listening for button events");
    }

    /// Back to poll delivery; calling it again does nothing
    pub fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        self.transport.clear_handler();
        self.listening = false;
        log::debug!("stopped listening");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// The push-mode queue, for consumers on other threads
    pub fn events(&self) -> Arc<ButtonEvents> {
        Arc::clone(&self.events)
    }

    /// Next button event without blocking
    ///
    /// Reads the push queue while listening and polls the transport
    /// otherwise.
    pub fn next_event(&mut self) -> Option<ButtonEvent> {
        let event = if self.listening {
            self.events.try_next()
        } else {
            self.poll_transport()
        };
        self.track(event)
    }

    /// Next button event, waiting up to `timeout`
    pub fn wait_event(&mut self, timeout: Duration) -> Option<ButtonEvent> {
        if self.listening {
            let event = self.events.next_timeout(timeout);
            return self.track(event);
        }
        // no deadline if the timeout overflows the clock
        let deadline = Instant::now().checked_add(timeout);
        loop {
            if let Some(event) = self.next_event() {
                return Some(event);
            }
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return None;
            }
            self.pacer.pause(POLL_INTERVAL);
        }
    }

    fn poll_transport(&mut self) -> Option<ButtonEvent> {
        loop {
            let bytes = self.transport.poll_receive()?;
            if let Ok(event) = decode(&self.variant, &bytes) {
                return Some(event);
            }
        }
    }

    fn track(&mut self, event: Option<ButtonEvent>) -> Option<ButtonEvent> {
        if let Some(event) = event.filter(|e| e.pressed) {
            self.last_pressed = Some(event.coord);
        }
        event
    }
}

fn canvas_value(colour: Colour) -> Rgb {
    match colour {
        Colour::Rgb(rgb) => rgb,
        Colour::Palette(_) => Rgb::BLACK,
    }
}
