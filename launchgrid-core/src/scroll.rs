//! Scroll animations
//!
//! Each animation owns its live [`Frame`] buffer: it starts zeroed, is
//! mutated once per step, and is blank again when the animation ends.
//! Animations yield copies of the buffer; pacing and rendering are up to
//! the caller.
//!
//! ```text
//! enter-right, step 3 of 8:
//!
//!   buffer  ◀── shift ──  incoming glyph column 3
//!   ┌────────┐            ┌────────┐
//!   │·····###│ ◀───────── │###·····│
//!   └────────┘            └────────┘
//! ```

use alloc::vec::Vec;

use crate::frame::{column_mask, Frame, FrameRow, FRAME_SIZE};
use crate::glyph::Glyph;

/// Steps for one glyph to cross the window in a flythrough
pub const FLYTHROUGH_STEPS: usize = 2 * FRAME_SIZE;

/// Blank rows between stacked glyphs in a vertical scroll
pub const VERTICAL_SPACER_ROWS: usize = 1;

/// Which edge new content enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    EnterLeft,
    EnterRight,
    EnterTop,
    EnterBottom,
}

/// Horizontal entry edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HorizontalEntry {
    Left,
    Right,
}

/// Vertical entry edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VerticalEntry {
    Top,
    Bottom,
}

impl TryFrom<Direction> for HorizontalEntry {
    type Error = VerticalEntry;

    fn try_from(direction: Direction) -> Result<Self, Self::Error> {
        match direction {
            Direction::EnterLeft => Ok(HorizontalEntry::Left),
            Direction::EnterRight => Ok(HorizontalEntry::Right),
            Direction::EnterTop => Err(VerticalEntry::Top),
            Direction::EnterBottom => Err(VerticalEntry::Bottom),
        }
    }
}

/// Column-by-column horizontal scroller
#[derive(Debug, Clone)]
pub struct Scroller {
    buffer: Frame,
    entry: HorizontalEntry,
}

impl Scroller {
    pub const fn new(entry: HorizontalEntry) -> Self {
        Self {
            buffer: Frame::BLANK,
            entry,
        }
    }

    pub const fn buffer(&self) -> &Frame {
        &self.buffer
    }

    pub const fn entry(&self) -> HorizontalEntry {
        self.entry
    }

    /// Advance one column
    ///
    /// Every row moves one column toward the exit edge, dropping the
    /// column that leaves, and the vacated edge column takes column
    /// `step` of `incoming` as counted from the entry side.
    pub fn step(&mut self, incoming: &Glyph, step: u8) -> &Frame {
        let step = step % FRAME_SIZE as u8;
        let rows = self.buffer.rows_mut();
        for (row, &glyph_row) in rows.iter_mut().zip(incoming.rows()) {
            *row = match self.entry {
                HorizontalEntry::Right => {
                    let bit = (glyph_row & column_mask(step)) >> (7 - step);
                    (*row << 1) | bit
                }
                HorizontalEntry::Left => {
                    let bit = (glyph_row & (1 << step)) << (7 - step);
                    (*row >> 1) | bit
                }
            };
        }
        &self.buffer
    }

    /// Slide a glyph fully into view, eight steps
    ///
    /// Whatever was on screen is pushed out as the glyph arrives.
    pub fn scroll_in<'s>(&'s mut self, glyph: &'s Glyph) -> impl Iterator<Item = Frame> + 's {
        (0..FRAME_SIZE as u8).map(move |step| *self.step(glyph, step))
    }

    /// Slide the current content out, eight blank steps
    pub fn scroll_out(&mut self) -> impl Iterator<Item = Frame> + '_ {
        (0..FRAME_SIZE as u8).map(move |step| *self.step(&Glyph::BLANK, step))
    }

    /// Zero the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// A sprite sweeping across the window, cycling through frames
///
/// Step `s` shows `frames[s % frames.len()]`. The sprite enters over the
/// first eight steps and leaves over the next eight.
#[derive(Debug, Clone)]
pub struct Flythrough<'a> {
    frames: &'a [Glyph],
    entry: HorizontalEntry,
    step: usize,
    steps: usize,
    buffer: Frame,
}

impl<'a> Flythrough<'a> {
    pub fn new(frames: &'a [Glyph], entry: HorizontalEntry) -> Self {
        Self {
            frames,
            entry,
            step: 0,
            steps: if frames.is_empty() { 0 } else { FLYTHROUGH_STEPS },
            buffer: Frame::BLANK,
        }
    }

    pub const fn buffer(&self) -> &Frame {
        &self.buffer
    }

    /// Index into the frame list shown at `step`
    pub fn frame_index(&self, step: usize) -> Option<usize> {
        (!self.frames.is_empty()).then(|| step % self.frames.len())
    }

    /// Horizontal placement at `step`; positive is right of centre
    fn offset(&self, step: usize) -> i8 {
        let s = step as i8;
        match self.entry {
            HorizontalEntry::Right => 7 - s,
            HorizontalEntry::Left => s - 7,
        }
    }
}

impl Iterator for Flythrough<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.step >= self.steps {
            self.buffer.clear();
            return None;
        }
        let step = self.step;
        let index = self.frame_index(step)?;
        self.buffer = self.frames[index].frame().shifted(self.offset(step));
        self.step += 1;
        Some(self.buffer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps - self.step;
        (left, Some(left))
    }
}

/// An 8-row viewport sliding over stacked glyphs
#[derive(Debug, Clone)]
pub struct VerticalScroll {
    bitmap: Vec<FrameRow>,
    entry: VerticalEntry,
    position: usize,
    buffer: Frame,
}

impl VerticalScroll {
    /// Stack the glyphs top to bottom, with padding and spacers
    pub fn new(glyphs: &[Glyph], entry: VerticalEntry) -> Self {
        Self {
            bitmap: stack(glyphs),
            entry,
            position: 0,
            buffer: Frame::BLANK,
        }
    }

    /// The stacked bitmap including padding
    pub fn bitmap(&self) -> &[FrameRow] {
        &self.bitmap
    }

    pub const fn buffer(&self) -> &Frame {
        &self.buffer
    }

    /// Total number of viewport positions
    pub fn steps(&self) -> usize {
        self.bitmap.len() + 1 - FRAME_SIZE
    }

    fn window(&self, top: usize) -> Frame {
        let mut rows = [0; FRAME_SIZE];
        if let Some(slice) = self.bitmap.get(top..top + FRAME_SIZE) {
            rows.copy_from_slice(slice);
        }
        Frame::new(rows)
    }
}

impl Iterator for VerticalScroll {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let steps = self.steps();
        if self.position >= steps {
            self.buffer.clear();
            return None;
        }
        let top = match self.entry {
            VerticalEntry::Bottom => self.position,
            VerticalEntry::Top => steps - 1 - self.position,
        };
        self.buffer = self.window(top);
        self.position += 1;
        Some(self.buffer)
    }
}

/// Pad, stack and space glyph rows into one tall bitmap
fn stack(glyphs: &[Glyph]) -> Vec<FrameRow> {
    let mut bitmap = Vec::with_capacity(
        2 * FRAME_SIZE + glyphs.len() * (FRAME_SIZE + VERTICAL_SPACER_ROWS),
    );
    bitmap.extend_from_slice(&[0; FRAME_SIZE]);
    for (i, glyph) in glyphs.iter().enumerate() {
        if i > 0 {
            bitmap.extend_from_slice(&[0; VERTICAL_SPACER_ROWS]);
        }
        bitmap.extend_from_slice(glyph.rows());
    }
    bitmap.extend_from_slice(&[0; FRAME_SIZE]);
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARROW: [u8; 8] = [0x18, 0x3C, 0x7E, 0xFF, 0x18, 0x18, 0x18, 0x18];

    #[test]
    fn test_enter_right_first_step_shows_left_column_at_right_edge() {
        let glyph = Glyph::from_slice(&ARROW);
        let mut scroller = Scroller::new(HorizontalEntry::Right);
        let first = *scroller.step(&glyph, 0);
        // only row 3 has column 0 lit
        assert_eq!(first.rows(), &[0, 0, 0, 0x01, 0, 0, 0, 0]);
    }

    #[test]
    fn test_enter_left_first_step_shows_right_column_at_left_edge() {
        let glyph = Glyph::from_slice(&[0x01, 0, 0, 0, 0, 0, 0, 0x80]);
        let mut scroller = Scroller::new(HorizontalEntry::Left);
        let first = *scroller.step(&glyph, 0);
        assert_eq!(first.rows(), &[0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_chained_glyphs_push_each_other_out() {
        let a = Glyph::from_slice(&[0xFF; 8]);
        let b = Glyph::from_slice(&[0x0F; 8]);
        let mut scroller = Scroller::new(HorizontalEntry::Right);
        scroller.scroll_in(&a).for_each(drop);
        let frames: Vec<Frame> = scroller.scroll_in(&b).collect();
        assert_eq!(frames[3].rows(), &[0xF0; 8]);
        assert_eq!(frames[7], *b.frame());
    }

    #[test]
    fn test_narrow_glyph_contributes_no_extra_bits() {
        let glyph = Glyph::with_width(&[0xFF; 8], 2);
        let mut scroller = Scroller::new(HorizontalEntry::Right);
        let frames: Vec<Frame> = scroller.scroll_in(&glyph).collect();
        assert_eq!(frames[7].rows(), &[0b1100_0000; 8]);
    }

    #[test]
    fn test_flythrough_sweeps_across() {
        let frames = [Glyph::from_slice(&[0x80; 8])];
        let shown: Vec<Frame> = Flythrough::new(&frames, HorizontalEntry::Right).collect();
        assert_eq!(shown.len(), FLYTHROUGH_STEPS);
        assert_eq!(shown[0].rows(), &[0x01; 8]);
        assert_eq!(shown[7].rows(), &[0x80; 8]);
        assert!(shown[8].is_blank());
        assert!(shown[15].is_blank());

        let shown: Vec<Frame> = Flythrough::new(&[Glyph::from_slice(&[0x01; 8])], HorizontalEntry::Left).collect();
        assert_eq!(shown[0].rows(), &[0x80; 8]);
        assert_eq!(shown[7].rows(), &[0x01; 8]);
    }

    #[test]
    fn test_flythrough_without_frames_is_empty() {
        assert_eq!(Flythrough::new(&[], HorizontalEntry::Left).count(), 0);
    }

    #[test]
    fn test_vertical_bitmap_layout() {
        let a = Glyph::from_slice(&[0xAA; 8]);
        let b = Glyph::from_slice(&[0x55; 8]);
        let scroll = VerticalScroll::new(&[a, b], VerticalEntry::Bottom);
        let bitmap = scroll.bitmap();
        assert_eq!(bitmap.len(), 8 + 8 + 1 + 8 + 8);
        assert!(bitmap[..8].iter().all(|&r| r == 0));
        assert!(bitmap[8..16].iter().all(|&r| r == 0xAA));
        assert_eq!(bitmap[16], 0);
        assert!(bitmap[17..25].iter().all(|&r| r == 0x55));
        assert!(bitmap[25..].iter().all(|&r| r == 0));
    }

    #[test]
    fn test_vertical_enter_bottom_moves_content_up() {
        let glyph = Glyph::from_slice(&[0xFF, 0, 0, 0, 0, 0, 0, 0]);
        let frames: Vec<Frame> = VerticalScroll::new(&[glyph], VerticalEntry::Bottom).collect();
        assert!(frames[0].is_blank());
        // the glyph's first row appears on the bottom row first
        assert_eq!(frames[1].rows()[7], 0xFF);
        assert_eq!(frames[2].rows()[6], 0xFF);
        assert_eq!(frames[8].rows()[0], 0xFF);
        assert!(frames.last().is_some_and(Frame::is_blank));
    }

    #[test]
    fn test_vertical_enter_top_moves_content_down() {
        let glyph = Glyph::from_slice(&[0, 0, 0, 0, 0, 0, 0, 0xFF]);
        let frames: Vec<Frame> = VerticalScroll::new(&[glyph], VerticalEntry::Top).collect();
        assert!(frames[0].is_blank());
        assert_eq!(frames[1].rows()[0], 0xFF);
        assert_eq!(frames[8].rows()[7], 0xFF);
        assert!(frames.last().is_some_and(Frame::is_blank));
    }

    fn any_entry() -> impl Strategy<Value = HorizontalEntry> {
        prop_oneof![Just(HorizontalEntry::Left), Just(HorizontalEntry::Right)]
    }

    proptest! {
        #[test]
        fn test_scroll_in_then_out(rows in any::<[u8; 8]>(), entry in any_entry()) {
            let glyph = Glyph::from_slice(&rows);
            let mut scroller = Scroller::new(entry);
            let mut frames: Vec<Frame> = scroller.scroll_in(&glyph).collect();
            frames.extend(scroller.scroll_out());
            prop_assert_eq!(frames.len(), 16);
            prop_assert_eq!(frames[7], *glyph.frame());
            prop_assert!(frames[15].is_blank());
            prop_assert!(scroller.buffer().is_blank());
        }

        #[test]
        fn test_flythrough_cycles_frames(count in 1usize..6, entry in any_entry()) {
            // frame i is a solid bar on column (i + 4) % 8 so every step is recognisable
            let frames: Vec<Glyph> = (0..count)
                .map(|i| Glyph::from_slice(&[column_mask(((i + 4) % 8) as u8); 8]))
                .collect();
            let fly = Flythrough::new(&frames, entry);
            let probe = fly.clone();
            for (step, shown) in fly.enumerate() {
                let expected = frames[step % count].frame().shifted(probe.offset(step));
                prop_assert_eq!(probe.frame_index(step), Some(step % count));
                prop_assert_eq!(shown, expected);
            }
        }
    }
}
