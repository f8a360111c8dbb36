pub mod glyphs;
pub mod panel;

use std::time::Duration;

use glyphs::{COUNTDOWN, Glyph};

pub use panel::MatrixPanel;

pub fn print_banner() {
    println!("gesturelink");
}

/// The node's 5x5 matrix indicator seam. Everything user-visible on a
/// node goes through this, including failure display.
pub trait Indicator {
    /// Replace the whole panel with a glyph.
    fn show(&mut self, glyph: &Glyph);

    /// Turn every pixel off.
    fn clear(&mut self);

    /// Light a single pixel at full brightness.
    fn set_pixel(&mut self, x: usize, y: usize);

    /// Clear, then light every pixel from (0, 0) row by row up to and
    /// including (x, y). Used as a coarse progress fill.
    fn fill_until(&mut self, x: usize, y: usize);
}

/// Play the countdown digits before a burst, one per tick. The length
/// clamps to the available digit images (1-3 seconds).
pub fn countdown(indicator: &mut impl Indicator, seconds: u64, tick: Duration) {
    let t = seconds.clamp(1, COUNTDOWN.len() as u64) as usize;
    for digit in &COUNTDOWN[COUNTDOWN.len() - t..] {
        indicator.show(digit);
        std::thread::sleep(tick);
    }
}

/// What a `RecordingIndicator` saw, for assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    Shown(Glyph),
    Cleared,
    Pixel(usize, usize),
    Filled(usize, usize),
}

/// Indicator double that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub events: Vec<IndicatorEvent>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for RecordingIndicator {
    fn show(&mut self, glyph: &Glyph) {
        self.events.push(IndicatorEvent::Shown(*glyph));
    }

    fn clear(&mut self) {
        self.events.push(IndicatorEvent::Cleared);
    }

    fn set_pixel(&mut self, x: usize, y: usize) {
        self.events.push(IndicatorEvent::Pixel(x, y));
    }

    fn fill_until(&mut self, x: usize, y: usize) {
        self.events.push(IndicatorEvent::Filled(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_clamps_and_plays_trailing_digits() {
        let mut indicator = RecordingIndicator::new();
        countdown(&mut indicator, 2, Duration::ZERO);
        assert_eq!(
            indicator.events,
            vec![
                IndicatorEvent::Shown(COUNTDOWN[1]),
                IndicatorEvent::Shown(COUNTDOWN[2]),
            ]
        );

        let mut indicator = RecordingIndicator::new();
        countdown(&mut indicator, 99, Duration::ZERO);
        assert_eq!(indicator.events.len(), 3);

        let mut indicator = RecordingIndicator::new();
        countdown(&mut indicator, 0, Duration::ZERO);
        assert_eq!(indicator.events, vec![IndicatorEvent::Shown(COUNTDOWN[2])]);
    }
}
