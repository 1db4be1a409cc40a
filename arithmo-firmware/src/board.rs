//! Board wiring for the segment output port
//!
//! Eight GPIO lines drive the segments, one more switches the transistor
//! that connects the display common to ground.

use embassy_rp::gpio::{Level, Output};

use arithmo_core::traits::SegmentPort;

/// The display output lines, segment *i* on `segments[i]`
pub struct SegmentPins {
    segments: [Output<'static>; 8],
    _enable: Output<'static>,
}

impl SegmentPins {
    /// Take ownership of the lines and power the display common
    pub fn new(segments: [Output<'static>; 8], mut enable: Output<'static>) -> Self {
        enable.set_high();
        Self {
            segments,
            _enable: enable,
        }
    }
}

impl SegmentPort for SegmentPins {
    fn write_pattern(&mut self, pattern: u8) {
        // One pass over all lines: every segment settles before the next
        // byte can arrive at the link's line rate
        for (bit, line) in self.segments.iter_mut().enumerate() {
            line.set_level(if pattern & (1 << bit) != 0 {
                Level::High
            } else {
                Level::Low
            });
        }
    }
}
