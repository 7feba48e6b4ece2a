//! Visible-pass measurement and content epochs.

use crate::layout::LineMetrics;

/// Content epoch: a period during which content, line limit and style stay
/// identical. Every reset moves to a new epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Epoch {
        Epoch(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// What the line-limited pass rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleMeasurement {
    /// Epoch of the render that produced this measurement.
    pub epoch: Epoch,
    /// Widest rendered line, in cells.
    pub width: u16,
    /// Number of rendered lines (at most the line limit).
    pub line_count: u16,
}

impl VisibleMeasurement {
    /// Build a measurement from a layout event's lines.
    ///
    /// Returns `None` for an empty layout.
    pub fn from_lines(epoch: Epoch, lines: &[LineMetrics]) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            epoch,
            width: lines.iter().map(|l| l.width).max().unwrap_or(0),
            line_count: line_count(lines),
        })
    }
}

/// Line count of a layout, saturating at `u16::MAX`.
pub(crate) fn line_count(lines: &[LineMetrics]) -> u16 {
    lines.len().min(u16::MAX as usize) as u16
}
