//! Layout result types.

use crate::truncation::{Epoch, ShadowTicket};

/// One rendered line as reported by the host layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineMetrics {
    /// Text rendered on this line.
    pub text: String,
    /// Width in terminal cells.
    pub width: u16,
}

impl LineMetrics {
    pub fn new(text: impl Into<String>, width: u16) -> Self {
        Self {
            text: text.into(),
            width,
        }
    }
}

/// Position and size of a laid out text node, in cells.
///
/// Coordinates are signed: the shadow measurement node lives far outside
/// the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeFrame {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl NodeFrame {
    /// True if any part of the frame intersects a `width` x `height`
    /// viewport anchored at the origin.
    pub fn intersects_viewport(&self, width: u16, height: u16) -> bool {
        let right = self.x + self.width as i32;
        let bottom = self.y + self.height as i32;
        right > 0 && bottom > 0 && self.x < width as i32 && self.y < height as i32
    }
}

/// Which render pass produced a layout event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// The line-limited pass, rendered for the given content epoch.
    Visible(Epoch),
    /// An unconstrained shadow pass.
    Shadow(ShadowTicket),
}

/// Layout result delivered by a host text component.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayoutEvent {
    pub source: LayoutSource,
    pub frame: NodeFrame,
    pub lines: Vec<LineMetrics>,
}

impl TextLayoutEvent {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
