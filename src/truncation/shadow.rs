//! Shadow Measurement Controller
//!
//! Decides when an unconstrained, invisible measurement pass is needed and
//! records its result. A shadow result is only meaningful for the width it
//! was measured at, so results are keyed by width.
//!
//! Every mounted pass gets a fresh [`ShadowTicket`]. A layout result is
//! accepted only when it carries the ticket that is currently pending;
//! anything else belongs to an earlier epoch or width and is dropped.

use crate::layout::LineMetrics;

use super::measurement::{Epoch, line_count};

/// Identity of one shadow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadowTicket {
    id: u64,
    epoch: Epoch,
    width: u16,
}

impl ShadowTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Content epoch the pass was issued for.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Width constraint of the pass.
    pub fn width(&self) -> u16 {
        self.width
    }
}

/// Result of feeding a shadow layout into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowResult {
    /// The unconstrained line count was recorded.
    Accepted(u16),
    /// The ticket is not the pending one.
    Stale,
    /// The layout had no lines; nothing changed.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Measured {
    width: u16,
    lines: u16,
}

/// Tracks the pending shadow pass and the last unconstrained line count.
#[derive(Debug, Default)]
pub struct ShadowController {
    issued: u64,
    pending: Option<ShadowTicket>,
    measured: Option<Measured>,
}

impl ShadowController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything measured or pending. Ticket ids keep increasing.
    pub fn reset(&mut self) {
        self.pending = None;
        self.measured = None;
    }

    /// The pass that should currently be mounted, if any.
    pub fn pending(&self) -> Option<ShadowTicket> {
        self.pending
    }

    /// Unconstrained line count known for `width`.
    pub fn unconstrained_at(&self, width: u16) -> Option<u16> {
        self.measured
            .filter(|m| m.width == width)
            .map(|m| m.lines)
    }

    /// Ask for a measurement at `width`.
    ///
    /// Returns the ticket only when a new pass was issued. A known result
    /// for `width` cancels any pass pending for another width.
    pub fn require(&mut self, epoch: Epoch, width: u16) -> Option<ShadowTicket> {
        if self.unconstrained_at(width).is_some() {
            self.pending = None;
            return None;
        }
        if let Some(p) = self.pending {
            if p.epoch == epoch && p.width == width {
                return None;
            }
        }

        self.issued += 1;
        let ticket = ShadowTicket {
            id: self.issued,
            epoch,
            width,
        };
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Record a count known without a shadow pass (the text fits).
    pub fn settle(&mut self, width: u16, lines: u16) {
        self.pending = None;
        self.measured = Some(Measured { width, lines });
    }

    /// Feed the layout result of a shadow pass.
    pub fn accept(&mut self, ticket: ShadowTicket, lines: &[LineMetrics]) -> ShadowResult {
        if self.pending != Some(ticket) {
            return ShadowResult::Stale;
        }
        if lines.is_empty() {
            return ShadowResult::Empty;
        }

        let count = line_count(lines);
        self.pending = None;
        self.measured = Some(Measured {
            width: ticket.width,
            lines: count,
        });
        ShadowResult::Accepted(count)
    }
}
