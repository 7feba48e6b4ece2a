//! Truncation Probe - the dual-measurement state machine.
//!
//! One probe owns all state for one piece of line-limited text:
//!
//! ```text
//! Unmeasured ──visible layout──▶ ShadowPending ──shadow layout──▶ Reconciled
//!     ▲              │                                               │
//!     │              └──── fits under the limit (fast path) ────────▶│
//!     └──────────────────── content / limit / style change ◀─────────┘
//! ```
//!
//! The probe never touches a host. It describes what to render
//! ([`VisiblePass`], [`ShadowPass`]) and consumes the layout events the host
//! produces. Every event handler returns the truncation status to deliver,
//! if the notification gate lets one through.

use std::num::NonZeroU16;

use tracing::{debug, trace};

use crate::layout::{LayoutSource, LineMetrics, TextLayoutEvent};
use crate::types::{ShadowProps, TextStyle, WrapMetrics};

use super::measurement::{Epoch, VisibleMeasurement};
use super::pass::{Offscreen, ShadowPass, VisiblePass};
use super::reconcile::ReconciliationPolicy;
use super::shadow::{ShadowController, ShadowResult, ShadowTicket};

/// Options that do not affect rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeOptions {
    /// Notify on every reconciliation, not only on changes.
    pub truncation_change_immediately: bool,
    /// Wrap metrics mirrored into the shadow pass.
    pub shadow_props: ShadowProps,
}

/// Where the probe is in its measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// No line limit; nothing is measured.
    Disabled,
    /// Waiting for the visible pass to lay out.
    Unmeasured,
    /// Visible pass measured, unconstrained count unknown.
    ShadowPending,
    /// Both counts known.
    Reconciled(bool),
}

/// Truncation state for one piece of line-limited text.
#[derive(Debug)]
pub struct TruncationProbe {
    content: String,
    line_limit: Option<NonZeroU16>,
    style: TextStyle,
    wrap: WrapMetrics,
    shadow_props: ShadowProps,
    epoch: Epoch,
    visible: Option<VisibleMeasurement>,
    shadow: ShadowController,
    policy: ReconciliationPolicy,
}

impl TruncationProbe {
    /// Create a probe. A `number_of_lines` of 0 disables measurement.
    pub fn new(content: impl Into<String>, number_of_lines: u16, options: ProbeOptions) -> Self {
        Self {
            content: content.into(),
            line_limit: NonZeroU16::new(number_of_lines),
            style: TextStyle::default(),
            wrap: WrapMetrics::default(),
            shadow_props: options.shadow_props,
            epoch: Epoch::default(),
            visible: None,
            shadow: ShadowController::new(),
            policy: ReconciliationPolicy::new(options.truncation_change_immediately),
        }
    }

    pub fn with_style(mut self, style: TextStyle, wrap: WrapMetrics) -> Self {
        self.style = style;
        self.wrap = wrap;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn is_enabled(&self) -> bool {
        self.line_limit.is_some()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn line_limit(&self) -> Option<NonZeroU16> {
        self.line_limit
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn visible_measurement(&self) -> Option<VisibleMeasurement> {
        self.visible
    }

    /// Unconstrained line count at the current visible width.
    pub fn unconstrained_line_count(&self) -> Option<u16> {
        let visible = self.visible?;
        self.shadow.unconstrained_at(visible.width)
    }

    pub fn last_notified(&self) -> Option<bool> {
        self.policy.last_notified()
    }

    pub fn state(&self) -> ProbeState {
        if !self.is_enabled() {
            return ProbeState::Disabled;
        }
        let Some(visible) = self.visible else {
            return ProbeState::Unmeasured;
        };
        match self.shadow.unconstrained_at(visible.width) {
            Some(lines) => ProbeState::Reconciled(lines > visible.line_count),
            None => ProbeState::ShadowPending,
        }
    }

    /// Current truncation status, once reconciled.
    pub fn is_truncated(&self) -> Option<bool> {
        match self.state() {
            ProbeState::Reconciled(truncated) => Some(truncated),
            _ => None,
        }
    }

    // =========================================================================
    // Passes
    // =========================================================================

    /// What the host should render visibly.
    pub fn visible_pass(&self) -> VisiblePass {
        VisiblePass {
            epoch: self.epoch,
            content: self.content.clone(),
            line_limit: self.line_limit,
            style: self.style,
            wrap: self.wrap,
        }
    }

    /// The shadow pass that should be mounted right now, if any.
    pub fn shadow_pass(&self) -> Option<ShadowPass> {
        if !self.is_enabled() {
            return None;
        }
        let ticket = self.shadow.pending()?;
        Some(ShadowPass {
            ticket,
            content: self.content.clone(),
            width: ticket.width(),
            style: self.style,
            wrap: self.wrap.mirrored(self.shadow_props),
            placement: Offscreen::default(),
        })
    }

    // =========================================================================
    // Configuration changes
    // =========================================================================

    /// Replace the content. Returns true if it changed (and state was reset).
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if content == self.content {
            return false;
        }
        self.content = content;
        self.reset("content changed");
        true
    }

    /// Change the line limit. 0 disables measurement.
    pub fn set_line_limit(&mut self, number_of_lines: u16) -> bool {
        let limit = NonZeroU16::new(number_of_lines);
        if limit == self.line_limit {
            return false;
        }
        self.line_limit = limit;
        self.reset("line limit changed");
        true
    }

    /// Change style and wrap metrics.
    pub fn set_style(&mut self, style: TextStyle, wrap: WrapMetrics) -> bool {
        if style == self.style && wrap == self.wrap {
            return false;
        }
        self.style = style;
        self.wrap = wrap;
        self.reset("style changed");
        true
    }

    pub fn set_truncation_change_immediately(&mut self, immediate: bool) {
        self.policy.set_immediate(immediate);
    }

    fn reset(&mut self, reason: &'static str) {
        self.epoch = self.epoch.next();
        self.visible = None;
        self.shadow.reset();
        debug!(epoch = self.epoch.get(), reason, "truncation probe reset");
    }

    // =========================================================================
    // Layout events
    // =========================================================================

    /// Route a host layout event to the matching pass handler.
    pub fn handle(&mut self, event: &TextLayoutEvent) -> Option<bool> {
        match event.source {
            LayoutSource::Visible(epoch) => self.on_visible_layout(epoch, &event.lines),
            LayoutSource::Shadow(ticket) => self.on_shadow_layout(ticket, &event.lines),
        }
    }

    /// Layout of the visible, line-limited pass.
    pub fn on_visible_layout(&mut self, epoch: Epoch, lines: &[LineMetrics]) -> Option<bool> {
        let limit = self.line_limit?;
        if epoch != self.epoch {
            trace!(event = epoch.get(), current = self.epoch.get(), "ignoring stale visible layout");
            return None;
        }
        let Some(measured) = VisibleMeasurement::from_lines(epoch, lines) else {
            trace!("ignoring empty visible layout");
            return None;
        };
        self.visible = Some(measured);

        if measured.line_count < limit.get() {
            // Fewer lines than allowed: nothing can be cut off.
            self.shadow.settle(measured.width, measured.line_count);
        } else if let Some(ticket) = self.shadow.require(epoch, measured.width) {
            debug!(
                ticket = ticket.id(),
                width = measured.width,
                lines = measured.line_count,
                "shadow measurement requested"
            );
        }

        self.reconcile()
    }

    /// Layout of an unconstrained shadow pass.
    pub fn on_shadow_layout(&mut self, ticket: ShadowTicket, lines: &[LineMetrics]) -> Option<bool> {
        match self.shadow.accept(ticket, lines) {
            ShadowResult::Accepted(count) => {
                debug!(ticket = ticket.id(), lines = count, "shadow measurement complete");
                self.reconcile()
            }
            ShadowResult::Stale => {
                debug!(ticket = ticket.id(), epoch = ticket.epoch().get(), "discarding stale shadow layout");
                None
            }
            ShadowResult::Empty => {
                trace!(ticket = ticket.id(), "ignoring empty shadow layout");
                None
            }
        }
    }

    fn reconcile(&mut self) -> Option<bool> {
        let visible = self.visible?;
        let unconstrained = self.shadow.unconstrained_at(visible.width)?;
        let truncated = unconstrained > visible.line_count;

        let notify = self.policy.observe(truncated);
        if notify.is_some() {
            debug!(truncated, unconstrained, visible = visible.line_count, "truncation status");
        }
        notify
    }
}
