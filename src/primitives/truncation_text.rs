//! Truncation Text Primitive - line-limited text that knows when it is cut off.
//!
//! Wraps a [`TruncationProbe`] around a host [`TextComponent`]:
//!
//! 1. Renders the visible pass with the line limit
//! 2. Routes the host's layout events into the probe
//! 3. Mounts the shadow pass while the probe wants one, unmounts it after
//! 4. Forwards visible layout events and truncation changes to callbacks
//!
//! # Reactivity
//!
//! `content` and `number_of_lines` are read inside an effect. When a signal
//! or getter source changes, the probe resets and the visible pass renders
//! again.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_signals::signal;
//! use spark_truncate::primitives::{truncation_text, TruncationTextProps, PropValue};
//!
//! let content = signal("A long paragraph...".to_string());
//! let text = truncation_text(TruncationTextProps {
//!     content: PropValue::Signal(content.clone()),
//!     number_of_lines: 2.into(),
//!     on_truncation_change: Some(Rc::new(|cut| println!("truncated: {cut}"))),
//!     ..Default::default()
//! });
//!
//! text.pump()?;                   // deliver pending layout events
//! content.set("short".into());    // resets and re-renders
//! text.pump()?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;
use tracing::{trace, warn};

use crate::error::Result;
use crate::host::CellText;
use crate::layout::{LayoutSource, TextLayoutEvent};
use crate::truncation::{
    Epoch, ProbeOptions, ProbeState, ShadowTicket, TruncationProbe, VisibleMeasurement,
};
use crate::types::{TextStyle, WrapMetrics};

use super::types::{
    Cleanup, SharedTextComponent, TextLayoutCallback, TruncationCallback, TruncationTextProps,
};

/// Container width of the default host component.
pub const DEFAULT_CONTAINER_WIDTH: u16 = 80;

// =============================================================================
// Shared State
// =============================================================================

struct Inner {
    probe: RefCell<TruncationProbe>,
    component: SharedTextComponent,
    mounted_shadow: Cell<Option<ShadowTicket>>,
    on_truncation_change: Option<TruncationCallback>,
    on_text_layout: Option<TextLayoutCallback>,
}

impl Inner {
    fn render_visible(&self) -> Result<()> {
        let pass = self.probe.borrow().visible_pass();
        self.component.borrow_mut().render(&pass)
    }

    /// Make the host's mounted shadow match what the probe wants.
    fn sync_shadow(&self) -> Result<()> {
        let desired = self.probe.borrow().shadow_pass();
        let mounted = self.mounted_shadow.get();
        if mounted == desired.as_ref().map(|p| p.ticket) {
            return Ok(());
        }

        let mut component = self.component.borrow_mut();
        if let Some(ticket) = mounted {
            trace!(ticket = ticket.id(), "unmounting shadow pass");
            component.unmount_shadow(ticket);
            self.mounted_shadow.set(None);
        }
        if let Some(pass) = desired {
            trace!(ticket = pass.ticket.id(), width = pass.width, "mounting shadow pass");
            component.mount_shadow(&pass)?;
            self.mounted_shadow.set(Some(pass.ticket));
        }
        Ok(())
    }

    /// Re-render after a reset, if one happened.
    fn refresh(&self, changed: bool) -> Result<()> {
        if !changed {
            return Ok(());
        }
        self.render_visible()?;
        self.sync_shadow()
    }

    fn apply_props(&self, content: String, number_of_lines: u16) -> Result<()> {
        let changed = {
            let mut probe = self.probe.borrow_mut();
            let content_changed = probe.set_content(content);
            let limit_changed = probe.set_line_limit(number_of_lines);
            content_changed || limit_changed
        };
        self.refresh(changed)
    }

    /// Feed one layout event. Callbacks run after all state is committed
    /// and no borrow is held, so they may update props.
    fn dispatch(&self, event: TextLayoutEvent) -> Result<()> {
        let notify = self.probe.borrow_mut().handle(&event);
        let synced = self.sync_shadow();

        if matches!(event.source, LayoutSource::Visible(_)) {
            if let Some(on_text_layout) = &self.on_text_layout {
                on_text_layout(&event);
            }
        }
        if let (Some(truncated), Some(on_change)) = (notify, &self.on_truncation_change) {
            on_change(truncated);
        }
        synced
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Handle to a mounted truncation text.
pub struct TruncationText {
    inner: Rc<Inner>,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

/// Create line-limited text that reports whether it is truncated.
///
/// The visible pass is rendered immediately; layout events are delivered
/// by [`TruncationText::pump`] or [`TruncationText::dispatch_next`].
pub fn truncation_text(props: TruncationTextProps) -> TruncationText {
    let TruncationTextProps {
        content,
        number_of_lines,
        style,
        wrap,
        text_component,
        on_truncation_change,
        truncation_change_immediately,
        required_props,
        on_text_layout,
    } = props;

    let component: SharedTextComponent = text_component
        .unwrap_or_else(|| Rc::new(RefCell::new(CellText::new(DEFAULT_CONTAINER_WIDTH))));

    let options = ProbeOptions {
        truncation_change_immediately,
        shadow_props: required_props.unwrap_or_default(),
    };
    let probe = TruncationProbe::new(content.get(), number_of_lines.get(), options)
        .with_style(style, wrap);

    let inner = Rc::new(Inner {
        probe: RefCell::new(probe),
        component,
        mounted_shadow: Cell::new(None),
        on_truncation_change,
        on_text_layout,
    });

    if let Err(err) = inner.render_visible() {
        warn!(%err, "initial truncation text render failed");
    }

    // Runs once now (no change), then whenever a reactive source changes.
    let effect_inner = inner.clone();
    let stop = effect(move || {
        let content = content.get();
        let number_of_lines = number_of_lines.get();
        if let Err(err) = effect_inner.apply_props(content, number_of_lines) {
            warn!(%err, "truncation text update failed");
        }
    });

    TruncationText {
        inner,
        stop_effect: Some(Box::new(stop)),
    }
}

impl TruncationText {
    /// Deliver every queued layout event. Returns how many were handled.
    pub fn pump(&self) -> Result<usize> {
        let mut handled = 0;
        while self.dispatch_next()? {
            handled += 1;
        }
        Ok(handled)
    }

    /// Deliver the next queued layout event, if any.
    pub fn dispatch_next(&self) -> Result<bool> {
        let next = self.inner.component.borrow_mut().next_layout_event();
        match next {
            Some(event) => {
                self.inner.dispatch(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Feed a layout event produced outside the component's queue.
    pub fn handle_layout(&self, event: TextLayoutEvent) -> Result<()> {
        self.inner.dispatch(event)
    }

    /// Change style and wrap metrics. Resets measurement when they differ.
    pub fn set_style(&self, style: TextStyle, wrap: WrapMetrics) -> Result<()> {
        let changed = self.inner.probe.borrow_mut().set_style(style, wrap);
        self.inner.refresh(changed)
    }

    pub fn set_truncation_change_immediately(&self, immediate: bool) {
        self.inner
            .probe
            .borrow_mut()
            .set_truncation_change_immediately(immediate);
    }

    pub fn state(&self) -> ProbeState {
        self.inner.probe.borrow().state()
    }

    pub fn is_truncated(&self) -> Option<bool> {
        self.inner.probe.borrow().is_truncated()
    }

    pub fn last_notified(&self) -> Option<bool> {
        self.inner.probe.borrow().last_notified()
    }

    pub fn epoch(&self) -> Epoch {
        self.inner.probe.borrow().epoch()
    }

    pub fn visible_measurement(&self) -> Option<VisibleMeasurement> {
        self.inner.probe.borrow().visible_measurement()
    }

    pub fn unconstrained_line_count(&self) -> Option<u16> {
        self.inner.probe.borrow().unconstrained_line_count()
    }

    /// Shadow pass currently mounted on the host.
    pub fn mounted_shadow(&self) -> Option<ShadowTicket> {
        self.inner.mounted_shadow.get()
    }

    /// The host component this text renders into.
    pub fn component(&self) -> SharedTextComponent {
        self.inner.component.clone()
    }

    /// Stop tracking props and unmount the shadow pass.
    pub fn cleanup(mut self) {
        self.teardown();
    }

    /// Convert into a boxed cleanup function.
    pub fn into_cleanup(self) -> Cleanup {
        Box::new(move || self.cleanup())
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(ticket) = self.inner.mounted_shadow.take() {
            if let Ok(mut component) = self.inner.component.try_borrow_mut() {
                component.unmount_shadow(ticket);
            }
        }
    }
}

impl Drop for TruncationText {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LineMetrics;
    use crate::primitives::PropValue;
    use crate::truncation::{ShadowPass, VisiblePass};
    use crate::host::TextComponent;
    use spark_signals::signal;
    use std::collections::VecDeque;

    const LONG: &str = "The quick brown fox jumps over the lazy dog while the cat watches from the fence nearby";

    /// Host that records calls and reports scripted line counts.
    #[derive(Default)]
    struct ScriptedHost {
        visible_lines: usize,
        shadow_lines: usize,
        renders: Vec<VisiblePass>,
        mounts: Vec<ShadowPass>,
        unmounts: Vec<ShadowTicket>,
        queue: VecDeque<TextLayoutEvent>,
    }

    impl ScriptedHost {
        fn shared(visible_lines: usize, shadow_lines: usize) -> Rc<RefCell<ScriptedHost>> {
            Rc::new(RefCell::new(ScriptedHost {
                visible_lines,
                shadow_lines,
                ..Default::default()
            }))
        }

        fn lines(n: usize) -> Vec<LineMetrics> {
            (0..n).map(|_| LineMetrics::new("xxxxxxxxxx", 10)).collect()
        }
    }

    impl TextComponent for ScriptedHost {
        fn render(&mut self, pass: &VisiblePass) -> Result<()> {
            let limit = pass.line_limit.map_or(usize::MAX, |l| l.get() as usize);
            self.queue.push_back(TextLayoutEvent {
                source: LayoutSource::Visible(pass.epoch),
                frame: Default::default(),
                lines: Self::lines(self.visible_lines.min(limit)),
            });
            self.renders.push(pass.clone());
            Ok(())
        }

        fn mount_shadow(&mut self, pass: &ShadowPass) -> Result<()> {
            self.queue.push_back(TextLayoutEvent {
                source: LayoutSource::Shadow(pass.ticket),
                frame: Default::default(),
                lines: Self::lines(self.shadow_lines),
            });
            self.mounts.push(pass.clone());
            Ok(())
        }

        fn unmount_shadow(&mut self, ticket: ShadowTicket) {
            self.unmounts.push(ticket);
        }

        fn next_layout_event(&mut self) -> Option<TextLayoutEvent> {
            self.queue.pop_front()
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, TruncationCallback) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        (calls, Rc::new(move |truncated: bool| sink.borrow_mut().push(truncated)))
    }

    #[test]
    fn test_fitting_text_never_mounts_shadow() {
        let host = ScriptedHost::shared(1, 1);
        let (calls, on_change) = recorder();

        let text = truncation_text(TruncationTextProps {
            content: "a short line".into(),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(on_change),
            ..Default::default()
        });

        assert_eq!(text.pump().unwrap(), 1);
        assert_eq!(*calls.borrow(), vec![false]);
        assert!(host.borrow().mounts.is_empty());
        assert_eq!(text.state(), ProbeState::Reconciled(false));
    }

    #[test]
    fn test_truncated_text_mounts_and_unmounts_shadow() {
        let host = ScriptedHost::shared(5, 5);
        let (calls, on_change) = recorder();

        let text = truncation_text(TruncationTextProps {
            content: LONG.into(),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(on_change),
            ..Default::default()
        });

        assert!(text.dispatch_next().unwrap());
        let ticket = text.mounted_shadow().unwrap();
        assert_eq!(host.borrow().mounts.len(), 1);
        assert_eq!(host.borrow().mounts[0].width, 10);

        assert!(text.dispatch_next().unwrap());
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(text.mounted_shadow(), None);
        assert_eq!(host.borrow().unmounts, vec![ticket]);
    }

    #[test]
    fn test_signal_content_change_restarts_cycle() {
        let host = ScriptedHost::shared(5, 5);
        let (calls, on_change) = recorder();
        let content = signal(LONG.to_string());

        let text = truncation_text(TruncationTextProps {
            content: PropValue::Signal(content.clone()),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(on_change),
            ..Default::default()
        });
        text.pump().unwrap();
        assert_eq!(*calls.borrow(), vec![true]);
        let first_epoch = text.epoch();

        host.borrow_mut().visible_lines = 1;
        content.set("short".to_string());

        assert_ne!(text.epoch(), first_epoch);
        assert_eq!(host.borrow().renders.len(), 2);
        assert_eq!(host.borrow().renders[1].content, "short");

        text.pump().unwrap();
        assert_eq!(*calls.borrow(), vec![true, false]);
    }

    #[test]
    fn test_layout_events_are_forwarded() {
        let host = ScriptedHost::shared(5, 9);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let text = truncation_text(TruncationTextProps {
            content: LONG.into(),
            number_of_lines: 3.into(),
            text_component: Some(host.clone()),
            on_text_layout: Some(Rc::new(move |event: &TextLayoutEvent| {
                sink.borrow_mut().push(event.clone())
            })),
            ..Default::default()
        });
        text.pump().unwrap();

        // Only the visible layout reaches the caller, untouched.
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].line_count(), 3);
        assert!(matches!(seen[0].source, LayoutSource::Visible(_)));
    }

    #[test]
    fn test_disabled_forwards_layout_without_notifying() {
        let host = ScriptedHost::shared(5, 5);
        let (calls, on_change) = recorder();
        let forwarded = Rc::new(Cell::new(0));
        let count = forwarded.clone();

        let text = truncation_text(TruncationTextProps {
            content: LONG.into(),
            number_of_lines: 0.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(on_change),
            on_text_layout: Some(Rc::new(move |_: &TextLayoutEvent| count.set(count.get() + 1))),
            ..Default::default()
        });
        text.pump().unwrap();

        assert_eq!(forwarded.get(), 1);
        assert!(calls.borrow().is_empty());
        assert!(host.borrow().mounts.is_empty());
        assert!(host.borrow().renders[0].line_limit.is_none());
        assert_eq!(text.state(), ProbeState::Disabled);
    }

    #[test]
    fn test_immediate_mode_notifies_every_reconciliation() {
        let host = ScriptedHost::shared(1, 1);
        let (calls, on_change) = recorder();

        let text = truncation_text(TruncationTextProps {
            content: "short".into(),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(on_change),
            truncation_change_immediately: true,
            ..Default::default()
        });
        text.pump().unwrap();

        // Host re-lays out the same text.
        let pass = host.borrow().renders[0].clone();
        host.borrow_mut().render(&pass).unwrap();
        text.pump().unwrap();

        assert_eq!(*calls.borrow(), vec![false, false]);
    }

    #[test]
    fn test_callback_may_update_content() {
        let host = ScriptedHost::shared(1, 1);
        let content = signal("first".to_string());
        let writer = content.clone();

        let text = truncation_text(TruncationTextProps {
            content: PropValue::Signal(content.clone()),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            on_truncation_change: Some(Rc::new(move |_: bool| {
                writer.set("second".to_string());
            })),
            ..Default::default()
        });
        text.pump().unwrap();

        assert_eq!(host.borrow().renders.last().unwrap().content, "second");
        assert_eq!(text.last_notified(), Some(false));
    }

    #[test]
    fn test_style_change_rerenders() {
        let host = ScriptedHost::shared(1, 1);
        let text = truncation_text(TruncationTextProps {
            content: "short".into(),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            ..Default::default()
        });
        text.pump().unwrap();

        text.set_style(TextStyle::default(), WrapMetrics::default()).unwrap();
        assert_eq!(host.borrow().renders.len(), 1);

        let wrap = WrapMetrics {
            letter_spacing: 1,
            ..WrapMetrics::default()
        };
        text.set_style(TextStyle::default(), wrap).unwrap();
        assert_eq!(host.borrow().renders.len(), 2);
        assert_eq!(text.state(), ProbeState::Unmeasured);
    }

    #[test]
    fn test_cleanup_unmounts_pending_shadow() {
        let host = ScriptedHost::shared(5, 5);
        let text = truncation_text(TruncationTextProps {
            content: LONG.into(),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            ..Default::default()
        });
        text.dispatch_next().unwrap();
        let ticket = text.mounted_shadow().unwrap();

        text.cleanup();
        assert_eq!(host.borrow().unmounts, vec![ticket]);
    }

    #[test]
    fn test_into_cleanup_stops_tracking_props() {
        let host = ScriptedHost::shared(5, 5);
        let content = signal(LONG.to_string());
        let text = truncation_text(TruncationTextProps {
            content: PropValue::Signal(content.clone()),
            number_of_lines: 2.into(),
            text_component: Some(host.clone()),
            ..Default::default()
        });
        text.dispatch_next().unwrap();
        let ticket = text.mounted_shadow().unwrap();

        let cleanup = text.into_cleanup();
        assert!(host.borrow().unmounts.is_empty());
        cleanup();
        assert_eq!(host.borrow().unmounts, vec![ticket]);

        content.set("changed".to_string());
        assert_eq!(host.borrow().renders.len(), 1);
    }

    #[test]
    fn test_default_component_is_cell_text() {
        let (calls, on_change) = recorder();
        let text = truncation_text(TruncationTextProps {
            content: "a short line".into(),
            number_of_lines: 2.into(),
            on_truncation_change: Some(on_change),
            ..Default::default()
        });
        text.pump().unwrap();
        assert_eq!(*calls.borrow(), vec![false]);
    }
}
