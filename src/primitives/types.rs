//! Primitive types - Props and cleanup.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::Signal;

use crate::host::TextComponent;
use crate::layout::TextLayoutEvent;
use crate::types::{ShadowProps, TextStyle, WrapMetrics};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Truncation change callback. Receives `true` when text is cut off.
pub type TruncationCallback = Rc<dyn Fn(bool)>;

/// Layout callback. Receives every visible-pass layout event unmodified.
pub type TextLayoutCallback = Rc<dyn Fn(&TextLayoutEvent)>;

/// A host text component shared between the caller and the primitive.
pub type SharedTextComponent = Rc<RefCell<dyn TextComponent>>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Read inside an effect, signals and getters keep the primitive connected
/// to their source.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Truncation Text Props
// =============================================================================

/// Properties for the truncation text primitive.
#[derive(Default)]
pub struct TruncationTextProps {
    /// Text to render and measure.
    pub content: PropValue<String>,
    /// Maximum visible lines. 0 disables truncation detection.
    pub number_of_lines: PropValue<u16>,

    /// Cosmetic style, forwarded to both passes.
    pub style: TextStyle,
    /// Wrap-affecting metrics of the visible pass.
    pub wrap: WrapMetrics,

    /// Alternate host component. Defaults to an 80-column [`CellText`](crate::host::CellText).
    pub text_component: Option<SharedTextComponent>,

    /// Called with the truncation status when it changes.
    pub on_truncation_change: Option<TruncationCallback>,
    /// Call `on_truncation_change` on every reconciliation.
    pub truncation_change_immediately: bool,
    /// Wrap metrics mirrored into the shadow pass. `None` mirrors all.
    pub required_props: Option<ShadowProps>,
    /// Receives visible-pass layout events.
    pub on_text_layout: Option<TextLayoutCallback>,
}
