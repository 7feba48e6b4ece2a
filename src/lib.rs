//! # spark-truncate
//!
//! Truncation detection for line-limited terminal text.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! Text rendered with a line limit cannot tell whether it was cut off. The
//! answer comes from rendering it twice and comparing line counts:
//!
//! ```text
//! visible pass (limited) ──layout──▶ width + shown lines ─┐
//!                                                         ├─▶ truncated?
//! shadow pass (off-screen, unlimited, same width) ──────▶ ┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Style, wrap metrics, attributes
//! - [`layout`] - Cell width measurement, wrapping, Taffy node layout
//! - [`truncation`] - The probe state machine (visible/shadow/reconcile)
//! - [`host`] - Host text components ([`CellText`] is the default)
//! - [`primitives`] - The reactive [`truncation_text`] primitive

pub mod error;
pub mod host;
pub mod layout;
pub mod primitives;
pub mod truncation;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use error::{Error, Result};

pub use host::{CellText, TextComponent};

pub use layout::{
    LayoutSource, LineMetrics, NodeFrame, TextLayoutEvent, measure_lines, string_width, wrap_text,
};

pub use truncation::{
    Epoch, Offscreen, ProbeOptions, ProbeState, ShadowPass, ShadowTicket, TruncationProbe,
    VisibleMeasurement, VisiblePass,
};

pub use primitives::{
    Cleanup, PropValue, SharedTextComponent, TextLayoutCallback, TruncationCallback,
    TruncationText, TruncationTextProps, truncation_text,
};
