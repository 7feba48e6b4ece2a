//! TUI Primitives - Component building blocks.
//!
//! - [`truncation_text`] - Line-limited text that reports truncation
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `number_of_lines: 2.into()`
//! - Signals: `content: PropValue::Signal(my_signal)` (stays connected!)
//! - Getters: `content: PropValue::Getter(Rc::new(|| compute()))`
//!
//! Pass signals directly - don't extract values before binding!
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! truncation_text(TruncationTextProps { content: PropValue::Signal(content), ..default });
//!
//! // WRONG - extracts value, breaks reactivity
//! truncation_text(TruncationTextProps { content: PropValue::Static(content.get()), ..default });
//! ```

mod types;
mod truncation_text;

pub use types::*;
pub use truncation_text::{truncation_text, TruncationText, DEFAULT_CONTAINER_WIDTH};
