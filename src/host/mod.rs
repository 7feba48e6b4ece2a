//! Host text components.
//!
//! A [`TextComponent`] is the host's text-rendering primitive. It renders
//! the passes a probe describes and later reports how they were laid out.
//! Layout is asynchronous from the probe's point of view: events are queued
//! by the component and pulled one at a time on a later turn of the event
//! loop.
//!
//! [`CellText`] is the default component: terminal cells, Taffy layout and
//! crossterm output.

mod cell_text;

pub use cell_text::CellText;

use crate::error::Result;
use crate::layout::TextLayoutEvent;
use crate::truncation::{ShadowPass, ShadowTicket, VisiblePass};

/// The host text-rendering primitive.
pub trait TextComponent {
    /// Render, or re-render, the visible pass.
    fn render(&mut self, pass: &VisiblePass) -> Result<()>;

    /// Mount a shadow pass off-screen.
    fn mount_shadow(&mut self, pass: &ShadowPass) -> Result<()>;

    /// Remove a shadow pass. Unknown tickets are ignored.
    fn unmount_shadow(&mut self, ticket: ShadowTicket);

    /// Next layout result, in the order the host produced them.
    fn next_layout_event(&mut self) -> Option<TextLayoutEvent>;
}
