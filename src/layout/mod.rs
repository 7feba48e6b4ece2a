//! Layout Module
//!
//! Cell-based text measurement and node layout for terminal text.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) to
//! place text nodes:
//!
//! 1. A viewport container holds exactly one text leaf
//! 2. The leaf carries a measure context (content + wrap metrics)
//! 3. The measure function wraps text with Unicode-aware cell widths
//! 4. The resulting frame is read back as a [`NodeFrame`]
//!
//! Text measurement lives in [`text_measure`] and is shared by every
//! render pass so that widths stay comparable.

mod types;
mod text_measure;
mod taffy_bridge;

pub use types::*;
pub use text_measure::*;
pub use taffy_bridge::{layout_text_node, NodePlacement, OFFSCREEN_OFFSET};
