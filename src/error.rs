//! Error types for host-side operations.
//!
//! The truncation protocol itself never fails; only laying out and drawing
//! text through a host can.

use thiserror::Error;

/// Errors raised by text components.
#[derive(Debug, Error)]
pub enum Error {
    /// The layout engine rejected a node or tree operation.
    #[error("text layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// Writing to the terminal failed.
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
