//! Render pass descriptions handed to a host text component.
//!
//! The visible pass and the shadow pass are separate types. They share
//! content, style and [`WrapMetrics`]; only the visible pass can carry a
//! line limit.

use std::num::NonZeroU16;

use crate::layout::OFFSCREEN_OFFSET;
use crate::types::{TextStyle, WrapMetrics};

use super::measurement::Epoch;
use super::shadow::ShadowTicket;

/// The line-limited, user-visible render.
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePass {
    pub epoch: Epoch,
    pub content: String,
    /// `None` renders with native unlimited behavior.
    pub line_limit: Option<NonZeroU16>,
    pub style: TextStyle,
    pub wrap: WrapMetrics,
}

/// The unconstrained measurement render.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowPass {
    pub ticket: ShadowTicket,
    pub content: String,
    /// Width to wrap at: the widest line of the visible pass.
    pub width: u16,
    pub style: TextStyle,
    pub wrap: WrapMetrics,
    pub placement: Offscreen,
}

/// Position of a shadow pass outside the viewport.
///
/// Terminal cells have no layers or pointer targets, so keeping the node
/// out of the viewport is all that hides it from drawing and input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offscreen {
    pub x: i32,
    pub y: i32,
}

impl Default for Offscreen {
    fn default() -> Self {
        Self {
            x: OFFSCREEN_OFFSET as i32,
            y: OFFSCREEN_OFFSET as i32,
        }
    }
}
