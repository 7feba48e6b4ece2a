//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Lays out a single text node inside a viewport and reports its frame.
//! Two placements exist:
//!
//! - [`NodePlacement::Flow`]: the visible node, a flex item of a column
//!   container whose width is the available container width.
//! - [`NodePlacement::Offscreen`]: the shadow node, absolutely positioned
//!   outside the viewport (by default at [`OFFSCREEN_OFFSET`]) with a fixed
//!   width so it wraps at exactly the width the visible pass rendered at.

use taffy::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, LengthPercentageAuto, NodeId,
    Position, Rect, Size, Style, TaffyTree,
};

use crate::error::Result;
use crate::types::WrapMetrics;

use super::text_measure::measure_lines;
use super::types::NodeFrame;

/// Default offset applied to both axes of an off-screen node.
pub const OFFSCREEN_OFFSET: f32 = -99_999.0;

/// Where a text node is placed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePlacement {
    /// In normal flow, wrapping within the container width.
    Flow { container_width: u16 },
    /// Out of flow at (`x`, `y`), wrapping at exactly `width`.
    Offscreen { x: i32, y: i32, width: u16 },
}

/// Measure context stored on the text leaf.
struct TextNode {
    content: String,
    metrics: WrapMetrics,
    line_limit: Option<usize>,
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn viewport_style(width: u16) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        align_items: Some(AlignItems::FlexStart),
        size: Size {
            width: Dimension::Length(width as f32),
            height: Dimension::Auto,
        },
        ..Default::default()
    }
}

fn text_style(placement: NodePlacement) -> Style {
    match placement {
        NodePlacement::Flow { container_width } => Style {
            max_size: Size {
                width: Dimension::Length(container_width as f32),
                height: Dimension::Auto,
            },
            ..Default::default()
        },
        NodePlacement::Offscreen { x, y, width } => Style {
            position: Position::Absolute,
            inset: Rect {
                left: LengthPercentageAuto::Length(x as f32),
                top: LengthPercentageAuto::Length(y as f32),
                right: LengthPercentageAuto::Auto,
                bottom: LengthPercentageAuto::Auto,
            },
            size: Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Auto,
            },
            ..Default::default()
        },
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for the text leaf.
fn measure_text(
    node: &TextNode,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let wrap_width = match (known_dimensions.width, available_space.width) {
        (Some(w), _) => w as usize,
        (None, AvailableSpace::Definite(w)) => w as usize,
        (None, AvailableSpace::MinContent) => 1,
        // 0 disables soft wrapping
        (None, AvailableSpace::MaxContent) => 0,
    };

    let lines = measure_lines(&node.content, wrap_width, &node.metrics);
    let shown = node.line_limit.map_or(lines.len(), |limit| lines.len().min(limit));
    let width = lines.iter().take(shown).map(|l| l.width).max().unwrap_or(0);

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(shown as f32),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute the frame of a text node.
///
/// `line_limit` caps the measured height; `None` lets the node grow to the
/// full wrapped height.
pub fn layout_text_node(
    content: &str,
    metrics: &WrapMetrics,
    line_limit: Option<usize>,
    placement: NodePlacement,
) -> Result<NodeFrame> {
    let viewport_width = match placement {
        NodePlacement::Flow { container_width } => container_width,
        NodePlacement::Offscreen { width, .. } => width,
    };

    let mut tree: TaffyTree<TextNode> = TaffyTree::new();
    let leaf = tree.new_leaf_with_context(
        text_style(placement),
        TextNode {
            content: content.to_string(),
            metrics: *metrics,
            line_limit,
        },
    )?;
    let root = tree.new_with_children(viewport_style(viewport_width), &[leaf])?;

    let available = Size {
        width: AvailableSpace::Definite(viewport_width as f32),
        height: AvailableSpace::MaxContent,
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut TextNode>,
                          _style: &Style| {
        match context {
            Some(node) => measure_text(node, known_dimensions, available_space),
            None => Size::ZERO,
        }
    };
    tree.compute_layout_with_measure(root, available, &mut measure_fn)?;

    let layout = tree.layout(leaf)?;
    Ok(NodeFrame {
        x: layout.location.x.round() as i32,
        y: layout.location.y.round() as i32,
        width: layout.size.width.round() as u16,
        height: layout.size.height.round() as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_node_fits_content() {
        let frame = layout_text_node(
            "hello",
            &WrapMetrics::default(),
            None,
            NodePlacement::Flow { container_width: 20 },
        )
        .unwrap();

        assert_eq!(frame.x, 0);
        assert_eq!(frame.y, 0);
        assert!(frame.width >= 5 && frame.width <= 20);
        assert_eq!(frame.height, 1);
    }

    #[test]
    fn test_flow_node_height_is_capped() {
        let frame = layout_text_node(
            "one two three four five six",
            &WrapMetrics::default(),
            Some(2),
            NodePlacement::Flow { container_width: 5 },
        )
        .unwrap();

        assert_eq!(frame.height, 2);
        assert!(frame.width <= 5);
    }

    #[test]
    fn test_offscreen_node_is_outside_viewport() {
        let frame = layout_text_node(
            "one two three four five six",
            &WrapMetrics::default(),
            None,
            NodePlacement::Offscreen {
                x: OFFSCREEN_OFFSET as i32,
                y: OFFSCREEN_OFFSET as i32,
                width: 5,
            },
        )
        .unwrap();

        assert_eq!(frame.x, OFFSCREEN_OFFSET as i32);
        assert_eq!(frame.y, OFFSCREEN_OFFSET as i32);
        assert_eq!(frame.width, 5);
        assert_eq!(frame.height, 6);
        assert!(!frame.intersects_viewport(80, 24));
    }

    #[test]
    fn test_offscreen_node_uses_given_position() {
        let frame = layout_text_node(
            "hello world",
            &WrapMetrics::default(),
            None,
            NodePlacement::Offscreen {
                x: -500,
                y: -40,
                width: 5,
            },
        )
        .unwrap();

        assert_eq!((frame.x, frame.y), (-500, -40));
        assert_eq!(frame.height, 2);
    }
}
