//! Cell Text - the default terminal text component.
//!
//! Lays text out in terminal cells, queues layout events for every render,
//! and draws the visible lines with crossterm. Shadow passes are laid out at
//! their off-screen position and never drawn.

use std::collections::VecDeque;
use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};

use crate::error::Result;
use crate::layout::{
    LayoutSource, LineMetrics, NodeFrame, NodePlacement, TextLayoutEvent, ellipsize,
    layout_text_node, measure_lines, string_width,
};
use crate::truncation::{ShadowPass, ShadowTicket, VisiblePass};
use crate::types::{Attr, TextAlign};

use super::TextComponent;

/// Terminal-cell text component.
#[derive(Debug)]
pub struct CellText {
    container_width: u16,
    visible: Option<VisiblePass>,
    visible_frame: NodeFrame,
    visible_lines: Vec<LineMetrics>,
    shadows: Vec<ShadowPass>,
    shadow_mounts: usize,
    queue: VecDeque<TextLayoutEvent>,
}

impl CellText {
    /// Create a component laying text out within `container_width` cells.
    pub fn new(container_width: u16) -> Self {
        Self {
            container_width,
            visible: None,
            visible_frame: NodeFrame::default(),
            visible_lines: Vec::new(),
            shadows: Vec::new(),
            shadow_mounts: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn container_width(&self) -> u16 {
        self.container_width
    }

    /// Resize the container. A mounted visible pass is laid out again.
    pub fn set_container_width(&mut self, width: u16) -> Result<()> {
        if width == self.container_width {
            return Ok(());
        }
        self.container_width = width;
        self.layout_visible()
    }

    /// Lines of the visible pass as last laid out.
    pub fn visible_lines(&self) -> &[LineMetrics] {
        &self.visible_lines
    }

    pub fn visible_frame(&self) -> NodeFrame {
        self.visible_frame
    }

    /// Shadow passes currently mounted.
    pub fn mounted_shadows(&self) -> &[ShadowPass] {
        &self.shadows
    }

    /// Total shadow passes ever mounted.
    pub fn shadow_mounts(&self) -> usize {
        self.shadow_mounts
    }

    /// Layout events not yet delivered.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    fn layout_visible(&mut self) -> Result<()> {
        let Some(pass) = &self.visible else {
            return Ok(());
        };

        let limit = pass.line_limit.map(|l| l.get() as usize);
        let frame = layout_text_node(
            &pass.content,
            &pass.wrap,
            limit,
            NodePlacement::Flow {
                container_width: self.container_width,
            },
        )?;

        let mut lines = measure_lines(&pass.content, frame.width as usize, &pass.wrap);
        if let Some(limit) = limit {
            if lines.len() > limit {
                lines.truncate(limit);
                if let Some(last) = lines.last_mut() {
                    let text = ellipsize(&last.text, frame.width as usize, &pass.wrap);
                    let width = string_width(&text, &pass.wrap) as u16;
                    *last = LineMetrics::new(text, width);
                }
            }
        }

        self.visible_frame = frame;
        self.visible_lines = lines.clone();
        self.queue.push_back(TextLayoutEvent {
            source: LayoutSource::Visible(pass.epoch),
            frame,
            lines,
        });
        Ok(())
    }

    /// Draw the visible lines at (`x`, `y`).
    pub fn draw<W: Write>(&self, out: &mut W, x: u16, y: u16) -> Result<()> {
        let Some(pass) = &self.visible else {
            return Ok(());
        };

        let frame_width = self.visible_frame.width;
        for (row, line) in self.visible_lines.iter().enumerate() {
            let slack = frame_width.saturating_sub(line.width);
            let offset = match pass.style.align {
                TextAlign::Left => 0,
                TextAlign::Center => slack / 2,
                TextAlign::Right => slack,
            };

            queue!(out, MoveTo(x.saturating_add(offset), y.saturating_add(row as u16)))?;
            for attribute in attributes(pass.style.attrs) {
                queue!(out, SetAttribute(attribute))?;
            }
            queue!(out, Print(&line.text), SetAttribute(Attribute::Reset))?;
        }
        out.flush()?;
        Ok(())
    }
}

fn attributes(attrs: Attr) -> Vec<Attribute> {
    let mut out = Vec::new();
    for (flag, attribute) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ] {
        if attrs.contains(flag) {
            out.push(attribute);
        }
    }
    out
}

impl TextComponent for CellText {
    fn render(&mut self, pass: &VisiblePass) -> Result<()> {
        self.visible = Some(pass.clone());
        self.layout_visible()
    }

    fn mount_shadow(&mut self, pass: &ShadowPass) -> Result<()> {
        let frame = layout_text_node(
            &pass.content,
            &pass.wrap,
            None,
            NodePlacement::Offscreen {
                x: pass.placement.x,
                y: pass.placement.y,
                width: pass.width,
            },
        )?;
        let lines = measure_lines(&pass.content, frame.width as usize, &pass.wrap);

        self.shadows.push(pass.clone());
        self.shadow_mounts += 1;
        self.queue.push_back(TextLayoutEvent {
            source: LayoutSource::Shadow(pass.ticket),
            frame,
            lines,
        });
        Ok(())
    }

    fn unmount_shadow(&mut self, ticket: ShadowTicket) {
        // Events already queued for this pass are still delivered.
        self.shadows.retain(|s| s.ticket != ticket);
    }

    fn next_layout_event(&mut self) -> Option<TextLayoutEvent> {
        self.queue.pop_front()
    }
}
