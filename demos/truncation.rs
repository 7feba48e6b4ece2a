//! Truncation demo - line-limited text that knows when it is cut off.
//!
//! Renders a few texts into a shared-width cell host, resizes it, and swaps
//! content, printing each truncation change as it is reported.
//!
//! Run with: cargo run --example truncation
//! Trace the probe with: RUST_LOG=spark_truncate=debug cargo run --example truncation

use std::cell::RefCell;
use std::io::{Write, stdout};
use std::rc::Rc;

use crossterm::style::Print;
use crossterm::{queue, terminal};
use spark_signals::signal;
use spark_truncate::{
    CellText, Cleanup, PropValue, TextAlign, TextStyle, TruncationText, TruncationTextProps, WrapMetrics,
    truncation_text,
};
use tracing_subscriber::EnvFilter;

const PARAGRAPH: &str = "Terminal text wraps at the width it is given, and a line limit hides \
whatever does not fit. The only way to know whether anything was hidden is to lay the same \
text out again without the limit and count the lines.";

struct Item {
    label: &'static str,
    host: Rc<RefCell<CellText>>,
    text: TruncationText,
}

fn mount(label: &'static str, width: u16, props: TruncationTextProps) -> Item {
    let host = Rc::new(RefCell::new(CellText::new(width)));
    let on_change = Rc::new(move |truncated: bool| {
        println!("  [{label}] truncated = {truncated}");
    });
    let text = truncation_text(TruncationTextProps {
        text_component: Some(host.clone()),
        on_truncation_change: Some(on_change),
        ..props
    });
    Item { label, host, text }
}

fn pump_all(items: &[Item]) -> spark_truncate::Result<()> {
    for item in items {
        item.text.pump()?;
    }
    Ok(())
}

fn draw_all(items: &[Item]) -> spark_truncate::Result<()> {
    let mut out = stdout();
    for item in items {
        let host = item.host.borrow();
        queue!(out, Print(format!("--- {} ({} cols)\n", item.label, host.container_width())))?;
        for line in host.visible_lines() {
            queue!(out, Print(format!("  |{}|\n", line.text)))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> spark_truncate::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (cols, _) = terminal::size().unwrap_or((80, 24));
    let width = cols.clamp(20, 60);

    let status = signal("Ready".to_string());
    let limit = signal(2u16);

    let items = vec![
        mount(
            "status",
            width,
            TruncationTextProps {
                content: PropValue::Signal(status.clone()),
                number_of_lines: 1.into(),
                ..Default::default()
            },
        ),
        mount(
            "paragraph",
            width,
            TruncationTextProps {
                content: PARAGRAPH.into(),
                number_of_lines: PropValue::Signal(limit.clone()),
                style: TextStyle {
                    align: TextAlign::Left,
                    ..Default::default()
                },
                ..Default::default()
            },
        ),
        mount(
            "spaced",
            width,
            TruncationTextProps {
                content: "letter spacing widens every glyph".into(),
                number_of_lines: 1.into(),
                wrap: WrapMetrics {
                    letter_spacing: 1,
                    ..Default::default()
                },
                ..Default::default()
            },
        ),
    ];

    println!("== initial layout");
    pump_all(&items)?;
    draw_all(&items)?;

    println!("== status grows");
    status.set(format!("{PARAGRAPH} {PARAGRAPH}"));
    pump_all(&items)?;
    draw_all(&items)?;

    println!("== paragraph limit raised to 10");
    limit.set(10);
    pump_all(&items)?;
    draw_all(&items)?;

    println!("== hosts widened to 200 columns");
    for item in &items {
        item.host.borrow_mut().set_container_width(200)?;
    }
    pump_all(&items)?;
    draw_all(&items)?;

    let cleanups: Vec<Cleanup> = items.into_iter().map(|item| item.text.into_cleanup()).collect();
    for cleanup in cleanups {
        cleanup();
    }
    Ok(())
}
