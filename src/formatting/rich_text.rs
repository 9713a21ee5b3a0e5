// src/formatting/rich_text.rs
//! Rich text to Markdown.
//!
//! Each span is wrapped in a fixed order: code, italic, bold, strikethrough,
//! then the link around everything. Underline and colour have no Markdown
//! form and are dropped.

use crate::types::RichTextItem;

/// Formats spans into one Markdown string, concatenated without separators.
pub fn format_rich_text(items: &[RichTextItem]) -> String {
    items.iter().map(format_span).collect()
}

fn format_span(item: &RichTextItem) -> String {
    let annotations = &item.annotations;
    let mut text = item.plain_text.clone();

    if annotations.code {
        text = format!("`{}`", text);
    }
    if annotations.italic {
        text = format!("*{}*", text);
    }
    if annotations.bold {
        text = format!("**{}**", text);
    }
    if annotations.strikethrough {
        text = format!("~~{}~~", text);
    }
    if let Some(href) = &item.href {
        text = format!("[{}]({})", text, href);
    }

    text
}
