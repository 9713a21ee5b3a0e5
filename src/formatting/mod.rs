// src/formatting/mod.rs
//! Renders Notion data structures into Markdown.

pub mod block_renderer;
pub mod rich_text;
mod title;

pub use block_renderer::{render_block, render_blocks};
pub use rich_text::format_rich_text;
pub use title::extract_title;

use crate::model::{Block, Resource};

/// Composes a page: a `# title` heading when the title is non-empty, then its blocks.
pub fn compose_page_markdown(resource: &Resource, blocks: &[Block]) -> String {
    let title = extract_title(resource);
    let mut output = String::new();
    if !title.is_empty() {
        output.push_str(&format!("# {}\n\n", title));
    }
    output.push_str(&render_blocks(blocks));
    output
}
