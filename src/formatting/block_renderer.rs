// src/formatting/block_renderer.rs
//! Block rendering engine: converts Notion blocks to Markdown.
//!
//! [`render_block`] maps one block to one fragment. [`render_blocks`] renders
//! a page's blocks in order and never aborts: a block that cannot be rendered
//! is replaced by an HTML comment naming its kind.

use super::rich_text::format_rich_text;
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::model::Block;

/// Renders a single block into its Markdown fragment.
///
/// Child page references and unrecognized kinds render as empty strings.
pub fn render_block(block: &Block) -> Result<String, AppError> {
    let fragment = match block {
        Block::Paragraph(b) => format!("{}\n\n", format_rich_text(&b.content.rich_text)),
        Block::Heading1(b) => format!("# {}\n\n", format_rich_text(&b.content.rich_text)),
        Block::Heading2(b) => format!("## {}\n\n", format_rich_text(&b.content.rich_text)),
        Block::Heading3(b) => format!("### {}\n\n", format_rich_text(&b.content.rich_text)),
        Block::BulletedListItem(b) => format!("- {}\n", format_rich_text(&b.content.rich_text)),
        // No running ordinal; Markdown renderers renumber the list.
        Block::NumberedListItem(b) => format!("1. {}\n", format_rich_text(&b.content.rich_text)),
        Block::ToDo(b) => format!(
            "[{}] {}\n",
            if b.checked { "x" } else { " " },
            format_rich_text(&b.content.rich_text)
        ),
        Block::Code(b) => format!(
            "```{}\n{}\n```\n\n",
            b.language,
            format_rich_text(&b.content.rich_text)
        ),
        Block::Quote(b) => format!("> {}\n\n", format_rich_text(&b.content.rich_text)),
        Block::Callout(b) => format!(
            "> {} {}\n\n",
            b.icon.as_ref().and_then(|icon| icon.emoji()).unwrap_or(""),
            format_rich_text(&b.content.rich_text)
        ),
        Block::ChildPage(_) | Block::Unsupported(_) => String::new(),
        Block::Malformed(b) => {
            return Err(AppError::MalformedBlock {
                id: b.common.id.to_string(),
                kind: b.kind.clone(),
                reason: b.reason.clone(),
            })
        }
    };

    Ok(fragment)
}

/// Renders blocks in order, substituting a placeholder for any that fail.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);

    for block in blocks {
        match render_block(block) {
            Ok(fragment) => output.push_str(&fragment),
            Err(err) => {
                log::warn!(
                    "Error converting block {} ({}): {}",
                    block.id(),
                    block.block_type(),
                    err
                );
                output.push_str(&format!(
                    "<!-- block conversion error: {} -->\n",
                    block.block_type()
                ));
            }
        }
    }

    log::debug!("Rendered {} block(s) into {} chars", blocks.len(), output.len());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::BlockCommon;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TextBlockContent {
        TextBlockContent::new(vec![RichTextItem::plain_text(s)])
    }

    fn common(id: &str) -> BlockCommon {
        BlockCommon::new(id)
    }

    #[test]
    fn text_kinds_follow_the_fragment_table() {
        let cases = vec![
            (
                Block::Paragraph(ParagraphBlock { common: common("a"), content: text("p") }),
                "p\n\n",
            ),
            (
                Block::Heading1(Heading1Block { common: common("b"), content: text("h") }),
                "# h\n\n",
            ),
            (
                Block::Heading2(Heading2Block { common: common("c"), content: text("h") }),
                "## h\n\n",
            ),
            (
                Block::Heading3(Heading3Block { common: common("d"), content: text("h") }),
                "### h\n\n",
            ),
            (
                Block::BulletedListItem(BulletedListItemBlock {
                    common: common("e"),
                    content: text("item"),
                }),
                "- item\n",
            ),
            (
                Block::Quote(QuoteBlock { common: common("f"), content: text("q") }),
                "> q\n\n",
            ),
        ];

        for (block, expected) in cases {
            assert_eq!(render_block(&block).unwrap(), expected, "{}", block.block_type());
        }
    }

    #[test]
    fn numbered_items_always_use_one() {
        let blocks: Vec<Block> = ["first", "second", "third"]
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Block::NumberedListItem(NumberedListItemBlock {
                    common: common(&i.to_string()),
                    content: text(s),
                })
            })
            .collect();

        assert_eq!(render_blocks(&blocks), "1. first\n1. second\n1. third\n");
    }

    #[test]
    fn to_do_marks_checked_state() {
        let done = Block::ToDo(ToDoBlock {
            common: common("a"),
            content: text("done"),
            checked: true,
        });
        let open = Block::ToDo(ToDoBlock {
            common: common("b"),
            content: text("open"),
            checked: false,
        });
        assert_eq!(render_block(&done).unwrap(), "[x] done\n");
        assert_eq!(render_block(&open).unwrap(), "[ ] open\n");
    }

    #[test]
    fn code_fences_carry_the_language() {
        let rust = Block::Code(CodeBlock {
            common: common("a"),
            language: "rust".into(),
            content: text("fn main() {}"),
        });
        let bare = Block::Code(CodeBlock {
            common: common("b"),
            language: String::new(),
            content: text("x"),
        });
        assert_eq!(render_block(&rust).unwrap(), "```rust\nfn main() {}\n```\n\n");
        assert_eq!(render_block(&bare).unwrap(), "```\nx\n```\n\n");
    }

    #[test]
    fn callout_shows_emoji_only_for_emoji_icons() {
        let with_emoji = Block::Callout(CalloutBlock {
            common: common("a"),
            icon: Some(Icon::Emoji { emoji: "💡".into() }),
            content: text("tip"),
        });
        let with_file = Block::Callout(CalloutBlock {
            common: common("b"),
            icon: Some(Icon::External { external: HostedFile { url: "https://x/y.png".into() } }),
            content: text("tip"),
        });
        assert_eq!(render_block(&with_emoji).unwrap(), "> 💡 tip\n\n");
        assert_eq!(render_block(&with_file).unwrap(), ">  tip\n\n");
    }

    #[test]
    fn child_pages_and_unknown_kinds_render_empty() {
        let child = Block::ChildPage(ChildPageBlock { common: common("a"), title: "Sub".into() });
        let unknown = Block::Unsupported(UnsupportedBlock {
            common: common("b"),
            kind: "synced_block".into(),
        });
        assert_eq!(render_block(&child).unwrap(), "");
        assert_eq!(render_block(&unknown).unwrap(), "");
    }

    #[test]
    fn malformed_block_becomes_placeholder_and_rendering_continues() {
        let blocks = vec![
            Block::Paragraph(ParagraphBlock { common: common("a"), content: text("before") }),
            Block::Malformed(MalformedBlock {
                common: common("b"),
                kind: "code".into(),
                reason: "missing field `rich_text`".into(),
            }),
            Block::Paragraph(ParagraphBlock { common: common("c"), content: text("after") }),
        ];

        assert_eq!(
            render_blocks(&blocks),
            "before\n\n<!-- block conversion error: code -->\nafter\n\n"
        );
        assert!(matches!(
            render_block(&blocks[1]),
            Err(AppError::MalformedBlock { ref kind, .. }) if kind == "code"
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let blocks = vec![
            Block::Heading1(Heading1Block { common: common("a"), content: text("Title") }),
            Block::BulletedListItem(BulletedListItemBlock {
                common: common("b"),
                content: text("x"),
            }),
        ];
        assert_eq!(render_blocks(&blocks), render_blocks(&blocks));
    }
}
