use super::blocks::*;
use super::common::BlockCommon;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Unsupported($pattern) => $result,
            Block::Malformed($pattern) => $result,
        }
    };
}

/// One node of a page's content tree, tagged by kind.
///
/// Every kind the renderer understands has its own variant; anything else
/// lands in `Unsupported`, and a known kind with an unreadable payload lands
/// in `Malformed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Code(CodeBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    ChildPage(ChildPageBlock),
    Unsupported(UnsupportedBlock),
    Malformed(MalformedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        &self.common().id
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// The kind tag as the API spells it.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Code(_) => "code",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::ChildPage(_) => "child_page",
            Block::Unsupported(b) => &b.kind,
            Block::Malformed(b) => &b.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RichTextItem;

    #[test]
    fn block_type_reports_wire_tag_for_unknown_kinds() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::new("b1"),
            kind: "synced_block".to_string(),
        });
        assert_eq!(block.block_type(), "synced_block");
        assert_eq!(block.id().as_str(), "b1");
    }

    #[test]
    fn known_kinds_report_their_own_tag() {
        let block = Block::Quote(QuoteBlock {
            common: BlockCommon::new("q1"),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("wisdom")]),
        });
        assert_eq!(block.block_type(), "quote");
        assert!(!block.has_children());
    }
}
