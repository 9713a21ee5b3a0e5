// src/types/rich_text.rs
//! Rich text spans as the Notion API delivers them.

use serde::{Deserialize, Serialize};

/// A minimal unit of annotated inline text.
///
/// The wire form also carries a `type` and a type-specific object
/// (`text`, `mention`, `equation`); only `plain_text` is needed to render,
/// so the rest is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item with no annotations and no link.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            annotations: Annotations::default(),
            href: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }
}

/// Style flags of a span. Each flag is independent; several may be set at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}

/// Concatenates the unformatted text of every span.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_api_span_ignoring_type_specific_fields() {
        let json = r#"{
            "type": "text",
            "text": {"content": "Docs", "link": {"url": "https://example.com"}},
            "annotations": {"bold": true, "italic": false, "strikethrough": false,
                            "underline": false, "code": false, "color": "red"},
            "plain_text": "Docs",
            "href": "https://example.com"
        }"#;

        let item: RichTextItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.plain_text, "Docs");
        assert!(item.annotations.bold);
        assert_eq!(item.annotations.color, "red");
        assert_eq!(item.href.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn missing_annotations_default_to_unstyled() {
        let item: RichTextItem = serde_json::from_str(r#"{"plain_text": "x"}"#).unwrap();
        assert_eq!(item, RichTextItem::plain_text("x"));
    }

    #[test]
    fn plain_text_concatenates_without_separator() {
        let items = vec![
            RichTextItem::plain_text("Hello"),
            RichTextItem::plain_text(" World").bold(),
        ];
        assert_eq!(plain_text_of(&items), "Hello World");
    }
}
