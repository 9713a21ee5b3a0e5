// src/model/properties.rs
//! Property values of pages and databases.
//!
//! The reader only needs the title to render a page, so properties are
//! modelled just far enough to find it: title and rich text carry their
//! spans, every other kind is kept by name only.

use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// The titular property. Database schemas declare it without spans.
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    /// Any other property kind, identified by its API type name.
    Other { kind: String },
}

impl PropertyValue {
    /// The property kind as the API spells it.
    pub fn kind(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Other { kind } => kind,
        }
    }
}
