mod block;
pub mod blocks;
pub mod common;
pub mod properties;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use properties::PropertyValue;

use crate::types::{plain_text_of, ResourceId, RichTextItem};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of top-level object a resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Page,
    Database,
}

impl ResourceKind {
    /// The `object` discriminant the API uses for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Page => "page",
            ResourceKind::Database => "database",
        }
    }

    /// Maps an `object` discriminant back to a kind.
    pub fn from_object(object: &str) -> Option<Self> {
        match object {
            "page" => Some(ResourceKind::Page),
            "database" => Some(ResourceKind::Database),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page or a database, as returned by retrieval, search or query endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    /// Properties in the order the API listed them.
    pub properties: IndexMap<String, PropertyValue>,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    pub url: Option<String>,
    /// Databases carry their name here rather than in a property.
    pub database_title: Vec<RichTextItem>,
}

impl Resource {
    /// Every property as `name (kind)`, in API order.
    pub fn property_summary(&self) -> Vec<String> {
        self.properties
            .iter()
            .map(|(name, value)| format!("{} ({})", name, value.kind()))
            .collect()
    }

    /// Best human-readable name: the title property, else the database title.
    pub fn display_title(&self) -> String {
        let title = crate::formatting::extract_title(self);
        if title.is_empty() {
            plain_text_of(&self.database_title)
        } else {
            title
        }
    }

    /// Browser link derived from the id.
    pub fn web_url(&self) -> String {
        format!("{}{}", crate::constants::NOTION_WEB_BASE_URL, self.id.compact())
    }
}

/// A child page found among a parent's blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPageLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Workspace search results split by object kind, each in API order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub pages: Vec<Resource>,
    pub databases: Vec<Resource>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.pages.len() + self.databases.len()
    }
}
