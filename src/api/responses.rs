// src/api/responses.rs
//! Wire schemas for every Notion endpoint the reader calls.
//!
//! Raw bodies are deserialized into these types first, then converted to the
//! domain model through [`ToDomain`]. A body that does not fit its schema is
//! a fatal error; only a block's kind-specific payload is allowed to be
//! malformed, in which case the block is kept as [`Block::Malformed`].

use super::pagination::ResultsPage;
use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::{Block, BlockCommon, PropertyValue, Resource, ResourceKind};
use crate::types::{ResourceId, RichTextItem};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Generic paginated response wrapper
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub object: String,
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// A page or database object.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    pub object: String,
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyResponse>,
    /// Present on databases only.
    #[serde(default)]
    pub title: Vec<RichTextItem>,
}

/// One entry of a `properties` map: a type tag plus a payload keyed by that tag.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// A block object; the kind-specific payload sits under the key named by `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub object: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ToDoContent {
    rich_text: Vec<RichTextItem>,
    #[serde(default)]
    checked: bool,
}

#[derive(Debug, Deserialize)]
struct CodeContent {
    rich_text: Vec<RichTextItem>,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalloutContent {
    rich_text: Vec<RichTextItem>,
    #[serde(default)]
    icon: Option<Icon>,
}

#[derive(Debug, Deserialize)]
struct ChildPageContent {
    title: String,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<Resource> for ObjectResponse {
    fn to_domain(self) -> Result<Resource, AppError> {
        let kind =
            ResourceKind::from_object(&self.object).ok_or_else(|| AppError::UnexpectedObject {
                expected: "page or database",
                actual: self.object.clone(),
            })?;

        let properties = self
            .properties
            .into_iter()
            .map(|(name, property)| {
                let value = convert_property(&name, property)?;
                Ok((name, value))
            })
            .collect::<Result<IndexMap<_, _>, AppError>>()?;

        Ok(Resource {
            id: ResourceId::new(self.id),
            kind,
            properties,
            created_time: self.created_time,
            last_edited_time: self.last_edited_time,
            url: self.url,
            database_title: self.title,
        })
    }
}

/// Converts one property entry. Database schemas declare `title: {}`, which
/// is a title property with no text.
fn convert_property(name: &str, property: PropertyResponse) -> Result<PropertyValue, AppError> {
    let PropertyResponse { kind, mut payload } = property;

    let spans = |value: Option<Value>| -> Result<Vec<RichTextItem>, AppError> {
        match value {
            Some(Value::Array(items)) => {
                serde_json::from_value(Value::Array(items)).map_err(|e| {
                    AppError::MalformedResponse(format!(
                        "property '{}' has unreadable text: {}",
                        name, e
                    ))
                })
            }
            Some(Value::Object(_)) => Ok(Vec::new()),
            Some(other) => Err(AppError::MalformedResponse(format!(
                "property '{}' has unexpected payload: {}",
                name, other
            ))),
            None => Err(AppError::MalformedResponse(format!(
                "property '{}' of type '{}' has no payload",
                name, kind
            ))),
        }
    };

    match kind.as_str() {
        "title" => Ok(PropertyValue::Title(spans(payload.remove("title"))?)),
        "rich_text" => Ok(PropertyValue::RichText(spans(payload.remove("rich_text"))?)),
        _ => Ok(PropertyValue::Other { kind: kind.clone() }),
    }
}

impl ToDomain<Block> for BlockResponse {
    fn to_domain(mut self) -> Result<Block, AppError> {
        if self.object != "block" {
            return Err(AppError::UnexpectedObject {
                expected: "block",
                actual: self.object,
            });
        }

        let payload = self.payload.remove(&self.kind);
        let common = BlockCommon {
            id: crate::types::BlockId::new(self.id),
            has_children: self.has_children,
        };
        Ok(decode_block(common, &self.kind, payload))
    }
}

fn decode<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(payload.unwrap_or(Value::Null))
}

fn decode_text(payload: Option<Value>) -> Result<TextBlockContent, serde_json::Error> {
    decode(payload)
}

/// Maps a kind tag and its payload onto the block model.
fn decode_block(common: BlockCommon, kind: &str, payload: Option<Value>) -> Block {
    let fallback = common.clone();

    let decoded: Result<Block, serde_json::Error> = match kind {
        "paragraph" => {
            decode_text(payload).map(|content| Block::Paragraph(ParagraphBlock { common, content }))
        }
        "heading_1" => {
            decode_text(payload).map(|content| Block::Heading1(Heading1Block { common, content }))
        }
        "heading_2" => {
            decode_text(payload).map(|content| Block::Heading2(Heading2Block { common, content }))
        }
        "heading_3" => {
            decode_text(payload).map(|content| Block::Heading3(Heading3Block { common, content }))
        }
        "bulleted_list_item" => decode_text(payload)
            .map(|content| Block::BulletedListItem(BulletedListItemBlock { common, content })),
        "numbered_list_item" => decode_text(payload)
            .map(|content| Block::NumberedListItem(NumberedListItemBlock { common, content })),
        "quote" => decode_text(payload).map(|content| Block::Quote(QuoteBlock { common, content })),
        "to_do" => decode::<ToDoContent>(payload).map(|todo| {
            Block::ToDo(ToDoBlock {
                common,
                content: TextBlockContent::new(todo.rich_text),
                checked: todo.checked,
            })
        }),
        "code" => decode::<CodeContent>(payload).map(|code| {
            Block::Code(CodeBlock {
                common,
                language: code.language.unwrap_or_default(),
                content: TextBlockContent::new(code.rich_text),
            })
        }),
        "callout" => decode::<CalloutContent>(payload).map(|callout| {
            Block::Callout(CalloutBlock {
                common,
                icon: callout.icon,
                content: TextBlockContent::new(callout.rich_text),
            })
        }),
        "child_page" => decode::<ChildPageContent>(payload)
            .map(|child| Block::ChildPage(ChildPageBlock { common, title: child.title })),
        other => Ok(Block::Unsupported(UnsupportedBlock {
            common,
            kind: other.to_string(),
        })),
    };

    decoded.unwrap_or_else(|err| {
        log::debug!("Block {} ({}) has a malformed payload: {}", fallback.id, kind, err);
        Block::Malformed(MalformedBlock {
            common: fallback,
            kind: kind.to_string(),
            reason: err.to_string(),
        })
    })
}

impl<R> PaginatedResponse<R> {
    /// Converts every result and keeps the cursor fields.
    pub fn into_domain_page<T>(self) -> Result<ResultsPage<T>, AppError>
    where
        R: ToDomain<T>,
    {
        let items = self
            .results
            .into_iter()
            .map(ToDomain::to_domain)
            .collect::<Result<Vec<T>, AppError>>()?;

        Ok(ResultsPage {
            items,
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        })
    }
}
