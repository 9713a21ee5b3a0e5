// src/formatting/title.rs

use crate::model::{PropertyValue, Resource};
use crate::types::plain_text_of;

/// Plain text of the first title-kind property, in property order.
///
/// Only that property is consulted; a resource without one has an empty title.
pub fn extract_title(resource: &Resource) -> String {
    resource
        .properties
        .values()
        .find_map(|value| match value {
            PropertyValue::Title(items) => Some(plain_text_of(items)),
            _ => None,
        })
        .unwrap_or_default()
}
