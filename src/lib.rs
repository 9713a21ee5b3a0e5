// src/lib.rs
//! notion-reader library: resilient paginated reads from Notion, rendered as Markdown.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`, `NotionErrorCode`
//! - **Reading**: `NotionReader`, the entry point for every operation
//! - **API seam**: `NotionApi`, `NotionHttpClient`, `RetryExecutor`, `PaginationWalker`
//! - **Domain model**: `Resource`, `Block`, `ChildPageLink`, `SearchResults`
//! - **Formatting**: `render_block`, `render_blocks`, `format_rich_text`, `extract_title`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
mod reader;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NetworkCondition, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Reading ---
pub use crate::reader::NotionReader;

// --- API Seam ---
pub use crate::api::{
    NotionApi, NotionHttpClient, PaginationWalker, ResultsPage, RetryExecutor, RetryPolicy,
    Sleeper, TokioSleeper,
};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, ChildPageLink, PropertyValue, Resource, ResourceKind, SearchResults,
};

// --- Domain Types ---
pub use crate::types::{Annotations, ApiKey, BlockId, NotionId, ResourceId, RichTextItem};

// --- Formatting ---
pub use crate::formatting::{
    compose_page_markdown, extract_title, format_rich_text, render_block, render_blocks,
};
