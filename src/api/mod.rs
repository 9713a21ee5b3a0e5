// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Callers depend on [`NotionApi`], never on HTTP details. Each method is a
//! single request; retrying and cursor walking are layered on top by
//! [`RetryExecutor`] and [`PaginationWalker`].

pub mod client;
pub mod pagination;
pub mod parser;
pub mod responses;
pub mod retry;

use crate::error::AppError;
use crate::model::{Block, Resource};
use crate::types::NotionId;

/// The remote collaborator: one call per method, one page per listing call.
#[async_trait::async_trait]
pub trait NotionApi: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Resource, AppError>;

    async fn retrieve_database(&self, id: &NotionId) -> Result<Resource, AppError>;

    /// One page of a block's direct children.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<pagination::ResultsPage<Block>, AppError>;

    /// One page of workspace search results; pages and databases interleaved.
    async fn search(
        &self,
        query: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<pagination::ResultsPage<Resource>, AppError>;

    /// One page of a database query, optionally filtered by title text.
    async fn query_database(
        &self,
        database: &NotionId,
        title_contains: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<pagination::ResultsPage<Resource>, AppError>;
}

pub use client::NotionHttpClient;
pub use pagination::{PaginationWalker, ResultsPage};
pub use retry::{RetryExecutor, RetryPolicy, Sleeper, TokioSleeper};
