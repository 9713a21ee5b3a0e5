// src/reader.rs
//! The public face of the crate: every read operation a caller needs.
//!
//! Single-object calls go through the [`RetryExecutor`]; listings go through
//! the [`PaginationWalker`], which retries each page on its own.

use crate::api::{NotionApi, PaginationWalker, RetryExecutor, RetryPolicy, Sleeper};
use crate::constants::NOTION_WEB_BASE_URL;
use crate::error::AppError;
use crate::formatting::{compose_page_markdown, extract_title};
use crate::model::{Block, ChildPageLink, Resource, ResourceKind, SearchResults};
use crate::types::NotionId;
use std::sync::Arc;

/// Reads pages, blocks, search results and databases from a workspace.
#[derive(Clone)]
pub struct NotionReader {
    api: Arc<dyn NotionApi>,
    executor: RetryExecutor,
}

impl std::fmt::Debug for NotionReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionReader")
            .field("executor", &self.executor)
            .finish()
    }
}

impl NotionReader {
    pub fn new(api: Arc<dyn NotionApi>, policy: RetryPolicy) -> Self {
        Self {
            api,
            executor: RetryExecutor::new(policy),
        }
    }

    /// Same as [`NotionReader::new`] but waits between retries through `sleeper`.
    pub fn with_sleeper(
        api: Arc<dyn NotionApi>,
        policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            api,
            executor: RetryExecutor::with_sleeper(policy, sleeper),
        }
    }

    /// Retrieves a page. Anything other than a page is an error.
    pub async fn get_resource(&self, id: &NotionId) -> Result<Resource, AppError> {
        let api = self.api.as_ref();
        let label = format!("retrieve page {}", id);
        let resource = self
            .executor
            .execute(&label, move || api.retrieve_page(id))
            .await?;
        expect_kind(resource, ResourceKind::Page)
    }

    /// Retrieves a database. Anything other than a database is an error.
    pub async fn get_database(&self, id: &NotionId) -> Result<Resource, AppError> {
        let api = self.api.as_ref();
        let label = format!("retrieve database {}", id);
        let resource = self
            .executor
            .execute(&label, move || api.retrieve_database(id))
            .await?;
        expect_kind(resource, ResourceKind::Database)
    }

    /// Every direct child block of `id`, in API order.
    pub async fn get_all_blocks(&self, id: &NotionId) -> Result<Vec<Block>, AppError> {
        let api = self.api.as_ref();
        let label = format!("list children of {}", id);
        PaginationWalker::new(&self.executor)
            .collect_all(&label, move |cursor, page_size| async move {
                api.list_children(id, cursor.as_deref(), page_size).await
            })
            .await
    }

    /// The child pages referenced among `id`'s direct children.
    pub async fn get_all_child_pages(&self, id: &NotionId) -> Result<Vec<ChildPageLink>, AppError> {
        let blocks = self.get_all_blocks(id).await?;
        let links: Vec<ChildPageLink> = blocks
            .iter()
            .filter_map(|block| match block {
                Block::ChildPage(child) => Some(ChildPageLink {
                    id: child.common.id.to_string(),
                    title: child.title.clone(),
                    url: format!("{}{}", NOTION_WEB_BASE_URL, child.common.id.compact()),
                }),
                Block::Malformed(bad) if bad.kind == "child_page" => {
                    log::warn!(
                        "Skipping child page {} under {}: {}",
                        bad.common.id,
                        id,
                        bad.reason
                    );
                    None
                }
                _ => None,
            })
            .collect();

        log::debug!("{} has {} child page(s)", id, links.len());
        Ok(links)
    }

    /// A page as Markdown: its title as a heading, then every block.
    pub async fn get_resource_as_markdown(&self, id: &NotionId) -> Result<String, AppError> {
        let resource = self.get_resource(id).await?;
        let blocks = self.get_all_blocks(id).await?;
        Ok(compose_page_markdown(&resource, &blocks))
    }

    /// Searches the workspace and splits the hits into pages and databases.
    pub async fn search_workspace(&self, query: &str) -> Result<SearchResults, AppError> {
        let api = self.api.as_ref();
        let label = format!("search '{}'", query);
        let hits = PaginationWalker::new(&self.executor)
            .collect_all(&label, move |cursor, page_size| async move {
                api.search(query, cursor.as_deref(), page_size).await
            })
            .await?;

        let (pages, databases): (Vec<Resource>, Vec<Resource>) = hits
            .into_iter()
            .partition(|resource| resource.kind == ResourceKind::Page);

        Ok(SearchResults { pages, databases })
    }

    /// Title of a page; empty when it has no title property.
    pub async fn get_resource_title(&self, id: &NotionId) -> Result<String, AppError> {
        let resource = self.get_resource(id).await?;
        Ok(extract_title(&resource))
    }

    /// Every row of a database, optionally limited to titles containing `title_contains`.
    pub async fn query_database_all(
        &self,
        id: &NotionId,
        title_contains: Option<&str>,
    ) -> Result<Vec<Resource>, AppError> {
        let api = self.api.as_ref();
        let label = format!("query database {}", id);
        PaginationWalker::new(&self.executor)
            .collect_all(&label, move |cursor, page_size| async move {
                api.query_database(id, title_contains, cursor.as_deref(), page_size)
                    .await
            })
            .await
    }
}

fn expect_kind(resource: Resource, expected: ResourceKind) -> Result<Resource, AppError> {
    if resource.kind == expected {
        Ok(resource)
    } else {
        Err(AppError::UnexpectedObject {
            expected: expected.as_str(),
            actual: resource.kind.to_string(),
        })
    }
}
