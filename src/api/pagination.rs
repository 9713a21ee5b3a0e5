// src/api/pagination.rs
//! Cursor pagination: exhaustively walks a paginated endpoint, one page at a time.

use super::retry::RetryExecutor;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use std::future::Future;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> ResultsPage<T> {
    /// The final page of a listing.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page followed by more results starting at `cursor`.
    pub fn more(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Drives a page-fetching closure through the retry executor until the
/// listing is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct PaginationWalker<'a> {
    executor: &'a RetryExecutor,
    page_size: u32,
}

impl<'a> PaginationWalker<'a> {
    pub fn new(executor: &'a RetryExecutor) -> Self {
        Self {
            executor,
            page_size: NOTION_API_PAGE_SIZE,
        }
    }

    /// Collects every item of a paginated listing, in API order.
    ///
    /// `fetch_page` receives the cursor to resume from (`None` for the first
    /// page) and the page size. Requests are strictly sequential; the walk
    /// stops only when a page reports `has_more == false`.
    pub async fn collect_all<T, F, Fut>(
        &self,
        label: &str,
        mut fetch_page: F,
    ) -> Result<Vec<T>, AppError>
    where
        F: FnMut(Option<String>, u32) -> Fut,
        Fut: Future<Output = Result<ResultsPage<T>, AppError>>,
    {
        let mut all_items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages_fetched = 0u32;

        loop {
            let page_size = self.page_size;
            let request_cursor = cursor.clone();
            let page = self
                .executor
                .execute(label, || fetch_page(request_cursor.clone(), page_size))
                .await?;
            pages_fetched += 1;

            log::debug!(
                "{}: page {} returned {} item(s), has_more={}",
                label,
                pages_fetched,
                page.items.len(),
                page.has_more
            );
            all_items.extend(page.items);

            if !page.has_more {
                break;
            }

            match page.next_cursor {
                None => {
                    return Err(AppError::MalformedResponse(format!(
                        "{}: page {} reports more results but no cursor",
                        label, pages_fetched
                    )));
                }
                Some(next) if Some(&next) == cursor.as_ref() => {
                    return Err(AppError::MalformedResponse(format!(
                        "{}: cursor '{}' did not advance after page {}",
                        label, next, pages_fetched
                    )));
                }
                Some(next) => cursor = Some(next),
            }
        }

        log::debug!(
            "{}: collected {} item(s) over {} page(s)",
            label,
            all_items.len(),
            pages_fetched
        );
        Ok(all_items)
    }
}
