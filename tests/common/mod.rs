// tests/common/mod.rs
//! Shared fixtures: a scripted stand-in for the Notion API and a sleeper
//! that records delays instead of waiting.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use notion_reader::model::blocks::*;
use notion_reader::{
    AppError, Block, BlockCommon, NetworkCondition, NotionApi, NotionErrorCode, NotionId,
    NotionReader, PropertyValue, Resource, ResourceId, ResourceKind, ResultsPage, RetryPolicy,
    RichTextItem, Sleeper,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Script<T> = Mutex<VecDeque<Result<T, AppError>>>;

/// One recorded call against the fake API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: &'static str,
    pub target: String,
    pub cursor: Option<String>,
    pub page_size: Option<u32>,
    pub filter: Option<String>,
}

/// Answers each endpoint from its own queue of scripted results, in order.
#[derive(Default)]
pub struct FakeNotionApi {
    pages: Script<Resource>,
    databases: Script<Resource>,
    children: Script<ResultsPage<Block>>,
    search: Script<ResultsPage<Resource>>,
    query: Script<ResultsPage<Resource>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeNotionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, result: Result<Resource, AppError>) -> Self {
        self.pages.lock().unwrap().push_back(result);
        self
    }

    pub fn database(self, result: Result<Resource, AppError>) -> Self {
        self.databases.lock().unwrap().push_back(result);
        self
    }

    pub fn children(self, result: Result<ResultsPage<Block>, AppError>) -> Self {
        self.children.lock().unwrap().push_back(result);
        self
    }

    pub fn search(self, result: Result<ResultsPage<Resource>, AppError>) -> Self {
        self.search.lock().unwrap().push_back(result);
        self
    }

    pub fn query(self, result: Result<ResultsPage<Resource>, AppError>) -> Self {
        self.query.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn cursors(&self, endpoint: &str) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .map(|call| call.cursor)
            .collect()
    }

    fn record(
        &self,
        endpoint: &'static str,
        target: &str,
        cursor: Option<&str>,
        page_size: Option<u32>,
        filter: Option<&str>,
    ) {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            target: target.to_string(),
            cursor: cursor.map(str::to_string),
            page_size,
            filter: filter.map(str::to_string),
        });
    }

    fn next<T>(script: &Script<T>, endpoint: &str) -> Result<T, AppError> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left for {}", endpoint))
    }
}

#[async_trait::async_trait]
impl NotionApi for FakeNotionApi {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Resource, AppError> {
        self.record("pages", id.as_str(), None, None, None);
        Self::next(&self.pages, "pages")
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Resource, AppError> {
        self.record("databases", id.as_str(), None, None, None);
        Self::next(&self.databases, "databases")
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Block>, AppError> {
        self.record("children", parent.as_str(), cursor, Some(page_size), None);
        Self::next(&self.children, "children")
    }

    async fn search(
        &self,
        query: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Resource>, AppError> {
        self.record("search", query, cursor, Some(page_size), None);
        Self::next(&self.search, "search")
    }

    async fn query_database(
        &self,
        database: &NotionId,
        title_contains: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Resource>, AppError> {
        self.record("query", database.as_str(), cursor, Some(page_size), title_contains);
        Self::next(&self.query, "query")
    }
}

/// Records every requested delay and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays_ms(&self) -> Vec<u128> {
        self.delays
            .lock()
            .unwrap()
            .iter()
            .map(Duration::as_millis)
            .collect()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

/// A reader over `api` whose waits are recorded by the returned sleeper.
pub fn reader_with(
    api: Arc<FakeNotionApi>,
    policy: RetryPolicy,
) -> (NotionReader, Arc<RecordingSleeper>) {
    let sleeper = Arc::new(RecordingSleeper::default());
    let reader = NotionReader::with_sleeper(api, policy, sleeper.clone());
    (reader, sleeper)
}

pub fn page_id() -> NotionId {
    NotionId::parse("12345678123456781234567812345678").unwrap()
}

// --- Errors ---

pub fn api_error(status: u16) -> AppError {
    AppError::Api {
        status,
        code: NotionErrorCode::from_http_status(status),
        message: format!("scripted HTTP {}", status),
    }
}

pub fn connection_reset() -> AppError {
    AppError::Network {
        condition: NetworkCondition::ConnectionReset,
        message: "connection reset by peer".to_string(),
    }
}

// --- Resources ---

fn resource(id: &str, kind: ResourceKind, properties: Vec<(&str, PropertyValue)>) -> Resource {
    Resource {
        id: ResourceId::new(id),
        kind,
        properties: properties
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect::<IndexMap<_, _>>(),
        created_time: Utc.with_ymd_and_hms(2025, 6, 20, 9, 0, 0).unwrap(),
        last_edited_time: Utc.with_ymd_and_hms(2025, 6, 21, 17, 30, 0).unwrap(),
        url: None,
        database_title: Vec::new(),
    }
}

pub fn page(id: &str, title: &str) -> Resource {
    resource(
        id,
        ResourceKind::Page,
        vec![("Name", PropertyValue::Title(vec![RichTextItem::plain_text(title)]))],
    )
}

pub fn database(id: &str, title: &str) -> Resource {
    let mut db = resource(
        id,
        ResourceKind::Database,
        vec![("Title", PropertyValue::Title(Vec::new()))],
    );
    db.database_title = vec![RichTextItem::plain_text(title)];
    db
}

// --- Blocks ---

pub fn text(s: &str) -> TextBlockContent {
    TextBlockContent::new(vec![RichTextItem::plain_text(s)])
}

pub fn paragraph(id: &str, s: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(id),
        content: text(s),
    })
}

pub fn child_page(id: &str, title: &str) -> Block {
    Block::ChildPage(ChildPageBlock {
        common: BlockCommon::new(id),
        title: title.to_string(),
    })
}

/// `count` paragraphs whose ids start at `first`.
pub fn paragraphs(first: usize, count: usize) -> Vec<Block> {
    (first..first + count)
        .map(|n| paragraph(&format!("block-{}", n), &format!("paragraph {}", n)))
        .collect()
}
