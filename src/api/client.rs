// src/api/client.rs
//! HTTP client for the Notion REST API.
//!
//! A thin wrapper around reqwest: authentication headers, endpoint joining
//! and one request per call. Retrying and pagination live above this layer.

use super::pagination::ResultsPage;
use super::parser;
use crate::constants::{DATABASE_TITLE_PROPERTY, NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::AppError;
use crate::model::{Block, Resource};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let base_url = Url::parse(NOTION_API_BASE_URL).map_err(|e| AppError::InternalError {
            message: format!("Invalid API base URL {}", NOTION_API_BASE_URL),
            source: Some(Box::new(e)),
        })?;
        Self::with_base_url(api_key, base_url)
    }

    /// Creates a client against another base URL, e.g. a local stand-in server.
    pub fn with_base_url(api_key: &ApiKey, base_url: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, AppError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| AppError::InternalError {
                message: format!("Cannot build URL for endpoint '{}'", endpoint),
                source: Some(Box::new(e)),
            })
    }

    /// Makes a GET request to the specified endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint)?;
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint)?;
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint)?;
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

impl std::fmt::Debug for NotionHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionHttpClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChildrenQuery<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DatabaseQueryRequest<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<TitleFilter<'a>>,
}

#[derive(Debug, Serialize)]
struct TitleFilter<'a> {
    property: &'static str,
    rich_text: ContainsCondition<'a>,
}

#[derive(Debug, Serialize)]
struct ContainsCondition<'a> {
    contains: &'a str,
}

#[async_trait::async_trait]
impl super::NotionApi for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Resource, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let response = self.get(&endpoint).await?;
        parser::parse_resource_response(extract_response_text(response).await?)
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Resource, AppError> {
        let endpoint = format!("databases/{}", id.to_hyphenated());
        let response = self.get(&endpoint).await?;
        parser::parse_resource_response(extract_response_text(response).await?)
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let query = ChildrenQuery {
            page_size,
            start_cursor: cursor,
        };
        let response = self.get_with_query(&endpoint, &query).await?;
        parser::parse_blocks_pagination(extract_response_text(response).await?)
    }

    async fn search(
        &self,
        query: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Resource>, AppError> {
        let body = SearchRequest {
            query,
            page_size,
            start_cursor: cursor,
        };
        let response = self.post("search", &body).await?;
        parser::parse_resources_pagination(extract_response_text(response).await?)
    }

    async fn query_database(
        &self,
        database: &NotionId,
        title_contains: Option<&str>,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ResultsPage<Resource>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let body = DatabaseQueryRequest {
            page_size,
            start_cursor: cursor,
            filter: title_contains.map(|contains| TitleFilter {
                property: DATABASE_TITLE_PROPERTY,
                rich_text: ContainsCondition { contains },
            }),
        };
        let response = self.post(&endpoint, &body).await?;
        parser::parse_resources_pagination(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
