// src/api/parser.rs
//! Turns raw HTTP bodies into domain types.
//!
//! Success bodies are validated against the schemas in `responses`; error
//! bodies become [`AppError::Api`], falling back to the HTTP status when the
//! body is not a Notion error object.

use super::client::ApiResponse;
use super::pagination::ResultsPage;
use super::responses::{BlockResponse, ErrorResponse, ObjectResponse, PaginatedResponse, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Resource};
use reqwest::StatusCode;

/// Parse any Notion API response into `T`, or into the error it describes.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::Deserialization {
            source: e,
            body: preview(body),
        }
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<ErrorResponse>(body) {
        log::debug!(
            "Notion error from {}: {} ({:?})",
            url,
            notion_error.code,
            notion_error.request_id
        );
        return AppError::Api {
            status: notion_error.status,
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
        };
    }

    AppError::Api {
        status: status.as_u16(),
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse a single page or database object.
pub fn parse_resource_response(result: ApiResponse<String>) -> Result<Resource, AppError> {
    let object: ObjectResponse = parse_api_response(result)?;
    object.to_domain()
}

/// Parse one page of a block-children listing.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<ResultsPage<Block>, AppError> {
    let response: PaginatedResponse<BlockResponse> = parse_api_response(result)?;
    response.into_domain_page()
}

/// Parse one page of a search or database-query listing.
pub fn parse_resources_pagination(
    result: ApiResponse<String>,
) -> Result<ResultsPage<Resource>, AppError> {
    let response: PaginatedResponse<ObjectResponse> = parse_api_response(result)?;
    response.into_domain_page()
}
