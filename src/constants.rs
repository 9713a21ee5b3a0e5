// src/constants.rs
//! Domain constants that define the operational boundaries of the reader.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Every list request asks for the maximum;
/// callers cannot override it.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// The Notion API version this client speaks.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Base URL for every REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1/";

/// Prefix for browser links built from object ids.
pub const NOTION_WEB_BASE_URL: &str = "https://www.notion.so/";

/// Property name the database query filter matches against.
pub const DATABASE_TITLE_PROPERTY: &str = "Title";

// ---------------------------------------------------------------------------
// Retry boundaries
// ---------------------------------------------------------------------------

/// Retries after the first attempt before a call is declared failed.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// First backoff delay in milliseconds; doubles on every retry.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;

/// Upper bound for a single backoff delay in milliseconds.
pub const DEFAULT_MAX_DELAY_MS: u64 = 10_000;

/// Upper bound used by the command-line front end.
pub const CLI_MAX_DELAY_MS: u64 = 8_000;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Characters of Markdown printed to the terminal when no output file is given.
pub const MARKDOWN_PREVIEW_LENGTH: usize = 2_000;

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable holding the root page id (optional).
pub const ROOT_PAGE_ENV: &str = "NOTION_ROOT_PAGE_ID";

/// Credentials file consulted when the environment has no API key.
pub const DEFAULT_TOOLS_FILE: &str = "TOOLS.md";

/// Placeholder left in shared copies of the tools file; never a real value.
pub const REDACTED_MARKER: &str = "[REDACTED]";

/// Template written by the `setup` command.
pub const ENV_TEMPLATE_FILE: &str = ".env.example";
