// src/config.rs
//! Command-line arguments and credential resolution from the environment or a tools file.

use crate::api::RetryPolicy;
use crate::constants::{
    API_KEY_ENV, CLI_MAX_DELAY_MS, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_TOOLS_FILE, REDACTED_MARKER, ROOT_PAGE_ENV,
};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Fallback credentials file, read when NOTION_API_KEY is not set
    #[arg(long, default_value = DEFAULT_TOOLS_FILE)]
    pub tools_file: PathBuf,

    /// Retries after the first attempt of each API call
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Backoff before the first retry, doubled on each further retry
    #[arg(long, default_value_t = DEFAULT_BASE_DELAY_MS)]
    pub base_delay_ms: u64,

    /// Upper bound for a single backoff
    #[arg(long, default_value_t = CLI_MAX_DELAY_MS)]
    pub max_delay_ms: u64,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a page's title, kind and property names
    Get {
        /// Page URL or ID
        id: String,
    },
    /// Search the workspace for pages and databases
    Search { query: String },
    /// List a page's child pages
    Children {
        /// Page URL or ID
        id: String,
    },
    /// Show the configured root page
    Root,
    /// List the root page's child pages
    RootChildren,
    /// Render a page as Markdown
    Markdown {
        /// Page URL or ID
        id: String,
        /// Write to this file instead of printing a preview
        output: Option<PathBuf>,
    },
    /// Show a database, optionally querying rows by title
    Database {
        /// Database URL or ID
        id: String,
        /// Only rows whose Title contains this text
        #[arg(long)]
        query: Option<String>,
    },
    /// Check connectivity and credentials
    Test,
    /// Write a .env.example template for the credentials
    Setup,
}

impl Command {
    /// Whether the command talks to the API and therefore needs credentials.
    pub fn needs_credentials(&self) -> bool {
        !matches!(self, Command::Setup)
    }
}

/// Where the credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    ToolsFile,
}

/// Credentials as found, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCredentials {
    pub api_key: String,
    pub root_page_id: Option<String>,
    pub source: CredentialSource,
    /// Advisory messages for the user, to be printed once.
    pub warnings: Vec<String>,
}

/// Resolved configuration, validated and ready to build a reader.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub api_key: ApiKey,
    pub root_page_id: Option<NotionId>,
    pub source: CredentialSource,
    pub warnings: Vec<String>,
    pub retry: RetryPolicy,
}

impl ReaderConfig {
    /// Resolves credentials from the environment (or the tools file) and the
    /// retry settings from the command line.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let raw = resolve_credentials(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(ROOT_PAGE_ENV).ok(),
            &cli.tools_file,
        )?;
        let retry = RetryPolicy::from_millis(cli.max_retries, cli.base_delay_ms, cli.max_delay_ms)?;
        Self::from_raw(raw, retry)
    }

    pub fn from_raw(raw: RawCredentials, retry: RetryPolicy) -> Result<Self, AppError> {
        let api_key = ApiKey::new(raw.api_key)?;
        let root_page_id = raw
            .root_page_id
            .as_deref()
            .map(NotionId::parse)
            .transpose()?;

        Ok(Self {
            api_key,
            root_page_id,
            source: raw.source,
            warnings: raw.warnings,
            retry,
        })
    }

    /// The root page id, or an error naming how to configure it.
    pub fn require_root_page(&self) -> Result<&NotionId, AppError> {
        self.root_page_id.as_ref().ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "no root page configured; set {} or add a 'Root Page ID:' line to the tools file",
                ROOT_PAGE_ENV
            ))
        })
    }
}

/// Picks credentials: environment first, then the tools file.
pub fn resolve_credentials(
    env_api_key: Option<String>,
    env_root_page_id: Option<String>,
    tools_file: &Path,
) -> Result<RawCredentials, AppError> {
    let env_api_key = env_api_key.filter(|key| !key.trim().is_empty());
    let env_root_page_id = env_root_page_id.filter(|id| !id.trim().is_empty());

    if let Some(api_key) = env_api_key {
        let warnings = if env_root_page_id.is_none() {
            vec![format!("{} is not set (optional)", ROOT_PAGE_ENV)]
        } else {
            Vec::new()
        };
        return Ok(RawCredentials {
            api_key,
            root_page_id: env_root_page_id,
            source: CredentialSource::Environment,
            warnings,
        });
    }

    log::debug!(
        "{} not set, falling back to {}",
        API_KEY_ENV,
        tools_file.display()
    );

    let content = std::fs::read_to_string(tools_file).map_err(|e| {
        AppError::MissingConfiguration(format!(
            "{} is not set and {} could not be read ({}).\n{}",
            API_KEY_ENV,
            tools_file.display(),
            e,
            remedies()
        ))
    })?;

    let mut credentials = parse_tools_file(&content).ok_or_else(|| {
        AppError::MissingConfiguration(format!(
            "no usable 'API Secret:' line in {}.\n{}",
            tools_file.display(),
            remedies()
        ))
    })?;

    credentials.warnings = vec![
        format!(
            "Security warning: {} is not set; read the API key from {}",
            API_KEY_ENV,
            tools_file.display()
        ),
        format!(
            "Recommended: put {}=your_key_here in the environment or a .env file",
            API_KEY_ENV
        ),
    ];
    Ok(credentials)
}

lazy_static! {
    static ref API_SECRET_LINE: Regex = Regex::new(r"API Secret:[ \t]*(\S+)")
        .expect("Failed to compile API secret regex - this is a bug in the code");
    static ref ROOT_PAGE_LINE: Regex = Regex::new(r"Root Page ID:[ \t]*(\S+)")
        .expect("Failed to compile root page regex - this is a bug in the code");
}

/// Extracts credentials from tools-file text. Redacted values are skipped.
pub fn parse_tools_file(content: &str) -> Option<RawCredentials> {
    fn first_value(pattern: &Regex, content: &str) -> Option<String> {
        pattern
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .find(|value| value != REDACTED_MARKER)
    }

    let api_key = first_value(&API_SECRET_LINE, content)?;
    Some(RawCredentials {
        api_key,
        root_page_id: first_value(&ROOT_PAGE_LINE, content),
        source: CredentialSource::ToolsFile,
        warnings: Vec::new(),
    })
}

fn remedies() -> String {
    format!(
        "Fix with one of:\n  1. export {}=your_key_here\n  2. add {}=your_key_here to a .env file\n  3. put a valid 'API Secret:' line in the tools file",
        API_KEY_ENV, API_KEY_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

    #[test]
    fn environment_wins_over_tools_file() {
        let raw = resolve_credentials(
            Some(KEY.to_string()),
            Some("12345678123456781234567812345678".to_string()),
            Path::new("/definitely/not/here/TOOLS.md"),
        )
        .unwrap();

        assert_eq!(raw.source, CredentialSource::Environment);
        assert_eq!(raw.api_key, KEY);
        assert!(raw.warnings.is_empty());
    }

    #[test]
    fn missing_root_page_is_only_a_warning() {
        let raw = resolve_credentials(Some(KEY.to_string()), None, Path::new("TOOLS.md")).unwrap();
        assert_eq!(raw.root_page_id, None);
        assert_eq!(raw.warnings.len(), 1);
    }

    #[test]
    fn unreadable_tools_file_is_missing_configuration() {
        let err = resolve_credentials(None, None, Path::new("/definitely/not/here/TOOLS.md"))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn tools_file_lines_are_found_anywhere() {
        let content = "\
## Notion
- API Secret: [REDACTED]
- API Secret: secret_real_value_1234567890
- Root Page ID: 1234567812345678123456781234567a
";
        let raw = parse_tools_file(content).unwrap();
        assert_eq!(raw.api_key, "secret_real_value_1234567890");
        assert_eq!(
            raw.root_page_id.as_deref(),
            Some("1234567812345678123456781234567a")
        );
        assert_eq!(raw.source, CredentialSource::ToolsFile);
    }

    #[test]
    fn redacted_only_tools_file_has_no_credentials() {
        assert_eq!(parse_tools_file("API Secret: [REDACTED]\n"), None);
        assert_eq!(parse_tools_file("nothing to see"), None);
    }

    #[test]
    fn redacted_root_page_is_ignored() {
        let raw =
            parse_tools_file("API Secret: ntn_abcdefghijklmnopqrstu\nRoot Page ID: [REDACTED]\n")
                .unwrap();
        assert_eq!(raw.root_page_id, None);
    }

    #[test]
    fn tools_file_fallback_warns_twice() {
        let dir = std::env::temp_dir().join(format!("notion_reader_cfg_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("TOOLS.md");
        std::fs::write(&path, format!("API Secret: {}\n", KEY)).unwrap();

        let raw = resolve_credentials(None, None, &path).unwrap();
        assert_eq!(raw.source, CredentialSource::ToolsFile);
        assert_eq!(raw.warnings.len(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn resolved_config_validates_key_and_root_id() {
        let raw = RawCredentials {
            api_key: KEY.to_string(),
            root_page_id: Some(
                "https://www.notion.so/Home-12345678123456781234567812345678".into(),
            ),
            source: CredentialSource::Environment,
            warnings: Vec::new(),
        };
        let config = ReaderConfig::from_raw(raw, RetryPolicy::default()).unwrap();
        assert_eq!(
            config.require_root_page().unwrap().as_str(),
            "12345678123456781234567812345678"
        );

        let bad = RawCredentials {
            api_key: "nope".to_string(),
            root_page_id: None,
            source: CredentialSource::Environment,
            warnings: Vec::new(),
        };
        assert!(ReaderConfig::from_raw(bad, RetryPolicy::default()).is_err());
    }

    #[test]
    fn cli_parses_markdown_with_output() {
        let cli = CommandLineInput::try_parse_from([
            "notion-reader",
            "--max-retries",
            "5",
            "markdown",
            "abc",
            "out.md",
        ])
        .unwrap();
        assert_eq!(cli.max_retries, 5);
        assert_eq!(cli.max_delay_ms, CLI_MAX_DELAY_MS);
        assert_eq!(
            cli.command,
            Command::Markdown {
                id: "abc".into(),
                output: Some(PathBuf::from("out.md")),
            }
        );
    }
}
