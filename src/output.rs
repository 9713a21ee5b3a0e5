// src/output.rs
//! Writes rendered Markdown to disk or trims it for the terminal.
//!
//! This is the only place where the library touches the filesystem.

use crate::constants::{API_KEY_ENV, ROOT_PAGE_ENV};
use crate::error::AppError;
use std::fs;
use std::path::Path;

/// Writes content to a file, creating parent directories as needed.
///
/// Returns the number of bytes written.
pub fn write_markdown(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

/// Writes the credentials template unless the file already exists.
///
/// Returns `false` when an existing file was left alone.
pub fn write_env_template(path: &Path) -> Result<bool, AppError> {
    if path.exists() {
        log::debug!("{} already exists, not overwriting", path.display());
        return Ok(false);
    }

    let template = format!(
        "# Notion API settings\n\
         # Create an integration at https://www.notion.so/my-integrations\n\
         {}=your_notion_integration_token_here\n\
         \n\
         # Root page id (optional): the 32 hex characters at the end of the page URL\n\
         {}=your_root_page_id_here\n\
         \n\
         # Keep the real .env out of version control.\n",
        API_KEY_ENV, ROOT_PAGE_ENV
    );
    write_markdown(path, &template)?;
    Ok(true)
}

/// The first `limit` characters of `content`, with a marker when cut.
pub fn preview(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => format!(
            "{}\n... ({} more characters)",
            &content[..cut],
            content[cut..].chars().count()
        ),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(preview("# Title\n\nbody", 2000), "# Title\n\nbody");
    }

    #[test]
    fn long_content_is_cut_on_a_char_boundary() {
        let content = "ä".repeat(10);
        assert_eq!(preview(&content, 4), "ääää\n... (6 more characters)");
    }

    #[test]
    fn writes_into_missing_directories() {
        let dir = std::env::temp_dir().join(format!("notion_reader_out_{}", std::process::id()));
        let path = dir.join("nested").join("page.md");

        let written = write_markdown(&path, "# Hello\n\n").unwrap();

        assert_eq!(written, 9);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hello\n\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn env_template_never_overwrites() {
        let dir = std::env::temp_dir().join(format!("notion_reader_env_{}", std::process::id()));
        let path = dir.join(".env.example");

        assert!(write_env_template(&path).unwrap());
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.contains("NOTION_API_KEY=your_notion_integration_token_here"));

        fs::write(&path, "custom").unwrap();
        assert!(!write_env_template(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");

        fs::remove_dir_all(&dir).unwrap();
    }
}
