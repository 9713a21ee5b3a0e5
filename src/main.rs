// src/main.rs
//! Command-line entry point: reads pages, searches and databases from a Notion workspace.

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_reader::config::{Command, CommandLineInput, ReaderConfig};
use notion_reader::constants::{ENV_TEMPLATE_FILE, MARKDOWN_PREVIEW_LENGTH};
use notion_reader::output::{preview, write_env_template, write_markdown};
use notion_reader::{NotionHttpClient, NotionId, NotionReader, Resource};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const SEARCH_PAGE_LISTING: usize = 10;
const SEARCH_DATABASE_LISTING: usize = 5;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_reader.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the reader and prints configuration warnings once.
fn connect(cli: &CommandLineInput) -> anyhow::Result<(NotionReader, ReaderConfig)> {
    let config = ReaderConfig::resolve(cli).context("could not load Notion configuration")?;

    if !config.warnings.is_empty() {
        eprintln!("⚠️  Configuration warnings:");
        for warning in &config.warnings {
            eprintln!("  {}", warning);
        }
        eprintln!();
    }

    let client = NotionHttpClient::new(&config.api_key)?;
    let reader = NotionReader::new(Arc::new(client), config.retry);
    Ok((reader, config))
}

fn parse_id(input: &str) -> anyhow::Result<NotionId> {
    NotionId::parse(input).with_context(|| format!("'{}' is not a Notion URL or ID", input))
}

fn print_resource(resource: &Resource) {
    println!("Title: {}", resource.display_title());
    println!("Kind: {}", resource.kind);
    println!("URL: {}", resource.url.clone().unwrap_or_else(|| resource.web_url()));
    println!("Created: {}", resource.created_time.to_rfc3339());
    println!("Last edited: {}", resource.last_edited_time.to_rfc3339());

    let properties = resource.property_summary();
    if !properties.is_empty() {
        println!("Properties: {}", properties.join(", "));
    }
}

async fn get_command(reader: &NotionReader, id: &NotionId) -> anyhow::Result<()> {
    println!("📄 Retrieving page {}", id);
    let resource = reader
        .get_resource(id)
        .await
        .with_context(|| format!("could not retrieve page {}", id))?;
    print_resource(&resource);
    Ok(())
}

async fn search_command(reader: &NotionReader, query: &str) -> anyhow::Result<()> {
    println!("🔍 Searching for \"{}\"", query);
    let results = reader
        .search_workspace(query)
        .await
        .with_context(|| format!("search for '{}' failed", query))?;

    println!("Pages: {}", results.pages.len());
    println!("Databases: {}", results.databases.len());

    if !results.pages.is_empty() {
        println!("\n📄 Pages:");
        for page in results.pages.iter().take(SEARCH_PAGE_LISTING) {
            let title = page.display_title();
            let title = if title.is_empty() { page.id.to_string() } else { title };
            println!("- {} ({})", title, page.id);
            println!("  {}", page.web_url());
        }
        if results.pages.len() > SEARCH_PAGE_LISTING {
            println!("  ... and {} more", results.pages.len() - SEARCH_PAGE_LISTING);
        }
    }

    if !results.databases.is_empty() {
        println!("\n🗂️  Databases:");
        for database in results.databases.iter().take(SEARCH_DATABASE_LISTING) {
            let title = database.display_title();
            let title = if title.is_empty() { database.id.to_string() } else { title };
            println!("- {} ({})", title, database.id);
        }
        if results.databases.len() > SEARCH_DATABASE_LISTING {
            println!(
                "  ... and {} more",
                results.databases.len() - SEARCH_DATABASE_LISTING
            );
        }
    }

    Ok(())
}

async fn children_command(reader: &NotionReader, id: &NotionId) -> anyhow::Result<()> {
    println!("👶 Listing child pages of {}", id);
    let children = reader
        .get_all_child_pages(id)
        .await
        .with_context(|| format!("could not list child pages of {}", id))?;

    println!("Child pages: {}", children.len());
    for child in &children {
        println!("- {} ({})", child.title, child.id);
        println!("  {}", child.url);
    }
    Ok(())
}

async fn markdown_command(
    reader: &NotionReader,
    id: &NotionId,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    println!("📝 Converting {} to Markdown", id);
    let markdown = reader
        .get_resource_as_markdown(id)
        .await
        .with_context(|| format!("could not render page {}", id))?;

    match output {
        Some(path) => {
            let bytes = write_markdown(path, &markdown)
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("✓ Markdown saved to {}", path.display());
            println!("  {:.2} KB", bytes as f64 / 1024.0);
        }
        None => {
            println!("---");
            println!("{}", preview(&markdown, MARKDOWN_PREVIEW_LENGTH));
            println!("---");
        }
    }
    Ok(())
}

async fn database_command(
    reader: &NotionReader,
    id: &NotionId,
    query: Option<&str>,
) -> anyhow::Result<()> {
    println!("🗂️  Retrieving database {}", id);
    let database = reader
        .get_database(id)
        .await
        .with_context(|| format!("could not retrieve database {}", id))?;
    print_resource(&database);

    let rows = reader
        .query_database_all(id, query)
        .await
        .with_context(|| format!("could not query database {}", id))?;

    match query {
        Some(text) => println!("\nRows with \"{}\" in the title: {}", text, rows.len()),
        None => println!("\nRows: {}", rows.len()),
    }
    for row in &rows {
        println!("- {} ({})", row.display_title(), row.id);
    }
    Ok(())
}

async fn test_command(reader: &NotionReader, config: &ReaderConfig) -> anyhow::Result<()> {
    println!("🧪 Testing the connection");
    println!("✓ Configuration loaded ({:?})", config.source);

    let results = reader
        .search_workspace("test")
        .await
        .context("connection test failed; check NOTION_API_KEY and the integration's page access")?;
    println!("✓ API reachable ({} search results)", results.total());
    Ok(())
}

async fn run(cli: &CommandLineInput) -> anyhow::Result<()> {
    if !cli.command.needs_credentials() {
        let path = Path::new(ENV_TEMPLATE_FILE);
        if write_env_template(path)? {
            println!("✓ Created {}; copy it to .env and fill in your key", path.display());
        } else {
            println!("{} already exists", path.display());
        }
        return Ok(());
    }

    let (reader, config) = connect(cli)?;

    match &cli.command {
        Command::Get { id } => get_command(&reader, &parse_id(id)?).await,
        Command::Search { query } => search_command(&reader, query).await,
        Command::Children { id } => children_command(&reader, &parse_id(id)?).await,
        Command::Root => get_command(&reader, config.require_root_page()?).await,
        Command::RootChildren => children_command(&reader, config.require_root_page()?).await,
        Command::Markdown { id, output } => {
            markdown_command(&reader, &parse_id(id)?, output.as_deref()).await
        }
        Command::Database { id, query } => {
            database_command(&reader, &parse_id(id)?, query.as_deref()).await
        }
        Command::Test => test_command(&reader, &config).await,
        Command::Setup => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    run(&cli).await?;

    Ok(())
}
