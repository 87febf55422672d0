// src/main.rs
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notion_typed::api::{
    AppendChildrenParameters, CreatePageParameters, ListChildrenParameters, PaginationParameters,
    QueryDatabaseParameters, SearchParameters, UpdatePageParameters,
};
use notion_typed::config::{Command, CommandLineInput};
use notion_typed::{
    encode, Block, BlockId, ClientConfig, DatabaseId, Filter, NotionClient, PageId, Parent,
    RichTextItem, UserId, WireFormat,
};

/// Sets up logging on stderr so stdout carries only JSON.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

fn pagination(start_cursor: Option<String>, page_size: Option<u32>) -> PaginationParameters {
    PaginationParameters::new(start_cursor.unwrap_or_default(), page_size.unwrap_or(0))
}

fn parse_body(body: &str) -> anyhow::Result<serde_json::Value> {
    serde_json::from_str(body).context("Body is not valid JSON")
}

fn print_json<T: WireFormat>(value: &T) -> anyhow::Result<()> {
    let wire = encode(value)?;
    println!("{}", serde_json::to_string_pretty(&wire)?);
    Ok(())
}

async fn run(client: &NotionClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::RetrievePage { page_id } => {
            let page = client.pages().retrieve(&PageId::parse(&page_id)?).await?;
            print_json(&page)
        }
        Command::ListBlockChildren {
            block_id,
            start_cursor,
            page_size,
        } => {
            let parameters = ListChildrenParameters::new(BlockId::parse(&block_id)?)
                .with_pagination(pagination(start_cursor, page_size));
            let children = client.blocks().list_children(&parameters).await?;
            print_json(&children)
        }
        Command::CreatePage {
            parent_id,
            body,
            under_page,
        } => {
            let parent = if under_page {
                Parent::Page(PageId::parse(&parent_id)?)
            } else {
                Parent::Database(DatabaseId::parse(&parent_id)?)
            };
            let parameters = CreatePageParameters::from_wire_body(parent, &parse_body(&body)?)?;
            let page = client.pages().create(&parameters).await?;
            print_json(&page)
        }
        Command::UpdatePage { page_id, body } => {
            let parameters =
                UpdatePageParameters::from_wire_body(PageId::parse(&page_id)?, &parse_body(&body)?)?;
            let page = client.pages().update(&parameters).await?;
            print_json(&page)
        }
        Command::AppendParagraph { block_id, text } => {
            let parameters = AppendChildrenParameters::new(
                BlockId::parse(&block_id)?,
                vec![Block::paragraph(vec![RichTextItem::text(text)])],
            );
            let block = client.blocks().append_children(&parameters).await?;
            print_json(&block)
        }
        Command::RetrieveDatabase { database_id } => {
            let database = client
                .databases()
                .retrieve(&DatabaseId::parse(&database_id)?)
                .await?;
            print_json(&database)
        }
        Command::ListDatabases {
            start_cursor,
            page_size,
        } => {
            let databases = client
                .databases()
                .list(&pagination(start_cursor, page_size))
                .await?;
            print_json(&databases)
        }
        Command::QueryDatabase {
            database_id,
            filter,
            start_cursor,
            page_size,
        } => {
            let mut parameters = QueryDatabaseParameters::new(DatabaseId::parse(&database_id)?)
                .with_pagination(pagination(start_cursor, page_size));
            if let Some(filter) = filter {
                let raw: serde_json::Value =
                    serde_json::from_str(&filter).context("Filter is not valid JSON")?;
                parameters = parameters.with_filter(Filter::from_wire(&raw)?);
            }
            let pages = client.databases().query(&parameters).await?;
            print_json(&pages)
        }
        Command::RetrieveUser { user_id } => {
            let user = client.users().retrieve(&UserId::parse(&user_id)?).await?;
            print_json(&user)
        }
        Command::ListUsers {
            start_cursor,
            page_size,
        } => {
            let users = client.users().list(&pagination(start_cursor, page_size)).await?;
            print_json(&users)
        }
        Command::Search {
            query,
            start_cursor,
            page_size,
        } => {
            let parameters =
                SearchParameters::new(query).with_pagination(pagination(start_cursor, page_size));
            let results = client.search().search(&parameters).await?;
            print_json(&results)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ClientConfig::from_env()?;
    log::debug!("Using {} with Notion-Version {}", config.base_url, config.notion_version);
    let client = NotionClient::new(&config)?;

    run(&client, cli.command).await
}
