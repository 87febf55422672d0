// src/config.rs
use crate::constants::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION, DEFAULT_USER_AGENT,
    NOTION_VERSION_ENV,
};
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::{Parser, Subcommand};

/// Connection settings for a [`crate::api::NotionClient`].
///
/// Immutable once built; the `with_*` adjusters consume and return a new value.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: ValidatedUrl,
    pub notion_version: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: Self::default_base_url(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Reads `NOTION_API_KEY` (required), `NOTION_BASE_URL` and `NOTION_VERSION`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key_str = lookup(API_KEY_ENV).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })?;

        let mut config = Self::new(ApiKey::new(api_key_str)?);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(version) = lookup(NOTION_VERSION_ENV) {
            config = config.with_notion_version(version);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AppError> {
        self.base_url = ValidatedUrl::parse(base_url)?;
        Ok(self)
    }

    pub fn with_notion_version(mut self, notion_version: impl Into<String>) -> Self {
        self.notion_version = notion_version.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn default_base_url() -> ValidatedUrl {
        ValidatedUrl::parse(DEFAULT_BASE_URL).expect("Default base URL should be valid")
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Retrieve a page by ID or URL
    RetrievePage { page_id: String },

    /// List the direct children of a block or page
    ListBlockChildren {
        block_id: String,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Create a page in a database, or under a page with --under-page
    CreatePage {
        parent_id: String,
        /// Body as JSON: '{"properties":{...},"children":[...]}'
        body: String,
        #[arg(long, default_value_t = false)]
        under_page: bool,
    },

    /// Update page properties from a JSON body '{"properties":{...}}'
    UpdatePage { page_id: String, body: String },

    /// Append a paragraph of plain text to a block or page
    AppendParagraph { block_id: String, text: String },

    /// Retrieve a database schema
    RetrieveDatabase { database_id: String },

    /// List databases shared with the integration
    ListDatabases {
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Query a database, optionally with a JSON filter
    QueryDatabase {
        database_id: String,
        /// Filter as JSON, e.g. '{"property":"Done","checkbox":{"equals":true}}'
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Retrieve a user
    RetrieveUser { user_id: String },

    /// List users of the workspace
    ListUsers {
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Search pages and databases by title
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        start_cursor: Option<String>,
        #[arg(long)]
        page_size: Option<u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "secret_0123456789abcdefghij";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[(API_KEY_ENV, KEY)])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.notion.com/");
        assert_eq!(config.notion_version, "2021-05-13");
        assert!(config.user_agent.starts_with("notion-typed/"));
    }

    #[test]
    fn environment_overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_KEY_ENV, KEY),
            (BASE_URL_ENV, "http://localhost:8080"),
            (NOTION_VERSION_ENV, "2022-06-28"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.join_path("/v1/users"), "http://localhost:8080/v1/users");
        assert_eq!(config.notion_version, "2022-06-28");
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = ClientConfig::new(ApiKey::new(KEY).unwrap());
        assert!(matches!(
            config.with_base_url("ftp://example.com"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn parses_subcommands() {
        let input = CommandLineInput::parse_from([
            "notion-typed",
            "-v",
            "query-database",
            "897e5a76ae524b489fdfe71f5945d1af",
            "--page-size",
            "10",
        ]);
        assert!(input.verbose);
        assert_eq!(
            input.command,
            Command::QueryDatabase {
                database_id: "897e5a76ae524b489fdfe71f5945d1af".to_string(),
                filter: None,
                start_cursor: None,
                page_size: Some(10),
            }
        );
    }

    #[test]
    fn parses_page_writes() {
        let input = CommandLineInput::parse_from([
            "notion-typed",
            "create-page",
            "b55c9c91384d452b81dbd1ef79372b75",
            r#"{"properties":{}}"#,
            "--under-page",
        ]);
        assert_eq!(
            input.command,
            Command::CreatePage {
                parent_id: "b55c9c91384d452b81dbd1ef79372b75".to_string(),
                body: r#"{"properties":{}}"#.to_string(),
                under_page: true,
            }
        );

        let input = CommandLineInput::parse_from([
            "notion-typed",
            "update-page",
            "6eaac3811afd4f368209b572e13eace4",
            r#"{"properties":{"In stock":{"type":"checkbox","checkbox":true}}}"#,
        ]);
        assert!(matches!(input.command, Command::UpdatePage { .. }));
    }
}
