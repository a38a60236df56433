//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Default Notion REST API base
pub const DEFAULT_NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Notion API version sent with every request
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Notion integration secret
    pub notion_api_key: Option<String>,

    /// Id of the Notion database receiving waitlist entries
    /// Example: 1cac2c53-a70a-8033-b8bd-f2b914caf25a
    pub notion_database_id: Option<String>,

    /// Override for the Notion API base URL (mostly for testing)
    pub notion_api_base: Option<String>,

    /// Override for the Notion-Version header
    pub notion_version: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        Self {
            notion_api_key: env_var("NOTION_API_KEY"),
            notion_database_id: env_var("NOTION_DATABASE_ID"),
            notion_api_base: env_var("NOTION_API_BASE"),
            notion_version: env_var("NOTION_VERSION"),
        }
    }

    /// Check if the Notion key is configured
    pub fn has_notion_key(&self) -> bool {
        self.notion_api_key.is_some()
    }

    /// Check if the waitlist database is configured
    pub fn has_database_id(&self) -> bool {
        self.notion_database_id.is_some()
    }

    /// Notion API base URL, without trailing slash
    pub fn notion_api_base(&self) -> &str {
        self.notion_api_base
            .as_deref()
            .unwrap_or(DEFAULT_NOTION_API_BASE)
            .trim_end_matches('/')
    }

    pub fn notion_version(&self) -> &str {
        self.notion_version
            .as_deref()
            .unwrap_or(DEFAULT_NOTION_VERSION)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
