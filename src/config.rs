// file: src/config.rs
// description: application configuration management with toml and env support
// reference: https://docs.rs/config

use crate::error::{PortfolioError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotionConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Status value that marks a project as published.
    #[serde(default = "default_published_status")]
    pub published_status: String,
    /// Status value that marks the single landing page.
    #[serde(default = "default_index_status")]
    pub index_status: String,
    /// Property used to order the project feed.
    #[serde(default = "default_ordering_property")]
    pub ordering_property: String,
}

fn default_base_url() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_api_version() -> String {
    "2022-06-28".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_published_status() -> String {
    "done".to_string()
}

fn default_index_status() -> String {
    "Index".to_string()
}

fn default_ordering_property() -> String {
    "ordering".to_string()
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_id: String::new(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            published_status: default_published_status(),
            index_status: default_index_status(),
            ordering_property: default_ordering_property(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            let default_path = Path::new("config/default.toml");
            if default_path.exists() {
                builder = builder.add_source(config::File::from(default_path));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PORTFOLIO")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| PortfolioError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| PortfolioError::Config(e.to_string()))?;

        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    /// The Netlify deployment configured the store through bare NOTION_*
    /// variables; they still win over empty layered values.
    fn apply_env_fallbacks(&mut self) {
        if self.notion.api_key.is_empty() {
            if let Ok(key) = env::var("NOTION_KEY") {
                self.notion.api_key = key;
            }
        }
        if self.notion.database_id.is_empty() {
            if let Ok(db) = env::var("NOTION_DB") {
                self.notion.database_id = db;
            }
        }
        if let Ok(version) = env::var("NOTION_VERSION") {
            self.notion.api_version = version;
        }
    }

    pub fn default_config() -> Self {
        Self {
            notion: NotionConfig::default(),
            content: ContentConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.notion.api_key.is_empty() {
            return Err(PortfolioError::Config(
                "Missing Notion API key (set PORTFOLIO__NOTION__API_KEY or NOTION_KEY)".to_string(),
            ));
        }

        if self.notion.database_id.is_empty() {
            return Err(PortfolioError::Config(
                "Missing Notion database id (set PORTFOLIO__NOTION__DATABASE_ID or NOTION_DB)"
                    .to_string(),
            ));
        }

        if !self.notion.base_url.starts_with("http") {
            return Err(PortfolioError::Config(format!(
                "Invalid Notion base URL: {}",
                self.notion.base_url
            )));
        }

        if self.notion.timeout_secs == 0 {
            return Err(PortfolioError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_shape() {
        let config = Config::default_config();
        assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
        assert_eq!(config.notion.api_version, "2022-06-28");
        assert_eq!(config.content.published_status, "done");
        assert_eq!(config.content.index_status, "Index");
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let config = Config::default_config();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.notion.api_key = "secret_abc".to_string();
        assert!(config.validate().is_err());

        config.notion.database_id = "d9824bdc84454327be8b5b47500af6ce".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.notion.api_key = "secret_abc".to_string();
        config.notion.database_id = "db".to_string();
        config.notion.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_file_deserializes_with_defaults() {
        // File source only; ambient PORTFOLIO__*/NOTION_* variables must not
        // be able to flip the assertions.
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("portfolio.toml");
        fs::write(
            &path,
            r#"
[notion]
api_key = "secret_from_file"
database_id = "d9824bdc84454327be8b5b47500af6ce"

[content]
published_status = "live"
"#,
        )
        .unwrap();

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_path()))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.notion.api_key, "secret_from_file");
        assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
        assert_eq!(config.content.published_status, "live");
        assert_eq!(config.content.index_status, "Index");
        assert!(config.validate().is_ok());
    }
}
