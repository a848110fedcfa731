//! Listing and API settings, loaded from the console's TOML file.

use crate::error::{ListError, Result};
use crate::shape::ResponseShape;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How listings page and debounce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Initial rows per page.
    pub page_size: usize,
    /// Choices offered by the page-size selector.
    pub page_size_options: Vec<usize>,
    /// Quiet period before a search term is applied.
    pub search_debounce_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
            search_debounce_ms: 500,
        }
    }
}

impl ListingConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ListError::Config("listing.page_size must be at least 1".into()));
        }
        if self.page_size_options.is_empty() {
            return Err(ListError::Config(
                "listing.page_size_options must not be empty".into(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(ListError::Config(
                "listing.page_size_options must not contain 0".into(),
            ));
        }
        Ok(())
    }
}

/// Where remote listings fetch from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout; none by default.
    pub timeout_secs: Option<u64>,
    pub response: ResponseShape,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            timeout_secs: None,
            response: ResponseShape::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ListError::Config("api.base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ListError::Config(format!(
                "api.base_url must start with http:// or https://, got `{url}`"
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(ListError::Config("api.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Everything the console reads from its settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub listing: ListingConfig,
    pub api: ApiConfig,
}

impl ConsoleSettings {
    /// Parse settings from TOML text. Absent keys keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.listing.validate()?;
        self.api.validate()
    }
}
