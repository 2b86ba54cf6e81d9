//! Parser configuration using Figment
//!
//! Configuration is loaded from multiple sources with the following
//! precedence (highest to lowest):
//! 1. Environment variables (prefix: `QUERYSPEC_`)
//! 2. Current working directory: `./queryspec.toml`
//! 3. Default values
//!
//! The defaults match the standard contract: page defaults to 1, limit
//! defaults to 10 and is capped at 50.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page number when the request carries none
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the request carries none
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum allowed page size
pub const MAX_LIMIT: u32 = 50;

/// Bounds and defaults applied while parsing pagination parameters
///
/// # Example
///
/// ```rust
/// use queryspec::config::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.default_page, 1);
/// assert_eq!(config.default_limit, 10);
/// assert_eq!(config.max_limit, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Page used when the `page` parameter is absent
    #[serde(default = "default_page")]
    pub default_page: u32,

    /// Limit used when the `limit` parameter is absent
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound for the `limit` parameter
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

const fn default_page() -> u32 {
    DEFAULT_PAGE
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

const fn default_max_limit() -> u32 {
    MAX_LIMIT
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl ParserConfig {
    /// Load configuration from defaults, `./queryspec.toml`, and
    /// `QUERYSPEC_`-prefixed environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Toml::file("queryspec.toml"))
    }

    fn load_from<P: figment::Provider>(file: P) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Env::prefixed("QUERYSPEC_"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page < 1 {
            return Err(ConfigError::Invalid(
                "default_page must be at least 1".to_string(),
            ));
        }
        if self.default_limit < 1 || self.max_limit < 1 {
            return Err(ConfigError::Invalid(
                "limits must be at least 1".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit {} exceeds max_limit {}",
                self.default_limit, self.max_limit
            )));
        }
        Ok(())
    }
}

/// Configuration loading or validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment failed to read or deserialize a source
    #[error(transparent)]
    Source(#[from] figment::Error),

    /// The loaded values are inconsistent
    #[error("invalid parser configuration: {0}")]
    Invalid(String),
}
