use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_CHARSET, DEFAULT_FILENAME_SEPARATOR, ENV_PREFIX,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub encoder: EncoderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Value of the `CHARSET` parameter added to text properties.
    pub charset: String,
    /// Joins the parts of a derived filename.
    pub filename_separator: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            filename_separator: DEFAULT_FILENAME_SEPARATOR.to_string(),
        }
    }
}

impl EncoderConfig {
    /// ## Summary
    /// Checks that the values can be placed on a content line verbatim.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the charset is empty or contains
    /// characters that would break parameter syntax, or if the separator is
    /// empty or alphanumeric.
    pub fn validate(&self) -> CoreResult<()> {
        if self.charset.is_empty()
            || self
                .charset
                .chars()
                .any(|c| matches!(c, ';' | ':' | ',' | '"') || c.is_whitespace())
        {
            return Err(CoreError::ConfigError(format!(
                "invalid encoder charset: {:?}",
                self.charset
            )));
        }

        if self.filename_separator.is_empty()
            || self
                .filename_separator
                .chars()
                .any(|c| c.is_alphanumeric())
        {
            return Err(CoreError::ConfigError(format!(
                "invalid filename separator: {:?}",
                self.filename_separator
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `rolodex.toml` into a `Settings`.
    ///
    /// Environment variables use the `ROLODEX_` prefix and `__` between
    /// sections, e.g. `ROLODEX_ENCODER__CHARSET`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the encoder section fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("encoder.charset", DEFAULT_CHARSET)?
            .set_default("encoder.filename_separator", DEFAULT_FILENAME_SEPARATOR)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env overrides file
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.encoder.validate()?;

        tracing::debug!(
            charset = %settings.encoder.charset,
            level = %settings.logging.level,
            "Settings loaded"
        );

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
