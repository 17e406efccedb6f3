//! # iolab-config
//!
//! Layered configuration loading for iolab using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IOLAB_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.iolab/config.toml`
//! 4. User-level `~/.config/iolab/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `IOLAB_FIFO__POLL_INTERVAL_MS` -> `fifo.poll_interval_ms`,
//! `IOLAB_FILES__LOG` -> `files.log`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use iolab_config::IoLabConfig;
//!
//! let config = IoLabConfig::load_with_dotenv(None).expect("config");
//! println!("select timeout: {}s", config.select.timeout_secs);
//! ```

mod error;
mod fifo;
mod files;
mod read;
mod stream_lock;
mod zerocopy;

pub use error::ConfigError;
pub use fifo::FifoConfig;
pub use files::FilesConfig;
pub use read::{MAX_CAPACITY, ReadConfig, SelectConfig};
pub use stream_lock::StreamLockConfig;
pub use zerocopy::ZeroCopyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IoLabConfig {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub read: ReadConfig,
    #[serde(default)]
    pub select: SelectConfig,
    #[serde(default)]
    pub fifo: FifoConfig,
    #[serde(default)]
    pub stream_lock: StreamLockConfig,
    #[serde(default)]
    pub zerocopy: ZeroCopyConfig,
}

impl IoLabConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            return Err(ConfigError::invalid(
                "--config",
                format!("{} does not exist", path.display()),
            ));
        }

        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".iolab/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("IOLAB_").split("__"))
    }

    /// Reject values the demos cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fifo.poll_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "fifo.poll_interval_ms",
                "must be greater than zero",
            ));
        }
        if self.fifo.mode > 0o7777 {
            return Err(ConfigError::invalid(
                "fifo.mode",
                format!("{:o} is not a permission mode", self.fifo.mode),
            ));
        }
        for (field, capacity) in [
            ("read.capacity", self.read.capacity),
            ("select.capacity", self.select.capacity),
        ] {
            if capacity > MAX_CAPACITY {
                return Err(ConfigError::invalid(
                    field,
                    format!("{capacity} exceeds the {MAX_CAPACITY}-byte limit"),
                ));
            }
        }
        if self.zerocopy.file_size == 0 {
            return Err(ConfigError::invalid(
                "zerocopy.file_size",
                "a zero-length file cannot be mapped",
            ));
        }
        if self.stream_lock.messages == 0 {
            return Err(ConfigError::invalid(
                "stream_lock.messages",
                "writers must emit at least one line",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("iolab").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = IoLabConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.files.log, "log.txt");
        assert_eq!(config.files.record, "data");
        assert_eq!(config.zerocopy.file_size, 4096);
        assert_eq!(config.stream_lock.messages, 5);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = IoLabConfig::default();
        config.fifo.poll_interval_ms = 0;
        let error = config.validate().expect_err("should reject");
        assert!(error.to_string().contains("fifo.poll_interval_ms"));
    }

    #[test]
    fn oversized_buffers_are_rejected() {
        let mut config = IoLabConfig::default();
        config.read.capacity = MAX_CAPACITY;
        config.validate().expect("limit itself is allowed");

        config.read.capacity = usize::MAX;
        let error = config.validate().expect_err("should reject");
        assert!(error.to_string().contains("read.capacity"));

        config.read.capacity = 1024;
        config.select.capacity = MAX_CAPACITY + 1;
        let error = config.validate().expect_err("should reject");
        assert!(error.to_string().contains("select.capacity"));
    }

    #[test]
    fn zero_mapping_size_is_rejected() {
        let mut config = IoLabConfig::default();
        config.zerocopy.file_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
