//! # Runtime Configuration
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `RT_CODEC_KEY` | 24-byte codec key, hex (48 chars) |
//! | `RT_DOMAIN` | Accepted domains, comma separated; first one mints |
//! | `RT_SUBJECT` | Minting subject id |
//! | `RT_DATA_DIR` | Snapshot directory |
//! | `RT_FLUSH_SECS` | Snapshot flush interval |
//! | `RT_CLASS_FILE` | Class registry file (JSON lines) |
//!
//! ## Security Requirements
//!
//! - The codec key MUST NOT be the default zero value in production

use rt_01_token_codec::{CodecConfig, CodecError, CodecKey};
use rt_03_scan_dispatch::DispatchConfig;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Class registry file name inside the data directory.
pub const CLASS_FILE_NAME: &str = "classes.jsonl";

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Snapshot directory.
    pub data_dir: PathBuf,
    /// Seconds between background snapshot flushes.
    pub flush_interval_secs: u64,
    /// Class registry file; defaults to `<data_dir>/classes.jsonl`.
    pub class_file: Option<PathBuf>,
    /// Token codec.
    pub codec: CodecConfig,
    /// Scan resolution.
    pub dispatch: DispatchConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            flush_interval_secs: 30,
            class_file: None,
            codec: CodecConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Codec key is the default zero value.
    #[error(
        "SECURITY VIOLATION: codec key is default zero value. \
         Set RT_CODEC_KEY environment variable or pass --codec-key."
    )]
    InsecureCodecKey,

    /// Flush interval of zero.
    #[error("Flush interval must be at least one second")]
    InvalidFlushInterval,

    /// Codec settings rejected.
    #[error("Codec configuration: {0}")]
    Codec(#[from] CodecError),

    /// Dispatcher settings rejected.
    #[error("Dispatch configuration: {0}")]
    Dispatch(#[from] rt_03_scan_dispatch::ConfigError),
}

impl RuntimeConfig {
    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Apply overrides from a variable lookup. Bad values are logged and
    /// ignored.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key_hex) = var("RT_CODEC_KEY") {
            match CodecKey::from_hex(key_hex.trim()) {
                Ok(key) => {
                    self.codec.key = key;
                    info!("Loaded codec key from environment");
                }
                Err(e) => warn!("RT_CODEC_KEY ignored: {}", e),
            }
        }

        if let Some(domains) = var("RT_DOMAIN") {
            let domains: Vec<String> = domains
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect();
            if domains.is_empty() {
                warn!("RT_DOMAIN ignored: no domains listed");
            } else {
                self.codec.domains = domains;
            }
        }

        if let Some(subject) = var("RT_SUBJECT") {
            self.codec = self.codec.clone().with_subject(subject.trim());
        }

        if let Some(dir) = var("RT_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(secs) = var("RT_FLUSH_SECS") {
            match secs.trim().parse() {
                Ok(secs) => self.flush_interval_secs = secs,
                Err(_) => warn!("RT_FLUSH_SECS must be a number of seconds"),
            }
        }

        if let Some(path) = var("RT_CLASS_FILE") {
            self.class_file = Some(PathBuf::from(path));
        }
    }

    /// Where the class registry is read from.
    pub fn class_path(&self) -> PathBuf {
        self.class_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(CLASS_FILE_NAME))
    }

    /// Structural checks every deployment needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flush_interval_secs == 0 {
            return Err(ConfigError::InvalidFlushInterval);
        }
        self.codec.validate()?;
        self.dispatch.validate()?;
        Ok(())
    }

    /// Validate configuration for production readiness.
    ///
    /// Returns `Err` if the codec key is the default zero value, or if
    /// [`RuntimeConfig::validate`] fails.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.codec.key.is_zero() {
            return Err(ConfigError::InsecureCodecKey);
        }
        self.validate()
    }
}
