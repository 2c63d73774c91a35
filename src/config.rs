//! Configuration loading for docrelay.
//!
//! Config lives at `~/.docrelay/config.json`. Every field has a default so a
//! missing file means "run with defaults", while a present-but-corrupt file
//! is a hard error rather than a silent fallback.
//!
//! The signing key is not stored here by default: set
//! `DOCRELAY_SIGNING_KEY` in the environment (`.env` files are honored) or
//! opt in to `signing.key_hex` for throwaway setups.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RelayError, Result};

/// Environment variable consulted for the hex-encoded signing key.
pub const SIGNING_KEY_ENV: &str = "DOCRELAY_SIGNING_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub relay: RelayConfig,
    pub signing: SigningConfig,
    pub directory: DirectoryConfig,
    pub outbox: OutboxConfig,
    pub cache: CacheConfig,
}

/// Document acceptance policy for the relay pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Document format versions the relay will send.
    pub accepted_formats: Vec<String>,
    /// Documents created more than this many months ago are skipped.
    pub max_age_months: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            accepted_formats: vec!["4.0".to_string(), "3.1".to_string()],
            max_age_months: 1,
        }
    }
}

/// Signing key configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SigningConfig {
    /// Hex-encoded HMAC key. Prefer `DOCRELAY_SIGNING_KEY` over this field.
    pub key_hex: Option<String>,
}

impl SigningConfig {
    /// Resolve the signing key, environment first, then config.
    pub fn resolve_key_hex(&self) -> Result<String> {
        if let Ok(key) = std::env::var(SIGNING_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key.trim().to_string());
            }
        }
        self.key_hex.clone().ok_or_else(|| {
            RelayError::Config(format!(
                "No signing key configured. Set {} or signing.key_hex",
                SIGNING_KEY_ENV
            ))
        })
    }
}

/// Location of the recipient directory file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub path: PathBuf,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            path: docrelay_home().join("directory.json"),
        }
    }
}

/// Location of the outbox spool directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboxConfig {
    pub path: PathBuf,
}

impl Default for OutboxConfig {
    fn default() -> Self {
        Self {
            path: docrelay_home().join("outbox"),
        }
    }
}

/// Lookup cache toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, every resolve queries the directory service directly.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Default config file location: `~/.docrelay/config.json`.
    pub fn path() -> PathBuf {
        docrelay_home().join("config.json")
    }

    /// Load config from `path`.
    ///
    /// A missing file yields `Config::default()`; a file that exists but
    /// does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| RelayError::Config(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

fn docrelay_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".docrelay")
}
