//! Lookup configuration.
//!
//! Defaults point at the public UniProtKB REST service. `MOTIFSCAN_BASE_URL` and
//! `MOTIFSCAN_TIMEOUT_SECS` override them; command-line flags override both.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default UniProtKB REST endpoint; entries are fetched from `{base_url}/{accession}.txt`.
pub const DEFAULT_BASE_URL: &str = "https://rest.uniprot.org/uniprotkb";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "MOTIFSCAN_BASE_URL";
pub const TIMEOUT_ENV: &str = "MOTIFSCAN_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Record service base URL.
    pub base_url: String,

    /// Timeout for one lookup, in seconds.
    pub timeout_secs: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("motifscan/{}", crate::VERSION)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup` (keyed by environment variable name).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_ENV) {
            config.set_base_url(url);
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}")))?;
            config.set_timeout_secs(secs)?;
        }

        Ok(config)
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into().trim_end_matches('/').to_string();
    }

    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(Error::config("timeout must be at least one second"));
        }
        self.timeout_secs = secs;
        Ok(())
    }

    pub fn base_url(&self) -> &str { &self.base_url }
}
