use crate::ConfigError;
use std::collections::HashMap;

/// Index name used when the config file does not set one
pub const DEFAULT_INDEX_NAME: &str = "docusaurus_ja";

/// Resolved indexer configuration
///
/// Built once per run by parsing the config source; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target index name
    pub index_name: String,

    /// Sitemap source addresses; insertion order is the crawl order
    pub sitemap_urls: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            sitemap_urls: Vec::new(),
        }
    }
}

/// HTTP Basic credentials for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCredentials {
    pub username: String,
    pub password: String,
}

/// Lookup table of per-host HTTP Basic credentials
///
/// Sitemaps on private hosts require authenticated fetches; every other host
/// is fetched anonymously. Keys are literal host strings as they appear in
/// the sitemap URL.
#[derive(Debug, Clone, Default)]
pub struct CredentialMap {
    hosts: HashMap<String, HostCredentials>,
}

impl CredentialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers credentials for a host
    pub fn insert(&mut self, host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) {
        self.hosts.insert(
            host.into(),
            HostCredentials {
                username: username.into(),
                password: password.into(),
            },
        );
    }

    /// Looks up credentials for a host, if any are registered
    pub fn lookup(&self, host: &str) -> Option<&HostCredentials> {
        self.hosts.get(host)
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Parses a list of `HOST=USER:PASS` specs (as passed on the CLI)
    ///
    /// # Returns
    ///
    /// * `Ok(CredentialMap)` - All specs were well-formed
    /// * `Err(ConfigError)` - A spec was missing the `=` or `:` separator
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self, ConfigError> {
        let mut map = Self::new();
        for spec in specs {
            let spec = spec.as_ref();
            let (host, creds) = spec
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidCredential(spec.to_string()))?;
            let (user, pass) = creds
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidCredential(spec.to_string()))?;
            if host.is_empty() || user.is_empty() {
                return Err(ConfigError::InvalidCredential(spec.to_string()));
            }
            map.insert(host, user, pass);
        }
        Ok(map)
    }
}
