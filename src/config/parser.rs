use crate::config::types::Config;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Section the line parser is currently filling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before the first recognized header, or inside an unknown section
    Ignore,
    Index,
    SitemapUrls,
}

/// Parses configuration text in the two-section line format
///
/// ```text
/// [index]
/// my_index
///
/// [sitemap urls]
/// https://docs.example.com/sitemap.xml
/// ```
///
/// Sections may appear in any order. Blank lines and anything before the
/// first recognized header are ignored. Unknown bracketed headers reset the
/// active section, so future config sections are skipped rather than
/// misparsed. The first non-blank line after `[index]` sets the index name
/// (later lines, and repeated `[index]` sections, are ignored); every
/// non-blank line after `[sitemap urls]` is appended verbatim, in order.
pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();
    let mut section = Section::Ignore;
    let mut index_name_set = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = match line {
                "[index]" => Section::Index,
                "[sitemap urls]" => Section::SitemapUrls,
                _ => Section::Ignore,
            };
            continue;
        }

        match section {
            Section::Index if !index_name_set => {
                config.index_name = line.to_string();
                index_name_set = true;
            }
            Section::Index => {}
            Section::SitemapUrls => config.sitemap_urls.push(line.to_string()),
            Section::Ignore => {}
        }
    }

    config
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(ConfigError)` - The file could not be read
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_config(&content))
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to log which configuration a run was started with, so reruns
/// against a changed config are distinguishable in the logs.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
