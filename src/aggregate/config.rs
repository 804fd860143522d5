// src/aggregate/config.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::aggregate::types::{SourceKind, SourceSpec};

const ENV_PATH: &str = "FEEDS_CONFIG_PATH";

/// Load the source list from an explicit path. Supports TOML or JSON.
pub fn load_sources_from(path: &Path) -> Result<Vec<SourceSpec>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading source list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

/// Load the source list using env var + fallbacks:
/// 1) $FEEDS_CONFIG_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
/// 4) compiled-in defaults
pub fn load_sources_default() -> Result<Vec<SourceSpec>> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        }
        return Err(anyhow!("FEEDS_CONFIG_PATH points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Ok(default_sources())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<SourceSpec>> {
    #[derive(serde::Deserialize)]
    struct SourceFile {
        sources: Vec<SourceSpec>,
    }

    let specs = if hint_ext == "json" {
        serde_json::from_str::<SourceFile>(s)
            .context("parsing json source list")?
            .sources
    } else {
        toml::from_str::<SourceFile>(s)
            .context("parsing toml source list")?
            .sources
    };

    if specs.is_empty() {
        return Err(anyhow!("source list is empty"));
    }
    for spec in &specs {
        if spec.url.trim().is_empty() {
            return Err(anyhow!(
                "source with category '{}' has an empty url",
                spec.category
            ));
        }
    }
    Ok(specs)
}

/// The source list the service ships with when no config file is present.
pub fn default_sources() -> Vec<SourceSpec> {
    fn spec(url: &str, kind: SourceKind, category: &str) -> SourceSpec {
        SourceSpec {
            url: url.to_string(),
            kind,
            category: category.to_string(),
        }
    }

    vec![
        spec(
            "https://api.github.com/search/repositories?q=language:python&sort=stars&order=desc",
            SourceKind::RepoSearch,
            "popular",
        ),
        spec(
            "https://api.github.com/search/repositories?q=language:python&sort=updated&order=desc",
            SourceKind::RepoSearch,
            "updated",
        ),
        spec(
            "https://www.reddit.com/r/webdev/.json",
            SourceKind::DiscussionFeed,
            "webdev",
        ),
        spec(
            "https://www.reddit.com/r/programmerhumor/.json",
            SourceKind::DiscussionFeedWithImage,
            "programmerhumor",
        ),
        spec(
            "https://www.reddit.com/r/python/.json",
            SourceKind::DiscussionFeedTextOnly,
            "python",
        ),
        spec(
            "https://www.reddit.com/r/learnprogramming/.json",
            SourceKind::DiscussionFeedTextOnly,
            "learnprogramming",
        ),
        spec(
            "https://pypi.org/rss/updates.xml",
            SourceKind::PackageFeed,
            "updated",
        ),
        spec(
            "https://pypi.org/rss/packages.xml",
            SourceKind::PackageFeed,
            "newest",
        ),
    ]
}

/// Listener + pipeline settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{v}'"))?,
            Err(_) => 3000,
        };
        let timeout_secs = match std::env::var("FETCH_TIMEOUT_SECS") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("invalid FETCH_TIMEOUT_SECS value '{v}'"))?,
            Err(_) => 10,
        };
        Ok(Self {
            host,
            port,
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
