// src/aggregate/normalizers/mod.rs
pub mod discussion;
pub mod package_feed;
pub mod repo_search;

use crate::aggregate::error::NormalizeError;
use crate::aggregate::types::{NormalizedEntry, SourceKind};

/// Pure transform from one upstream's raw payload to the common entry
/// shape. The aggregator stays oblivious to upstream formats.
pub fn normalize(
    kind: SourceKind,
    payload: &str,
    category: &str,
) -> Result<Vec<NormalizedEntry>, NormalizeError> {
    match kind {
        SourceKind::RepoSearch => repo_search::normalize(payload, category),
        SourceKind::PackageFeed => package_feed::normalize(payload, category),
        SourceKind::DiscussionFeed => {
            discussion::normalize(payload, category, discussion::Extra::Thumbnail)
        }
        SourceKind::DiscussionFeedWithImage => {
            discussion::normalize(payload, category, discussion::Extra::Image)
        }
        SourceKind::DiscussionFeedTextOnly => {
            discussion::normalize(payload, category, discussion::Extra::TextOnly)
        }
    }
}

/// Clean up free text coming from feed summaries: decode HTML entities,
/// strip tags, collapse whitespace.
pub fn clean_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}
