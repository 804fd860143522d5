// src/aggregate/types.rs
use serde::{Deserialize, Serialize};

/// The upstream shapes we know how to normalize. Each kind maps to the
/// wire label stamped on every entry it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    RepoSearch,
    PackageFeed,
    DiscussionFeed,
    DiscussionFeedWithImage,
    DiscussionFeedTextOnly,
}

impl SourceKind {
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::RepoSearch => "github",
            SourceKind::PackageFeed => "pypi",
            SourceKind::DiscussionFeed
            | SourceKind::DiscussionFeedWithImage
            | SourceKind::DiscussionFeedTextOnly => "reddit",
        }
    }
}

/// One configured upstream feed. Immutable after config load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub url: String,
    pub kind: SourceKind,
    pub category: String,
}

/// Common record shape across all sources. Fields a kind never produces
/// stay `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEntry {
    pub source: String,
    pub category: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub desc: Option<String>,
    pub stars: Option<u64>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    Fetch,
    Normalize,
}

/// Wire form of a per-source failure: which stage broke, plus a
/// human-readable message. Lets clients tell "zero items" from "broken".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub message: String,
}

/// Outcome of one configured source, never partially populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceResult {
    Ok {
        source: String,
        category: String,
        entries: Vec<NormalizedEntry>,
    },
    Error {
        source: String,
        category: String,
        error: SourceError,
    },
}

impl SourceResult {
    pub fn ok(spec: &SourceSpec, entries: Vec<NormalizedEntry>) -> Self {
        SourceResult::Ok {
            source: spec.kind.label().to_string(),
            category: spec.category.clone(),
            entries,
        }
    }

    pub fn failed(spec: &SourceSpec, error: SourceError) -> Self {
        SourceResult::Error {
            source: spec.kind.label().to_string(),
            category: spec.category.clone(),
            error,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SourceResult::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_cover_all_variants() {
        assert_eq!(SourceKind::RepoSearch.label(), "github");
        assert_eq!(SourceKind::PackageFeed.label(), "pypi");
        assert_eq!(SourceKind::DiscussionFeed.label(), "reddit");
        assert_eq!(SourceKind::DiscussionFeedWithImage.label(), "reddit");
        assert_eq!(SourceKind::DiscussionFeedTextOnly.label(), "reddit");
    }

    #[test]
    fn source_result_serializes_with_status_tag() {
        let spec = SourceSpec {
            url: "https://example.test/feed".into(),
            kind: SourceKind::PackageFeed,
            category: "updated".into(),
        };
        let ok = SourceResult::ok(&spec, vec![]);
        let v = serde_json::to_value(&ok).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["source"], "pypi");
        assert_eq!(v["category"], "updated");
        assert!(v["entries"].as_array().unwrap().is_empty());

        let failed = SourceResult::failed(
            &spec,
            SourceError {
                kind: SourceErrorKind::Fetch,
                message: "boom".into(),
            },
        );
        let v = serde_json::to_value(&failed).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["error"]["kind"], "fetch");
        assert_eq!(v["error"]["message"], "boom");
    }

    #[test]
    fn spec_deserializes_from_snake_case_kind() {
        let spec: SourceSpec = serde_json::from_str(
            r#"{"url":"https://example.test","kind":"discussion_feed_with_image","category":"humor"}"#,
        )
        .unwrap();
        assert_eq!(spec.kind, SourceKind::DiscussionFeedWithImage);
    }
}
