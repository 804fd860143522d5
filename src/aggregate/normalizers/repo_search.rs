// src/aggregate/normalizers/repo_search.rs
use serde::Deserialize;

use crate::aggregate::error::NormalizeError;
use crate::aggregate::types::NormalizedEntry;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    name: Option<String>,
    html_url: Option<String>,
    description: Option<String>,
    stargazers_count: Option<u64>,
}

/// Repository-search JSON (`{"items": [...]}`) to entries. A payload
/// without an `items` array is malformed; missing per-item fields are not.
pub fn normalize(payload: &str, category: &str) -> Result<Vec<NormalizedEntry>, NormalizeError> {
    let resp: SearchResponse = serde_json::from_str(payload)?;

    let mut out = Vec::with_capacity(resp.items.len());
    for item in resp.items {
        out.push(NormalizedEntry {
            source: "github".to_string(),
            category: category.to_string(),
            title: item.name,
            link: item.html_url,
            desc: item.description,
            stars: item.stargazers_count,
            thumbnail: None,
            image: None,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_description_stays_none() {
        let payload = r#"{"items":[{"name":"n","html_url":"u","description":null,"stargazers_count":0}]}"#;
        let entries = normalize(payload, "popular").unwrap();
        assert_eq!(entries[0].desc, None);
        assert_eq!(entries[0].stars, Some(0));
    }

    #[test]
    fn missing_items_is_an_error() {
        let err = normalize(r#"{"total_count":0}"#, "popular").unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }
}
