// src/aggregate/normalizers/discussion.rs
use serde::Deserialize;

use crate::aggregate::error::NormalizeError;
use crate::aggregate::types::NormalizedEntry;

/// Which extra field a discussion variant carries besides title + link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extra {
    Thumbnail,
    Image,
    TextOnly,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: ChildData,
}

#[derive(Debug, Deserialize)]
struct ChildData {
    title: Option<String>,
    permalink: Option<String>,
    thumbnail: Option<String>,
    url: Option<String>,
}

/// Discussion-board listing JSON (`data.children`) to entries. A missing
/// `data.children` fails the payload; missing per-child keys degrade to
/// `null` fields instead of dropping the entry.
pub fn normalize(
    payload: &str,
    category: &str,
    extra: Extra,
) -> Result<Vec<NormalizedEntry>, NormalizeError> {
    let listing: Listing = serde_json::from_str(payload)?;

    let mut out = Vec::with_capacity(listing.data.children.len());
    for child in listing.data.children {
        let d = child.data;
        let (thumbnail, image) = match extra {
            Extra::Thumbnail => (d.thumbnail, None),
            Extra::Image => (None, d.url),
            Extra::TextOnly => (None, None),
        };
        out.push(NormalizedEntry {
            source: "reddit".to_string(),
            category: category.to_string(),
            title: d.title,
            link: d.permalink,
            desc: None,
            stars: None,
            thumbnail,
            image,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"kind": "t3", "data": {"title": "a", "permalink": "/r/x/1", "thumbnail": "https://t/1.png", "url": "https://i/1.png"}},
                {"kind": "t3", "data": {"title": "b", "permalink": "/r/x/2"}}
            ]
        }
    }"#;

    #[test]
    fn thumbnail_variant_keeps_thumbnail_only() {
        let entries = normalize(LISTING, "webdev", Extra::Thumbnail).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].thumbnail.as_deref(), Some("https://t/1.png"));
        assert_eq!(entries[0].image, None);
        // second child has no thumbnail, entry is kept with a null field
        assert_eq!(entries[1].thumbnail, None);
        assert_eq!(entries[1].title.as_deref(), Some("b"));
    }

    #[test]
    fn image_variant_maps_url_to_image() {
        let entries = normalize(LISTING, "humor", Extra::Image).unwrap();
        assert_eq!(entries[0].image.as_deref(), Some("https://i/1.png"));
        assert_eq!(entries[0].thumbnail, None);
    }

    #[test]
    fn text_only_variant_carries_neither() {
        let entries = normalize(LISTING, "python", Extra::TextOnly).unwrap();
        assert_eq!(entries[0].thumbnail, None);
        assert_eq!(entries[0].image, None);
        assert_eq!(entries[0].link.as_deref(), Some("/r/x/1"));
    }

    #[test]
    fn missing_children_fails_the_payload() {
        let err = normalize(r#"{"data":{}}"#, "python", Extra::TextOnly).unwrap_err();
        assert!(matches!(err, NormalizeError::Json(_)));
    }
}
