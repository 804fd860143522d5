// src/aggregate/normalizers/package_feed.rs
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::aggregate::error::NormalizeError;
use crate::aggregate::normalizers::clean_text;
use crate::aggregate::types::NormalizedEntry;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// Package-feed XML to entries. Accepts RSS 2.0 and Atom; a document
/// carrying neither shape is rejected rather than yielding zero items.
pub fn normalize(payload: &str, category: &str) -> Result<Vec<NormalizedEntry>, NormalizeError> {
    let xml = scrub_html_entities_for_xml(payload);

    if is_atom(&xml) {
        let feed: AtomFeed = from_str(&xml)?;
        return Ok(atom_entries(feed, category));
    }
    if xml.contains("<rss") || xml.contains("<channel") {
        let rss: Rss = from_str(&xml)?;
        return Ok(rss_entries(rss, category));
    }
    Err(NormalizeError::UnrecognizedFeed)
}

fn rss_entries(rss: Rss, category: &str) -> Vec<NormalizedEntry> {
    rss.channel
        .items
        .into_iter()
        .map(|it| NormalizedEntry {
            source: "pypi".to_string(),
            category: category.to_string(),
            title: it.title,
            link: it.link,
            desc: it.description.as_deref().map(clean_text),
            stars: None,
            thumbnail: None,
            image: None,
        })
        .collect()
}

fn atom_entries(feed: AtomFeed, category: &str) -> Vec<NormalizedEntry> {
    feed.entries
        .into_iter()
        .map(|it| {
            let link = it.links.into_iter().find_map(|l| l.href);
            NormalizedEntry {
                source: "pypi".to_string(),
                category: category.to_string(),
                title: it.title,
                link,
                desc: it.summary.as_deref().map(clean_text),
                stars: None,
                thumbnail: None,
                image: None,
            }
        })
        .collect()
}

fn is_atom(xml: &str) -> bool {
    match (xml.find("<feed"), xml.find("<rss")) {
        (Some(a), Some(r)) => a < r,
        (Some(_), None) => true,
        _ => false,
    }
}

// Feeds in the wild embed named HTML entities the XML parser rejects.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_channel_yields_zero_entries() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title></channel></rss>"#;
        let entries = normalize(xml, "updated").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn named_entities_survive_parsing() {
        let xml = r#"<rss version="2.0"><channel><item><title>pkg&nbsp;1.0</title></item></channel></rss>"#;
        let entries = normalize(xml, "updated").unwrap();
        assert_eq!(entries[0].title.as_deref(), Some("pkg 1.0"));
    }

    #[test]
    fn non_feed_xml_is_rejected() {
        let err = normalize("<html><body>nope</body></html>", "updated").unwrap_err();
        assert!(matches!(err, NormalizeError::UnrecognizedFeed));
    }

    #[test]
    fn truncated_xml_is_an_error() {
        let err = normalize("<rss version=\"2.0\"><channel><item>", "updated").unwrap_err();
        assert!(matches!(err, NormalizeError::Xml(_)));
    }
}
