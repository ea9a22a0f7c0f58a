//! XML sitemap statistics
//!
//! Only what the sitemap rule scores on: how many entries there are and how
//! many of them carry `<lastmod>`. Parsing is regex based and tolerant, so a
//! truncated or slightly malformed sitemap still yields counts.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::url_utils::is_same_origin;

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:url|sitemap)>(.*?)</(?:url|sitemap)>").expect("invalid entry regex")
});
static LOC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<loc>\s*(.*?)\s*</loc>").expect("invalid loc regex"));
static LASTMOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<lastmod>\s*[^<\s][^<]*</lastmod>").expect("invalid lastmod regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<urlset>` listing pages
    Standard,
    /// `<sitemapindex>` pointing at other sitemaps
    Index,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapStats {
    pub kind: SitemapKind,
    /// Entries carrying a `<loc>`
    pub entries: usize,
    pub entries_with_lastmod: usize,
    /// Entries whose location is on another origin
    pub foreign_entries: usize,
}

impl SitemapStats {
    /// At least one entry, and every entry dated
    pub fn fully_dated(&self) -> bool {
        self.entries > 0 && self.entries_with_lastmod >= self.entries
    }
}

/// Count sitemap entries, resolving locations against `origin`
pub fn analyze_sitemap(content: &str, origin: &str) -> SitemapStats {
    let kind = if content.contains("<sitemapindex") {
        SitemapKind::Index
    } else if content.contains("<urlset") {
        SitemapKind::Standard
    } else {
        SitemapKind::Unknown
    };

    let mut stats = SitemapStats {
        kind,
        entries: 0,
        entries_with_lastmod: 0,
        foreign_entries: 0,
    };

    let blocks: Vec<&str> = ENTRY_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect();

    if blocks.is_empty() {
        // No <url>/<sitemap> wrappers; fall back to raw tag counts
        for loc in LOC_RE.captures_iter(content).filter_map(|cap| cap.get(1)) {
            stats.entries += 1;
            count_foreign(&mut stats, loc.as_str(), origin);
        }
        stats.entries_with_lastmod = LASTMOD_RE.find_iter(content).count().min(stats.entries);
        return stats;
    }

    for block in blocks {
        let Some(loc) = LOC_RE.captures(block).and_then(|cap| cap.get(1)) else {
            continue;
        };
        stats.entries += 1;
        count_foreign(&mut stats, loc.as_str(), origin);
        if LASTMOD_RE.is_match(block) {
            stats.entries_with_lastmod += 1;
        }
    }

    stats
}

fn count_foreign(stats: &mut SitemapStats, loc: &str, origin: &str) {
    let loc = decode_xml_entities(loc);
    if !origin.is_empty() && !loc.is_empty() && !is_same_origin(&loc, origin) {
        stats.foreign_entries += 1;
    }
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sitemap() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/page1</loc>
    <lastmod>2025-10-01</lastmod>
  </url>
  <url>
    <loc>https://example.com/page2</loc>
    <priority>0.5</priority>
  </url>
</urlset>"#;

        let stats = analyze_sitemap(xml, "https://example.com");
        assert_eq!(stats.kind, SitemapKind::Standard);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.entries_with_lastmod, 1);
        assert!(!stats.fully_dated());
    }

    #[test]
    fn test_sitemap_index() {
        let xml = r#"<sitemapindex>
  <sitemap><loc>https://example.com/sitemap1.xml</loc><lastmod>2025-01-01</lastmod></sitemap>
  <sitemap><loc>https://example.com/sitemap2.xml</loc><lastmod>2025-01-02</lastmod></sitemap>
</sitemapindex>"#;

        let stats = analyze_sitemap(xml, "https://example.com");
        assert_eq!(stats.kind, SitemapKind::Index);
        assert_eq!(stats.entries, 2);
        assert!(stats.fully_dated());
    }

    #[test]
    fn test_foreign_entries() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/page1</loc></url>
  <url><loc>https://other-domain.com/page2</loc></url>
</urlset>"#;

        let stats = analyze_sitemap(xml, "https://example.com");
        assert_eq!(stats.foreign_entries, 1);
    }

    #[test]
    fn test_bare_tags_without_wrappers() {
        let stats = analyze_sitemap("<loc>https://example.com/</loc>", "https://example.com");
        assert_eq!(stats.kind, SitemapKind::Unknown);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.entries_with_lastmod, 0);
    }

    #[test]
    fn test_empty_lastmod_does_not_count() {
        let xml = "<urlset><url><loc>https://example.com/</loc><lastmod></lastmod></url></urlset>";
        let stats = analyze_sitemap(xml, "https://example.com");
        assert_eq!(stats.entries_with_lastmod, 0);
    }

    #[test]
    fn test_xml_entity_decoding() {
        let encoded = "https://example.com/page?param=1&amp;other=2";
        let decoded = decode_xml_entities(encoded);
        assert_eq!(decoded, "https://example.com/page?param=1&other=2");
    }
}
